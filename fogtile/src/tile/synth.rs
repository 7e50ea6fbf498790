//! Tile synthesis: fog engine pixels to PNG response.

use super::label::{draw_text_centered, stroke_border};
use super::{TileError, TileRequest, TileResponse, PNG_CONTENT_TYPE};
use crate::fog::FogSource;
use bytes::Bytes;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use tracing::debug;

const BORDER_THICKNESS: u32 = 2;
const BORDER_COLOR: Rgba<u8> = Rgba([0, 0, 0, 128]);
const LABEL_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Diagnostic decoration toggles for synthesized tiles.
///
/// Both default to off; the synthesized contract is the bare fog image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TileStyle {
    /// Stroke a 2-pixel half-opaque border inside the tile edges
    pub border: bool,
    /// Stamp the tile indices and zoom level across the tile
    pub label: bool,
}

/// Turns fog engine render results into PNG tile responses.
///
/// Stateless apart from configuration; identical requests against an
/// unchanged engine produce byte-identical output.
#[derive(Debug, Clone)]
pub struct TileSynthesizer {
    tile_size: u32,
    style: TileStyle,
}

impl TileSynthesizer {
    /// Create a synthesizer for square tiles of `tile_size` device pixels.
    pub fn new(tile_size: u32, style: TileStyle) -> Self {
        Self { tile_size, style }
    }

    /// The configured tile edge length in pixels.
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Synthesize one tile.
    ///
    /// Awaits the engine's render, validates the returned buffer against
    /// the configured dimension, applies the optional diagnostics, and
    /// encodes PNG. An engine rejection rejects the whole request - no
    /// placeholder image is produced here.
    pub async fn synthesize<S: FogSource>(
        &self,
        fog: &S,
        request: TileRequest,
    ) -> Result<TileResponse, TileError> {
        let raw = fog.render_tile(request.x, request.y, request.zoom).await?;

        let size = self.tile_size;
        let expected = (size as usize) * (size as usize) * 4;
        if raw.len() != expected {
            return Err(TileError::PixelBufferSize {
                size,
                expected,
                actual: raw.len(),
            });
        }
        let mut surface =
            RgbaImage::from_raw(size, size, raw).ok_or(TileError::PixelBufferSize {
                size,
                expected,
                actual: 0,
            })?;

        if self.style.border {
            stroke_border(&mut surface, BORDER_THICKNESS, BORDER_COLOR);
        }
        if self.style.label {
            let scale = (size / 128).max(1);
            let center = size as i64 / 2;
            draw_text_centered(
                &mut surface,
                center,
                size as i64 * 35 / 100,
                &format!("TILE {},{}", request.x, request.y),
                scale,
                LABEL_COLOR,
            );
            draw_text_centered(
                &mut surface,
                center,
                size as i64 * 59 / 100,
                &format!("ZOOM {}", request.zoom),
                scale,
                LABEL_COLOR,
            );
        }

        let mut png = Vec::new();
        DynamicImage::ImageRgba8(surface)
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| TileError::Encode(e.to_string()))?;

        debug!(tile = %request, bytes = png.len(), "tile synthesized");
        Ok(TileResponse {
            body: Bytes::from(png),
            content_type: PNG_CONTENT_TYPE,
        })
    }
}
