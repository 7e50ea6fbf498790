//! Deterministic local fixtures backing the CLI.
//!
//! A real deployment wires the service to the host's blob storage and a
//! fog engine fed with recorded exploration tracks. The CLI substitutes
//! both with in-memory stand-ins so a tile can be rendered offline.

use fogtile::coord::MercatorPoint;
use fogtile::fog::{FogError, FogSource};
use fogtile::interceptor::{BlobFetcher, FetchError};

const FOG_ALPHA: u8 = 128;

/// Names the in-memory store can answer for.
pub fn manifest_names() -> Vec<String> {
    vec!["demo-track".to_string()]
}

/// In-memory blob store holding a single synthetic track file.
pub struct MemoryStore;

impl MemoryStore {
    pub fn new() -> Self {
        Self
    }
}

impl BlobFetcher for MemoryStore {
    async fn fetch(&self, name: &str) -> Result<Vec<u8>, FetchError> {
        match name {
            "demo-track" => Ok(vec![0u8; 16]),
            other => Err(FetchError {
                name: other.to_string(),
                message: "not in the demo store".to_string(),
            }),
        }
    }
}

/// Fog engine stand-in with coordinate-dependent output.
///
/// Tiles of even coordinate parity get a cleared disc around their
/// centre; the rest stay fully fogged. The pattern is stable across
/// runs so output files can be compared.
pub struct DemoFogSource {
    tile_size: u32,
}

impl DemoFogSource {
    pub fn new(tile_size: u32) -> Self {
        Self { tile_size }
    }
}

impl FogSource for DemoFogSource {
    fn ingest_file(&mut self, _name: &str, _data: Vec<u8>) -> Result<(), FogError> {
        Ok(())
    }

    fn ingest_archive(&mut self, _data: Vec<u8>) -> Result<(), FogError> {
        Ok(())
    }

    fn bounding_box_pixels(
        &self,
        south_west: MercatorPoint,
        north_east: MercatorPoint,
    ) -> Result<Vec<f32>, FogError> {
        let mid_x = ((south_west.x + north_east.x) / 2.0) as f32;
        let mid_y = ((south_west.y + north_east.y) / 2.0) as f32;
        Ok(vec![
            south_west.x as f32,
            south_west.y as f32,
            mid_x,
            mid_y,
            north_east.x as f32,
            north_east.y as f32,
        ])
    }

    async fn render_tile(&self, tile_x: i64, tile_y: i64, zoom: i16) -> Result<Vec<u8>, FogError> {
        let size = self.tile_size as i64;
        let mut raw = vec![0u8; (size * size * 4) as usize];

        let cleared = (tile_x + tile_y + zoom as i64).rem_euclid(2) == 0;
        let centre = size as f64 / 2.0;
        let radius = size as f64 * 0.35;

        for py in 0..size {
            for px in 0..size {
                let alpha = if cleared {
                    let dx = px as f64 - centre;
                    let dy = py as f64 - centre;
                    if (dx * dx + dy * dy).sqrt() < radius {
                        0
                    } else {
                        FOG_ALPHA
                    }
                } else {
                    FOG_ALPHA
                };
                let idx = ((py * size + px) * 4) as usize;
                raw[idx..idx + 4].copy_from_slice(&[0, 0, 0, alpha]);
            }
        }

        Ok(raw)
    }
}
