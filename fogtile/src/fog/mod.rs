//! Fog engine collaborator seam.
//!
//! The geospatial fog-state engine ("FogMap") stores exploration history
//! and answers pixel/tile queries. It is an external collaborator: this
//! crate consumes it through the [`FogSource`] trait and never
//! reimplements it.
//!
//! Ingestion runs once, during worker initialization, while the source is
//! still exclusively owned; afterwards the source is shared behind an
//! `Arc` and only the read-only query methods are called.

use crate::coord::MercatorPoint;
use std::future::Future;
use thiserror::Error;

/// Errors surfaced by the fog engine.
///
/// None of these are fatal to the host: a failed bounding-box query
/// degrades the overlay to fully fogged, a failed tile render rejects
/// that one tile request.
#[derive(Debug, Clone, Error)]
pub enum FogError {
    /// A data file could not be decoded into exploration state
    #[error("failed to ingest {name}: {message}")]
    Ingest { name: String, message: String },

    /// A bundled archive could not be unpacked
    #[error("failed to ingest archive: {0}")]
    IngestArchive(String),

    /// The bounding-box pixel query failed
    #[error("bounding-box query failed: {0}")]
    Query(String),

    /// The engine rejected a tile render request
    #[error("tile render failed for ({x}, {y}) at zoom {zoom}: {message}")]
    Render {
        x: i64,
        y: i64,
        zoom: i16,
        message: String,
    },
}

/// The exploration-state engine consumed by the overlay and interceptor.
///
/// Implementations must be thread-safe (`Send + Sync`): once initialized,
/// a single instance is shared by all concurrent tile-fetch handlers.
pub trait FogSource: Send + Sync {
    /// Feed one raw exploration-history file into the engine.
    ///
    /// Called repeatedly during initialization. A failure here must not
    /// stop the caller from ingesting the remaining files.
    fn ingest_file(&mut self, name: &str, data: Vec<u8>) -> Result<(), FogError>;

    /// Feed a bundled archive of exploration-history files into the engine.
    fn ingest_archive(&mut self, data: Vec<u8>) -> Result<(), FogError>;

    /// Flat sequence of explored points inside the given mercator bounds.
    ///
    /// Returns interleaved x/y pairs in projected pixel space. Called once
    /// per overlay frame; the result is ephemeral and never cached.
    fn bounding_box_pixels(
        &self,
        south_west: MercatorPoint,
        north_east: MercatorPoint,
    ) -> Result<Vec<f32>, FogError>;

    /// Render one tile's fog image as a raw RGBA pixel buffer.
    ///
    /// The buffer is `size * size * 4` bytes for the engine's configured
    /// tile size; the synthesizer validates the length against its own.
    fn render_tile(
        &self,
        tile_x: i64,
        tile_y: i64,
        zoom: i16,
    ) -> impl Future<Output = Result<Vec<u8>, FogError>> + Send;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Deterministic in-memory fog source for tests.
    ///
    /// Returns a fixed pixel set and a fixed-color tile buffer, and counts
    /// how often each entry point ran.
    pub struct FixtureFogSource {
        pub pixels: Vec<f32>,
        pub tile_size: u32,
        pub fail_queries: bool,
        pub fail_renders: bool,
        pub ingested: Vec<String>,
        pub render_calls: AtomicUsize,
    }

    impl FixtureFogSource {
        pub fn new(pixels: Vec<f32>, tile_size: u32) -> Self {
            Self {
                pixels,
                tile_size,
                fail_queries: false,
                fail_renders: false,
                ingested: Vec::new(),
                render_calls: AtomicUsize::new(0),
            }
        }
    }

    impl FogSource for FixtureFogSource {
        fn ingest_file(&mut self, name: &str, _data: Vec<u8>) -> Result<(), FogError> {
            if name.starts_with("bad-") {
                return Err(FogError::Ingest {
                    name: name.to_string(),
                    message: "fixture rejects bad- files".to_string(),
                });
            }
            self.ingested.push(name.to_string());
            Ok(())
        }

        fn ingest_archive(&mut self, _data: Vec<u8>) -> Result<(), FogError> {
            self.ingested.push("<archive>".to_string());
            Ok(())
        }

        fn bounding_box_pixels(
            &self,
            _south_west: MercatorPoint,
            _north_east: MercatorPoint,
        ) -> Result<Vec<f32>, FogError> {
            if self.fail_queries {
                return Err(FogError::Query("fixture query failure".to_string()));
            }
            Ok(self.pixels.clone())
        }

        async fn render_tile(&self, x: i64, y: i64, zoom: i16) -> Result<Vec<u8>, FogError> {
            self.render_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_renders {
                return Err(FogError::Render {
                    x,
                    y,
                    zoom,
                    message: "fixture render failure".to_string(),
                });
            }
            // Opaque mid-gray, stable across calls.
            let len = (self.tile_size * self.tile_size * 4) as usize;
            let mut buf = vec![0u8; len];
            for px in buf.chunks_exact_mut(4) {
                px.copy_from_slice(&[128, 128, 128, 255]);
            }
            Ok(buf)
        }
    }
}

#[cfg(test)]
pub use tests::FixtureFogSource;
