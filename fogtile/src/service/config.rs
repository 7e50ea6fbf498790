//! Service configuration.

use super::ServiceError;
use crate::interceptor::DataManifest;
use crate::tile::{TileStyle, DEFAULT_PATH_PREFIX};

/// Tile edge lengths the synthesizer supports.
pub const SUPPORTED_TILE_SIZES: [u32; 3] = [256, 512, 1024];

/// Configuration for the fog tile service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Square tile dimension in device pixels (256, 512 or 1024)
    pub tile_size: u32,
    /// Intercepted path prefix, e.g. `/custom-tile`
    pub path_prefix: String,
    /// Which exploration-history blobs to load at initialization
    pub manifest: DataManifest,
    /// Diagnostic border/label toggles
    pub style: TileStyle,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            tile_size: 1024,
            path_prefix: DEFAULT_PATH_PREFIX.to_string(),
            manifest: DataManifest::Files(Vec::new()),
            style: TileStyle::default(),
        }
    }
}

impl ServiceConfig {
    /// Check internal consistency before any component is built.
    pub fn validate(&self) -> Result<(), ServiceError> {
        if !SUPPORTED_TILE_SIZES.contains(&self.tile_size) {
            return Err(ServiceError::InvalidTileSize(self.tile_size));
        }
        if !self.path_prefix.starts_with('/') || self.path_prefix.ends_with('/') {
            return Err(ServiceError::InvalidPathPrefix(self.path_prefix.clone()));
        }
        Ok(())
    }
}
