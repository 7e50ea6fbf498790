//! Service error types.

use crate::interceptor::{InitError, WorkerError};
use thiserror::Error;

/// Errors surfaced by the service facade.
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    /// Tile size is not one of the supported dimensions
    #[error("invalid tile size {0}: must be 256, 512 or 1024")]
    InvalidTileSize(u32),

    /// Path prefix is not rooted or carries a trailing slash
    #[error("invalid path prefix {0:?}: must start with '/' and not end with '/'")]
    InvalidPathPrefix(String),

    /// Fog initialization failed
    #[error(transparent)]
    Init(#[from] InitError),

    /// The worker refused or failed an event
    #[error(transparent)]
    Worker(#[from] WorkerError),
}
