//! Service facade.
//!
//! Wires the tile interceptor together from configuration: loader,
//! synthesizer, and worker context behind one object with the worker's
//! lifecycle surface. The overlay half is constructed separately by the
//! host's render context (see [`crate::overlay`]).

mod config;
mod error;
mod facade;

pub use config::{ServiceConfig, SUPPORTED_TILE_SIZES};
pub use error::ServiceError;
pub use facade::FogTileService;
