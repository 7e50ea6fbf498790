//! Fogtile - Exploration fog for interactive maps
//!
//! This library renders a translucent "exploration fog" overlay on top of a
//! live map view and synthesizes fog-of-war PNG tiles for the map's
//! tile-loading pipeline, entirely from in-memory state.
//!
//! The fog-state engine itself (exploration history, pixel/tile queries) is
//! an external collaborator consumed through the [`fog::FogSource`] trait;
//! this crate never reimplements it.
//!
//! # High-Level API
//!
//! The [`service`] module provides a facade wiring the tile interceptor
//! together:
//!
//! ```ignore
//! use fogtile::service::{FogTileService, ServiceConfig};
//!
//! let service = FogTileService::new(ServiceConfig::default(), fetcher, factory)?;
//! service.install();
//! service.activate().await?;
//!
//! match service.handle_fetch("/custom-tile/5/10/20").await? {
//!     FetchOutcome::Intercepted(response) => { /* serve response.body */ }
//!     FetchOutcome::PassThrough => { /* let the platform handle it */ }
//! }
//! ```
//!
//! The overlay half lives in [`overlay`] and is driven by the host map's
//! frame loop against any [`gfx::GraphicsContext`] backend.

pub mod coord;
pub mod fog;
pub mod gfx;
pub mod interceptor;
pub mod logging;
pub mod overlay;
pub mod service;
pub mod tile;

/// Version of the fogtile library and CLI.
///
/// This is synchronized across all components in the workspace.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
