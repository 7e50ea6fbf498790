//! Tile request routing and synthesis.
//!
//! The interceptor matches tile paths of the form
//! `/custom-tile/{zoom}/{tileX}/{tileY}` (an optional query string is
//! ignored), asks the fog engine for a raw pixel buffer, and encodes the
//! result as a PNG response. Non-matching paths are never touched, so a
//! failure in this module can never affect unrelated traffic.

mod error;
mod label;
mod request;
mod synth;

pub use error::TileError;
pub use request::{route, TileRequest, DEFAULT_PATH_PREFIX};
pub use synth::{TileStyle, TileSynthesizer};

use bytes::Bytes;

/// Content type of every synthesized tile body.
pub const PNG_CONTENT_TYPE: &str = "image/png";

/// A synthesized tile image, ready to hand to the host's response
/// mechanism. Transient: one per intercepted request, never cached here.
#[derive(Debug, Clone)]
pub struct TileResponse {
    /// PNG-encoded image payload
    pub body: Bytes,
    /// Always [`PNG_CONTENT_TYPE`]
    pub content_type: &'static str,
}
