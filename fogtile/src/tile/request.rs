//! Tile request parsing.

use std::fmt;

/// Default path prefix intercepted by the worker.
pub const DEFAULT_PATH_PREFIX: &str = "/custom-tile";

/// One intercepted tile request: slippy-map indices plus zoom.
///
/// Indices are `i64` for the same reason the coordinate bridge returns
/// them: 32-bit indices overflow at high zoom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileRequest {
    /// Zoom level
    pub zoom: i16,
    /// Tile X index (column)
    pub x: i64,
    /// Tile Y index (row)
    pub y: i64,
}

impl TileRequest {
    /// Create a request from explicit indices.
    pub fn new(zoom: i16, x: i64, y: i64) -> Self {
        Self { zoom, x, y }
    }
}

impl fmt::Display for TileRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.x, self.y)
    }
}

/// Match a request path against the tile pattern.
///
/// Returns the parsed request for `{prefix}/{zoom}/{x}/{y}`, with any
/// query string ignored. Everything else - wrong prefix, missing or
/// extra segments, malformed numbers - returns `None` and must pass
/// through to the platform's default handling.
///
/// Synchronous and side-effect-free: this is the routing decision, not
/// the interception itself.
pub fn route(path: &str, prefix: &str) -> Option<TileRequest> {
    let rest = path.strip_prefix(prefix)?.strip_prefix('/')?;
    let rest = rest.split('?').next().unwrap_or(rest);

    let mut segments = rest.split('/');
    let zoom = segments.next()?.parse().ok()?;
    let x = segments.next()?.parse().ok()?;
    let y = segments.next()?.parse().ok()?;
    if segments.next().is_some() {
        return None;
    }
    Some(TileRequest { zoom, x, y })
}
