//! Coordinate types shared by the overlay and the interceptor.

/// Northernmost latitude representable in Web Mercator.
pub const MAX_LAT: f64 = 85.051_128_779_806_6;

/// Southernmost latitude representable in Web Mercator.
pub const MIN_LAT: f64 = -MAX_LAT;

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LngLat {
    /// Longitude in degrees (-180.0 to 180.0)
    pub lng: f64,
    /// Latitude in degrees
    pub lat: f64,
}

impl LngLat {
    /// Create a new coordinate.
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

/// A normalized Web Mercator point, both axes in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MercatorPoint {
    pub x: f64,
    pub y: f64,
}

/// The host map's view state for one frame.
///
/// Supplied by the host map each frame and treated as read-only input:
/// geographic bounds of the visible area plus the view-projection matrix
/// the mask pass feeds to its vertex stage (column-major, as GL expects).
#[derive(Debug, Clone, Copy)]
pub struct MapViewport {
    /// South-west corner of the visible bounds
    pub south_west: LngLat,
    /// North-east corner of the visible bounds
    pub north_east: LngLat,
    /// View-projection matrix, column-major
    pub matrix: [f32; 16],
}

impl MapViewport {
    /// Create a viewport from bounds and a view-projection matrix.
    pub fn new(south_west: LngLat, north_east: LngLat, matrix: [f32; 16]) -> Self {
        Self {
            south_west,
            north_east,
            matrix,
        }
    }
}
