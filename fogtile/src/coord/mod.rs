//! Coordinate conversion module
//!
//! Provides the pure conversions consumed by the overlay renderer and the
//! tile interceptor: geographic coordinates (longitude/latitude) to Web
//! Mercator tile indices, and viewport corners to the normalized mercator
//! space the fog engine's bounding-box query expects.
//!
//! All functions here are stateless; tile indices are returned as `i64`
//! because high zoom levels overflow 32-bit indices.

mod types;

pub use types::{LngLat, MapViewport, MercatorPoint, MAX_LAT, MIN_LAT};

use std::f64::consts::PI;

/// Converts a longitude to a slippy-map tile X index at the given zoom.
///
/// # Arguments
///
/// * `lng` - Longitude in degrees (-180.0 to 180.0)
/// * `zoom` - Zoom level
#[inline]
pub fn lng_to_tile_x(lng: f64, zoom: i16) -> i64 {
    let mul = (1i64 << zoom) as f64;
    ((lng + 180.0) / 360.0 * mul) as i64
}

/// Converts a latitude to a slippy-map tile Y index at the given zoom.
///
/// Latitudes beyond the mercator clamp ([`MAX_LAT`]/[`MIN_LAT`]) project
/// outside the tile grid; callers holding raw GPS input should clamp first.
///
/// # Arguments
///
/// * `lat` - Latitude in degrees
/// * `zoom` - Zoom level
#[inline]
pub fn lat_to_tile_y(lat: f64, zoom: i16) -> i64 {
    let mul = (1i64 << zoom) as f64;
    ((PI - (lat * PI / 180.0).tan().asinh()) * mul / (2.0 * PI)) as i64
}

/// Converts a geographic coordinate to a normalized Web Mercator point.
///
/// Both axes land in `[0, 1]` across the projected world: `x` grows east
/// from the antimeridian, `y` grows south from the north mercator clamp.
/// This is the coordinate space the fog engine's bounding-box query takes.
#[inline]
pub fn lng_lat_to_mercator(pos: LngLat) -> MercatorPoint {
    let x = (180.0 + pos.lng) / 360.0;
    let y = (180.0 - (180.0 / PI) * (PI / 4.0 + pos.lat * PI / 360.0).tan().ln()) / 360.0;
    MercatorPoint { x, y }
}
