//! Great-circle distance and proximity helpers for WGS84 coordinates.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters, used by the haversine distance.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Tolerance in raw decimal degrees under which two coordinates count as
/// the same physical place. Roughly 7–11 m at Paris latitude.
pub const DUPLICATE_TOLERANCE_DEG: f64 = 1e-4;

/// A position in decimal degrees.
///
/// Values outside the nominal ranges (lat beyond ±90, lng beyond ±180) are
/// carried as-is: malformed upstream coordinates are present-but-unusable
/// and fall out at the distance filter, not at a validation step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

/// Great-circle distance between two coordinates in meters.
///
/// Haversine over the mean Earth radius:
/// `h = sin²(Δlat/2) + cos(lat1)·cos(lat2)·sin²(Δlng/2)`,
/// `d = R · 2·atan2(√h, √(1−h))`.
#[must_use]
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

/// Whether two coordinates differ by less than `tolerance_deg` on both axes.
///
/// The comparison is on raw degree deltas, not meters, so the effective
/// metric tolerance shrinks toward the poles. Cross-source records for the
/// same venue rarely agree beyond the fourth decimal, which is what
/// [`DUPLICATE_TOLERANCE_DEG`] encodes.
#[must_use]
pub fn is_near_duplicate(a: Coordinate, b: Coordinate, tolerance_deg: f64) -> bool {
    (a.lat - b.lat).abs() < tolerance_deg && (a.lng - b.lng).abs() < tolerance_deg
}
