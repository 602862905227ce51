//! Geographic coordinate type and great-circle distance.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  The radius queries this service
//! answers must be exact at the ±180° longitude seam and near the poles, and
//! double precision keeps the haversine error far below the metre scale that
//! matters for delivery radii.

use crate::error::{GtError, GtResult};

/// Mean Earth radius in kilometres, as used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS-84 geographic coordinate in degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Construct without a bounds check.  Use [`try_new`](Self::try_new) at
    /// trust boundaries (request decoding, persisted blobs).
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Construct a coordinate, rejecting non-finite or out-of-range values.
    pub fn try_new(lat: f64, lon: f64) -> GtResult<Self> {
        let p = Self { lat, lon };
        if p.in_bounds() {
            Ok(p)
        } else {
            Err(GtError::InvalidCoordinate { lat, lon })
        }
    }

    /// `true` if both fields are finite and within legal lat/lon ranges.
    #[inline]
    pub fn in_bounds(self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Haversine great-circle distance in kilometres.
    ///
    /// The `sin²(Δ/2)` terms are periodic in 360°, so a longitude difference
    /// of 359.8° measures the same as 0.2° — no explicit seam handling needed.
    /// The `atan2` form stays well-conditioned for antipodal points.
    pub fn distance_km(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}
