//! Tracker configuration.

use gt_core::{GtError, GtResult};

/// Default search radius for status queries, in metres.
pub const DEFAULT_RADIUS_M: f64 = 2500.0;

/// Configuration for [`CourierTracker`](crate::CourierTracker).
///
/// The query API works in kilometres throughout; metres appear only here,
/// converted once at this boundary.  Callers feeding the tracker from a
/// transport layer must normalize their units to one of the two before
/// invoking the core.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Radius used by
    /// [`nearby_tasks_default`](crate::CourierTracker::nearby_tasks_default),
    /// in metres.
    pub default_radius_m: f64,
}

impl TrackerConfig {
    /// Reject a non-positive or non-finite default radius.
    pub fn validate(&self) -> GtResult<()> {
        let km = self.default_radius_km();
        if !km.is_finite() || km <= 0.0 {
            return Err(GtError::InvalidRadius(km));
        }
        Ok(())
    }

    /// The default radius in the unit the query API takes.
    #[inline]
    pub fn default_radius_km(&self) -> f64 {
        self.default_radius_m / 1000.0
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self { default_radius_m: DEFAULT_RADIUS_M }
    }
}
