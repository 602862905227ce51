//! Task records: the trusted in-memory form and the raw persisted form.

use chrono::{DateTime, Utc};

use crate::geo::GeoPoint;
use crate::ids::TaskId;

/// A geotagged delivery task.
///
/// Immutable once inserted into a snapshot — the task set is refreshed by
/// wholesale replacement, never by in-place mutation.  Untrusted input enters
/// through [`TaskRecord`]; snapshot construction re-validates the coordinate
/// at the refresh boundary.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Task {
    pub id: TaskId,

    /// Pickup/delivery location.  In bounds by construction.
    pub location: GeoPoint,

    /// Base value of the order.
    pub price: f64,

    /// Fee paid for the delivery itself.
    pub delivery_price: f64,

    /// `true` once the task has been completed.  Carried as data; the index
    /// does not filter on it.
    pub delivered: bool,

    pub created_at: DateTime<Utc>,
}

impl Task {
    /// `true` if the task has not been delivered yet.
    #[inline]
    pub fn is_pending(&self) -> bool {
        !self.delivered
    }
}

// ── TaskRecord ────────────────────────────────────────────────────────────────

/// The raw, flat form a task takes in the persisted blob.
///
/// Field values are untrusted: a corrupted blob can carry out-of-range or
/// non-finite coordinates.  Promotion to [`Task`] via
/// [`into_task`](Self::into_task) is fallible; callers on the tolerant load
/// path consume the `Option` with a filter step and count the `None`s.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaskRecord {
    pub id: u64,
    pub lat: f64,
    pub lon: f64,
    pub price: f64,
    pub delivery_price: f64,
    pub delivered: bool,
    pub created_at: DateTime<Utc>,
}

impl TaskRecord {
    /// Promote to a trusted [`Task`], or `None` if the coordinate is not a
    /// finite in-range lat/lon pair.
    pub fn into_task(self) -> Option<Task> {
        let location = GeoPoint::try_new(self.lat, self.lon).ok()?;
        Some(Task {
            id: TaskId(self.id),
            location,
            price: self.price,
            delivery_price: self.delivery_price,
            delivered: self.delivered,
            created_at: self.created_at,
        })
    }
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.0,
            lat: task.location.lat,
            lon: task.location.lon,
            price: task.price,
            delivery_price: task.delivery_price,
            delivered: task.delivered,
            created_at: task.created_at,
        }
    }
}
