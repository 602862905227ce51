//! Immutable task snapshots with an R-tree spatial index.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `[lat, lon]` to an index into the snapshot's
//! task vector.  A radius query walks the tree with one or two bounding
//! envelopes (two when the longitude window crosses the ±180° seam) and runs
//! an exact haversine check on every candidate, so the envelope math only
//! prunes — it never decides membership.

use std::f64::consts::FRAC_PI_2;

use rstar::{AABB, RTree, RTreeObject};
use rustc_hash::FxHashSet;

use gt_core::{EARTH_RADIUS_KM, GeoPoint, GtError, GtResult, Task, TaskRecord};

// ── R-tree task entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a 2-D `[lat, lon]` point with the index of the
/// task in `TaskSnapshot::tasks`.
#[derive(Clone, Debug)]
struct TaskEntry {
    point: [f64; 2], // [lat, lon]
    idx: usize,
}

impl RTreeObject for TaskEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

// ── TaskSnapshot ──────────────────────────────────────────────────────────────

/// An immutable, fully-formed copy of the task set, valid until the next
/// refresh replaces it.
///
/// Task ids are unique within a snapshot.  Construct with [`build`] for
/// trusted batches (whole-batch rejection) or [`from_records`] for persisted
/// blobs (per-record skip).
///
/// [`build`]: Self::build
/// [`from_records`]: Self::from_records
#[derive(Debug)]
pub struct TaskSnapshot {
    tasks: Vec<Task>,
    /// Records dropped on the tolerant path (malformed or duplicate).
    skipped: usize,
    rtree: RTree<TaskEntry>,
}

impl TaskSnapshot {
    /// A snapshot with no tasks — the state before the first refresh.
    pub fn empty() -> Self {
        Self::index(Vec::new(), 0)
    }

    /// Build a snapshot from a trusted batch, rejecting the whole batch on
    /// the first out-of-range coordinate or duplicate id.
    ///
    /// # Errors
    ///
    /// Returns [`GtError::MalformedTask`] naming the offending task.  No
    /// partial snapshot is produced.
    pub fn build(tasks: Vec<Task>) -> GtResult<Self> {
        let mut seen = FxHashSet::with_capacity_and_hasher(tasks.len(), Default::default());
        for task in &tasks {
            if !task.location.in_bounds() {
                return Err(GtError::MalformedTask {
                    id: task.id,
                    reason: "coordinate out of range",
                });
            }
            if !seen.insert(task.id) {
                return Err(GtError::MalformedTask {
                    id: task.id,
                    reason: "duplicate id in batch",
                });
            }
        }
        Ok(Self::index(tasks, 0))
    }

    /// Build a snapshot from raw persisted records, skipping records that do
    /// not promote to a valid [`Task`] (and later duplicates of an id).
    ///
    /// The skip count is retained on the snapshot — see [`skipped`].  A
    /// corrupted blob degrades the result set, it never fails the load.
    ///
    /// [`skipped`]: Self::skipped
    pub fn from_records(records: Vec<TaskRecord>) -> Self {
        let mut skipped = 0usize;
        let mut seen = FxHashSet::default();
        let tasks: Vec<Task> = records
            .into_iter()
            .filter_map(|record| match record.into_task() {
                Some(task) if seen.insert(task.id) => Some(task),
                _ => {
                    skipped += 1;
                    None
                }
            })
            .collect();
        Self::index(tasks, skipped)
    }

    fn index(tasks: Vec<Task>, skipped: usize) -> Self {
        // Bulk load for O(N log N) construction (faster than N inserts).
        let entries: Vec<TaskEntry> = tasks
            .iter()
            .enumerate()
            .map(|(i, t)| TaskEntry {
                point: [t.location.lat, t.location.lon],
                idx: i,
            })
            .collect();
        Self {
            rtree: RTree::bulk_load(entries),
            tasks,
            skipped,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of records dropped when this snapshot was built from a
    /// persisted blob.  Always 0 for strictly-built snapshots.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// All tasks in the snapshot, in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    // ── Radius query ──────────────────────────────────────────────────────

    /// Every task whose great-circle distance from `center` is ≤ `radius_km`.
    ///
    /// Result order is unspecified.
    ///
    /// # Errors
    ///
    /// [`GtError::InvalidRadius`] unless `radius_km` is finite and positive;
    /// [`GtError::InvalidCoordinate`] if `center` is out of bounds.
    pub fn query_radius(&self, center: GeoPoint, radius_km: f64) -> GtResult<Vec<Task>> {
        if !radius_km.is_finite() || radius_km <= 0.0 {
            return Err(GtError::InvalidRadius(radius_km));
        }
        if !center.in_bounds() {
            return Err(GtError::InvalidCoordinate {
                lat: center.lat,
                lon: center.lon,
            });
        }

        let mut hits = Vec::new();
        for envelope in search_envelopes(center, radius_km) {
            for entry in self.rtree.locate_in_envelope_intersecting(&envelope) {
                let task = &self.tasks[entry.idx];
                if center.distance_km(task.location) <= radius_km {
                    hits.push(task.clone());
                }
            }
        }
        Ok(hits)
    }
}

// ── Envelope math ─────────────────────────────────────────────────────────────

/// Bounding envelopes of the circle of `radius_km` around `center`.
///
/// One envelope in the common case; two disjoint ones when the longitude
/// window crosses the ±180° seam.  The longitude half-width uses the exact
/// bounding-box formula Δλ = asin(sin r / cos φ); when the circle reaches a
/// pole (or r ≥ a quarter circumference) the window degenerates to the full
/// longitude range.  Envelopes may over-cover but never exclude a point
/// within the radius.
fn search_envelopes(center: GeoPoint, radius_km: f64) -> Vec<AABB<[f64; 2]>> {
    // Angular radius in radians, inflated by 1 ppb so degree/radian rounding
    // cannot exclude an exactly-on-ring point.  The exact check prunes the
    // over-coverage.
    let ang = (radius_km / EARTH_RADIUS_KM) * (1.0 + 1e-9);
    let d_lat = ang.to_degrees();
    let lat_min = (center.lat - d_lat).max(-90.0);
    let lat_max = (center.lat + d_lat).min(90.0);

    // cos φ ~ 0 at the poles makes the ratio blow up past 1, which is the
    // pole-inside-circle case — same degenerate window.
    let ratio = ang.sin() / center.lat.to_radians().cos();
    if ang >= FRAC_PI_2 || ratio >= 1.0 {
        return vec![AABB::from_corners([lat_min, -180.0], [lat_max, 180.0])];
    }

    let d_lon = ratio.asin().to_degrees();
    let lon_min = center.lon - d_lon;
    let lon_max = center.lon + d_lon;

    // Inclusive comparisons: ±180° name the same meridian, so a window that
    // ends exactly on the seam must still cover points stored with the
    // opposite sign.
    if lon_min <= -180.0 {
        vec![
            AABB::from_corners([lat_min, lon_min + 360.0], [lat_max, 180.0]),
            AABB::from_corners([lat_min, -180.0], [lat_max, lon_max]),
        ]
    } else if lon_max >= 180.0 {
        vec![
            AABB::from_corners([lat_min, lon_min], [lat_max, 180.0]),
            AABB::from_corners([lat_min, -180.0], [lat_max, lon_max - 360.0]),
        ]
    } else {
        vec![AABB::from_corners([lat_min, lon_min], [lat_max, lon_max])]
    }
}
