//! The concurrent proximity index: one atomically swapped snapshot handle.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use gt_core::{GeoPoint, GtResult, Task};

use crate::snapshot::TaskSnapshot;

/// Shared-state proximity index over the current [`TaskSnapshot`].
///
/// All methods take `&self`; construct one per process and hand it to request
/// handlers by shared ownership (`Arc<ProximityIndex>`).  The lock guards
/// nothing but an `Arc` handle, so a refresh blocks readers only for the
/// duration of one pointer swap, and queries run against their own handle
/// clone without holding the lock at all.
pub struct ProximityIndex {
    snapshot: RwLock<Arc<TaskSnapshot>>,
}

impl ProximityIndex {
    /// An index holding an empty snapshot.  Queries return no tasks (not an
    /// error) until the first refresh.
    pub fn new() -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(TaskSnapshot::empty())),
        }
    }

    /// Replace the entire task set.
    ///
    /// The new snapshot is built before the lock is taken; on any
    /// [`MalformedTask`](gt_core::GtError::MalformedTask) rejection the
    /// previous snapshot stays fully visible — there is no partial refresh.
    pub fn refresh(&self, tasks: Vec<Task>) -> GtResult<()> {
        let snap = Arc::new(TaskSnapshot::build(tasks)?);
        *self.write() = snap;
        Ok(())
    }

    /// Publish an already-built snapshot (the tolerant hydration path).
    pub fn install(&self, snapshot: TaskSnapshot) {
        *self.write() = Arc::new(snapshot);
    }

    /// Handle to the current snapshot.
    ///
    /// Queries against the returned `Arc` are unaffected by concurrent
    /// refreshes: they see this snapshot until they drop it.
    pub fn snapshot(&self) -> Arc<TaskSnapshot> {
        self.read().clone()
    }

    /// Radius query against the current snapshot.  See
    /// [`TaskSnapshot::query_radius`] for the contract.
    pub fn query_radius(&self, center: GeoPoint, radius_km: f64) -> GtResult<Vec<Task>> {
        self.snapshot().query_radius(center, radius_km)
    }

    // The lock guards a handle swap only; a poisoned lock still holds a
    // fully-formed snapshot, so recover the guard rather than propagating
    // the panic.
    fn read(&self) -> RwLockReadGuard<'_, Arc<TaskSnapshot>> {
        self.snapshot.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Arc<TaskSnapshot>> {
        self.snapshot.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ProximityIndex {
    fn default() -> Self {
        Self::new()
    }
}
