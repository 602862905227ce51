//! The `CourierTracker`: position slot + proximity index + durable store.

use std::sync::Arc;

use tracing::{debug, info, warn};

use gt_core::{GeoPoint, GtResult, Task};
use gt_spatial::{ProximityIndex, TaskSnapshot};
use gt_store::{KeyValueStore, TASK_SET_KEY, codec};

use crate::config::TrackerConfig;
use crate::position::PositionStore;

/// The service core: tracks one courier and answers "which tasks are within
/// radius R of them".
///
/// The position slot and the proximity index are independent components; the
/// only cross-component call is [`nearby_tasks`](Self::nearby_tasks), which
/// reads the position and hands it to the index as the query center.
pub struct CourierTracker<S: KeyValueStore> {
    config: TrackerConfig,
    position: PositionStore<S>,
    index: ProximityIndex,
    store: Arc<S>,
}

impl<S: KeyValueStore> CourierTracker<S> {
    /// Create a tracker over `store`.  The task set starts empty and the
    /// position unset; call [`hydrate`](Self::hydrate) to pick up persisted
    /// state from a previous process.
    pub fn new(store: Arc<S>, config: TrackerConfig) -> GtResult<Self> {
        config.validate()?;
        Ok(Self {
            position: PositionStore::new(Arc::clone(&store)),
            index: ProximityIndex::new(),
            store,
            config,
        })
    }

    // ── Position ──────────────────────────────────────────────────────────

    /// Update the courier position.  See [`PositionStore::set`].
    pub fn set_position(&self, pos: GeoPoint) -> GtResult<()> {
        self.position.set(pos)?;
        debug!(%pos, "courier position updated");
        Ok(())
    }

    /// The current courier position.  See [`PositionStore::get`].
    pub fn position(&self) -> GtResult<GeoPoint> {
        self.position.get()
    }

    // ── Task set ──────────────────────────────────────────────────────────

    /// Replace the entire task set: strict snapshot build, persist, publish.
    ///
    /// Any failure — a malformed batch or an unreachable store — leaves the
    /// previous snapshot fully visible to concurrent queries.
    pub fn refresh_tasks(&self, tasks: Vec<Task>) -> GtResult<()> {
        let snapshot = TaskSnapshot::build(tasks)?;
        let bytes = codec::encode_tasks(snapshot.tasks())?;
        self.store.set(TASK_SET_KEY, &bytes)?;

        let count = snapshot.len();
        self.index.install(snapshot);
        info!(count, "task set refreshed");
        Ok(())
    }

    /// Load the persisted task set into the index.
    ///
    /// This is the tolerant path: records that fail to decode or validate
    /// are skipped and counted, never failing the load.  Returns the number
    /// of tasks loaded; a store with no persisted set loads nothing.
    pub fn hydrate(&self) -> GtResult<usize> {
        let Some(bytes) = self.store.get(TASK_SET_KEY)? else {
            debug!("no persisted task set");
            return Ok(0);
        };
        let (records, undecodable) = codec::decode_task_records(&bytes)?;
        let snapshot = TaskSnapshot::from_records(records);

        let skipped = undecodable + snapshot.skipped();
        if skipped > 0 {
            warn!(skipped, "skipped malformed persisted task records");
        }

        let loaded = snapshot.len();
        self.index.install(snapshot);
        info!(loaded, "hydrated task set from store");
        Ok(loaded)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Every task within `radius_km` of the current courier position.
    ///
    /// Propagates [`NoPositionSet`](gt_core::GtError::NoPositionSet) from the
    /// position read and any validation error from the index.
    pub fn nearby_tasks(&self, radius_km: f64) -> GtResult<Vec<Task>> {
        let center = self.position.get()?;
        let hits = self.index.query_radius(center, radius_km)?;
        debug!(radius_km, hits = hits.len(), "radius query");
        Ok(hits)
    }

    /// [`nearby_tasks`](Self::nearby_tasks) with the configured default
    /// radius.
    pub fn nearby_tasks_default(&self) -> GtResult<Vec<Task>> {
        self.nearby_tasks(self.config.default_radius_km())
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// The underlying proximity index (e.g. for long-lived snapshot handles).
    pub fn index(&self) -> &ProximityIndex {
        &self.index
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }
}
