//! The courier position slot, backed by the durable store.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::warn;

use gt_core::{GeoPoint, GtError, GtResult};
use gt_store::{KeyValueStore, POSITION_KEY, codec};

/// The single mutable position slot: last-write-wins, never cleared during
/// process lifetime.
///
/// Two states — unset, then set forever after the first successful update.
/// The in-process slot is the source of truth once warm; on a cold slot
/// (fresh process) reads fall back to the persisted value.
pub struct PositionStore<S: KeyValueStore> {
    slot: RwLock<Option<GeoPoint>>,
    store: Arc<S>,
}

impl<S: KeyValueStore> PositionStore<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            slot: RwLock::new(None),
            store,
        }
    }

    /// Validate, persist, then publish.
    ///
    /// Persist-before-publish keeps the update complete-or-fail: a store
    /// failure surfaces as [`GtError::StoreUnavailable`] and leaves the slot
    /// (and any concurrent reader) on the previous position.
    pub fn set(&self, pos: GeoPoint) -> GtResult<()> {
        if !pos.in_bounds() {
            return Err(GtError::InvalidCoordinate {
                lat: pos.lat,
                lon: pos.lon,
            });
        }
        let bytes = codec::encode_position(&pos)?;
        self.store.set(POSITION_KEY, &bytes)?;
        *self.write_slot() = Some(pos);
        Ok(())
    }

    /// The most recently set position.
    ///
    /// # Errors
    ///
    /// [`GtError::NoPositionSet`] if no update has ever occurred, including
    /// the case where the persisted value is missing or corrupt;
    /// [`GtError::StoreUnavailable`] if the cold-slot fallback cannot reach
    /// the store.
    pub fn get(&self) -> GtResult<GeoPoint> {
        if let Some(pos) = *self.read_slot() {
            return Ok(pos);
        }

        // Cold slot: fall back to the persisted value.  The store call runs
        // without holding the lock.
        let Some(bytes) = self.store.get(POSITION_KEY)? else {
            return Err(GtError::NoPositionSet);
        };
        let pos = match codec::decode_position(&bytes) {
            Ok(p) if p.in_bounds() => p,
            _ => {
                warn!("persisted courier position is corrupt; treating as unset");
                return Err(GtError::NoPositionSet);
            }
        };

        // A concurrent set() may have raced the store read; the slot wins
        // over the persisted fallback.
        let mut slot = self.write_slot();
        Ok(*slot.get_or_insert(pos))
    }

    // The lock guards a copy of one coordinate; a poisoned lock cannot hold
    // a torn value, so recover the guard rather than propagating the panic.
    fn read_slot(&self) -> RwLockReadGuard<'_, Option<GeoPoint>> {
        self.slot.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_slot(&self) -> RwLockWriteGuard<'_, Option<GeoPoint>> {
        self.slot.write().unwrap_or_else(PoisonError::into_inner)
    }
}
