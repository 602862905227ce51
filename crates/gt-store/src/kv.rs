//! The `KeyValueStore` trait and the fixed persisted-layout keys.

use crate::error::StoreResult;

/// Key holding the serialized courier position.
pub const POSITION_KEY: &str = "courier";

/// Key holding the serialized task set, refreshed wholesale.
pub const TASK_SET_KEY: &str = "tasks";

/// Set/get-by-key persistence, reachable over the network in production.
///
/// Implementations may block; callers must not invoke these methods while
/// holding a lock.  The core never retries — a failed call surfaces as
/// [`StoreError::Unavailable`](crate::StoreError::Unavailable) and retry
/// policy belongs to the transport layer.
pub trait KeyValueStore: Send + Sync {
    /// Replace the value under `key`.
    fn set(&self, key: &str, value: &[u8]) -> StoreResult<()>;

    /// Fetch the value under `key`, or `None` if the key has never been set.
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;
}
