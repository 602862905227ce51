//! Strongly typed task identifier.

use std::fmt;

/// Caller-assigned unique identifier of a task.
///
/// `Copy + Ord + Hash` so it can be used as a map key and sorted collection
/// element without ceremony.  The inner integer is `pub` for direct access;
/// uniqueness within a snapshot is enforced at snapshot construction, not
/// here.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TaskId {
    #[inline(always)]
    fn from(id: u64) -> Self {
        TaskId(id)
    }
}
