//! JSON codec for the persisted layout.
//!
//! Position: one `GeoPoint` object.  Task set: one JSON array of flat
//! [`TaskRecord`] objects.  Decoding the task set is element-tolerant: each
//! array element is decoded on its own, and elements that fail are counted
//! rather than failing the load — a corrupted record degrades the snapshot,
//! it does not take the service down.

use gt_core::{GeoPoint, Task, TaskRecord};

use crate::error::StoreResult;

/// Encode the courier position.
pub fn encode_position(pos: &GeoPoint) -> StoreResult<Vec<u8>> {
    Ok(serde_json::to_vec(pos)?)
}

/// Decode a persisted courier position.
///
/// Callers treat a `Codec` error here as "corrupt value": for position reads
/// that maps to `NoPositionSet`, not a hard failure.
pub fn decode_position(bytes: &[u8]) -> StoreResult<GeoPoint> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Encode a task set as an array of flat records.
pub fn encode_tasks(tasks: &[Task]) -> StoreResult<Vec<u8>> {
    let records: Vec<TaskRecord> = tasks.iter().map(TaskRecord::from).collect();
    Ok(serde_json::to_vec(&records)?)
}

/// Decode a persisted task set element-wise.
///
/// Returns the records that decoded cleanly and the count of elements that
/// did not.  Range validation of coordinate values happens later, at
/// snapshot construction — this layer only deals in JSON shape.
///
/// # Errors
///
/// A blob that is not a JSON array at all is beyond per-record recovery and
/// surfaces as a `Codec` error.
pub fn decode_task_records(bytes: &[u8]) -> StoreResult<(Vec<TaskRecord>, usize)> {
    let elements: Vec<serde_json::Value> = serde_json::from_slice(bytes)?;

    let mut skipped = 0usize;
    let records = elements
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<TaskRecord>(value) {
            Ok(record) => Some(record),
            Err(_) => {
                skipped += 1;
                None
            }
        })
        .collect();
    Ok((records, skipped))
}
