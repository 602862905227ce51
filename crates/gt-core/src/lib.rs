//! `gt-core` — foundational types for the geotrack courier service.
//!
//! This crate is a dependency of every other `gt-*` crate.  It intentionally
//! has no `gt-*` dependencies and minimal external ones (only `chrono` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                           |
//! |-----------|----------------------------------------------------|
//! | [`geo`]   | `GeoPoint`, haversine distance                     |
//! | [`ids`]   | `TaskId`                                           |
//! | [`task`]  | `Task`, `TaskRecord` (raw persisted form)          |
//! | [`error`] | `GtError`, `GtResult`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                               |
//! |---------|------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.  |
//!           | Required by `gt-store`.                              |

pub mod error;
pub mod geo;
pub mod ids;
pub mod task;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{GtError, GtResult};
pub use geo::{EARTH_RADIUS_KM, GeoPoint};
pub use ids::TaskId;
pub use task::{Task, TaskRecord};
