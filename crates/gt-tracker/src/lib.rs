//! `gt-tracker` — the courier tracking service core.
//!
//! Composes the position slot, the proximity index, and the durable store
//! into one service object.  Construct a single [`CourierTracker`] per
//! process and pass it to request handlers by shared ownership
//! (`Arc<CourierTracker<_>>`); every method takes `&self`.
//!
//! # Crate layout
//!
//! | Module       | Contents                                            |
//! |--------------|-----------------------------------------------------|
//! | [`position`] | `PositionStore` — the single courier position slot  |
//! | [`config`]   | `TrackerConfig`, `DEFAULT_RADIUS_M`                 |
//! | [`tracker`]  | `CourierTracker` — query orchestration              |

pub mod config;
pub mod position;
pub mod tracker;


pub use config::{DEFAULT_RADIUS_M, TrackerConfig};
pub use position::PositionStore;
pub use tracker::CourierTracker;
