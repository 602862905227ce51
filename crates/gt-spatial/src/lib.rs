//! `gt-spatial` — task snapshots and radius queries for the geotrack service.
//!
//! # Crate layout
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`snapshot`] | `TaskSnapshot` (immutable, R-tree indexed)             |
//! | [`index`]    | `ProximityIndex` (atomic snapshot swap)                |
//!
//! # Design
//!
//! The task set is never mutated in place.  A refresh builds a complete
//! [`TaskSnapshot`] and publishes it with a single `Arc` handle swap; readers
//! clone the handle and query lock-free.  A concurrent query therefore sees
//! either the fully-old or fully-new task set, never a mix.

pub mod index;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use index::ProximityIndex;
pub use snapshot::TaskSnapshot;
