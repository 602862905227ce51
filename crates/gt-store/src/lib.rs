//! `gt-store` — durable persistence for the geotrack service.
//!
//! The service persists two values in a key-value store reachable over the
//! network: the courier's last position and the full task set, each under a
//! fixed key, each replaced wholesale.  This crate fixes that contract and
//! layout; the production store behind it is an external collaborator.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`kv`]     | `KeyValueStore` trait, fixed key constants                |
//! | [`memory`] | `MemoryStore` — in-process reference implementation       |
//! | [`codec`]  | JSON encode/decode for the persisted layout               |
//! | [`error`]  | `StoreError`, `StoreResult<T>`                            |

pub mod codec;
pub mod error;
pub mod kv;
pub mod memory;

#[cfg(test)]
mod tests;

pub use error::{StoreError, StoreResult};
pub use kv::{KeyValueStore, POSITION_KEY, TASK_SET_KEY};
pub use memory::MemoryStore;
