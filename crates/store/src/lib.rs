//! Teller Store - JSON snapshot persistence
//!
//! The account registry is saved and loaded as one JSON document.
//! Load failures degrade (missing file = empty bank, corrupt file = warn
//! and start empty); save failures surface to the caller.

pub mod error;
pub mod snapshot;

pub use error::StoreError;
pub use snapshot::SnapshotStore;
