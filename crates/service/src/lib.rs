//! Service layer for the message API.
//! - `message` owns the authoritative message store.
//! - `tvseries` wraps the optional external TV series lookup.
//! - `storage` holds the JSON snapshot file used for optional durability.

pub mod errors;
pub mod message;
pub mod metrics;
pub mod storage;
pub mod tvseries;
