//! Message store: the single authoritative owner of `Message` records.

pub mod store;

pub use store::MessageStore;
