//! Storage helpers for the service layer.
//!
//! The message store keeps its state in memory; `json_snapshot` lets it
//! mirror that state to a JSON file when durability is configured.

pub mod json_snapshot;
