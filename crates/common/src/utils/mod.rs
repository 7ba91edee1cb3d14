//! Shared utilities for binaries and service crates.

pub mod logging;
