use once_cell::sync::Lazy;
use prometheus::{
    register_int_counter, register_int_counter_vec, register_int_gauge, Encoder, IntCounter,
    IntCounterVec, IntGauge, TextEncoder,
};

use crate::errors::ServiceError;

// Prometheus metrics (default registry)
pub static MESSAGES_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("messages_created_total", "Total messages created")
        .expect("register messages_created_total")
});

pub static MESSAGES_UPDATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("messages_updated_total", "Total messages updated")
        .expect("register messages_updated_total")
});

pub static MESSAGES_DELETED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("messages_deleted_total", "Total messages deleted")
        .expect("register messages_deleted_total")
});

pub static MESSAGE_NOT_FOUND_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("message_not_found_total", "Total lookups for unknown message ids")
        .expect("register message_not_found_total")
});

pub static MESSAGES_STORED: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!("messages_stored", "Messages currently held by the store")
        .expect("register messages_stored")
});

pub static TVSERIES_LOOKUPS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "tvseries_lookups_total",
        "TV series lookups by outcome",
        &["outcome"]
    )
    .expect("register tvseries_lookups_total")
});

/// Render every registered metric in the Prometheus text format.
pub fn encode_metrics() -> Result<String, ServiceError> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| ServiceError::Internal(format!("metrics encode error: {e}")))?;
    String::from_utf8(buffer).map_err(|e| ServiceError::Internal(e.to_string()))
}
