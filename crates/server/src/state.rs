use std::sync::Arc;

use service::{message::MessageStore, tvseries::TvSeriesLookup};

/// Handles shared by every request handler; built once at startup.
#[derive(Clone)]
pub struct ServerState {
    pub messages: Arc<MessageStore>,
    pub tvseries: Arc<TvSeriesLookup>,
}

impl ServerState {
    pub fn new(messages: Arc<MessageStore>, tvseries: TvSeriesLookup) -> Self {
        Self { messages, tvseries: Arc::new(tvseries) }
    }
}
