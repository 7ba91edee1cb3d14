use std::{collections::BTreeMap, path::PathBuf, sync::Arc};

use models::message::{Message, MessageInput};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, error, info};

use crate::errors::ServiceError;
use crate::metrics;
use crate::storage::json_snapshot::JsonSnapshot;

const FIRST_ID: u64 = 1;

/// On-disk form of the store. `next_id` is kept so ids stay unique across restarts
/// even after the highest ones were deleted.
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    next_id: u64,
    messages: Vec<Message>,
}

#[derive(Debug)]
struct StoreState {
    next_id: u64,
    messages: BTreeMap<u64, Message>,
}

impl Default for StoreState {
    fn default() -> Self {
        Self { next_id: FIRST_ID, messages: BTreeMap::new() }
    }
}

impl StoreState {
    fn from_snapshot(snapshot: Snapshot) -> Self {
        let messages: BTreeMap<u64, Message> =
            snapshot.messages.into_iter().map(|m| (m.id, m)).collect();
        let after_max = messages.keys().next_back().map_or(FIRST_ID, |id| id + 1);
        Self { next_id: snapshot.next_id.max(after_max).max(FIRST_ID), messages }
    }

    fn to_snapshot(&self) -> Snapshot {
        Snapshot { next_id: self.next_id, messages: self.messages.values().cloned().collect() }
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// In-process message store.
///
/// Records and the id counter share one `RwLock`: reads run concurrently,
/// every mutation (and therefore every id assignment) is serialized. When a
/// snapshot file is configured, the new state is written before the write
/// lock is released; a failed write rolls the mutation back.
pub struct MessageStore {
    state: RwLock<StoreState>,
    snapshot: Option<JsonSnapshot>,
}

impl MessageStore {
    /// Empty store without durability.
    pub fn in_memory() -> Arc<Self> {
        Arc::new(Self { state: RwLock::new(StoreState::default()), snapshot: None })
    }

    /// Store mirrored to a JSON snapshot file; loads it when present, creates it otherwise.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let snapshot = JsonSnapshot::new(path);
        let state = match snapshot.load::<Snapshot>().await? {
            Some(s) => StoreState::from_snapshot(s),
            None => {
                let empty = StoreState::default();
                snapshot.save(&empty.to_snapshot()).await?;
                empty
            }
        };
        info!(
            path = %snapshot.path().display(),
            count = state.messages.len(),
            next_id = state.next_id,
            "message store opened"
        );
        Ok(Arc::new(Self { state: RwLock::new(state), snapshot: Some(snapshot) }))
    }

    /// `open` when a data file is given, `in_memory` otherwise.
    pub async fn from_data_file(data_file: Option<&str>) -> Result<Arc<Self>, ServiceError> {
        match data_file {
            Some(path) => Self::open(path).await,
            None => Ok(Self::in_memory()),
        }
    }

    async fn persist(&self, state: &StoreState) -> Result<(), ServiceError> {
        let Some(snapshot) = &self.snapshot else { return Ok(()) };
        snapshot.save(&state.to_snapshot()).await.map_err(|e| {
            error!(error = %e, path = %snapshot.path().display(), "message snapshot write failed");
            e
        })
    }

    /// All messages in ascending id order.
    pub async fn list(&self) -> Vec<Message> {
        let state = self.state.read().await;
        state.messages.values().cloned().collect()
    }

    pub async fn get(&self, id: u64) -> Result<Message, ServiceError> {
        let state = self.state.read().await;
        state.messages.get(&id).cloned().ok_or_else(|| not_found(id))
    }

    pub async fn create(&self, input: MessageInput) -> Result<Message, ServiceError> {
        let mut state = self.state.write().await;
        let id = state.allocate_id();
        let message = Message { id, text: input.text };
        state.messages.insert(id, message.clone());
        if let Err(e) = self.persist(&state).await {
            // 回滚；id 已消耗，不再复用
            state.messages.remove(&id);
            return Err(e);
        }
        metrics::MESSAGES_CREATED_TOTAL.inc();
        metrics::MESSAGES_STORED.set(state.messages.len() as i64);
        info!(id, "message created");
        Ok(message)
    }

    /// Replace only the text of an existing message.
    pub async fn update(&self, id: u64, input: MessageInput) -> Result<Message, ServiceError> {
        let mut state = self.state.write().await;
        let existing = state.messages.get_mut(&id).ok_or_else(|| not_found(id))?;
        let previous = std::mem::replace(&mut existing.text, input.text);
        let updated = existing.clone();
        if let Err(e) = self.persist(&state).await {
            if let Some(m) = state.messages.get_mut(&id) {
                m.text = previous;
            }
            return Err(e);
        }
        metrics::MESSAGES_UPDATED_TOTAL.inc();
        info!(id, "message updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: u64) -> Result<(), ServiceError> {
        let mut state = self.state.write().await;
        let removed = state.messages.remove(&id).ok_or_else(|| not_found(id))?;
        if let Err(e) = self.persist(&state).await {
            state.messages.insert(id, removed);
            return Err(e);
        }
        metrics::MESSAGES_DELETED_TOTAL.inc();
        metrics::MESSAGES_STORED.set(state.messages.len() as i64);
        info!(id, "message deleted");
        Ok(())
    }

    /// Number of messages currently stored.
    pub async fn count(&self) -> usize {
        self.state.read().await.messages.len()
    }
}

fn not_found(id: u64) -> ServiceError {
    metrics::MESSAGE_NOT_FOUND_TOTAL.inc();
    debug!(id, "message not found");
    ServiceError::not_found("Message")
}
