use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::EventStore;
use crate::error::Result;
use crate::models::EngagementEvent;

#[derive(Debug, Default)]
struct MemoryState {
    committed: HashMap<Uuid, EngagementEvent>,
    staged: Vec<EngagementEvent>,
}

/// Process-local store for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryEventStore {
    state: Mutex<MemoryState>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of writes waiting for commit.
    pub async fn staged_len(&self) -> usize {
        self.state.lock().await.staged.len()
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn add(&self, event: EngagementEvent) -> Result<()> {
        self.state.lock().await.staged.push(event);
        Ok(())
    }

    async fn commit(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        let staged = std::mem::take(&mut state.staged);
        for event in staged {
            state.committed.insert(event.id, event);
        }
        Ok(())
    }

    async fn rollback(&self) -> Result<()> {
        self.state.lock().await.staged.clear();
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<EngagementEvent>> {
        Ok(self.state.lock().await.committed.get(&id).cloned())
    }

    async fn query_history(&self, prospect_id: i64) -> Result<Vec<EngagementEvent>> {
        let state = self.state.lock().await;
        let mut history: Vec<EngagementEvent> = state
            .committed
            .values()
            .filter(|e| e.prospect_id == prospect_id)
            .cloned()
            .collect();
        history.sort_by_key(|e| e.sent_at);
        Ok(history)
    }
}
