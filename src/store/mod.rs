//! Persistence collaborator for engagement events.
//!
//! Writes are staged with `add` and become visible only after `commit`.
//! Reads always see committed state.

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::EngagementEvent;

pub use memory::MemoryEventStore;
pub use sqlite::SqliteEventStore;

#[async_trait]
pub trait EventStore: Send + Sync {
    /// Stage an insert-or-replace of the event, keyed by its id.
    async fn add(&self, event: EngagementEvent) -> Result<()>;
    /// Apply every staged write atomically.
    async fn commit(&self) -> Result<()>;
    /// Discard staged writes.
    async fn rollback(&self) -> Result<()>;
    async fn get(&self, id: Uuid) -> Result<Option<EngagementEvent>>;
    /// All committed events of one prospect, oldest `sent_at` first.
    async fn query_history(&self, prospect_id: i64) -> Result<Vec<EngagementEvent>>;
}
