//! SQLite-backed event store.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, Row, params};
use tracing::{debug, info};
use uuid::Uuid;

use super::EventStore;
use crate::error::{OutreachError, Result};
use crate::models::{Channel, EngagementEvent};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS engagement_events (
    id TEXT PRIMARY KEY,
    prospect_id INTEGER NOT NULL,
    type TEXT NOT NULL,
    content TEXT NOT NULL,
    sent_at TEXT NOT NULL,
    opened INTEGER NOT NULL DEFAULT 0,
    clicked INTEGER NOT NULL DEFAULT 0,
    responded INTEGER NOT NULL DEFAULT 0,
    connected INTEGER NOT NULL DEFAULT 0,
    engagement_score REAL NOT NULL DEFAULT 0,
    notes TEXT NOT NULL DEFAULT ''
);
CREATE INDEX IF NOT EXISTS idx_engagement_events_prospect
    ON engagement_events (prospect_id, sent_at);
";

const SELECT_COLUMNS: &str = "SELECT id, prospect_id, type, content, sent_at, opened, clicked, \
     responded, connected, engagement_score, notes FROM engagement_events";

pub struct SqliteEventStore {
    conn: Arc<Mutex<Connection>>,
    staged: Mutex<Vec<EngagementEvent>>,
}

impl SqliteEventStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        let store = Self::with_connection(conn)?;
        info!("Event store opened at {}", path.display());
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            staged: Mutex::new(Vec::new()),
        })
    }

    /// Run a blocking task against the connection off the async runtime.
    async fn execute<F, T>(&self, task: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn.lock().map_err(|_| OutreachError::Persistence {
                message: "connection mutex poisoned".to_string(),
            })?;
            task(&mut guard)
        })
        .await
        .map_err(|e| OutreachError::Internal {
            message: format!("database task failed: {}", e),
        })?
    }

    fn staged(&self) -> Result<std::sync::MutexGuard<'_, Vec<EngagementEvent>>> {
        self.staged.lock().map_err(|_| OutreachError::Persistence {
            message: "staging mutex poisoned".to_string(),
        })
    }
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    // Fixed width keeps lexical order equal to chronological order.
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)?.with_timezone(&Utc))
}

fn row_to_event(row: &Row) -> Result<EngagementEvent> {
    let id: String = row.get("id")?;
    let channel: String = row.get("type")?;
    let sent_at: String = row.get("sent_at")?;

    Ok(EngagementEvent {
        id: Uuid::parse_str(&id).map_err(|e| OutreachError::Serialization {
            message: format!("invalid event id '{}': {}", id, e),
        })?,
        prospect_id: row.get("prospect_id")?,
        channel: Channel::parse(&channel)?,
        content: row.get("content")?,
        sent_at: parse_timestamp(&sent_at)?,
        opened: row.get("opened")?,
        clicked: row.get("clicked")?,
        responded: row.get("responded")?,
        connected: row.get("connected")?,
        engagement_score: row.get("engagement_score")?,
        notes: row.get("notes")?,
    })
}

#[async_trait]
impl EventStore for SqliteEventStore {
    async fn add(&self, event: EngagementEvent) -> Result<()> {
        self.staged()?.push(event);
        Ok(())
    }

    async fn commit(&self) -> Result<()> {
        let pending = std::mem::take(&mut *self.staged()?);
        if pending.is_empty() {
            return Ok(());
        }
        let count = pending.len();
        self.execute(move |conn| {
            let tx = conn.transaction()?;
            for e in &pending {
                tx.execute(
                    "INSERT OR REPLACE INTO engagement_events
                     (id, prospect_id, type, content, sent_at, opened, clicked, responded, connected, engagement_score, notes)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                    params![
                        e.id.to_string(),
                        e.prospect_id,
                        e.channel.as_str(),
                        e.content,
                        format_timestamp(&e.sent_at),
                        e.opened,
                        e.clicked,
                        e.responded,
                        e.connected,
                        e.engagement_score,
                        e.notes,
                    ],
                )?;
            }
            tx.commit()?;
            Ok(())
        })
        .await?;
        debug!("Committed {} engagement event write(s)", count);
        Ok(())
    }

    async fn rollback(&self) -> Result<()> {
        self.staged()?.clear();
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<EngagementEvent>> {
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!("{} WHERE id = ?1", SELECT_COLUMNS))?;
            let mut rows = stmt.query(params![id.to_string()])?;
            let event = match rows.next()? {
                Some(row) => Some(row_to_event(row)?),
                None => None,
            };
            Ok(event)
        })
        .await
    }

    async fn query_history(&self, prospect_id: i64) -> Result<Vec<EngagementEvent>> {
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "{} WHERE prospect_id = ?1 ORDER BY sent_at ASC",
                SELECT_COLUMNS
            ))?;
            let mut rows = stmt.query(params![prospect_id])?;
            let mut events = Vec::new();
            while let Some(row) = rows.next()? {
                events.push(row_to_event(row)?);
            }
            Ok(events)
        })
        .await
    }
}
