//! Engagement scoring ledger.
//!
//! Records outreach attempts as events and folds feedback into each event's
//! running score. Scores only ever grow: every operation adds a fixed,
//! non-negative increment.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{error, info};
use uuid::Uuid;

use crate::approach::EngagementSummary;
use crate::error::{OutreachError, Result};
use crate::models::{CallOutcome, Channel, EngagementEvent, EngagementSignal, Prospect};
use crate::orchestrator::GeneratedContent;
use crate::store::EventStore;

pub const EMAIL_BASE_SCORE: f64 = 0.0;
pub const CALL_BASE_SCORE: f64 = 2.0;
pub const CONNECTED_INCREMENT: f64 = 3.0;
pub const INTERESTED_INCREMENT: f64 = 5.0;

impl EngagementSignal {
    pub fn score_increment(&self) -> f64 {
        match self {
            EngagementSignal::Open => 1.0,
            EngagementSignal::Click => 2.0,
            EngagementSignal::Reply => 5.0,
        }
    }
}

/// Set the signal's flag and add its increment. Repeats keep adding.
pub fn apply_signal(event: &mut EngagementEvent, signal: EngagementSignal) {
    match signal {
        EngagementSignal::Open => event.opened = true,
        EngagementSignal::Click => event.clicked = true,
        EngagementSignal::Reply => event.responded = true,
    }
    event.engagement_score += signal.score_increment();
}

pub fn apply_call_outcome(event: &mut EngagementEvent, outcome: &CallOutcome) {
    if outcome.connected {
        event.connected = true;
        event.engagement_score += CONNECTED_INCREMENT;
    }
    if outcome.interested {
        event.responded = true;
        event.engagement_score += INTERESTED_INCREMENT;
    }
    let notes = outcome
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or("No notes");
    event.notes = format!("{}\nOutcome: {}", event.notes, notes);
}

/// Build the event for a send without persisting it.
pub fn new_send_event(prospect: &Prospect, content: &GeneratedContent) -> Result<EngagementEvent> {
    let channel = content.channel();
    if prospect.address_for(channel).is_none() {
        let what = match channel {
            Channel::Email => "email address",
            Channel::Call => "phone number",
        };
        return Err(OutreachError::InvalidInput {
            message: format!("No {} for prospect: {}", what, prospect.company_name),
        });
    }

    let event = match content {
        GeneratedContent::Email(email) => {
            let mut event = EngagementEvent::new(prospect.id, Channel::Email, email.body.clone());
            event.engagement_score = EMAIL_BASE_SCORE;
            event.notes = format!("Subject: {}", email.subject);
            event
        }
        GeneratedContent::CallScript(script) => {
            let mut event =
                EngagementEvent::new(prospect.id, Channel::Call, serde_json::to_string(script)?);
            // A call counts as reached whether a person or voicemail picked up.
            event.opened = true;
            event.engagement_score = CALL_BASE_SCORE;
            event.notes = format!("Call script: {}", script.title);
            event
        }
    };
    Ok(event)
}

pub struct EngagementLedger {
    store: Arc<dyn EventStore>,
    // One add+commit unit of work at a time through this ledger.
    unit_of_work: Mutex<()>,
}

impl EngagementLedger {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self {
            store,
            unit_of_work: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &Arc<dyn EventStore> {
        &self.store
    }

    /// Record that content was sent (or a call placed) to the prospect.
    pub async fn record_send(
        &self,
        prospect: &Prospect,
        content: &GeneratedContent,
    ) -> Result<EngagementEvent> {
        let event = new_send_event(prospect, content)?;
        let _guard = self.unit_of_work.lock().await;
        self.persist(event.clone()).await?;
        info!(
            "Recorded {} event {} for prospect {}",
            event.channel.as_str(),
            event.id,
            prospect.id
        );
        Ok(event)
    }

    pub async fn track_engagement_signal(
        &self,
        event_id: Uuid,
        signal: EngagementSignal,
    ) -> Result<EngagementEvent> {
        self.mutate(event_id, |event| apply_signal(event, signal))
            .await
            .inspect(|event| {
                info!(
                    "Tracked {} on event {} (score={})",
                    signal.as_str(),
                    event_id,
                    event.engagement_score
                )
            })
    }

    pub async fn record_call_outcome(
        &self,
        event_id: Uuid,
        outcome: &CallOutcome,
    ) -> Result<EngagementEvent> {
        self.mutate(event_id, |event| apply_call_outcome(event, outcome))
            .await
            .inspect(|event| {
                info!(
                    "Recorded call outcome on event {} (connected={}, interested={}, score={})",
                    event_id, outcome.connected, outcome.interested, event.engagement_score
                )
            })
    }

    /// Prospect history, oldest first. This is what the approach selector consumes.
    pub async fn history(&self, prospect_id: i64) -> Result<Vec<EngagementEvent>> {
        self.store.query_history(prospect_id).await
    }

    pub async fn summary(&self, prospect_id: i64) -> Result<EngagementSummary> {
        let history = self.history(prospect_id).await?;
        Ok(EngagementSummary::from_history(&history))
    }

    async fn mutate<F>(&self, event_id: Uuid, apply: F) -> Result<EngagementEvent>
    where
        F: FnOnce(&mut EngagementEvent),
    {
        let _guard = self.unit_of_work.lock().await;
        let mut event = self
            .store
            .get(event_id)
            .await?
            .ok_or(OutreachError::NotFound { id: event_id })?;
        apply(&mut event);
        self.persist(event.clone()).await?;
        Ok(event)
    }

    /// Add and commit one event; roll back and report on any failure.
    async fn persist(&self, event: EngagementEvent) -> Result<()> {
        let id = event.id;
        let result = match self.store.add(event).await {
            Ok(()) => self.store.commit().await,
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            if let Err(rb) = self.store.rollback().await {
                error!("Rollback after failed write of event {} also failed: {}", id, rb);
            }
            return Err(match e {
                OutreachError::Persistence { .. } => e,
                other => OutreachError::Persistence {
                    message: other.to_string(),
                },
            });
        }
        Ok(())
    }
}
