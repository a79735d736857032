//! Ledger over an on-disk SQLite store.

use std::sync::Arc;

use chrono::Duration;
use outreach_engine::clients::{GenerationClient, GenerationError, GenerationRequest};
use outreach_engine::store::{EventStore, SqliteEventStore};
use outreach_engine::{
    CallOutcome, Channel, EngagementEvent, EngagementLedger, EngagementSignal,
    GeneratedContent, GenerationOrchestrator, Prospect,
};

struct Offline;

#[async_trait::async_trait]
impl GenerationClient for Offline {
    async fn generate(&self, _request: &GenerationRequest) -> Result<String, GenerationError> {
        Err(GenerationError::NotConfigured("offline".into()))
    }
}

fn prospect() -> Prospect {
    Prospect {
        id: 21,
        company_name: "Ledger & Co".into(),
        industry: "Finance".into(),
        contact_person: None,
        email: Some("cfo@ledger.test".into()),
        phone: Some("555-0123".into()),
    }
}

#[tokio::test]
async fn events_persist_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("outreach.db");

    let sent_id = {
        let store = Arc::new(SqliteEventStore::open(&path).unwrap());
        let ledger = EngagementLedger::new(store);
        let orch = GenerationOrchestrator::new(Arc::new(Offline));

        let content: GeneratedContent = orch.generate_call_script(&prospect(), &[]).await.into();
        let sent = ledger.record_send(&prospect(), &content).await.unwrap();
        ledger
            .record_call_outcome(
                sent.id,
                &CallOutcome {
                    connected: true,
                    interested: false,
                    notes: Some("left with assistant".into()),
                },
            )
            .await
            .unwrap();
        sent.id
    };

    let store = Arc::new(SqliteEventStore::open(&path).unwrap());
    let loaded = store.get(sent_id).await.unwrap().unwrap();
    assert_eq!(loaded.channel, Channel::Call);
    assert!(loaded.opened && loaded.connected && !loaded.responded);
    assert_eq!(loaded.engagement_score, 5.0);
    assert_eq!(
        loaded.notes,
        "Call script: Call Script for Ledger & Co\nOutcome: left with assistant"
    );
}

#[tokio::test]
async fn history_is_oldest_first() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteEventStore::open(dir.path().join("h.db")).unwrap();

    let newer = EngagementEvent::new(21, Channel::Email, "second");
    let mut older = EngagementEvent::new(21, Channel::Email, "first");
    older.sent_at = newer.sent_at - Duration::days(2);
    let other = EngagementEvent::new(22, Channel::Email, "someone else");

    store.add(newer.clone()).await.unwrap();
    store.add(older.clone()).await.unwrap();
    store.add(other).await.unwrap();
    store.commit().await.unwrap();

    let history = store.query_history(21).await.unwrap();
    let contents: Vec<&str> = history.iter().map(|e| e.content.as_str()).collect();
    assert_eq!(contents, ["first", "second"]);
}

#[tokio::test]
async fn signals_accumulate_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(SqliteEventStore::open(dir.path().join("s.db")).unwrap());
    let ledger = EngagementLedger::new(store);
    let orch = GenerationOrchestrator::new(Arc::new(Offline));

    let content: GeneratedContent = orch.generate_email(&prospect(), &[]).await.into();
    let sent = ledger.record_send(&prospect(), &content).await.unwrap();
    for _ in 0..3 {
        ledger
            .track_engagement_signal(sent.id, EngagementSignal::Open)
            .await
            .unwrap();
    }
    let summary = ledger.summary(21).await.unwrap();
    assert_eq!(summary.events, 1);
    assert_eq!(summary.total_score, 3.0);
}
