//! Orchestrator behaviour against scripted generation collaborators.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use outreach_engine::approach::Approach;
use outreach_engine::clients::{GenerationClient, GenerationError, GenerationRequest};
use outreach_engine::industry::Industry;
use outreach_engine::orchestrator::FALLBACK_ADVICE;
use outreach_engine::prompts::PAUSE_MARKER;
use outreach_engine::{Channel, EngagementEvent, GenerationOrchestrator, Prospect};

struct AlwaysFails;

#[async_trait]
impl GenerationClient for AlwaysFails {
    async fn generate(&self, _request: &GenerationRequest) -> Result<String, GenerationError> {
        Err(GenerationError::Timeout { timeout_ms: 10 })
    }
}

struct FixedReply(&'static str);

#[async_trait]
impl GenerationClient for FixedReply {
    async fn generate(&self, _request: &GenerationRequest) -> Result<String, GenerationError> {
        Ok(self.0.to_string())
    }
}

#[derive(Default)]
struct Capturing {
    seen: Mutex<Vec<GenerationRequest>>,
}

#[async_trait]
impl GenerationClient for Capturing {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        self.seen.lock().unwrap().push(request.clone());
        Ok(r#"{"subject": "Hello", "body": "Body text"}"#.to_string())
    }
}

fn healthcare_prospect() -> Prospect {
    Prospect {
        id: 11,
        company_name: "Healthcare Solutions Inc".into(),
        industry: "Healthcare Solutions".into(),
        contact_person: None,
        email: Some("ops@hsi.test".into()),
        phone: Some("555-0101".into()),
    }
}

fn orchestrator(client: impl GenerationClient + 'static) -> GenerationOrchestrator {
    GenerationOrchestrator::new(Arc::new(client))
}

#[tokio::test]
async fn failing_generator_still_yields_email() {
    let prospect = healthcare_prospect();
    let email = orchestrator(AlwaysFails)
        .generate_email(&prospect, &[])
        .await;

    assert!(email.metadata.fallback_used);
    assert_eq!(
        email.subject,
        "Custom Insurance Solutions for Healthcare Solutions Inc"
    );
    assert!(email.body.starts_with("Dear Decision Maker,"));
    assert!(email.body.contains("challenges in your industry like medical malpractice"));
    assert!(email.body.contains("our HIPAA-compliant insurance solutions could"));
    assert_eq!(email.metadata.profile.industry, Industry::Healthcare);
    assert_eq!(email.metadata.directive.approach, Approach::Initial);
    assert_eq!(
        email.metadata.objections[2],
        "HIPAA compliance is our priority"
    );
}

#[tokio::test]
async fn failing_generator_still_yields_call_script() {
    let prospect = healthcare_prospect();
    let script = orchestrator(AlwaysFails)
        .generate_call_script(&prospect, &[])
        .await;

    assert!(script.metadata.fallback_used);
    assert_eq!(script.title, "Call Script for Healthcare Solutions Inc");
    for section in [
        "Introduction:",
        "Purpose:",
        "Industry Hook:",
        "Value Proposition:",
        "Qualifying Question:",
        "Call to Action:",
        "Handle Objection (if needed):",
        "Close:",
    ] {
        assert!(script.script.contains(section), "missing {section}");
    }
    assert!(script.script.matches(PAUSE_MARKER).count() >= 4);
    assert!(script.script.contains("may I speak with Decision Maker?"));
    assert!(script.script.contains("[Your Insurance Agency]"));
}

#[tokio::test]
async fn failing_generator_still_yields_advice() {
    let prospect = healthcare_prospect();
    let orch = orchestrator(AlwaysFails);
    let email = orch.generate_email(&prospect, &[]).await;
    let advice = orch.generate_follow_up_advice(&prospect, &email).await;
    assert_eq!(advice, FALLBACK_ADVICE);
}

#[tokio::test]
async fn prose_reply_falls_back_to_template() {
    let email = orchestrator(FixedReply("Sure, here's a great email for you!"))
        .generate_email(&healthcare_prospect(), &[])
        .await;
    assert!(email.metadata.fallback_used);
    assert!(email.subject.starts_with("Custom Insurance Solutions for"));
}

#[tokio::test]
async fn json_missing_body_falls_back() {
    let email = orchestrator(FixedReply(r#"{"subject": "Only a subject"}"#))
        .generate_email(&healthcare_prospect(), &[])
        .await;
    assert!(email.metadata.fallback_used);
}

#[tokio::test]
async fn blank_call_script_falls_back() {
    let script = orchestrator(FixedReply("   \n"))
        .generate_call_script(&healthcare_prospect(), &[])
        .await;
    assert!(script.metadata.fallback_used);
    assert!(script.script.starts_with("Introduction:"));
}

#[tokio::test]
async fn well_formed_reply_is_used() {
    let email = orchestrator(FixedReply(
        r#"{"subject": "Coverage built for clinics", "body": "Hi there"}"#,
    ))
    .generate_email(&healthcare_prospect(), &[])
    .await;
    assert!(!email.metadata.fallback_used);
    assert_eq!(email.subject, "Coverage built for clinics");
    assert_eq!(email.body, "Hi there");
}

#[tokio::test]
async fn clicked_history_shapes_the_prompt() {
    let prospect = healthcare_prospect();
    let mut opened = EngagementEvent::new(prospect.id, Channel::Email, "first");
    opened.opened = true;
    let mut clicked = EngagementEvent::new(prospect.id, Channel::Email, "second");
    clicked.clicked = true;

    let client = Arc::new(Capturing::default());
    let orch = GenerationOrchestrator::new(client.clone());
    let email = orch
        .generate_email(&prospect, &[opened, clicked])
        .await;

    assert_eq!(email.metadata.directive.approach, Approach::InterestedFollowUp);
    let seen = client.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].wants_json());
    assert!(seen[0].user.contains("JSON object with keys: subject, body"));
    assert!(seen[0].user.contains("Approach: interested follow-up"));
    assert!(
        seen[0]
            .user
            .contains("schedule a quick call to discuss specific solutions")
    );
}

#[tokio::test]
async fn call_prompt_lists_objections() {
    let client = Arc::new(Capturing::default());
    let orch = GenerationOrchestrator::new(client.clone());
    orch.generate_call_script(&healthcare_prospect(), &[]).await;

    let seen = client.seen.lock().unwrap();
    assert!(!seen[0].wants_json());
    assert!(
        seen[0]
            .user
            .contains("- Our existing malpractice coverage is enough")
    );
}
