//! Personalized content generation with a deterministic fallback.
//!
//! Every public operation here is total: collaborator failures, timeouts and
//! malformed output are logged and replaced by templates built from data that
//! was already resolved locally.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::approach::{ApproachDirective, select_approach};
use crate::clients::{GenerationClient, GenerationError};
use crate::industry::{IndustryProfile, resolve_industry_profile};
use crate::models::{Channel, EngagementEvent, Prospect};
use crate::objections::select_objections;
use crate::prompts::{self, PAUSE_MARKER, PromptContext};

pub const FALLBACK_ADVICE: &str = "Follow up within 3 business days. Use phone for direct contact, then email if no response. \
Emphasize industry-specific benefits and ROI. Address cost objections by focusing on risk mitigation value.";

/// Why a given message was produced. Attached to every result, fallback included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationMetadata {
    pub profile: IndustryProfile,
    pub directive: ApproachDirective,
    pub objections: [String; 3],
    pub fallback_used: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedEmail {
    pub subject: String,
    pub body: String,
    pub metadata: GenerationMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedCallScript {
    pub title: String,
    pub script: String,
    pub metadata: GenerationMetadata,
}

/// Finished outreach content, ready to hand to a transport and the ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GeneratedContent {
    Email(GeneratedEmail),
    CallScript(GeneratedCallScript),
}

impl GeneratedContent {
    pub fn channel(&self) -> Channel {
        match self {
            GeneratedContent::Email(_) => Channel::Email,
            GeneratedContent::CallScript(_) => Channel::Call,
        }
    }

    pub fn metadata(&self) -> &GenerationMetadata {
        match self {
            GeneratedContent::Email(email) => &email.metadata,
            GeneratedContent::CallScript(script) => &script.metadata,
        }
    }
}

impl From<GeneratedEmail> for GeneratedContent {
    fn from(email: GeneratedEmail) -> Self {
        GeneratedContent::Email(email)
    }
}

impl From<GeneratedCallScript> for GeneratedContent {
    fn from(script: GeneratedCallScript) -> Self {
        GeneratedContent::CallScript(script)
    }
}

#[derive(Deserialize)]
struct EmailDraft {
    subject: String,
    body: String,
}

/// Parse `{"subject": .., "body": ..}`, tolerating Markdown code fences.
/// Both fields must be present and non-blank.
pub fn parse_email_draft(text: &str) -> Result<(String, String), GenerationError> {
    let trimmed = text
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();
    let draft: EmailDraft =
        serde_json::from_str(trimmed).map_err(|e| GenerationError::Parse(e.to_string()))?;
    let subject = draft.subject.trim();
    let body = draft.body.trim();
    if subject.is_empty() || body.is_empty() {
        return Err(GenerationError::Parse(
            "subject and body must both be non-empty".to_string(),
        ));
    }
    Ok((subject.to_string(), body.to_string()))
}

pub fn fallback_email_subject(prospect: &Prospect) -> String {
    format!("Custom Insurance Solutions for {}", prospect.company_name)
}

pub fn fallback_email_body(ctx: &PromptContext<'_>) -> String {
    let p = ctx.prospect;
    format!(
        "Dear {contact},\n\n\
         I hope this email finds you well. I'm reaching out because we've helped several companies in the {industry} industry optimize their insurance coverage.\n\n\
         Given the specific challenges in your industry like {pain}, our {selling} could be particularly valuable to {company}.\n\n\
         Would you be open to a brief call to discuss how our solutions could benefit your business?\n\n\
         Best regards,\n\
         Insurance Specialist",
        contact = p.contact_display(),
        industry = p.industry,
        pain = ctx.profile.primary_pain_point(),
        selling = ctx.profile.primary_selling_point(),
        company = p.company_name,
    )
}

pub fn fallback_call_script(ctx: &PromptContext<'_>) -> String {
    let p = ctx.prospect;
    format!(
        "Introduction:\n\
         \"Hello, may I speak with {contact}? My name is [Your Name] from [Your Insurance Agency].\"\n\n\
         Purpose:\n\
         I'm calling because we specialize in providing insurance solutions specifically for companies in the {industry} industry, and I thought {company} might benefit from our services.\n\n\
         Industry Hook:\n\
         We've noticed that businesses in {industry} often face unique challenges with {pain}. Is that something you're currently dealing with? {pause}\n\n\
         Value Proposition:\n\
         Many of our clients in your industry have found our {selling} particularly valuable. Would that be of interest to you? {pause}\n\n\
         Qualifying Question:\n\
         May I ask who currently handles your insurance needs? {pause}\n\n\
         Call to Action:\n\
         I'd love to schedule a brief meeting to discuss how our solutions could specifically benefit {company}. Would you be available for a 15-minute call next week? {pause}\n\n\
         Handle Objection (if needed):\n\
         I understand your concern. Many of our clients initially felt the same way. What we've found is that our specialized approach for {industry} businesses actually [address objection]. {pause}\n\n\
         Close:\n\
         Great! I'll send you a calendar invite with some more information. Thank you for your time, and I look forward to speaking with you more about this.",
        contact = p.contact_display(),
        industry = p.industry,
        company = p.company_name,
        pain = ctx.profile.primary_pain_point(),
        selling = ctx.profile.primary_selling_point(),
        pause = PAUSE_MARKER,
    )
}

pub fn call_script_title(prospect: &Prospect) -> String {
    format!("Call Script for {}", prospect.company_name)
}

/// Drives the generation collaborator for one prospect at a time.
pub struct GenerationOrchestrator {
    client: Arc<dyn GenerationClient>,
}

impl GenerationOrchestrator {
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        Self { client }
    }

    pub async fn generate_email(
        &self,
        prospect: &Prospect,
        history: &[EngagementEvent],
    ) -> GeneratedEmail {
        let objections = select_objections(&prospect.industry);
        let ctx = context(prospect, history, &objections);
        debug!(
            "Generating email for prospect {} (industry={}, approach={})",
            prospect.id,
            ctx.profile.industry.as_str(),
            ctx.directive.approach.as_str()
        );

        let request = prompts::email_request(&ctx);
        let outcome = match self.client.generate(&request).await {
            Ok(text) => parse_email_draft(&text),
            Err(e) => Err(e),
        };

        let (subject, body, fallback_used) = match outcome {
            Ok((subject, body)) => (subject, body, false),
            Err(e) => {
                warn!(
                    "Email generation failed for prospect {}, using template: {}",
                    prospect.id, e
                );
                (
                    fallback_email_subject(prospect),
                    fallback_email_body(&ctx),
                    true,
                )
            }
        };

        GeneratedEmail {
            subject,
            body,
            metadata: metadata(&ctx, fallback_used),
        }
    }

    pub async fn generate_call_script(
        &self,
        prospect: &Prospect,
        history: &[EngagementEvent],
    ) -> GeneratedCallScript {
        let objections = select_objections(&prospect.industry);
        let ctx = context(prospect, history, &objections);
        debug!(
            "Generating call script for prospect {} (industry={}, approach={})",
            prospect.id,
            ctx.profile.industry.as_str(),
            ctx.directive.approach.as_str()
        );

        let request = prompts::call_script_request(&ctx);
        let outcome = match self.client.generate(&request).await {
            Ok(text) if text.trim().is_empty() => Err(GenerationError::EmptyResponse),
            Ok(text) => Ok(text.trim().to_string()),
            Err(e) => Err(e),
        };

        let (script, fallback_used) = match outcome {
            Ok(script) => (script, false),
            Err(e) => {
                warn!(
                    "Call script generation failed for prospect {}, using template: {}",
                    prospect.id, e
                );
                (fallback_call_script(&ctx), true)
            }
        };

        GeneratedCallScript {
            title: call_script_title(prospect),
            script,
            metadata: metadata(&ctx, fallback_used),
        }
    }

    /// Coaching notes for the rep after an email went out.
    pub async fn generate_follow_up_advice(
        &self,
        prospect: &Prospect,
        email: &GeneratedEmail,
    ) -> String {
        let request =
            prompts::advice_request(prospect, &email.subject, email.metadata.directive.focus);
        match self.client.generate(&request).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => {
                warn!("Advice generation returned nothing for prospect {}", prospect.id);
                FALLBACK_ADVICE.to_string()
            }
            Err(e) => {
                warn!(
                    "Advice generation failed for prospect {}, using default advice: {}",
                    prospect.id, e
                );
                FALLBACK_ADVICE.to_string()
            }
        }
    }
}

fn context<'a>(
    prospect: &'a Prospect,
    history: &[EngagementEvent],
    objections: &'a [String; 3],
) -> PromptContext<'a> {
    PromptContext {
        prospect,
        profile: resolve_industry_profile(&prospect.industry),
        directive: select_approach(history),
        objections,
    }
}

fn metadata(ctx: &PromptContext<'_>, fallback_used: bool) -> GenerationMetadata {
    GenerationMetadata {
        profile: ctx.profile,
        directive: ctx.directive,
        objections: ctx.objections.clone(),
        fallback_used,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fenced_json() {
        let text = "```json\n{\"subject\": \"Hi\", \"body\": \"Hello there\"}\n```";
        let (subject, body) = parse_email_draft(text).unwrap();
        assert_eq!(subject, "Hi");
        assert_eq!(body, "Hello there");
    }

    #[test]
    fn rejects_missing_body() {
        assert!(parse_email_draft("{\"subject\": \"Hi\"}").is_err());
    }

    #[test]
    fn rejects_blank_subject() {
        assert!(parse_email_draft("{\"subject\": \"  \", \"body\": \"x\"}").is_err());
    }

    #[test]
    fn rejects_prose() {
        assert!(parse_email_draft("Sure! Here is your email: Dear ...").is_err());
    }
}
