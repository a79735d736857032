//! Generation requests for emails, call scripts and follow-up advice.

use crate::approach::ApproachDirective;
use crate::clients::{GenerationRequest, OutputFormat};
use crate::industry::IndustryProfile;
use crate::models::Prospect;

const EMAIL_SYSTEM: &str =
    "You are an expert in writing personalized insurance sales outreach emails.";
const CALL_SYSTEM: &str =
    "You are an expert in writing effective cold call scripts for insurance sales.";
const ADVICE_SYSTEM: &str = "You are an expert sales coach specializing in insurance sales.";

/// Marker the call script uses where the rep waits for an answer.
pub const PAUSE_MARKER: &str = "[[PAUSE]]";

/// Everything resolved locally before generation. Also what a fallback
/// message is built from, so it cannot fail.
#[derive(Debug, Clone)]
pub struct PromptContext<'a> {
    pub prospect: &'a Prospect,
    pub profile: IndustryProfile,
    pub directive: ApproachDirective,
    pub objections: &'a [String; 3],
}

impl PromptContext<'_> {
    fn briefing(&self) -> String {
        let p = self.prospect;
        format!(
            "Company details:\n\
             - Name: {company}\n\
             - Industry: {industry}\n\
             - Contact Person: {contact}\n\
             \n\
             Approach: {approach}\n\
             Tone: {tone}\n\
             Focus: {focus}\n\
             \n\
             Industry-specific information:\n\
             - Keywords to emphasize: {keywords}\n\
             - Industry pain points to address: {pain_points}\n\
             - Selling points to highlight: {selling_points}\n\
             \n\
             Address these potential objections subtly:\n\
             - {o1}\n\
             - {o2}\n\
             - {o3}\n",
            company = p.company_name,
            industry = p.industry,
            contact = p.contact_display(),
            approach = self.directive.approach.as_str(),
            tone = self.directive.tone,
            focus = self.directive.focus,
            keywords = self.profile.keywords.join(", "),
            pain_points = self.profile.pain_points.join(", "),
            selling_points = self.profile.selling_points.join(", "),
            o1 = self.objections[0],
            o2 = self.objections[1],
            o3 = self.objections[2],
        )
    }
}

pub fn email_request(ctx: &PromptContext<'_>) -> GenerationRequest {
    let format = OutputFormat::Json {
        fields: vec!["subject".to_string(), "body".to_string()],
    };
    let user = format!(
        "Generate a personalized cold email for an insurance company reaching out to {company} in the {industry} industry.\n\
         \n\
         {briefing}\n\
         Email structure:\n\
         1. Personalized greeting\n\
         2. Industry-specific hook relating to insurance needs\n\
         3. Value proposition tailored to their industry\n\
         4. Specific offering addressing their potential pain points\n\
         5. Call to action: {cta}\n\
         6. Professional signature\n\
         \n\
         Keep the email concise (250-300 words), professional, and focused on value.\n\
         \n\
         Output format: {instruction}\n\
         {{\"subject\": \"Email subject line\", \"body\": \"Full email body\"}}",
        company = ctx.prospect.company_name,
        industry = ctx.prospect.industry,
        briefing = ctx.briefing(),
        cta = ctx.directive.call_to_action,
        instruction = format.instruction().unwrap_or_default(),
    );

    GenerationRequest {
        system: EMAIL_SYSTEM.to_string(),
        user,
        format,
    }
}

pub fn call_script_request(ctx: &PromptContext<'_>) -> GenerationRequest {
    let user = format!(
        "Generate a brief cold call script for an insurance sales representative calling {company} in the {industry} industry.\n\
         \n\
         {briefing}\n\
         The script should include:\n\
         1. Introduction and purpose of the call\n\
         2. Industry-specific hook\n\
         3. Key qualifying questions\n\
         4. Addressing potential objections\n\
         5. Call to action/next steps: {cta}\n\
         \n\
         Format the script with clear sections for each part of the conversation and include {pause} where the representative should wait for a response.\n\
         Keep it conversational, natural, and under 400 words.",
        company = ctx.prospect.company_name,
        industry = ctx.prospect.industry,
        briefing = ctx.briefing(),
        cta = ctx.directive.call_to_action,
        pause = PAUSE_MARKER,
    );

    GenerationRequest {
        system: CALL_SYSTEM.to_string(),
        user,
        format: OutputFormat::Text,
    }
}

pub fn advice_request(prospect: &Prospect, email_subject: &str, email_focus: &str) -> GenerationRequest {
    let user = format!(
        "Provide brief, practical advice for a sales representative on how to follow up with this prospect after sending them an email:\n\
         \n\
         Company: {company}\n\
         Industry: {industry}\n\
         Email Subject: {subject}\n\
         Email Focus: {focus}\n\
         \n\
         Your advice should include:\n\
         1. When to follow up (timing)\n\
         2. Best channel for follow-up (phone, email, LinkedIn)\n\
         3. Talking points tailored to their industry\n\
         4. How to handle likely objections\n\
         \n\
         Keep it concise and actionable, under 100 words.",
        company = prospect.company_name,
        industry = prospect.industry,
        subject = email_subject,
        focus = email_focus,
    );

    GenerationRequest {
        system: ADVICE_SYSTEM.to_string(),
        user,
        format: OutputFormat::Text,
    }
}
