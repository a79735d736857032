//! Outreach engine: personalized insurance sales emails and call scripts,
//! plus an engagement ledger that scores how prospects respond.

pub mod approach;
pub mod clients;
pub mod config;
pub mod error;
pub mod industry;
pub mod ledger;
pub mod models;
pub mod objections;
pub mod orchestrator;
pub mod prompts;
pub mod render;
pub mod store;

pub use approach::{Approach, ApproachDirective, EngagementSummary, select_approach};
pub use error::{OutreachError, Result};
pub use industry::{Industry, IndustryProfile, resolve_industry_profile};
pub use ledger::EngagementLedger;
pub use models::{CallOutcome, Channel, EngagementEvent, EngagementSignal, Prospect};
pub use objections::select_objections;
pub use orchestrator::{
    GeneratedCallScript, GeneratedContent, GeneratedEmail, GenerationMetadata,
    GenerationOrchestrator,
};
