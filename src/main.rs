//! Command-line front end for the outreach engine.
//!
//! Usage:
//!   outreach profile --industry "Healthcare Solutions"
//!   outreach email --id 7 --company "Acme Clinics" --industry healthcare --email ops@acme.test
//!   outreach send --channel call --id 7 --company "Acme Clinics" --industry healthcare --phone 555-0100
//!   outreach track --event <uuid> --signal open
//!   outreach outcome --event <uuid> --connected --interested --notes "wants a quote"
//!   outreach history --prospect 7

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use outreach_engine::clients::GroqClient;
use outreach_engine::config::Config;
use outreach_engine::render::render_html_email;
use outreach_engine::store::{EventStore, SqliteEventStore};
use outreach_engine::{
    CallOutcome, EngagementLedger, EngagementSignal, GeneratedContent, GenerationOrchestrator,
    Prospect, resolve_industry_profile, select_approach, select_objections,
};

#[derive(Parser)]
#[command(name = "outreach")]
#[command(about = "Personalized insurance outreach and engagement tracking", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the industry profile a free-text industry resolves to
    Profile {
        #[arg(long)]
        industry: String,
    },
    /// Show the three objections prepared for an industry
    Objections {
        #[arg(long)]
        industry: String,
    },
    /// Show the approach chosen from a prospect's recorded history
    Approach {
        #[arg(long)]
        prospect: i64,
    },
    /// Generate an email without recording it
    Email {
        #[command(flatten)]
        prospect: ProspectArgs,
        /// Also print the HTML rendering of the body
        #[arg(long)]
        html: bool,
    },
    /// Generate a call script without recording it
    Call {
        #[command(flatten)]
        prospect: ProspectArgs,
    },
    /// Generate an email and follow-up advice for the rep
    Advise {
        #[command(flatten)]
        prospect: ProspectArgs,
    },
    /// Generate content for a channel and record the send
    Send {
        #[arg(long, value_enum)]
        channel: ChannelArg,
        #[command(flatten)]
        prospect: ProspectArgs,
    },
    /// Record an open, click or reply on an event
    Track {
        #[arg(long)]
        event: Uuid,
        #[arg(long)]
        signal: String,
    },
    /// Record how a call went
    Outcome {
        #[arg(long)]
        event: Uuid,
        #[arg(long)]
        connected: bool,
        #[arg(long)]
        interested: bool,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Print a prospect's events and engagement summary
    History {
        #[arg(long)]
        prospect: i64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ChannelArg {
    Email,
    Call,
}

#[derive(Args)]
struct ProspectArgs {
    #[arg(long)]
    id: i64,
    #[arg(long)]
    company: String,
    #[arg(long)]
    industry: String,
    #[arg(long)]
    contact: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
}

impl From<ProspectArgs> for Prospect {
    fn from(args: ProspectArgs) -> Self {
        Prospect {
            id: args.id,
            company_name: args.company,
            industry: args.industry,
            contact_person: args.contact,
            email: args.email,
            phone: args.phone,
        }
    }
}

struct Engine {
    config: Config,
    orchestrator: GenerationOrchestrator,
    ledger: EngagementLedger,
}

impl Engine {
    fn build(config: Config) -> Result<Self> {
        let store: Arc<dyn EventStore> = Arc::new(
            SqliteEventStore::open(&config.storage.db_path)
                .with_context(|| format!("opening event store {}", config.storage.db_path))?,
        );
        let client = GroqClient::from_config(&config).context("building generation client")?;
        if config.runtime.api_key.is_none() {
            info!("GROQ_API_KEY not set; content will come from templates");
        }
        Ok(Self {
            orchestrator: GenerationOrchestrator::new(Arc::new(client)),
            ledger: EngagementLedger::new(store),
            config,
        })
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;

    let filter = EnvFilter::try_new(&config.runtime.log_level)
        .unwrap_or_else(|_| EnvFilter::new("outreach_engine=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Profile { industry } => print_json(&resolve_industry_profile(&industry)),
        Commands::Objections { industry } => print_json(&select_objections(&industry)),
        Commands::Approach { prospect } => {
            let engine = Engine::build(config)?;
            let history = engine.ledger.history(prospect).await?;
            print_json(&select_approach(&history))
        }
        Commands::Email { prospect, html } => {
            let engine = Engine::build(config)?;
            let prospect = Prospect::from(prospect);
            let history = engine.ledger.history(prospect.id).await?;
            let email = engine.orchestrator.generate_email(&prospect, &history).await;
            print_json(&email)?;
            if html {
                println!("{}", render_html_email(&email.body, &engine.config.sender));
            }
            Ok(())
        }
        Commands::Call { prospect } => {
            let engine = Engine::build(config)?;
            let prospect = Prospect::from(prospect);
            let history = engine.ledger.history(prospect.id).await?;
            let script = engine
                .orchestrator
                .generate_call_script(&prospect, &history)
                .await;
            print_json(&script)
        }
        Commands::Advise { prospect } => {
            let engine = Engine::build(config)?;
            let prospect = Prospect::from(prospect);
            let history = engine.ledger.history(prospect.id).await?;
            let email = engine.orchestrator.generate_email(&prospect, &history).await;
            let advice = engine
                .orchestrator
                .generate_follow_up_advice(&prospect, &email)
                .await;
            print_json(&serde_json::json!({ "email": email, "advice": advice }))
        }
        Commands::Send { channel, prospect } => {
            let engine = Engine::build(config)?;
            let prospect = Prospect::from(prospect);
            let history = engine.ledger.history(prospect.id).await?;
            let content: GeneratedContent = match channel {
                ChannelArg::Email => engine
                    .orchestrator
                    .generate_email(&prospect, &history)
                    .await
                    .into(),
                ChannelArg::Call => engine
                    .orchestrator
                    .generate_call_script(&prospect, &history)
                    .await
                    .into(),
            };
            let event = engine.ledger.record_send(&prospect, &content).await?;
            print_json(&serde_json::json!({ "content": content, "event": event }))
        }
        Commands::Track { event, signal } => {
            let engine = Engine::build(config)?;
            let signal = EngagementSignal::parse(&signal)?;
            let updated = engine.ledger.track_engagement_signal(event, signal).await?;
            print_json(&updated)
        }
        Commands::Outcome {
            event,
            connected,
            interested,
            notes,
        } => {
            let engine = Engine::build(config)?;
            let outcome = CallOutcome {
                connected,
                interested,
                notes,
            };
            let updated = engine.ledger.record_call_outcome(event, &outcome).await?;
            print_json(&updated)
        }
        Commands::History { prospect } => {
            let engine = Engine::build(config)?;
            let history = engine.ledger.history(prospect).await?;
            let summary = engine.ledger.summary(prospect).await?;
            print_json(&serde_json::json!({ "events": history, "summary": summary }))
        }
    }
}
