//! Prospect and engagement event records shared by the engine components.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{OutreachError, Result};

/// Greeting used when a prospect has no named contact.
pub const DEFAULT_CONTACT: &str = "Decision Maker";

/// A sales target. Owned by the surrounding CRUD layer; read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prospect {
    pub id: i64,
    pub company_name: String,
    pub industry: String,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl Prospect {
    /// Contact name for greetings, falling back to a generic title.
    pub fn contact_display(&self) -> &str {
        self.contact_person
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_CONTACT)
    }

    /// Address for the given channel, if one is on file.
    pub fn address_for(&self, channel: Channel) -> Option<&str> {
        let raw = match channel {
            Channel::Email => self.email.as_deref(),
            Channel::Call => self.phone.as_deref(),
        };
        raw.map(str::trim).filter(|addr| !addr.is_empty())
    }
}

/// Outreach channel of an engagement event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Email,
    Call,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Email => "email",
            Channel::Call => "call",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "email" => Ok(Channel::Email),
            "call" => Ok(Channel::Call),
            other => Err(OutreachError::InvalidInput {
                message: format!("unknown channel '{}'", other),
            }),
        }
    }
}

/// One outreach attempt and the feedback accumulated on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementEvent {
    pub id: Uuid,
    pub prospect_id: i64,
    #[serde(rename = "type")]
    pub channel: Channel,
    pub content: String,
    pub sent_at: DateTime<Utc>,
    pub opened: bool,
    pub clicked: bool,
    pub responded: bool,
    #[serde(default)]
    pub connected: bool,
    pub engagement_score: f64,
    #[serde(default)]
    pub notes: String,
}

impl EngagementEvent {
    /// Fresh event with every feedback flag cleared.
    pub fn new(prospect_id: i64, channel: Channel, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            prospect_id,
            channel,
            content: content.into(),
            sent_at: Utc::now(),
            opened: false,
            clicked: false,
            responded: false,
            connected: false,
            engagement_score: 0.0,
            notes: String::new(),
        }
    }
}

/// Feedback signal reported for a sent email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementSignal {
    Open,
    Click,
    Reply,
}

impl EngagementSignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngagementSignal::Open => "open",
            EngagementSignal::Click => "click",
            EngagementSignal::Reply => "reply",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(EngagementSignal::Open),
            "click" => Ok(EngagementSignal::Click),
            "reply" => Ok(EngagementSignal::Reply),
            other => Err(OutreachError::InvalidInput {
                message: format!("unknown engagement signal '{}'", other),
            }),
        }
    }
}

/// Result of a completed call as reported by the sales rep.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallOutcome {
    #[serde(default)]
    pub connected: bool,
    #[serde(default)]
    pub interested: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prospect() -> Prospect {
        Prospect {
            id: 7,
            company_name: "Acme".into(),
            industry: "Retail".into(),
            contact_person: Some("  ".into()),
            email: Some("ops@acme.test".into()),
            phone: None,
        }
    }

    #[test]
    fn blank_contact_falls_back_to_title() {
        assert_eq!(prospect().contact_display(), DEFAULT_CONTACT);
    }

    #[test]
    fn address_follows_channel() {
        let p = prospect();
        assert_eq!(p.address_for(Channel::Email), Some("ops@acme.test"));
        assert_eq!(p.address_for(Channel::Call), None);
    }

    #[test]
    fn signal_names_parse_case_insensitively() {
        assert_eq!(EngagementSignal::parse("Click").unwrap(), EngagementSignal::Click);
        assert!(EngagementSignal::parse("bounce").is_err());
    }

    #[test]
    fn event_serializes_channel_as_type() {
        let event = EngagementEvent::new(1, Channel::Call, "script");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "call");
        assert_eq!(json["engagement_score"], 0.0);
    }
}
