//! Communication approach derived from a prospect's engagement history.
//!
//! The decision is a strict priority list over the whole history: any reply
//! beats any click, which beats any open. Recency plays no part, so a prospect
//! who replied once stays on the warm track indefinitely.

use serde::Serialize;

use crate::models::{Channel, EngagementEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Approach {
    #[serde(rename = "initial")]
    Initial,
    #[serde(rename = "warm follow-up")]
    WarmFollowUp,
    #[serde(rename = "interested follow-up")]
    InterestedFollowUp,
    #[serde(rename = "awareness follow-up")]
    AwarenessFollowUp,
    #[serde(rename = "re-engagement")]
    ReEngagement,
}

impl Approach {
    pub fn as_str(&self) -> &'static str {
        match self {
            Approach::Initial => "initial",
            Approach::WarmFollowUp => "warm follow-up",
            Approach::InterestedFollowUp => "interested follow-up",
            Approach::AwarenessFollowUp => "awareness follow-up",
            Approach::ReEngagement => "re-engagement",
        }
    }

    /// Apply the priority list to aggregated counts.
    pub fn from_summary(summary: &EngagementSummary) -> Self {
        if summary.events == 0 {
            Approach::Initial
        } else if summary.responded > 0 {
            Approach::WarmFollowUp
        } else if summary.clicked > 0 {
            Approach::InterestedFollowUp
        } else if summary.opened > 0 {
            Approach::AwarenessFollowUp
        } else {
            Approach::ReEngagement
        }
    }

    pub fn directive(self) -> ApproachDirective {
        let (tone, focus, call_to_action) = match self {
            Approach::Initial => (
                "informative and friendly",
                "introduction and value proposition",
                "schedule a brief call",
            ),
            Approach::WarmFollowUp => (
                "appreciative and consultative",
                "deepening the relationship",
                "schedule a detailed consultation",
            ),
            Approach::InterestedFollowUp => (
                "helpful and proactive",
                "addressing specific interests",
                "schedule a quick call to discuss specific solutions",
            ),
            Approach::AwarenessFollowUp => (
                "informative with new value points",
                "building interest with more specific benefits",
                "check out more resources or schedule a call",
            ),
            Approach::ReEngagement => (
                "direct and attention-grabbing",
                "new angle or value proposition",
                "simple response or quick call",
            ),
        };
        ApproachDirective {
            approach: self,
            tone,
            focus,
            call_to_action,
        }
    }
}

/// Tone, focus and call to action for the next outreach.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ApproachDirective {
    pub approach: Approach,
    pub tone: &'static str,
    pub focus: &'static str,
    pub call_to_action: &'static str,
}

/// Counts behind the approach decision, plus the cumulative score.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EngagementSummary {
    pub events: usize,
    pub opened: usize,
    pub clicked: usize,
    pub responded: usize,
    pub connected: usize,
    pub interested: usize,
    pub total_score: f64,
}

impl EngagementSummary {
    pub fn from_history(history: &[EngagementEvent]) -> Self {
        history.iter().fold(Self::default(), |mut acc, event| {
            acc.events += 1;
            acc.opened += usize::from(event.opened);
            acc.clicked += usize::from(event.clicked);
            acc.responded += usize::from(event.responded);
            acc.connected += usize::from(event.connected);
            // An interested call is recorded as a response on a call event.
            acc.interested += usize::from(event.channel == Channel::Call && event.responded);
            acc.total_score += event.engagement_score;
            acc
        })
    }
}

/// Choose the approach for the next outreach. Pure and total.
pub fn select_approach(history: &[EngagementEvent]) -> ApproachDirective {
    Approach::from_summary(&EngagementSummary::from_history(history)).directive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn event(opened: bool, clicked: bool, responded: bool) -> EngagementEvent {
        let mut e = EngagementEvent::new(1, Channel::Email, "body");
        e.opened = opened;
        e.clicked = clicked;
        e.responded = responded;
        e
    }

    #[test]
    fn empty_history_is_initial() {
        let d = select_approach(&[]);
        assert_eq!(d.approach, Approach::Initial);
        assert_eq!(d.call_to_action, "schedule a brief call");
    }

    #[test]
    fn old_reply_beats_recent_click() {
        let mut replied = event(false, false, true);
        replied.sent_at = Utc::now() - Duration::days(200);
        let clicked = event(true, true, false);
        let d = select_approach(&[replied, clicked]);
        assert_eq!(d.approach, Approach::WarmFollowUp);
    }

    #[test]
    fn reply_beats_earlier_open() {
        let d = select_approach(&[event(true, false, false), event(false, false, true)]);
        assert_eq!(d.approach, Approach::WarmFollowUp);
        assert_eq!(d.tone, "appreciative and consultative");
    }

    #[test]
    fn click_beats_open() {
        let d = select_approach(&[event(true, false, false), event(false, true, false)]);
        assert_eq!(d.approach, Approach::InterestedFollowUp);
    }

    #[test]
    fn open_only_is_awareness() {
        let d = select_approach(&[event(false, false, false), event(true, false, false)]);
        assert_eq!(d.approach, Approach::AwarenessFollowUp);
    }

    #[test]
    fn silent_history_is_re_engagement() {
        let d = select_approach(&[event(false, false, false)]);
        assert_eq!(d.approach, Approach::ReEngagement);
        assert_eq!(d.approach.as_str(), "re-engagement");
    }

    #[test]
    fn summary_counts_call_interest() {
        let mut call = EngagementEvent::new(1, Channel::Call, "{}");
        call.opened = true;
        call.connected = true;
        call.responded = true;
        call.engagement_score = 10.0;
        let summary = EngagementSummary::from_history(&[call, event(true, true, false)]);
        assert_eq!(summary.events, 2);
        assert_eq!(summary.opened, 2);
        assert_eq!(summary.connected, 1);
        assert_eq!(summary.interested, 1);
        assert_eq!(summary.total_score, 10.0);
    }

    #[test]
    fn approach_serializes_with_label() {
        let json = serde_json::to_value(Approach::InterestedFollowUp.directive()).unwrap();
        assert_eq!(json["approach"], "interested follow-up");
    }
}
