//! Automated response playbooks per alert severity.
//!
//! The dashboard only displays what the response engine would do; it never
//! executes an action itself.

use serde::Serialize;

use crate::types::Severity;

/// A single response step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseAction {
    /// Cut the endpoint off the network (EDR)
    IsolateHost,
    /// Add the source address to the firewall deny list
    BlockIp,
    /// Page the on-call analyst
    AlertAnalyst,
    /// Open an incident record
    CreateIncident,
    /// Open a ticket for later review
    CreateTicket,
    /// Record only
    LogEvent,
}

impl ResponseAction {
    /// Wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IsolateHost => "isolate_host",
            Self::BlockIp => "block_ip",
            Self::AlertAnalyst => "alert_analyst",
            Self::CreateIncident => "create_incident",
            Self::CreateTicket => "create_ticket",
            Self::LogEvent => "log_event",
        }
    }
}

impl std::fmt::Display for ResponseAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where notifications for a playbook go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationChannel {
    /// Mail to the client contact
    Email,
    /// Text message to on-call
    Sms,
    /// Team chat
    Slack,
}

impl NotificationChannel {
    /// Wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Sms => "sms",
            Self::Slack => "slack",
        }
    }
}

impl std::fmt::Display for NotificationChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happens when an alert of a given severity fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResponsePlaybook {
    /// Steps in execution order
    pub actions: &'static [ResponseAction],
    /// Whether the engine runs the steps without a human
    pub auto_execute: bool,
    /// Who gets told
    pub channels: &'static [NotificationChannel],
}

const CRITICAL: ResponsePlaybook = ResponsePlaybook {
    actions: &[
        ResponseAction::IsolateHost,
        ResponseAction::BlockIp,
        ResponseAction::AlertAnalyst,
        ResponseAction::CreateIncident,
    ],
    auto_execute: true,
    channels: &[
        NotificationChannel::Email,
        NotificationChannel::Sms,
        NotificationChannel::Slack,
    ],
};

const HIGH: ResponsePlaybook = ResponsePlaybook {
    actions: &[
        ResponseAction::BlockIp,
        ResponseAction::AlertAnalyst,
        ResponseAction::CreateIncident,
    ],
    auto_execute: true,
    channels: &[NotificationChannel::Email, NotificationChannel::Slack],
};

const MEDIUM: ResponsePlaybook = ResponsePlaybook {
    actions: &[ResponseAction::AlertAnalyst, ResponseAction::CreateTicket],
    auto_execute: false,
    channels: &[NotificationChannel::Email],
};

const LOW: ResponsePlaybook = ResponsePlaybook {
    actions: &[ResponseAction::LogEvent],
    auto_execute: false,
    channels: &[],
};

impl ResponsePlaybook {
    /// Playbook for a severity.
    ///
    /// An unrecognized severity goes to human review rather than to automatic
    /// isolation.
    #[must_use]
    pub const fn for_severity(severity: Severity) -> &'static Self {
        match severity {
            Severity::Critical => &CRITICAL,
            Severity::High => &HIGH,
            Severity::Medium | Severity::Unknown => &MEDIUM,
            Severity::Low | Severity::Info => &LOW,
        }
    }

    /// Steps joined for display ("block_ip -> alert_analyst")
    #[must_use]
    pub fn describe(&self) -> String {
        let steps: Vec<&str> = self.actions.iter().map(|a| a.as_str()).collect();
        let mode = if self.auto_execute { "auto" } else { "manual" };
        format!("{} ({mode})", steps.join(" -> "))
    }
}
