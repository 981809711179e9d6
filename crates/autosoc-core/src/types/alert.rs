use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Sentinel the feed uses when an alert has no network origin (e.g. phishing mail)
pub const NO_SOURCE_IP: &str = "N/A";

/// Alert urgency classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Active compromise or imminent damage
    Critical,
    /// Serious, needs attention today
    High,
    /// Worth a look
    Medium,
    /// Routine noise
    Low,
    /// Informational only
    Info,
    /// Value the feed sent that this build does not know
    #[serde(other)]
    Unknown,
}

impl Severity {
    /// All severities the feed is allowed to send, most urgent first
    pub const KNOWN: [Self; 5] = [Self::Critical, Self::High, Self::Medium, Self::Low, Self::Info];

    /// Severity used for display and counting.
    ///
    /// An unrecognized value is treated as the worst case.
    #[must_use]
    pub const fn effective(self) -> Self {
        match self {
            Self::Unknown => Self::Critical,
            other => other,
        }
    }

    /// Returns true for critical and high (the "HIGH+" bucket)
    #[must_use]
    pub const fn is_high_plus(self) -> bool {
        matches!(self.effective(), Self::Critical | Self::High)
    }

    /// Lowercase wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Info => "info",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alert lifecycle classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    /// Traffic stopped at the edge
    Blocked,
    /// Payload isolated (mail, file)
    Quarantined,
    /// An analyst is on it
    Investigating,
    /// Closed
    Resolved,
    /// Value the feed sent that this build does not know
    #[serde(other)]
    Unknown,
}

impl AlertStatus {
    /// Status used for display.
    ///
    /// An unrecognized value is shown as still open.
    #[must_use]
    pub const fn effective(self) -> Self {
        match self {
            Self::Unknown => Self::Investigating,
            other => other,
        }
    }

    /// Lowercase wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blocked => "blocked",
            Self::Quarantined => "quarantined",
            Self::Investigating => "investigating",
            Self::Resolved => "resolved",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the recent-alerts feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Unique alert ID
    pub id: String,

    /// Relative time label ("2 min ago")
    #[serde(rename = "time")]
    pub relative_time: String,

    /// Detection type ("Brute Force Attack")
    #[serde(rename = "type")]
    pub kind: String,

    /// Urgency
    pub severity: Severity,

    /// Origin address, or [`NO_SOURCE_IP`]
    #[serde(default = "no_source")]
    pub source_ip: String,

    /// Lifecycle state
    pub status: AlertStatus,
}

fn no_source() -> String {
    NO_SOURCE_IP.to_string()
}

/// Where an alert came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertOrigin<'a> {
    /// Network origin as reported by the feed
    Address(&'a str),
    /// No network origin; delivered by mail
    Email,
}

impl Alert {
    /// Classify the origin, honoring the "no source" sentinel
    #[must_use]
    pub fn origin(&self) -> AlertOrigin<'_> {
        let raw = self.source_ip.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case(NO_SOURCE_IP) || raw.eq_ignore_ascii_case("none") {
            AlertOrigin::Email
        } else {
            AlertOrigin::Address(raw)
        }
    }

    /// Parsed source address, if the feed sent a valid IPv4/IPv6 literal
    #[must_use]
    pub fn source_addr(&self) -> Option<IpAddr> {
        match self.origin() {
            AlertOrigin::Address(raw) => raw.parse().ok(),
            AlertOrigin::Email => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_severity_deserializes_as_worst_case() {
        let sev: Severity = serde_json::from_str(r#""catastrophic""#).unwrap();
        assert_eq!(sev, Severity::Unknown);
        assert_eq!(sev.effective(), Severity::Critical);
        assert!(sev.is_high_plus());
    }

    #[test]
    fn high_plus_bucket() {
        assert!(Severity::Critical.is_high_plus());
        assert!(Severity::High.is_high_plus());
        assert!(!Severity::Medium.is_high_plus());
        assert!(!Severity::Info.is_high_plus());
    }

    #[test]
    fn unknown_status_reads_as_open() {
        let status: AlertStatus = serde_json::from_str(r#""escalated""#).unwrap();
        assert_eq!(status.effective(), AlertStatus::Investigating);
    }

    #[test]
    fn alert_uses_feed_field_names() {
        let alert: Alert = serde_json::from_str(
            r#"{"id":"a3","time":"1 hr ago","type":"Phishing Email","severity":"medium","source_ip":"N/A","status":"quarantined"}"#,
        )
        .unwrap();
        assert_eq!(alert.kind, "Phishing Email");
        assert_eq!(alert.relative_time, "1 hr ago");
        assert_eq!(alert.origin(), AlertOrigin::Email);
        assert!(alert.source_addr().is_none());
    }

    #[test]
    fn address_origin() {
        let alert = Alert {
            id: "a1".into(),
            relative_time: "2 min ago".into(),
            kind: "Brute Force Attack".into(),
            severity: Severity::Critical,
            source_ip: "185.220.101.45".into(),
            status: AlertStatus::Blocked,
        };
        assert_eq!(alert.origin(), AlertOrigin::Address("185.220.101.45"));
        assert!(alert.source_addr().is_some_and(|ip| ip.is_ipv4()));
    }
}
