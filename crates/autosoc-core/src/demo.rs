//! Built-in demo snapshot.
//!
//! Stands in for the live feed until a read API is configured.

use chrono::Utc;

use crate::risk::RiskLevel;
use crate::types::{
    Alert, AlertStatus, CategoryShare, ClientProfile, ComplianceMap, ComplianceStatus,
    ControlCheck, DashboardSnapshot, DayPoint, FrameworkDetail, ReportSection, Severity,
    SourceCount, SummaryStats, WeeklyReport, NO_SOURCE_IP,
};

fn alert(
    id: &str,
    time: &str,
    kind: &str,
    severity: Severity,
    source_ip: &str,
    status: AlertStatus,
) -> Alert {
    Alert {
        id: id.to_string(),
        relative_time: time.to_string(),
        kind: kind.to_string(),
        severity,
        source_ip: source_ip.to_string(),
        status,
    }
}

fn source(country: &str, count: u64, flag: &str) -> SourceCount {
    SourceCount {
        country: country.to_string(),
        count,
        flag: flag.to_string(),
    }
}

fn category(name: &str, count: u64, percent: u32) -> CategoryShare {
    CategoryShare {
        name: name.to_string(),
        count,
        percent,
    }
}

fn framework(key: &str, score: u8, status: ComplianceStatus, checks: &[(&str, bool)]) -> FrameworkDetail {
    FrameworkDetail {
        framework: key.to_string(),
        score,
        status,
        checks: checks
            .iter()
            .map(|(name, passing)| ControlCheck::new(*name, *passing))
            .collect(),
    }
}

fn section(title: &str, icon: &str, body: &str) -> ReportSection {
    ReportSection {
        title: title.to_string(),
        icon: icon.to_string(),
        body: body.to_string(),
    }
}

/// Snapshot for the demo client, "Sunrise Dental Practice".
#[must_use]
pub fn demo_snapshot() -> DashboardSnapshot {
    let compliance: ComplianceMap = [
        ("hipaa", ComplianceStatus::Compliant),
        ("soc2", ComplianceStatus::Compliant),
        ("pci_dss", ComplianceStatus::ActionNeeded),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    DashboardSnapshot {
        risk_score: 24,
        risk_level: RiskLevel::Low,
        summary: SummaryStats {
            events_today: 2847,
            threats_detected: 3,
            threats_blocked: 2,
            endpoints: 47,
            uptime_percent: 99.9,
        },
        compliance,
        daily_trend: vec![
            DayPoint::new("Mon", 2100, 2, 2),
            DayPoint::new("Tue", 1850, 0, 0),
            DayPoint::new("Wed", 2400, 5, 4),
            DayPoint::new("Thu", 1920, 1, 1),
            DayPoint::new("Fri", 2780, 3, 2),
            DayPoint::new("Sat", 980, 0, 0),
            DayPoint::new("Sun", 1240, 1, 1),
        ],
        recent_alerts: vec![
            alert("a1", "2 min ago", "Brute Force Attack", Severity::Critical, "185.220.101.45", AlertStatus::Blocked),
            alert("a2", "14 min ago", "Port Scan Detected", Severity::High, "91.195.240.117", AlertStatus::Blocked),
            alert("a3", "1 hr ago", "Phishing Email", Severity::Medium, NO_SOURCE_IP, AlertStatus::Quarantined),
            alert("a4", "2 hrs ago", "Suspicious Login", Severity::Medium, "192.168.1.45", AlertStatus::Investigating),
            alert("a5", "3 hrs ago", "Failed SSH Attempts", Severity::Low, "45.33.32.156", AlertStatus::Resolved),
            alert("a6", "5 hrs ago", "Malware Signature", Severity::High, "10.0.0.142", AlertStatus::Blocked),
        ],
        top_attack_sources: vec![
            source("Russia", 847, "🇷🇺"),
            source("China", 623, "🇨🇳"),
            source("North Korea", 312, "🇰🇵"),
            source("Iran", 201, "🇮🇷"),
            source("Unknown", 156, "🏴"),
        ],
        threat_categories: vec![
            category("Brute Force", 523, 42),
            category("Port Scan", 312, 25),
            category("Phishing", 187, 15),
            category("Malware", 112, 9),
            category("Other", 111, 9),
        ],
        client: Some(ClientProfile {
            name: "Sunrise Dental Practice".to_string(),
            plan: "Growth Plan".to_string(),
        }),
        compliance_details: vec![
            framework(
                "hipaa",
                88,
                ComplianceStatus::Compliant,
                &[("Access Controls", true), ("Audit Logs", true), ("Encryption", true), ("Backups", true)],
            ),
            framework(
                "soc2",
                92,
                ComplianceStatus::Compliant,
                &[("Security", true), ("Availability", true), ("Integrity", true), ("Privacy", true)],
            ),
            framework(
                "pci_dss",
                67,
                ComplianceStatus::ActionNeeded,
                &[("Network", true), ("Cardholder Data", false), ("Vuln Mgmt", false), ("Access", true)],
            ),
        ],
        weekly_report: Some(WeeklyReport {
            period: "Week of Feb 17-24, 2026".to_string(),
            headline: "Your business is well protected this week.".to_string(),
            summary: "Risk Score: 24/100 - No major incidents occurred.".to_string(),
            sections: vec![
                section(
                    "What We Found",
                    "🔍",
                    "We analyzed 14,382 security events this week. Our AI detected 7 potential threats, \
                     of which 5 were automatically blocked before they could cause any harm. Two events \
                     required our manual review - both were confirmed as low risk.",
                ),
                section(
                    "What We Did About It",
                    "🛡️",
                    "Blocked 3 brute force attacks from Russian IP addresses trying to guess your admin \
                     password. Quarantined 2 phishing emails before they reached your inbox. Blocked 2 \
                     suspicious file downloads on endpoint WIN-DESKTOP-03.",
                ),
                section(
                    "Your Security Tip This Week",
                    "💡",
                    "Enable multi-factor authentication (MFA) on your email accounts. This single step \
                     blocks 99% of automated hacking attempts. It takes 5 minutes to set up and we can \
                     walk you through it on our next call.",
                ),
            ],
            next_report: "February 24, 2026".to_string(),
        }),
        generated_at: Some(Utc::now()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::validate;

    #[test]
    fn demo_snapshot_is_valid() {
        let warnings = validate(&demo_snapshot(), &crate::RiskBands::default()).unwrap();
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    }

    #[test]
    fn demo_snapshot_survives_the_wire() {
        let snapshot = demo_snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains(r#""total_events_today":2847"#));
        assert!(json.contains(r#""pci_dss":"action_needed""#));
        let parsed: DashboardSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }
}
