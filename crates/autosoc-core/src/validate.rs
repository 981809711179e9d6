//! Snapshot invariant checks.
//!
//! A snapshot that breaks a structural invariant is rejected as a whole so
//! the caller keeps the previous one. Softer inconsistencies are returned as
//! warnings and the snapshot is still shown.

use std::collections::HashSet;

use crate::error::{Result, SocError};
use crate::risk::{RiskBands, RiskLevel, MAX_RISK_SCORE};
use crate::types::{AlertStatus, ComplianceStatus, DashboardSnapshot, Severity, WEEKLY_TREND_LEN};

/// Allowed drift of the category percentages from 100
const PERCENT_TOLERANCE: u64 = 2;

/// Non-fatal finding about an accepted snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// Supplied level differs from what the score bands to
    LevelMismatch {
        /// Level in the snapshot
        supplied: RiskLevel,
        /// Level the configured bands give for the score
        banded: RiskLevel,
    },
    /// Attack sources are not in descending order (first offending index)
    UnsortedSources(usize),
    /// Category percentages do not add up to roughly 100
    PercentSum(u64),
    /// The feed used an enum value this build does not recognize
    UnknownValue {
        /// Which field carried it
        field: &'static str,
        /// Alert id or framework key
        subject: String,
    },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LevelMismatch { supplied, banded } => {
                write!(f, "risk level '{supplied}' does not match score band '{banded}'")
            }
            Self::UnsortedSources(index) => {
                write!(f, "attack sources not sorted by count at position {index}")
            }
            Self::PercentSum(sum) => write!(f, "threat category percentages sum to {sum}"),
            Self::UnknownValue { field, subject } => {
                write!(f, "unrecognized {field} on {subject}, treated as worst case")
            }
        }
    }
}

/// Check a snapshot, returning warnings or rejecting it.
pub fn validate(snapshot: &DashboardSnapshot, bands: &RiskBands) -> Result<Vec<Warning>> {
    let violations = structural_violations(snapshot);
    if !violations.is_empty() {
        return Err(SocError::MalformedSnapshot { violations });
    }
    Ok(warnings(snapshot, bands))
}

fn structural_violations(snapshot: &DashboardSnapshot) -> Vec<String> {
    let mut violations = Vec::new();

    if snapshot.risk_score > MAX_RISK_SCORE {
        violations.push(format!(
            "risk_score {} exceeds {MAX_RISK_SCORE}",
            snapshot.risk_score
        ));
    }

    let uptime = snapshot.summary.uptime_percent;
    if !uptime.is_finite() || !(0.0..=100.0).contains(&uptime) {
        violations.push(format!("uptime_percent {uptime} outside 0-100"));
    }

    if snapshot.daily_trend.len() != WEEKLY_TREND_LEN {
        violations.push(format!(
            "daily_trend has {} points, expected {WEEKLY_TREND_LEN}",
            snapshot.daily_trend.len()
        ));
    }

    for day in &snapshot.daily_trend {
        if day.threats > day.events {
            violations.push(format!(
                "{}: {} threats exceed {} events",
                day.label, day.threats, day.events
            ));
        }
        if day.blocked > day.threats {
            violations.push(format!(
                "{}: {} blocked exceed {} threats",
                day.label, day.blocked, day.threats
            ));
        }
    }

    let mut seen = HashSet::new();
    for alert in &snapshot.recent_alerts {
        if alert.id.trim().is_empty() {
            violations.push("alert with empty id".to_string());
        } else if !seen.insert(alert.id.as_str()) {
            violations.push(format!("duplicate alert id {}", alert.id));
        }
    }

    violations
}

fn warnings(snapshot: &DashboardSnapshot, bands: &RiskBands) -> Vec<Warning> {
    let mut warnings = Vec::new();

    if let Some(banded) = snapshot.level_mismatch(bands) {
        warnings.push(Warning::LevelMismatch {
            supplied: snapshot.risk_level,
            banded,
        });
    }

    if let Some(index) = snapshot
        .top_attack_sources
        .windows(2)
        .position(|pair| pair[1].count > pair[0].count)
    {
        warnings.push(Warning::UnsortedSources(index + 1));
    }

    if !snapshot.threat_categories.is_empty() {
        let sum: u64 = snapshot
            .threat_categories
            .iter()
            .map(|c| u64::from(c.percent))
            .sum();
        if sum.abs_diff(100) > PERCENT_TOLERANCE {
            warnings.push(Warning::PercentSum(sum));
        }
    }

    if snapshot.risk_level == RiskLevel::Unknown {
        warnings.push(Warning::UnknownValue {
            field: "risk_level",
            subject: "snapshot".to_string(),
        });
    }

    for alert in &snapshot.recent_alerts {
        if alert.severity == Severity::Unknown {
            warnings.push(Warning::UnknownValue {
                field: "severity",
                subject: alert.id.clone(),
            });
        }
        if alert.status == AlertStatus::Unknown {
            warnings.push(Warning::UnknownValue {
                field: "status",
                subject: alert.id.clone(),
            });
        }
    }

    for (framework, status) in &snapshot.compliance {
        if *status == ComplianceStatus::Unknown {
            warnings.push(Warning::UnknownValue {
                field: "compliance status",
                subject: framework.clone(),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_snapshot;
    use crate::types::DayPoint;

    fn violations_of(snapshot: &DashboardSnapshot) -> Vec<String> {
        match validate(snapshot, &RiskBands::default()) {
            Err(SocError::MalformedSnapshot { violations }) => violations,
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn rejects_score_above_range() {
        let mut snapshot = demo_snapshot();
        snapshot.risk_score = 140;
        assert_eq!(violations_of(&snapshot), vec!["risk_score 140 exceeds 100"]);
    }

    #[test]
    fn rejects_short_trend() {
        let mut snapshot = demo_snapshot();
        snapshot.daily_trend.pop();
        assert!(violations_of(&snapshot)[0].contains("expected 7"));
    }

    #[test]
    fn rejects_inconsistent_day() {
        let mut snapshot = demo_snapshot();
        snapshot.daily_trend[2] = DayPoint::new("Wed", 3, 5, 6);
        let violations = violations_of(&snapshot);
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn rejects_duplicate_alert_ids() {
        let mut snapshot = demo_snapshot();
        snapshot.recent_alerts[1].id = "a1".to_string();
        assert_eq!(violations_of(&snapshot), vec!["duplicate alert id a1"]);
    }

    #[test]
    fn rejects_nan_uptime() {
        let mut snapshot = demo_snapshot();
        snapshot.summary.uptime_percent = f64::NAN;
        assert_eq!(violations_of(&snapshot).len(), 1);
    }

    #[test]
    fn unsorted_sources_only_warn() {
        let mut snapshot = demo_snapshot();
        snapshot.top_attack_sources.swap(1, 3);
        let warnings = validate(&snapshot, &RiskBands::default()).unwrap();
        assert_eq!(warnings, vec![Warning::UnsortedSources(2)]);
    }

    #[test]
    fn level_disagreement_only_warns() {
        let mut snapshot = demo_snapshot();
        snapshot.risk_score = 60;
        let warnings = validate(&snapshot, &RiskBands::default()).unwrap();
        assert_eq!(
            warnings,
            vec![Warning::LevelMismatch {
                supplied: RiskLevel::Low,
                banded: RiskLevel::High,
            }]
        );
    }

    #[test]
    fn unknown_enum_values_warn() {
        let mut snapshot = demo_snapshot();
        snapshot.recent_alerts[0].severity = Severity::Unknown;
        snapshot
            .compliance
            .insert("gdpr".to_string(), ComplianceStatus::Unknown);
        let warnings = validate(&snapshot, &RiskBands::default()).unwrap();
        assert_eq!(warnings.len(), 2);
        assert_eq!(
            warnings[0].to_string(),
            "unrecognized severity on a1, treated as worst case"
        );
    }

    #[test]
    fn huge_category_percentages_only_warn() {
        let mut snapshot = demo_snapshot();
        snapshot.threat_categories[0].percent = u32::MAX;
        snapshot.threat_categories[1].percent = 2;
        let warnings = validate(&snapshot, &RiskBands::default()).unwrap();
        assert!(matches!(
            warnings.as_slice(),
            [Warning::PercentSum(sum)] if *sum > u64::from(u32::MAX)
        ));
    }
}
