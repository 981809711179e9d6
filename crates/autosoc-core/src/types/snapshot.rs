use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::alert::Alert;
use super::compliance::{ComplianceMap, FrameworkDetail};
use crate::risk::{RiskBands, RiskLevel};

/// Number of points in the weekly trend
pub const WEEKLY_TREND_LEN: usize = 7;

/// One immutable read of every dashboard metric.
///
/// Replaced wholesale on refresh, never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// Overall risk, 0-100
    pub risk_score: u32,

    /// Risk classification as supplied by the feed
    pub risk_level: RiskLevel,

    /// Headline counters
    pub summary: SummaryStats,

    /// Framework key -> status
    #[serde(default)]
    pub compliance: ComplianceMap,

    /// Seven chronological days
    #[serde(default)]
    pub daily_trend: Vec<DayPoint>,

    /// Most recent first
    #[serde(default)]
    pub recent_alerts: Vec<Alert>,

    /// Descending by count
    #[serde(default)]
    pub top_attack_sources: Vec<SourceCount>,

    /// Threat mix
    #[serde(default)]
    pub threat_categories: Vec<CategoryShare>,

    /// Monitored organization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<ClientProfile>,

    /// Per-framework assessments behind the compliance badges
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub compliance_details: Vec<FrameworkDetail>,

    /// Plain-language weekly summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_report: Option<WeeklyReport>,

    /// When the feed produced this snapshot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
}

impl DashboardSnapshot {
    /// Alerts whose effective severity is critical or high
    #[must_use]
    pub fn high_plus_count(&self) -> usize {
        self.recent_alerts
            .iter()
            .filter(|a| a.severity.is_high_plus())
            .count()
    }

    /// Level the score falls into when it disagrees with the supplied level
    #[must_use]
    pub fn level_mismatch(&self, bands: &RiskBands) -> Option<RiskLevel> {
        let banded = bands.classify(self.risk_score);
        (banded != self.risk_level.effective()).then_some(banded)
    }

    /// Relative bar width of each attack source, in percent of the first entry.
    ///
    /// The list is used as supplied: an unsorted feed yields widths above 100.
    #[must_use]
    pub fn source_bar_widths(&self) -> Vec<f64> {
        let denominator = self.top_attack_sources.first().map_or(0, |s| s.count);
        self.top_attack_sources
            .iter()
            .map(|s| relative_width(s.count, denominator))
            .collect()
    }

    /// Assessment for one framework, if the feed sent one
    #[must_use]
    pub fn framework_detail(&self, key: &str) -> Option<&FrameworkDetail> {
        self.compliance_details.iter().find(|d| d.framework == key)
    }
}

/// `count / denominator * 100`, zero when the denominator is zero
#[must_use]
pub fn relative_width(count: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let ratio = count as f64 / denominator as f64;
    ratio * 100.0
}

/// Headline counters for the current day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Events analyzed today
    #[serde(rename = "total_events_today")]
    pub events_today: u64,

    /// Threats detected today
    #[serde(rename = "threats_detected_today")]
    pub threats_detected: u64,

    /// Threats blocked without human action
    #[serde(rename = "threats_auto_blocked")]
    pub threats_blocked: u64,

    /// Endpoints reporting in
    #[serde(rename = "endpoints_monitored")]
    pub endpoints: u64,

    /// 30-day availability, 0-100
    pub uptime_percent: f64,
}

/// One day of the weekly trend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPoint {
    /// Day label ("Mon")
    #[serde(rename = "date")]
    pub label: String,

    /// Events seen
    pub events: u64,

    /// Threats among those events
    pub threats: u64,

    /// Threats blocked
    pub blocked: u64,
}

impl DayPoint {
    /// Create a trend point
    #[must_use]
    pub fn new(label: impl Into<String>, events: u64, threats: u64, blocked: u64) -> Self {
        Self {
            label: label.into(),
            events,
            threats,
            blocked,
        }
    }
}

/// Attack volume from one country
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCount {
    /// Country name
    pub country: String,

    /// Attempts attributed to it
    pub count: u64,

    /// Flag glyph
    #[serde(default)]
    pub flag: String,
}

/// Share of one threat category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryShare {
    /// Category name
    pub name: String,

    /// Occurrences
    pub count: u64,

    /// Percent of all categorized threats (informational)
    pub percent: u32,
}

/// The organization being monitored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientProfile {
    /// Display name
    pub name: String,

    /// Service plan
    #[serde(default)]
    pub plan: String,
}

/// Plain-language weekly summary for the business owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyReport {
    /// Covered period ("Feb 17-24, 2026")
    pub period: String,

    /// One-line verdict
    pub headline: String,

    /// Risk line under the verdict
    pub summary: String,

    /// Body sections
    #[serde(default)]
    pub sections: Vec<ReportSection>,

    /// When the next report is due
    #[serde(default)]
    pub next_report: String,
}

/// Titled paragraph of a weekly report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSection {
    /// Section heading
    pub title: String,

    /// Leading glyph
    #[serde(default)]
    pub icon: String,

    /// Paragraph text
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_snapshot;

    #[test]
    fn high_plus_counts_critical_and_high() {
        let snapshot = demo_snapshot();
        assert_eq!(snapshot.high_plus_count(), 3);
    }

    #[test]
    fn bar_widths_normalize_to_first_entry() {
        let snapshot = demo_snapshot();
        let widths = snapshot.source_bar_widths();
        assert!((widths[0] - 100.0).abs() < f64::EPSILON);
        assert!((widths[1] - 623.0 / 847.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn unsorted_sources_are_not_resorted() {
        let mut snapshot = demo_snapshot();
        snapshot.top_attack_sources.swap(0, 2);
        let first = snapshot.top_attack_sources[0].country.clone();
        let widths = snapshot.source_bar_widths();

        assert_eq!(snapshot.top_attack_sources[0].country, first);
        assert!((widths[0] - 100.0).abs() < f64::EPSILON);
        assert!(widths[2] > 100.0);
    }

    #[test]
    fn zero_denominator_yields_zero_width() {
        assert!(relative_width(5, 0).abs() < f64::EPSILON);
    }

    #[test]
    fn level_mismatch_reports_banded_level() {
        let mut snapshot = demo_snapshot();
        let bands = RiskBands::default();
        assert_eq!(snapshot.level_mismatch(&bands), None);

        snapshot.risk_score = 80;
        assert_eq!(snapshot.level_mismatch(&bands), Some(RiskLevel::Critical));
    }

    #[test]
    fn optional_sections_default_when_absent() {
        let json = r#"{
            "risk_score": 10,
            "risk_level": "low",
            "summary": {
                "total_events_today": 1,
                "threats_detected_today": 0,
                "threats_auto_blocked": 0,
                "endpoints_monitored": 2,
                "uptime_percent": 100.0
            }
        }"#;
        let snapshot: DashboardSnapshot = serde_json::from_str(json).unwrap();
        assert!(snapshot.client.is_none());
        assert!(snapshot.weekly_report.is_none());
        assert!(snapshot.recent_alerts.is_empty());
    }
}
