use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Framework key -> status, e.g. `{"hipaa": "compliant"}`
pub type ComplianceMap = BTreeMap<String, ComplianceStatus>;

/// Compliance score at or above which a framework is drawn as healthy
pub const HEALTHY_COMPLIANCE_SCORE: u8 = 80;

/// Binary compliance state of one regulatory framework
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    /// All tracked controls pass
    Compliant,
    /// At least one control needs work
    ActionNeeded,
    /// Value the feed sent that this build does not know
    #[serde(other)]
    Unknown,
}

impl ComplianceStatus {
    /// Only an explicit `compliant` counts; anything else needs action.
    #[must_use]
    pub const fn is_compliant(self) -> bool {
        matches!(self, Self::Compliant)
    }
}

/// Human name for a framework key (`pci_dss` -> `PCI DSS`)
#[must_use]
pub fn framework_display_name(key: &str) -> String {
    match key.to_ascii_lowercase().as_str() {
        "hipaa" => "HIPAA".to_string(),
        "soc2" | "soc_2" => "SOC 2".to_string(),
        "pci_dss" | "pci" => "PCI DSS".to_string(),
        "gdpr" => "GDPR".to_string(),
        "iso27001" | "iso_27001" => "ISO 27001".to_string(),
        other => other.replace('_', " ").to_uppercase(),
    }
}

/// One control inside a framework assessment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlCheck {
    /// Control family ("Access Controls")
    pub name: String,

    /// Whether the control currently passes
    pub passing: bool,
}

impl ControlCheck {
    /// Create a check
    #[must_use]
    pub fn new(name: impl Into<String>, passing: bool) -> Self {
        Self {
            name: name.into(),
            passing,
        }
    }
}

/// Detailed assessment behind a compliance badge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameworkDetail {
    /// Framework key, matching the compliance map
    pub framework: String,

    /// Assessment score in percent
    pub score: u8,

    /// Overall state
    pub status: ComplianceStatus,

    /// Individual control results
    #[serde(default)]
    pub checks: Vec<ControlCheck>,
}

impl FrameworkDetail {
    /// Returns true when the score is in the healthy range
    #[must_use]
    pub const fn is_healthy(&self) -> bool {
        self.score >= HEALTHY_COMPLIANCE_SCORE
    }

    /// Number of controls needing attention
    #[must_use]
    pub fn failing_checks(&self) -> usize {
        self.checks.iter().filter(|c| !c.passing).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecognized_status_is_not_compliant() {
        let status: ComplianceStatus = serde_json::from_str(r#""pending_review""#).unwrap();
        assert_eq!(status, ComplianceStatus::Unknown);
        assert!(!status.is_compliant());
        assert!(!ComplianceStatus::ActionNeeded.is_compliant());
        assert!(ComplianceStatus::Compliant.is_compliant());
    }

    #[test]
    fn compliance_map_from_feed() {
        let map: ComplianceMap =
            serde_json::from_str(r#"{"hipaa":"compliant","pci_dss":"action_needed"}"#).unwrap();
        assert_eq!(map["hipaa"], ComplianceStatus::Compliant);
        assert_eq!(map["pci_dss"], ComplianceStatus::ActionNeeded);
    }

    #[test]
    fn display_names() {
        assert_eq!(framework_display_name("pci_dss"), "PCI DSS");
        assert_eq!(framework_display_name("soc2"), "SOC 2");
        assert_eq!(framework_display_name("nist_csf"), "NIST CSF");
    }

    #[test]
    fn healthy_threshold() {
        let detail = FrameworkDetail {
            framework: "pci_dss".into(),
            score: 67,
            status: ComplianceStatus::ActionNeeded,
            checks: vec![ControlCheck::new("Network", true), ControlCheck::new("Cardholder Data", false)],
        };
        assert!(!detail.is_healthy());
        assert_eq!(detail.failing_checks(), 1);
    }
}
