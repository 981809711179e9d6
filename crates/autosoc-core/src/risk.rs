//! Risk level banding and gauge geometry.
//!
//! The feed supplies `risk_score` and `risk_level` independently. Which
//! score range belongs to which level is deployment configuration, so the
//! thresholds live in [`RiskBands`] rather than in code.

use crate::error::{Result, SocError};
use serde::{Deserialize, Serialize};

/// Highest possible risk score
pub const MAX_RISK_SCORE: u32 = 100;

/// Needle sweep of the half-circle gauge, in degrees
pub const GAUGE_SWEEP_DEGREES: f64 = 180.0;

/// Overall risk classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Nothing needs attention
    Low,
    /// Keep an eye on it
    Medium,
    /// Act soon
    High,
    /// Act now
    Critical,
    /// Value the feed sent that this build does not know
    #[serde(other)]
    Unknown,
}

impl RiskLevel {
    /// Level used for display; an unrecognized value is the worst case.
    #[must_use]
    pub const fn effective(self) -> Self {
        match self {
            Self::Unknown => Self::Critical,
            other => other,
        }
    }

    /// Lowercase wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
            Self::Unknown => "unknown",
        }
    }
}

impl Default for RiskLevel {
    fn default() -> Self {
        Self::Low
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lower score bound of each level above `low`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskBands {
    /// First score classified as medium
    pub medium: u32,
    /// First score classified as high
    pub high: u32,
    /// First score classified as critical
    pub critical: u32,
}

impl Default for RiskBands {
    fn default() -> Self {
        Self {
            medium: 25,
            high: 50,
            critical: 75,
        }
    }
}

impl RiskBands {
    /// Create bands, rejecting thresholds that are not strictly increasing within 1..=100
    pub fn new(medium: u32, high: u32, critical: u32) -> Result<Self> {
        let bands = Self {
            medium,
            high,
            critical,
        };
        bands.validate()?;
        Ok(bands)
    }

    /// Check the thresholds form a monotonic banding
    pub fn validate(&self) -> Result<()> {
        if self.medium == 0 || self.critical > MAX_RISK_SCORE {
            return Err(SocError::Config(format!(
                "risk bands must lie within 1..={MAX_RISK_SCORE}, got {}/{}/{}",
                self.medium, self.high, self.critical
            )));
        }
        if !(self.medium < self.high && self.high < self.critical) {
            return Err(SocError::Config(format!(
                "risk bands must be strictly increasing, got {}/{}/{}",
                self.medium, self.high, self.critical
            )));
        }
        Ok(())
    }

    /// Level a score falls into
    #[must_use]
    pub const fn classify(&self, score: u32) -> RiskLevel {
        if score >= self.critical {
            RiskLevel::Critical
        } else if score >= self.high {
            RiskLevel::High
        } else if score >= self.medium {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// Needle angle in degrees for a score: 0 -> -90, 50 -> 0, 100 -> +90.
///
/// Scores above the maximum are clamped.
#[must_use]
pub fn needle_angle(score: u32) -> f64 {
    let clamped = f64::from(score.min(MAX_RISK_SCORE));
    clamped / f64::from(MAX_RISK_SCORE) * GAUGE_SWEEP_DEGREES - GAUGE_SWEEP_DEGREES / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_endpoints() {
        assert!((needle_angle(0) - -90.0).abs() < f64::EPSILON);
        assert!(needle_angle(50).abs() < f64::EPSILON);
        assert!((needle_angle(100) - 90.0).abs() < f64::EPSILON);
    }

    #[test]
    fn angle_for_demo_score() {
        assert!((needle_angle(24) - -46.8).abs() < 1e-9);
    }

    #[test]
    fn angle_is_monotonic_and_linear() {
        let mut previous = needle_angle(0);
        for score in 1..=MAX_RISK_SCORE {
            let angle = needle_angle(score);
            assert!(angle > previous, "angle must increase at {score}");
            assert!((angle - previous - 1.8).abs() < 1e-9);
            previous = angle;
        }
    }

    #[test]
    fn angle_clamps_out_of_range() {
        assert!((needle_angle(250) - 90.0).abs() < f64::EPSILON);
    }

    #[test]
    fn default_bands_classify_monotonically() {
        let bands = RiskBands::default();
        assert_eq!(bands.classify(0), RiskLevel::Low);
        assert_eq!(bands.classify(24), RiskLevel::Low);
        assert_eq!(bands.classify(25), RiskLevel::Medium);
        assert_eq!(bands.classify(50), RiskLevel::High);
        assert_eq!(bands.classify(99), RiskLevel::Critical);

        let mut previous = RiskLevel::Low;
        for score in 0..=MAX_RISK_SCORE {
            let level = bands.classify(score);
            assert!(level >= previous);
            previous = level;
        }
    }

    #[test]
    fn rejects_unordered_bands() {
        assert!(RiskBands::new(50, 40, 90).is_err());
        assert!(RiskBands::new(0, 40, 90).is_err());
        assert!(RiskBands::new(10, 40, 101).is_err());
        assert!(RiskBands::new(30, 60, 85).is_ok());
    }

    #[test]
    fn unknown_level_is_worst_case() {
        let level: RiskLevel = serde_json::from_str(r#""severe""#).unwrap();
        assert_eq!(level.effective(), RiskLevel::Critical);
    }
}
