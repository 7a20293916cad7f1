//! Decision Policy
//!
//! Fixed thresholds: above 0.8 is blocked, above 0.4 goes to manual review,
//! everything else is approved. Both bounds are exclusive.

use serde::{Deserialize, Serialize};

pub const HIGH_RISK_THRESHOLD: f64 = 0.8;
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_probability(p: f64) -> Self {
        if p > HIGH_RISK_THRESHOLD {
            RiskLevel::High
        } else if p > MEDIUM_RISK_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    pub fn decision(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Transaction Approved",
            RiskLevel::Medium => "Manual Verification Required",
            RiskLevel::High => "Transaction Blocked",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk label plus the text shown to the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub risk_level: RiskLevel,
    pub decision: &'static str,
}

pub fn decide(p: f64) -> Decision {
    let risk_level = RiskLevel::from_probability(p);
    Decision {
        risk_level,
        decision: risk_level.decision(),
    }
}
