// Verdicts — mapping a raw phishing probability to a risk tier.
//
// The model gives a probability; callers want "is this safe to click".
// The tier thresholds are regression baselines against the current model,
// not a contract: 0.5 is the classifier's decision boundary, 0.8 separates
// "warn" from "block".

use serde::{Deserialize, Serialize};

use crate::indicators;

/// Score at or above which a URL is tiered High.
pub const HIGH_THRESHOLD: f64 = 0.8;
/// Score at or above which a URL is tiered Suspicious.
pub const SUSPICIOUS_THRESHOLD: f64 = 0.5;

/// Risk tier for a scored URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Suspicious,
    High,
}

impl RiskTier {
    /// Determine the tier from a phishing probability (0.0-1.0).
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= HIGH_THRESHOLD => RiskTier::High,
            s if s >= SUSPICIOUS_THRESHOLD => RiskTier::Suspicious,
            _ => RiskTier::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Suspicious => "Suspicious",
            RiskTier::High => "High",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A scored URL with its tier and heuristic indicators.
///
/// Serialized as-is for `--json` output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    pub url: String,
    /// Phishing probability from the model (0.0-1.0)
    pub score: f64,
    pub tier: RiskTier,
    /// Human-readable phishing indicators found in the URL string.
    /// Explanatory only — these do not feed into the score.
    pub indicators: Vec<String>,
}

/// Build a verdict for a URL from its model score.
pub fn assess(url: &str, score: f64) -> Verdict {
    Verdict {
        url: url.to_string(),
        score,
        tier: RiskTier::from_score(score),
        indicators: indicators::detect(url),
    }
}
