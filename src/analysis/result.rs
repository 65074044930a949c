// src/analysis/result.rs
use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};

/// Analysis steps reported with every result, in display order.
pub const DETAIL_STEPS: [&str; 4] = [
    "Logo analysis completed",
    "Price comparison with market average",
    "Review pattern analysis",
    "Image authenticity verification",
];

pub const CONFIDENCE_RANGE: (f64, f64) = (70.0, 100.0);
pub const PROBABILITY_RANGE: (f64, f64) = (0.0, 100.0);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Verdict {
    Genuine,
    Counterfeit,
    Suspicious,
}

impl Verdict {
    pub const ALL: [Verdict; 3] = [Verdict::Genuine, Verdict::Counterfeit, Verdict::Suspicious];

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Genuine => "genuine",
            Verdict::Counterfeit => "counterfeit",
            Verdict::Suspicious => "suspicious",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of one completed submission. Replaced, never merged, by the next one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    pub submission_id: String,
    pub detected_logo: Option<String>,
    pub suspicious_price: bool,
    pub fake_review_probability: f64,  // 0..=100
    pub verdict: Verdict,
    pub confidence: f64,               // 70..=100
    pub details: Vec<String>,
    pub completed_at: DateTime<Utc>,
}

impl AnalysisResult {
    pub fn is_well_formed(&self) -> bool {
        let (min_conf, max_conf) = CONFIDENCE_RANGE;
        let (min_prob, max_prob) = PROBABILITY_RANGE;

        (min_conf..=max_conf).contains(&self.confidence)
            && (min_prob..=max_prob).contains(&self.fake_review_probability)
            && Verdict::ALL.contains(&self.verdict)
            && self.details.iter().map(String::as_str).eq(DETAIL_STEPS)
    }
}
