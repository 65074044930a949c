// src/analysis/generator.rs

use serde::{Serialize, Deserialize};
use rand::prelude::*;
use rand_distr::{Distribution, Bernoulli, Uniform};
use anyhow::{Result, anyhow};
use chrono::Utc;
use tracing::debug;

use crate::analysis::result::{
    AnalysisResult, Verdict, DETAIL_STEPS, CONFIDENCE_RANGE, PROBABILITY_RANGE,
};
use crate::config::AnalysisSettings;

// Stored as a plain string so the value survives the layered settings loader
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(into = "String", try_from = "String")]
pub enum VerdictStrategy {
    /// Verdict drawn independently of the other signals.
    Random,
    /// Verdict scored from the drawn price, review and logo signals.
    Derived,
}

impl Default for VerdictStrategy {
    fn default() -> Self {
        VerdictStrategy::Random
    }
}

impl From<VerdictStrategy> for String {
    fn from(strategy: VerdictStrategy) -> Self {
        match strategy {
            VerdictStrategy::Random => "random".to_string(),
            VerdictStrategy::Derived => "derived".to_string(),
        }
    }
}

impl TryFrom<String> for VerdictStrategy {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(VerdictStrategy::Random),
            "derived" => Ok(VerdictStrategy::Derived),
            other => Err(format!("unknown verdict strategy '{}'", other)),
        }
    }
}

/// Produces placeholder results. Every field is an independent draw.
#[derive(Debug)]
pub struct MockAnalyzer {
    rng: StdRng,
    strategy: VerdictStrategy,
    brands: Vec<String>,
    logo_presence: Bernoulli,
    coin: Bernoulli,
    unit: Uniform<f64>,
    probability: Uniform<f64>,
    confidence: Uniform<f64>,
}

impl MockAnalyzer {
    pub fn new(settings: &AnalysisSettings) -> Result<Self> {
        let rng = if let Some(seed) = settings.seed {
            StdRng::seed_from_u64(seed)
        } else {
            StdRng::from_entropy()
        };

        let logo_presence = Bernoulli::new(settings.logo_presence)
            .map_err(|e| anyhow!("Invalid logo presence probability {}: {}", settings.logo_presence, e))?;
        let coin = Bernoulli::new(0.5).map_err(|e| anyhow!("{}", e))?;

        Ok(Self {
            rng,
            strategy: settings.verdict_strategy,
            brands: settings.brands.clone(),
            logo_presence,
            coin,
            unit: Uniform::new(0.0, 1.0),
            probability: Uniform::new_inclusive(PROBABILITY_RANGE.0, PROBABILITY_RANGE.1),
            confidence: Uniform::new_inclusive(CONFIDENCE_RANGE.0, CONFIDENCE_RANGE.1),
        })
    }


    pub fn generate(&mut self, submission_id: &str) -> AnalysisResult {
        let detected_logo = self.draw_logo();
        let suspicious_price = self.coin.sample(&mut self.rng);
        let fake_review_probability = self.probability.sample(&mut self.rng);

        let verdict = match self.strategy {
            VerdictStrategy::Random => self.draw_verdict(),
            VerdictStrategy::Derived => derive_verdict(
                suspicious_price,
                fake_review_probability,
                detected_logo.as_deref(),
            ),
        };
        let confidence = self.confidence.sample(&mut self.rng);

        debug!(
            submission_id,
            %verdict,
            confidence,
            fake_review_probability,
            suspicious_price,
            "generated mock analysis"
        );

        AnalysisResult {
            submission_id: submission_id.to_string(),
            detected_logo,
            suspicious_price,
            fake_review_probability,
            verdict,
            confidence,
            details: DETAIL_STEPS.iter().map(|step| step.to_string()).collect(),
            completed_at: Utc::now(),
        }
    }

    fn draw_logo(&mut self) -> Option<String> {
        if !self.logo_presence.sample(&mut self.rng) {
            return None;
        }
        self.brands.choose(&mut self.rng).cloned()
    }

    // 40% genuine, then 70/30 counterfeit/suspicious of the remainder
    fn draw_verdict(&mut self) -> Verdict {
        if self.unit.sample(&mut self.rng) > 0.6 {
            Verdict::Genuine
        } else if self.unit.sample(&mut self.rng) > 0.3 {
            Verdict::Counterfeit
        } else {
            Verdict::Suspicious
        }
    }
}

/// Deterministic verdict from the individual signals.
///
/// A suspicious price weighs 40 points, the fake-review probability up to 40,
/// and a missing logo 20. Scores of 60 or more are counterfeit, 30 or more
/// suspicious.
pub fn derive_verdict(suspicious_price: bool, fake_review_probability: f64, detected_logo: Option<&str>) -> Verdict {
    let mut score = fake_review_probability.clamp(0.0, 100.0) * 0.4;
    if suspicious_price {
        score += 40.0;
    }
    if detected_logo.is_none() {
        score += 20.0;
    }

    if score >= 60.0 {
        Verdict::Counterfeit
    } else if score >= 30.0 {
        Verdict::Suspicious
    } else {
        Verdict::Genuine
    }
}
