// src/state/orchestrator.rs
//! Submission state machine.
//!
//! `Idle -> Analyzing -> Result -> Idle`. A submission schedules a single
//! deadline; the caller polls with the current time and the result is
//! generated once the deadline has passed. Only one analysis can be pending.

use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::analysis::{AnalysisResult, MockAnalyzer};
use crate::input::SubmissionPayload;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrchestratorError {
    #[error("An analysis is already in progress")]
    AnalysisInProgress,

    #[error("There is no result to reset")]
    NotInResult,
}

/// A submission waiting for its simulated delay to elapse.
#[derive(Debug, Clone)]
pub struct PendingAnalysis {
    pub submission_id: String,
    pub payload: SubmissionPayload,
    pub started: Instant,
    pub deadline: Instant,
}

/// The single result slot together with the submission that produced it.
#[derive(Debug, Clone)]
pub struct CompletedAnalysis {
    pub payload: SubmissionPayload,
    pub result: AnalysisResult,
}

#[derive(Debug, Clone)]
pub enum Phase {
    Idle,
    Analyzing(PendingAnalysis),
    Result(CompletedAnalysis),
}

#[derive(Debug)]
pub struct Orchestrator {
    phase: Phase,
    delay: Duration,
    analyzer: MockAnalyzer,
}

impl Orchestrator {
    pub fn new(delay: Duration, analyzer: MockAnalyzer) -> Self {
        Self {
            phase: Phase::Idle,
            delay,
            analyzer,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    #[cfg(test)]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(self.phase, Phase::Analyzing(_))
    }

    pub fn completed(&self) -> Option<&CompletedAnalysis> {
        match &self.phase {
            Phase::Result(completed) => Some(completed),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.completed().map(|c| &c.result)
    }

    /// Starts a new analysis and returns its submission id. Any previous
    /// result is dropped before the delay begins.
    pub fn submit(&mut self, payload: SubmissionPayload, now: Instant) -> Result<String, OrchestratorError> {
        if self.is_analyzing() {
            return Err(OrchestratorError::AnalysisInProgress);
        }

        let submission_id = Uuid::new_v4().to_string();
        info!(%submission_id, source = %payload.describe(), "analysis started");

        self.phase = Phase::Analyzing(PendingAnalysis {
            submission_id: submission_id.clone(),
            payload,
            started: now,
            deadline: now + self.delay,
        });
        Ok(submission_id)
    }

    /// Completes the pending analysis once its deadline has passed.
    /// Returns true when a transition happened.
    pub fn poll(&mut self, now: Instant) -> bool {
        let due = match &self.phase {
            Phase::Analyzing(pending) => now >= pending.deadline,
            _ => false,
        };
        if !due {
            return false;
        }

        if let Phase::Analyzing(pending) = std::mem::replace(&mut self.phase, Phase::Idle) {
            let result = self.analyzer.generate(&pending.submission_id);
            debug_assert!(result.is_well_formed(), "malformed result {:?}", result);
            info!(
                submission_id = %pending.submission_id,
                verdict = %result.verdict,
                confidence = result.confidence,
                "analysis completed"
            );
            self.phase = Phase::Result(CompletedAnalysis {
                payload: pending.payload,
                result,
            });
        }
        true
    }

    /// `Result -> Idle`. Resetting an idle machine is a no-op.
    pub fn reset(&mut self) -> Result<(), OrchestratorError> {
        match self.phase {
            Phase::Idle => Ok(()),
            Phase::Analyzing(_) => Err(OrchestratorError::NotInResult),
            Phase::Result(_) => {
                debug!("result cleared");
                self.phase = Phase::Idle;
                Ok(())
            }
        }
    }

    /// Drops a pending analysis. Returns true if one was cancelled.
    pub fn cancel(&mut self) -> bool {
        if let Phase::Analyzing(pending) = &self.phase {
            info!(submission_id = %pending.submission_id, "analysis cancelled");
            self.phase = Phase::Idle;
            true
        } else {
            false
        }
    }

    /// Fraction of the delay elapsed, while analyzing.
    pub fn progress(&self, now: Instant) -> Option<f32> {
        match &self.phase {
            Phase::Analyzing(pending) => {
                let elapsed = now.saturating_duration_since(pending.started);
                let total = pending.deadline.saturating_duration_since(pending.started);
                if total.is_zero() {
                    Some(1.0)
                } else {
                    Some((elapsed.as_secs_f32() / total.as_secs_f32()).clamp(0.0, 1.0))
                }
            }
            _ => None,
        }
    }

    pub fn elapsed(&self, now: Instant) -> Option<Duration> {
        match &self.phase {
            Phase::Analyzing(pending) => Some(now.saturating_duration_since(pending.started)),
            _ => None,
        }
    }

    /// Time left until the pending analysis is due, used to schedule a repaint.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        match &self.phase {
            Phase::Analyzing(pending) => Some(pending.deadline.saturating_duration_since(now)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisSettings;

    const DELAY: Duration = Duration::from_millis(3000);

    fn orchestrator() -> Orchestrator {
        let analyzer = MockAnalyzer::new(&AnalysisSettings {
            seed: Some(5),
            ..AnalysisSettings::default()
        }).unwrap();
        Orchestrator::new(DELAY, analyzer)
    }

    fn url_payload() -> SubmissionPayload {
        SubmissionPayload::Url { url: "https://shop.example.com/item/42".to_string() }
    }

    #[test]
    fn starts_idle() {
        let orch = orchestrator();
        assert!(orch.is_idle());
        assert!(orch.result().is_none());
        assert!(orch.progress(Instant::now()).is_none());
    }

    #[test]
    fn submit_then_complete_after_delay() {
        let mut orch = orchestrator();
        let t0 = Instant::now();
        orch.submit(url_payload(), t0).unwrap();
        assert!(orch.is_analyzing());

        assert!(!orch.poll(t0 + Duration::from_millis(2999)));
        assert!(orch.is_analyzing());

        assert!(orch.poll(t0 + DELAY));
        let completed = orch.completed().unwrap();
        assert!(completed.result.is_well_formed());
        assert_eq!(completed.payload, url_payload());
    }

    #[test]
    fn second_submit_while_analyzing_is_rejected() {
        let mut orch = orchestrator();
        let t0 = Instant::now();
        let first_id = orch.submit(url_payload(), t0).unwrap();

        let err = orch.submit(url_payload(), t0 + Duration::from_millis(10)).unwrap_err();
        assert_eq!(err, OrchestratorError::AnalysisInProgress);

        match orch.phase() {
            Phase::Analyzing(pending) => {
                assert_eq!(pending.submission_id, first_id);
                assert_eq!(pending.deadline, t0 + DELAY);
            }
            other => panic!("unexpected phase {:?}", other),
        }
    }

    #[test]
    fn submit_from_result_discards_previous_result_immediately() {
        let mut orch = orchestrator();
        let t0 = Instant::now();
        orch.submit(url_payload(), t0).unwrap();
        orch.poll(t0 + DELAY);
        assert!(orch.result().is_some());

        orch.submit(url_payload(), t0 + DELAY).unwrap();
        assert!(orch.result().is_none());
        assert!(orch.is_analyzing());
    }

    #[test]
    fn result_carries_pending_submission_id() {
        let mut orch = orchestrator();
        let t0 = Instant::now();
        let id = orch.submit(url_payload(), t0).unwrap();
        orch.poll(t0 + DELAY);
        assert_eq!(orch.result().unwrap().submission_id, id);
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut orch = orchestrator();
        let t0 = Instant::now();
        orch.submit(url_payload(), t0).unwrap();
        orch.poll(t0 + DELAY);

        orch.reset().unwrap();
        assert!(orch.is_idle());
        assert!(orch.result().is_none());
        assert!(orch.completed().is_none());
    }

    #[test]
    fn reset_while_analyzing_is_rejected() {
        let mut orch = orchestrator();
        orch.submit(url_payload(), Instant::now()).unwrap();
        assert_eq!(orch.reset(), Err(OrchestratorError::NotInResult));
        assert!(orch.is_analyzing());
    }

    #[test]
    fn reset_when_idle_is_noop() {
        let mut orch = orchestrator();
        assert!(orch.reset().is_ok());
        assert!(orch.is_idle());
    }

    #[test]
    fn cancel_drops_pending_analysis() {
        let mut orch = orchestrator();
        let t0 = Instant::now();
        orch.submit(url_payload(), t0).unwrap();
        assert!(orch.cancel());
        assert!(orch.is_idle());

        // The old deadline no longer produces a result
        assert!(!orch.poll(t0 + DELAY));
        assert!(orch.result().is_none());
        assert!(!orch.cancel());
    }

    #[test]
    fn progress_tracks_elapsed_fraction() {
        let mut orch = orchestrator();
        let t0 = Instant::now();
        orch.submit(url_payload(), t0).unwrap();

        assert_eq!(orch.progress(t0), Some(0.0));
        let half = orch.progress(t0 + Duration::from_millis(1500)).unwrap();
        assert!((half - 0.5).abs() < 1e-3);
        assert_eq!(orch.progress(t0 + Duration::from_secs(10)), Some(1.0));
        assert_eq!(orch.time_until_due(t0 + Duration::from_millis(1000)), Some(Duration::from_millis(2000)));
        assert_eq!(orch.time_until_due(t0 + Duration::from_secs(10)), Some(Duration::ZERO));
    }

    #[test]
    fn poll_when_idle_does_nothing() {
        let mut orch = orchestrator();
        assert!(!orch.poll(Instant::now()));
        assert!(orch.is_idle());
    }
}
