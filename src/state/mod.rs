// src/state/mod.rs
use anyhow::Result;
use serde::{Serialize, Deserialize};

use crate::analysis::MockAnalyzer;
use crate::config::Settings;
use crate::input::{ManualForm, UrlForm};
use crate::state::orchestrator::Orchestrator;

pub mod orchestrator;

pub use orchestrator::{Phase, CompletedAnalysis};

// Input tab tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputTab {
    Url,
    Manual,
}

impl Default for InputTab {
    fn default() -> Self {
        InputTab::Url
    }
}

/// UI state that survives restarts through eframe storage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistedUi {
    pub active_tab: InputTab,
}

// Core application state
#[derive(Debug)]
pub struct AppState {
    pub settings: Settings,
    pub orchestrator: Orchestrator,

    // Input forms
    pub active_tab: InputTab,
    pub url_form: UrlForm,
    pub manual_form: ManualForm,

    // Minimal UI state
    pub error_message: Option<String>,
}

impl AppState {
    pub fn new(settings: Settings) -> Result<Self> {
        let analyzer = MockAnalyzer::new(&settings.analysis)?;
        let orchestrator = Orchestrator::new(settings.analysis.delay(), analyzer);

        Ok(Self {
            settings,
            orchestrator,
            active_tab: InputTab::default(),
            url_form: UrlForm::new(),
            manual_form: ManualForm::new(),
            error_message: None,
        })
    }

    /// Forms are only shown, and only accept input, while nothing is running.
    pub fn inputs_enabled(&self) -> bool {
        !self.orchestrator.is_analyzing() && self.orchestrator.result().is_none()
    }

    pub fn clear_forms(&mut self) {
        self.url_form.clear();
        self.manual_form.clear();
    }

    pub fn persisted(&self) -> PersistedUi {
        PersistedUi { active_tab: self.active_tab }
    }

    pub fn restore(&mut self, persisted: PersistedUi) {
        self.active_tab = persisted.active_tab;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_idle_on_url_tab() {
        let state = AppState::new(Settings::default()).unwrap();
        assert!(state.orchestrator.is_idle());
        assert_eq!(state.active_tab, InputTab::Url);
        assert!(state.inputs_enabled());
        assert!(state.error_message.is_none());
    }

    #[test]
    fn invalid_settings_fail_construction() {
        let mut settings = Settings::default();
        settings.analysis.logo_presence = 2.0;
        assert!(AppState::new(settings).is_err());
    }

    #[test]
    fn restore_applies_persisted_tab() {
        let mut state = AppState::new(Settings::default()).unwrap();
        state.restore(PersistedUi { active_tab: InputTab::Manual });
        assert_eq!(state.persisted().active_tab, InputTab::Manual);
    }
}
