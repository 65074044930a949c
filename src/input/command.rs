// src/input/command.rs
use std::path::PathBuf;
use std::time::Instant;
use anyhow::{Result, anyhow};
use rfd::FileDialog;
use tracing::{debug, warn};

use crate::file::{AnalysisReport, ReportFileHandler};
use crate::input::manual_form::IMAGE_EXTENSIONS;
use crate::state::{AppState, InputTab};

pub trait Command {
    fn execute(&self, state: &mut AppState) -> Result<()>;
}

pub struct SwitchTabCommand(pub InputTab);
impl Command for SwitchTabCommand {
    fn execute(&self, state: &mut AppState) -> Result<()> {
        if !state.inputs_enabled() {
            return Err(anyhow!("Input forms are hidden while an analysis is shown"));
        }
        state.active_tab = self.0;
        Ok(())
    }
}

/// Validation failures stay inline on the form and are not errors here.
pub struct SubmitUrlCommand {
    pub now: Instant,
}
impl Command for SubmitUrlCommand {
    fn execute(&self, state: &mut AppState) -> Result<()> {
        match state.url_form.submit() {
            Ok(payload) => {
                state.orchestrator.submit(payload, self.now)?;
                state.clear_forms();
            }
            Err(e) => debug!("URL submission blocked: {}", e),
        }
        Ok(())
    }
}

pub struct SubmitManualCommand {
    pub now: Instant,
}
impl Command for SubmitManualCommand {
    fn execute(&self, state: &mut AppState) -> Result<()> {
        match state.manual_form.submit() {
            Ok(payload) => {
                state.orchestrator.submit(payload, self.now)?;
                state.clear_forms();
            }
            Err(e) => debug!("manual submission blocked: {}", e),
        }
        Ok(())
    }
}

pub struct ResetCommand;
impl Command for ResetCommand {
    fn execute(&self, state: &mut AppState) -> Result<()> {
        state.orchestrator.reset()?;
        state.error_message = None;
        Ok(())
    }
}

pub struct CancelAnalysisCommand;
impl Command for CancelAnalysisCommand {
    fn execute(&self, state: &mut AppState) -> Result<()> {
        if !state.orchestrator.cancel() {
            debug!("cancel requested with no pending analysis");
        }
        Ok(())
    }
}

pub struct AttachImageCommand(pub PathBuf);
impl Command for AttachImageCommand {
    fn execute(&self, state: &mut AppState) -> Result<()> {
        // Refusals are shown next to the upload area
        if let Err(e) = state.manual_form.attach_image(&self.0) {
            warn!(path = %self.0.display(), "image refused: {}", e);
        }
        Ok(())
    }
}

pub struct PickImageCommand;
impl Command for PickImageCommand {
    fn execute(&self, state: &mut AppState) -> Result<()> {
        let file_dialog = FileDialog::new()
            .add_filter("Images", &IMAGE_EXTENSIONS)
            .set_title("Select Product Image");

        if let Some(path) = file_dialog.pick_file() {
            AttachImageCommand(path).execute(state)?;
        }
        Ok(())
    }
}

pub struct RemoveImageCommand;
impl Command for RemoveImageCommand {
    fn execute(&self, state: &mut AppState) -> Result<()> {
        state.manual_form.remove_image();
        Ok(())
    }
}

pub struct ExportReportCommand(pub PathBuf);
impl Command for ExportReportCommand {
    fn execute(&self, state: &mut AppState) -> Result<()> {
        let completed = state.orchestrator.completed()
            .ok_or_else(|| anyhow!("No analysis result to export"))?;
        let report = AnalysisReport::from_completed(completed);
        ReportFileHandler::new().export(&report, &self.0)?;
        Ok(())
    }
}

pub struct PromptExportCommand;
impl Command for PromptExportCommand {
    fn execute(&self, state: &mut AppState) -> Result<()> {
        let file_dialog = FileDialog::new()
            .add_filter("RON files", &["ron"])
            .add_filter("CSV files", &["csv"])
            .set_file_name("counterfeit-report.ron")
            .set_title("Save Analysis Report");

        if let Some(path) = file_dialog.save_file() {
            ExportReportCommand(path).execute(state)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use crate::config::Settings;
    use crate::input::InputError;

    fn state() -> AppState {
        let mut settings = Settings::default();
        settings.analysis.seed = Some(21);
        AppState::new(settings).unwrap()
    }

    fn finish(state: &mut AppState, start: Instant) {
        let delay = state.orchestrator.delay();
        assert!(state.orchestrator.poll(start + delay));
    }

    #[test]
    fn valid_url_submission_starts_analysis_and_clears_form() {
        let mut state = state();
        state.url_form.url = "https://shop.example.com/item/42".to_string();
        let now = Instant::now();

        SubmitUrlCommand { now }.execute(&mut state).unwrap();
        assert!(state.orchestrator.is_analyzing());
        assert!(state.url_form.url.is_empty());
        assert!(!state.inputs_enabled());

        finish(&mut state, now);
        let result = state.orchestrator.result().unwrap();
        assert_eq!(result.details.len(), 4);
    }

    #[test]
    fn invalid_url_stays_idle_with_inline_error() {
        let mut state = state();
        state.url_form.url = "not-a-url".to_string();

        SubmitUrlCommand { now: Instant::now() }.execute(&mut state).unwrap();
        assert!(state.orchestrator.is_idle());
        assert_eq!(state.url_form.error(), Some(&InputError::InvalidUrl));
        assert_eq!(state.url_form.url, "not-a-url");
    }

    #[test]
    fn incomplete_manual_form_is_blocked() {
        let mut state = state();
        state.manual_form.product_name = "Rolex Submariner".to_string();

        SubmitManualCommand { now: Instant::now() }.execute(&mut state).unwrap();
        assert!(state.orchestrator.is_idle());
        assert_eq!(state.manual_form.product_name, "Rolex Submariner");
    }

    #[test]
    fn submit_while_analyzing_is_an_error() {
        let mut state = state();
        let now = Instant::now();
        state.url_form.url = "https://a.example/".to_string();
        SubmitUrlCommand { now }.execute(&mut state).unwrap();

        state.url_form.url = "https://b.example/".to_string();
        let later = now + Duration::from_millis(5);
        assert!(SubmitUrlCommand { now: later }.execute(&mut state).is_err());
    }

    #[test]
    fn reset_returns_to_forms() {
        let mut state = state();
        let now = Instant::now();
        state.manual_form.product_name = "Bag".to_string();
        state.manual_form.price = "20".to_string();
        SubmitManualCommand { now }.execute(&mut state).unwrap();
        finish(&mut state, now);

        ResetCommand.execute(&mut state).unwrap();
        assert!(state.orchestrator.is_idle());
        assert!(state.orchestrator.result().is_none());
        assert!(state.inputs_enabled());
    }

    #[test]
    fn cancel_returns_to_idle() {
        let mut state = state();
        state.url_form.url = "https://a.example/".to_string();
        SubmitUrlCommand { now: Instant::now() }.execute(&mut state).unwrap();

        CancelAnalysisCommand.execute(&mut state).unwrap();
        assert!(state.orchestrator.is_idle());
    }

    #[test]
    fn tab_switch_blocked_while_result_shown() {
        let mut state = state();
        SwitchTabCommand(InputTab::Manual).execute(&mut state).unwrap();
        assert_eq!(state.active_tab, InputTab::Manual);

        let now = Instant::now();
        state.manual_form.product_name = "Shoe".to_string();
        state.manual_form.price = "10".to_string();
        SubmitManualCommand { now }.execute(&mut state).unwrap();
        finish(&mut state, now);

        assert!(SwitchTabCommand(InputTab::Url).execute(&mut state).is_err());
        assert_eq!(state.active_tab, InputTab::Manual);
    }

    #[test]
    fn export_requires_result() {
        let mut state = state();
        let dir = tempfile::tempdir().unwrap();
        assert!(ExportReportCommand(dir.path().join("r.ron")).execute(&mut state).is_err());
    }

    #[test]
    fn export_writes_report_and_keeps_result() {
        let mut state = state();
        let now = Instant::now();
        state.url_form.url = "https://shop.example.com/item/42".to_string();
        SubmitUrlCommand { now }.execute(&mut state).unwrap();
        finish(&mut state, now);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("r.ron");
        ExportReportCommand(path.clone()).execute(&mut state).unwrap();
        assert!(path.exists());
        assert!(state.orchestrator.result().is_some());
    }

    #[test]
    fn refused_image_is_not_a_command_error() {
        let mut state = state();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.pdf");
        std::fs::write(&path, b"pdf").unwrap();

        AttachImageCommand(path).execute(&mut state).unwrap();
        assert!(state.manual_form.image().is_none());
        assert!(state.manual_form.image_error().is_some());

        RemoveImageCommand.execute(&mut state).unwrap();
        assert!(state.manual_form.image_error().is_none());
    }
}
