// src/ui/loading.rs
use std::time::Duration;
use eframe::egui;

use crate::input::command::{Command, CancelAnalysisCommand};
use crate::ui::theme;

pub struct LoadingStep {
    pub icon: &'static str,
    pub label: &'static str,
    /// Seconds after submission at which the step appears.
    pub appears_at: f32,
}

pub const LOADING_STEPS: [LoadingStep; 4] = [
    LoadingStep { icon: "🔍", label: "Fetching Product Data", appears_at: 0.0 },
    LoadingStep { icon: "📷", label: "Scanning Visual Elements", appears_at: 0.5 },
    LoadingStep { icon: "🧠", label: "AI Pattern Analysis", appears_at: 1.0 },
    LoadingStep { icon: "🛡", label: "Generating Report", appears_at: 1.5 },
];

// A step is marked done this long after it appears
const STEP_COMPLETION_SECS: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Hidden,
    Running,
    Done,
}

pub fn step_status(step: &LoadingStep, elapsed: Duration) -> StepStatus {
    let secs = elapsed.as_secs_f32();
    if secs < step.appears_at {
        StepStatus::Hidden
    } else if secs < step.appears_at + STEP_COMPLETION_SECS {
        StepStatus::Running
    } else {
        StepStatus::Done
    }
}

pub fn show_loading_view(ui: &mut egui::Ui, progress: f32, elapsed: Duration) -> Option<Box<dyn Command>> {
    let mut command: Option<Box<dyn Command>> = None;

    ui.vertical_centered(|ui| {
        ui.add_space(16.0);
        ui.add(egui::Spinner::new().size(64.0).color(theme::PRIMARY));
        ui.add_space(12.0);

        // Pulsing heading
        let pulse = 0.7 + 0.3 * (elapsed.as_secs_f32() * std::f32::consts::PI).sin().abs();
        ui.label(
            egui::RichText::new("AI Analysis in Progress")
                .size(24.0)
                .strong()
                .color(theme::PRIMARY.gamma_multiply(pulse))
        );
        ui.label(
            egui::RichText::new("Our advanced algorithms are examining your product for authenticity markers")
                .color(theme::MUTED)
        );
        ui.add_space(16.0);

        ui.allocate_ui(egui::vec2(380.0, 0.0), |ui| {
            for step in LOADING_STEPS.iter() {
                let status = step_status(step, elapsed);
                if status == StepStatus::Hidden {
                    continue;
                }
                theme::card_frame(ui).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(step.icon).size(18.0));
                        ui.label(step.label);
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            match status {
                                StepStatus::Done => {
                                    ui.colored_label(theme::SUCCESS, "●");
                                }
                                _ => {
                                    ui.add(egui::Spinner::new().size(12.0));
                                }
                            }
                        });
                    });
                });
                ui.add_space(4.0);
            }
        });

        ui.add_space(12.0);
        ui.add(
            egui::ProgressBar::new(progress)
                .desired_width(320.0)
                .fill(theme::PRIMARY)
        );
        ui.label(egui::RichText::new("Analyzing authenticity patterns...").small().color(theme::MUTED));

        ui.add_space(12.0);
        if ui.button("Cancel").clicked() {
            command = Some(Box::new(CancelAnalysisCommand));
        }
    });

    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_appear_in_order() {
        let at = |ms| Duration::from_millis(ms);
        assert_eq!(step_status(&LOADING_STEPS[0], at(0)), StepStatus::Running);
        assert_eq!(step_status(&LOADING_STEPS[1], at(400)), StepStatus::Hidden);
        assert_eq!(step_status(&LOADING_STEPS[1], at(500)), StepStatus::Running);
        assert_eq!(step_status(&LOADING_STEPS[3], at(1499)), StepStatus::Hidden);
    }

    #[test]
    fn steps_complete_after_running() {
        let at = |ms| Duration::from_millis(ms);
        assert_eq!(step_status(&LOADING_STEPS[0], at(1500)), StepStatus::Done);
        assert_eq!(step_status(&LOADING_STEPS[3], at(2999)), StepStatus::Running);
        assert_eq!(step_status(&LOADING_STEPS[3], at(3000)), StepStatus::Done);
    }
}
