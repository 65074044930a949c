// src/ui/result.rs
use eframe::egui::{self, Color32};

use crate::analysis::{AnalysisResult, Verdict};
use crate::input::command::{Command, ResetCommand, PromptExportCommand};
use crate::ui::theme;
use crate::utils::{rounded_percent, percent_fraction};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerdictPresentation {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub color: Color32,
}

impl VerdictPresentation {
    pub fn for_verdict(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Genuine => Self {
                icon: "✔",
                title: "Product Appears Genuine",
                description: "Our AI analysis indicates this product is likely authentic",
                color: theme::SUCCESS,
            },
            Verdict::Counterfeit => Self {
                icon: "✖",
                title: "Counterfeit Detected",
                description: "Multiple red flags suggest this product may be fake",
                color: theme::DESTRUCTIVE,
            },
            Verdict::Suspicious => Self {
                icon: "⚠",
                title: "Requires Further Review",
                description: "Some suspicious elements detected - proceed with caution",
                color: theme::WARNING,
            },
        }
    }
}

pub fn review_assessment(fake_review_probability: f64) -> &'static str {
    if fake_review_probability > 70.0 {
        "High likelihood of fake reviews detected"
    } else if fake_review_probability > 40.0 {
        "Some suspicious review patterns found"
    } else {
        "Reviews appear authentic"
    }
}

/// Badge text, badge color and explanation for the price finding.
pub fn price_assessment(suspicious_price: bool) -> (&'static str, Color32, &'static str) {
    if suspicious_price {
        ("Suspicious", theme::WARNING, "Price significantly below market average")
    } else {
        ("Normal Range", theme::SUCCESS, "Price within expected market range")
    }
}

pub fn logo_assessment(detected_logo: Option<&str>) -> &'static str {
    if detected_logo.is_some() {
        "Brand logo successfully identified and verified"
    } else {
        "No recognizable brand logo detected"
    }
}

pub fn confidence_summary(points: usize) -> String {
    format!(
        "Based on {} analysis points including visual inspection, pricing data, and review patterns.",
        points
    )
}

pub fn show_result_view(ui: &mut egui::Ui, result: &AnalysisResult, source: &str) -> Option<Box<dyn Command>> {
    let mut command: Option<Box<dyn Command>> = None;
    let verdict = VerdictPresentation::for_verdict(result.verdict);

    // Header
    ui.vertical_centered(|ui| {
        ui.label(egui::RichText::new(verdict.icon).size(48.0).color(verdict.color));
        ui.label(egui::RichText::new(verdict.title).size(24.0).strong());
        ui.label(egui::RichText::new(verdict.description).color(theme::MUTED));
        ui.label(egui::RichText::new(source).small().color(theme::MUTED));
    });
    ui.add_space(16.0);

    // Findings grid
    ui.columns(3, |columns| {
        theme::card_frame(&columns[0]).show(&mut columns[0], |ui| {
            ui.set_width(ui.available_width());
            theme::section_heading(ui, "👁", "Logo Detection", theme::PRIMARY);
            if let Some(logo) = &result.detected_logo {
                theme::badge(ui, logo, theme::PRIMARY);
            }
            ui.label(egui::RichText::new(logo_assessment(result.detected_logo.as_deref())).small().color(theme::MUTED));
        });

        theme::card_frame(&columns[1]).show(&mut columns[1], |ui| {
            ui.set_width(ui.available_width());
            theme::section_heading(ui, "$", "Price Analysis", theme::SECONDARY);
            let (badge, color, line) = price_assessment(result.suspicious_price);
            theme::badge(ui, badge, color);
            ui.label(egui::RichText::new(line).small().color(theme::MUTED));
        });

        theme::card_frame(&columns[2]).show(&mut columns[2], |ui| {
            ui.set_width(ui.available_width());
            theme::section_heading(ui, "💬", "Review Analysis", theme::ACCENT);
            ui.horizontal(|ui| {
                ui.label("Fake Probability");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.strong(format!("{}%", rounded_percent(result.fake_review_probability)));
                });
            });
            ui.add(egui::ProgressBar::new(percent_fraction(result.fake_review_probability)).fill(theme::ACCENT));
            ui.label(egui::RichText::new(review_assessment(result.fake_review_probability)).small().color(theme::MUTED));
        });
    });
    ui.add_space(12.0);

    // Confidence
    theme::card_frame(ui).show(ui, |ui| {
        ui.set_width(ui.available_width());
        theme::section_heading(ui, "📈", "Analysis Confidence", theme::PRIMARY);
        ui.horizontal(|ui| {
            ui.label("Overall Confidence");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                theme::badge(ui, &format!("{}%", rounded_percent(result.confidence)), verdict.color);
            });
        });
        ui.add(egui::ProgressBar::new(percent_fraction(result.confidence)).fill(verdict.color));
        ui.label(egui::RichText::new(confidence_summary(result.details.len())).small().color(theme::MUTED));
    });
    ui.add_space(12.0);

    // Details
    theme::card_frame(ui).show(ui, |ui| {
        ui.set_width(ui.available_width());
        theme::section_heading(ui, "🛡", "Analysis Breakdown", theme::SUCCESS);
        for detail in &result.details {
            ui.horizontal(|ui| {
                ui.colored_label(theme::SUCCESS, "✔");
                ui.label(detail.as_str());
            });
        }
    });
    ui.add_space(16.0);

    // Actions
    ui.vertical_centered(|ui| {
        ui.horizontal(|ui| {
            if ui.add(egui::Button::new("⬅ Analyze Another").min_size(egui::vec2(160.0, 32.0))).clicked() {
                command = Some(Box::new(ResetCommand));
            }
            if ui.add(egui::Button::new("Download Report").fill(theme::PRIMARY).min_size(egui::vec2(160.0, 32.0))).clicked() {
                command = Some(Box::new(PromptExportCommand));
            }
        });
    });

    command
}
