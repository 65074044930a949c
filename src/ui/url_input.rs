// src/ui/url_input.rs
use std::time::Instant;
use eframe::egui;

use crate::input::UrlForm;
use crate::input::command::{Command, SubmitUrlCommand};
use crate::ui::theme;

pub fn show_url_input_view(ui: &mut egui::Ui, form: &mut UrlForm) -> Option<Box<dyn Command>> {
    let mut command: Option<Box<dyn Command>> = None;

    ui.vertical_centered(|ui| {
        ui.label(egui::RichText::new("🔗").size(32.0).color(theme::PRIMARY));
        ui.heading("Product Link Analysis");
        ui.label(
            egui::RichText::new("Paste a product URL from any e-commerce platform for automatic analysis")
                .color(theme::MUTED)
        );
    });
    ui.add_space(16.0);

    ui.strong("Product URL");
    let has_error = form.error().is_some();
    let response = ui.add_sized(
        [ui.available_width(), 32.0],
        egui::TextEdit::singleline(&mut form.url)
            .hint_text("https://example.com/product/...")
            .text_color_opt(has_error.then_some(theme::DESTRUCTIVE))
    );
    if response.changed() {
        form.on_edit();
    }
    if let Some(error) = form.error() {
        ui.colored_label(theme::DESTRUCTIVE, error.to_string());
    }
    ui.add_space(12.0);

    let enter_pressed = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
    let clicked = ui.add_enabled(
        form.can_submit(),
        egui::Button::new("🔍 Fetch & Analyze Product")
            .fill(theme::PRIMARY)
            .min_size(egui::vec2(ui.available_width(), 36.0))
    ).clicked();
    if clicked || (enter_pressed && form.can_submit()) {
        command = Some(Box::new(SubmitUrlCommand { now: Instant::now() }));
    }

    ui.add_space(16.0);
    ui.columns(3, |columns| {
        for (column, (step, title, text)) in columns.iter_mut().zip([
            ("1", "Auto-Fetch", "Extract product details automatically"),
            ("2", "AI Analysis", "Deep learning detection algorithms"),
            ("3", "Results", "Comprehensive authenticity report"),
        ]) {
            theme::card_frame(column).show(column, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label(egui::RichText::new(step).strong().color(theme::PRIMARY));
                    ui.strong(title);
                    ui.label(egui::RichText::new(text).small().color(theme::MUTED));
                });
            });
        }
    });

    command
}
