// src/ui/manual_input.rs
use std::time::Instant;
use eframe::egui;

use crate::input::ManualForm;
use crate::input::command::{Command, SubmitManualCommand, PickImageCommand, RemoveImageCommand};
use crate::ui::theme;

pub fn show_manual_input_view(ui: &mut egui::Ui, form: &mut ManualForm) -> Option<Box<dyn Command>> {
    let mut command: Option<Box<dyn Command>> = None;

    ui.vertical_centered(|ui| {
        ui.label(egui::RichText::new("⬆").size(32.0).color(theme::PRIMARY));
        ui.heading("Manual Product Analysis");
        ui.label(
            egui::RichText::new("Manually input product details for comprehensive authenticity analysis")
                .color(theme::MUTED)
        );
    });
    ui.add_space(16.0);

    // Product name
    ui.strong("Product Name *");
    ui.add_sized(
        [ui.available_width(), 32.0],
        egui::TextEdit::singleline(&mut form.product_name)
            .hint_text("e.g., Nike Air Max 270")
    );
    ui.add_space(8.0);

    // Image
    ui.strong("Product Image");
    theme::card_frame(ui).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.vertical_centered(|ui| {
            if let Some(image) = form.image() {
                ui.label(format!("🖼 {} ({:.1} KB)", image.file_name, image.size_bytes as f64 / 1024.0));
                if ui.small_button("Remove Image").clicked() {
                    command = Some(Box::new(RemoveImageCommand));
                }
            } else {
                ui.label(egui::RichText::new("🖼").size(24.0).color(theme::MUTED));
                if ui.button("Choose image...").clicked() {
                    command = Some(Box::new(PickImageCommand));
                }
                ui.label(egui::RichText::new("PNG, JPG up to 10MB").small().color(theme::MUTED));
            }
            if let Some(error) = form.image_error() {
                ui.colored_label(theme::DESTRUCTIVE, error.to_string());
            }
        });
    });
    ui.add_space(8.0);

    // Price and reviews
    ui.columns(2, |columns| {
        columns[0].strong("Price *");
        columns[0].add(
            egui::TextEdit::singleline(&mut form.price)
                .hint_text("$ 99.99")
                .desired_width(f32::INFINITY)
        );

        columns[1].strong("Customer Reviews");
        columns[1].add(
            egui::TextEdit::multiline(&mut form.reviews)
                .hint_text("Paste some customer reviews here...")
                .desired_rows(3)
                .desired_width(f32::INFINITY)
        );
    });
    ui.add_space(12.0);

    let clicked = ui.add_enabled(
        form.can_submit(),
        egui::Button::new("⭐ Analyze Product Details")
            .fill(theme::PRIMARY)
            .min_size(egui::vec2(ui.available_width(), 36.0))
    ).clicked();
    if clicked {
        command = Some(Box::new(SubmitManualCommand { now: Instant::now() }));
    }
    if !form.can_submit() {
        ui.label(egui::RichText::new("Product name and price are required").small().color(theme::MUTED));
    }

    ui.add_space(16.0);
    ui.columns(2, |columns| {
        theme::card_frame(&columns[0]).show(&mut columns[0], |ui| {
            ui.set_width(ui.available_width());
            theme::section_heading(ui, "🖼", "Visual Analysis", theme::PRIMARY);
            ui.label(
                egui::RichText::new("AI examines product images for logo authenticity, quality markers, and visual inconsistencies")
                    .small()
                    .color(theme::MUTED)
            );
        });
        theme::card_frame(&columns[1]).show(&mut columns[1], |ui| {
            ui.set_width(ui.available_width());
            theme::section_heading(ui, "$", "Price Intelligence", theme::SECONDARY);
            ui.label(
                egui::RichText::new("Compare pricing against market data to identify suspiciously low or high prices")
                    .small()
                    .color(theme::MUTED)
            );
        });
    });

    command
}
