// src/ui/theme.rs
use eframe::egui::{self, Color32};

pub const PRIMARY: Color32 = Color32::from_rgb(59, 130, 246);
pub const SECONDARY: Color32 = Color32::from_rgb(139, 92, 246);
pub const ACCENT: Color32 = Color32::from_rgb(236, 72, 153);
pub const SUCCESS: Color32 = Color32::from_rgb(34, 197, 94);
pub const WARNING: Color32 = Color32::from_rgb(234, 179, 8);
pub const DESTRUCTIVE: Color32 = Color32::from_rgb(239, 68, 68);
pub const MUTED: Color32 = Color32::from_rgb(148, 163, 184);
pub const BACKDROP: Color32 = Color32::from_rgb(8, 10, 28);

pub fn apply(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = BACKDROP;
    visuals.selection.bg_fill = PRIMARY;
    visuals.hyperlink_color = PRIMARY;
    ctx.set_visuals(visuals);
}

/// Translucent card behind each section.
pub fn card_frame(ui: &egui::Ui) -> egui::Frame {
    egui::Frame::group(ui.style())
        .fill(Color32::from_rgba_unmultiplied(30, 34, 60, 200))
        .rounding(10.0)
        .inner_margin(egui::Margin::same(12.0))
}

pub fn section_heading(ui: &mut egui::Ui, icon: &str, title: &str, color: Color32) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(icon).color(color).size(18.0));
        ui.strong(title);
    });
    ui.add_space(6.0);
}

pub fn badge(ui: &mut egui::Ui, text: &str, color: Color32) {
    egui::Frame::none()
        .fill(color.gamma_multiply(0.2))
        .stroke(egui::Stroke::new(1.0, color.gamma_multiply(0.6)))
        .rounding(8.0)
        .inner_margin(egui::Margin::symmetric(8.0, 2.0))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).color(color).strong());
        });
}
