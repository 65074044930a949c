// src/app.rs
use std::time::{Duration, Instant};
use eframe::egui;
use tracing::{debug, error};

use crate::input::command::{Command, SwitchTabCommand};
use crate::state::{AppState, InputTab, Phase, PersistedUi};
use crate::ui::background::StarField;
use crate::ui::{loading, manual_input, result, theme, url_input};

const BACKGROUND_FRAME: Duration = Duration::from_millis(33);

pub struct DetectorApp {
    state: AppState,
    background: StarField,
}

impl DetectorApp {
    pub fn new(cc: &eframe::CreationContext<'_>, mut state: AppState) -> Self {
        theme::apply(&cc.egui_ctx);

        if let Some(storage) = cc.storage {
            if let Some(persisted) = eframe::get_value::<PersistedUi>(storage, eframe::APP_KEY) {
                debug!(tab = ?persisted.active_tab, "restored UI state");
                state.restore(persisted);
            }
        }

        let background = StarField::new(&state.settings.background, state.settings.analysis.seed);
        Self { state, background }
    }

    fn run(&mut self, command: Option<Box<dyn Command>>) {
        if let Some(cmd) = command {
            if let Err(e) = cmd.execute(&mut self.state) {
                error!("{:#}", e);
                self.state.error_message = Some(e.to_string());
            }
        }
    }

    fn show_header(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(12.0);
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("🛡").size(32.0).color(theme::PRIMARY));
                ui.label(egui::RichText::new("AI Counterfeit Detector").size(32.0).strong().color(theme::PRIMARY));
            });
            ui.label(
                egui::RichText::new(
                    "Advanced AI-powered analysis to detect counterfeit products. \
                     Upload product details or paste a link to get started."
                ).color(theme::MUTED)
            );
            ui.add_space(16.0);
        });
    }

    fn show_tabs(&mut self, ui: &mut egui::Ui) {
        let mut command: Option<Box<dyn Command>> = None;

        // Tab selection using buttons
        ui.columns(2, |columns| {
            let tabs = [
                (InputTab::Url, "🔗 Product Link"),
                (InputTab::Manual, "📝 Manual Input"),
            ];
            for (column, (tab, label)) in columns.iter_mut().zip(tabs) {
                let selected = self.state.active_tab == tab;
                let button = egui::Button::new(label)
                    .fill(if selected { theme::PRIMARY } else { egui::Color32::TRANSPARENT })
                    .min_size(egui::vec2(column.available_width(), 32.0));
                if column.add(button).clicked() && !selected {
                    command = Some(Box::new(SwitchTabCommand(tab)));
                }
            }
        });
        ui.add_space(16.0);

        self.run(command);
    }

    fn show_main_card(&mut self, ui: &mut egui::Ui, now: Instant) {
        theme::card_frame(ui).inner_margin(egui::Margin::same(24.0)).show(ui, |ui| {
            ui.set_width(ui.available_width());

            if self.state.orchestrator.is_idle() {
                self.show_tabs(ui);
                let command = match self.state.active_tab {
                    InputTab::Url => url_input::show_url_input_view(ui, &mut self.state.url_form),
                    InputTab::Manual => manual_input::show_manual_input_view(ui, &mut self.state.manual_form),
                };
                self.run(command);
                return;
            }

            let command = match self.state.orchestrator.phase() {
                Phase::Idle => None,
                Phase::Analyzing(_) => {
                    let progress = self.state.orchestrator.progress(now).unwrap_or(0.0);
                    let elapsed = self.state.orchestrator.elapsed(now).unwrap_or_default();
                    loading::show_loading_view(ui, progress, elapsed)
                }
                Phase::Result(completed) => {
                    let source = completed.payload.describe();
                    result::show_result_view(ui, &completed.result, &source)
                }
            };

            self.run(command);
        });
    }
}

impl eframe::App for DetectorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.state.orchestrator.poll(now);

        // Decorative layer
        let time = ctx.input(|i| i.time);
        self.background.tick(time);
        self.background.paint(&ctx.layer_painter(egui::LayerId::background()), ctx.screen_rect(), time);

        egui::CentralPanel::default()
            .frame(egui::Frame::central_panel(&ctx.style()).fill(egui::Color32::TRANSPARENT))
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.set_max_width(900.0_f32.min(ui.available_width()));
                    self.show_header(ui);
                    self.show_main_card(ui, now);

                    ui.add_space(16.0);
                    ui.vertical_centered(|ui| {
                        ui.label(egui::RichText::new("🤖 Powered by Advanced AI Detection").small().color(theme::MUTED));
                    });
                });
            });

        // Show error modal if needed
        let error_msg = self.state.error_message.clone();
        if let Some(error) = error_msg {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&error);
                    if ui.button("OK").clicked() {
                        self.state.error_message = None;
                    }
                });
        }

        // Keep animating, and wake up exactly when a pending analysis is due
        if let Some(remaining) = self.state.orchestrator.time_until_due(Instant::now()) {
            ctx.request_repaint_after(remaining.min(BACKGROUND_FRAME));
        } else if self.background.is_active() {
            ctx.request_repaint_after(BACKGROUND_FRAME);
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.state.persisted());
    }
}

impl Drop for DetectorApp {
    fn drop(&mut self) {
        self.background.teardown();
        debug!("background torn down");
    }
}
