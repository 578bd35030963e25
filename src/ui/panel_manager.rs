//! Panel orchestration and layout management.
//!
//! Lays out the progress strip, header, status bar and the central snapshot view.

use crate::app::AppState;
use crate::ui::{header, progress_bar, status_bar};

/// Result of panel interactions that need to be handled by the application coordinator.
pub enum PanelInteraction {
    /// User requested one simulated request
    FireRequest,
    /// User requested a burst of overlapping requests
    FireBurst,
    /// User requested a manual reset
    ForceReset,
}

/// Manages the layout and rendering of all UI panels.
pub struct PanelManager;

impl PanelManager {
    /// Renders all panels in the application window.
    ///
    /// Called from the eframe::App::update() implementation.
    pub fn render_all_panels(
        ctx: &egui::Context,
        state: &mut AppState,
        fade_secs: f32,
    ) -> Option<PanelInteraction> {
        let mut interaction: Option<PanelInteraction> = None;

        // Progress strip glued to the top edge
        egui::TopBottomPanel::top("progress_strip")
            .exact_height(progress_bar::BAR_HEIGHT)
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                progress_bar::render_progress_bar(ui, &state.snapshot, fade_secs);
            });

        // Header panel below the strip
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            if let Some(header_interaction) = header::render_header(ui, state) {
                interaction = Some(match header_interaction {
                    header::HeaderInteraction::FireRequest => PanelInteraction::FireRequest,
                    header::HeaderInteraction::FireBurst => PanelInteraction::FireBurst,
                    header::HeaderInteraction::ForceReset => PanelInteraction::ForceReset,
                });
            }
        });

        // Status panel at the very bottom
        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            status_bar::render_status_bar(ui, state);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Loading state");
            ui.separator();

            egui::Grid::new("snapshot_grid").num_columns(2).show(ui, |ui| {
                ui.label("isLoading");
                ui.monospace(state.snapshot.is_loading.to_string());
                ui.end_row();

                ui.label("activeRequests");
                ui.monospace(state.snapshot.active_requests.to_string());
                ui.end_row();

                ui.label("progress");
                ui.monospace(format!("{:.1}", state.snapshot.progress));
                ui.end_row();
            });

            ui.add_space(8.0);
            ui.add(egui::ProgressBar::new(state.snapshot.fraction()).show_percentage());
        });

        interaction
    }
}
