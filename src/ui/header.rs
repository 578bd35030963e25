//! Header panel UI rendering
//!
//! Request buttons and the simulation sliders.

use eframe::egui;
use crate::app::AppState;

/// Result of user interaction with the header panel
pub enum HeaderInteraction {
    /// User clicked "Request"
    FireRequest,
    /// User clicked "Burst"
    FireBurst,
    /// User clicked "Force Reset"
    ForceReset,
}

/// Renders the header with request controls and latency sliders
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Mutable reference to application state (sliders edit the simulation settings)
///
/// # Returns
/// * `Option<HeaderInteraction>` - User interaction result
pub fn render_header(ui: &mut egui::Ui, state: &mut AppState) -> Option<HeaderInteraction> {
    let mut interaction = None;

    ui.horizontal(|ui| {
        if ui.button("▶ Request").clicked() {
            interaction = Some(HeaderInteraction::FireRequest);
        }

        let burst_label = format!("⏩ Burst ×{}", state.simulation.burst_size);
        if ui.button(burst_label).clicked() {
            interaction = Some(HeaderInteraction::FireBurst);
        }

        ui.separator();

        let reset_response = ui.button("⟲ Force Reset");
        if reset_response.clicked() {
            interaction = Some(HeaderInteraction::ForceReset);
        }
        reset_response.on_hover_text("Drop all in-flight requests and return to idle");
    });

    ui.horizontal(|ui| {
        ui.add(
            egui::Slider::new(&mut state.simulation.min_latency_ms, 0..=10_000)
                .text("min latency (ms)"),
        );
        ui.add(
            egui::Slider::new(&mut state.simulation.max_latency_ms, 0..=10_000)
                .text("max latency (ms)"),
        );
        ui.add(egui::Slider::new(&mut state.simulation.burst_size, 1..=20).text("burst size"));
    });

    interaction
}
