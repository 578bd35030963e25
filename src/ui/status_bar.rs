//! Status bar UI rendering
//!
//! Handles the bottom status bar displaying the loading snapshot.

use busybar::{AnimationPhase, LoadingSnapshot};
use eframe::egui;
use egui::RichText;
use crate::app::AppState;

/// One-line summary of the loading state.
pub fn status_text(snapshot: &LoadingSnapshot, phase: AnimationPhase) -> String {
    let phase = match phase {
        AnimationPhase::Idle => "Idle",
        AnimationPhase::Animating => "Animating",
        AnimationPhase::Completing => "Completing",
    };
    format!(
        "{} | In flight: {} | Progress: {:.0}%",
        phase, snapshot.active_requests, snapshot.progress
    )
}

/// Renders the status panel at the bottom of the window
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Reference to application state
pub fn render_status_bar(ui: &mut egui::Ui, state: &AppState) {
    ui.horizontal(|ui| {
        let text = RichText::new(status_text(&state.snapshot, state.phase)).strong();
        if state.snapshot.is_loading {
            ui.label(text.color(egui::Color32::YELLOW));
        } else {
            ui.label(text);
        }

        ui.label(RichText::new("|").strong());
        ui.label(format!("Fired: {}", state.requests_fired));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text() {
        let snapshot = LoadingSnapshot {
            is_loading: true,
            progress: 42.4,
            active_requests: 3,
        };
        assert_eq!(
            status_text(&snapshot, AnimationPhase::Animating),
            "Animating | In flight: 3 | Progress: 42%"
        );
    }
}
