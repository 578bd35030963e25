//! Application-level coordination for the demo.
//!
//! Drives the loading clock once per frame and turns header interactions into
//! calls on the simulated request layer or the coordinator.

use std::time::{Duration, Instant};

use tracing::info;

use crate::app::AppState;
use crate::io::RequestSimulator;
use crate::ui::panel_manager::PanelInteraction;

/// Longest time between repaints while anything is animating.
const MAX_REPAINT_INTERVAL: Duration = Duration::from_millis(100);

pub struct ApplicationCoordinator;

impl ApplicationCoordinator {
    /// Fires due animation timers and refreshes the frame snapshot.
    pub fn advance_loading(state: &mut AppState, now: Instant) {
        state.loading.advance(now);
        state.refresh();
    }

    /// How long the UI may sleep before the next timer is due, or `None` when the
    /// coordinator is idle and nothing needs a repaint.
    pub fn next_repaint(state: &AppState, now: Instant) -> Option<Duration> {
        state
            .loading
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now).min(MAX_REPAINT_INTERVAL))
    }

    pub fn handle_interaction(
        state: &mut AppState,
        simulator: &RequestSimulator,
        interaction: PanelInteraction,
        ctx: &egui::Context,
    ) {
        match interaction {
            PanelInteraction::FireRequest => {
                simulator.fire(&state.simulation, ctx);
                state.requests_fired += 1;
            }
            PanelInteraction::FireBurst => {
                let fired = simulator.fire_burst(&state.simulation, ctx);
                state.requests_fired += u64::from(fired);
            }
            PanelInteraction::ForceReset => {
                info!("manual reset requested from the demo");
                state.loading.reset();
            }
        }
        state.refresh();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::SimulationSettings;
    use busybar::{AnimationPhase, LoaderConfig, LoadingHandle};

    fn state() -> AppState {
        AppState::new(
            LoadingHandle::new(&LoaderConfig::default()),
            SimulationSettings {
                min_latency_ms: 5_000,
                max_latency_ms: 5_000,
                burst_size: 3,
            },
        )
    }

    #[test]
    fn test_idle_needs_no_repaint() {
        let mut state = state();
        let now = Instant::now();
        ApplicationCoordinator::advance_loading(&mut state, now);
        assert_eq!(ApplicationCoordinator::next_repaint(&state, now), None);
    }

    #[test]
    fn test_animating_repaint_is_capped() {
        let mut state = state();
        state.loading.start();

        let now = Instant::now();
        ApplicationCoordinator::advance_loading(&mut state, now);
        let wait = ApplicationCoordinator::next_repaint(&state, now);
        assert!(matches!(wait, Some(d) if d <= MAX_REPAINT_INTERVAL));
        assert_eq!(state.phase, AnimationPhase::Animating);
    }

    #[test]
    fn test_interactions() {
        let mut state = state();
        let simulator = RequestSimulator::new(state.loading.clone());
        let ctx = egui::Context::default();

        ApplicationCoordinator::handle_interaction(&mut state, &simulator, PanelInteraction::FireBurst, &ctx);
        ApplicationCoordinator::handle_interaction(&mut state, &simulator, PanelInteraction::FireRequest, &ctx);
        assert_eq!(state.requests_fired, 4);
        assert_eq!(state.snapshot.active_requests, 4);

        ApplicationCoordinator::handle_interaction(&mut state, &simulator, PanelInteraction::ForceReset, &ctx);
        assert_eq!(state.snapshot.active_requests, 0);
        assert_eq!(state.snapshot.progress, 0.0);
        assert_eq!(state.phase, AnimationPhase::Idle);
    }
}
