//! Simulated network requests.
//!
//! Stands in for the HTTP layer: every request runs on its own background thread
//! and holds a [`RequestGuard`](busybar::RequestGuard) for its whole lifetime, the
//! way a real interceptor would bracket a call.

use std::thread;
use std::time::Duration;

use busybar::LoadingHandle;
use eframe::egui;
use rand::Rng;
use tracing::debug;

use crate::app::SimulationSettings;

/// Fires fake requests against a shared loading coordinator.
pub struct RequestSimulator {
    loading: LoadingHandle,
}

impl RequestSimulator {
    pub fn new(loading: LoadingHandle) -> Self {
        Self { loading }
    }

    /// Starts one request with a random latency from `settings`.
    ///
    /// The request is registered before this returns, so the bar reacts on the
    /// very next frame.
    pub fn fire(&self, settings: &SimulationSettings, ctx: &egui::Context) {
        let (low, high) = settings.latency_bounds();
        let latency = Duration::from_millis(rand::thread_rng().gen_range(low..=high));
        self.fire_with_latency(latency, ctx);
    }

    /// Starts `settings.burst_size` overlapping requests.
    pub fn fire_burst(&self, settings: &SimulationSettings, ctx: &egui::Context) -> u32 {
        for _ in 0..settings.burst_size {
            self.fire(settings, ctx);
        }
        settings.burst_size
    }

    fn fire_with_latency(&self, latency: Duration, ctx: &egui::Context) {
        let guard = self.loading.track();
        let ctx_handle = ctx.clone();

        thread::spawn(move || {
            thread::sleep(latency);
            let outcome = guard.finish();
            debug!(?latency, ?outcome, "simulated request settled");

            // Notify GUI thread to repaint
            ctx_handle.request_repaint();
        });
    }
}
