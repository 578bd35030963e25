//! State of the demo application.

use busybar::{AnimationPhase, LoadingHandle, LoadingSnapshot};
use serde::{Deserialize, Serialize};

/// Latency range and burst size used by the simulated request layer.
///
/// Persisted between runs through eframe storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    pub min_latency_ms: u64,
    pub max_latency_ms: u64,
    pub burst_size: u32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            min_latency_ms: 300,
            max_latency_ms: 3000,
            burst_size: 5,
        }
    }
}

impl SimulationSettings {
    /// Latency bounds ordered as `(low, high)` even if the sliders crossed.
    pub fn latency_bounds(&self) -> (u64, u64) {
        if self.min_latency_ms <= self.max_latency_ms {
            (self.min_latency_ms, self.max_latency_ms)
        } else {
            (self.max_latency_ms, self.min_latency_ms)
        }
    }
}

/// Everything one frame of the demo needs.
pub struct AppState {
    /// Shared coordinator, the same one the simulated requests report to
    pub loading: LoadingHandle,

    /// Snapshot taken at the start of the current frame
    pub snapshot: LoadingSnapshot,

    /// Animator phase at the start of the current frame
    pub phase: AnimationPhase,

    /// Simulation knobs edited in the header
    pub simulation: SimulationSettings,

    /// Total simulated requests fired since startup
    pub requests_fired: u64,
}

impl AppState {
    pub fn new(loading: LoadingHandle, simulation: SimulationSettings) -> Self {
        let snapshot = loading.snapshot();
        let phase = loading.phase();
        Self {
            loading,
            snapshot,
            phase,
            simulation,
            requests_fired: 0,
        }
    }

    /// Pulls the current loading state into the frame.
    pub fn refresh(&mut self) {
        self.snapshot = self.loading.snapshot();
        self.phase = self.loading.phase();
    }
}
