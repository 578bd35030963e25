//! Application-level modules for the demo.
//!
//! This module contains the frame state, the per-frame coordinator and settings persistence.

mod app_state;
mod application_coordinator;
mod settings_coordinator;

pub use app_state::{AppState, SimulationSettings};
pub use application_coordinator::ApplicationCoordinator;
pub use settings_coordinator::SettingsCoordinator;
