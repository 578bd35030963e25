//! Persistence of demo settings.
//!
//! Settings are stored as JSON strings in eframe's key/value storage.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::app::SimulationSettings;

const SIMULATION_KEY: &str = "simulation_settings";

/// Loads and saves demo settings.
pub struct SettingsCoordinator;

impl SettingsCoordinator {
    /// Loads the simulation settings, or defaults if none are stored.
    pub fn load_simulation(storage: Option<&dyn eframe::Storage>) -> SimulationSettings {
        Self::load_setting_or(storage, SIMULATION_KEY, SimulationSettings::default())
    }

    pub fn save_simulation(storage: &mut dyn eframe::Storage, settings: &SimulationSettings) {
        Self::save_setting(storage, SIMULATION_KEY, settings);
    }

    /// Loads a setting from persistent storage with a custom default.
    ///
    /// Unparseable values fall back to `default` instead of failing startup.
    fn load_setting_or<T>(storage: Option<&dyn eframe::Storage>, key: &str, default: T) -> T
    where
        T: for<'de> Deserialize<'de>,
    {
        let Some(json_str) = storage.and_then(|s| s.get_string(key)) else {
            return default;
        };
        match serde_json::from_str(&json_str) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, error = %err, "discarding stored setting");
                default
            }
        }
    }

    fn save_setting<T>(storage: &mut dyn eframe::Storage, key: &str, value: &T)
    where
        T: Serialize,
    {
        match serde_json::to_string(value) {
            Ok(json_str) => {
                storage.set_string(key, json_str);
                storage.flush();
            }
            Err(err) => warn!(key, error = %err, "failed to serialize setting"),
        }
    }
}
