//! busybar demo application
//!
//! An egui window that drives the global loading coordinator with simulated
//! requests. The demo features:
//! - A thin progress strip that climbs while requests are in flight and fades out on completion
//! - Single and burst request buttons with adjustable latency (persisted between runs)
//! - A force-reset button for manual recovery
//!
//! The application is built with a modular architecture:
//! - `app/` - Frame state, per-frame coordination and settings persistence
//! - `io/` - Simulated request layer
//! - `ui/` - Panel rendering and interaction

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::time::Instant;

use anyhow::{Context, Result};
use busybar::{LoaderConfig, LoadingHandle};
use eframe::egui;
use tracing::{info, warn, Level};

mod app;
mod io;
mod ui;

use app::{AppState, ApplicationCoordinator, SettingsCoordinator};
use io::RequestSimulator;
use ui::panel_manager::PanelManager;

/// Initializes logging, the global coordinator, and launches the demo window.
fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = load_config();
    let loading = busybar::install(&config).context("failed to install loading coordinator")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 360.0])
            .with_title("busybar demo"),
        ..Default::default()
    };

    let fade_secs = config.fade_delay().as_secs_f32();
    eframe::run_native(
        "busybar demo",
        options,
        Box::new(move |cc| Ok(Box::new(BusybarDemoApp::new(cc, loading, fade_secs)))),
    )
    .map_err(|err| anyhow::anyhow!("demo window failed: {err}"))
}

/// Reads the optional config file, or the path given as the first argument.
fn load_config() -> LoaderConfig {
    let path = std::env::args()
        .nth(1)
        .map(std::path::PathBuf::from)
        .or_else(LoaderConfig::default_path);

    match path {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            LoaderConfig::load_or_default(&path)
        }
        None => {
            warn!("no config directory on this platform, using defaults");
            LoaderConfig::default()
        }
    }
}

struct BusybarDemoApp {
    /// Frame state
    state: AppState,
    /// Simulated HTTP layer
    simulator: RequestSimulator,
    /// Fade-out duration of the progress strip in seconds
    fade_secs: f32,
}

impl BusybarDemoApp {
    fn new(cc: &eframe::CreationContext, loading: LoadingHandle, fade_secs: f32) -> Self {
        let simulation = SettingsCoordinator::load_simulation(cc.storage);
        Self {
            simulator: RequestSimulator::new(loading.clone()),
            state: AppState::new(loading, simulation),
            fade_secs,
        }
    }
}

impl eframe::App for BusybarDemoApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        SettingsCoordinator::save_simulation(storage, &self.state.simulation);
    }

    /// Main update loop:
    /// 1. Fire due animation timers
    /// 2. Render all panels
    /// 3. Handle panel interactions
    /// 4. Schedule the next repaint while anything is animating
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ApplicationCoordinator::advance_loading(&mut self.state, Instant::now());

        if let Some(interaction) = PanelManager::render_all_panels(ctx, &mut self.state, self.fade_secs) {
            ApplicationCoordinator::handle_interaction(&mut self.state, &self.simulator, interaction, ctx);
        }

        if let Some(wait) = ApplicationCoordinator::next_repaint(&self.state, Instant::now()) {
            ctx.request_repaint_after(wait);
        }
    }
}
