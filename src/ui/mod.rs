//! UI rendering modules for the demo.
//!
//! - `panel_manager`: layout of all panels and the interaction result type
//! - `progress_bar`: the fading progress strip
//! - `header`: request buttons and simulation sliders
//! - `status_bar`: loading snapshot summary

pub mod panel_manager;
pub mod progress_bar;
pub mod header;
pub mod status_bar;
