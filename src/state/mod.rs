//! Loading state shared by the counter, the animator and observers.

mod loading_state;

pub use loading_state::{LoadingSnapshot, LoadingState, PROGRESS_COMPLETE};
