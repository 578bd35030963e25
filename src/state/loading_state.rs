//! Shared loading state and the read-only snapshot handed to observers.

use serde::Serialize;

/// Progress value that signals a finished cycle.
pub const PROGRESS_COMPLETE: f32 = 100.0;

/// The single mutable loading state of the client.
///
/// Only [`RequestCounter`](crate::RequestCounter) and
/// [`ProgressAnimator`](crate::ProgressAnimator) write to it; fields are private so
/// `is_loading` can never drift away from `active_requests > 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadingState {
    active_requests: u32,
    progress: f32,
    is_loading: bool,
    cycle: u64,
}

impl LoadingState {
    /// Creates an idle state: no requests, zero progress.
    pub fn new() -> Self {
        Self {
            active_requests: 0,
            progress: 0.0,
            is_loading: false,
            cycle: 0,
        }
    }

    pub fn active_requests(&self) -> u32 {
        self.active_requests
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Generation of the current (or most recent) loading cycle.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn snapshot(&self) -> LoadingSnapshot {
        LoadingSnapshot {
            is_loading: self.is_loading,
            progress: self.progress,
            active_requests: self.active_requests,
        }
    }

    pub(crate) fn set_active_requests(&mut self, count: u32) {
        self.active_requests = count;
        self.is_loading = count > 0;
    }

    pub(crate) fn set_progress(&mut self, progress: f32) {
        self.progress = progress.clamp(0.0, PROGRESS_COMPLETE);
    }

    pub(crate) fn begin_cycle(&mut self) {
        self.cycle = self.cycle.wrapping_add(1);
    }
}

impl Default for LoadingState {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable view of [`LoadingState`] for renderers and subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadingSnapshot {
    pub is_loading: bool,
    pub progress: f32,
    pub active_requests: u32,
}

impl LoadingSnapshot {
    /// Progress as a fraction in `[0, 1]`, the unit most widgets expect.
    pub fn fraction(&self) -> f32 {
        self.progress / PROGRESS_COMPLETE
    }
}
