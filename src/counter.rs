//! Counting of in-flight operations.
//!
//! A plain boolean is not enough: overlapping operations must keep the app busy
//! until the last one settles, not the first.

use tracing::debug;

use crate::state::{LoadingState, PROGRESS_COMPLETE};

/// Result of [`RequestCounter::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// The counter left idle; a new loading cycle began
    Started,
    /// Another operation joined a cycle already in progress
    Joined,
}

/// Result of [`RequestCounter::end`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndOutcome {
    /// The last outstanding operation settled
    Drained,
    /// Other operations are still in flight
    Pending,
    /// No operation was outstanding; the call was clamped away
    Unmatched,
}

/// Owns the [`LoadingState`] and performs the counting transitions on it.
#[derive(Debug, Clone)]
pub struct RequestCounter {
    state: LoadingState,
    initial_progress: f32,
}

impl RequestCounter {
    pub fn new(initial_progress: f32) -> Self {
        Self {
            state: LoadingState::new(),
            initial_progress,
        }
    }

    pub fn state(&self) -> &LoadingState {
        &self.state
    }

    /// Registers one more in-flight operation.
    pub fn start(&mut self) -> StartOutcome {
        let count = self.state.active_requests().saturating_add(1);
        self.state.set_active_requests(count);

        if count == 1 {
            self.state.begin_cycle();
            self.state.set_progress(self.initial_progress);
            debug!(cycle = self.state.cycle(), "loading cycle started");
            StartOutcome::Started
        } else {
            StartOutcome::Joined
        }
    }

    /// Settles one in-flight operation, floored at zero.
    pub fn end(&mut self) -> EndOutcome {
        match self.state.active_requests() {
            0 => {
                debug!("end() without outstanding request ignored");
                EndOutcome::Unmatched
            }
            1 => {
                self.state.set_active_requests(0);
                self.state.set_progress(PROGRESS_COMPLETE);
                debug!(cycle = self.state.cycle(), "all requests settled");
                EndOutcome::Drained
            }
            count => {
                self.state.set_active_requests(count - 1);
                EndOutcome::Pending
            }
        }
    }

    /// Returns to the idle zero state regardless of outstanding work.
    pub fn reset(&mut self) {
        self.state.set_active_requests(0);
        self.state.set_progress(0.0);
        debug!(cycle = self.state.cycle(), "loading state reset");
    }

    /// Moves progress forward; used by the animator only.
    pub(crate) fn set_progress(&mut self, progress: f32) {
        self.state.set_progress(progress);
    }
}

impl Default for RequestCounter {
    fn default() -> Self {
        Self::new(10.0)
    }
}
