//! Simulated progress animation.
//!
//! The animator has no idea how far real requests have come. While anything is in
//! flight it nudges progress upward by random steps that stop at a ceiling below
//! 100; only a drained [`RequestCounter`] may complete the bar.
//!
//! Timers are deadlines on a caller supplied clock. The host calls
//! [`ProgressAnimator::advance`] from its event loop and every due timer fires in
//! deadline order.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::LoaderConfig;
use crate::counter::RequestCounter;
use crate::state::PROGRESS_COMPLETE;

/// Observable state of the animator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationPhase {
    /// No timer armed
    Idle,
    /// Periodic tick armed
    Animating,
    /// Bar held at 100%, waiting for the delayed reset
    Completing,
}

/// A delayed reset. Not cancellable: it re-checks the counter when it fires.
#[derive(Debug, Clone, Copy)]
struct PendingReset {
    deadline: Instant,
    cycle: u64,
}

pub struct ProgressAnimator<R = StdRng> {
    tick_interval: Duration,
    fade_delay: Duration,
    ceiling: f32,
    max_increment: f32,
    rng: R,
    /// Next tick deadline; a single slot so two ticks can never run at once
    next_tick: Option<Instant>,
    pending_resets: Vec<PendingReset>,
}

impl ProgressAnimator<StdRng> {
    pub fn new(config: &LoaderConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> ProgressAnimator<R> {
    /// Invalid config values are replaced, see [`LoaderConfig::sanitized`].
    pub fn with_rng(config: &LoaderConfig, rng: R) -> Self {
        let config = config.sanitized();
        Self {
            tick_interval: config.tick_interval(),
            fade_delay: config.fade_delay(),
            ceiling: config.progress_ceiling,
            max_increment: config.max_increment,
            rng,
            next_tick: None,
            pending_resets: Vec::new(),
        }
    }

    pub fn phase(&self) -> AnimationPhase {
        if self.next_tick.is_some() {
            AnimationPhase::Animating
        } else if !self.pending_resets.is_empty() {
            AnimationPhase::Completing
        } else {
            AnimationPhase::Idle
        }
    }

    /// Earliest armed deadline, so hosts know when to wake up next.
    pub fn next_deadline(&self) -> Option<Instant> {
        let next_reset = self.pending_resets.iter().map(|r| r.deadline).min();
        match (self.next_tick, next_reset) {
            (Some(tick), Some(reset)) => Some(tick.min(reset)),
            (tick, reset) => tick.or(reset),
        }
    }

    /// Arms the periodic tick one interval from `now`, replacing any armed tick.
    pub fn start_ticking(&mut self, now: Instant) {
        self.next_tick = Some(now + self.tick_interval);
    }

    pub fn stop_ticking(&mut self) {
        self.next_tick = None;
    }

    /// One animation step. Does nothing unless loading and below the ceiling.
    pub fn tick(&mut self, counter: &mut RequestCounter) {
        let state = counter.state();
        if !state.is_loading() || state.progress() >= self.ceiling {
            return;
        }

        // gen_range is half-open at the top; flip it to draw from (0, max_increment].
        let increment = self.max_increment - self.rng.gen_range(0.0..self.max_increment);
        let next = (state.progress() + increment).min(self.ceiling);
        counter.set_progress(next);
    }

    /// Cancels the tick, holds the bar at 100% and schedules the fade-out reset.
    pub fn complete(&mut self, counter: &mut RequestCounter, now: Instant) {
        self.stop_ticking();
        counter.set_progress(PROGRESS_COMPLETE);
        self.pending_resets.push(PendingReset {
            deadline: now + self.fade_delay,
            cycle: counter.state().cycle(),
        });
    }

    /// Fires every timer due at or before `now`. Returns true if any state changed.
    pub fn advance(&mut self, counter: &mut RequestCounter, now: Instant) -> bool {
        let before = counter.state().clone();

        loop {
            let next_reset = self
                .pending_resets
                .iter()
                .enumerate()
                .filter(|(_, r)| r.deadline <= now)
                .min_by_key(|(_, r)| r.deadline)
                .map(|(index, r)| (index, r.deadline));
            let due_tick = self.next_tick.filter(|deadline| *deadline <= now);

            match (due_tick, next_reset) {
                (Some(tick), reset) if reset.map_or(true, |(_, deadline)| tick <= deadline) => {
                    self.tick(counter);
                    self.next_tick = Some(tick + self.tick_interval);
                }
                (_, Some((index, _))) => {
                    let reset = self.pending_resets.swap_remove(index);
                    self.fire_reset(counter, reset);
                }
                (_, None) => break,
            }
        }

        counter.state() != &before
    }

    fn fire_reset(&mut self, counter: &mut RequestCounter, reset: PendingReset) {
        let state = counter.state();
        if state.is_loading() || state.cycle() != reset.cycle {
            debug!(
                scheduled_cycle = reset.cycle,
                current_cycle = state.cycle(),
                "stale fade reset skipped"
            );
            return;
        }
        self.stop_ticking();
        counter.reset();
    }
}
