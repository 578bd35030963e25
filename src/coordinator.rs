//! The loading coordinator service.
//!
//! [`LoadingCoordinator`] composes the request counter and the progress animator
//! and notifies subscribers after every visible change. [`LoadingHandle`] shares one
//! coordinator between the HTTP hook points and the view.

use std::sync::mpsc::{sync_channel, Receiver, SyncSender, TrySendError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use rand::rngs::StdRng;
use rand::Rng;
use tracing::info;

use crate::animator::{AnimationPhase, ProgressAnimator};
use crate::config::LoaderConfig;
use crate::counter::{EndOutcome, RequestCounter, StartOutcome};
use crate::state::LoadingSnapshot;

/// Snapshots buffered per subscriber before newer ones are dropped.
pub const SUBSCRIBER_BUFFER: usize = 16;

pub struct LoadingCoordinator<R = StdRng> {
    counter: RequestCounter,
    animator: ProgressAnimator<R>,
    subscribers: Vec<SyncSender<LoadingSnapshot>>,
}

impl LoadingCoordinator<StdRng> {
    /// Invalid config values are replaced, see [`LoaderConfig::sanitized`].
    pub fn new(config: &LoaderConfig) -> Self {
        let config = config.sanitized();
        Self {
            counter: RequestCounter::new(config.initial_progress),
            animator: ProgressAnimator::new(&config),
            subscribers: Vec::new(),
        }
    }
}

impl<R: Rng> LoadingCoordinator<R> {
    /// Creates a coordinator with an explicit random source, e.g. a seeded one in tests.
    pub fn with_rng(config: &LoaderConfig, rng: R) -> Self {
        let config = config.sanitized();
        Self {
            counter: RequestCounter::new(config.initial_progress),
            animator: ProgressAnimator::with_rng(&config, rng),
            subscribers: Vec::new(),
        }
    }

    /// Hook for an outgoing operation.
    pub fn start(&mut self, now: Instant) -> StartOutcome {
        let outcome = self.counter.start();
        if outcome == StartOutcome::Started {
            self.animator.start_ticking(now);
        }
        self.notify();
        outcome
    }

    /// Hook for a settled operation, successful or not.
    pub fn end(&mut self, now: Instant) -> EndOutcome {
        let outcome = self.counter.end();
        match outcome {
            EndOutcome::Drained => {
                self.animator.complete(&mut self.counter, now);
                self.notify();
            }
            EndOutcome::Pending => self.notify(),
            EndOutcome::Unmatched => {}
        }
        outcome
    }

    /// Forces the idle state and cancels the tick. Pending fade resets become no-ops.
    pub fn reset(&mut self) {
        info!(
            active_requests = self.counter.state().active_requests(),
            "forcing loading state reset"
        );
        self.animator.stop_ticking();
        self.counter.reset();
        self.notify();
    }

    /// Runs every timer due at `now`.
    pub fn advance(&mut self, now: Instant) {
        if self.animator.advance(&mut self.counter, now) {
            self.notify();
        }
    }

    pub fn snapshot(&self) -> LoadingSnapshot {
        self.counter.state().snapshot()
    }

    pub fn phase(&self) -> AnimationPhase {
        self.animator.phase()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.animator.next_deadline()
    }

    /// Subscribes to snapshots. The current snapshot is delivered right away.
    ///
    /// Each receiver buffers at most [`SUBSCRIBER_BUFFER`] snapshots; while it is
    /// full, newer snapshots are dropped for that receiver. Read
    /// [`snapshot`](Self::snapshot) for the latest state after draining.
    pub fn subscribe(&mut self) -> Receiver<LoadingSnapshot> {
        let (sender, receiver) = sync_channel(SUBSCRIBER_BUFFER);
        let _ = sender.try_send(self.snapshot());
        self.subscribers.push(sender);
        receiver
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn notify(&mut self) {
        let snapshot = self.snapshot();
        self.subscribers
            .retain(|sender| !matches!(sender.try_send(snapshot), Err(TrySendError::Disconnected(_))));
    }
}

/// Cloneable, thread-safe access to one shared [`LoadingCoordinator`].
///
/// Each call is a single step under the lock, so observers never see a half
/// applied transition.
#[derive(Clone)]
pub struct LoadingHandle {
    inner: Arc<Mutex<LoadingCoordinator>>,
}

impl LoadingHandle {
    pub fn new(config: &LoaderConfig) -> Self {
        Self::from_coordinator(LoadingCoordinator::new(config))
    }

    pub fn from_coordinator(coordinator: LoadingCoordinator) -> Self {
        Self {
            inner: Arc::new(Mutex::new(coordinator)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LoadingCoordinator> {
        // Every transition is a single assignment step, so a panicking holder
        // cannot leave the state half updated.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn start(&self) -> StartOutcome {
        self.lock().start(Instant::now())
    }

    pub fn end(&self) -> EndOutcome {
        self.lock().end(Instant::now())
    }

    pub fn reset(&self) {
        self.lock().reset();
    }

    pub fn advance(&self, now: Instant) {
        self.lock().advance(now);
    }

    pub fn snapshot(&self) -> LoadingSnapshot {
        self.lock().snapshot()
    }

    pub fn phase(&self) -> AnimationPhase {
        self.lock().phase()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.lock().next_deadline()
    }

    pub fn subscribe(&self) -> Receiver<LoadingSnapshot> {
        self.lock().subscribe()
    }

    /// Starts tracking one operation; it settles when the guard is dropped.
    pub fn track(&self) -> RequestGuard {
        self.start();
        RequestGuard {
            handle: Some(self.clone()),
        }
    }
}

/// Keeps one operation in flight for as long as it lives.
#[must_use = "the request settles as soon as the guard is dropped"]
pub struct RequestGuard {
    handle: Option<LoadingHandle>,
}

impl RequestGuard {
    /// Settles the operation now instead of at drop.
    pub fn finish(mut self) -> EndOutcome {
        match self.handle.take() {
            Some(handle) => handle.end(),
            None => EndOutcome::Unmatched,
        }
    }
}

impl Drop for RequestGuard {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.end();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::time::Duration;

    fn coordinator() -> LoadingCoordinator<StdRng> {
        LoadingCoordinator::with_rng(&LoaderConfig::default(), StdRng::seed_from_u64(11))
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_start_arms_animation() {
        let t0 = Instant::now();
        let mut coordinator = coordinator();

        assert_eq!(coordinator.start(t0), StartOutcome::Started);
        assert_eq!(coordinator.phase(), AnimationPhase::Animating);
        assert_eq!(coordinator.snapshot().progress, 10.0);
    }

    #[test]
    fn test_joined_start_does_not_restart_tick() {
        let t0 = Instant::now();
        let mut coordinator = coordinator();

        coordinator.start(t0);
        coordinator.start(t0 + ms(300));
        assert_eq!(coordinator.next_deadline(), Some(t0 + ms(500)));
    }

    #[test]
    fn test_full_cycle() {
        let t0 = Instant::now();
        let mut coordinator = coordinator();

        coordinator.start(t0);
        coordinator.advance(t0 + ms(1500));
        let climbing = coordinator.snapshot().progress;
        assert!(climbing > 10.0 && climbing <= 90.0);

        assert_eq!(coordinator.end(t0 + ms(1600)), EndOutcome::Drained);
        let snapshot = coordinator.snapshot();
        assert_eq!(snapshot.progress, 100.0);
        assert!(!snapshot.is_loading);
        assert_eq!(coordinator.phase(), AnimationPhase::Completing);

        coordinator.advance(t0 + ms(2100));
        assert_eq!(
            coordinator.snapshot(),
            LoadingSnapshot { is_loading: false, progress: 0.0, active_requests: 0 }
        );
        assert_eq!(coordinator.phase(), AnimationPhase::Idle);
    }

    #[test]
    fn test_forced_reset_cancels_tick() {
        let t0 = Instant::now();
        let mut coordinator = coordinator();

        coordinator.start(t0);
        coordinator.start(t0);
        coordinator.reset();
        assert_eq!(coordinator.phase(), AnimationPhase::Idle);

        coordinator.advance(t0 + ms(5000));
        assert_eq!(coordinator.snapshot().progress, 0.0);
        assert_eq!(coordinator.snapshot().active_requests, 0);
    }

    #[test]
    fn test_subscribers_see_changes() {
        let t0 = Instant::now();
        let mut coordinator = coordinator();
        let receiver = coordinator.subscribe();

        coordinator.start(t0);
        coordinator.end(t0 + ms(10));

        let seen: Vec<LoadingSnapshot> = receiver.try_iter().collect();
        assert_eq!(seen.len(), 3);
        assert!(!seen[0].is_loading);
        assert!(seen[1].is_loading);
        assert_eq!(seen[1].progress, 10.0);
        assert_eq!(seen[2].progress, 100.0);
    }

    #[test]
    fn test_unmatched_end_is_silent() {
        let mut coordinator = coordinator();
        let receiver = coordinator.subscribe();
        receiver.try_iter().for_each(drop);

        assert_eq!(coordinator.end(Instant::now()), EndOutcome::Unmatched);
        assert_eq!(receiver.try_iter().count(), 0);
        assert_eq!(coordinator.phase(), AnimationPhase::Idle);
    }

    #[test]
    fn test_dropped_subscribers_are_pruned() {
        let mut coordinator = coordinator();
        let kept = coordinator.subscribe();
        drop(coordinator.subscribe());
        assert_eq!(coordinator.subscriber_count(), 2);

        coordinator.start(Instant::now());
        assert_eq!(coordinator.subscriber_count(), 1);
        assert!(kept.try_iter().count() >= 2);
    }

    #[test]
    fn test_undrained_subscriber_is_bounded() {
        let t0 = Instant::now();
        let mut coordinator = coordinator();
        let receiver = coordinator.subscribe();

        coordinator.start(t0);
        for step in 1..=100 {
            coordinator.start(t0 + ms(step));
            coordinator.end(t0 + ms(step));
        }

        assert_eq!(coordinator.subscriber_count(), 1);
        assert_eq!(receiver.try_iter().count(), SUBSCRIBER_BUFFER);

        coordinator.end(t0 + ms(200));
        assert_eq!(receiver.try_iter().last().map(|s| s.progress), Some(100.0));
    }

    #[test]
    fn test_zero_interval_handle_stays_responsive() {
        let config = LoaderConfig {
            tick_interval_ms: 0,
            ..LoaderConfig::default()
        };
        let handle = LoadingHandle::new(&config);
        handle.start();

        let (done_tx, done_rx) = std::sync::mpsc::channel();
        let worker = handle.clone();
        std::thread::spawn(move || {
            worker.advance(Instant::now() + ms(1));
            let _ = done_tx.send(());
        });

        assert!(done_rx.recv_timeout(Duration::from_secs(3)).is_ok());
        assert!(handle.snapshot().is_loading);
    }

    #[test]
    fn test_zero_increment_config_does_not_panic() {
        let config = LoaderConfig {
            max_increment: 0.0,
            ..LoaderConfig::default()
        };
        let t0 = Instant::now();
        let mut coordinator = LoadingCoordinator::with_rng(&config, StdRng::seed_from_u64(4));

        coordinator.start(t0);
        coordinator.advance(t0 + ms(2_000));
        assert!(coordinator.snapshot().progress > 10.0);
    }

    #[test]
    fn test_guard_settles_on_drop() {
        let handle = LoadingHandle::new(&LoaderConfig::default());
        {
            let _first = handle.track();
            let _second = handle.track();
            assert_eq!(handle.snapshot().active_requests, 2);
        }
        let snapshot = handle.snapshot();
        assert_eq!(snapshot.active_requests, 0);
        assert_eq!(snapshot.progress, 100.0);
    }

    #[test]
    fn test_guard_finish_settles_once() {
        let handle = LoadingHandle::new(&LoaderConfig::default());
        let _outer = handle.track();
        let inner = handle.track();

        assert_eq!(inner.finish(), EndOutcome::Pending);
        assert_eq!(handle.snapshot().active_requests, 1);
    }

    #[test]
    fn test_handle_is_shared_across_threads() {
        let handle = LoadingHandle::new(&LoaderConfig::default());
        let workers: Vec<_> = (0..8)
            .map(|_| {
                let handle = handle.clone();
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        let _guard = handle.track();
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        let snapshot = handle.snapshot();
        assert_eq!(snapshot.active_requests, 0);
        assert!(!snapshot.is_loading);
    }
}
