//! Background thread that keeps the animator's clock running.
//!
//! Frame-driven hosts (the egui demo) call `advance` themselves every frame.
//! Hosts without a frame loop spawn an [`AnimationDriver`] instead.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::coordinator::LoadingHandle;

/// Shortest polling period; anything below would spin on the coordinator lock.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

pub struct AnimationDriver {
    stop: Arc<AtomicBool>,
    poll_interval: Duration,
    thread: Option<JoinHandle<()>>,
}

impl AnimationDriver {
    /// Spawns a thread calling `handle.advance(Instant::now())` every `poll_interval`,
    /// raised to at least [`MIN_POLL_INTERVAL`].
    pub fn spawn(handle: LoadingHandle, poll_interval: Duration) -> Self {
        let poll_interval = poll_interval.max(MIN_POLL_INTERVAL);
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        let thread = thread::spawn(move || {
            debug!(?poll_interval, "animation driver started");
            while !stop_flag.load(Ordering::Acquire) {
                handle.advance(Instant::now());
                thread::sleep(poll_interval);
            }
            debug!("animation driver stopped");
        });

        Self {
            stop,
            poll_interval,
            thread: Some(thread),
        }
    }

    /// Effective polling period of the thread.
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Stops the thread and waits for it to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for AnimationDriver {
    fn drop(&mut self) {
        self.shutdown();
    }
}
