use std::thread;
use std::time::Duration;

/// Suspends the frame loop between iterations.
///
/// A zero delay means "run the next iteration as soon as possible" and is
/// used for re-polling a source that had no frame.
pub trait Scheduler: Send {
    fn wait(&mut self, delay: Duration);
}

/// Shortest sleep used for a zero-delay re-poll, close to one display
/// refresh at 240 Hz.
pub const DEFAULT_POLL_FLOOR: Duration = Duration::from_millis(4);

/// Real-time scheduler backed by the current thread.
///
/// Zero delays sleep for `poll_floor` so a source that never delivers does
/// not keep a core busy.
#[derive(Debug)]
pub struct ThreadScheduler {
    poll_floor: Duration,
}

impl ThreadScheduler {
    pub fn new(poll_floor: Duration) -> Self {
        Self { poll_floor }
    }
}

impl Default for ThreadScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_FLOOR)
    }
}

impl Scheduler for ThreadScheduler {
    fn wait(&mut self, delay: Duration) {
        let delay = delay.max(self.poll_floor);
        if delay.is_zero() {
            thread::yield_now();
        } else {
            thread::sleep(delay);
        }
    }
}
