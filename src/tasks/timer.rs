//! Repeating Timer
//!
//! Runs an async callback at a fixed interval until cancelled.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Shortest interval a timer runs at; shorter requests are raised to it.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Cancellation handle for a repeating timer.
#[derive(Debug)]
pub struct TimerHandle {
    handle: JoinHandle<()>,
}

impl TimerHandle {
    /// Stops the timer. The callback is not invoked again.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Spawns a task that sleeps for `interval` and then runs `tick`, forever.
///
/// The first tick happens one interval after spawning. Intervals below
/// [`MIN_INTERVAL`] are clamped to it.
pub fn spawn_repeating<F, Fut>(interval: Duration, mut tick: F) -> TimerHandle
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let interval = interval.max(MIN_INTERVAL);
    let handle = tokio::spawn(async move {
        loop {
            tokio::time::sleep(interval).await;
            tick().await;
        }
    });

    TimerHandle { handle }
}
