use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};

/// Time source for the scheduler.
pub trait Clock {
    /// Current wall-clock time.
    fn now(&self) -> DateTime<Utc>;

    /// Suspend the scheduler for `duration`.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}

/// Real time: `Utc::now` and `tokio::time::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        tokio::time::sleep(duration)
    }
}
