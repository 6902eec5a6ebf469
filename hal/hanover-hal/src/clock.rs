//! Time source abstraction
//!
//! Anything that waits (the test-sequence helper, reconnect backoff) takes
//! a [`Clock`] so it can be driven by a fake clock in tests.

use core::time::Duration;

/// Monotonic clock with blocking sleep
pub trait Clock {
    /// Time elapsed since an arbitrary fixed origin
    fn now(&self) -> Duration;

    /// Block the calling thread for `duration`
    fn sleep(&mut self, duration: Duration);
}

impl<C: Clock + ?Sized> Clock for &mut C {
    fn now(&self) -> Duration {
        (**self).now()
    }

    fn sleep(&mut self, duration: Duration) {
        (**self).sleep(duration)
    }
}
