// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Sources of the current time, used to date new posts.

use chrono::{DateTime, Utc};

/// A source of the current time.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// A [`Clock`] that reads the system time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(any(test, feature = "test"))]
pub use self::test_clock::TestClock;

#[cfg(any(test, feature = "test"))]
mod test_clock {
    use std::sync::{Mutex, PoisonError};

    use chrono::{DateTime, Duration, Utc};

    use super::Clock;

    /// A [`Clock`] that only moves when told to.
    #[derive(Debug)]
    pub struct TestClock {
        time: Mutex<DateTime<Utc>>,
    }

    impl TestClock {
        /// Creates a [`TestClock`] stopped at `time`.
        pub fn new(time: DateTime<Utc>) -> Self {
            TestClock {
                time: Mutex::new(time),
            }
        }

        /// Moves the clock to `time`.
        pub fn set(&self, time: DateTime<Utc>) {
            *self.time.lock().unwrap_or_else(PoisonError::into_inner) = time;
        }

        /// Moves the clock forward by `duration`.
        pub fn advance(&self, duration: Duration) {
            *self.time.lock().unwrap_or_else(PoisonError::into_inner) += duration;
        }
    }

    impl Default for TestClock {
        fn default() -> Self {
            TestClock::new(DateTime::<Utc>::UNIX_EPOCH)
        }
    }

    impl Clock for TestClock {
        fn now(&self) -> DateTime<Utc> {
            *self.time.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }
}
