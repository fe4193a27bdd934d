use chrono::{Days, NaiveDate};
use std::sync::{Mutex, MutexGuard};

use crate::ports::clock::Clock;

/// Mock implementation of Clock
///
/// Always returns the stored date. Tests can move it forward to simulate
/// the passing of days.
pub struct FixedClock {
    today: Mutex<NaiveDate>,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: Mutex::new(today),
        }
    }

    /// Replace the current date
    pub fn set(&self, today: NaiveDate) {
        *self.lock() = today;
    }

    /// Move the current date forward by `days`
    pub fn advance(&self, days: u64) {
        let mut today = self.lock();
        if let Some(next) = today.checked_add_days(Days::new(days)) {
            *today = next;
        }
    }

    fn lock(&self) -> MutexGuard<'_, NaiveDate> {
        self.today.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.lock()
    }
}
