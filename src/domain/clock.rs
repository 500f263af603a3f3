//! Source of "today" for every date-dependent rule.
//!
//! Overdue detection, fine accrual and return stamping all read the current
//! date through this seam so tests can pin it.

use chrono::{Days, Local, NaiveDate};
use std::sync::RwLock;

pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall-clock local date
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Settable clock for tests and demos
#[derive(Debug)]
pub struct ManualClock {
    today: RwLock<NaiveDate>,
}

impl ManualClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: RwLock::new(today),
        }
    }

    pub fn set(&self, date: NaiveDate) {
        match self.today.write() {
            Ok(mut guard) => *guard = date,
            Err(poisoned) => *poisoned.into_inner() = date,
        }
    }

    pub fn advance_days(&self, days: u64) {
        let next = self.today() + Days::new(days);
        self.set(next);
    }
}

impl Clock for ManualClock {
    fn today(&self) -> NaiveDate {
        match self.today.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}
