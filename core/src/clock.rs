//! Run clock — pins "now" once per run.
//!
//! Every generator reads dates through the same RunClock so the whole
//! dataset agrees on what "today" is, even when a run crosses midnight.

use crate::rng::GenRng;
use chrono::{Duration, Local, Months, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: i64 = 86_400;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RunClock {
    pub as_of: NaiveDateTime,
    /// Width of the window activity timestamps are drawn from.
    pub activity_window_days: i64,
}

impl RunClock {
    pub fn new(as_of: NaiveDateTime, activity_window_days: i64) -> Self {
        Self {
            as_of,
            activity_window_days,
        }
    }

    /// Clock pinned to the local wall time, truncated to whole seconds.
    pub fn now(activity_window_days: i64) -> Self {
        let now = Local::now().naive_local();
        Self::new(now.with_nanosecond(0).unwrap_or(now), activity_window_days)
    }

    pub fn today(&self) -> NaiveDate {
        self.as_of.date()
    }

    /// Start of the activity window.
    pub fn window_start(&self) -> NaiveDateTime {
        self.as_of - Duration::days(self.activity_window_days)
    }

    /// Uniform timestamp in [window_start, as_of], whole seconds.
    pub fn random_timestamp(&self, rng: &mut GenRng) -> NaiveDateTime {
        let span = self.activity_window_days.max(0) * SECONDS_PER_DAY;
        let back = rng.int_between(0, span);
        self.as_of - Duration::seconds(back)
    }

    /// Uniform date of birth for someone aged `min_age..=max_age` today.
    pub fn random_birth_date(&self, rng: &mut GenRng, min_age: u32, max_age: u32) -> NaiveDate {
        let today = self.today();
        let youngest = today
            .checked_sub_months(Months::new(min_age * 12))
            .unwrap_or(today);
        // Someone turning max_age + 1 tomorrow is still max_age today.
        let oldest = today
            .checked_sub_months(Months::new((max_age + 1) * 12))
            .map(|d| d + Duration::days(1))
            .unwrap_or(youngest);
        let span = (youngest - oldest).num_days().max(0);
        oldest + Duration::days(rng.int_between(0, span))
    }
}
