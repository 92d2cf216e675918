//! Reporting window and refresh broadcast
//!
//! The window is two independent `YYYY-MM-DD` strings. Views that depend on
//! it register refresh callbacks and recompute when `refresh` is called.

use chrono::{Datelike, Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::store::{Emitter, SubscriptionId, Writable};

/// Date format used by the stores and the backend
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Default number of months the window reaches back
pub const DEFAULT_MONTHS_BACK: u32 = 6;

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> CoreResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| CoreError::InvalidDate {
        value: value.to_string(),
    })
}

/// Start and end of the reporting window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// First day of the month `months_back` months before `today`, through `today`.
    ///
    /// Month subtraction clamps to the end of shorter months before snapping
    /// to the first, so Aug 31 with six months back starts on Feb 1.
    pub fn default_for(today: NaiveDate, months_back: u32) -> Self {
        let shifted = today
            .checked_sub_months(Months::new(months_back))
            .unwrap_or(NaiveDate::MIN);
        let start = shifted.with_day(1).unwrap_or(shifted);
        Self {
            start: start.format(DATE_FORMAT).to_string(),
            end: today.format(DATE_FORMAT).to_string(),
        }
    }

    /// Both dates parse and start is not after end
    pub fn validate(&self) -> CoreResult<(NaiveDate, NaiveDate)> {
        let start = parse_date(&self.start)?;
        let end = parse_date(&self.end)?;
        if start > end {
            return Err(CoreError::InvalidDateRange {
                start: self.start.clone(),
                end: self.end.clone(),
            });
        }
        Ok((start, end))
    }

    /// Whether `date` falls inside the window, bounds included.
    ///
    /// Unparseable bounds leave that side open; an unparseable `date` is kept.
    pub fn contains(&self, date: &str) -> bool {
        let Ok(date) = parse_date(date) else {
            return true;
        };
        let after_start = parse_date(&self.start).map(|s| date >= s).unwrap_or(true);
        let before_end = parse_date(&self.end).map(|e| date <= e).unwrap_or(true);
        after_start && before_end
    }

    /// Human-readable description
    pub fn description(&self) -> String {
        format!("{} to {}", self.start, self.end)
    }
}

/// Reactive reporting window plus the refresh listener registry
#[derive(Debug)]
pub struct DateRangeStore {
    start: Writable<String>,
    end: Writable<String>,
    refresh: Emitter<()>,
    months_back: u32,
}

impl Default for DateRangeStore {
    fn default() -> Self {
        Self::new(Local::now().date_naive(), DEFAULT_MONTHS_BACK)
    }
}

impl DateRangeStore {
    /// Store initialized to the default window ending `today`
    pub fn new(today: NaiveDate, months_back: u32) -> Self {
        let range = DateRange::default_for(today, months_back);
        Self {
            start: Writable::new(range.start),
            end: Writable::new(range.end),
            refresh: Emitter::new(),
            months_back,
        }
    }

    /// Start date value
    pub fn start(&self) -> &Writable<String> {
        &self.start
    }

    /// End date value
    pub fn end(&self) -> &Writable<String> {
        &self.end
    }

    /// Current window
    pub fn snapshot(&self) -> DateRange {
        DateRange {
            start: self.start.get(),
            end: self.end.get(),
        }
    }

    /// Write both ends. No ordering check is applied here.
    pub fn set_range(&self, range: DateRange) {
        log::debug!("Date range set to {}", range.description());
        self.start.set(range.start);
        self.end.set(range.end);
    }

    /// Return to the default window ending `today`
    pub fn reset(&self, today: NaiveDate) {
        self.set_range(DateRange::default_for(today, self.months_back));
    }

    /// Register a refresh callback. Duplicates are allowed; each call gets its own token.
    pub fn on_refresh<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.refresh.subscribe(move |_: &()| callback())
    }

    /// Remove one refresh registration. No-op when the token is unknown.
    pub fn off_refresh(&self, id: SubscriptionId) -> bool {
        self.refresh.unsubscribe(id)
    }

    /// Invoke every refresh callback in registration order.
    /// Returns how many callbacks ran.
    pub fn refresh(&self) -> usize {
        let invoked = self.refresh.emit(&());
        log::debug!("Refresh broadcast reached {} listener(s)", invoked);
        invoked
    }

    pub fn refresh_listener_count(&self) -> usize {
        self.refresh.len()
    }
}
