//! Time windows used to filter records before aggregation.

use chrono::{Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{MoniError, Result};

/// An inclusive calendar range for custom reports.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(MoniError::InvalidInput(format!(
                "range start {} is after end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn day_count(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Filter window for aggregation: fixed periods are inclusive of their start
/// and unbounded at the end; custom ranges are inclusive at both bounds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReportWindow {
    Today,
    Week,
    Month,
    Custom(DateRange),
}

impl ReportWindow {
    pub fn custom(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        Ok(ReportWindow::Custom(DateRange::new(start, end)?))
    }

    /// First date the window covers, relative to `today`.
    pub fn start_date(&self, today: NaiveDate) -> NaiveDate {
        match self {
            ReportWindow::Today => today,
            ReportWindow::Week => monday_of(today),
            ReportWindow::Month => today.with_day(1).unwrap(),
            ReportWindow::Custom(range) => range.start(),
        }
    }

    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            ReportWindow::Today => date == today,
            ReportWindow::Week | ReportWindow::Month => date >= self.start_date(today),
            ReportWindow::Custom(range) => range.contains(date),
        }
    }

    /// Nominal day count used for per-day averages in reports.
    pub fn day_count(&self) -> i64 {
        match self {
            ReportWindow::Today => 1,
            ReportWindow::Week => 7,
            ReportWindow::Month => 30,
            ReportWindow::Custom(range) => range.day_count(),
        }
    }
}

/// The most recent Monday, counting `date` itself.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    let delta = date.weekday().num_days_from_monday() as i64;
    date - Duration::days(delta)
}

/// Today's local calendar date.
pub fn local_today() -> NaiveDate {
    Utc::now().date_naive()
}
