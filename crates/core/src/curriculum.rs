//! Business-day unlock calculator shared by every curriculum handler.
//!
//! Given an assignment's start date and an explicit "today", computes how
//! many business days (Mon-Fri, no holiday calendar) have elapsed inclusive
//! of both endpoints, maps that onto a 1-indexed program week and a 1-5 day
//! within the week, and decides whether a lesson slot is unlocked.
//!
//! "Today" is never read from the process clock here. Callers derive it
//! from the agency's configured timezone via [`today_in_timezone`].

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::CoreError;
use crate::status::AssignmentStatus;

/// Business days in a program week.
pub const BUSINESS_DAYS_PER_WEEK: u32 = 5;

/// Timezone used for agencies that have not configured one.
pub const DEFAULT_TIMEZONE: &str = "America/New_York";

// ---------------------------------------------------------------------------
// Input parsing
// ---------------------------------------------------------------------------

/// Parse an ISO `YYYY-MM-DD` calendar date. `label` names the field in errors.
pub fn parse_date(value: &str, label: &str) -> Result<NaiveDate, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::InvalidDate(format!("{label} is empty")));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|e| {
        CoreError::InvalidDate(format!("{label} '{trimmed}' is not a YYYY-MM-DD date: {e}"))
    })
}

/// Parse an assignment start date.
pub fn parse_start_date(value: &str) -> Result<NaiveDate, CoreError> {
    parse_date(value, "start date")
}

/// Unwrap a nullable start date, failing with [`CoreError::InvalidDate`].
pub fn require_start_date(start_date: Option<NaiveDate>) -> Result<NaiveDate, CoreError> {
    start_date.ok_or_else(|| CoreError::InvalidDate("assignment has no start date".to_string()))
}

/// Resolve an IANA timezone name such as `America/Chicago`.
pub fn resolve_timezone(name: &str) -> Result<Tz, CoreError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| CoreError::Validation(format!("Unknown timezone '{name}'")))
}

/// The calendar date it currently is in `tz`.
pub fn today_in_timezone(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

// ---------------------------------------------------------------------------
// Business-day counting
// ---------------------------------------------------------------------------

/// Whether `date` falls on Monday through Friday.
pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Count business days from `start` to `today`, both inclusive.
///
/// Returns 0 when `today` precedes `start`. A start date on a weekend is not
/// rolled forward; the weekend days simply do not count. Runs in constant
/// time: whole weeks contribute five days each and only the trailing partial
/// week is walked.
pub fn count_business_days(start: NaiveDate, today: NaiveDate) -> u32 {
    if today < start {
        return 0;
    }
    let days = (today - start).num_days() + 1;
    let full_weeks = days / 7;
    let first_weekday = i64::from(start.weekday().num_days_from_monday());
    let tail = (0..days % 7)
        .filter(|offset| (first_weekday + offset) % 7 < 5)
        .count() as i64;
    u32::try_from(full_weeks * 5 + tail).unwrap_or(u32::MAX)
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

/// Where an assignment stands in its program on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgramSchedule {
    /// False until at least one business day has elapsed.
    pub started: bool,
    /// True once the assignment is completed; every lesson is unlocked.
    pub all_unlocked: bool,
    pub business_days_elapsed: u32,
    /// 1-indexed, clamped to the program length.
    pub current_week: u32,
    /// 1-5 within the current week; 0 before the program starts. Past the
    /// final week this stays at 5 rather than cycling with the day count.
    pub day_in_week: u32,
}

impl ProgramSchedule {
    /// Schedule for a program that has not started yet.
    pub fn not_started() -> Self {
        Self {
            started: false,
            all_unlocked: false,
            business_days_elapsed: 0,
            current_week: 1,
            day_in_week: 0,
        }
    }

    /// Compute the schedule of an active program.
    pub fn compute(start: NaiveDate, today: NaiveDate, max_weeks: u32) -> Self {
        let max_weeks = max_weeks.max(1);
        let elapsed = count_business_days(start, today);
        if elapsed == 0 {
            return Self::not_started();
        }

        let raw_week = elapsed.div_ceil(BUSINESS_DAYS_PER_WEEK);
        let (current_week, day_in_week) = if raw_week > max_weeks {
            // Past the final week: pin to its last day so nothing re-locks.
            (max_weeks, BUSINESS_DAYS_PER_WEEK)
        } else {
            (raw_week, (elapsed - 1) % BUSINESS_DAYS_PER_WEEK + 1)
        };

        Self {
            started: true,
            all_unlocked: false,
            business_days_elapsed: elapsed,
            current_week,
            day_in_week,
        }
    }

    /// Compute the schedule for an assignment in any lifecycle status.
    ///
    /// - `pending` reports "not started" with everything locked.
    /// - `active` evaluates the calendar and requires a start date.
    /// - `completed` reports every lesson unlocked.
    pub fn for_assignment(
        status: AssignmentStatus,
        start_date: Option<NaiveDate>,
        today: NaiveDate,
        max_weeks: u32,
    ) -> Result<Self, CoreError> {
        match status {
            AssignmentStatus::Pending => Ok(Self::not_started()),
            AssignmentStatus::Active => {
                let start = require_start_date(start_date)?;
                Ok(Self::compute(start, today, max_weeks))
            }
            AssignmentStatus::Completed => Ok(Self {
                started: true,
                all_unlocked: true,
                business_days_elapsed: start_date
                    .map(|start| count_business_days(start, today))
                    .unwrap_or(0),
                current_week: max_weeks.max(1),
                day_in_week: BUSINESS_DAYS_PER_WEEK,
            }),
        }
    }

    /// Whether the lesson at (`week_number`, `day_of_week`) is unlocked.
    pub fn is_unlocked(&self, week_number: u32, day_of_week: u32) -> bool {
        if self.all_unlocked {
            return true;
        }
        if !self.started {
            return false;
        }
        week_number < self.current_week
            || (week_number == self.current_week && self.day_in_week >= day_of_week)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
