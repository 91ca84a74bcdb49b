//! Calendar engine: the (year, month) cursor and the 42-cell grid generator.
//!
//! The engine owns exactly one piece of state, the cursor, with one
//! transition (`shift`). Grid generation and the month label are pure
//! queries over the cursor, the injected clock, and a caller-supplied
//! random source.

use chrono::{Datelike, Local, NaiveDate};
use rand::Rng;
use thiserror::Error;

use crate::types::{ActivityLevel, CalendarCell, MonthRelation, GRID_CELLS, MONTH_NAMES};

/// Supported cursor year range. Wide enough for any real use while keeping
/// month arithmetic comfortably inside `i32`.
pub const MIN_YEAR: i32 = -999_999;
pub const MAX_YEAR: i32 = 999_999;

/// Random-draw thresholds for activity placeholders, checked high to low
const ACTIVITY_THRESHOLD_HIGH: f64 = 0.7;
const ACTIVITY_THRESHOLD_MEDIUM: f64 = 0.5;
const ACTIVITY_THRESHOLD_LOW: f64 = 0.3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalendarError {
    #[error("month index {0} is out of range (expected 0..=11)")]
    MonthOutOfRange(u32),

    #[error("year {0} is outside the supported range {MIN_YEAR}..={MAX_YEAR}")]
    YearOutOfRange(i64),

    #[error("invalid month delta {0:?}: expected an integer")]
    InvalidDelta(String),
}

/// Source of "today", injectable so tests can pin the current date
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Production clock reading the local system date
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// The currently displayed month: a year and a zero-indexed month.
///
/// `month` is always in `[0, 11]`; overflow and underflow roll into `year`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCursor {
    year: i32,
    month: u32,
}

impl CalendarCursor {
    pub fn new(year: i32, month: u32) -> Result<Self, CalendarError> {
        if month > 11 {
            return Err(CalendarError::MonthOutOfRange(month));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(CalendarError::YearOutOfRange(year as i64));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Zero-indexed month in `[0, 11]`
    pub fn month(&self) -> u32 {
        self.month
    }
}

/// Owns the cursor and generates the 6x7 day grid.
///
/// Constructed and passed by the caller; there is no process-wide
/// singleton, so multiple independent calendars can coexist.
pub struct CalendarEngine {
    cursor: CalendarCursor,
    clock: Box<dyn Clock>,
}

impl CalendarEngine {
    /// Create an engine positioned on the system clock's current month
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    /// Create an engine with an injected clock, positioned on its current month
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        let today = clock.today();
        let cursor = CalendarCursor {
            year: today.year(),
            month: today.month0(),
        };
        Self { cursor, clock }
    }

    pub fn cursor(&self) -> CalendarCursor {
        self.cursor
    }

    /// Reposition the cursor on an explicit month
    pub fn set_cursor(&mut self, cursor: CalendarCursor) {
        self.cursor = cursor;
    }

    /// Reset the cursor to the clock's current month
    pub fn reset(&mut self) {
        let today = self.clock.today();
        self.cursor = CalendarCursor {
            year: today.year(),
            month: today.month0(),
        };
    }

    /// Move the cursor by `delta` months, rolling the year as needed.
    ///
    /// The cursor is left unchanged when the resulting year falls outside
    /// the supported range.
    pub fn shift(&mut self, delta: i32) -> Result<(), CalendarError> {
        let total = self.cursor.year as i64 * 12 + self.cursor.month as i64 + delta as i64;
        let year = total.div_euclid(12);
        let month = total.rem_euclid(12) as u32;

        if !(MIN_YEAR as i64..=MAX_YEAR as i64).contains(&year) {
            return Err(CalendarError::YearOutOfRange(year));
        }

        self.cursor = CalendarCursor {
            year: year as i32,
            month,
        };
        Ok(())
    }

    /// Parse a raw delta string and shift by it.
    ///
    /// Non-integer input fails with `InvalidDelta` and leaves the cursor
    /// unchanged. This is the boundary where user-supplied values arrive
    /// (navigation query parameters, CLI arguments).
    pub fn shift_raw(&mut self, raw: &str) -> Result<(), CalendarError> {
        let delta: i32 = raw
            .trim()
            .parse()
            .map_err(|_| CalendarError::InvalidDelta(raw.to_string()))?;
        self.shift(delta)
    }

    /// Generate the 42-cell grid for the cursor's month.
    ///
    /// The sequence is a prefix of previous-month cells (one per weekday
    /// before the 1st, oldest first), the full current month, then
    /// next-month cells padding to exactly [`GRID_CELLS`]. Since
    /// `first_weekday <= 6` and `days_in_month <= 31`, the prefix and
    /// middle run total at most 37 cells, so the next-month suffix is
    /// always non-empty.
    pub fn grid(&self, rng: &mut impl Rng) -> Vec<CalendarCell> {
        let CalendarCursor { year, month } = self.cursor;
        let today = self.clock.today();

        let first_weekday = weekday_of_first(year, month);
        let (prev_year, prev_month) = if month == 0 {
            (year - 1, 11)
        } else {
            (year, month - 1)
        };
        let days_in_prev = days_in_month(prev_year, prev_month);
        let days_in_current = days_in_month(year, month);

        let mut cells = Vec::with_capacity(GRID_CELLS);

        for day in (days_in_prev - first_weekday + 1)..=days_in_prev {
            cells.push(CalendarCell::new(
                day,
                MonthRelation::Previous,
                false,
                ActivityLevel::None,
            ));
        }

        let cursor_is_current = today.year() == year && today.month0() == month;
        for day in 1..=days_in_current {
            let is_today = cursor_is_current && day == today.day();
            let activity = activity_level(rng.random::<f64>());
            cells.push(CalendarCell::new(
                day,
                MonthRelation::Current,
                is_today,
                activity,
            ));
        }

        let remaining = (GRID_CELLS - cells.len()) as u32;
        for day in 1..=remaining {
            cells.push(CalendarCell::new(
                day,
                MonthRelation::Next,
                false,
                ActivityLevel::None,
            ));
        }

        cells
    }

    /// Display label for the cursor's month, e.g. "2025년 2월"
    pub fn month_label(&self) -> String {
        format!(
            "{}년 {}",
            self.cursor.year,
            MONTH_NAMES[self.cursor.month as usize]
        )
    }
}

impl Default for CalendarEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a uniform draw in [0, 1) to an activity placeholder.
///
/// Thresholds and check order match the original styling behavior.
pub fn activity_level(r: f64) -> ActivityLevel {
    if r > ACTIVITY_THRESHOLD_HIGH {
        ActivityLevel::Activity
    } else if r > ACTIVITY_THRESHOLD_MEDIUM {
        ActivityLevel::Assignment
    } else if r > ACTIVITY_THRESHOLD_LOW {
        ActivityLevel::Evaluation
    } else {
        ActivityLevel::None
    }
}

/// Proleptic Gregorian leap year rule, valid for any year sign
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in the given zero-indexed month
pub fn days_in_month(year: i32, month: u32) -> u32 {
    const DAYS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    if month == 1 && is_leap_year(year) {
        29
    } else {
        DAYS[month as usize]
    }
}

/// Day of week (0 = Sunday .. 6 = Saturday) of day 1 of the given
/// zero-indexed month, via Sakamoto's method. Euclidean division keeps
/// the result correct for negative years.
fn weekday_of_first(year: i32, month: u32) -> u32 {
    const OFFSETS: [i32; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
    let m = month + 1;
    let y = if m < 3 { year - 1 } else { year };
    let adjusted = y + y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400);
    (adjusted + OFFSETS[month as usize] + 1).rem_euclid(7) as u32
}
