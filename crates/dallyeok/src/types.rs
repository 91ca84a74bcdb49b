use serde::{Deserialize, Serialize};

/// Total number of cells in the calendar grid (6 weeks of 7 days)
pub const GRID_CELLS: usize = 42;

/// Korean month names, indexed by zero-based month
pub const MONTH_NAMES: [&str; 12] = [
    "1월", "2월", "3월", "4월", "5월", "6월", "7월", "8월", "9월", "10월", "11월", "12월",
];

/// Korean weekday names, Sunday first (matching the grid's week-start)
pub const WEEKDAY_NAMES: [&str; 7] = ["일", "월", "화", "수", "목", "금", "토"];

/// Which month a cell's day number belongs to, relative to the displayed month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthRelation {
    Previous,
    Current,
    Next,
}

/// Display-only activity classification for a current-month day.
///
/// Assigned by a uniform random draw on every grid generation; it is a
/// styling placeholder, not real platform data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    None,
    Activity,
    Assignment,
    Evaluation,
}

impl ActivityLevel {
    /// CSS classes the original stylesheet expects for this level
    pub fn css_classes(&self) -> &'static str {
        match self {
            ActivityLevel::None => "",
            ActivityLevel::Activity => "has-activity",
            ActivityLevel::Assignment => "has-activity has-assignment",
            ActivityLevel::Evaluation => "has-activity has-evaluation",
        }
    }
}

/// One day slot in the 42-slot grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarCell {
    /// Day-of-month label shown in the cell (always >= 1)
    pub day: u32,

    /// Which month the day belongs to relative to the cursor
    pub relation: MonthRelation,

    /// True only for the current-month cell matching today's real date
    pub is_today: bool,

    /// Activity placeholder; always `None` for previous/next-month cells
    pub activity: ActivityLevel,
}

impl CalendarCell {
    pub fn new(day: u32, relation: MonthRelation, is_today: bool, activity: ActivityLevel) -> Self {
        Self {
            day,
            relation,
            is_today,
            activity,
        }
    }

    /// Full CSS class list for the cell div
    pub fn css_classes(&self) -> String {
        let mut classes = String::from("calendar-day");
        if self.relation != MonthRelation::Current {
            classes.push_str(" other-month");
        }
        if self.is_today {
            classes.push_str(" today");
        }
        let activity = self.activity.css_classes();
        if !activity.is_empty() {
            classes.push(' ');
            classes.push_str(activity);
        }
        classes
    }

    /// Accessible label matching the original markup convention
    pub fn aria_label(&self) -> String {
        match self.relation {
            MonthRelation::Previous => format!("이전 달 {}일", self.day),
            MonthRelation::Current => format!("{}일", self.day),
            MonthRelation::Next => format!("다음 달 {}일", self.day),
        }
    }
}
