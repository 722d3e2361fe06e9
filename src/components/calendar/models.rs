use crate::components::calendar::navigator::{go_to_next_month, go_to_previous_month};
use crate::error::{invalid_argument, ScheduleResult};
use crate::utils::time::check_month;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of milestone a calendar event marks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    ApplicationStart,
    ApplicationEnd,
    Deployment,
}

/// A dated project milestone shown on the calendar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub project_id: String,
    pub project_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CalendarEvent {
    /// Whether the event falls inside the given period
    pub fn is_in(&self, period: Period) -> bool {
        self.date.year() == period.year && self.date.month() == period.month
    }
}

/// Events of one calendar month as returned by the data source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCalendarData {
    pub year: i32,
    pub month: u32,
    #[serde(default)]
    pub events: Vec<CalendarEvent>,
}

impl MonthCalendarData {
    pub fn period(&self) -> ScheduleResult<Period> {
        Period::new(self.year, self.month)
    }
}

/// A validated (year, month) pair identifying one calendar page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Create a period; fails with `InvalidArgument` for months outside 1..=12
    /// or years a calendar date cannot hold
    pub fn new(year: i32, month: u32) -> ScheduleResult<Self> {
        check_month(month)?;
        if !(Self::min_year()..=Self::max_year()).contains(&year) {
            return Err(invalid_argument(&format!(
                "year must be between {} and {}, got {}",
                Self::min_year(),
                Self::max_year(),
                year
            )));
        }
        Ok(Self { year, month })
    }

    /// First year a calendar date can hold
    pub fn min_year() -> i32 {
        NaiveDate::MIN.year()
    }

    /// Last year a calendar date can hold
    pub fn max_year() -> i32 {
        NaiveDate::MAX.year()
    }

    /// The period containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The following month; stays put on the last representable month
    pub fn next(self) -> Self {
        let (year, month) = go_to_next_month(self.year, self.month);
        Self::new(year, month).unwrap_or(self)
    }

    /// The preceding month; stays put on the first representable month
    pub fn previous(self) -> Self {
        let (year, month) = go_to_previous_month(self.year, self.month);
        Self::new(year, month).unwrap_or(self)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
