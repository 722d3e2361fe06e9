//! Month grid layout.
//!
//! Columns run Sunday (0) to Saturday (6). The grid starts with one empty
//! cell per weekday before the 1st, followed by one cell per day of the
//! month. The last row is only padded when [`TrailingPadding::FullWeek`]
//! is requested.

use super::models::{CalendarEvent, Period};
use crate::error::{invalid_argument, ScheduleResult};
use crate::utils::time::{day_of_week, days_in_month, format_iso_date};
use chrono::NaiveDate;

/// Markers shown per day unless configured otherwise
pub const DEFAULT_MARKER_LIMIT: usize = 3;

/// How the final week row is finished
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrailingPadding {
    /// Stop after the last day of the month
    #[default]
    None,
    /// Fill the last row up to seven cells
    FullWeek,
}

/// Layout options for [`build_month_grid_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridOptions {
    pub marker_limit: usize,
    pub trailing: TrailingPadding,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            marker_limit: DEFAULT_MARKER_LIMIT,
            trailing: TrailingPadding::None,
        }
    }
}

/// One cell of the month grid; `day` is `None` for padding
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayCell {
    pub day: Option<u32>,
    pub events: Vec<CalendarEvent>,
    pub is_today: bool,
}

impl DayCell {
    fn padding() -> Self {
        Self::default()
    }

    pub fn is_padding(&self) -> bool {
        self.day.is_none()
    }
}

/// A laid out calendar month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub period: Period,
    pub cells: Vec<DayCell>,
    pub marker_limit: usize,
}

impl MonthGrid {
    /// Rows of seven cells; the last row may be shorter
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(7)
    }

    /// Cell for a day of the month
    pub fn day(&self, day: u32) -> Option<&DayCell> {
        self.cells.iter().find(|cell| cell.day == Some(day))
    }

    /// Events drawn as markers on a cell, first ones in input order
    pub fn markers<'a>(&self, cell: &'a DayCell) -> &'a [CalendarEvent] {
        let shown = cell.events.len().min(self.marker_limit);
        &cell.events[..shown]
    }

    /// Events not drawn as markers on a cell
    pub fn overflow(&self, cell: &DayCell) -> usize {
        cell.events.len().saturating_sub(self.marker_limit)
    }

    /// Number of leading padding cells
    pub fn leading_padding(&self) -> usize {
        self.cells.iter().take_while(|cell| cell.is_padding()).count()
    }
}

/// Lay out (year, month) with default options.
///
/// `events` should already be restricted to the month; anything dated
/// elsewhere simply lands in no cell. `today` is supplied by the caller.
pub fn build_month_grid(
    year: i32,
    month: u32,
    events: &[CalendarEvent],
    today: NaiveDate,
) -> ScheduleResult<MonthGrid> {
    build_month_grid_with(year, month, events, today, GridOptions::default())
}

/// Lay out (year, month) with explicit options
pub fn build_month_grid_with(
    year: i32,
    month: u32,
    events: &[CalendarEvent],
    today: NaiveDate,
    options: GridOptions,
) -> ScheduleResult<MonthGrid> {
    let period = Period::new(year, month)?;
    let first_weekday = day_of_week(year, month, 1)? as usize;
    let day_count = days_in_month(year, month)?;

    let mut cells = Vec::with_capacity(first_weekday + day_count as usize + 6);
    cells.extend((0..first_weekday).map(|_| DayCell::padding()));

    for day in 1..=day_count {
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            invalid_argument(&format!("{} is out of range", format_iso_date(year, month, day)))
        })?;
        let day_events = events
            .iter()
            .filter(|event| event.date == date)
            .cloned()
            .collect();

        cells.push(DayCell {
            day: Some(day),
            events: day_events,
            is_today: date == today,
        });
    }

    if options.trailing == TrailingPadding::FullWeek {
        let remainder = cells.len() % 7;
        if remainder != 0 {
            cells.extend((remainder..7).map(|_| DayCell::padding()));
        }
    }

    Ok(MonthGrid {
        period,
        cells,
        marker_limit: options.marker_limit,
    })
}
