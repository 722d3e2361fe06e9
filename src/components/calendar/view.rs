use super::grid::{build_month_grid_with, GridOptions, MonthGrid};
use super::models::{CalendarEvent, MonthCalendarData, Period};
use super::navigator::MonthNavigator;
use crate::error::ScheduleResult;
use crate::utils::fetch::{FetchStatus, RequestTracker};
use chrono::NaiveDate;
use tracing::{debug, warn};

/// Tag carried by an events request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub period: Period,
    pub request_id: u64,
}

/// What the calendar currently shows
#[derive(Debug, Clone)]
pub struct CalendarSnapshot {
    pub period: Period,
    pub status: FetchStatus,
    pub grid: MonthGrid,
    pub stale_discarded: u64,
}

/// Displayed period plus the events loaded for it.
///
/// Each navigation issues a [`FetchTicket`]; a completion is only applied
/// while its ticket is the latest one issued for the displayed period.
#[derive(Debug, Clone)]
pub struct CalendarView {
    navigator: MonthNavigator,
    events: Vec<CalendarEvent>,
    status: FetchStatus,
    tracker: RequestTracker,
    stale_discarded: u64,
}

impl CalendarView {
    pub fn new(start: Period) -> Self {
        Self {
            navigator: MonthNavigator::new(start),
            events: Vec::new(),
            status: FetchStatus::Idle,
            tracker: RequestTracker::new(),
            stale_discarded: 0,
        }
    }

    pub fn period(&self) -> Period {
        self.navigator.current()
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn stale_discarded(&self) -> u64 {
        self.stale_discarded
    }

    /// Move to the next month and start loading it
    pub fn next(&mut self) -> FetchTicket {
        self.navigator.next();
        self.begin_fetch()
    }

    /// Move to the previous month and start loading it
    pub fn previous(&mut self) -> FetchTicket {
        self.navigator.previous();
        self.begin_fetch()
    }

    /// Jump to a period and start loading it
    pub fn show(&mut self, period: Period) -> FetchTicket {
        self.navigator.jump_to(period);
        self.begin_fetch()
    }

    /// Reload the current period
    pub fn reload(&mut self) -> FetchTicket {
        self.begin_fetch()
    }

    fn begin_fetch(&mut self) -> FetchTicket {
        let period = self.navigator.current();
        if self.events.first().is_some_and(|event| !event.is_in(period)) {
            self.events.clear();
        }
        self.status = FetchStatus::Loading;
        FetchTicket {
            period,
            request_id: self.tracker.issue(),
        }
    }

    /// Apply a finished request; returns false when the result was discarded as stale
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: ScheduleResult<MonthCalendarData>,
    ) -> bool {
        if ticket.period != self.period() || !self.tracker.is_current(ticket.request_id) {
            self.stale_discarded += 1;
            debug!(
                "Discarding stale events for {} (request {}), showing {}",
                ticket.period,
                ticket.request_id,
                self.period()
            );
            return false;
        }

        match result {
            Ok(data) => {
                if data.year != ticket.period.year() || data.month != ticket.period.month() {
                    warn!(
                        "Events response for {}-{:02} answered a request for {}",
                        data.year, data.month, ticket.period
                    );
                }
                self.events = data.events;
                self.status = FetchStatus::Ready;
            }
            Err(e) => {
                warn!("Failed to load events for {}: {}", ticket.period, e);
                self.events.clear();
                self.status = FetchStatus::Failed(e.to_string());
            }
        }
        true
    }

    /// Build the grid for the displayed period
    pub fn snapshot(&self, today: NaiveDate, options: GridOptions) -> ScheduleResult<CalendarSnapshot> {
        let period = self.period();
        let grid = build_month_grid_with(period.year(), period.month(), &self.events, today, options)?;
        Ok(CalendarSnapshot {
            period,
            status: self.status.clone(),
            grid,
            stale_discarded: self.stale_discarded,
        })
    }
}
