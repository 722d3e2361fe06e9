use super::grid::GridOptions;
use super::models::{MonthCalendarData, Period};
use super::view::{CalendarSnapshot, CalendarView, FetchTicket};
use crate::error::{component_error, ScheduleResult};
use crate::source::ScheduleSource;
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// The calendar actor that owns the displayed period
pub struct CalendarActor {
    source: Arc<dyn ScheduleSource>,
    view: CalendarView,
    options: GridOptions,
    command_rx: mpsc::Receiver<CalendarCommand>,
    fetched_tx: mpsc::Sender<FetchedEvents>,
    fetched_rx: mpsc::Receiver<FetchedEvents>,
}

/// Commands that can be sent to the calendar actor
pub enum CalendarCommand {
    Show(Period, mpsc::Sender<Period>),
    Next(mpsc::Sender<Period>),
    Previous(mpsc::Sender<Period>),
    Reload(mpsc::Sender<Period>),
    Snapshot(NaiveDate, mpsc::Sender<ScheduleResult<CalendarSnapshot>>),
    Shutdown,
}

/// A finished events request on its way back to the actor
struct FetchedEvents {
    ticket: FetchTicket,
    result: ScheduleResult<MonthCalendarData>,
}

/// Handle for communicating with the calendar actor
#[derive(Clone)]
pub struct CalendarActorHandle {
    command_tx: mpsc::Sender<CalendarCommand>,
}

impl CalendarActorHandle {
    async fn navigate(
        &self,
        make: impl FnOnce(mpsc::Sender<Period>) -> CalendarCommand,
    ) -> ScheduleResult<Period> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(make(response_tx))
            .await
            .map_err(|e| component_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| component_error("Response channel closed"))
    }

    /// Show a period and start loading its events
    pub async fn show(&self, period: Period) -> ScheduleResult<Period> {
        self.navigate(|tx| CalendarCommand::Show(period, tx)).await
    }

    /// Move to the next month
    pub async fn next(&self) -> ScheduleResult<Period> {
        self.navigate(CalendarCommand::Next).await
    }

    /// Move to the previous month
    pub async fn previous(&self) -> ScheduleResult<Period> {
        self.navigate(CalendarCommand::Previous).await
    }

    /// Reload the displayed month
    pub async fn reload(&self) -> ScheduleResult<Period> {
        self.navigate(CalendarCommand::Reload).await
    }

    /// Grid and load state for the displayed month
    pub async fn snapshot(&self, today: NaiveDate) -> ScheduleResult<CalendarSnapshot> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(CalendarCommand::Snapshot(today, response_tx))
            .await
            .map_err(|e| component_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| component_error("Response channel closed"))?
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> ScheduleResult<()> {
        let _ = self.command_tx.send(CalendarCommand::Shutdown).await;
        Ok(())
    }
}

impl CalendarActor {
    /// Create a new actor and return its handle
    pub fn new(
        source: Arc<dyn ScheduleSource>,
        start: Period,
        options: GridOptions,
    ) -> (Self, CalendarActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);
        let (fetched_tx, fetched_rx) = mpsc::channel(32);

        let actor = Self {
            source,
            view: CalendarView::new(start),
            options,
            command_rx,
            fetched_tx,
            fetched_rx,
        };

        let handle = CalendarActorHandle { command_tx };

        (actor, handle)
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Calendar actor started at {}", self.view.period());

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => {
                    let Some(cmd) = cmd else { break };
                    if !self.handle_command(cmd) {
                        break;
                    }
                }
                Some(fetched) = self.fetched_rx.recv() => {
                    self.view.complete(fetched.ticket, fetched.result);
                }
            }
        }

        info!("Calendar actor shut down");
    }

    /// Returns false once the actor should stop
    fn handle_command(&mut self, cmd: CalendarCommand) -> bool {
        let (ticket, response_tx) = match cmd {
            CalendarCommand::Show(period, tx) => (self.view.show(period), tx),
            CalendarCommand::Next(tx) => (self.view.next(), tx),
            CalendarCommand::Previous(tx) => (self.view.previous(), tx),
            CalendarCommand::Reload(tx) => (self.view.reload(), tx),
            CalendarCommand::Snapshot(today, tx) => {
                let snapshot = self.view.snapshot(today, self.options);
                let _ = tx.try_send(snapshot);
                return true;
            }
            CalendarCommand::Shutdown => {
                info!("Calendar actor shutting down");
                return false;
            }
        };

        self.spawn_fetch(ticket);
        let _ = response_tx.try_send(ticket.period);
        true
    }

    fn spawn_fetch(&self, ticket: FetchTicket) {
        debug!(
            "Fetching events for {} (request {})",
            ticket.period, ticket.request_id
        );
        let source = Arc::clone(&self.source);
        let fetched_tx = self.fetched_tx.clone();

        tokio::spawn(async move {
            let result = source.fetch_calendar_events(ticket.period).await;
            let _ = fetched_tx.send(FetchedEvents { ticket, result }).await;
        });
    }
}
