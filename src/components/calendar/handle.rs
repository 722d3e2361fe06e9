use super::actor::{CalendarActor, CalendarActorHandle};
use super::grid::GridOptions;
use super::models::Period;
use super::view::CalendarSnapshot;
use crate::error::ScheduleResult;
use crate::source::ScheduleSource;
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Handle for interacting with the calendar actor
#[derive(Clone)]
pub struct CalendarHandle {
    actor_handle: CalendarActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl CalendarHandle {
    /// Create a new CalendarHandle and spawn the actor
    pub fn new(source: Arc<dyn ScheduleSource>, start: Period, options: GridOptions) -> Self {
        // Create the actor and get its handle
        let (mut actor, handle) = CalendarActor::new(source, start, options);

        // Spawn a task to run the actor
        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        }
    }

    /// Show a period; its events load in the background
    pub async fn show(&self, period: Period) -> ScheduleResult<Period> {
        self.actor_handle.show(period).await
    }

    /// Move to the next month
    pub async fn next(&self) -> ScheduleResult<Period> {
        self.actor_handle.next().await
    }

    /// Move to the previous month
    pub async fn previous(&self) -> ScheduleResult<Period> {
        self.actor_handle.previous().await
    }

    /// Reload the displayed month
    pub async fn reload(&self) -> ScheduleResult<Period> {
        self.actor_handle.reload().await
    }

    /// Grid and load state for the displayed month, with `today` highlighted
    pub async fn snapshot(&self, today: NaiveDate) -> ScheduleResult<CalendarSnapshot> {
        self.actor_handle.snapshot(today).await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> ScheduleResult<()> {
        self.actor_handle.shutdown().await
    }
}
