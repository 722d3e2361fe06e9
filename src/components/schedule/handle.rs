use super::actor::{ScheduleActor, ScheduleActorHandle};
use super::board::ScheduleBoard;
use super::models::{Project, SectionKind};
use crate::error::ScheduleResult;
use crate::source::ScheduleSource;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Handle for interacting with the schedule actor
#[derive(Clone)]
pub struct ScheduleHandle {
    actor_handle: ScheduleActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl ScheduleHandle {
    /// Create a new ScheduleHandle and spawn the actor
    pub fn new(
        source: Arc<dyn ScheduleSource>,
        preview_limit: usize,
        reconcile_after_apply: bool,
    ) -> Self {
        // Create the actor and get its handle
        let (mut actor, handle) = ScheduleActor::new(source, preview_limit, reconcile_after_apply);

        // Spawn a task to run the actor
        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        }
    }

    /// Refetch requested, applied and recommended projects
    pub async fn refresh(&self) -> ScheduleResult<()> {
        self.actor_handle.refresh().await
    }

    /// Copy of the current sections
    pub async fn snapshot(&self) -> ScheduleResult<ScheduleBoard> {
        self.actor_handle.snapshot().await
    }

    /// Expand or collapse a section
    pub async fn toggle_section(&self, kind: SectionKind) -> ScheduleResult<bool> {
        self.actor_handle.toggle_section(kind).await
    }

    /// Apply to a recommended project
    pub async fn apply(&self, project_id: impl Into<String>) -> ScheduleResult<Project> {
        self.actor_handle.apply(project_id).await
    }

    /// Withdraw an application
    pub async fn cancel(&self, project_id: impl Into<String>) -> ScheduleResult<Project> {
        self.actor_handle.cancel(project_id).await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> ScheduleResult<()> {
        self.actor_handle.shutdown().await
    }
}
