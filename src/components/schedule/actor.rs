use super::board::ScheduleBoard;
use super::models::{Project, SectionKind};
use crate::error::{component_error, ScheduleResult};
use crate::source::ScheduleSource;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The schedule actor that owns the three project sections
pub struct ScheduleActor {
    source: Arc<dyn ScheduleSource>,
    board: ScheduleBoard,
    reconcile_after_apply: bool,
    command_rx: mpsc::Receiver<ScheduleCommand>,
    fetched_tx: mpsc::Sender<FetchedSection>,
    fetched_rx: mpsc::Receiver<FetchedSection>,
}

/// Commands that can be sent to the schedule actor
pub enum ScheduleCommand {
    Refresh(mpsc::Sender<()>),
    Snapshot(mpsc::Sender<ScheduleBoard>),
    ToggleSection(SectionKind, mpsc::Sender<bool>),
    Apply(String, mpsc::Sender<ScheduleResult<Project>>),
    Cancel(String, mpsc::Sender<ScheduleResult<Project>>),
    Shutdown,
}

/// A finished section fetch on its way back to the actor
struct FetchedSection {
    kind: SectionKind,
    request_id: u64,
    result: ScheduleResult<Vec<Project>>,
}

/// Handle for communicating with the schedule actor
#[derive(Clone)]
pub struct ScheduleActorHandle {
    command_tx: mpsc::Sender<ScheduleCommand>,
}

impl ScheduleActorHandle {
    async fn request<T>(
        &self,
        make: impl FnOnce(mpsc::Sender<T>) -> ScheduleCommand,
    ) -> ScheduleResult<T> {
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

    /// Refetch all three sections
    pub async fn refresh(&self) -> ScheduleResult<()> {
        self.request(ScheduleCommand::Refresh).await
    }

    /// Copy of the current sections
    pub async fn snapshot(&self) -> ScheduleResult<ScheduleBoard> {
        self.request(ScheduleCommand::Snapshot).await
    }

    /// Expand or collapse a section; returns the new expanded state
    pub async fn toggle_section(&self, kind: SectionKind) -> ScheduleResult<bool> {
        self.request(|tx| ScheduleCommand::ToggleSection(kind, tx))
            .await
    }

    /// Apply to a recommended project
    pub async fn apply(&self, project_id: impl Into<String>) -> ScheduleResult<Project> {
        let project_id = project_id.into();
        self.request(|tx| ScheduleCommand::Apply(project_id, tx))
            .await?
    }

    /// Withdraw an application
    pub async fn cancel(&self, project_id: impl Into<String>) -> ScheduleResult<Project> {
        let project_id = project_id.into();
        self.request(|tx| ScheduleCommand::Cancel(project_id, tx))
            .await?
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> ScheduleResult<()> {
        let _ = self.command_tx.send(ScheduleCommand::Shutdown).await;
        Ok(())
    }
}

impl ScheduleActor {
    /// Create a new actor and return its handle
    pub fn new(
        source: Arc<dyn ScheduleSource>,
        preview_limit: usize,
        reconcile_after_apply: bool,
    ) -> (Self, ScheduleActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);
        let (fetched_tx, fetched_rx) = mpsc::channel(32);

        let actor = Self {
            source,
            board: ScheduleBoard::new(preview_limit),
            reconcile_after_apply,
            command_rx,
            fetched_tx,
            fetched_rx,
        };

        let handle = ScheduleActorHandle { command_tx };

        (actor, handle)
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Schedule actor started");

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => {
                    let Some(cmd) = cmd else { break };
                    if !self.handle_command(cmd).await {
                        break;
                    }
                }
                Some(fetched) = self.fetched_rx.recv() => {
                    self.board
                        .section_mut(fetched.kind)
                        .complete(fetched.request_id, fetched.result);
                }
            }
        }

        info!("Schedule actor shut down");
    }

    /// Returns false once the actor should stop
    async fn handle_command(&mut self, cmd: ScheduleCommand) -> bool {
        match cmd {
            ScheduleCommand::Refresh(response_tx) => {
                self.refresh();
                let _ = response_tx.try_send(());
            }
            ScheduleCommand::Snapshot(response_tx) => {
                let _ = response_tx.try_send(self.board.clone());
            }
            ScheduleCommand::ToggleSection(kind, response_tx) => {
                let expanded = self.board.section_mut(kind).toggle_expanded();
                let _ = response_tx.try_send(expanded);
            }
            ScheduleCommand::Apply(project_id, response_tx) => {
                let result = self.apply(&project_id).await;
                let _ = response_tx.try_send(result);
            }
            ScheduleCommand::Cancel(project_id, response_tx) => {
                let result = self.cancel(&project_id).await;
                let _ = response_tx.try_send(result);
            }
            ScheduleCommand::Shutdown => {
                info!("Schedule actor shutting down");
                return false;
            }
        }
        true
    }

    /// Fire all three fetches; each section updates as its own response lands
    fn refresh(&mut self) {
        for kind in SectionKind::ALL {
            let request_id = self.board.section_mut(kind).begin_fetch();
            debug!("Fetching {} projects (request {})", kind, request_id);

            let source = Arc::clone(&self.source);
            let fetched_tx = self.fetched_tx.clone();
            tokio::spawn(async move {
                let result = source.fetch_section(kind).await;
                let _ = fetched_tx
                    .send(FetchedSection {
                        kind,
                        request_id,
                        result,
                    })
                    .await;
            });
        }
    }

    async fn apply(&mut self, project_id: &str) -> ScheduleResult<Project> {
        self.board.check_can_apply(project_id)?;

        if let Err(e) = self.source.apply_to_project(project_id).await {
            warn!("Apply to project {} failed: {}", project_id, e);
            return Err(e);
        }

        let project = self.board.mark_applied(project_id)?;
        info!("Applied to project {}", project_id);

        if self.reconcile_after_apply {
            self.refresh();
        }
        Ok(project)
    }

    async fn cancel(&mut self, project_id: &str) -> ScheduleResult<Project> {
        self.board.check_can_cancel(project_id)?;

        if let Err(e) = self.source.cancel_application(project_id).await {
            warn!("Cancelling application for project {} failed: {}", project_id, e);
            return Err(e);
        }

        let project = self.board.mark_cancelled(project_id)?;
        info!("Cancelled application for project {}", project_id);

        if self.reconcile_after_apply {
            self.refresh();
        }
        Ok(project)
    }
}
