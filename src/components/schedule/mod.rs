mod actor;
pub mod board;
mod handle;
pub mod models;

pub use board::{ScheduleBoard, Section};
pub use handle::ScheduleHandle;
pub use models::{Project, ProjectStatus, SectionKind};

use crate::config::Config;
use crate::error::ScheduleResult;
use crate::source::ScheduleSource;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Requested / applied / recommended project sections
#[derive(Default)]
pub struct Schedule {
    handle: RwLock<Option<ScheduleHandle>>,
}

impl Schedule {
    /// Create a new schedule component
    pub fn new() -> Self {
        Self {
            handle: RwLock::new(None),
        }
    }

    /// Get the handle if it exists
    pub async fn get_handle(&self) -> Option<ScheduleHandle> {
        let handle_lock = self.handle.read().await;
        handle_lock.clone()
    }
}

#[async_trait]
impl super::Component for Schedule {
    fn name(&self) -> &'static str {
        "schedule"
    }

    async fn init(
        &self,
        config: Arc<RwLock<Config>>,
        source: Arc<dyn ScheduleSource>,
    ) -> ScheduleResult<()> {
        let (preview_limit, reconcile) = {
            let config_read = config.read().await;
            (config_read.section_preview_limit, config_read.reconcile_after_apply)
        };

        // Create a new handle if one doesn't exist
        let mut handle_lock = self.handle.write().await;
        if handle_lock.is_none() {
            let handle = ScheduleHandle::new(source, preview_limit, reconcile);
            handle.refresh().await?;
            *handle_lock = Some(handle);
        }

        Ok(())
    }

    async fn shutdown(&self) -> ScheduleResult<()> {
        // Shutdown the handle if it exists
        let handle_lock = self.handle.read().await;
        if let Some(handle) = &*handle_lock {
            handle.shutdown().await?;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
