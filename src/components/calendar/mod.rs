mod actor;
pub mod grid;
mod handle;
pub mod models;
pub mod navigator;
pub mod view;

pub use grid::{build_month_grid, build_month_grid_with, DayCell, GridOptions, MonthGrid, TrailingPadding};
pub use handle::CalendarHandle;
pub use models::{CalendarEvent, EventType, MonthCalendarData, Period};
pub use navigator::{go_to_next_month, go_to_previous_month, MonthNavigator};
pub use view::CalendarSnapshot;

use crate::config::Config;
use crate::error::ScheduleResult;
use crate::source::ScheduleSource;
use crate::utils::time::today_in;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Grid options derived from the configuration
pub fn grid_options(config: &Config) -> GridOptions {
    GridOptions {
        marker_limit: config.marker_limit,
        trailing: if config.pad_trailing_week {
            TrailingPadding::FullWeek
        } else {
            TrailingPadding::None
        },
    }
}

/// Monthly calendar component
#[derive(Default)]
pub struct MonthCalendar {
    handle: RwLock<Option<CalendarHandle>>,
}

impl MonthCalendar {
    /// Create a new calendar component
    pub fn new() -> Self {
        Self {
            handle: RwLock::new(None),
        }
    }

    /// Get the handle if it exists
    pub async fn get_handle(&self) -> Option<CalendarHandle> {
        let handle_lock = self.handle.read().await;
        handle_lock.clone()
    }
}

#[async_trait]
impl super::Component for MonthCalendar {
    fn name(&self) -> &'static str {
        "calendar"
    }

    async fn init(
        &self,
        config: Arc<RwLock<Config>>,
        source: Arc<dyn ScheduleSource>,
    ) -> ScheduleResult<()> {
        let (timezone, options) = {
            let config_read = config.read().await;
            (config_read.timezone.clone(), grid_options(&config_read))
        };

        let start = Period::containing(today_in(&timezone)?);

        // Create a new handle if one doesn't exist
        let mut handle_lock = self.handle.write().await;
        if handle_lock.is_none() {
            let handle = CalendarHandle::new(source, start, options);
            handle.reload().await?;
            info!("Calendar opened at {}", start);
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
