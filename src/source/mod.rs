//! Data access for the calendar and the project sections.
//!
//! Components receive an `Arc<dyn ScheduleSource>` at init; nothing in
//! the crate reaches for a global data store.

mod fixture;
mod http;

pub use fixture::{Fixture, FixtureSource};
pub use http::HttpSource;

use crate::components::calendar::models::{MonthCalendarData, Period};
use crate::components::schedule::models::{Project, SectionKind};
use crate::config::Config;
use crate::error::ScheduleResult;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Operations the schedule page needs from its backend
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    /// Events of one month; fails with `Network` or `NotFound`
    async fn fetch_calendar_events(&self, period: Period) -> ScheduleResult<MonthCalendarData>;

    /// Projects an administrator requested the user for
    async fn fetch_requested_projects(&self) -> ScheduleResult<Vec<Project>>;

    /// Projects the user applied to
    async fn fetch_my_applications(&self) -> ScheduleResult<Vec<Project>>;

    /// Candidate projects
    async fn fetch_recommended_projects(&self) -> ScheduleResult<Vec<Project>>;

    /// Apply to a project; fails with `Network`, `AlreadyApplied` or `NotFound`
    async fn apply_to_project(&self, project_id: &str) -> ScheduleResult<()>;

    /// Withdraw an application; fails with `Network` or `NotFound`
    async fn cancel_application(&self, project_id: &str) -> ScheduleResult<()>;

    /// Fetch the list backing a section
    async fn fetch_section(&self, kind: SectionKind) -> ScheduleResult<Vec<Project>> {
        match kind {
            SectionKind::Requested => self.fetch_requested_projects().await,
            SectionKind::Applications => self.fetch_my_applications().await,
            SectionKind::Recommended => self.fetch_recommended_projects().await,
        }
    }
}

/// Build the source selected by the configuration
pub fn from_config(config: &Config) -> ScheduleResult<Arc<dyn ScheduleSource>> {
    match &config.api_base_url {
        Some(base_url) => {
            info!("Using REST schedule source at {}", base_url);
            let source = HttpSource::new(
                base_url,
                config.api_token.clone(),
                std::time::Duration::from_secs(config.request_timeout_secs),
            )?;
            Ok(Arc::new(source))
        }
        None => {
            info!("Using fixture schedule source from {}", config.fixture_path);
            Ok(Arc::new(FixtureSource::from_file(&config.fixture_path)?))
        }
    }
}
