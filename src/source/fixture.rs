use super::ScheduleSource;
use crate::components::calendar::models::{CalendarEvent, MonthCalendarData, Period};
use crate::components::schedule::models::Project;
use crate::error::{not_found, Error, ScheduleResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tokio::sync::RwLock;
use tracing::debug;

/// Mock backend contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub events: Vec<CalendarEvent>,
    #[serde(default)]
    pub requested: Vec<Project>,
    #[serde(default)]
    pub applications: Vec<Project>,
    #[serde(default)]
    pub recommended: Vec<Project>,
}

/// In-memory source that behaves like the backend, including apply/cancel
#[derive(Debug, Default)]
pub struct FixtureSource {
    state: RwLock<Fixture>,
}

impl FixtureSource {
    pub fn new(fixture: Fixture) -> Self {
        Self {
            state: RwLock::new(fixture),
        }
    }

    /// Parse fixture TOML
    pub fn from_toml_str(content: &str) -> ScheduleResult<Self> {
        let fixture: Fixture = toml::from_str(content)?;
        Ok(Self::new(fixture))
    }

    /// Load fixture TOML from disk
    pub fn from_file(path: impl AsRef<Path>) -> ScheduleResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Copy of the current contents
    pub async fn contents(&self) -> Fixture {
        self.state.read().await.clone()
    }
}

#[async_trait]
impl ScheduleSource for FixtureSource {
    async fn fetch_calendar_events(&self, period: Period) -> ScheduleResult<MonthCalendarData> {
        let state = self.state.read().await;
        let events: Vec<CalendarEvent> = state
            .events
            .iter()
            .filter(|event| event.is_in(period))
            .cloned()
            .collect();
        debug!("Fixture has {} events for {}", events.len(), period);
        Ok(MonthCalendarData {
            year: period.year(),
            month: period.month(),
            events,
        })
    }

    async fn fetch_requested_projects(&self) -> ScheduleResult<Vec<Project>> {
        Ok(self.state.read().await.requested.clone())
    }

    async fn fetch_my_applications(&self) -> ScheduleResult<Vec<Project>> {
        Ok(self.state.read().await.applications.clone())
    }

    async fn fetch_recommended_projects(&self) -> ScheduleResult<Vec<Project>> {
        Ok(self.state.read().await.recommended.clone())
    }

    async fn apply_to_project(&self, project_id: &str) -> ScheduleResult<()> {
        let mut state = self.state.write().await;
        if state.applications.iter().any(|p| p.id == project_id) {
            return Err(Error::AlreadyApplied(project_id.to_string()));
        }
        let index = state
            .recommended
            .iter()
            .position(|p| p.id == project_id)
            .ok_or_else(|| not_found(&format!("project {}", project_id)))?;
        let project = state.recommended.remove(index);
        state.applications.push(project.with_applied(true));
        Ok(())
    }

    async fn cancel_application(&self, project_id: &str) -> ScheduleResult<()> {
        let mut state = self.state.write().await;
        let index = state
            .applications
            .iter()
            .position(|p| p.id == project_id)
            .ok_or_else(|| not_found(&format!("application for project {}", project_id)))?;
        let project = state.applications.remove(index);
        state.recommended.push(project.with_applied(false));
        Ok(())
    }
}
