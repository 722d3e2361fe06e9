use super::ScheduleSource;
use crate::components::calendar::models::{MonthCalendarData, Period};
use crate::components::schedule::models::Project;
use crate::error::{config_error, network_error, not_found, Error, ScheduleResult};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// REST client for the schedule API
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpSource {
    /// Create a client for `base_url` (e.g. "https://api.example.com/v1")
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> ScheduleResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| config_error(&format!("Invalid API URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(config_error(&format!("API URL '{}' cannot be a base", base_url)));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| config_error(&format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    /// Base URL with extra path segments appended
    fn endpoint(&self, segments: &[&str]) -> ScheduleResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| config_error("API URL cannot be a base"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder, what: &str) -> ScheduleResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        debug!("{} -> HTTP {}", what, status);

        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Could not read error response".to_string());

        Err(match status {
            StatusCode::NOT_FOUND => not_found(what),
            StatusCode::CONFLICT => Error::AlreadyApplied(what.to_string()),
            _ => network_error(&format!("{} failed: HTTP {} - {}", what, status, body)),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, what: &str) -> ScheduleResult<T> {
        let response = self.send(self.request(Method::GET, url), what).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl ScheduleSource for HttpSource {
    async fn fetch_calendar_events(&self, period: Period) -> ScheduleResult<MonthCalendarData> {
        let mut url = self.endpoint(&["schedule", "calendar"])?;
        url.query_pairs_mut()
            .append_pair("year", &period.year().to_string())
            .append_pair("month", &period.month().to_string());

        self.get_json(url, &format!("calendar events for {}", period))
            .await
    }

    async fn fetch_requested_projects(&self) -> ScheduleResult<Vec<Project>> {
        let url = self.endpoint(&["projects", "requested"])?;
        self.get_json(url, "requested projects").await
    }

    async fn fetch_my_applications(&self) -> ScheduleResult<Vec<Project>> {
        let url = self.endpoint(&["projects", "applications"])?;
        self.get_json(url, "applications").await
    }

    async fn fetch_recommended_projects(&self) -> ScheduleResult<Vec<Project>> {
        let url = self.endpoint(&["projects", "recommended"])?;
        self.get_json(url, "recommended projects").await
    }

    async fn apply_to_project(&self, project_id: &str) -> ScheduleResult<()> {
        let url = self.endpoint(&["projects", project_id, "apply"])?;
        let what = format!("project {}", project_id);
        match self.send(self.request(Method::POST, url), &what).await {
            Ok(_) => Ok(()),
            Err(Error::AlreadyApplied(_)) => Err(Error::AlreadyApplied(project_id.to_string())),
            Err(e) => Err(e),
        }
    }

    async fn cancel_application(&self, project_id: &str) -> ScheduleResult<()> {
        let url = self.endpoint(&["projects", project_id, "apply"])?;
        let what = format!("application for project {}", project_id);
        self.send(self.request(Method::DELETE, url), &what).await?;
        Ok(())
    }
}
