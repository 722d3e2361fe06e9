//! Scripted backend shared by the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use project_calendar::components::calendar::{CalendarEvent, EventType, MonthCalendarData, Period};
use project_calendar::components::schedule::Project;
use project_calendar::error::{network_error, ScheduleResult};
use project_calendar::source::{Fixture, FixtureSource, ScheduleSource};
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

/// Fixture-backed source whose calendar fetches can be held back per month
/// and whose calls can be made to fail on demand
#[derive(Default)]
pub struct ScriptedSource {
    inner: FixtureSource,
    gates: Mutex<HashMap<Period, Arc<Notify>>>,
    pub fail_recommended: AtomicBool,
    pub fail_apply: AtomicBool,
    pub calendar_calls: AtomicUsize,
    pub section_calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(fixture: Fixture) -> Arc<Self> {
        Arc::new(Self {
            inner: FixtureSource::new(fixture),
            ..Default::default()
        })
    }

    /// Hold calendar fetches for `period` until [`ScriptedSource::release`]
    pub fn hold(&self, period: Period) {
        self.gates
            .lock()
            .unwrap()
            .insert(period, Arc::new(Notify::new()));
    }

    /// Let one held fetch for `period` finish
    pub fn release(&self, period: Period) {
        if let Some(gate) = self.gates.lock().unwrap().get(&period) {
            gate.notify_one();
        }
    }

    pub async fn contents(&self) -> Fixture {
        self.inner.contents().await
    }
}

#[async_trait]
impl ScheduleSource for ScriptedSource {
    async fn fetch_calendar_events(&self, period: Period) -> ScheduleResult<MonthCalendarData> {
        self.calendar_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.gates.lock().unwrap().get(&period).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.inner.fetch_calendar_events(period).await
    }

    async fn fetch_requested_projects(&self) -> ScheduleResult<Vec<Project>> {
        self.section_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_requested_projects().await
    }

    async fn fetch_my_applications(&self) -> ScheduleResult<Vec<Project>> {
        self.section_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_my_applications().await
    }

    async fn fetch_recommended_projects(&self) -> ScheduleResult<Vec<Project>> {
        self.section_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_recommended.load(Ordering::SeqCst) {
            return Err(network_error("recommendations unavailable"));
        }
        self.inner.fetch_recommended_projects().await
    }

    async fn apply_to_project(&self, project_id: &str) -> ScheduleResult<()> {
        if self.fail_apply.load(Ordering::SeqCst) {
            return Err(network_error("connection reset"));
        }
        self.inner.apply_to_project(project_id).await
    }

    async fn cancel_application(&self, project_id: &str) -> ScheduleResult<()> {
        self.inner.cancel_application(project_id).await
    }
}

pub fn period(year: i32, month: u32) -> Period {
    Period::new(year, month).unwrap()
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn event(id: &str, on: NaiveDate, event_type: EventType) -> CalendarEvent {
    CalendarEvent {
        id: id.to_string(),
        date: on,
        event_type,
        project_id: format!("proj-{id}"),
        project_name: format!("Project {id}"),
        description: None,
    }
}

pub fn project(id: &str) -> Project {
    Project {
        id: id.to_string(),
        title: format!("Project {id}"),
        positions: 1,
        ..Default::default()
    }
}

/// Poll `check` until it returns true or two seconds pass
pub async fn eventually<F, Fut>(mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    for _ in 0..200 {
        if check().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}
