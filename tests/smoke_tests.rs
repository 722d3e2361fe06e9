mod common;

use common::{date, event, eventually, project, ScriptedSource};
use project_calendar::commands::{Command, CommandContext, Outcome};
use project_calendar::components::calendar::{EventType, Period};
use project_calendar::config::Config;
use project_calendar::source::{Fixture, FixtureSource, ScheduleSource};
use project_calendar::startup::build_components;
use std::collections::HashMap;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::sync::RwLock;

fn fixture() -> Fixture {
    Fixture {
        events: vec![event("ev-1", date(2025, 2, 14), EventType::Deployment)],
        recommended: vec![project("P1"), project("P2")],
        ..Default::default()
    }
}

/// Smoke test to verify that the bundled config files parse
#[test]
fn test_bundled_fixture_parses() {
    let content = std::fs::read_to_string("config/fixture.toml").unwrap();
    let fixture: Fixture = toml::from_str(&content).unwrap();
    assert!(!fixture.events.is_empty());
    assert!(!fixture.recommended.is_empty());

    let content = std::fs::read_to_string("config/components.toml").unwrap();
    let components: HashMap<String, bool> = toml::from_str(&content).unwrap();
    assert_eq!(components.get("calendar"), Some(&true));
}

#[tokio::test]
async fn test_disabled_component_is_not_registered() {
    let mut config = Config::default();
    config.components.insert("schedule".to_string(), false);

    let manager = build_components(Arc::new(RwLock::new(config))).await;
    assert_eq!(manager.component_names(), vec!["calendar"]);
}

#[tokio::test]
async fn test_components_start_and_stop() {
    let config = Arc::new(RwLock::new(Config::default()));
    let manager = build_components(Arc::clone(&config)).await;
    let source: Arc<dyn ScheduleSource> = Arc::new(FixtureSource::new(fixture()));

    manager.init_all(source).await.unwrap();
    assert!(manager.calendar_handle().await.is_some());
    assert!(manager.schedule_handle().await.is_some());

    manager.shutdown_all().await.unwrap();
}

#[tokio::test]
async fn test_console_commands_drive_components() {
    let config = Arc::new(RwLock::new(Config::default()));
    let manager = build_components(Arc::clone(&config)).await;
    let source = ScriptedSource::new(fixture());
    manager.init_all(source.clone()).await.unwrap();

    let context = CommandContext::from_components(&manager).await;

    let Outcome::Print(text) = context
        .execute(Command::parse("g 2025-02").unwrap())
        .await
        .unwrap()
    else {
        panic!("goto should print the calendar");
    };
    assert!(text.starts_with("2025-02"));
    assert!(text.contains("14D"));

    let Outcome::Print(text) = context.execute(Command::Day(14)).await.unwrap() else {
        panic!("day should print its events");
    };
    assert!(text.contains("Project ev-1"));

    let Outcome::Print(text) = context
        .execute(Command::Apply("P1".to_string()))
        .await
        .unwrap()
    else {
        panic!("apply should print the board");
    };
    assert!(text.contains("Applied to Project P1"));
    assert_eq!(source.contents().await.applications[0].id, "P1");

    let Outcome::Print(text) = context
        .execute(Command::Apply("P1".to_string()))
        .await
        .unwrap()
    else {
        panic!("apply should print the board");
    };
    assert!(text.contains("Could not apply"));

    assert_eq!(
        context.execute(Command::Quit).await.unwrap(),
        Outcome::Quit
    );
    manager.shutdown_all().await.unwrap();
}

#[tokio::test]
async fn test_failing_section_leaves_calendar_loaded() {
    let config = Arc::new(RwLock::new(Config::default()));
    let manager = build_components(Arc::clone(&config)).await;
    let source = ScriptedSource::new(fixture());
    source.fail_recommended.store(true, Ordering::SeqCst);
    manager.init_all(source.clone()).await.unwrap();

    let calendar = manager.calendar_handle().await.unwrap();
    let schedule = manager.schedule_handle().await.unwrap();
    let (calendar, schedule) = (&calendar, &schedule);
    let today = date(2025, 2, 1);

    assert!(
        eventually(move || async move {
            let board = schedule.snapshot().await.unwrap();
            let done = board.sections().all(|s| !s.status().is_loading());
            done
        })
        .await
    );
    assert!(
        eventually(move || async move {
            calendar.snapshot(today).await.unwrap().status.is_ready()
        })
        .await
    );

    let board = schedule.snapshot().await.unwrap();
    assert!(board.recommended.status().failure().is_some());
    assert!(board.requested.status().is_ready());
    assert!(board.applications.status().is_ready());

    calendar.show(Period::new(2025, 2).unwrap()).await.unwrap();
    assert!(
        eventually(move || async move {
            let snapshot = calendar.snapshot(today).await.unwrap();
            snapshot.status.is_ready() && snapshot.grid.day(14).unwrap().events.len() == 1
        })
        .await
    );

    manager.shutdown_all().await.unwrap();
}

#[tokio::test]
async fn test_help_points_at_sample_month() {
    let context = CommandContext {
        config: Arc::new(RwLock::new(Config::default())),
        calendar: None,
        schedule: None,
    };
    let Outcome::Print(text) = context.execute(Command::Help).await.unwrap() else {
        panic!("help should print");
    };
    assert!(text.contains("g 2025-02"));
}
