mod common;

use common::{date, event, eventually, period, ScriptedSource};
use project_calendar::components::calendar::{CalendarHandle, EventType, GridOptions};
use project_calendar::source::Fixture;
use project_calendar::utils::fetch::FetchStatus;
use std::sync::atomic::Ordering;

fn fixture() -> Fixture {
    Fixture {
        events: vec![
            event("jan", date(2025, 1, 20), EventType::ApplicationStart),
            event("feb-a", date(2025, 2, 14), EventType::ApplicationEnd),
            event("feb-b", date(2025, 2, 14), EventType::Deployment),
            event("mar", date(2025, 3, 3), EventType::Deployment),
        ],
        ..Default::default()
    }
}

/// A slow January response must not overwrite February once the user moved on
#[tokio::test]
async fn test_stale_month_response_is_discarded() {
    let source = ScriptedSource::new(fixture());
    source.hold(period(2025, 1));

    let calendar = CalendarHandle::new(source.clone(), period(2025, 1), GridOptions::default());
    let handle = &calendar;
    let today = date(2025, 2, 1);

    calendar.reload().await.unwrap();
    assert_eq!(calendar.next().await.unwrap(), period(2025, 2));

    assert!(
        eventually(move || async move {
            handle.snapshot(today).await.unwrap().status == FetchStatus::Ready
        })
        .await
    );

    source.release(period(2025, 1));
    assert!(
        eventually(move || async move {
            handle.snapshot(today).await.unwrap().stale_discarded == 1
        })
        .await
    );

    let snapshot = calendar.snapshot(today).await.unwrap();
    assert_eq!(snapshot.period, period(2025, 2));
    assert_eq!(snapshot.status, FetchStatus::Ready);
    assert_eq!(snapshot.grid.day(14).unwrap().events.len(), 2);
    assert!(snapshot
        .grid
        .cells
        .iter()
        .flat_map(|cell| cell.events.iter())
        .all(|event| event.id.starts_with("feb")));

    calendar.shutdown().await.unwrap();
}

/// Coming back to a month whose first request is still pending only accepts the newest request
#[tokio::test]
async fn test_return_to_month_ignores_older_request() {
    let source = ScriptedSource::new(fixture());
    source.hold(period(2025, 1));
    source.hold(period(2025, 2));

    let calendar = CalendarHandle::new(source.clone(), period(2025, 1), GridOptions::default());
    let handle = &calendar;
    let today = date(2025, 1, 1);

    calendar.reload().await.unwrap();
    calendar.next().await.unwrap();
    calendar.previous().await.unwrap();

    // All three fetches must be parked before any of them is let go
    let scripted = &source;
    assert!(
        eventually(move || async move { scripted.calendar_calls.load(Ordering::SeqCst) == 3 })
            .await
    );

    source.release(period(2025, 2));
    source.release(period(2025, 1));
    source.release(period(2025, 1));

    assert!(
        eventually(move || async move {
            let snapshot = handle.snapshot(today).await.unwrap();
            snapshot.status == FetchStatus::Ready && snapshot.stale_discarded == 2
        })
        .await
    );

    let snapshot = calendar.snapshot(today).await.unwrap();
    assert_eq!(snapshot.period, period(2025, 1));
    assert_eq!(snapshot.grid.day(20).unwrap().events.len(), 1);
}

#[tokio::test]
async fn test_february_grid_end_to_end() {
    let source = ScriptedSource::new(fixture());
    let calendar = CalendarHandle::new(source, period(2025, 1), GridOptions::default());
    let handle = &calendar;
    let today = date(2025, 2, 14);

    calendar.show(period(2025, 2)).await.unwrap();
    assert!(
        eventually(move || async move {
            handle.snapshot(today).await.unwrap().status.is_ready()
        })
        .await
    );

    let grid = calendar.snapshot(today).await.unwrap().grid;
    // 2025-02-01 is a Saturday
    assert_eq!(grid.leading_padding(), 6);
    assert_eq!(grid.cells.iter().filter(|c| !c.is_padding()).count(), 28);
    let cell = grid.day(14).unwrap();
    assert!(cell.is_today);
    assert_eq!(grid.markers(cell).len(), 2);
    assert!(grid.day(3).unwrap().events.is_empty());
}

#[tokio::test]
async fn test_navigation_across_year_boundary() {
    let source = ScriptedSource::new(fixture());
    let calendar = CalendarHandle::new(source, period(2025, 1), GridOptions::default());
    let handle = &calendar;
    let today = date(2025, 3, 1);

    calendar.show(period(2024, 12)).await.unwrap();
    assert_eq!(calendar.next().await.unwrap(), period(2025, 1));
    calendar.show(period(2025, 3)).await.unwrap();

    assert!(
        eventually(move || async move {
            handle.snapshot(today).await.unwrap().status.is_ready()
        })
        .await
    );
    let snapshot = calendar.snapshot(today).await.unwrap();
    assert_eq!(snapshot.period, period(2025, 3));
    assert_eq!(snapshot.grid.day(3).unwrap().events.len(), 1);
}
