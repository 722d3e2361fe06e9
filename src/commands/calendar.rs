use crate::components::calendar::{CalendarSnapshot, DayCell, EventType, MonthGrid};
use crate::utils::fetch::FetchStatus;
use crate::utils::time::format_iso_date;
use rust_i18n::t;
use std::fmt::Write;

const CELL_WIDTH: usize = 7;

fn event_label(event_type: EventType) -> String {
    match event_type {
        EventType::ApplicationStart => t!("event_application_start").to_string(),
        EventType::ApplicationEnd => t!("event_application_end").to_string(),
        EventType::Deployment => t!("event_deployment").to_string(),
    }
}

fn marker_symbol(event_type: EventType) -> char {
    match event_type {
        EventType::ApplicationStart => 'S',
        EventType::ApplicationEnd => 'E',
        EventType::Deployment => 'D',
    }
}

/// One grid cell, always `CELL_WIDTH` characters wide
fn render_cell(grid: &MonthGrid, cell: &DayCell) -> String {
    let Some(day) = cell.day else {
        return " ".repeat(CELL_WIDTH);
    };

    let mut markers: String = grid
        .markers(cell)
        .iter()
        .map(|event| marker_symbol(event.event_type))
        .collect();
    if grid.overflow(cell) > 0 {
        markers.push('+');
    }

    let today = if cell.is_today { '>' } else { ' ' };
    format!("{}{:>2}{:<4}", today, day, markers)
}

/// Month grid as text, one week per line
pub fn render_month(snapshot: &CalendarSnapshot) -> String {
    let mut out = String::new();
    let grid = &snapshot.grid;

    let _ = writeln!(out, "{}", snapshot.period);
    let header: String = t!("weekday_header")
        .split_whitespace()
        .map(|name| format!("{:^width$}", name, width = CELL_WIDTH))
        .collect();
    let _ = writeln!(out, "{}", header.trim_end());

    for week in grid.weeks() {
        let line: String = week.iter().map(|cell| render_cell(grid, cell)).collect();
        let _ = writeln!(out, "{}", line.trim_end());
    }

    match &snapshot.status {
        FetchStatus::Loading => {
            let _ = writeln!(out, "{}", t!("loading"));
        }
        FetchStatus::Failed(error) => {
            let _ = writeln!(out, "{}", t!("load_failed", error = error));
        }
        FetchStatus::Idle | FetchStatus::Ready => {}
    }
    let _ = writeln!(out, "{}", t!("legend"));

    out
}

/// Full event list of one day
pub fn render_day(grid: &MonthGrid, day: u32) -> String {
    let period = grid.period;
    let Some(cell) = grid.day(day) else {
        return format!("{}\n", t!("no_such_day", period = period, day = day));
    };

    let date = format_iso_date(period.year(), period.month(), day);
    if cell.events.is_empty() {
        return format!("{}\n", t!("no_events", date = date));
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", t!("day_title", date = date));
    for event in &cell.events {
        let _ = write!(
            out,
            "  [{}] {} ({})",
            event_label(event.event_type),
            event.project_name,
            event.project_id
        );
        if let Some(description) = &event.description {
            let _ = write!(out, " - {}", description);
        }
        out.push('\n');
    }
    out
}
