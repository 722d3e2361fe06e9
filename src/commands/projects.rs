use crate::components::schedule::{Project, ScheduleBoard, Section, SectionKind};
use crate::utils::fetch::FetchStatus;
use rust_i18n::t;
use std::fmt::Write;

fn section_title(kind: SectionKind) -> String {
    match kind {
        SectionKind::Requested => t!("section_requested").to_string(),
        SectionKind::Applications => t!("section_applications").to_string(),
        SectionKind::Recommended => t!("section_recommended").to_string(),
    }
}

fn render_project(project: &Project) -> String {
    let mut line = format!("  {:<8} {}", project.id, project.title);

    let mut details = vec![t!("positions", count = project.positions).to_string()];
    if let Some(deadline) = project.application_deadline {
        details.push(t!("deadline", date = deadline).to_string());
    }
    if let Some(period) = project.contract_period() {
        details.push(period);
    }
    if !project.required_skills.is_empty() {
        details.push(project.required_skills.join(", "));
    }
    if project.is_applied {
        details.push(t!("applied_tag").to_string());
    }

    let _ = write!(line, " ({})", details.join(" | "));
    line
}

/// One section with its collapse affordance
pub fn render_section(section: &Section, limit: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", section_title(section.kind()));

    match section.status() {
        FetchStatus::Loading if section.projects().is_empty() => {
            let _ = writeln!(out, "  {}", t!("loading"));
            return out;
        }
        FetchStatus::Failed(error) => {
            let _ = writeln!(out, "  {}", t!("load_failed", error = error));
        }
        _ => {}
    }

    if section.projects().is_empty() {
        if section.status().is_ready() {
            let _ = writeln!(out, "  {}", t!("section_empty"));
        }
        return out;
    }

    for project in section.visible(limit) {
        let _ = writeln!(out, "{}", render_project(project));
    }

    let hidden = section.hidden_count(limit);
    if hidden > 0 {
        let _ = writeln!(
            out,
            "  {}",
            t!("show_more", count = hidden, section = section.kind())
        );
    } else if section.is_collapsible(limit) {
        let _ = writeln!(out, "  {}", t!("show_less", section = section.kind()));
    }

    out
}

/// All three sections, separated by blank lines
pub fn render_board(board: &ScheduleBoard) -> String {
    board
        .sections()
        .map(|section| render_section(section, board.preview_limit))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::network_error;

    fn project(id: &str) -> Project {
        Project {
            id: id.to_string(),
            title: format!("Project {}", id),
            positions: 2,
            required_skills: vec!["Rust".to_string()],
            ..Default::default()
        }
    }

    fn board_with(recommended: Vec<Project>) -> ScheduleBoard {
        let mut board = ScheduleBoard::new(3);
        let id = board.recommended.begin_fetch();
        board.recommended.complete(id, Ok(recommended));
        board
    }

    #[test]
    fn test_collapsed_section_shows_more_affordance() {
        let projects: Vec<_> = (1..=5).map(|i| project(&format!("p{i}"))).collect();
        let board = board_with(projects);

        let text = render_section(&board.recommended, board.preview_limit);
        assert!(text.starts_with("Recommended projects"));
        assert!(text.contains("p3"));
        assert!(!text.contains("p4"));
        assert!(text.contains("Show 2 more (e recommended)"));
    }

    #[test]
    fn test_expanded_section_shows_everything() {
        let projects: Vec<_> = (1..=5).map(|i| project(&format!("p{i}"))).collect();
        let mut board = board_with(projects);
        board.recommended.toggle_expanded();

        let text = render_section(&board.recommended, board.preview_limit);
        assert!(text.contains("p5"));
        assert!(text.contains("Show less"));
    }

    #[test]
    fn test_project_details() {
        let mut applied = project("p1").with_applied(true);
        applied.application_deadline = chrono::NaiveDate::from_ymd_opt(2025, 2, 14);
        let line = render_project(&applied);

        assert!(line.contains("2 positions"));
        assert!(line.contains("apply by 2025-02-14"));
        assert!(line.contains("Rust"));
        assert!(line.contains("applied"));
    }

    #[test]
    fn test_section_states() {
        let mut board = board_with(vec![]);
        let id = board.requested.begin_fetch();
        board.requested.complete(id, Err(network_error("timeout")));
        board.applications.begin_fetch();

        let text = render_board(&board);
        assert!(text.contains("Could not load: Network error: timeout"));
        assert!(text.contains("Loading..."));
        assert!(text.contains("Nothing here yet"));
    }
}
