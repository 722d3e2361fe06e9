use super::models::{Project, SectionKind};
use crate::error::{not_found, Error, ScheduleResult};
use crate::utils::fetch::{FetchStatus, RequestTracker};
use tracing::{debug, warn};

/// Projects shown per collapsed section unless configured otherwise
pub const DEFAULT_PREVIEW_LIMIT: usize = 3;

/// One project list on the schedule page
#[derive(Debug, Clone)]
pub struct Section {
    kind: SectionKind,
    projects: Vec<Project>,
    status: FetchStatus,
    expanded: bool,
    tracker: RequestTracker,
}

impl Section {
    pub fn new(kind: SectionKind) -> Self {
        Self {
            kind,
            projects: Vec::new(),
            status: FetchStatus::Idle,
            expanded: false,
            tracker: RequestTracker::new(),
        }
    }

    pub fn kind(&self) -> SectionKind {
        self.kind
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn contains(&self, project_id: &str) -> bool {
        self.projects.iter().any(|p| p.id == project_id)
    }

    /// Projects to draw: all when expanded, otherwise the first `limit`
    pub fn visible(&self, limit: usize) -> &[Project] {
        if self.expanded {
            &self.projects
        } else {
            &self.projects[..self.projects.len().min(limit)]
        }
    }

    /// How many projects the "show N more" affordance hides
    pub fn hidden_count(&self, limit: usize) -> usize {
        if self.expanded {
            0
        } else {
            self.projects.len().saturating_sub(limit)
        }
    }

    /// Whether the section needs an expand/collapse toggle at all
    pub fn is_collapsible(&self, limit: usize) -> bool {
        self.projects.len() > limit
    }

    pub fn toggle_expanded(&mut self) -> bool {
        self.expanded = !self.expanded;
        self.expanded
    }

    /// Start a fetch; current projects stay visible until it lands
    pub fn begin_fetch(&mut self) -> u64 {
        self.status = FetchStatus::Loading;
        self.tracker.issue()
    }

    /// Apply a finished fetch; returns false when it was superseded
    pub fn complete(&mut self, request_id: u64, result: ScheduleResult<Vec<Project>>) -> bool {
        if !self.tracker.is_current(request_id) {
            debug!("Discarding stale {} list (request {})", self.kind, request_id);
            return false;
        }
        match result {
            Ok(projects) => {
                self.projects = projects;
                self.status = FetchStatus::Ready;
            }
            Err(e) => {
                warn!("Failed to load {} projects: {}", self.kind, e);
                self.status = FetchStatus::Failed(e.to_string());
            }
        }
        true
    }

    fn take(&mut self, project_id: &str) -> Option<Project> {
        let index = self.projects.iter().position(|p| p.id == project_id)?;
        // A fetch issued before this local change must not overwrite it
        self.tracker.invalidate();
        if self.status.is_loading() {
            self.status = FetchStatus::Ready;
        }
        Some(self.projects.remove(index))
    }

    fn push(&mut self, project: Project) {
        self.tracker.invalidate();
        if self.status.is_loading() {
            self.status = FetchStatus::Ready;
        }
        self.projects.push(project);
    }
}

/// The three schedule sections and the apply/cancel transitions between them
#[derive(Debug, Clone)]
pub struct ScheduleBoard {
    pub requested: Section,
    pub applications: Section,
    pub recommended: Section,
    pub preview_limit: usize,
}

impl Default for ScheduleBoard {
    fn default() -> Self {
        Self::new(DEFAULT_PREVIEW_LIMIT)
    }
}

impl ScheduleBoard {
    pub fn new(preview_limit: usize) -> Self {
        Self {
            requested: Section::new(SectionKind::Requested),
            applications: Section::new(SectionKind::Applications),
            recommended: Section::new(SectionKind::Recommended),
            preview_limit,
        }
    }

    pub fn section(&self, kind: SectionKind) -> &Section {
        match kind {
            SectionKind::Requested => &self.requested,
            SectionKind::Applications => &self.applications,
            SectionKind::Recommended => &self.recommended,
        }
    }

    pub fn section_mut(&mut self, kind: SectionKind) -> &mut Section {
        match kind {
            SectionKind::Requested => &mut self.requested,
            SectionKind::Applications => &mut self.applications,
            SectionKind::Recommended => &mut self.recommended,
        }
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        SectionKind::ALL.into_iter().map(move |kind| self.section(kind))
    }

    /// Precondition for applying: not yet applied, and present in recommended
    pub fn check_can_apply(&self, project_id: &str) -> ScheduleResult<()> {
        if self.applications.contains(project_id) {
            return Err(Error::AlreadyApplied(project_id.to_string()));
        }
        if !self.recommended.contains(project_id) {
            return Err(not_found(&format!(
                "project {} is not among the recommended projects",
                project_id
            )));
        }
        Ok(())
    }

    /// Precondition for cancelling: present in applications
    pub fn check_can_cancel(&self, project_id: &str) -> ScheduleResult<()> {
        if !self.applications.contains(project_id) {
            return Err(not_found(&format!(
                "no application for project {}",
                project_id
            )));
        }
        Ok(())
    }

    /// Move a project from recommended to applications after the backend accepted it
    pub fn mark_applied(&mut self, project_id: &str) -> ScheduleResult<Project> {
        self.check_can_apply(project_id)?;
        let project = self
            .recommended
            .take(project_id)
            .ok_or_else(|| not_found(&format!("project {}", project_id)))?
            .with_applied(true);
        self.applications.push(project.clone());
        Ok(project)
    }

    /// Move a project from applications back to recommended after a cancellation
    pub fn mark_cancelled(&mut self, project_id: &str) -> ScheduleResult<Project> {
        self.check_can_cancel(project_id)?;
        let project = self
            .applications
            .take(project_id)
            .ok_or_else(|| not_found(&format!("project {}", project_id)))?
            .with_applied(false);
        self.recommended.push(project.clone());
        Ok(project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::network_error;

    fn project(id: &str) -> Project {
        Project {
            id: id.to_string(),
            title: format!("Project {}", id),
            ..Default::default()
        }
    }

    fn loaded_board(recommended: Vec<Project>, applications: Vec<Project>) -> ScheduleBoard {
        let mut board = ScheduleBoard::default();
        let id = board.recommended.begin_fetch();
        board.recommended.complete(id, Ok(recommended));
        let id = board.applications.begin_fetch();
        board.applications.complete(id, Ok(applications));
        board
    }

    #[test]
    fn test_apply_moves_project() {
        let mut board = loaded_board(vec![project("p1"), project("p2")], vec![]);

        let applied = board.mark_applied("p1").unwrap();

        assert!(applied.is_applied);
        assert_eq!(board.recommended.projects(), &[project("p2")]);
        assert_eq!(board.applications.projects(), &[project("p1").with_applied(true)]);
    }

    #[test]
    fn test_apply_preconditions() {
        let board = loaded_board(vec![project("p1")], vec![project("p9").with_applied(true)]);

        assert!(matches!(board.check_can_apply("missing"), Err(Error::NotFound(_))));
        assert!(matches!(board.check_can_apply("p9"), Err(Error::AlreadyApplied(_))));
        assert!(board.check_can_apply("p1").is_ok());
    }

    #[test]
    fn test_failed_apply_leaves_board_untouched() {
        let mut board = loaded_board(vec![project("p1"), project("p2")], vec![]);
        let before = (
            board.recommended.projects().to_vec(),
            board.applications.projects().to_vec(),
        );

        assert!(board.mark_applied("missing").is_err());

        assert_eq!(board.recommended.projects(), before.0.as_slice());
        assert_eq!(board.applications.projects(), before.1.as_slice());
    }

    #[test]
    fn test_cancel_moves_project_back() {
        let mut board = loaded_board(vec![], vec![project("p1").with_applied(true)]);

        let cancelled = board.mark_cancelled("p1").unwrap();

        assert!(!cancelled.is_applied);
        assert!(board.applications.projects().is_empty());
        assert_eq!(board.recommended.projects(), &[project("p1")]);
        assert!(matches!(board.mark_cancelled("p1"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_fetch_issued_before_patch_is_discarded() {
        let mut board = loaded_board(vec![project("p1"), project("p2")], vec![]);
        let in_flight = board.recommended.begin_fetch();

        board.mark_applied("p1").unwrap();

        // The old response still lists p1 and must not resurrect it
        assert!(!board
            .recommended
            .complete(in_flight, Ok(vec![project("p1"), project("p2")])));
        assert_eq!(board.recommended.projects(), &[project("p2")]);
        assert!(board.recommended.status().is_ready());
    }

    #[test]
    fn test_refetch_keeps_projects_visible() {
        let mut board = loaded_board(vec![project("p1")], vec![]);
        board.recommended.begin_fetch();

        assert!(board.recommended.status().is_loading());
        assert_eq!(board.recommended.projects().len(), 1);
    }

    #[test]
    fn test_failure_is_isolated_per_section() {
        let mut board = loaded_board(vec![project("p1")], vec![]);
        let id = board.requested.begin_fetch();
        board.requested.complete(id, Err(network_error("timeout")));

        assert!(board.requested.status().failure().is_some());
        assert!(board.recommended.status().is_ready());
        assert!(board.applications.status().is_ready());
    }

    #[test]
    fn test_expand_collapse() {
        let projects: Vec<_> = (1..=5).map(|i| project(&format!("p{i}"))).collect();
        let mut board = loaded_board(projects, vec![]);
        let limit = board.preview_limit;
        let section = &mut board.recommended;

        assert!(section.is_collapsible(limit));
        assert_eq!(section.visible(limit).len(), 3);
        assert_eq!(section.hidden_count(limit), 2);

        assert!(section.toggle_expanded());
        assert_eq!(section.visible(limit).len(), 5);
        assert_eq!(section.hidden_count(limit), 0);

        assert!(!section.toggle_expanded());
        assert_eq!(section.visible(limit).len(), 3);

        // Short lists never need the toggle
        assert!(!board.applications.is_collapsible(limit));
        assert_eq!(board.applications.hidden_count(limit), 0);
    }
}
