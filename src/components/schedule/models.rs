use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Recruitment state of a project
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    #[default]
    Recruiting,
    InProgress,
    Completed,
    Closed,
    /// Any status this client does not know about yet
    #[serde(other)]
    Unknown,
}

/// A freelance project as listed in the schedule sections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub positions: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_deadline: Option<NaiveDate>,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub is_applied: bool,
}

impl Project {
    /// Copy of the project with the applied flag set
    pub fn with_applied(&self, applied: bool) -> Self {
        Self {
            is_applied: applied,
            ..self.clone()
        }
    }

    /// Contract period as "start ~ end" when known
    pub fn contract_period(&self) -> Option<String> {
        match (self.contract_start_date, self.contract_end_date) {
            (Some(start), Some(end)) => Some(format!("{} ~ {}", start, end)),
            (Some(start), None) => Some(format!("{} ~", start)),
            (None, Some(end)) => Some(format!("~ {}", end)),
            (None, None) => None,
        }
    }
}

/// The three project lists shown on the schedule page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// Projects an administrator requested the user for
    Requested,
    /// Projects the user applied to
    Applications,
    /// Candidate projects not yet applied to
    Recommended,
}

impl SectionKind {
    pub const ALL: [SectionKind; 3] = [
        SectionKind::Requested,
        SectionKind::Applications,
        SectionKind::Recommended,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SectionKind::Requested => "requested",
            SectionKind::Applications => "applications",
            SectionKind::Recommended => "recommended",
        }
    }

    /// Parse a section name as typed by the user
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "requested" | "req" => Some(SectionKind::Requested),
            "applications" | "applied" | "app" => Some(SectionKind::Applications),
            "recommended" | "rec" => Some(SectionKind::Recommended),
            _ => None,
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_wire_format() {
        let json = r#"{
            "id": "p-7",
            "title": "Attendance API",
            "overview": "Rewrite the attendance service",
            "requiredSkills": ["Rust", "PostgreSQL"],
            "positions": 2,
            "contractStartDate": "2025-03-01",
            "applicationDeadline": "2025-02-14",
            "status": "RECRUITING"
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();

        assert_eq!(project.required_skills, vec!["Rust", "PostgreSQL"]);
        assert_eq!(project.positions, 2);
        assert_eq!(project.status, ProjectStatus::Recruiting);
        assert!(!project.is_applied);
        assert_eq!(project.contract_period().as_deref(), Some("2025-03-01 ~"));
    }

    #[test]
    fn test_unknown_status_does_not_fail() {
        let project: Project =
            serde_json::from_str(r#"{"id": "p-1", "title": "x", "status": "ON_HOLD"}"#).unwrap();
        assert_eq!(project.status, ProjectStatus::Unknown);
    }

    #[test]
    fn test_section_kind_parse() {
        assert_eq!(SectionKind::parse("Recommended"), Some(SectionKind::Recommended));
        assert_eq!(SectionKind::parse("app"), Some(SectionKind::Applications));
        assert_eq!(SectionKind::parse("notices"), None);
    }
}
