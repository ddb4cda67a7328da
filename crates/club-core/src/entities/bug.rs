//! Bug report entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Triage state of a bug report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BugStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl BugStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::InProgress => "IN_PROGRESS",
            Self::Resolved => "RESOLVED",
            Self::Closed => "CLOSED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "OPEN" => Some(Self::Open),
            "IN_PROGRESS" => Some(Self::InProgress),
            "RESOLVED" => Some(Self::Resolved),
            "CLOSED" => Some(Self::Closed),
            _ => None,
        }
    }
}

/// Reporter-assigned severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BugPriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl BugPriority {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "LOW" => Some(Self::Low),
            "MEDIUM" => Some(Self::Medium),
            "HIGH" => Some(Self::High),
            "CRITICAL" => Some(Self::Critical),
            _ => None,
        }
    }
}

/// Bug report entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bug {
    pub id: Snowflake,
    pub title: String,
    pub description: String,
    /// Free-form label for where the bug was found (site, app, project name)
    pub area: Option<String>,
    pub priority: BugPriority,
    pub status: BugStatus,
    pub reporter_id: Snowflake,
    pub assignee_id: Option<Snowflake>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bug {
    pub fn new(
        id: Snowflake,
        title: String,
        description: String,
        area: Option<String>,
        priority: BugPriority,
        reporter_id: Snowflake,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            title,
            description,
            area,
            priority,
            status: BugStatus::Open,
            reporter_id,
            assignee_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_status(&mut self, status: BugStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    pub fn assign(&mut self, assignee_id: Option<Snowflake>) {
        self.assignee_id = assignee_id;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_bug_defaults() {
        let bug = Bug::new(
            Snowflake::new(40),
            "Login broken".to_string(),
            "500 on submit".to_string(),
            Some("website".to_string()),
            BugPriority::High,
            Snowflake::new(1),
        );
        assert_eq!(bug.status, BugStatus::Open);
        assert!(bug.assignee_id.is_none());
    }

    #[test]
    fn test_priority_ordering() {
        assert!(BugPriority::Critical > BugPriority::High);
        assert!(BugPriority::Low < BugPriority::Medium);
    }

    #[test]
    fn test_status_roundtrip() {
        for s in [
            BugStatus::Open,
            BugStatus::InProgress,
            BugStatus::Resolved,
            BugStatus::Closed,
        ] {
            assert_eq!(BugStatus::parse(s.as_str()), Some(s));
        }
        assert_eq!(BugStatus::parse("WONTFIX"), None);
    }
}
