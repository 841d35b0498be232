// ABOUTME: Entity definitions for tasks, categories and users
// ABOUTME: Create/update inputs and the field-level merge rules applied to them

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dates;
use crate::validation::{
    validate_category_create, validate_category_update, validate_task_create,
    validate_task_update, ValidationError,
};

/// Returned when a status or priority string is not one of the known values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind} '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Done => "done",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "todo" => Ok(TaskStatus::Todo),
            "in-progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            _ => Err(ParseEnumError {
                kind: "status",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 3] = [TaskPriority::High, TaskPriority::Medium, TaskPriority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }

    /// Sort rank: high sorts first
    pub fn rank(&self) -> u8 {
        match self {
            TaskPriority::High => 0,
            TaskPriority::Medium => 1,
            TaskPriority::Low => 2,
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            _ => Err(ParseEnumError {
                kind: "priority",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,

    // Category name, not id
    #[serde(default)]
    pub category: String,

    #[serde(deserialize_with = "dates::deserialize")]
    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: String,
}

impl Task {
    /// Build a persisted task from create input.
    ///
    /// `owner` is used when the input does not name a user. Both timestamps
    /// are set to `now`.
    pub fn from_input(
        id: String,
        owner: &str,
        input: TaskCreateInput,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        validate_task_create(&input)?;
        let due_date = input
            .due_date
            .ok_or_else(|| ValidationError::new("dueDate", "Due date is required"))?;

        Ok(Task {
            id,
            title: input.title,
            description: input.description,
            status: input.status.unwrap_or_default(),
            priority: input.priority.unwrap_or_default(),
            category: input.category,
            due_date,
            created_at: now,
            updated_at: now,
            user_id: input.user_id.unwrap_or_else(|| owner.to_string()),
        })
    }

    /// Merge a partial update. Only supplied fields change; `updated_at`
    /// advances to `now` and never moves backwards. Nothing is modified
    /// when validation fails.
    pub fn apply_update(
        &mut self,
        input: TaskUpdateInput,
        now: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        validate_task_update(&input)?;

        if let Some(title) = input.title {
            self.title = title;
        }
        if let Some(description) = input.description {
            self.description = description;
        }
        if let Some(status) = input.status {
            self.status = status;
        }
        if let Some(priority) = input.priority {
            self.priority = priority;
        }
        if let Some(category) = input.category {
            self.category = category;
        }
        if let Some(due_date) = input.due_date {
            self.due_date = due_date;
        }
        self.updated_at = now.max(self.updated_at);

        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCreateInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(default)]
    pub category: String,
    #[serde(
        default,
        deserialize_with = "dates::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdateInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(
        default,
        deserialize_with = "dates::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub color: String,
    pub user_id: String,
}

impl Category {
    pub fn from_input(
        id: String,
        owner: &str,
        input: CategoryCreateInput,
    ) -> Result<Self, ValidationError> {
        validate_category_create(&input)?;

        Ok(Category {
            id,
            name: input.name,
            color: input.color,
            user_id: input.user_id.unwrap_or_else(|| owner.to_string()),
        })
    }

    /// Merge a partial update. Tasks referencing the old name are not touched.
    pub fn apply_update(&mut self, input: CategoryUpdateInput) -> Result<(), ValidationError> {
        validate_category_update(&input)?;

        if let Some(name) = input.name {
            self.name = name;
        }
        if let Some(color) = input.color {
            self.color = color;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCreateInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdateInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn sample_task() -> Task {
        let created = Utc.with_ymd_and_hms(2025, 4, 1, 8, 0, 0).unwrap();
        Task::from_input(
            "t1".to_string(),
            "1",
            TaskCreateInput {
                title: "Write report".to_string(),
                description: "Quarterly numbers".to_string(),
                category: "Work".to_string(),
                due_date: Some(Utc.with_ymd_and_hms(2025, 4, 15, 0, 0, 0).unwrap()),
                ..Default::default()
            },
            created,
        )
        .unwrap()
    }

    #[test]
    fn test_from_input_assigns_defaults_and_timestamps() {
        let task = sample_task();

        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert_eq!(task.user_id, "1");
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn test_apply_update_changes_only_named_fields() {
        let mut task = sample_task();
        let before = task.clone();
        let later = before.updated_at + Duration::minutes(5);

        task.apply_update(
            TaskUpdateInput {
                status: Some(TaskStatus::Done),
                ..Default::default()
            },
            later,
        )
        .unwrap();

        assert_eq!(task.status, TaskStatus::Done);
        assert_eq!(task.updated_at, later);
        assert_eq!(
            Task {
                status: before.status,
                updated_at: before.updated_at,
                ..task.clone()
            },
            before
        );
    }

    #[test]
    fn test_apply_update_never_moves_updated_at_backwards() {
        let mut task = sample_task();
        let previous = task.updated_at;

        task.apply_update(TaskUpdateInput::default(), previous - Duration::hours(1))
            .unwrap();

        assert_eq!(task.updated_at, previous);
        assert_eq!(task.created_at, previous);
    }

    #[test]
    fn test_apply_update_rejected_leaves_task_untouched() {
        let mut task = sample_task();
        let before = task.clone();

        let result = task.apply_update(
            TaskUpdateInput {
                title: Some("  ".to_string()),
                status: Some(TaskStatus::Done),
                ..Default::default()
            },
            Utc::now(),
        );

        assert!(result.is_err());
        assert_eq!(task, before);
    }

    #[test]
    fn test_task_wire_format_is_camel_case() {
        let task = sample_task();
        let value = serde_json::to_value(&task).unwrap();

        assert_eq!(value["dueDate"], "2025-04-15T00:00:00Z");
        assert_eq!(value["userId"], "1");
        assert_eq!(value["status"], "todo");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
    }

    #[test]
    fn test_create_input_accepts_bare_date_and_kebab_status() {
        let input: TaskCreateInput = serde_json::from_str(
            r#"{"title":"A","status":"in-progress","priority":"high","dueDate":"2025-04-15"}"#,
        )
        .unwrap();

        assert_eq!(input.status, Some(TaskStatus::InProgress));
        assert_eq!(input.priority, Some(TaskPriority::High));
        assert_eq!(
            input.due_date,
            Some(Utc.with_ymd_and_hms(2025, 4, 15, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_update_input_ignores_identity_and_timestamps() {
        let input: TaskUpdateInput = serde_json::from_str(
            r#"{"id":"other","createdAt":"2000-01-01T00:00:00Z","title":"Renamed"}"#,
        )
        .unwrap();

        assert_eq!(
            input,
            TaskUpdateInput {
                title: Some("Renamed".to_string()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_status_and_priority_parse() {
        assert_eq!("done".parse::<TaskStatus>().unwrap(), TaskStatus::Done);
        assert_eq!("In-Progress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert!("blocked".parse::<TaskStatus>().is_err());
        assert_eq!("HIGH".parse::<TaskPriority>().unwrap(), TaskPriority::High);
        assert!(TaskPriority::High.rank() < TaskPriority::Low.rank());
    }

    #[test]
    fn test_category_rename_keeps_color() {
        let mut category = Category::from_input(
            "cat-1".to_string(),
            "1",
            CategoryCreateInput {
                name: "Work".to_string(),
                color: "#0ea5e9".to_string(),
                user_id: None,
            },
        )
        .unwrap();

        category
            .apply_update(CategoryUpdateInput {
                name: Some("Office".to_string()),
                color: None,
            })
            .unwrap();

        assert_eq!(category.name, "Office");
        assert_eq!(category.color, "#0ea5e9");
    }
}
