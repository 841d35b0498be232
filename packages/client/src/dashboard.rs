// ABOUTME: Dashboard aggregation over the task collection
// ABOUTME: Status totals, tasks due soon, open high-priority work and recent completions

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use taskflow_core::{Task, TaskPriority, TaskStatus};

/// Window for "due soon"
pub const DUE_SOON_DAYS: i64 = 3;

/// Number of recently completed tasks shown
pub const RECENT_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total: usize,
    pub todo: usize,
    pub in_progress: usize,
    pub done: usize,
    /// Open tasks due between now and three days from now
    pub due_soon: Vec<Task>,
    /// Open high-priority tasks
    pub high_priority: Vec<Task>,
    /// Done tasks, most recently updated first
    pub recently_completed: Vec<Task>,
    /// Task count per category name
    pub by_category: BTreeMap<String, usize>,
}

impl DashboardSummary {
    pub fn build(tasks: &[Task], now: DateTime<Utc>) -> Self {
        let count = |status: TaskStatus| tasks.iter().filter(|t| t.status == status).count();
        let horizon = now + Duration::days(DUE_SOON_DAYS);

        let due_soon = tasks
            .iter()
            .filter(|t| t.status != TaskStatus::Done)
            .filter(|t| t.due_date >= now && t.due_date <= horizon)
            .cloned()
            .collect();

        let high_priority = tasks
            .iter()
            .filter(|t| t.priority == TaskPriority::High && t.status != TaskStatus::Done)
            .cloned()
            .collect();

        let mut recently_completed: Vec<Task> = tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Done)
            .cloned()
            .collect();
        recently_completed.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        recently_completed.truncate(RECENT_LIMIT);

        let mut by_category = BTreeMap::new();
        for task in tasks {
            *by_category.entry(task.category.clone()).or_insert(0) += 1;
        }

        Self {
            total: tasks.len(),
            todo: count(TaskStatus::Todo),
            in_progress: count(TaskStatus::InProgress),
            done: count(TaskStatus::Done),
            due_soon,
            high_priority,
            recently_completed,
            by_category,
        }
    }
}
