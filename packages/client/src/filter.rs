// ABOUTME: Pure filtering and sorting over a task collection
// ABOUTME: Search, exact-match filters with an "all" wildcard, and stable sort keys

use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use icu_collator::{Collator, CollatorOptions};
use taskflow_core::{Task, TaskPriority, TaskStatus};
use tracing::warn;

/// Literal accepted as the wildcard for any filter
pub const ALL: &str = "all";

/// Either every value or exactly one
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(expected) => expected == value,
        }
    }
}

impl<T: FromStr> FromStr for Selection<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(ALL) {
            Ok(Selection::All)
        } else {
            s.parse().map(Selection::Only)
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str(ALL),
            Selection::Only(value) => write!(f, "{}", value),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Case-insensitive substring of title or description
    pub search: String,
    pub status: Selection<TaskStatus>,
    /// Category name
    pub category: Selection<String>,
    pub priority: Selection<TaskPriority>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = task.title.to_lowercase().contains(&needle)
            || task.description.to_lowercase().contains(&needle);

        matches_search
            && self.status.matches(&task.status)
            && self.category.matches(&task.category)
            && self.priority.matches(&task.priority)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Earliest due date first
    #[default]
    DueDate,
    /// High, then medium, then low
    Priority,
    Title,
    /// Keep input order
    Unsorted,
}

impl FromStr for SortKey {
    type Err = Infallible;

    /// Unrecognised keys leave the order untouched
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "duedate" => SortKey::DueDate,
            "priority" => SortKey::Priority,
            "title" => SortKey::Title,
            _ => SortKey::Unsorted,
        };
        Ok(key)
    }
}

/// Root-locale collator: accents and punctuation are weighed by the Unicode
/// collation algorithm, and lowercase sorts before uppercase on ties.
fn title_collator() -> Option<Collator> {
    match Collator::try_new(&Default::default(), CollatorOptions::new()) {
        Ok(collator) => Some(collator),
        Err(e) => {
            warn!("Title collation unavailable, falling back to case-folded order: {}", e);
            None
        }
    }
}

fn collate(collator: Option<&Collator>, a: &str, b: &str) -> Ordering {
    match collator {
        Some(collator) => collator.compare(a, b),
        None => a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| b.cmp(a)),
    }
}

/// Locale-aware title ordering
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    collate(title_collator().as_ref(), a, b)
}

fn compare(a: &Task, b: &Task, sort: SortKey, collator: Option<&Collator>) -> Ordering {
    match sort {
        SortKey::DueDate => a.due_date.cmp(&b.due_date),
        SortKey::Priority => a.priority.rank().cmp(&b.priority.rank()),
        SortKey::Title => collate(collator, &a.title, &b.title),
        SortKey::Unsorted => Ordering::Equal,
    }
}

/// Filter then stably sort. The input is never reordered.
pub fn apply(tasks: &[Task], filter: &TaskFilter, sort: SortKey) -> Vec<Task> {
    let mut selected: Vec<Task> = tasks.iter().filter(|t| filter.matches(t)).cloned().collect();
    let collator = match sort {
        SortKey::Title => title_collator(),
        _ => None,
    };
    selected.sort_by(|a, b| compare(a, b, sort, collator.as_ref()));
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn task(id: &str, title: &str, due: (i32, u32, u32)) -> Task {
        let now = Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap();
        Task {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            category: "Work".to_string(),
            due_date: Utc.with_ymd_and_hms(due.0, due.1, due.2, 0, 0, 0).unwrap(),
            created_at: now,
            updated_at: now,
            user_id: "1".to_string(),
        }
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    fn sample() -> Vec<Task> {
        let mut a = task("a", "Write report", (2025, 4, 15));
        a.description = "Quarterly NUMBERS".to_string();
        a.status = TaskStatus::InProgress;
        a.priority = TaskPriority::High;

        let mut b = task("b", "Buy milk", (2025, 4, 10));
        b.category = "Personal".to_string();
        b.priority = TaskPriority::Low;

        let mut c = task("c", "Read book", (2025, 4, 12));
        c.category = "Learning".to_string();
        c.status = TaskStatus::Done;

        let mut d = task("d", "Review numbers", (2025, 4, 10));
        d.priority = TaskPriority::High;

        vec![a, b, c, d]
    }

    #[test]
    fn test_default_filter_keeps_everything_sorted_by_due_date() {
        let tasks = sample();

        let result = apply(&tasks, &TaskFilter::default(), SortKey::DueDate);

        assert_eq!(ids(&result), vec!["b", "d", "c", "a"]);
    }

    #[test]
    fn test_search_is_case_insensitive_over_title_and_description() {
        let tasks = sample();
        let filter = TaskFilter {
            search: "numbers".to_string(),
            ..Default::default()
        };

        let result = apply(&tasks, &filter, SortKey::Unsorted);

        assert_eq!(ids(&result), vec!["a", "d"]);
    }

    #[test]
    fn test_status_filter_only_returns_that_status() {
        let tasks = sample();
        let filter = TaskFilter {
            status: Selection::Only(TaskStatus::Done),
            ..Default::default()
        };

        let result = apply(&tasks, &filter, SortKey::DueDate);

        assert!(result.iter().all(|t| t.status == TaskStatus::Done));
        assert_eq!(ids(&result), vec!["c"]);
    }

    #[test]
    fn test_filters_intersect() {
        let tasks = sample();
        let filter = TaskFilter {
            category: Selection::Only("Work".to_string()),
            priority: Selection::Only(TaskPriority::High),
            status: Selection::Only(TaskStatus::Todo),
            ..Default::default()
        };

        let result = apply(&tasks, &filter, SortKey::DueDate);

        assert_eq!(ids(&result), vec!["d"]);
    }

    #[test]
    fn test_priority_sort_orders_high_medium_low() {
        let tasks = sample();

        let result = apply(&tasks, &TaskFilter::default(), SortKey::Priority);

        let priorities: Vec<TaskPriority> = result.iter().map(|t| t.priority).collect();
        assert_eq!(
            priorities,
            vec![
                TaskPriority::High,
                TaskPriority::High,
                TaskPriority::Medium,
                TaskPriority::Low
            ]
        );
        // Stable among equal priorities
        assert_eq!(ids(&result[..2]), vec!["a", "d"]);
    }

    #[test]
    fn test_due_date_sort_is_non_decreasing_and_stable() {
        let tasks = sample();

        let result = apply(&tasks, &TaskFilter::default(), SortKey::DueDate);

        assert!(result.windows(2).all(|w| w[0].due_date <= w[1].due_date));
        // b and d share a due date and keep their input order
        assert_eq!(ids(&result[..2]), vec!["b", "d"]);
    }

    #[test]
    fn test_due_date_scenario_later_created_earlier_due_first() {
        let tasks = vec![task("A", "A", (2025, 4, 15)), task("B", "B", (2025, 4, 10))];

        let result = apply(&tasks, &TaskFilter::default(), SortKey::DueDate);

        assert_eq!(ids(&result), vec!["B", "A"]);
    }

    #[test]
    fn test_unknown_sort_key_keeps_order() {
        let tasks = sample();
        let sort: SortKey = "createdAt".parse().unwrap();

        let result = apply(&tasks, &TaskFilter::default(), sort);

        assert_eq!(sort, SortKey::Unsorted);
        assert_eq!(ids(&result), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let tasks = sample();
        let before = tasks.clone();

        let _ = apply(&tasks, &TaskFilter::default(), SortKey::Title);

        assert_eq!(tasks, before);
    }

    #[test]
    fn test_title_sort() {
        let tasks = vec![
            task("1", "banana", (2025, 4, 1)),
            task("2", "Apple", (2025, 4, 1)),
            task("3", "apple", (2025, 4, 1)),
            task("4", "Cherry", (2025, 4, 1)),
        ];

        let result = apply(&tasks, &TaskFilter::default(), SortKey::Title);

        assert_eq!(ids(&result), vec!["3", "2", "1", "4"]);
    }

    #[test]
    fn test_title_sort_places_accented_titles_by_base_letter() {
        let tasks = vec![
            task("1", "fig", (2025, 4, 1)),
            task("2", "Zebra", (2025, 4, 1)),
            task("3", "éclair", (2025, 4, 1)),
            task("4", "apple", (2025, 4, 1)),
        ];

        let result = apply(&tasks, &TaskFilter::default(), SortKey::Title);

        assert_eq!(ids(&result), vec!["4", "3", "1", "2"]);
    }

    #[rstest]
    #[case("éclair", "fig", Ordering::Less)]
    #[case("resume", "résumé", Ordering::Less)]
    #[case("apple", "Apple", Ordering::Less)]
    #[case("Apple", "banana", Ordering::Less)]
    #[case("~notes", "apple", Ordering::Less)]
    #[case("Zebra", "éclair", Ordering::Greater)]
    #[case("report", "report", Ordering::Equal)]
    fn test_compare_titles(#[case] a: &str, #[case] b: &str, #[case] expected: Ordering) {
        assert_eq!(compare_titles(a, b), expected);
    }

    #[rstest]
    #[case("all", Selection::All)]
    #[case("ALL", Selection::All)]
    #[case("done", Selection::Only(TaskStatus::Done))]
    #[case("in-progress", Selection::Only(TaskStatus::InProgress))]
    fn test_status_selection_parse(#[case] input: &str, #[case] expected: Selection<TaskStatus>) {
        assert_eq!(input.parse::<Selection<TaskStatus>>().unwrap(), expected);
    }

    #[rstest]
    #[case("dueDate", SortKey::DueDate)]
    #[case("due-date", SortKey::DueDate)]
    #[case("priority", SortKey::Priority)]
    #[case("Title", SortKey::Title)]
    #[case("whatever", SortKey::Unsorted)]
    fn test_sort_key_parse(#[case] input: &str, #[case] expected: SortKey) {
        assert_eq!(input.parse::<SortKey>().unwrap(), expected);
    }

    #[test]
    fn test_invalid_selection_is_error() {
        assert!("blocked".parse::<Selection<TaskStatus>>().is_err());
        assert_eq!(
            "Work".parse::<Selection<String>>().unwrap(),
            Selection::Only("Work".to_string())
        );
    }
}
