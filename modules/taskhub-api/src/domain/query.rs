//! Task query engine: filter and sort resolution for `GET /tasks`.
//!
//! Status and priority filters are exact-match predicates ANDed together;
//! the owner scope is always ANDed in by the service and cannot be bypassed
//! by any filter value. Created-at orderings are pushed down to the store;
//! priority orderings use an explicit total order (high=0, medium=1, low=2)
//! that the store cannot express over the lowercase names, applied in memory
//! with a stable sort so that ties keep retrieval order.

use std::str::FromStr;

use crate::domain::error::DomainError;
use crate::domain::model::{Task, TaskPriority, TaskStatus};

/// Exact-match predicates for the task listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
}

impl TaskFilter {
    /// Build a filter from raw query values. `None` and `"all"` mean no
    /// constraint; anything else must parse as an exact value.
    pub fn from_params(
        status: Option<&str>,
        priority: Option<&str>,
    ) -> Result<Self, DomainError> {
        let status = match status {
            None | Some("all") => None,
            Some(raw) => Some(raw.parse::<TaskStatus>()?),
        };
        let priority = match priority {
            None | Some("all") => None,
            Some(raw) => Some(raw.parse::<TaskPriority>()?),
        };
        Ok(Self { status, priority })
    }
}

/// Created-at ordering the store can express natively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreatedOrder {
    Desc,
    Asc,
}

/// Sort contract for the task listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskSort {
    /// Newest first (the default).
    #[default]
    CreatedAtDesc,
    CreatedAtAsc,
    /// High severity first.
    PriorityHigh,
    /// Low severity first.
    PriorityLow,
}

impl TaskSort {
    /// Parse the `sortBy` query value; absent means the default.
    pub fn from_param(raw: Option<&str>) -> Result<Self, DomainError> {
        match raw {
            None => Ok(Self::default()),
            Some(raw) => raw.parse(),
        }
    }

    /// The ordering to push down to the store, if this sort has one.
    pub fn created_order(self) -> Option<CreatedOrder> {
        match self {
            TaskSort::CreatedAtDesc => Some(CreatedOrder::Desc),
            TaskSort::CreatedAtAsc => Some(CreatedOrder::Asc),
            TaskSort::PriorityHigh | TaskSort::PriorityLow => None,
        }
    }

    /// Apply the in-memory part of the sort contract. Stable: tasks with
    /// equal priority keep their retrieval order.
    pub fn apply_in_memory(self, tasks: &mut [Task]) {
        match self {
            TaskSort::CreatedAtDesc | TaskSort::CreatedAtAsc => {}
            TaskSort::PriorityHigh => tasks.sort_by_key(|t| t.priority.rank()),
            TaskSort::PriorityLow => {
                tasks.sort_by_key(|t| std::cmp::Reverse(t.priority.rank()))
            }
        }
    }
}

impl FromStr for TaskSort {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createdAt_desc" => Ok(TaskSort::CreatedAtDesc),
            "createdAt_asc" => Ok(TaskSort::CreatedAtAsc),
            "priority_high" => Ok(TaskSort::PriorityHigh),
            "priority_low" => Ok(TaskSort::PriorityLow),
            other => Err(DomainError::validation(format!(
                "'{other}' is not supported as sortBy"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn task(title: &str, priority: TaskPriority) -> Task {
        let now = Utc::now();
        Task {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: String::new(),
            priority,
            status: TaskStatus::Pending,
            owner_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn priority_rank_is_severity_order_not_string_order() {
        assert!(TaskPriority::High.rank() < TaskPriority::Medium.rank());
        assert!(TaskPriority::Medium.rank() < TaskPriority::Low.rank());
        // Lexical order of the names would put "high" < "low" < "medium".
        assert!(TaskPriority::High.as_str() < TaskPriority::Low.as_str());
        assert!(TaskPriority::Low.as_str() < TaskPriority::Medium.as_str());
    }

    #[test]
    fn priority_high_sorts_high_medium_low() {
        let mut tasks = vec![
            task("a", TaskPriority::Low),
            task("b", TaskPriority::High),
            task("c", TaskPriority::Medium),
        ];
        TaskSort::PriorityHigh.apply_in_memory(&mut tasks);
        assert_eq!(titles(&tasks), vec!["b", "c", "a"]);
    }

    #[test]
    fn priority_low_sorts_low_medium_high() {
        let mut tasks = vec![
            task("a", TaskPriority::Low),
            task("b", TaskPriority::High),
            task("c", TaskPriority::Medium),
        ];
        TaskSort::PriorityLow.apply_in_memory(&mut tasks);
        assert_eq!(titles(&tasks), vec!["a", "c", "b"]);
    }

    #[test]
    fn priority_ties_keep_retrieval_order() {
        let mut tasks = vec![
            task("first", TaskPriority::Medium),
            task("second", TaskPriority::High),
            task("third", TaskPriority::Medium),
            task("fourth", TaskPriority::Medium),
        ];
        TaskSort::PriorityHigh.apply_in_memory(&mut tasks);
        assert_eq!(titles(&tasks), vec!["second", "first", "third", "fourth"]);
    }

    #[test]
    fn created_sorts_do_not_touch_retrieval_order() {
        let mut tasks = vec![
            task("a", TaskPriority::Low),
            task("b", TaskPriority::High),
        ];
        TaskSort::CreatedAtDesc.apply_in_memory(&mut tasks);
        assert_eq!(titles(&tasks), vec!["a", "b"]);
        assert_eq!(
            TaskSort::CreatedAtDesc.created_order(),
            Some(CreatedOrder::Desc)
        );
        assert_eq!(
            TaskSort::CreatedAtAsc.created_order(),
            Some(CreatedOrder::Asc)
        );
        assert_eq!(TaskSort::PriorityHigh.created_order(), None);
    }

    #[test]
    fn sort_param_defaults_to_created_desc() {
        assert_eq!(TaskSort::from_param(None).unwrap(), TaskSort::CreatedAtDesc);
        assert_eq!(
            TaskSort::from_param(Some("priority_high")).unwrap(),
            TaskSort::PriorityHigh
        );
        assert!(TaskSort::from_param(Some("newest")).is_err());
    }

    #[test]
    fn filter_treats_all_and_absent_as_no_constraint() {
        let filter = TaskFilter::from_params(None, Some("all")).unwrap();
        assert_eq!(filter, TaskFilter::default());

        let filter = TaskFilter::from_params(Some("completed"), Some("high")).unwrap();
        assert_eq!(filter.status, Some(TaskStatus::Completed));
        assert_eq!(filter.priority, Some(TaskPriority::High));
    }

    #[test]
    fn filter_rejects_unknown_values() {
        assert!(TaskFilter::from_params(Some("done"), None).is_err());
        assert!(TaskFilter::from_params(None, Some("urgent")).is_err());
    }
}
