//! Task board of one flat: tasks grouped by category, with optimistic
//! completion and per-category vendor/payment/billing assignment.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::mutation::{Mutation, MutationState};
use crate::progress::percentage;
use crate::store::{CategoryMeta, SheetStore};
use crate::types::{TaskRecord, non_blank};
use crate::{Error, Result};

/// Assignee shown for tasks without a vendor.
pub const UNASSIGNED: &str = "Unassigned";

/// One task on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardTask {
    /// Task id.
    pub id: Option<String>,
    /// What to do.
    pub name: String,
    /// Completion flag, flipped optimistically by [`TaskBoard::mark_complete`].
    pub completed: bool,
    /// Vendor name or [`UNASSIGNED`].
    pub assignee: String,
    /// Task number sent with the completion update.
    pub task_no: Option<String>,
    /// Last completion attempt.
    pub mutation: MutationState,
}

impl BoardTask {
    fn from_record(record: &TaskRecord) -> Self {
        Self {
            id: record.task_id.clone(),
            name: record.action.clone().unwrap_or_default(),
            completed: record.is_completed(),
            assignee: non_blank(record.vendor_name.as_deref())
                .unwrap_or(UNASSIGNED)
                .to_string(),
            task_no: record.task_no.clone(),
            mutation: MutationState::Idle,
        }
    }
}

/// Tasks of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroup {
    /// Position of the group, counting from 1.
    pub id: usize,
    /// Category name.
    pub category: String,
    /// Vendor taken from the group's first record.
    pub vendor_name: String,
    /// Payment value taken from the group's first record.
    pub payment: String,
    /// Billing value taken from the group's first record.
    pub billing: String,
    /// Tasks in input order.
    pub tasks: Vec<BoardTask>,
    /// Set once category metadata was accepted by the store.
    pub submitted: bool,
}

impl CategoryGroup {
    /// Number of completed tasks.
    pub fn completed(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    /// Rounded completion percentage.
    pub fn percentage(&self) -> u8 {
        percentage(self.completed(), self.tasks.len())
    }
}

/// Category filter of the board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every group.
    #[default]
    All,
    /// Only the group with exactly this name.
    Only(String),
}

impl CategoryFilter {
    /// Whether a group passes the filter.
    pub fn matches(&self, group: &CategoryGroup) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(name) => group.category == *name,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(if s == "All" {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(s.to_string())
        })
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("All"),
            CategoryFilter::Only(name) => f.write_str(name),
        }
    }
}

/// Address of a task on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskRef {
    /// Group id (from 1).
    pub group_id: usize,
    /// Index of the task within its group.
    pub index: usize,
}

/// A completion that was applied locally and awaits the store's answer.
#[derive(Debug)]
pub struct PendingCompletion {
    task: TaskRef,
    task_no: String,
    mutation: Mutation,
}

impl PendingCompletion {
    /// Task being completed.
    pub fn task(&self) -> TaskRef {
        self.task
    }

    /// Task number sent to the store.
    pub fn task_no(&self) -> &str {
        &self.task_no
    }
}

/// The task board of one flat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskBoard {
    building_name: String,
    groups: Vec<CategoryGroup>,
}

impl TaskBoard {
    /// Groups a flat's task records by category, in first-seen order.
    pub fn from_records(building_name: impl Into<String>, records: &[TaskRecord]) -> Self {
        let mut groups: Vec<CategoryGroup> = Vec::new();
        for record in records {
            let category = record.category_or_default();
            let index = match groups.iter().position(|g| g.category == category) {
                Some(index) => index,
                None => {
                    groups.push(CategoryGroup {
                        id: groups.len() + 1,
                        category: category.to_string(),
                        vendor_name: record.vendor_name.clone().unwrap_or_default(),
                        payment: record.payment.as_deref().unwrap_or_default().to_string(),
                        billing: record.bill.as_deref().unwrap_or_default().to_string(),
                        tasks: Vec::new(),
                        submitted: false,
                    });
                    groups.len() - 1
                }
            };
            groups[index].tasks.push(BoardTask::from_record(record));
        }
        Self {
            building_name: building_name.into(),
            groups,
        }
    }

    /// Building the flat belongs to.
    pub fn building_name(&self) -> &str {
        &self.building_name
    }

    /// All groups.
    pub fn groups(&self) -> &[CategoryGroup] {
        &self.groups
    }

    /// Group by id.
    pub fn group(&self, group_id: usize) -> Option<&CategoryGroup> {
        self.groups.iter().find(|g| g.id == group_id)
    }

    /// Category names for the filter, `All` first.
    pub fn filter_options(&self) -> Vec<String> {
        std::iter::once(CategoryFilter::All.to_string())
            .chain(self.groups.iter().map(|g| g.category.clone()))
            .collect()
    }

    /// Groups passing the filter.
    pub fn filtered(&self, filter: &CategoryFilter) -> Vec<&CategoryGroup> {
        self.groups.iter().filter(|g| filter.matches(g)).collect()
    }

    /// Task at `task`.
    pub fn task(&self, task: TaskRef) -> Option<&BoardTask> {
        self.group(task.group_id)?.tasks.get(task.index)
    }

    /// Locates a task by its task number.
    pub fn find_task_no(&self, task_no: &str) -> Option<TaskRef> {
        self.groups.iter().find_map(|group| {
            group
                .tasks
                .iter()
                .position(|t| t.task_no.as_deref() == Some(task_no))
                .map(|index| TaskRef {
                    group_id: group.id,
                    index,
                })
        })
    }

    fn task_mut(&mut self, task: TaskRef) -> Result<&mut BoardTask> {
        self.groups
            .iter_mut()
            .find(|g| g.id == task.group_id)
            .and_then(|g| g.tasks.get_mut(task.index))
            .ok_or_else(|| {
                Error::validation_field(
                    "task",
                    format!("no task {} in group {}", task.index, task.group_id),
                )
            })
    }

    /// Flips the task to completed locally, before the store is asked.
    pub fn begin_complete(&mut self, task: TaskRef) -> Result<PendingCompletion> {
        let board_task = self.task_mut(task)?;
        if board_task.completed {
            return Err(Error::validation_field("task", "task is already complete"));
        }
        let task_no = board_task
            .task_no
            .clone()
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| Error::validation_field("task_no", "task has no task number"))?;

        let mut mutation = Mutation::new(format!("complete task {task_no}"));
        mutation.apply()?;
        board_task.completed = true;
        board_task.mutation = mutation.state().clone();
        Ok(PendingCompletion {
            task,
            task_no,
            mutation,
        })
    }

    /// Settles a pending completion: keep it on success, revert on failure.
    pub fn finish_complete(
        &mut self,
        pending: PendingCompletion,
        outcome: Result<()>,
    ) -> Result<MutationState> {
        let PendingCompletion {
            task, mut mutation, ..
        } = pending;
        let board_task = self.task_mut(task)?;
        match outcome {
            Ok(()) => {
                mutation.confirm()?;
            }
            Err(err) => {
                log::error!("Failed to update actual date: {err}");
                mutation.roll_back(err.to_string())?;
                board_task.completed = false;
            }
        }
        board_task.mutation = mutation.state().clone();
        Ok(board_task.mutation.clone())
    }

    /// Marks a task complete: applied locally first, then sent to the store,
    /// then confirmed or rolled back.
    ///
    /// Store failures do not error; they show up as
    /// [`MutationState::RolledBack`].
    pub async fn mark_complete<S>(&mut self, store: &S, task: TaskRef) -> Result<MutationState>
    where
        S: SheetStore + ?Sized,
    {
        let pending = self.begin_complete(task)?;
        let outcome = store
            .mark_task_complete(pending.task_no(), &self.building_name)
            .await;
        self.finish_complete(pending, outcome)
    }

    /// Sends vendor, payment and billing values for a category group.
    ///
    /// Refused locally unless all three values are set. On success the group
    /// takes the new values and is marked submitted.
    pub async fn submit_category_meta<S>(
        &mut self,
        store: &S,
        group_id: usize,
        vendor_name: &str,
        payment: &str,
        billing: &str,
    ) -> Result<()>
    where
        S: SheetStore + ?Sized,
    {
        let group = self
            .group(group_id)
            .ok_or_else(|| Error::validation_field("group", format!("no group {group_id}")))?;
        let meta = CategoryMeta {
            building_name: self.building_name.clone(),
            category: group.category.clone(),
            vendor_name: vendor_name.to_string(),
            payment: payment.to_string(),
            billing: billing.to_string(),
        };
        meta.validate()?;

        if let Err(err) = store.update_category_meta(&meta).await {
            log::error!("Submit failed for category {}: {err}", meta.category);
            return Err(err);
        }

        if let Some(group) = self.groups.iter_mut().find(|g| g.id == group_id) {
            group.vendor_name = meta.vendor_name;
            group.payment = meta.payment;
            group.billing = meta.billing;
            group.submitted = true;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::{MockSheetStore, StoreOp};
    use crate::types::{FlatKey, Marker};

    fn record(no: &str, category: Option<&str>, vendor: Option<&str>, date: &str) -> TaskRecord {
        TaskRecord {
            task_id: Some(format!("T{no}")),
            task_no: Some(no.to_string()),
            action: Some(format!("Action {no}")),
            category: category.map(str::to_string),
            actual_date: Some(date.to_string()),
            vendor_name: vendor.map(str::to_string),
            payment: Marker::from("No"),
            bill: Marker::default(),
            ..TaskRecord::default()
        }
    }

    fn board() -> TaskBoard {
        TaskBoard::from_records(
            "Lake View",
            &[
                record("1", Some("Electrical"), Some("Volt Co"), ""),
                record("2", None, None, "2024-01-01"),
                record("3", Some("Electrical"), Some("Other"), "2024-01-02"),
            ],
        )
    }

    #[test]
    fn test_grouping() {
        let board = board();
        let groups = board.groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].id, 1);
        assert_eq!(groups[0].category, "Electrical");
        assert_eq!(groups[0].vendor_name, "Volt Co");
        assert_eq!(groups[0].payment, "No");
        assert_eq!(groups[0].billing, "");
        assert_eq!(groups[0].tasks.len(), 2);
        assert_eq!(groups[0].percentage(), 50);
        assert_eq!(groups[1].id, 2);
        assert_eq!(groups[1].category, "Uncategorized");
        assert_eq!(groups[1].tasks[0].assignee, UNASSIGNED);
        assert!(groups[1].tasks[0].completed);
    }

    #[test]
    fn test_filter() {
        let board = board();
        assert_eq!(board.filtered(&CategoryFilter::All).len(), 2);
        let only: CategoryFilter = "Electrical".parse().unwrap();
        assert_eq!(board.filtered(&only).len(), 1);
        let none: CategoryFilter = "electrical".parse().unwrap();
        assert!(board.filtered(&none).is_empty());
        assert_eq!(board.filter_options(), vec!["All", "Electrical", "Uncategorized"]);
    }

    #[test]
    fn test_optimistic_flip_happens_before_store_call() {
        let mut board = board();
        let task = board.find_task_no("1").unwrap();
        let pending = board.begin_complete(task).unwrap();
        assert!(board.task(task).unwrap().completed);
        assert_eq!(board.task(task).unwrap().mutation, MutationState::Optimistic);

        let state = board
            .finish_complete(pending, Err(Error::transport("offline")))
            .unwrap();
        assert!(matches!(state, MutationState::RolledBack(_)));
        assert!(!board.task(task).unwrap().completed);
    }

    #[tokio::test]
    async fn test_mark_complete_confirmed() {
        let flat = FlatKey::new("CB-1", "BF-1").unwrap();
        let store = MockSheetStore::new().with_flat_tasks(&flat, vec![]);
        let mut board = board();
        let task = board.find_task_no("1").unwrap();
        let state = board.mark_complete(&store, task).await.unwrap();
        assert_eq!(state, MutationState::Confirmed);
        assert!(board.task(task).unwrap().completed);
        assert_eq!(store.call_count(StoreOp::MarkTaskComplete), 1);
    }

    #[tokio::test]
    async fn test_mark_complete_rolls_back_on_failure() {
        let store = MockSheetStore::new();
        store.fail_transport(StoreOp::MarkTaskComplete);
        let mut board = board();
        let task = board.find_task_no("1").unwrap();
        let state = board.mark_complete(&store, task).await.unwrap();
        assert!(matches!(state, MutationState::RolledBack(_)));
        assert!(!board.task(task).unwrap().completed);
    }

    #[tokio::test]
    async fn test_completed_task_is_not_resent() {
        let store = MockSheetStore::new();
        let mut board = board();
        let task = board.find_task_no("3").unwrap();
        assert!(board.mark_complete(&store, task).await.is_err());
        assert_eq!(store.call_count(StoreOp::MarkTaskComplete), 0);
    }

    #[tokio::test]
    async fn test_category_meta_requires_all_fields() {
        let store = MockSheetStore::new();
        let mut board = board();
        let err = board
            .submit_category_meta(&store, 1, "Volt Co", "Yes", "")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert_eq!(store.call_count(StoreOp::UpdateCategoryMeta), 0);
    }

    #[tokio::test]
    async fn test_category_meta_marks_group_submitted() {
        let store = MockSheetStore::new();
        let mut board = board();
        board
            .submit_category_meta(&store, 1, "Spark Ltd", "Yes", "Yes")
            .await
            .unwrap();
        let group = board.group(1).unwrap();
        assert!(group.submitted);
        assert_eq!(group.vendor_name, "Spark Ltd");
        let sent = store.category_meta();
        assert_eq!(sent[0].category, "Electrical");
        assert_eq!(sent[0].building_name, "Lake View");
    }

    #[tokio::test]
    async fn test_category_meta_failure_leaves_group_unsubmitted() {
        let store = MockSheetStore::new();
        store.fail_rejected(StoreOp::UpdateCategoryMeta);
        let mut board = board();
        assert!(
            board
                .submit_category_meta(&store, 1, "Spark Ltd", "Yes", "Yes")
                .await
                .is_err()
        );
        assert!(!board.group(1).unwrap().submitted);
    }
}
