use super::enums::{Category, TaskStatus};

/// Read-only view model of one task row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    pub id: String,
    pub title: String,
    /// "HH:MM:SS" or a placeholder when the timer is disabled
    pub display_timer: String,
    pub status: TaskStatus,
    pub is_deleted_visually: bool,
    /// Task was just reopened from done
    pub was_completed: bool,
    pub is_timer_enabled: bool,
    pub created_label: String,
    pub category: Category,
}

/// Actions offered on a row's right-hand panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    StartPause,
    Complete,
    Edit,
    DeleteRestore,
}

/// Get status badge text
pub fn status_badge(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::InProgress => "⏱ IN PROGRESS",
        TaskStatus::Paused => "⏸ PAUSED",
        TaskStatus::NotStarted => "· NOT STARTED",
        TaskStatus::Completed => "✓ DONE",
        TaskStatus::Deleted => "✗ DELETED",
    }
}

/// Label of the start/pause action for a category
pub fn run_action_label(category: Category) -> &'static str {
    if category == Category::Active {
        "pause"
    } else {
        "start"
    }
}

/// Label of the completion toggle: undo on done tasks, done otherwise
pub fn complete_action_label(category: Category) -> &'static str {
    if category == Category::Done {
        "undo"
    } else {
        "done"
    }
}

pub fn delete_action_label(is_deleted: bool) -> &'static str {
    if is_deleted {
        "restore"
    } else {
        "delete"
    }
}

/// Actions of the right-hand panel; deleted tasks get none and done tasks cannot start
pub fn right_panel_actions(view: &TaskView) -> &'static [RowAction] {
    if view.is_deleted_visually {
        &[]
    } else if view.category == Category::Done {
        &[RowAction::Edit, RowAction::Complete]
    } else {
        &[RowAction::StartPause, RowAction::Edit, RowAction::Complete]
    }
}

/// Actions of the left-hand panel
pub fn left_panel_actions() -> &'static [RowAction] {
    &[RowAction::DeleteRestore]
}

/// Key and label of a panel action for the given row
pub fn action_hint(action: RowAction, view: &TaskView) -> (&'static str, &'static str) {
    match action {
        RowAction::StartPause => ("enter", run_action_label(view.category)),
        RowAction::Complete => ("c", complete_action_label(view.category)),
        RowAction::Edit => ("e", "edit"),
        RowAction::DeleteRestore => ("x", delete_action_label(view.is_deleted_visually)),
    }
}
