use crate::domain::{NewTask, TaskPatch, TodoError};
use serde::{Deserialize, Serialize};

/// Actions consumed by the todo reducer, serialized as `{type, payload}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Action {
    #[serde(rename = "ADD_TODO")]
    Add(NewTask),
    #[serde(rename = "EDIT_TODO")]
    Edit(TaskPatch),
    #[serde(rename = "DELETE_TODO")]
    Delete { id: String },
    #[serde(rename = "RESTORE_TODO")]
    Restore { id: String },
}

/// Discriminant of an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    AddTodo,
    EditTodo,
    DeleteTodo,
    RestoreTodo,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AddTodo => "ADD_TODO",
            Self::EditTodo => "EDIT_TODO",
            Self::DeleteTodo => "DELETE_TODO",
            Self::RestoreTodo => "RESTORE_TODO",
        }
    }
}

impl Action {
    pub fn action_type(&self) -> ActionType {
        match self {
            Action::Add(_) => ActionType::AddTodo,
            Action::Edit(_) => ActionType::EditTodo,
            Action::Delete { .. } => ActionType::DeleteTodo,
            Action::Restore { .. } => ActionType::RestoreTodo,
        }
    }

    /// Id of the task an action targets (none for add)
    pub fn target_id(&self) -> Option<&str> {
        match self {
            Action::Add(_) => None,
            Action::Edit(patch) => Some(&patch.id),
            Action::Delete { id } | Action::Restore { id } => Some(id),
        }
    }

    pub fn delete(id: impl Into<String>) -> Self {
        Action::Delete { id: id.into() }
    }

    pub fn restore(id: impl Into<String>) -> Self {
        Action::Restore { id: id.into() }
    }
}

/// The only path to mutate stored tasks
pub trait Dispatch {
    fn dispatch(&mut self, action: Action) -> Result<(), TodoError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_add_action_shape() {
        let action = Action::Add(NewTask::new("Buy milk").with_timer(true));
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "ADD_TODO",
                "payload": {"title": "Buy milk", "isTimerEnabled": true, "category": "default"}
            })
        );
    }

    #[test]
    fn test_edit_action_omits_unset_fields() {
        let action = Action::Edit(TaskPatch::new("x").category(Category::Paused).seconds(5));
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "EDIT_TODO",
                "payload": {"id": "x", "category": "paused", "seconds": 5}
            })
        );
    }

    #[test]
    fn test_restore_is_its_own_action_type() {
        let parsed: Action =
            serde_json::from_value(json!({"type": "RESTORE_TODO", "payload": {"id": "x"}})).unwrap();
        assert_eq!(parsed, Action::restore("x"));
        assert_eq!(parsed.action_type(), ActionType::RestoreTodo);
        assert_eq!(parsed.action_type().as_str(), "RESTORE_TODO");
    }

    #[test]
    fn test_target_id() {
        assert_eq!(Action::Add(NewTask::new("a")).target_id(), None);
        assert_eq!(Action::delete("x").target_id(), Some("x"));
        assert_eq!(Action::Edit(TaskPatch::new("y")).target_id(), Some("y"));
    }
}
