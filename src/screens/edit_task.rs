use super::navigation::{EditParams, Navigator};
use crate::domain::{TaskPatch, TodoError};
use crate::store::{Action, Dispatch, TodoStore};
use tracing::debug;

/// Edit screen state, opened from a row's edit action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTaskForm {
    pub params: EditParams,
    pub title: String,
    pub error: Option<String>,
}

impl EditTaskForm {
    /// Open pre-filled with the stored title; `None` if the task is gone
    pub fn open(params: EditParams, store: &TodoStore) -> Option<Self> {
        let title = store.get(&params.todo_id)?.title.clone();
        Some(Self {
            params,
            title,
            error: None,
        })
    }

    pub fn add_char(&mut self, c: char) {
        self.title.push(c);
        self.error = None;
    }

    pub fn backspace(&mut self) {
        self.title.pop();
    }

    pub fn submit(&mut self, store: &mut dyn Dispatch, navigator: &mut dyn Navigator) -> Result<(), TodoError> {
        let title = self.title.trim();
        if title.is_empty() {
            self.error = Some(TodoError::EmptyTitle.to_string());
            return Err(TodoError::EmptyTitle);
        }

        debug!(id = %self.params.todo_id, action = self.params.action.as_str(), "saving edit");
        store.dispatch(Action::Edit(TaskPatch::new(&self.params.todo_id).title(title)))?;
        navigator.go_back();
        Ok(())
    }
}
