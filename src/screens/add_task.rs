use super::navigation::Navigator;
use crate::domain::{NewTask, TodoError};
use crate::store::{Action, Dispatch};
use tracing::debug;

pub const FIELD_TITLE: usize = 0;
pub const FIELD_TIMER: usize = 1;
pub const FIELD_START: usize = 2;

/// Add task form state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddTaskForm {
    pub title: String,
    pub timer_enabled: bool,
    /// Only meaningful while the timer is enabled
    pub start_on_create: bool,
    pub editing_field: usize,
    /// Inline validation message
    pub error: Option<String>,
}

impl AddTaskForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fields currently shown; the start toggle hides with the timer
    pub fn field_count(&self) -> usize {
        if self.timer_enabled {
            3
        } else {
            2
        }
    }

    pub fn next_field(&mut self) {
        self.editing_field = (self.editing_field + 1) % self.field_count();
    }

    pub fn previous_field(&mut self) {
        let count = self.field_count();
        self.editing_field = (self.editing_field + count - 1) % count;
    }

    /// Type into the title (other fields are toggles)
    pub fn add_char(&mut self, c: char) {
        if self.editing_field == FIELD_TITLE {
            self.title.push(c);
            self.error = None;
        }
    }

    pub fn backspace(&mut self) {
        if self.editing_field == FIELD_TITLE {
            self.title.pop();
        }
    }

    /// Flip the toggle under the cursor
    pub fn toggle_current(&mut self) {
        match self.editing_field {
            FIELD_TIMER => self.toggle_timer(),
            FIELD_START => self.toggle_start_on_create(),
            _ => {}
        }
    }

    /// Enable or disable time tracking; disabling also clears start on create
    pub fn toggle_timer(&mut self) {
        self.timer_enabled = !self.timer_enabled;
        if !self.timer_enabled {
            self.start_on_create = false;
            if self.editing_field == FIELD_START {
                self.editing_field = FIELD_TIMER;
            }
        }
    }

    pub fn toggle_start_on_create(&mut self) {
        if self.timer_enabled {
            self.start_on_create = !self.start_on_create;
        }
    }

    /// Build the add request, rejecting a blank title
    pub fn validate(&self) -> Result<NewTask, TodoError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(TodoError::EmptyTitle);
        }

        let new_task = NewTask::new(title).with_timer(self.timer_enabled);
        Ok(if self.timer_enabled && self.start_on_create {
            new_task.started()
        } else {
            new_task
        })
    }

    /// Dispatch the add action and leave the screen
    ///
    /// On a blank title nothing is dispatched and the form stays open with
    /// its validation message set.
    pub fn submit(&mut self, store: &mut dyn Dispatch, navigator: &mut dyn Navigator) -> Result<(), TodoError> {
        let new_task = match self.validate() {
            Ok(new_task) => new_task,
            Err(err) => {
                self.error = Some(err.to_string());
                return Err(err);
            }
        };

        debug!(title = %new_task.title, started = new_task.category.name(), "adding task");
        store.dispatch(Action::Add(new_task))?;
        navigator.go_back();
        Ok(())
    }
}
