pub mod action;
pub mod reducer;

pub use action::{Action, ActionType, Dispatch};
pub use reducer::{reduce, ReduceContext, TodoState};

use crate::domain::{Clock, IdGenerator, ListTab, Task, TodoError, UuidGenerator};
use std::rc::Rc;
use tracing::{debug, warn};

/// Owner of the task list; the reducer's only caller
pub struct TodoStore {
    state: TodoState,
    clock: Rc<dyn Clock>,
    ids: Box<dyn IdGenerator>,
}

impl TodoStore {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self::with_id_generator(clock, Box::new(UuidGenerator))
    }

    pub fn with_id_generator(clock: Rc<dyn Clock>, ids: Box<dyn IdGenerator>) -> Self {
        Self {
            state: TodoState::default(),
            clock,
            ids,
        }
    }

    pub fn list(&self) -> &[Task] {
        &self.state.list
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.state.list.iter().find(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.state.list.len()
    }

    /// Tasks shown on a list tab, in list order
    pub fn tasks_in(&self, tab: ListTab) -> impl Iterator<Item = &Task> {
        self.state.list.iter().filter(move |task| tab.includes(task.category))
    }
}

#[cfg(test)]
impl TodoStore {
    pub fn state(&self) -> &TodoState {
        &self.state
    }

    pub fn is_empty(&self) -> bool {
        self.state.list.is_empty()
    }

    /// Id of the most recently added task
    pub fn last_id(&self) -> Option<&str> {
        self.state.list.last().map(|task| task.id.as_str())
    }
}

impl Dispatch for TodoStore {
    fn dispatch(&mut self, action: Action) -> Result<(), TodoError> {
        let next_id = match action {
            Action::Add(_) => self.ids.next_id(),
            _ => String::new(),
        };
        let ctx = ReduceContext {
            now_ms: self.clock.now_ms(),
            next_id,
        };

        match reduce(&self.state, &action, &ctx) {
            Ok(next) => {
                debug!(
                    action = action.action_type().as_str(),
                    id = action.target_id().unwrap_or(ctx.next_id.as_str()),
                    "dispatched"
                );
                self.state = next;
                Ok(())
            }
            Err(err) => {
                // State stays as it was
                warn!(action = action.action_type().as_str(), "{}", err);
                Err(err)
            }
        }
    }
}
