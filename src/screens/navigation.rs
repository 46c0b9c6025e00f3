use crate::store::ActionType;
use tracing::debug;

pub const TASK_LIST: &str = "TaskList";
pub const ADD_TASK: &str = "AddTask";
pub const EDIT_TASK: &str = "EditTask";

/// Parameters of the edit screen request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditParams {
    /// Screen header, e.g. "Edit todo: Buy milk"
    pub title: String,
    /// Action the screen dispatches on submit
    pub action: ActionType,
    pub todo_id: String,
}

/// A screen plus its parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    TaskList,
    AddTask,
    EditTask(EditParams),
}

impl Route {
    pub fn screen_name(&self) -> &'static str {
        match self {
            Route::TaskList => TASK_LIST,
            Route::AddTask => ADD_TASK,
            Route::EditTask(_) => EDIT_TASK,
        }
    }
}

/// Navigation service used by screens and timers
pub trait Navigator {
    fn navigate_to(&mut self, route: Route);
    fn go_back(&mut self);
}

/// Route stack rooted at the task list
#[derive(Debug, Clone)]
pub struct Navigation {
    stack: Vec<Route>,
}

impl Navigation {
    pub fn new() -> Self {
        Self {
            stack: vec![Route::TaskList],
        }
    }

    /// Currently shown route
    pub fn current(&self) -> &Route {
        // The root is never popped
        &self.stack[self.stack.len() - 1]
    }

    #[cfg(test)]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl Default for Navigation {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for Navigation {
    fn navigate_to(&mut self, route: Route) {
        debug!(screen = route.screen_name(), "navigate");
        self.stack.push(route);
    }

    fn go_back(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
        debug!(screen = self.current().screen_name(), "back");
    }
}
