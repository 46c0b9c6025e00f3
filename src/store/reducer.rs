use super::action::Action;
use crate::domain::{Category, Task, TodoError};
use serde::{Deserialize, Serialize};

/// Stored state: a single ordered task list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoState {
    pub list: Vec<Task>,
}

/// Inputs the reducer needs but must not produce itself
#[derive(Debug, Clone)]
pub struct ReduceContext {
    pub now_ms: i64,
    /// Identifier for a task created by this action
    pub next_id: String,
}

/// Compute the next state for an action
///
/// Pure: the previous state is never modified. Edit, delete and restore of an
/// unknown id fail with `NotFound` and produce no state.
pub fn reduce(state: &TodoState, action: &Action, ctx: &ReduceContext) -> Result<TodoState, TodoError> {
    match action {
        Action::Add(new_task) => {
            let task = Task::create(ctx.next_id.clone(), new_task, ctx.now_ms);
            let mut list = state.list.clone();
            list.push(task);
            Ok(TodoState { list })
        }
        Action::Edit(patch) => update(state, &patch.id, |task| task.apply(patch)),
        Action::Delete { id } => update(state, id, |task| task.category = Category::Deleted),
        Action::Restore { id } => update(state, id, |task| task.category = Category::Default),
    }
}

/// Copy the list and change one task in place, keeping order
fn update<F>(state: &TodoState, id: &str, change: F) -> Result<TodoState, TodoError>
where
    F: FnOnce(&mut Task),
{
    let index = state
        .list
        .iter()
        .position(|task| task.id == id)
        .ok_or_else(|| TodoError::not_found(id))?;

    let mut list = state.list.clone();
    change(&mut list[index]);
    Ok(TodoState { list })
}
