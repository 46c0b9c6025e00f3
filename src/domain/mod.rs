pub mod clock;
pub mod enums;
pub mod error;
pub mod format;
pub mod id;
pub mod task;
pub mod views;

pub use clock::{seconds_between, Clock, SystemClock};
pub use enums::{Category, ListTab, TaskStatus};
pub use error::TodoError;
pub use format::{format_created_at, format_timer, truncate_title, TIMER_DISABLED};
pub use id::{IdGenerator, UuidGenerator};
pub use task::{NewTask, Task, TaskPatch};
pub use views::{
    action_hint, left_panel_actions, right_panel_actions, status_badge, RowAction, TaskView,
};

#[cfg(test)]
pub use clock::ManualClock;
