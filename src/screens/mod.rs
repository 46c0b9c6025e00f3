pub mod add_task;
pub mod edit_task;
pub mod navigation;
pub mod task_list;

pub use add_task::AddTaskForm;
pub use edit_task::EditTaskForm;
pub use navigation::{EditParams, Navigation, Navigator, Route};
pub use task_list::{ActionPanels, PanelSide, TaskListScreen};
