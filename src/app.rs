use crate::config::Settings;
use crate::domain::{Category, Clock, NewTask, TaskPatch, TodoError};
use crate::screens::{AddTaskForm, EditTaskForm, Navigation, Navigator, PanelSide, Route, TaskListScreen};
use crate::store::{Action, Dispatch, TodoStore};
use anyhow::Result;
use std::rc::Rc;
use tracing::{info, warn};

/// Main application state
pub struct AppState {
    pub store: TodoStore,
    pub navigation: Navigation,
    pub task_list: TaskListScreen,
    pub add_form: Option<AddTaskForm>,
    pub edit_form: Option<EditTaskForm>,
    pub settings: Settings,
    /// Last error shown in the status line
    pub status_message: Option<String>,
    clock: Rc<dyn Clock>,
}

impl AppState {
    pub fn new(settings: Settings, clock: Rc<dyn Clock>) -> Self {
        let task_list = TaskListScreen::new(clock.clone(), settings.start_tab());
        Self {
            store: TodoStore::new(clock.clone()),
            navigation: Navigation::new(),
            task_list,
            add_form: None,
            edit_form: None,
            settings,
            status_message: None,
            clock,
        }
    }

    /// Mount, reconcile and tick the list's timers
    ///
    /// The list stays mounted beneath the add and edit screens, so its timers
    /// keep running whichever route is shown.
    pub fn tick(&mut self) {
        if let Err(err) = self.task_list.sync(&mut self.store) {
            self.report(err);
        }
    }

    /// Surface a store error in the status line
    pub fn report(&mut self, err: TodoError) {
        warn!("{}", err);
        self.status_message = Some(err.to_string());
    }

    fn settle(&mut self, result: Result<(), TodoError>) {
        match result {
            Ok(()) => self.status_message = None,
            Err(err) => self.report(err),
        }
    }

    pub fn move_selection_up(&mut self) {
        self.task_list.move_selection_up();
    }

    pub fn move_selection_down(&mut self) {
        self.task_list.move_selection_down();
    }

    pub fn open_panel(&mut self, side: PanelSide) {
        self.task_list.open_panel(side);
    }

    pub fn close_panel(&mut self) {
        self.task_list.close_panel();
    }

    pub fn toggle_run_pause(&mut self) {
        let result = self.task_list.toggle_run_selected(&mut self.store);
        self.settle(result);
    }

    pub fn toggle_complete(&mut self) {
        let result = self.task_list.complete_selected(&mut self.store);
        self.settle(result);
    }

    pub fn delete_or_restore(&mut self) {
        let result = self.task_list.delete_or_restore_selected(&mut self.store);
        self.settle(result);
    }

    pub fn next_tab(&mut self) {
        let result = self.task_list.next_tab(&mut self.store);
        self.settle(result);
    }

    pub fn previous_tab(&mut self) {
        let result = self.task_list.previous_tab(&mut self.store);
        self.settle(result);
    }

    /// Start adding a new task (opens the add screen)
    pub fn start_add_task(&mut self) {
        self.task_list.close_panel();
        self.add_form = Some(AddTaskForm::new());
        self.navigation.navigate_to(Route::AddTask);
    }

    /// Submit the add form; a blank title keeps the form open
    pub fn submit_add_form(&mut self) {
        let Some(form) = self.add_form.as_mut() else {
            return;
        };
        match form.submit(&mut self.store, &mut self.navigation) {
            Ok(()) => {
                self.add_form = None;
                self.tick();
            }
            Err(TodoError::EmptyTitle) => {}
            Err(err) => self.report(err),
        }
    }

    pub fn cancel_add_form(&mut self) {
        self.add_form = None;
        self.navigation.go_back();
    }

    /// Start editing the selected task (opens the edit screen)
    pub fn start_edit_task(&mut self) {
        self.task_list.edit_selected(&self.store, &mut self.navigation);
        let Route::EditTask(params) = self.navigation.current().clone() else {
            return;
        };
        match EditTaskForm::open(params, &self.store) {
            Some(form) => self.edit_form = Some(form),
            None => self.navigation.go_back(),
        }
    }

    pub fn submit_edit_form(&mut self) {
        let Some(form) = self.edit_form.as_mut() else {
            return;
        };
        match form.submit(&mut self.store, &mut self.navigation) {
            Ok(()) => self.edit_form = None,
            Err(TodoError::EmptyTitle) => {}
            Err(err) => self.report(err),
        }
    }

    pub fn cancel_edit_form(&mut self) {
        self.edit_form = None;
        self.navigation.go_back();
    }

    /// Fill the store with sample tasks in every category
    pub fn seed_demo(&mut self) -> Result<(), TodoError> {
        let now = self.clock.now_ms();
        let samples: [(&str, bool, Category, u64); 6] = [
            ("Buy milk", true, Category::Default, 0),
            ("Morning run", true, Category::Active, 10 * 60),
            ("Write weekly report", true, Category::Paused, 25 * 60),
            ("Call the plumber about the sink", false, Category::Default, 0),
            ("Water the plants", true, Category::Done, 12 * 60),
            ("Learn the banjo", false, Category::Deleted, 0),
        ];

        for (title, timer, category, seconds) in samples {
            self.store.dispatch(Action::Add(NewTask::new(title).with_timer(timer)))?;
            let Some(mut task) = self.store.list().last().cloned() else {
                continue;
            };
            task.category = category;
            task.seconds = seconds;
            if seconds > 0 {
                task.started_at = now;
                task.finished_at = now;
            }
            self.store.dispatch(Action::Edit(TaskPatch::from_task(&task)))?;
        }

        info!(count = self.store.len(), "seeded demo tasks");
        self.tick();
        Ok(())
    }

    /// Flush every running timer before exit
    pub fn shutdown(&mut self) -> Result<()> {
        self.task_list.shutdown(&mut self.store)?;
        info!(tasks = self.store.len(), "shut down");
        Ok(())
    }
}
