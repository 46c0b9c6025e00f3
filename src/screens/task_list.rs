use super::navigation::Navigator;
use crate::domain::{Clock, ListTab, Task, TaskView, TodoError};
use crate::store::TodoStore;
use crate::timer::TaskTimer;
use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;
use tracing::{debug, warn};

/// Which side of a row an action panel slides out from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelSide {
    /// Delete or restore
    Left,
    /// Start/pause, edit, complete
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenPanel {
    pub task_id: String,
    pub side: PanelSide,
}

/// The one action panel allowed open at a time across all rows
#[derive(Debug, Default)]
pub struct ActionPanels {
    open: Option<OpenPanel>,
}

impl ActionPanels {
    /// Open a panel, closing whichever panel was open before
    ///
    /// Returns the panel that was closed, if it belonged to another row.
    pub fn will_open(&mut self, task_id: &str, side: PanelSide) -> Option<OpenPanel> {
        let previous = self.open.take().filter(|panel| panel.task_id != task_id);
        self.open = Some(OpenPanel {
            task_id: task_id.to_string(),
            side,
        });
        previous
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn open_panel(&self) -> Option<&OpenPanel> {
        self.open.as_ref()
    }

    /// Side of the open panel when it belongs to `task_id`
    pub fn side_for(&self, task_id: &str) -> Option<PanelSide> {
        self.open
            .as_ref()
            .filter(|panel| panel.task_id == task_id)
            .map(|panel| panel.side)
    }
}

/// Task list screen: one mounted timer per visible task
pub struct TaskListScreen {
    tab: ListTab,
    selected_index: usize,
    /// Ids of visible tasks in list order
    visible: Vec<String>,
    timers: BTreeMap<String, TaskTimer>,
    panels: ActionPanels,
    clock: Rc<dyn Clock>,
}

impl TaskListScreen {
    pub fn new(clock: Rc<dyn Clock>, tab: ListTab) -> Self {
        Self {
            tab,
            selected_index: 0,
            visible: Vec::new(),
            timers: BTreeMap::new(),
            panels: ActionPanels::default(),
            clock,
        }
    }

    /// Bring mounted timers in line with the store, then tick them
    ///
    /// Tasks that left the tab are unmounted (flushing their time), new ones
    /// are mounted and the rest reconcile against their stored state.
    pub fn sync(&mut self, store: &mut TodoStore) -> Result<(), TodoError> {
        let tasks: Vec<Task> = store.tasks_in(self.tab).cloned().collect();
        let ids: HashSet<&str> = tasks.iter().map(|task| task.id.as_str()).collect();

        let gone: Vec<String> = self
            .timers
            .keys()
            .filter(|id| !ids.contains(id.as_str()))
            .cloned()
            .collect();
        for id in gone {
            if let Some(timer) = self.timers.remove(&id) {
                release(timer, store)?;
            }
        }

        for task in &tasks {
            match self.timers.get_mut(&task.id) {
                Some(timer) => {
                    timer.reconcile(task);
                }
                None => {
                    let timer = TaskTimer::mount(task, self.clock.clone(), store)?;
                    self.timers.insert(task.id.clone(), timer);
                }
            }
        }

        for timer in self.timers.values_mut() {
            timer.tick();
        }

        self.visible = tasks.into_iter().map(|task| task.id).collect();
        self.clamp_selection();
        let stale_panel = self
            .panels
            .open_panel()
            .map_or(false, |panel| !self.visible.contains(&panel.task_id));
        if stale_panel {
            self.panels.close();
        }
        Ok(())
    }

    /// Unmount every timer, flushing elapsed time to the store
    pub fn shutdown(&mut self, store: &mut TodoStore) -> Result<(), TodoError> {
        let timers = std::mem::take(&mut self.timers);
        let count = timers.len();
        let mut first_error = None;
        for (id, timer) in timers {
            if let Err(err) = release(timer, store) {
                warn!(id = %id, "flush on shutdown failed: {}", err);
                first_error.get_or_insert(err);
            }
        }
        self.visible.clear();
        debug!(count, "task list shut down");
        first_error.map_or(Ok(()), Err)
    }

    pub fn tab(&self) -> ListTab {
        self.tab
    }

    /// Switch tabs; timers of the old tab are unmounted by the sync
    pub fn set_tab(&mut self, tab: ListTab, store: &mut TodoStore) -> Result<(), TodoError> {
        self.panels.close();
        self.tab = tab;
        self.selected_index = 0;
        self.sync(store)
    }

    pub fn next_tab(&mut self, store: &mut TodoStore) -> Result<(), TodoError> {
        self.set_tab(self.tab.next(), store)
    }

    pub fn previous_tab(&mut self, store: &mut TodoStore) -> Result<(), TodoError> {
        self.set_tab(self.tab.previous(), store)
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.visible.get(self.selected_index).map(String::as_str)
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.visible.len() {
            self.selected_index += 1;
        }
    }

    pub fn panels(&self) -> &ActionPanels {
        &self.panels
    }

    pub fn open_panel(&mut self, side: PanelSide) {
        let Some(id) = self.visible.get(self.selected_index) else {
            return;
        };
        if let Some(closed) = self.panels.will_open(id, side) {
            debug!(closed = %closed.task_id, "closed previous panel");
        }
    }

    pub fn close_panel(&mut self) {
        self.panels.close();
    }

    /// Row view models in display order
    pub fn rows(&self, store: &TodoStore) -> Vec<TaskView> {
        self.visible
            .iter()
            .filter_map(|id| {
                let task = store.get(id)?;
                let timer = self.timers.get(id)?;
                Some(timer.view(task))
            })
            .collect()
    }

    pub fn toggle_run_selected(&mut self, store: &mut TodoStore) -> Result<(), TodoError> {
        self.panels.close();
        match self.selected_timer_mut() {
            Some(timer) => timer.on_toggle_run(store),
            None => Ok(()),
        }
    }

    pub fn complete_selected(&mut self, store: &mut TodoStore) -> Result<(), TodoError> {
        self.panels.close();
        match self.selected_timer_mut() {
            Some(timer) => timer.on_complete(store),
            None => Ok(()),
        }
    }

    pub fn delete_or_restore_selected(&mut self, store: &mut TodoStore) -> Result<(), TodoError> {
        self.panels.close();
        match self.selected_timer_mut() {
            Some(timer) => timer.on_delete_or_restore(store),
            None => Ok(()),
        }
    }

    /// Request the edit screen for the selected task
    pub fn edit_selected(&mut self, store: &TodoStore, navigator: &mut dyn Navigator) {
        self.panels.close();
        let Some(id) = self.selected_id() else {
            return;
        };
        if let (Some(timer), Some(task)) = (self.timers.get(id), store.get(id)) {
            timer.on_edit(task, navigator);
        }
    }

    fn selected_timer_mut(&mut self) -> Option<&mut TaskTimer> {
        let id = self.visible.get(self.selected_index)?;
        self.timers.get_mut(id)
    }

    fn clamp_selection(&mut self) {
        if self.visible.is_empty() {
            self.selected_index = 0;
        } else if self.selected_index >= self.visible.len() {
            self.selected_index = self.visible.len() - 1;
        }
    }
}

#[cfg(test)]
impl TaskListScreen {
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    pub fn mounted_count(&self) -> usize {
        self.timers.len()
    }
}

/// Unmount a timer after catching it up with its stored task
///
/// A task changed by another writer keeps that change; the flush only
/// re-anchors its own run. Tasks missing from the store have nothing to flush.
fn release(mut timer: TaskTimer, store: &mut TodoStore) -> Result<(), TodoError> {
    let Some(task) = store.get(timer.task_id()) else {
        warn!(id = %timer.task_id(), "task gone before unmount");
        return Ok(());
    };
    timer.reconcile(task);
    timer.unmount(store)
}
