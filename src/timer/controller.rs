use crate::domain::{
    format_created_at, format_timer, seconds_between, truncate_title, Category, Clock, Task,
    TaskPatch, TaskView, TodoError, TIMER_DISABLED,
};
use crate::screens::navigation::{EditParams, Navigator, Route};
use crate::store::{Action, ActionType, Dispatch};
use crate::ticker::{Interval, TICK_PERIOD_MS};
use std::rc::Rc;
use tracing::{debug, trace};

/// Stored fields the controller last wrote (or loaded) for its task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Snapshot {
    category: Category,
    seconds: u64,
    started_at: i64,
    is_timer_enabled: bool,
}

impl Snapshot {
    fn of(task: &Task) -> Self {
        Self {
            category: task.category,
            seconds: task.seconds,
            started_at: task.started_at,
            is_timer_enabled: task.is_timer_enabled,
        }
    }
}

/// Elapsed seconds a stored task has accumulated as of `now_ms`
///
/// While a task is active its stored `seconds` is the total as of
/// `started_at`, so the time since then is added on top.
pub fn reconstruct_elapsed(task: &Task, now_ms: i64) -> u64 {
    if task.category == Category::Active && task.is_timer_enabled && task.started_at > 0 {
        task.seconds + seconds_between(task.started_at, now_ms)
    } else {
        task.seconds
    }
}

/// Runtime timer bound to one task while its row is mounted
///
/// Holds a local copy of the task's elapsed time and category. Every state
/// change is written back through `Dispatch`; `unmount` flushes the final
/// count so a later mount can pick up where this one stopped.
pub struct TaskTimer {
    task_id: String,
    elapsed_seconds: u64,
    category: Category,
    started_at: i64,
    was_completed: bool,
    is_timer_enabled: bool,
    display_timer: String,
    ticker: Option<Interval>,
    persisted: Snapshot,
    clock: Rc<dyn Clock>,
}

impl TaskTimer {
    /// Mount a controller for a stored task, resuming its tick if active
    pub fn mount(task: &Task, clock: Rc<dyn Clock>, store: &mut dyn Dispatch) -> Result<Self, TodoError> {
        let now = clock.now_ms();
        let mut timer = Self {
            task_id: task.id.clone(),
            elapsed_seconds: 0,
            category: task.category,
            started_at: task.started_at,
            was_completed: task.was_completed,
            is_timer_enabled: task.is_timer_enabled,
            display_timer: format_timer(0),
            ticker: None,
            persisted: Snapshot::of(task),
            clock,
        };
        timer.load(task, now);

        // Created with "start on create": nothing has anchored the run yet
        if timer.category == Category::Active && timer.started_at == 0 {
            timer.started_at = now;
            if timer.is_timer_enabled {
                timer.ticker = Some(Interval::start(now));
            }
            timer.persist(store, TaskPatch::new(&timer.task_id))?;
        }

        debug!(id = %timer.task_id, elapsed = timer.elapsed_seconds, "mounted");
        Ok(timer)
    }

    /// Flush final state and release the tick
    ///
    /// Takes the controller by value so no tick can run after teardown.
    pub fn unmount(mut self, store: &mut dyn Dispatch) -> Result<(), TodoError> {
        self.catch_up();
        if let Some(ticker) = self.ticker.take() {
            // Re-anchor at the last whole tick so remounting recounts only new time
            self.started_at = ticker.last_boundary_ms();
        } else if self.category == Category::Active && self.is_timer_enabled {
            self.started_at = self.clock.now_ms();
        }

        debug!(id = %self.task_id, elapsed = self.elapsed_seconds, "unmounted");
        self.persist(store, TaskPatch::new(&self.task_id))
    }

    /// Reload from the store when the task was changed by someone else
    ///
    /// Returns true when an external update was applied.
    pub fn reconcile(&mut self, task: &Task) -> bool {
        let seen = Snapshot::of(task);
        if seen == self.persisted {
            return false;
        }

        let now = self.clock.now_ms();
        self.load(task, now);
        self.persisted = seen;
        debug!(id = %self.task_id, elapsed = self.elapsed_seconds, "reconciled external update");
        true
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    /// Advance elapsed time by every tick that fell due; returns the tick count
    pub fn tick(&mut self) -> u64 {
        let now = self.clock.now_ms();
        let Some(ticker) = self.ticker.as_mut() else {
            return 0;
        };

        let due = ticker.poll(now);
        if due > 0 {
            self.elapsed_seconds += due;
            self.display_timer = format_timer(self.elapsed_seconds);
            trace!(id = %self.task_id, elapsed = self.elapsed_seconds, "tick");
        }
        due
    }

    /// Start or resume the task
    pub fn on_start(&mut self, store: &mut dyn Dispatch) -> Result<(), TodoError> {
        match self.category {
            Category::Default | Category::Paused => {}
            Category::Active => return Ok(()),
            Category::Done | Category::Deleted => {
                debug!(id = %self.task_id, category = self.category.name(), "start ignored");
                return Ok(());
            }
        }

        let now = self.clock.now_ms();
        self.category = Category::Active;
        self.started_at = now;
        // Replacing the handle drops any previous schedule
        self.ticker = if self.is_timer_enabled {
            Some(Interval::start(now))
        } else {
            None
        };

        self.persist(store, TaskPatch::new(&self.task_id))
    }

    /// Pause an active task, freezing its elapsed time
    pub fn on_pause(&mut self, store: &mut dyn Dispatch) -> Result<(), TodoError> {
        if self.category != Category::Active {
            return Ok(());
        }

        self.catch_up();
        self.ticker = None;
        self.category = Category::Paused;

        let now = self.clock.now_ms();
        self.persist(store, TaskPatch::new(&self.task_id).finished_at(now))
    }

    /// Start when idle, pause when running
    pub fn on_toggle_run(&mut self, store: &mut dyn Dispatch) -> Result<(), TodoError> {
        if self.category == Category::Active {
            self.on_pause(store)
        } else {
            self.on_start(store)
        }
    }

    /// Toggle completion: any live state goes to done, done goes back to default
    pub fn on_complete(&mut self, store: &mut dyn Dispatch) -> Result<(), TodoError> {
        match self.category {
            Category::Deleted => return Ok(()),
            Category::Done => {
                self.category = Category::Default;
                self.was_completed = true;
            }
            Category::Default | Category::Active | Category::Paused => {
                self.catch_up();
                self.ticker = None;
                self.category = Category::Done;
                self.was_completed = false;
            }
        }

        let now = self.clock.now_ms();
        self.started_at = now;
        let patch = TaskPatch::new(&self.task_id)
            .finished_at(now)
            .was_completed(self.was_completed);
        self.persist(store, patch)
    }

    /// Ask the navigation service for the edit screen of this task
    pub fn on_edit(&self, task: &Task, navigator: &mut dyn Navigator) {
        navigator.navigate_to(Route::EditTask(EditParams {
            title: format!("Edit todo: {}", truncate_title(&task.title)),
            action: ActionType::EditTodo,
            todo_id: self.task_id.clone(),
        }));
    }

    /// Soft-delete the task, freezing its timer first
    pub fn on_delete(&mut self, store: &mut dyn Dispatch) -> Result<(), TodoError> {
        if self.category == Category::Deleted {
            return Ok(());
        }

        if self.category == Category::Active {
            self.catch_up();
            self.ticker = None;
            self.category = Category::Paused;
            let now = self.clock.now_ms();
            self.persist(store, TaskPatch::new(&self.task_id).finished_at(now))?;
        }

        store.dispatch(Action::delete(&self.task_id))?;
        self.category = Category::Deleted;
        self.persisted.category = Category::Deleted;
        Ok(())
    }

    /// Bring a soft-deleted task back to the default category
    pub fn on_restore(&mut self, store: &mut dyn Dispatch) -> Result<(), TodoError> {
        if self.category != Category::Deleted {
            return Ok(());
        }

        store.dispatch(Action::restore(&self.task_id))?;
        self.category = Category::Default;
        self.persisted.category = Category::Default;
        Ok(())
    }

    /// Delete live tasks, restore deleted ones
    pub fn on_delete_or_restore(&mut self, store: &mut dyn Dispatch) -> Result<(), TodoError> {
        if self.category == Category::Deleted {
            self.on_restore(store)
        } else {
            self.on_delete(store)
        }
    }

    /// Row view model; title and creation date come from the stored task
    pub fn view(&self, task: &Task) -> TaskView {
        TaskView {
            id: self.task_id.clone(),
            title: task.title.clone(),
            display_timer: if self.is_timer_enabled {
                self.display_timer.clone()
            } else {
                TIMER_DISABLED.to_string()
            },
            status: self.category.status(),
            is_deleted_visually: self.category == Category::Deleted,
            was_completed: self.was_completed,
            is_timer_enabled: self.is_timer_enabled,
            created_label: format_created_at(task.created_at),
            category: self.category,
        }
    }

    /// Copy stored state into the controller and (re)start or stop the tick
    fn load(&mut self, task: &Task, now_ms: i64) {
        self.category = task.category;
        self.started_at = task.started_at;
        self.was_completed = task.was_completed;
        self.is_timer_enabled = task.is_timer_enabled;
        self.elapsed_seconds = reconstruct_elapsed(task, now_ms);
        self.display_timer = format_timer(self.elapsed_seconds);

        self.ticker = if self.category == Category::Active && self.is_timer_enabled && self.started_at > 0 {
            // Keep the sub-second phase of the earlier run
            let counted = seconds_between(self.started_at, now_ms) as i64;
            Some(Interval::start(self.started_at + counted * TICK_PERIOD_MS))
        } else {
            None
        };
    }

    /// Apply ticks that fell due since the last loop iteration
    fn catch_up(&mut self) {
        self.tick();
    }

    /// Dispatch local category, seconds and started_at plus any extra fields
    fn persist(&mut self, store: &mut dyn Dispatch, patch: TaskPatch) -> Result<(), TodoError> {
        let patch = patch
            .category(self.category)
            .seconds(self.elapsed_seconds)
            .started_at(self.started_at);
        store.dispatch(Action::Edit(patch))?;

        self.persisted = Snapshot {
            category: self.category,
            seconds: self.elapsed_seconds,
            started_at: self.started_at,
            is_timer_enabled: self.is_timer_enabled,
        };
        Ok(())
    }
}

#[cfg(test)]
impl TaskTimer {
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn display_timer(&self) -> &str {
        &self.display_timer
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ManualClock, NewTask, TaskStatus};
    use crate::screens::navigation::Navigation;
    use crate::store::TodoStore;
    use pretty_assertions::assert_eq;

    const T0: i64 = 1_700_000_000_000;

    fn setup(new_task: NewTask) -> (TodoStore, Rc<ManualClock>, String) {
        let clock = Rc::new(ManualClock::new(T0));
        let mut store = TodoStore::new(clock.clone());
        store.dispatch(Action::Add(new_task)).unwrap();
        let id = store.last_id().unwrap().to_string();
        (store, clock, id)
    }

    fn mount(store: &mut TodoStore, clock: &Rc<ManualClock>, id: &str) -> TaskTimer {
        let task = store.get(id).unwrap().clone();
        TaskTimer::mount(&task, clock.clone(), store).unwrap()
    }

    /// Advance the clock one second at a time, ticking after each
    fn run_for(timer: &mut TaskTimer, clock: &ManualClock, secs: u32) {
        for _ in 0..secs {
            clock.advance_secs(1);
            timer.tick();
        }
    }

    #[test]
    fn test_buy_milk_scenario() {
        let (mut store, clock, id) = setup(NewTask::new("Buy milk").with_timer(true));
        let mut timer = mount(&mut store, &clock, &id);
        assert_eq!(timer.category(), Category::Default);
        assert_eq!(timer.display_timer(), "00:00:00");

        timer.on_start(&mut store).unwrap();
        let task = store.get(&id).unwrap();
        assert_eq!(task.category, Category::Active);
        assert_eq!(task.started_at, T0);

        run_for(&mut timer, &clock, 5);
        assert_eq!(timer.elapsed_seconds(), 5);
        assert_eq!(timer.display_timer(), "00:00:05");

        timer.on_pause(&mut store).unwrap();
        let task = store.get(&id).unwrap();
        assert_eq!(task.category, Category::Paused);
        assert_eq!(task.seconds, 5);
        assert_eq!(task.finished_at, T0 + 5_000);

        // Paused time is not counted
        run_for(&mut timer, &clock, 10);
        assert_eq!(timer.elapsed_seconds(), 5);

        timer.on_start(&mut store).unwrap();
        assert_eq!(store.get(&id).unwrap().category, Category::Active);
        run_for(&mut timer, &clock, 3);
        assert_eq!(timer.elapsed_seconds(), 8);

        timer.on_pause(&mut store).unwrap();
        assert_eq!(store.get(&id).unwrap().seconds, 8);
    }

    #[test]
    fn test_start_wait_pause_counts_n_seconds() {
        for n in [1u32, 7, 61, 3_600] {
            let (mut store, clock, id) = setup(NewTask::new("n").with_timer(true));
            let mut timer = mount(&mut store, &clock, &id);
            timer.on_start(&mut store).unwrap();
            clock.advance_secs(n as i64);
            timer.on_pause(&mut store).unwrap();

            let task = store.get(&id).unwrap();
            assert_eq!(task.seconds, n as u64);
            assert_eq!(task.category, Category::Paused);
        }
    }

    #[test]
    fn test_pause_picks_up_tick_due_before_pause() {
        let (mut store, clock, id) = setup(NewTask::new("a").with_timer(true));
        let mut timer = mount(&mut store, &clock, &id);
        timer.on_start(&mut store).unwrap();

        clock.advance_ms(2_400);
        timer.on_pause(&mut store).unwrap();
        assert_eq!(store.get(&id).unwrap().seconds, 2);
        assert!(!timer.is_ticking());
    }

    #[test]
    fn test_double_start_is_noop() {
        let (mut store, clock, id) = setup(NewTask::new("a").with_timer(true));
        let mut timer = mount(&mut store, &clock, &id);
        timer.on_start(&mut store).unwrap();
        clock.advance_secs(2);
        timer.on_start(&mut store).unwrap();
        clock.advance_secs(2);
        timer.tick();

        assert_eq!(timer.elapsed_seconds(), 4);
        assert_eq!(store.get(&id).unwrap().started_at, T0);
    }

    #[test]
    fn test_unmount_then_remount_adds_away_time() {
        let (mut store, clock, id) = setup(NewTask::new("a").with_timer(true));
        let mut timer = mount(&mut store, &clock, &id);
        timer.on_start(&mut store).unwrap();
        run_for(&mut timer, &clock, 4);

        timer.unmount(&mut store).unwrap();
        let task = store.get(&id).unwrap();
        assert_eq!(task.seconds, 4);
        assert_eq!(task.category, Category::Active);
        assert_eq!(task.started_at, T0 + 4_000);

        clock.advance_secs(30);
        let timer = mount(&mut store, &clock, &id);
        assert_eq!(timer.elapsed_seconds(), 34);
        assert!(timer.is_ticking());
        assert_eq!(timer.display_timer(), "00:00:34");
    }

    #[test]
    fn test_unmount_keeps_partial_second() {
        let (mut store, clock, id) = setup(NewTask::new("a").with_timer(true));
        let mut timer = mount(&mut store, &clock, &id);
        timer.on_start(&mut store).unwrap();
        clock.advance_ms(2_600);
        timer.unmount(&mut store).unwrap();

        // 2 whole seconds stored, anchored at the 2s boundary
        assert_eq!(store.get(&id).unwrap().seconds, 2);
        clock.advance_ms(400);
        let timer = mount(&mut store, &clock, &id);
        assert_eq!(timer.elapsed_seconds(), 3);
    }

    #[test]
    fn test_repeated_mount_cycles_do_not_double_count() {
        let (mut store, clock, id) = setup(NewTask::new("a").with_timer(true));
        let mut timer = mount(&mut store, &clock, &id);
        timer.on_start(&mut store).unwrap();

        for _ in 0..5 {
            run_for(&mut timer, &clock, 3);
            timer.unmount(&mut store).unwrap();
            clock.advance_secs(2);
            timer = mount(&mut store, &clock, &id);
        }
        // 5 cycles of 3 visible + 2 away seconds
        assert_eq!(timer.elapsed_seconds(), 25);
    }

    #[test]
    fn test_mount_paused_task_does_not_tick() {
        let (mut store, clock, id) = setup(NewTask::new("a").with_timer(true));
        store
            .dispatch(Action::Edit(
                TaskPatch::new(&id).category(Category::Paused).seconds(40).started_at(T0),
            ))
            .unwrap();
        clock.advance_secs(100);

        let mut timer = mount(&mut store, &clock, &id);
        assert_eq!(timer.elapsed_seconds(), 40);
        run_for(&mut timer, &clock, 5);
        assert_eq!(timer.elapsed_seconds(), 40);
    }

    #[test]
    fn test_start_on_create_anchors_started_at_on_mount() {
        let (mut store, clock, id) = setup(NewTask::new("Run").with_timer(true).started());
        clock.advance_secs(1);
        let mut timer = mount(&mut store, &clock, &id);

        let task = store.get(&id).unwrap();
        assert_eq!(task.started_at, T0 + 1_000);
        assert!(timer.is_ticking());
        run_for(&mut timer, &clock, 2);
        assert_eq!(timer.elapsed_seconds(), 2);
    }

    #[test]
    fn test_complete_and_uncomplete() {
        let (mut store, clock, id) = setup(NewTask::new("a").with_timer(true));
        let mut timer = mount(&mut store, &clock, &id);

        clock.advance_secs(1);
        timer.on_complete(&mut store).unwrap();
        let task = store.get(&id).unwrap();
        assert_eq!(task.category, Category::Done);
        // Prior category was default, not done
        assert!(!task.was_completed);
        assert_eq!(task.started_at, T0 + 1_000);
        assert_eq!(task.finished_at, T0 + 1_000);

        timer.on_complete(&mut store).unwrap();
        let task = store.get(&id).unwrap();
        assert_eq!(task.category, Category::Default);
        assert!(task.was_completed);
    }

    #[test]
    fn test_complete_active_task_freezes_time() {
        let (mut store, clock, id) = setup(NewTask::new("a").with_timer(true));
        let mut timer = mount(&mut store, &clock, &id);
        timer.on_start(&mut store).unwrap();
        run_for(&mut timer, &clock, 6);

        timer.on_complete(&mut store).unwrap();
        assert!(!timer.is_ticking());
        run_for(&mut timer, &clock, 6);
        assert_eq!(store.get(&id).unwrap().seconds, 6);
        assert_eq!(timer.elapsed_seconds(), 6);
    }

    #[test]
    fn test_start_ignored_when_done_or_deleted() {
        let (mut store, clock, id) = setup(NewTask::new("a").with_timer(true));
        let mut timer = mount(&mut store, &clock, &id);
        timer.on_complete(&mut store).unwrap();
        timer.on_start(&mut store).unwrap();
        assert_eq!(timer.category(), Category::Done);

        timer.on_complete(&mut store).unwrap();
        timer.on_delete(&mut store).unwrap();
        timer.on_start(&mut store).unwrap();
        timer.on_complete(&mut store).unwrap();
        assert_eq!(store.get(&id).unwrap().category, Category::Deleted);
    }

    #[test]
    fn test_delete_active_task_flushes_then_restores() {
        let (mut store, clock, id) = setup(NewTask::new("x").with_timer(true));
        let mut timer = mount(&mut store, &clock, &id);
        timer.on_start(&mut store).unwrap();
        run_for(&mut timer, &clock, 3);

        timer.on_delete(&mut store).unwrap();
        let task = store.get(&id).unwrap();
        assert_eq!(task.category, Category::Deleted);
        assert_eq!(task.seconds, 3);
        assert_eq!(store.len(), 1);
        assert!(timer.view(task).is_deleted_visually);

        timer.on_restore(&mut store).unwrap();
        assert_eq!(store.get(&id).unwrap().category, Category::Default);
        assert!(!timer.reconcile(store.get(&id).unwrap()));
    }

    #[test]
    fn test_reconcile_external_seconds_update() {
        let (mut store, clock, id) = setup(NewTask::new("a").with_timer(true));
        let mut timer = mount(&mut store, &clock, &id);
        timer.on_start(&mut store).unwrap();
        run_for(&mut timer, &clock, 5);

        // Another screen rewrites the stored time
        let now = clock.now_ms();
        store
            .dispatch(Action::Edit(TaskPatch::new(&id).seconds(100).started_at(now)))
            .unwrap();
        assert!(timer.reconcile(store.get(&id).unwrap()));
        assert_eq!(timer.elapsed_seconds(), 100);

        run_for(&mut timer, &clock, 2);
        assert_eq!(timer.elapsed_seconds(), 102);
        assert_eq!(timer.display_timer(), "00:01:42");
    }

    #[test]
    fn test_reconcile_external_pause_stops_tick() {
        let (mut store, clock, id) = setup(NewTask::new("a").with_timer(true));
        let mut timer = mount(&mut store, &clock, &id);
        timer.on_start(&mut store).unwrap();
        run_for(&mut timer, &clock, 2);

        store
            .dispatch(Action::Edit(TaskPatch::new(&id).category(Category::Paused).seconds(2)))
            .unwrap();
        assert!(timer.reconcile(store.get(&id).unwrap()));
        assert!(!timer.is_ticking());
        run_for(&mut timer, &clock, 2);
        assert_eq!(timer.elapsed_seconds(), 2);
    }

    #[test]
    fn test_reconcile_ignores_own_writes_and_title_edits() {
        let (mut store, clock, id) = setup(NewTask::new("a").with_timer(true));
        let mut timer = mount(&mut store, &clock, &id);
        timer.on_start(&mut store).unwrap();
        run_for(&mut timer, &clock, 3);

        store
            .dispatch(Action::Edit(TaskPatch::new(&id).title("renamed")))
            .unwrap();
        assert!(!timer.reconcile(store.get(&id).unwrap()));
        assert_eq!(timer.elapsed_seconds(), 3);
        assert_eq!(timer.view(store.get(&id).unwrap()).title, "renamed");
    }

    #[test]
    fn test_timer_disabled_task_never_accumulates() {
        let (mut store, clock, id) = setup(NewTask::new("no timer"));
        let mut timer = mount(&mut store, &clock, &id);
        timer.on_start(&mut store).unwrap();
        assert_eq!(timer.category(), Category::Active);
        assert!(!timer.is_ticking());

        run_for(&mut timer, &clock, 5);
        timer.on_pause(&mut store).unwrap();
        assert_eq!(store.get(&id).unwrap().seconds, 0);

        let view = timer.view(store.get(&id).unwrap());
        assert_eq!(view.display_timer, TIMER_DISABLED);
        assert_eq!(view.status, TaskStatus::Paused);
    }

    #[test]
    fn test_on_edit_requests_edit_screen() {
        let (mut store, clock, id) = setup(NewTask::new("Call the plumber about the sink"));
        let timer = mount(&mut store, &clock, &id);
        let mut navigation = Navigation::new();

        timer.on_edit(store.get(&id).unwrap(), &mut navigation);
        assert_eq!(
            navigation.current(),
            &Route::EditTask(EditParams {
                title: "Edit todo: Call the plumbe...".to_string(),
                action: ActionType::EditTodo,
                todo_id: id.clone(),
            })
        );
    }

    #[test]
    fn test_toggle_run() {
        let (mut store, clock, id) = setup(NewTask::new("a").with_timer(true));
        let mut timer = mount(&mut store, &clock, &id);
        timer.on_toggle_run(&mut store).unwrap();
        assert_eq!(timer.category(), Category::Active);
        timer.on_toggle_run(&mut store).unwrap();
        assert_eq!(timer.category(), Category::Paused);
    }

    #[test]
    fn test_reconstruct_elapsed() {
        let mut task = Task::create("t".to_string(), &NewTask::new("a").with_timer(true), T0);
        task.seconds = 10;
        assert_eq!(reconstruct_elapsed(&task, T0 + 60_000), 10);

        task.category = Category::Active;
        task.started_at = T0;
        assert_eq!(reconstruct_elapsed(&task, T0 + 60_000), 70);
        // Clock behind started_at never subtracts
        assert_eq!(reconstruct_elapsed(&task, T0 - 60_000), 10);
    }
}
