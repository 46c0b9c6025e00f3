use super::enums::Category;
use serde::{Deserialize, Serialize};

/// A single trackable to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique ID, immutable after creation
    pub id: String,
    pub title: String,
    /// Creation time (ms since epoch)
    pub created_at: i64,
    /// Last time the task entered the active state (0 = never)
    pub started_at: i64,
    /// Last time the task left the active state (0 = never)
    pub finished_at: i64,
    /// Cumulative active duration in seconds
    pub seconds: u64,
    pub category: Category,
    /// True when the task is transitioning out of done
    #[serde(rename = "wasCompleted")]
    pub was_completed: bool,
    /// Whether time tracking applies to this task
    #[serde(rename = "isTimerEnabled")]
    pub is_timer_enabled: bool,
}

impl Task {
    /// Build a freshly created task from an add request
    pub fn create(id: String, new_task: &NewTask, now_ms: i64) -> Self {
        Self {
            id,
            title: new_task.title.clone(),
            created_at: now_ms,
            started_at: 0,
            finished_at: 0,
            seconds: 0,
            category: new_task.category,
            was_completed: false,
            is_timer_enabled: new_task.is_timer_enabled,
        }
    }

    /// Apply the supplied fields of a patch, keeping everything else
    pub fn apply(&mut self, patch: &TaskPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(started_at) = patch.started_at {
            self.started_at = started_at;
        }
        if let Some(finished_at) = patch.finished_at {
            self.finished_at = finished_at;
        }
        if let Some(seconds) = patch.seconds {
            self.seconds = seconds;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(was_completed) = patch.was_completed {
            self.was_completed = was_completed;
        }
        if let Some(is_timer_enabled) = patch.is_timer_enabled {
            self.is_timer_enabled = is_timer_enabled;
        }
    }
}

/// Input of the add action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(rename = "isTimerEnabled", default)]
    pub is_timer_enabled: bool,
    #[serde(default)]
    pub category: Category,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            is_timer_enabled: false,
            category: Category::Default,
        }
    }

    pub fn with_timer(mut self, enabled: bool) -> Self {
        self.is_timer_enabled = enabled;
        self
    }

    /// Start the task as soon as it is created
    pub fn started(mut self) -> Self {
        self.category = Category::Active;
        self
    }
}

/// Partial task keyed by id; `None` fields are left untouched on edit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(rename = "wasCompleted", default, skip_serializing_if = "Option::is_none")]
    pub was_completed: Option<bool>,
    #[serde(rename = "isTimerEnabled", default, skip_serializing_if = "Option::is_none")]
    pub is_timer_enabled: Option<bool>,
}

impl TaskPatch {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Full replacement of every mutable field
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            title: Some(task.title.clone()),
            started_at: Some(task.started_at),
            finished_at: Some(task.finished_at),
            seconds: Some(task.seconds),
            category: Some(task.category),
            was_completed: Some(task.was_completed),
            is_timer_enabled: Some(task.is_timer_enabled),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn started_at(mut self, ms: i64) -> Self {
        self.started_at = Some(ms);
        self
    }

    pub fn finished_at(mut self, ms: i64) -> Self {
        self.finished_at = Some(ms);
        self
    }

    pub fn seconds(mut self, seconds: u64) -> Self {
        self.seconds = Some(seconds);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn was_completed(mut self, was_completed: bool) -> Self {
        self.was_completed = Some(was_completed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_task() -> Task {
        Task::create("t1".to_string(), &NewTask::new("Buy milk"), 1_000)
    }

    #[test]
    fn test_task_create() {
        let task = sample_task();
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.created_at, 1_000);
        assert_eq!(task.started_at, 0);
        assert_eq!(task.finished_at, 0);
        assert_eq!(task.seconds, 0);
        assert_eq!(task.category, Category::Default);
        assert!(!task.was_completed);
        assert!(!task.is_timer_enabled);
    }

    #[test]
    fn test_task_create_started() {
        let new_task = NewTask::new("Run").with_timer(true).started();
        let task = Task::create("t2".to_string(), &new_task, 5);
        assert_eq!(task.category, Category::Active);
        assert!(task.is_timer_enabled);
        // Anchoring started_at is left to the timer controller
        assert_eq!(task.started_at, 0);
    }

    #[test]
    fn test_apply_partial_patch_keeps_other_fields() {
        let mut task = sample_task();
        task.seconds = 42;

        task.apply(&TaskPatch::new("t1").category(Category::Paused).finished_at(9_000));

        assert_eq!(task.category, Category::Paused);
        assert_eq!(task.finished_at, 9_000);
        assert_eq!(task.seconds, 42);
        assert_eq!(task.title, "Buy milk");
    }

    #[test]
    fn test_apply_full_patch() {
        let mut task = sample_task();
        let mut target = task.clone();
        target.title = "Buy oat milk".to_string();
        target.seconds = 30;
        target.category = Category::Done;
        target.was_completed = true;

        task.apply(&TaskPatch::from_task(&target));
        assert_eq!(task, target);
    }

    #[test]
    fn test_task_serialized_field_names() {
        let value = serde_json::to_value(sample_task()).unwrap();
        assert_eq!(value["category"], "default");
        assert_eq!(value["wasCompleted"], false);
        assert_eq!(value["isTimerEnabled"], false);
        assert_eq!(value["created_at"], 1_000);
    }
}
