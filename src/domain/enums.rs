use serde::{Deserialize, Serialize};

/// Lifecycle category of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Default,
    Active,
    Paused,
    Done,
    Deleted,
}

impl Category {
    /// Lowercase name, matching the serialized form
    pub fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Done => "done",
            Self::Deleted => "deleted",
        }
    }

    /// Display status derived from the category
    pub fn status(&self) -> TaskStatus {
        match self {
            Self::Default => TaskStatus::NotStarted,
            Self::Active => TaskStatus::InProgress,
            Self::Paused => TaskStatus::Paused,
            Self::Done => TaskStatus::Completed,
            Self::Deleted => TaskStatus::Deleted,
        }
    }
}

/// Status shown next to a task in the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    NotStarted,
    InProgress,
    Paused,
    Completed,
    Deleted,
}

/// Tabs of the task list screen, each showing a set of categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListTab {
    #[default]
    Todo,
    Done,
    Deleted,
}

impl ListTab {
    /// Parse a tab from its lowercase name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "todo" => Some(Self::Todo),
            "done" => Some(Self::Done),
            "deleted" => Some(Self::Deleted),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ListTab::Todo => "todo",
            ListTab::Done => "done",
            ListTab::Deleted => "deleted",
        }
    }

    /// Whether a task with this category belongs on the tab
    pub fn includes(&self, category: Category) -> bool {
        match self {
            ListTab::Todo => matches!(
                category,
                Category::Default | Category::Active | Category::Paused
            ),
            ListTab::Done => category == Category::Done,
            ListTab::Deleted => category == Category::Deleted,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ListTab::Todo => "Todo",
            ListTab::Done => "Done",
            ListTab::Deleted => "Deleted",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ListTab::Todo => ListTab::Done,
            ListTab::Done => ListTab::Deleted,
            ListTab::Deleted => ListTab::Todo,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            ListTab::Todo => ListTab::Deleted,
            ListTab::Done => ListTab::Todo,
            ListTab::Deleted => ListTab::Done,
        }
    }

    /// Get all tabs in display order
    pub fn all() -> &'static [ListTab] {
        &[ListTab::Todo, ListTab::Done, ListTab::Deleted]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_tab_from_name() {
        assert_eq!(ListTab::from_name("todo"), Some(ListTab::Todo));
        assert_eq!(ListTab::from_name(" Deleted "), Some(ListTab::Deleted));
        assert_eq!(ListTab::from_name("archive"), None);
        for tab in ListTab::all() {
            assert_eq!(ListTab::from_name(tab.name()), Some(*tab));
        }
    }

    #[test]
    fn test_category_serializes_lowercase() {
        let json = serde_json::to_string(&Category::Paused).unwrap();
        assert_eq!(json, "\"paused\"");
        let parsed: Category = serde_json::from_str("\"done\"").unwrap();
        assert_eq!(parsed, Category::Done);
    }

    #[test]
    fn test_category_status() {
        assert_eq!(Category::Default.status(), TaskStatus::NotStarted);
        assert_eq!(Category::Active.status(), TaskStatus::InProgress);
        assert_eq!(Category::Deleted.status(), TaskStatus::Deleted);
    }

    #[test]
    fn test_list_tab_includes() {
        assert!(ListTab::Todo.includes(Category::Default));
        assert!(ListTab::Todo.includes(Category::Active));
        assert!(ListTab::Todo.includes(Category::Paused));
        assert!(!ListTab::Todo.includes(Category::Done));
        assert!(ListTab::Done.includes(Category::Done));
        assert!(ListTab::Deleted.includes(Category::Deleted));
        assert!(!ListTab::Deleted.includes(Category::Default));
    }

    #[test]
    fn test_list_tab_cycle() {
        let mut tab = ListTab::Todo;
        for _ in 0..ListTab::all().len() {
            tab = tab.next();
        }
        assert_eq!(tab, ListTab::Todo);
        assert_eq!(ListTab::Todo.previous(), ListTab::Deleted);
    }
}
