use thiserror::Error;

/// Failures of store dispatches and form validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    #[error("task not found: {id}")]
    NotFound { id: String },

    #[error("Title cannot be empty")]
    EmptyTitle,
}

impl TodoError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }
}
