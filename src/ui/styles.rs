use crate::domain::TaskStatus;
use ratatui::style::{Color, Modifier, Style};

pub fn default_style() -> Style {
    Style::default().fg(Color::White)
}

/// Row under the cursor
pub fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

/// Badge colour for each row status
///
/// In-progress rows stand out, finished ones recede, deleted rows are struck through.
pub fn status_style(status: TaskStatus) -> Style {
    match status {
        TaskStatus::InProgress => Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
        TaskStatus::Paused => Style::default().fg(Color::Yellow),
        TaskStatus::Completed => Style::default().fg(Color::Green),
        TaskStatus::NotStarted => Style::default().fg(Color::Gray),
        TaskStatus::Deleted => deleted_style(),
    }
}

/// Title text of a soft-deleted row
pub fn deleted_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::CROSSED_OUT)
}

/// Selected tab name in the list header
pub fn active_tab_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub fn border_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Slide-out row actions
pub fn panel_style() -> Style {
    Style::default().fg(Color::Black).bg(Color::Yellow)
}

/// Add and edit form body
pub fn modal_bg_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Form header, title input and checkboxes
pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Key hints, inactive tabs, "List is empty" and creation dates
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Validation and dispatch errors
pub fn error_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}
