use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub list_area: Rect,
    pub status_area: Rect,
}

/// Create the main layout
/// - Top bar: keybindings (1 row)
/// - Main area: task list
/// - Bottom bar: status message (1 row)
pub fn create_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Keybindings bar
            Constraint::Min(0),    // Task list
            Constraint::Length(1), // Status line
        ])
        .split(area);

    MainLayout {
        keybindings_area: chunks[0],
        list_area: chunks[1],
        status_area: chunks[2],
    }
}

/// Create centered modal area (for the add and edit screens)
pub fn create_modal_area(area: Rect) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(14),
            Constraint::Percentage(25),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}
