use crate::screens::Route;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar for the current screen
pub fn render_keybindings(f: &mut Frame, route: &Route, area: Rect) {
    let hints: Vec<Span> = match route {
        Route::TaskList => vec![
            Span::raw(" ↑/↓ select   "),
            Span::raw("←/→ actions   "),
            Span::raw("Enter start/pause   "),
            Span::raw("c done   "),
            Span::raw("e edit   "),
            Span::raw("x delete/restore   "),
            Span::raw("a add   "),
            Span::raw("Tab tabs   "),
            Span::raw("q quit"),
        ],
        Route::AddTask => vec![
            Span::raw(" Tab next field   "),
            Span::raw("Space toggle   "),
            Span::raw("Enter save   "),
            Span::raw("Esc cancel"),
        ],
        Route::EditTask(_) => vec![Span::raw(" Enter save   "), Span::raw("Esc cancel")],
    };

    let paragraph = Paragraph::new(Line::from(hints)).style(hint_style());
    f.render_widget(paragraph, area);
}
