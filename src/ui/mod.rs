pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod styles;

use crate::app::AppState;
use crate::screens::Route;
use input_form::{render_add_form, render_edit_form};
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::render_list_pane;
use ratatui::{text::Span, widgets::Paragraph, Frame};
use styles::error_style;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);
    let route = app.navigation.current();

    render_keybindings(f, route, layout.keybindings_area);

    // The list stays visible beneath the add and edit screens
    render_list_pane(f, app, layout.list_area);

    if let Some(message) = &app.status_message {
        let status = Paragraph::new(Span::styled(format!(" {}", message), error_style()));
        f.render_widget(status, layout.status_area);
    }

    match route {
        Route::TaskList => {}
        Route::AddTask => {
            if let Some(form) = &app.add_form {
                render_add_form(f, form, size);
            }
        }
        Route::EditTask(_) => {
            if let Some(form) = &app.edit_form {
                render_edit_form(f, form, size);
            }
        }
    }
}
