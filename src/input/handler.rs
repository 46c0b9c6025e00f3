use crate::app::AppState;
use crate::screens::{add_task::FIELD_TITLE, PanelSide, Route};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events; returns true to quit
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    match app.navigation.current().clone() {
        Route::TaskList => handle_list_mode(app, key),
        Route::AddTask => handle_add_form_mode(app, key),
        Route::EditTask(_) => handle_edit_form_mode(app, key),
    }
}

/// Handle keys on the task list
fn handle_list_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(true),

        KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection_down(),

        // Action panels
        KeyCode::Right => app.open_panel(PanelSide::Right),
        KeyCode::Left => app.open_panel(PanelSide::Left),
        KeyCode::Esc => app.close_panel(),

        KeyCode::Enter => app.toggle_run_pause(),
        KeyCode::Char('c') | KeyCode::Char('C') => app.toggle_complete(),
        KeyCode::Char('e') | KeyCode::Char('E') => app.start_edit_task(),
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => app.delete_or_restore(),
        KeyCode::Char('a') | KeyCode::Char('A') => app.start_add_task(),

        KeyCode::Tab => app.next_tab(),
        KeyCode::BackTab => app.previous_tab(),

        _ => {}
    }
    Ok(false)
}

/// Handle keys on the add task screen
fn handle_add_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => app.cancel_add_form(),
        KeyCode::Enter => app.submit_add_form(),
        _ => {
            let Some(form) = app.add_form.as_mut() else {
                return Ok(false);
            };
            match key.code {
                KeyCode::Tab | KeyCode::Down => form.next_field(),
                KeyCode::BackTab | KeyCode::Up => form.previous_field(),
                KeyCode::Backspace => form.backspace(),
                // Space flips a toggle, types a space in the title
                KeyCode::Char(' ') if form.editing_field != FIELD_TITLE => form.toggle_current(),
                KeyCode::Char(c) => form.add_char(c),
                _ => {}
            }
        }
    }
    Ok(false)
}

/// Handle keys on the edit task screen
fn handle_edit_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => app.cancel_edit_form(),
        KeyCode::Enter => app.submit_edit_form(),
        KeyCode::Backspace => {
            if let Some(form) = app.edit_form.as_mut() {
                form.backspace();
            }
        }
        KeyCode::Char(c) => {
            if let Some(form) = app.edit_form.as_mut() {
                form.add_char(c);
            }
        }
        _ => {}
    }
    Ok(false)
}
