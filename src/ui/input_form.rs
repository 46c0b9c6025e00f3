use crate::screens::{
    add_task::{FIELD_START, FIELD_TIMER, FIELD_TITLE},
    AddTaskForm, EditTaskForm,
};
use crate::ui::{
    layout::create_modal_area,
    styles::{error_style, hint_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Editable title line with a cursor when focused
fn title_line(title: &str, focused: bool) -> Line<'static> {
    Line::from(vec![
        Span::raw("> "),
        Span::styled(title.to_string(), modal_title_style()),
        if focused {
            Span::styled("█", modal_title_style()) // Cursor
        } else {
            Span::raw("")
        },
    ])
}

fn toggle_line(label: &str, checked: bool, focused: bool) -> Line<'static> {
    let marker = if focused { "› " } else { "  " };
    Line::from(vec![
        Span::raw(marker),
        Span::styled(checkbox(checked), modal_title_style()),
        Span::raw(format!(" {}", label)),
    ])
}

fn render_modal(f: &mut Frame, area: Rect, title: String, lines: Vec<Line<'static>>) {
    let modal_area = create_modal_area(area);
    f.render_widget(Clear, modal_area);

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title, modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

/// Lines of the add task form
pub fn add_form_lines(form: &AddTaskForm) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::raw(""),
        Line::raw("Title:"),
        title_line(&form.title, form.editing_field == FIELD_TITLE),
        Line::raw(""),
        toggle_line("Track time", form.timer_enabled, form.editing_field == FIELD_TIMER),
    ];

    // Only offered while the timer is on
    if form.timer_enabled {
        lines.push(toggle_line(
            "Start on create",
            form.start_on_create,
            form.editing_field == FIELD_START,
        ));
    }

    lines.push(Line::raw(""));
    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(error.clone(), error_style())));
    }
    lines.push(Line::from(Span::styled(
        "Tab to switch fields  ·  Space to toggle  ·  Enter to submit  ·  Esc to cancel",
        hint_style(),
    )));
    lines
}

/// Render the add task screen
pub fn render_add_form(f: &mut Frame, form: &AddTaskForm, area: Rect) {
    render_modal(f, area, " Add Task ".to_string(), add_form_lines(form));
}

/// Render the edit task screen
pub fn render_edit_form(f: &mut Frame, form: &EditTaskForm, area: Rect) {
    let mut lines = vec![Line::raw(""), Line::raw("Title:"), title_line(&form.title, true), Line::raw("")];
    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(error.clone(), error_style())));
    }
    lines.push(Line::from(Span::styled(
        "Enter to save  ·  Esc to cancel",
        hint_style(),
    )));

    render_modal(f, area, format!(" {} ", form.params.title), lines);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_start_toggle_hidden_without_timer() {
        let mut form = AddTaskForm::new();
        let lines: Vec<String> = add_form_lines(&form).iter().map(line_text).collect();
        assert!(!lines.iter().any(|l| l.contains("Start on create")));

        form.toggle_timer();
        let lines: Vec<String> = add_form_lines(&form).iter().map(line_text).collect();
        assert!(lines.iter().any(|l| l.contains("[x] Track time")));
        assert!(lines.iter().any(|l| l.contains("[ ] Start on create")));
    }

    #[test]
    fn test_validation_message_shown() {
        let mut form = AddTaskForm::new();
        form.error = Some("Title cannot be empty".to_string());
        let lines: Vec<String> = add_form_lines(&form).iter().map(line_text).collect();
        assert!(lines.iter().any(|l| l == "Title cannot be empty"));
    }
}
