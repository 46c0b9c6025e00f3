use crate::app::AppState;
use crate::domain::{
    action_hint, left_panel_actions, right_panel_actions, status_badge, ListTab, TaskStatus, TaskView,
};
use crate::screens::PanelSide;
use crate::ui::styles::{
    active_tab_style, border_style, default_style, deleted_style, hint_style, panel_style,
    selected_style, status_style,
};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Render the task list for the selected tab
pub fn render_list_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(tab_title(app.task_list.tab()));

    let rows = app.task_list.rows(&app.store);
    if rows.is_empty() {
        let empty = Paragraph::new("List is empty")
            .style(hint_style())
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let panels = app.task_list.panels();
    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .map(|(idx, view)| {
            let panel = panels.side_for(&view.id);
            let text = create_task_text(view, panel, app.settings.show_created_at);
            let style = if idx == app.task_list.selected_index() {
                selected_style()
            } else {
                default_style()
            };
            ListItem::new(text).style(style)
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

/// " Todo | Done | Deleted " with the current tab highlighted
fn tab_title(current: ListTab) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    for (i, tab) in ListTab::all().iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", border_style()));
        }
        let style = if *tab == current { active_tab_style() } else { hint_style() };
        spans.push(Span::styled(tab.title(), style));
    }
    spans.push(Span::raw(" "));
    Line::from(spans)
}

/// Row text
/// Format: ⏱ 00:12:04  Write proposal  ⏸ PAUSED   [enter start · e edit · c done]
///            created 18 Oct 2026, 09:30
fn create_task_text(view: &TaskView, panel: Option<PanelSide>, show_created_at: bool) -> Text<'static> {
    let mut spans = vec![
        Span::raw(format!(
            "{} {}  ",
            if view.is_timer_enabled { "⏱" } else { " " },
            view.display_timer
        )),
        if view.is_deleted_visually {
            Span::styled(view.title.clone(), deleted_style())
        } else {
            Span::raw(view.title.clone())
        },
        Span::raw("  "),
        Span::styled(status_badge(view.status), status_style(view.status)),
    ];

    if view.was_completed && view.status == TaskStatus::NotStarted {
        spans.push(Span::styled(" (reopened)", hint_style()));
    }

    if let Some(side) = panel {
        let actions = match side {
            PanelSide::Right => right_panel_actions(view),
            PanelSide::Left => left_panel_actions(),
        };
        let hints: Vec<String> = actions
            .iter()
            .map(|action| {
                let (key, label) = action_hint(*action, view);
                format!("{} {}", key, label)
            })
            .collect();
        let body = if hints.is_empty() {
            "no actions".to_string()
        } else {
            hints.join(" · ")
        };
        spans.push(Span::raw("   "));
        spans.push(Span::styled(format!("[{}]", body), panel_style()));
    }

    let mut lines = vec![Line::from(spans)];
    if show_created_at && !view.created_label.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("   created {}", view.created_label),
            hint_style(),
        )));
    }
    Text::from(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

    fn view(category: Category) -> TaskView {
        TaskView {
            id: "t1".to_string(),
            title: "Write proposal".to_string(),
            display_timer: "00:12:04".to_string(),
            status: category.status(),
            is_deleted_visually: category == Category::Deleted,
            was_completed: false,
            is_timer_enabled: true,
            created_label: "18 Oct 2026, 09:30".to_string(),
            category,
        }
    }

    fn flatten(text: &Text) -> String {
        text.lines
            .iter()
            .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_create_task_text() {
        let text = create_task_text(&view(Category::Paused), None, true);
        let rendered = flatten(&text);
        assert!(rendered.contains("⏱ 00:12:04"));
        assert!(rendered.contains("Write proposal"));
        assert!(rendered.contains("⏸ PAUSED"));
        assert!(rendered.contains("created 18 Oct 2026, 09:30"));
    }

    #[test]
    fn test_created_label_can_be_hidden() {
        let text = create_task_text(&view(Category::Default), None, false);
        assert_eq!(text.lines.len(), 1);
    }

    #[test]
    fn test_open_panel_hints() {
        let right = flatten(&create_task_text(&view(Category::Active), Some(PanelSide::Right), false));
        assert!(right.contains("[enter pause · e edit · c done]"));

        let left = flatten(&create_task_text(&view(Category::Deleted), Some(PanelSide::Left), false));
        assert!(left.contains("[x restore]"));

        let empty = flatten(&create_task_text(&view(Category::Deleted), Some(PanelSide::Right), false));
        assert!(empty.contains("[no actions]"));
    }

    #[test]
    fn test_tab_title_lists_all_tabs() {
        let title = tab_title(ListTab::Done);
        let text: String = title.spans.iter().map(|span| span.content.as_ref()).collect();
        assert_eq!(text, " Todo | Done | Deleted ");
    }
}
