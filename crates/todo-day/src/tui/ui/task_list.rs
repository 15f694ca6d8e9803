/*
[INPUT]:  AppState task list and selection
[OUTPUT]: Task list rendered into Ratatui frame
[POS]:    TUI UI task list rendering
[UPDATE]: When changing how tasks are listed
*/

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem};

use todo_day_core::TaskStorage;

use super::{border_style, completed_style, edit_border_style};
use crate::tui::app::AppState;

pub(super) fn draw_task_list<S: TaskStorage>(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    app: &mut AppState<S>,
) {
    let editing = app.session.editing_id();
    let items = if app.store.is_empty() {
        vec![ListItem::new("No tasks yet")]
    } else {
        app.store
            .tasks()
            .iter()
            .map(|task| {
                let (mark, text_style) = if task.completed {
                    ("[x] ", completed_style())
                } else {
                    ("[ ] ", Style::default())
                };
                let mut spans = vec![Span::raw(mark), Span::styled(task.text.clone(), text_style)];
                if editing == Some(task.id) {
                    spans.push(Span::styled("  (editing)", edit_border_style()));
                }
                ListItem::new(Line::from(spans))
            })
            .collect()
    };

    let title = format!(
        "Today ({}/{} done)",
        app.store.completed_count(),
        app.store.len()
    );
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(title),
        )
        .highlight_style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, area, &mut app.list_state);
}
