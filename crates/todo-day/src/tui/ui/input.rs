/*
[INPUT]:  Active input line (new task or edit draft)
[OUTPUT]: Input box with cursor rendered into Ratatui frame
[POS]:    TUI UI input line rendering
[UPDATE]: When changing the input line
*/

use ratatui::widgets::{Block, Borders, Paragraph};

use todo_day_core::TaskStorage;

use super::{border_style, edit_border_style};
use crate::tui::app::AppState;

pub(super) fn draw_input<S: TaskStorage>(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    app: &AppState<S>,
) {
    let (title, style) = match app.session.editing_id() {
        Some(id) => (
            format!("Editing task {id} (Enter save, Esc cancel)"),
            edit_border_style(),
        ),
        None => ("New task".to_string(), border_style()),
    };

    let input = app.active_input();
    let width = area.width.saturating_sub(2) as usize;
    let scroll = input.visual_scroll(width.saturating_sub(1));
    let widget = Paragraph::new(input.value())
        .scroll((0, scroll as u16))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(style)
                .title(title),
        );
    frame.render_widget(widget, area);

    let cursor = input.visual_cursor().saturating_sub(scroll) as u16;
    frame.set_cursor_position((area.x + 1 + cursor, area.y + 1));
}
