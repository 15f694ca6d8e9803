/*
[INPUT]:  LogBufferHandle snapshots for UI
[OUTPUT]: Log panel rendered into Ratatui frame
[POS]:    TUI UI logs panel rendering
[UPDATE]: When changing the log pane
*/

use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use super::border_style;
use crate::tui::LogBufferHandle;

pub(super) fn draw_logs(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    buffer: &LogBufferHandle,
) {
    let available = area.height.saturating_sub(2) as usize;
    let (lines, total) = match buffer.lock() {
        Ok(guard) => (guard.tail(available), guard.len()),
        Err(_) => (Vec::new(), 0),
    };

    let text = lines.into_iter().map(Line::from).collect::<Vec<_>>();
    let widget = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(format!("Logs ({total})")),
    );
    frame.render_widget(widget, area);
}
