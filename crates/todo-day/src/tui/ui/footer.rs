/*
[INPUT]:  Status message, copy notice, pending save warning
[OUTPUT]: Status and hotkey footer rendered into Ratatui frame
[POS]:    TUI UI footer rendering
[UPDATE]: When changing keybindings or status display
*/

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use todo_day_core::TaskStorage;

use super::border_style;
use crate::tui::app::AppState;

pub(super) fn draw_footer<S: TaskStorage>(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    app: &AppState<S>,
) {
    let key_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let status = match app.save_warning() {
        Some(warning) => Line::from(Span::styled(
            warning,
            Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
        )),
        None => {
            let mut spans = vec![Span::raw(format!("Status: {}", app.status_message))];
            if let Some(notice) = &app.copy_notice {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(notice.clone(), Style::default().fg(Color::LightGreen)));
            }
            Line::from(spans)
        }
    };

    let hotkeys = Line::from(vec![
        Span::styled("[Enter]", key_style),
        Span::raw(if app.is_editing() { " Save  " } else { " Add  " }),
        Span::styled("[Up/Down]", key_style),
        Span::raw(" Select  "),
        Span::styled("[^E]", key_style),
        Span::raw(" Edit  "),
        Span::styled("[^T]", key_style),
        Span::raw(" Done  "),
        Span::styled("[^D]", key_style),
        Span::raw(" Delete  "),
        Span::styled("[^Y]", key_style),
        Span::raw(if app.is_copy_pending() { " Copying  " } else { " Copy  " }),
        Span::styled("[^L]", key_style),
        Span::raw(" Logs  "),
        Span::styled("[Esc]", key_style),
        Span::raw(if app.is_editing() { " Cancel" } else { " Quit" }),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title("Hotkeys");
    let widget = Paragraph::new(Text::from(vec![status, hotkeys]))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}
