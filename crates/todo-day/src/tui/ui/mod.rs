/*
[INPUT]:  TUI app state
[OUTPUT]: Full-frame layout and shared styles
[POS]:    TUI UI module root
[UPDATE]: When adding panels or changing the palette
*/

mod footer;
mod input;
mod logs;
mod task_list;

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};

use todo_day_core::TaskStorage;

use super::app::AppState;

const LOG_PANE_HEIGHT: u16 = 8;

pub(in crate::tui) fn draw_ui<S: TaskStorage>(frame: &mut ratatui::Frame, app: &mut AppState<S>) {
    let mut constraints = vec![
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(4),
    ];
    if app.show_logs {
        constraints.insert(2, Constraint::Length(LOG_PANE_HEIGHT));
    }
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    input::draw_input(frame, chunks[0], app);
    task_list::draw_task_list(frame, chunks[1], app);
    if app.show_logs {
        logs::draw_logs(frame, chunks[2], &app.log_buffer);
        footer::draw_footer(frame, chunks[3], app);
    } else {
        footer::draw_footer(frame, chunks[2], app);
    }
}

pub(crate) fn border_style() -> Style {
    Style::default().fg(Color::Magenta)
}

pub(crate) fn edit_border_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn completed_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::CROSSED_OUT)
}
