/*
[INPUT]:  Task store, clipboard, log buffer, and tick rate
[OUTPUT]: Ratatui run loop multiplexing terminal input and redraw ticks
[POS]:    TUI runtime loop
[UPDATE]: When changing the event loop or shutdown handling
*/

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{Event as CrosstermEvent, KeyEventKind};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use todo_day_core::Clipboard;

use super::LogBufferHandle;
use super::app::AppState;
use super::events::handle_key_event;
use super::terminal::TerminalGuard;
use super::ui::draw_ui;
use crate::context::DynStore;

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(200);

enum UiEvent {
    Input(CrosstermEvent),
}

pub async fn run_tui(
    store: DynStore,
    clipboard: Arc<dyn Clipboard>,
    log_buffer: LogBufferHandle,
    tick_rate: Duration,
) -> Result<()> {
    let mut terminal = TerminalGuard::new()?;
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let input_shutdown = CancellationToken::new();
    let input_shutdown_clone = input_shutdown.clone();

    tokio::task::spawn_blocking(move || {
        while !input_shutdown_clone.is_cancelled() {
            match crossterm::event::poll(INPUT_POLL_INTERVAL) {
                Ok(true) => match crossterm::event::read() {
                    Ok(event) => {
                        if event_tx.send(UiEvent::Input(event)).is_err() {
                            break;
                        }
                    }
                    Err(err) => warn!(error = %err, "failed to read terminal event"),
                },
                Ok(false) => {}
                Err(err) => {
                    warn!(error = %err, "failed to poll terminal events");
                    break;
                }
            }
        }
    });

    let mut app = AppState::new(store, clipboard, log_buffer);
    let mut tick = tokio::time::interval(tick_rate);
    let mut should_quit = false;

    while !should_quit {
        terminal.draw(|frame| draw_ui(frame, &mut app))?;

        tokio::select! {
            _ = tick.tick() => app.on_tick(),
            maybe_event = event_rx.recv() => match maybe_event {
                Some(UiEvent::Input(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                    should_quit = handle_key_event(&mut app, key);
                }
                Some(_) => {}
                None => should_quit = true,
            },
        }
    }

    input_shutdown.cancel();
    drop(terminal);
    info!(tasks = app.store.len(), "tui closed");

    if app.store.save_warning().is_some() {
        app.store
            .flush()
            .context("exiting with unsaved changes")?;
    }
    Ok(())
}
