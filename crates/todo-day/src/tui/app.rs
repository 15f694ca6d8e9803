/*
[INPUT]:  Task store, clipboard, log buffer, and key-driven intents
[OUTPUT]: AppState driving the list view, input line, and status line
[POS]:    TUI app state
[UPDATE]: When adding TUI actions or status messages
*/

use std::sync::Arc;

use ratatui::widgets::ListState;
use tui_input::{Input, InputRequest};

use todo_day_core::{Clipboard, CopyHandle, EditSession, Task, TaskId, TaskStorage, TaskStore, copy};

use crate::tui::LogBufferHandle;

pub(super) struct AppState<S: TaskStorage> {
    pub(super) store: TaskStore<S>,
    pub(super) session: EditSession,
    /// New-task text, kept while an edit is in progress
    pub(super) composer: Input,
    /// Cursor-aware mirror of the session draft
    pub(super) draft: Input,
    pub(super) list_state: ListState,
    pub(super) status_message: String,
    pub(super) copy_notice: Option<String>,
    pub(super) show_logs: bool,
    pub(super) log_buffer: LogBufferHandle,
    pending_copy: Option<CopyHandle>,
    clipboard: Arc<dyn Clipboard>,
}

impl<S: TaskStorage> AppState<S> {
    pub(super) fn new(
        store: TaskStore<S>,
        clipboard: Arc<dyn Clipboard>,
        log_buffer: LogBufferHandle,
    ) -> Self {
        let mut list_state = ListState::default();
        if !store.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            store,
            session: EditSession::new(),
            composer: Input::default(),
            draft: Input::default(),
            list_state,
            status_message: "Type a task and press Enter".to_string(),
            copy_notice: None,
            show_logs: false,
            log_buffer,
            pending_copy: None,
            clipboard,
        }
    }

    pub(super) fn is_editing(&self) -> bool {
        self.session.is_editing()
    }

    /// The input line currently receiving keystrokes
    pub(super) fn active_input(&self) -> &Input {
        if self.is_editing() {
            &self.draft
        } else {
            &self.composer
        }
    }

    pub(super) fn handle_input(&mut self, request: InputRequest) {
        if self.is_editing() {
            if self.draft.handle(request).is_some() {
                self.session.update_draft_text(self.draft.value());
            }
        } else {
            self.composer.handle(request);
        }
    }

    pub(super) fn selected_task(&self) -> Option<&Task> {
        self.list_state
            .selected()
            .and_then(|index| self.store.tasks().get(index))
    }

    fn selected_id(&self) -> Option<TaskId> {
        self.selected_task().map(|task| task.id)
    }

    pub(super) fn move_selection(&mut self, delta: isize) {
        let len = self.store.len();
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let current = self.list_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, len as isize - 1) as usize;
        self.list_state.select(Some(next));
    }

    /// Enter: commit the edit in progress, otherwise add the composed task
    pub(super) fn submit(&mut self) {
        if self.is_editing() {
            self.commit_edit();
        } else {
            self.add_task();
        }
    }

    fn add_task(&mut self) {
        match self.store.add(self.composer.value()) {
            Some(id) => {
                self.composer.reset();
                self.list_state.select(Some(self.store.len() - 1));
                self.status_message = format!("Added task {id}");
            }
            None => self.status_message = "Nothing to add".to_string(),
        }
    }

    fn commit_edit(&mut self) {
        let editing = self.session.editing_id();
        self.status_message = match (self.session.commit(&mut self.store), editing) {
            (Some(id), _) => format!("Updated task {id}"),
            (None, Some(id)) => format!("Task {id} unchanged"),
            (None, None) => String::new(),
        };
        self.draft.reset();
    }

    pub(super) fn begin_edit_selected(&mut self) {
        let Some(task) = self.selected_task().cloned() else {
            self.status_message = "No task selected".to_string();
            return;
        };
        self.session.begin_edit(&task);
        self.draft = Input::new(task.text);
        self.status_message = format!("Editing task {}", task.id);
    }

    /// Esc: returns `false` when there was no edit to cancel
    pub(super) fn cancel_edit(&mut self) -> bool {
        if !self.session.cancel() {
            return false;
        }
        self.draft.reset();
        self.status_message = "Edit cancelled".to_string();
        true
    }

    pub(super) fn toggle_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        if self.store.toggle_completed(id) {
            let done = self.store.get(id).is_some_and(|task| task.completed);
            let state = if done { "done" } else { "not done" };
            self.status_message = format!("Task {id} marked {state}");
        }
    }

    pub(super) fn delete_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        if !self.store.delete(id) {
            return;
        }
        self.status_message = format!("Deleted task {id}");
        if self.session.is_stale(&self.store) {
            self.session.cancel();
            self.draft.reset();
            self.status_message = format!("Deleted task {id} while editing it");
        }
        self.move_selection(0);
    }

    pub(super) fn copy_selected(&mut self) {
        let Some(text) = self.selected_task().map(|task| task.text.clone()) else {
            return;
        };
        self.pending_copy = Some(copy(self.clipboard.clone(), text));
        self.status_message = "Copying...".to_string();
    }

    pub(super) fn is_copy_pending(&self) -> bool {
        self.pending_copy.is_some()
    }

    /// Pick up a finished copy
    pub(super) fn on_tick(&mut self) {
        let Some(handle) = self.pending_copy.as_mut() else {
            return;
        };
        let Some(outcome) = handle.try_outcome() else {
            return;
        };
        self.pending_copy = None;
        match outcome.notice() {
            Some(notice) => {
                self.copy_notice = Some(notice);
                self.status_message = "Copied".to_string();
            }
            None => {
                self.copy_notice = None;
                self.status_message = "Could not copy to the clipboard".to_string();
            }
        }
    }

    pub(super) fn toggle_logs(&mut self) {
        self.show_logs = !self.show_logs;
    }

    /// Pending save failure, worded for the status line
    pub(super) fn save_warning(&self) -> Option<String> {
        self.store
            .save_warning()
            .map(|warning| format!("Warning: {warning}"))
    }
}
