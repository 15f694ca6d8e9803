/*
[INPUT]:  Parsed subcommand, the task store and a clipboard
[OUTPUT]: One-shot task commands printing plain lines to a writer
[POS]:    Scriptable CLI surface
[UPDATE]: When adding subcommands or changing their output
*/

pub mod interactive;

use std::io::Write;
use std::sync::Arc;

use anyhow::{Result, bail};
use clap::Subcommand;

use todo_day_core::{Clipboard, EditSession, Task, TaskId, TaskStorage, TaskStore, copy};

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print every task in order
    List,
    /// Add a task; words are joined with spaces
    Add {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Replace the text of a task
    Edit {
        id: TaskId,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Flip a task between done and not done
    Toggle { id: TaskId },
    /// Remove a task
    Delete { id: TaskId },
    /// Copy the text of a task to the system clipboard
    Copy { id: TaskId },
    /// Menu-driven session in the terminal
    Interactive,
    /// Full-screen view (default)
    Tui,
}

pub async fn run_command<S, W>(
    store: &mut TaskStore<S>,
    clipboard: Arc<dyn Clipboard>,
    command: Command,
    out: &mut W,
) -> Result<()>
where
    S: TaskStorage,
    W: Write,
{
    match command {
        Command::List => print_tasks(store.tasks(), out)?,
        Command::Add { text } => match store.add(&text.join(" ")) {
            Some(id) => writeln!(out, "Added task {id}")?,
            None => writeln!(out, "Nothing to add")?,
        },
        Command::Edit { id, text } => {
            let Some(task) = store.get(id) else {
                return no_such_task(id, out);
            };
            let mut session = EditSession::new();
            session.begin_edit(task);
            session.update_draft_text(text.join(" "));
            match session.commit(store) {
                Some(id) => writeln!(out, "Updated task {id}")?,
                None => writeln!(out, "Task {id} unchanged")?,
            }
        }
        Command::Toggle { id } => {
            if !store.toggle_completed(id) {
                return no_such_task(id, out);
            }
            let done = store.get(id).is_some_and(|task| task.completed);
            let state = if done { "done" } else { "not done" };
            writeln!(out, "Task {id} marked {state}")?;
        }
        Command::Delete { id } => {
            if !store.delete(id) {
                return no_such_task(id, out);
            }
            writeln!(out, "Deleted task {id}")?;
        }
        Command::Copy { id } => {
            let Some(task) = store.get(id) else {
                return no_such_task(id, out);
            };
            let outcome = copy(clipboard, task.text.clone()).await;
            match outcome.notice() {
                Some(notice) => writeln!(out, "{notice}")?,
                None => writeln!(out, "Could not copy task {id} to the clipboard")?,
            }
        }
        Command::Interactive | Command::Tui => {
            bail!("interactive and tui are not one-shot commands")
        }
    }

    if let Some(warning) = store.save_warning() {
        writeln!(out, "Warning: {warning}")?;
    }
    Ok(())
}

pub(crate) fn task_line(task: &Task) -> String {
    let mark = if task.completed { "x" } else { " " };
    format!("[{mark}] {}  {}", task.id, task.text)
}

fn print_tasks<W: Write>(tasks: &[Task], out: &mut W) -> Result<()> {
    if tasks.is_empty() {
        writeln!(out, "No tasks yet")?;
        return Ok(());
    }
    for task in tasks {
        writeln!(out, "{}", task_line(task))?;
    }
    let done = tasks.iter().filter(|task| task.completed).count();
    writeln!(out, "{done}/{} done", tasks.len())?;
    Ok(())
}

fn no_such_task<W: Write>(id: TaskId, out: &mut W) -> Result<()> {
    writeln!(out, "No task with id {id}")?;
    Ok(())
}
