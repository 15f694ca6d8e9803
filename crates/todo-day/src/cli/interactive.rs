/*
[INPUT]:  The task store, a clipboard and user input via dialoguer prompts
[OUTPUT]: Menu-driven task management until the user exits
[POS]:    CLI interactive flow
[UPDATE]: When adding menu actions
*/

use std::sync::Arc;

use anyhow::Result;
use console::style;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};

use todo_day_core::{Clipboard, EditSession, Task, TaskId, TaskStorage, TaskStore, copy};

use super::task_line;

const ACTIONS: [&str; 7] = [
    "List tasks",
    "Add task",
    "Edit task",
    "Toggle task",
    "Delete task",
    "Copy task",
    "Exit",
];

pub async fn run_interactive<S: TaskStorage>(
    mut store: TaskStore<S>,
    clipboard: Arc<dyn Clipboard>,
) -> Result<()> {
    let theme = ColorfulTheme::default();
    println!("{}", style("Today's tasks").bold().cyan());
    print_tasks(&store);

    loop {
        let selection = Select::with_theme(&theme)
            .with_prompt("Select action")
            .items(&ACTIONS)
            .default(0)
            .interact()?;

        match selection {
            0 => print_tasks(&store),
            1 => add_task(&mut store, &theme)?,
            2 => edit_task(&mut store, &theme)?,
            3 => toggle_task(&mut store, &theme)?,
            4 => delete_task(&mut store, &theme)?,
            5 => copy_task(&store, clipboard.clone(), &theme).await?,
            _ => break,
        }

        if let Some(warning) = store.save_warning() {
            println!("{}", style(format!("Warning: {warning}")).red());
        }
    }

    if store.save_warning().is_some() {
        let retry = Confirm::with_theme(&theme)
            .with_prompt("Some changes were not saved. Try saving again?")
            .default(true)
            .interact()?;
        if retry {
            store.flush()?;
            println!("{}", style("Saved.").green());
        }
    }
    Ok(())
}

fn print_tasks<S: TaskStorage>(store: &TaskStore<S>) {
    if store.is_empty() {
        println!("{}", style("No tasks yet.").yellow());
        return;
    }
    for task in store.tasks() {
        let line = task_line(task);
        if task.completed {
            println!("{}", style(line).dim().strikethrough());
        } else {
            println!("{line}");
        }
    }
    println!(
        "{}",
        style(format!("{}/{} done", store.completed_count(), store.len())).dim()
    );
}

fn select_task<S: TaskStorage>(
    store: &TaskStore<S>,
    theme: &ColorfulTheme,
    prompt: &str,
) -> Result<Option<TaskId>> {
    if store.is_empty() {
        println!("{}", style("No tasks yet.").yellow());
        return Ok(None);
    }

    let items: Vec<String> = store.tasks().iter().map(task_line).collect();
    let selection = Select::with_theme(theme)
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact()?;

    Ok(store.tasks().get(selection).map(|task| task.id))
}

fn add_task<S: TaskStorage>(store: &mut TaskStore<S>, theme: &ColorfulTheme) -> Result<()> {
    let text: String = Input::with_theme(theme)
        .with_prompt("New task")
        .allow_empty(true)
        .interact_text()?;

    match store.add(&text) {
        Some(id) => println!("{}", style(format!("Added task {id}")).green()),
        None => println!("{}", style("Nothing to add.").yellow()),
    }
    Ok(())
}

fn edit_task<S: TaskStorage>(store: &mut TaskStore<S>, theme: &ColorfulTheme) -> Result<()> {
    let Some(id) = select_task(store, theme, "Task to edit")? else {
        return Ok(());
    };
    let Some(task) = store.get(id) else {
        return Ok(());
    };

    let mut session = EditSession::new();
    session.begin_edit(task);
    let text: String = Input::with_theme(theme)
        .with_prompt("Text")
        .with_initial_text(task.text.clone())
        .allow_empty(true)
        .interact_text()?;
    session.update_draft_text(text);

    match session.commit(store) {
        Some(id) => println!("{}", style(format!("Updated task {id}")).green()),
        None => println!("{}", style(format!("Task {id} unchanged.")).yellow()),
    }
    Ok(())
}

fn toggle_task<S: TaskStorage>(store: &mut TaskStore<S>, theme: &ColorfulTheme) -> Result<()> {
    if let Some(id) = select_task(store, theme, "Task to toggle")? {
        store.toggle_completed(id);
        if let Some(task) = store.get(id) {
            println!("{}", task_line(task));
        }
    }
    Ok(())
}

fn delete_task<S: TaskStorage>(store: &mut TaskStore<S>, theme: &ColorfulTheme) -> Result<()> {
    let Some(id) = select_task(store, theme, "Task to delete")? else {
        return Ok(());
    };
    let text = store.get(id).map(|task| task.text.clone()).unwrap_or_default();

    let confirmed = Confirm::with_theme(theme)
        .with_prompt(format!("Delete \"{text}\"?"))
        .default(false)
        .interact()?;
    if confirmed && store.delete(id) {
        println!("{}", style(format!("Deleted task {id}")).green());
    }
    Ok(())
}

async fn copy_task<S: TaskStorage>(
    store: &TaskStore<S>,
    clipboard: Arc<dyn Clipboard>,
    theme: &ColorfulTheme,
) -> Result<()> {
    let Some(id) = select_task(store, theme, "Task to copy")? else {
        return Ok(());
    };
    let Some(Task { text, .. }) = store.get(id) else {
        return Ok(());
    };

    let outcome = copy(clipboard, text.clone()).await;
    match outcome.notice() {
        Some(notice) => println!("{}", style(notice).green()),
        None => println!("{}", style("Could not copy to the clipboard.").red()),
    }
    Ok(())
}
