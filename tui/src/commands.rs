//! One-shot subcommands. Each maps onto one or two API round-trips and prints
//! the result to stdout.

use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use tasklist_core::{FormPayload, Todo, TodoClient, TodoForm, UpdateTodo};
use tracing::info;

use crate::cli::Command;
use crate::transport::Transport;

pub fn run(command: Command, client: &TodoClient, transport: &Transport) -> Result<()> {
    let mut out = io::stdout().lock();
    match command {
        Command::Health => {
            let response = transport.execute(client.build_health())?;
            let health = client.parse_health(response).context("health check failed")?;
            writeln!(out, "{}", serde_json::to_string_pretty(&health)?)?;
        }
        Command::Welcome => {
            let response = transport.execute(client.build_welcome())?;
            let welcome = client.parse_welcome(response).context("failed to fetch welcome message")?;
            writeln!(out, "{}", serde_json::to_string_pretty(&welcome)?)?;
        }
        Command::List { completed, pending } => {
            let req = if completed {
                client.build_completed_todos()
            } else if pending {
                client.build_pending_todos()
            } else {
                client.build_list_todos()
            };
            let todos = client
                .parse_list_todos(transport.execute(req)?)
                .context("failed to load todos")?;
            write_todos(&mut out, &todos)?;
        }
        Command::Get { id } => {
            let todo = client
                .parse_get_todo(transport.execute(client.build_get_todo(id))?)
                .with_context(|| format!("failed to load todo {id}"))?;
            write_todo(&mut out, &todo)?;
        }
        Command::Add { title, description } => {
            let input = match create_payload(title, description)? {
                FormPayload::Create(input) => input,
                FormPayload::Update(_) => bail!("a new todo produced an update payload"),
            };
            let req = client.build_create_todo(&input)?;
            let todo = client
                .parse_create_todo(transport.execute(req)?)
                .context("failed to save todo")?;
            info!(id = todo.id, "created todo");
            write_todo(&mut out, &todo)?;
        }
        Command::Done { id } => {
            let todo = client
                .parse_get_todo(transport.execute(client.build_get_todo(id))?)
                .with_context(|| format!("failed to load todo {id}"))?;
            let req = client.build_update_todo(id, &UpdateTodo::toggled(&todo))?;
            let todo = client
                .parse_update_todo(transport.execute(req)?)
                .context("failed to update todo")?;
            let state = if todo.completed { "completed" } else { "pending" };
            writeln!(out, "Todo marked as {state}!")?;
            write_todo(&mut out, &todo)?;
        }
        Command::Delete { id } => {
            client
                .parse_delete_todo(transport.execute(client.build_delete_todo(id))?)
                .with_context(|| format!("failed to delete todo {id}"))?;
            writeln!(out, "Todo deleted successfully!")?;
        }
        Command::Clear { yes } => {
            if !yes {
                bail!("refusing to delete every todo without --yes");
            }
            client
                .parse_delete_all_todos(transport.execute(client.build_delete_all_todos())?)
                .context("failed to delete todos")?;
            writeln!(out, "All todos deleted")?;
        }
        Command::Search { keyword } => {
            let todos = client
                .parse_search_todos(transport.execute(client.build_search_todos(&keyword))?)
                .context("failed to search todos")?;
            write_todos(&mut out, &todos)?;
        }
    }
    Ok(())
}

/// Validate the same way the interactive form does.
fn create_payload(title: String, description: String) -> Result<FormPayload> {
    let mut form = TodoForm::for_create();
    form.title = title;
    form.description = description;
    Ok(form.submit()?)
}

fn write_todos(out: &mut impl Write, todos: &[Todo]) -> io::Result<()> {
    if todos.is_empty() {
        return writeln!(out, "No todos found");
    }
    for todo in todos {
        write_todo(out, todo)?;
    }
    Ok(())
}

fn write_todo(out: &mut impl Write, todo: &Todo) -> io::Result<()> {
    let mark = if todo.completed { "x" } else { " " };
    writeln!(out, "[{mark}] #{} {}", todo.id, todo.title)?;
    if !todo.description.is_empty() {
        writeln!(out, "      {}", todo.description)?;
    }
    Ok(())
}
