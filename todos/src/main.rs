//! Command-line demo for the todo store.
//!
//! Loads the todos from the configured service, creates one, toggles it,
//! deletes it and prints the state after each step.
//!
//! ```text
//! TODO_SERVICE_URL=memory cargo run -p todos
//! RUST_LOG=todos=trace cargo run -p todos
//! ```

use anyhow::Context;
use todos::{actions, loader, thunks, visible_todos, TodoConfig, TodoEnvironment, TodoState, TodoStore};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("todos=debug,todo_store_runtime=info")),
        )
        .init();

    println!("=== Todo Store ===\n");

    let config = TodoConfig::from_env().context("invalid configuration")?;
    let service = config.build_service().context("could not build todo service")?;
    let store = todos::new_store(TodoEnvironment::new(service));

    run(&store, "Fetching todos", thunks::fetch_todos()).await?;

    store.send(actions::update_current("write the DEMO")).await?;
    let name = store.state(|s| s.current_todo.clone()).await;
    run(&store, &format!("Saving {name:?}"), thunks::save_todo(name)).await?;

    let created = store.state(|s| s.todos.last().map(|todo| todo.id.clone())).await;
    if let Some(id) = created {
        run(&store, &format!("Toggling todo {id}"), thunks::toggle_todo(id.clone())).await?;

        let state = store.state(Clone::clone).await;
        println!("Completed:");
        for todo in visible_todos(&state.todos, Some("completed")) {
            println!("  [x] {}", todo.name);
        }
        println!();

        run(&store, &format!("Deleting todo {id}"), thunks::delete_todo(id)).await?;
    }

    store.shutdown_default().await.context("store did not shut down cleanly")?;
    println!("Done.");

    Ok(())
}

/// Dispatch a thunk, wait for it to finish and print the resulting state
async fn run(store: &TodoStore, label: &str, thunk: todos::TodoAction) -> anyhow::Result<()> {
    println!("{label}...");
    let mut handle = store.send(thunk).await?;

    if let Some(indicator) = store.state(|s| loader::render(s.is_loading)).await {
        println!("  ({indicator})");
    }
    handle.wait().await;

    let state = store.state(Clone::clone).await;
    print_state(&state);

    if !state.message.is_empty() {
        store.send(actions::clear_message()).await?;
    }
    Ok(())
}

fn print_state(state: &TodoState) {
    if !state.message.is_empty() {
        println!("  error: {}", state.message);
    }
    println!("  {}/{} completed", state.completed_count(), state.count());
    for todo in &state.todos {
        let status = if todo.is_complete { "x" } else { " " };
        println!("  [{status}] {} {}", todo.id, todo.name);
    }
    println!();
}
