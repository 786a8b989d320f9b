//! Webhook subcommand handlers for access-webhooks.

use std::error::Error;
use std::io::{self, BufRead, Write};

use tracing::warn;

use access_webhooks_core::{Confirmation, DeleteOutcome, DisplayRow, FormSession, WebhookManager};
use access_webhooks_protocols::{EventType, FormError, RegistryError};

use crate::cli::{Commands, OutputFormat};

/// Handle the subcommands that talk to the registry.
pub(crate) async fn handle_webhook_command(
    command: Commands,
    manager: &mut WebhookManager,
) -> Result<(), Box<dyn Error>> {
    match command {
        Commands::List { format } => webhook_list(manager, format).await,
        Commands::Events => {
            print_events();
            Ok(())
        }
        Commands::Add { name, endpoint, events } => {
            webhook_add(manager, name, endpoint, &events).await
        }
        Commands::Edit { id, name, endpoint, events, remove_events } => {
            webhook_edit(manager, &id, name, endpoint, &events, &remove_events).await
        }
        Commands::Delete { id, yes } => webhook_delete(manager, &id, yes).await,
    }
}

/// Print the selectable catalog.
pub(crate) fn print_events() {
    println!("{:<30} {}", "EVENT", "DESCRIPTION");
    println!("{}", "-".repeat(60));
    for event in EventType::catalog() {
        println!("{:<30} {}", event.as_str(), event.description());
    }
}

async fn webhook_list(
    manager: &mut WebhookManager,
    format: OutputFormat,
) -> Result<(), Box<dyn Error>> {
    let snapshot = manager.refresh().await?;
    let rows = snapshot.rows();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Table if rows.is_empty() => println!("No webhooks found."),
        OutputFormat::Table => {
            print!("{}", render_table(&rows));
            if let Some(fetched_at) = snapshot.fetched_at() {
                println!(
                    "\n{} webhook(s), listed at {}",
                    snapshot.len(),
                    fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
                );
            }
        }
    }

    Ok(())
}

async fn webhook_add(
    manager: &mut WebhookManager,
    name: String,
    endpoint: String,
    events: &[String],
) -> Result<(), Box<dyn Error>> {
    let mut form = manager.open_create();
    form.set_name(name);
    form.set_endpoint(endpoint);
    select_events(&mut form, events)?;

    let saved = manager.save(&form).await?;
    println!("Webhook added successfully.");
    println!("ID: {}", saved.id);
    Ok(())
}

async fn webhook_edit(
    manager: &mut WebhookManager,
    id: &str,
    name: Option<String>,
    endpoint: Option<String>,
    events: &[String],
    remove_events: &[String],
) -> Result<(), Box<dyn Error>> {
    manager.refresh().await?;
    let mut form = manager.open_edit(id)?;

    if name.is_none() && endpoint.is_none() && events.is_empty() && remove_events.is_empty() {
        form.cancel();
        println!("Nothing to change.");
        return Ok(());
    }

    if let Some(name) = name {
        form.set_name(name);
    }
    if let Some(endpoint) = endpoint {
        form.set_endpoint(endpoint);
    }
    for event in remove_events {
        if !form.deselect_event(&EventType::from(event.as_str())) {
            eprintln!("Warning: {} was not selected", event);
        }
    }
    select_events(&mut form, events)?;

    for option in form.options().iter().filter(|o| o.selected && !o.selectable) {
        println!("Keeping event {} (not offered by this client)", option.event);
    }

    manager.save(&form).await?;
    println!("Webhook updated successfully.");
    Ok(())
}

async fn webhook_delete(
    manager: &mut WebhookManager,
    id: &str,
    yes: bool,
) -> Result<(), Box<dyn Error>> {
    if !yes {
        refresh_for_prompt(manager).await;
    }

    let outcome = if yes {
        manager.delete(id, &|_: &str| true).await?
    } else {
        manager.delete(id, &StdinConfirmation).await?
    };

    match outcome {
        DeleteOutcome::Deleted => println!("Webhook deleted successfully."),
        DeleteOutcome::Cancelled => println!("Cancelled."),
    }
    Ok(())
}

/// Refresh so the delete prompt can name the record. A failure only costs
/// the name, so it is logged and the delete goes ahead.
async fn refresh_for_prompt(manager: &mut WebhookManager) -> bool {
    match manager.refresh().await {
        Ok(_) => true,
        Err(e) => {
            warn!("Could not refresh the webhook list before deleting: {}", e);
            false
        }
    }
}

fn select_events(form: &mut FormSession, events: &[String]) -> Result<(), FormError> {
    for event in events {
        form.select_event(EventType::from(event.as_str()))?;
    }
    Ok(())
}

/// Render rows as a left-aligned table sized to its widest cells.
pub(crate) fn render_table(rows: &[DisplayRow]) -> String {
    let headers = ["ID", "NAME", "ENDPOINT", "EVENTS"];
    let mut widths = headers.map(str::len);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(cells(row)) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &headers, &widths);
    let total = widths.iter().sum::<usize>() + widths.len() - 1;
    out.push_str(&"-".repeat(total));
    out.push('\n');
    for row in rows {
        push_line(&mut out, &cells(row), &widths);
    }
    out
}

fn cells(row: &DisplayRow) -> [&str; 4] {
    [&row.id, &row.name, &row.endpoint, &row.events]
}

fn push_line(out: &mut String, values: &[&str; 4], widths: &[usize; 4]) {
    let line = values
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join(" ");
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Whether an error means the local view is stale.
pub(crate) fn suggests_refresh(err: &(dyn Error + 'static)) -> bool {
    if let Some(e) = err.downcast_ref::<RegistryError>() {
        return e.suggests_refresh();
    }
    if let Some(e) = err.downcast_ref::<FormError>() {
        return e.registry_error().is_some_and(RegistryError::suggests_refresh);
    }
    false
}

/// Yes/no prompt on the terminal. Anything but "y" or "yes" declines.
struct StdinConfirmation;

impl Confirmation for StdinConfirmation {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{} [y/N] ", prompt);
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(_) => false,
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
