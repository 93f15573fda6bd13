//! Trip management CLI commands: list, show, delete.
//!
//! Provides trip browsing with rich tables, Markdown/JSON transcripts,
//! and deletion with confirmation prompt.

use anyhow::Result;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;
use dialoguer::Confirm;
use travelpilot_types::chat::{ChatSession, MessageRole};

use crate::state::AppState;

use super::{resolve_trip, short_id};

/// List saved trips, most recently active first.
///
/// # Examples
///
/// ```bash
/// tpilot trips list
/// tpilot trips list --json
/// ```
pub fn list_trips(state: &AppState, json: bool) -> Result<()> {
    let trips = state.chat.trips();

    if json {
        println!("{}", serde_json::to_string_pretty(&trips)?);
        return Ok(());
    }

    if trips.is_empty() {
        println!();
        println!(
            "  {} No trips yet. Start one with: {}",
            style("i").blue().bold(),
            style("tpilot chat").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("#").fg(Color::White),
        Cell::new("Title").fg(Color::White),
        Cell::new("ID").fg(Color::White),
        Cell::new("Messages").fg(Color::White),
        Cell::new("Created").fg(Color::White),
    ]);

    for (index, trip) in trips.iter().enumerate() {
        table.add_row(vec![
            Cell::new(format!("#{}", index + 1)).fg(Color::DarkGrey),
            Cell::new(&trip.title).fg(Color::Cyan),
            Cell::new(short_id(&trip.id)).fg(Color::DarkGrey),
            Cell::new(trip.messages.len().to_string()).fg(Color::White),
            Cell::new(format_created(trip)).fg(Color::White),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} trip{}",
        style(trips.len()).bold(),
        if trips.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

/// Print a trip as Markdown (default) or JSON.
///
/// # Examples
///
/// ```bash
/// tpilot trips show #1
/// tpilot trips show abc123 --json
/// ```
pub fn show_trip(state: &AppState, trip: &str, json: bool) -> Result<()> {
    let id = resolve_trip(&state.chat.trips(), trip)?;
    let Some(session) = state.chat.trip(&id) else {
        anyhow::bail!("Trip '{trip}' not found");
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&session)?);
        return Ok(());
    }

    print!("{}", transcript_markdown(&session));
    Ok(())
}

/// Delete a trip with confirmation.
///
/// # Examples
///
/// ```bash
/// tpilot trips delete #2
/// tpilot trips delete abc123 --force
/// ```
pub async fn delete_trip(state: &AppState, trip: &str, force: bool, json: bool) -> Result<()> {
    let id = resolve_trip(&state.chat.trips(), trip)?;
    let Some(session) = state.chat.trip(&id) else {
        anyhow::bail!("Trip '{trip}' not found");
    };

    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete trip '{}' ({} messages)?",
                style(&session.title).red().bold(),
                session.messages.len()
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    let deleted = state.chat.delete_trip(&id).await;

    if json {
        println!(
            "{}",
            serde_json::json!({"deleted": deleted, "session_id": id.to_string()})
        );
    } else {
        println!(
            "  {} Trip '{}' deleted.",
            style("x").red().bold(),
            session.title
        );
    }

    Ok(())
}

// --- Formatting helpers ---

fn format_created(trip: &ChatSession) -> String {
    trip.created_at
        .with_timezone(&chrono::Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

/// Render a trip as a Markdown document.
pub fn transcript_markdown(session: &ChatSession) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {}\n\n", session.title));
    out.push_str(&format!(
        "- **Created:** {}\n",
        session.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    out.push_str(&format!("- **Trip ID:** {}\n", session.id));
    out.push_str(&format!("- **Messages:** {}\n\n---\n\n", session.messages.len()));

    for msg in &session.messages {
        let label = match msg.role {
            MessageRole::User => "**You**",
            MessageRole::Assistant => "**TravelPilot**",
        };
        out.push_str(&format!("### {label}\n\n{}\n\n", msg.content));
    }
    out
}
