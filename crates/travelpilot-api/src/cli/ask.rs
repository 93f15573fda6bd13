//! One-shot `tpilot ask`: send a single message and print the reply.

use anyhow::{Context, Result};
use console::style;
use travelpilot_core::chat::controller::TurnOutcome;
use travelpilot_types::chat::MessageRole;

use crate::state::AppState;

use super::chat::renderer::ChatRenderer;
use super::chat::spinner::searching_spinner;
use super::resolve_trip;

/// Send `message` as one turn, optionally continuing a saved trip.
///
/// The trip history is updated exactly as in the interactive chat. A failed
/// request still prints the fallback reply but exits with an error.
///
/// # Examples
///
/// ```bash
/// tpilot ask "Villas in Bali"
/// tpilot ask "under $200" --trip #1
/// ```
pub async fn ask(
    state: &AppState,
    message: &str,
    trip: Option<&str>,
    json: bool,
    quiet: bool,
) -> Result<()> {
    if let Some(trip) = trip {
        let id = resolve_trip(&state.chat.trips(), trip)?;
        state.chat.open_trip(&id)?;
    }

    let spinner = (!json && !quiet).then(searching_spinner);
    let outcome = state.chat.send_message(message).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let outcome = outcome.context("Message not sent")?;

    let conversation = state.chat.conversation();
    let reply = conversation
        .messages
        .last()
        .filter(|m| m.role == MessageRole::Assistant)
        .map(|m| m.content.clone())
        .unwrap_or_default();

    if json {
        let session_id = match &outcome {
            TurnOutcome::Reconciled { session_id, .. } | TurnOutcome::Discarded { session_id } => {
                Some(session_id.to_string())
            }
            TurnOutcome::Failed => conversation.session_id.as_ref().map(|id| id.to_string()),
        };
        println!(
            "{}",
            serde_json::json!({
                "response": reply,
                "session_id": session_id,
                "ok": !matches!(outcome, TurnOutcome::Failed),
            })
        );
    } else {
        let renderer = ChatRenderer::new();
        println!();
        println!("{}", renderer.render(&reply).trim_end());
        println!();
        if let TurnOutcome::Reconciled { session_id, .. } = &outcome {
            if !quiet {
                println!(
                    "  {} {}",
                    style("Trip:").bold(),
                    style(session_id).dim()
                );
                println!();
            }
        }
    }

    if outcome == TurnOutcome::Failed {
        anyhow::bail!("The assistant at {} could not answer", state.config.api_url);
    }
    Ok(())
}
