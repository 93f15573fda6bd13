//! Main chat loop orchestration.
//!
//! Coordinates the interactive session: optional trip resolution, welcome
//! banner, input loop with the searching spinner, reply rendering, and the
//! trip-switching slash commands.

use console::style;
use tracing::debug;

use travelpilot_core::chat::controller::TurnOutcome;
use travelpilot_core::chat::history::TurnRecord;
use travelpilot_types::chat::{Message, MessageRole, SessionId};
use travelpilot_types::error::ValidationError;

use crate::cli::{resolve_trip, short_id, TripRef};
use crate::state::AppState;

use super::banner::{print_empty_state, print_welcome_banner};
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::ChatRenderer;
use super::spinner::searching_spinner;

/// Run the interactive chat loop, optionally continuing a saved trip.
pub async fn run_chat_loop(state: &AppState, trip: Option<&str>) -> anyhow::Result<()> {
    let chat = &state.chat;

    if let Some(trip) = trip {
        let id = resolve_trip(&chat.trips(), trip)?;
        chat.open_trip(&id)?;
    }

    let active_title = chat
        .conversation()
        .session_id
        .and_then(|id| chat.trip(&id))
        .map(|session| session.title);
    print_welcome_banner(
        &state.config.api_url,
        chat.trips().len(),
        &state.data_dir,
        active_title.as_deref(),
    );

    let renderer = ChatRenderer::new();
    print_conversation(&renderer, &chat.conversation().messages);

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        let text = match chat_input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            InputEvent::Message(text) => text,
        };

        if text.is_empty() {
            continue;
        }

        if let Some(cmd) = commands::parse(&text) {
            match cmd {
                ChatCommand::Help => commands::print_help(),
                ChatCommand::Clear => chat_input.clear(),
                ChatCommand::Exit => {
                    println!("\n  {}", style("Session ended.").dim());
                    break;
                }
                ChatCommand::New => {
                    chat.new_trip();
                    println!("\n  {} Started a new trip.\n", style("+").green().bold());
                    print_empty_state();
                }
                ChatCommand::Trips => print_trip_list(state),
                ChatCommand::Open(trip) => open_trip(state, &renderer, &trip),
                ChatCommand::Delete(trip) => delete_trip(state, &trip).await,
                ChatCommand::History => {
                    println!();
                    print_conversation(&renderer, &chat.conversation().messages);
                }
                ChatCommand::Unknown(message) => {
                    println!(
                        "\n  {} {}. Type /help for available commands.\n",
                        style("?").yellow().bold(),
                        style(message).dim()
                    );
                }
            }
            continue;
        }

        let spinner = searching_spinner();
        let outcome = chat.send_message(&text).await;
        spinner.finish_and_clear();

        match outcome {
            Ok(TurnOutcome::Reconciled { session_id, record }) => {
                if let Some(reply) = last_reply(state) {
                    print_assistant(&renderer, &reply);
                }
                if record == TurnRecord::Created {
                    println!(
                        "  {} Saved as a new trip ({})\n",
                        style("*").cyan().bold(),
                        style(short_id(&session_id)).dim()
                    );
                }
            }
            Ok(TurnOutcome::Failed) => {
                if let Some(reply) = last_reply(state) {
                    println!("\n  {}\n", renderer.render_error(&reply));
                }
            }
            Ok(TurnOutcome::Discarded { session_id }) => {
                debug!(session_id = %session_id, "Reply arrived for a deleted trip");
                println!(
                    "\n  {}\n",
                    style("That trip was deleted before the reply arrived.").dim()
                );
            }
            Err(ValidationError::SubmissionInFlight) => {
                println!(
                    "\n  {}\n",
                    style("Still waiting on the previous reply.").dim()
                );
            }
            Err(err) => {
                println!("\n  {} {err}\n", style("!").yellow().bold());
            }
        }
    }

    Ok(())
}

fn last_reply(state: &AppState) -> Option<String> {
    state
        .chat
        .conversation()
        .messages
        .pop()
        .filter(|m| m.role == MessageRole::Assistant)
        .map(|m| m.content)
}

fn print_assistant(renderer: &ChatRenderer, content: &str) {
    println!("\n  {}", style("TravelPilot").cyan().bold());
    println!("{}", renderer.render(content).trim_end());
    println!();
}

fn print_conversation(renderer: &ChatRenderer, messages: &[Message]) {
    if messages.is_empty() {
        print_empty_state();
        return;
    }
    for msg in messages {
        match msg.role {
            MessageRole::User => {
                println!("  {} {}", style("You >").green().bold(), msg.content);
            }
            MessageRole::Assistant => print_assistant(renderer, &msg.content),
        }
    }
}

fn print_trip_list(state: &AppState) {
    let trips = state.chat.trips();
    if trips.is_empty() {
        println!("\n  {}\n", style("No saved trips yet.").dim());
        return;
    }

    let active = state.chat.conversation().session_id;
    println!();
    for (index, trip) in trips.iter().enumerate() {
        let marker = if active.as_ref() == Some(&trip.id) {
            style("●").green()
        } else {
            style(" ").dim()
        };
        println!(
            "  {} {}  {}  {}",
            marker,
            style(format!("#{}", index + 1)).dim(),
            style(&trip.title).cyan(),
            style(short_id(&trip.id)).dim()
        );
    }
    println!();
}

fn open_trip(state: &AppState, renderer: &ChatRenderer, trip: &TripRef) {
    let Some(id) = trip.resolve(&state.chat.trips()) else {
        println!("\n  {} Trip not found. Type /trips to list saved trips.\n", style("?").yellow().bold());
        return;
    };

    match state.chat.open_trip(&id) {
        Ok(()) => {
            let title = trip_title(state, &id);
            println!("\n  {} Opened '{}'\n", style(">").cyan().bold(), style(title).cyan());
            print_conversation(renderer, &state.chat.conversation().messages);
        }
        Err(err) => println!("\n  {} {err}\n", style("!").yellow().bold()),
    }
}

async fn delete_trip(state: &AppState, trip: &TripRef) {
    let Some(id) = trip.resolve(&state.chat.trips()) else {
        println!("\n  {} Trip not found. Type /trips to list saved trips.\n", style("?").yellow().bold());
        return;
    };

    let title = trip_title(state, &id);
    if state.chat.delete_trip(&id).await {
        println!("\n  {} Trip '{}' deleted.\n", style("x").red().bold(), title);
    }
}

fn trip_title(state: &AppState, id: &SessionId) -> String {
    state
        .chat
        .trip(id)
        .map(|t| t.title)
        .unwrap_or_else(|| id.to_string())
}
