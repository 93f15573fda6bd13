//! Slash command parsing and help for the chat loop.
//!
//! Commands start with `/` and switch, list, or delete trips without
//! leaving the chat.

use console::style;

use crate::cli::TripRef;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Start a new, unsaved conversation.
    New,
    /// List saved trips.
    Trips,
    /// Make a saved trip the active conversation.
    Open(TripRef),
    /// Delete a saved trip.
    Delete(TripRef),
    /// Reprint the active conversation.
    History,
    /// Clear the terminal screen.
    Clear,
    /// Exit the chat session.
    Exit,
    /// Unknown command or bad arguments (carries the message to show).
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let (cmd, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((cmd, arg)) => (cmd.to_lowercase(), arg.trim()),
        None => (trimmed.to_lowercase(), ""),
    };

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/new" => Some(ChatCommand::New),
        "/trips" | "/ls" => Some(ChatCommand::Trips),
        "/open" | "/o" => Some(match TripRef::parse(arg) {
            Some(trip) => ChatCommand::Open(trip),
            None => ChatCommand::Unknown("/open requires a trip id or #N".to_string()),
        }),
        "/delete" | "/rm" => Some(match TripRef::parse(arg) {
            Some(trip) => ChatCommand::Delete(trip),
            None => ChatCommand::Unknown("/delete requires a trip id or #N".to_string()),
        }),
        "/history" => Some(ChatCommand::History),
        "/clear" | "/cls" => Some(ChatCommand::Clear),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        other => Some(ChatCommand::Unknown(format!("Unknown command: {other}"))),
    }
}

/// Print the help text listing all available commands.
pub fn print_help() {
    let rows = [
        ("/help", "Show this help message"),
        ("/new", "Start a new trip"),
        ("/trips", "List saved trips"),
        ("/open <id|#N>", "Continue a saved trip"),
        ("/delete <id|#N>", "Delete a saved trip"),
        ("/history", "Show this trip's conversation"),
        ("/clear", "Clear the screen"),
        ("/exit", "End the chat session"),
    ];

    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    for (cmd, help) in rows {
        println!("  {:<18}{}", style(cmd).cyan(), help);
    }
    println!();
    println!(
        "  {}",
        style("Ctrl+D to exit. Trips are saved after every reply.").dim()
    );
    println!();
}
