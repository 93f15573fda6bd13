//! Welcome banner and empty-state display for chat sessions.

use std::path::Path;

use console::style;

/// Example prompts offered on an empty conversation.
pub const EXAMPLE_PROMPTS: [&str; 2] = ["Villas in Bali", "Apartments in New York under $200"];

/// Print the welcome banner at the start of a chat session.
///
/// Shows the assistant endpoint, how many trips are saved (and where), and
/// the trip being continued, if any.
pub fn print_welcome_banner(
    api_url: &str,
    trip_count: usize,
    data_dir: &Path,
    active_title: Option<&str>,
) {
    println!();
    println!(
        "  {} {}",
        style("✈").cyan(),
        style("TravelPilot").cyan().bold()
    );
    println!(
        "  {}",
        style("Your AI travel assistant for Airbnb stays").dim()
    );
    println!();
    println!(
        "  {}  {}",
        style("Assistant:").bold(),
        style(api_url).dim()
    );
    println!(
        "  {}  {}",
        style("Saved trips:").bold(),
        style(format!("{trip_count} ({})", data_dir.display())).dim()
    );
    if let Some(title) = active_title {
        println!(
            "  {}  {}",
            style("Continuing:").bold(),
            style(title).cyan()
        );
    }
    println!();
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+D to exit").dim()
    );
    println!(
        "  {}",
        style("---").dim()
    );
    println!();
}

/// Print the hint shown when the conversation has no messages yet.
pub fn print_empty_state() {
    println!("  {}", style("Where to next?").bold());
    println!(
        "  {}",
        style("Search for Airbnb stays anywhere in the world. Try:").dim()
    );
    for prompt in EXAMPLE_PROMPTS {
        println!("    {} {}", style("›").cyan(), style(prompt).italic());
    }
    println!();
}
