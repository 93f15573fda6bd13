//! TravelPilot terminal client entry point.
//!
//! Binary name: `tpilot`
//!
//! Parses CLI arguments, loads config and trip history, then dispatches to
//! the appropriate command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, TripsCommand};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity; RUST_LOG wins when set
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,travelpilot=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "tpilot", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init().await?;

    match cli.command {
        Commands::Chat { trip } => {
            cli::chat::loop_runner::run_chat_loop(&state, trip.as_deref()).await?;
        }

        Commands::Ask { message, trip } => {
            cli::ask::ask(&state, &message, trip.as_deref(), cli.json, cli.quiet).await?;
        }

        Commands::Trips { action } => match action {
            TripsCommand::List => {
                cli::trips::list_trips(&state, cli.json)?;
            }
            TripsCommand::Show { trip } => {
                cli::trips::show_trip(&state, &trip, cli.json)?;
            }
            TripsCommand::Delete { trip, force } => {
                cli::trips::delete_trip(&state, &trip, force, cli.json).await?;
            }
        },

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    state.chat.shutdown().await;
    Ok(())
}
