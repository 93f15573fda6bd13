//! CLI command definitions for the `tpilot` binary.
//!
//! Uses clap derive macros for argument parsing. Trip management follows a
//! noun-verb pattern (e.g., `tpilot trips list`, `tpilot trips delete #2`).

pub mod ask;
pub mod chat;
pub mod trips;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use travelpilot_core::chat::history::SessionList;
use travelpilot_types::chat::SessionId;

/// Plan stays with the TravelPilot assistant from your terminal.
#[derive(Parser)]
#[command(name = "tpilot", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat with the assistant.
    Chat {
        /// Continue a saved trip (id, id prefix, or #N from `trips list`).
        #[arg(long, short)]
        trip: Option<String>,
    },

    /// Send a single message and print the reply.
    Ask {
        /// The message to send.
        message: String,

        /// Continue a saved trip instead of starting a new one.
        #[arg(long, short)]
        trip: Option<String>,
    },

    /// Manage saved trips (list, show, delete).
    Trips {
        #[command(subcommand)]
        action: TripsCommand,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum TripsCommand {
    /// List saved trips, most recent first.
    #[command(alias = "ls")]
    List,

    /// Print a trip's transcript.
    Show {
        /// Trip id, id prefix, or #N.
        trip: String,
    },

    /// Delete a saved trip.
    #[command(alias = "rm")]
    Delete {
        /// Trip id, id prefix, or #N.
        trip: String,

        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },
}

/// How the user referred to a trip on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TripRef {
    /// `#N`: 1-based position in the trip list.
    Index(usize),
    /// A full session id or a unique prefix of one.
    Id(String),
}

impl TripRef {
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        if let Some(number) = input.strip_prefix('#') {
            return match number.parse::<usize>() {
                Ok(n) if n > 0 => Some(Self::Index(n)),
                _ => None,
            };
        }
        Some(Self::Id(input.to_string()))
    }

    /// Find the trip this reference points at.
    ///
    /// Exact id matches win over prefix matches; an ambiguous prefix
    /// resolves to nothing.
    pub fn resolve(&self, trips: &SessionList) -> Option<SessionId> {
        match self {
            Self::Index(n) => trips.as_slice().get(n - 1).map(|s| s.id.clone()),
            Self::Id(id) => {
                let exact = SessionId::new(id.as_str());
                if trips.contains(&exact) {
                    return Some(exact);
                }
                let mut matches = trips.iter().filter(|s| s.id.as_str().starts_with(id.as_str()));
                match (matches.next(), matches.next()) {
                    (Some(only), None) => Some(only.id.clone()),
                    _ => None,
                }
            }
        }
    }
}

/// Resolve a user-supplied trip reference or explain why it failed.
pub fn resolve_trip(trips: &SessionList, input: &str) -> anyhow::Result<SessionId> {
    TripRef::parse(input)
        .and_then(|r| r.resolve(trips))
        .ok_or_else(|| {
            anyhow::anyhow!("Trip '{input}' not found. List saved trips with: tpilot trips list")
        })
}

/// Shorten a session id for display.
pub fn short_id(id: &SessionId) -> &str {
    let s = id.as_str();
    match s.char_indices().nth(8) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}
