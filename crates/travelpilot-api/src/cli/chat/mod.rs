//! Interactive CLI chat experience for TravelPilot.
//!
//! This module implements the full chat loop: markdown-rendered replies,
//! the "Searching Airbnb..." spinner, the welcome banner, slash commands
//! for switching and deleting trips. Entry point:
//! `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
pub mod spinner;
