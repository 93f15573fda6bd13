//! Progress spinner shown while a turn is in flight.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Message shown while waiting on the assistant.
pub const SEARCHING_MESSAGE: &str = "Searching Airbnb...";

/// Start a steady-ticking spinner with the searching message.
pub fn searching_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("  {spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(SEARCHING_MESSAGE);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
