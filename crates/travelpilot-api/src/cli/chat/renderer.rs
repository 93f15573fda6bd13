//! Terminal markdown rendering for assistant replies.
//!
//! Replies arrive as Markdown (listing tables, links, emphasis); `termimad`
//! lays them out for the current terminal width.

use termimad::crossterm::style::Color;
use termimad::MadSkin;

/// Terminal markdown renderer.
pub struct ChatRenderer {
    skin: MadSkin,
}

impl ChatRenderer {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.bold.set_fg(Color::Cyan);
        skin.headers[0].set_fg(Color::Cyan);
        skin.headers[1].set_fg(Color::Cyan);
        skin.inline_code.set_fg(Color::Yellow);
        Self { skin }
    }

    /// Render a complete Markdown reply to styled terminal text.
    pub fn render(&self, markdown: &str) -> String {
        self.skin.term_text(markdown).to_string()
    }

    /// Render the fallback shown after a failed request.
    pub fn render_error(&self, text: &str) -> String {
        format!("{}", console::style(text).yellow())
    }
}

impl Default for ChatRenderer {
    fn default() -> Self {
        Self::new()
    }
}
