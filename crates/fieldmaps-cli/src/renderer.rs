//! Terminal rendering module for rich markdown output
//!
//! This module provides terminal rendering capabilities using termimad
//! for rich markdown display with optional fallback to plain text.

use std::io::{self, Write};

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::DarkGreen);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Render markdown text to stdout
    pub fn render(&self, markdown: &str) -> Result<()> {
        if self.rich_enabled {
            // Headers keep their hash marks so nesting stays visible
            for line in markdown.lines() {
                if line.starts_with('#') {
                    println!("\x1b[32m{line}\x1b[0m");
                } else {
                    self.skin.print_inline(line);
                    println!();
                }
            }
        } else {
            print!("{markdown}");
        }
        io::stdout().flush()?;
        Ok(())
    }

    /// Overwrites the current stderr line with a progress message.
    pub fn progress(&self, message: &str) {
        if self.rich_enabled {
            eprint!("\r\x1b[2K{message}");
        } else {
            eprintln!("{message}");
        }
    }

    /// Ends a run of progress messages.
    pub fn finish_progress(&self) {
        if self.rich_enabled {
            eprintln!();
        }
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
