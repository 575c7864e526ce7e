//! Terminal setup and configuration utilities.
//!
//! This module handles low-level terminal event configuration:
//! - Mouse capture (for flap selection and hover previews)

use std::io::stdout;

use ratatui::crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use ratatui::crossterm::execute;

/// Guard to ensure terminal event modes are disabled on drop.
///
/// Mouse capture must be released even if the application panics; otherwise
/// the user's shell is left swallowing mouse escape sequences.
pub struct TerminalEventGuard {
    mouse_capture_enabled: bool,
}

impl TerminalEventGuard {
    #[must_use]
    pub fn new() -> Self {
        let mut guard = Self {
            mouse_capture_enabled: false,
        };

        match execute!(stdout(), EnableMouseCapture) {
            Ok(()) => {
                guard.mouse_capture_enabled = true;
            }
            Err(e) => {
                eprintln!("Warning: Could not enable mouse capture: {e}");
                eprintln!("Flap selection and hover previews will need the keyboard.");
            }
        }

        guard
    }
}

impl Default for TerminalEventGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalEventGuard {
    fn drop(&mut self) {
        if self.mouse_capture_enabled {
            let _ = execute!(stdout(), DisableMouseCapture);
        }
    }
}
