//! Input event handling for the App.
//!
//! Crossterm events are translated here into board commands: characters are
//! uppercased and checked against the flap character set, mouse coordinates
//! are shifted by the scroll offset into layout units, and a committed edit
//! triggers the persist-and-rebuild path.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use super::App;
use crate::board::{BoardSignal, CHAR_RAMP, NavKey};

impl App {
    /// Handles a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Quit hotkeys work regardless of board state.
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
        {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::PageUp => self.scroll_by(-i32::from(Self::scroll_page())),
            KeyCode::PageDown => self.scroll_by(i32::from(Self::scroll_page())),
            KeyCode::Enter => {
                if self.board.on_key(NavKey::Enter) == BoardSignal::Committed {
                    self.persist_and_rebuild();
                }
            }
            KeyCode::Backspace => {
                self.board.on_key(NavKey::Backspace);
            }
            KeyCode::Delete => {
                self.board.on_key(NavKey::Delete);
            }
            KeyCode::Left => {
                self.board.on_key(NavKey::Left);
            }
            KeyCode::Right => {
                self.board.on_key(NavKey::Right);
            }
            KeyCode::Up => {
                self.board.on_key(NavKey::Up);
            }
            KeyCode::Down => {
                self.board.on_key(NavKey::Down);
            }
            KeyCode::Esc => {
                self.board.on_key(NavKey::Escape);
            }
            KeyCode::Char(c) => {
                let upper = c.to_ascii_uppercase();
                if CHAR_RAMP.contains(upper) {
                    self.board.on_type_char(upper);
                }
            }
            _ => {}
        }
    }

    /// Handles a mouse event.
    ///
    /// Click selects (a quick second click also toggles the tick sound),
    /// movement drives hover previews, and the wheel scrolls a board taller
    /// than the terminal.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.register_click() {
                    self.toggle_mute();
                }
                let (x, y) = self.layout_point(mouse.column, mouse.row);
                self.board.on_click(x, y);
            }
            MouseEventKind::Moved => {
                let (x, y) = self.layout_point(mouse.column, mouse.row);
                self.board.on_hover(x, y);
            }
            MouseEventKind::ScrollDown => self.scroll_by(1),
            MouseEventKind::ScrollUp => self.scroll_by(-1),
            _ => {}
        }
    }

    /// Rebuilds the board for a new terminal size.
    ///
    /// Uncommitted edits do not survive: the fresh board starts from the
    /// last committed task list, exactly like an edit commit does.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
        let tasks = self.board.tasks().to_vec();
        self.rebuild_board(tasks);
    }

    /// Converts a terminal position into layout units, aiming at the center
    /// of the hovered character cell so edge comparisons stay strict.
    fn layout_point(&self, column: u16, row: u16) -> (f32, f32) {
        (
            f32::from(column) + 0.5,
            f32::from(row) + f32::from(self.scroll) + 0.5,
        )
    }
}
