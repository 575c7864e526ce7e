//! Main application state and logic.
//!
//! This module contains the App struct and its implementation, organized
//! into submodules:
//! - `events` - input event handling (keys, mouse, resize)
//!
//! ## Board lifecycle
//!
//! The app owns exactly one [`Board`] at a time. Committing an edit or
//! resizing the terminal discards it and builds a fresh one from the current
//! task list; the old board's animation state goes with it. Task text is the
//! only state that survives a rebuild, by being threaded through the new
//! board's constructor and the task store.
//!
//! ## Persistence degradation
//!
//! A broken task store is reported once as a footer warning; the board keeps
//! working and edits simply stop being saved.

pub mod events;

#[cfg(test)]
mod tests;

use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Widget};

use crate::audio::make_sound;
use crate::board::{Board, BoardConfig};
use crate::cli::Args;
use crate::fs::{self, FlapdeckPaths};
use crate::tui::widgets::BoardWidget;
use crate::tui::{GridCanvas, Theme};

/// Two clicks within this window toggle the tick sound.
const DOUBLE_CLICK_MS: u64 = 300;

/// Rows scrolled per PageUp/PageDown.
const SCROLL_PAGE_SIZE: u16 = 10;

/// Main application state.
pub struct App {
    /// All flapdeck-related filesystem paths.
    paths: FlapdeckPaths,
    /// Theme for styling.
    theme: Theme,
    /// The live board.
    board: Board<GridCanvas>,
    /// Terminal size the board was built for.
    viewport: (u16, u16),
    /// Ideal flap width, from the command line.
    target_cell_width: f32,
    /// Animation frame rate, from the command line.
    frames_per_second: u32,
    /// Whether the tick sound is muted.
    muted: bool,
    /// Terminal rows scrolled off the top of the board.
    scroll: u16,
    /// Time of the last primary click, for double-click detection.
    last_click_at: Option<Instant>,
    /// One-shot persistence warning shown in the footer.
    storage_warning: Option<String>,
    /// Whether saving is expected to work; cleared after the first failure.
    storage_ok: bool,
    /// Should quit flag.
    should_quit: bool,
}

impl App {
    /// Creates the application, loading tasks from the default store
    /// location (or the CLI override).
    ///
    /// # Errors
    ///
    /// Currently infallible beyond path resolution; kept as a `Result` so
    /// startup failures surface through the shell.
    pub fn new(args: &Args, width: u16, height: u16) -> Result<Self> {
        let mut paths = FlapdeckPaths::from_cwd();
        if let Some(file) = &args.tasks_file {
            paths = paths.with_tasks_file(file.clone());
        }
        Self::new_with_paths(args, width, height, paths)
    }

    /// Creates the application with custom paths.
    ///
    /// This constructor is primarily used for testing, allowing tests to use
    /// isolated temporary directories without affecting the real filesystem.
    ///
    /// # Errors
    ///
    /// Currently infallible; see [`App::new`].
    pub fn new_with_paths(
        args: &Args,
        width: u16,
        height: u16,
        paths: FlapdeckPaths,
    ) -> Result<Self> {
        let mut storage_warning = None;
        let mut storage_ok = true;

        let tasks = match fs::load_tasks(&paths) {
            Ok(tasks) => tasks,
            Err(e) => {
                // Degrade to the defaults and say so once; the board still
                // works, edits just will not stick.
                storage_warning = Some(format!("TASKS NOT LOADED ({e}) - EDITS WILL NOT BE SAVED"));
                storage_ok = false;
                fs::DEFAULT_TASKS.iter().map(ToString::to_string).collect()
            }
        };

        if storage_ok && !fs::store::storage_available(paths.base()) {
            storage_warning = Some("STORAGE UNAVAILABLE - EDITS WILL NOT BE SAVED".to_string());
            storage_ok = false;
        }

        let board = Board::new(
            &board_config(width, height, args.cell_width, args.fps),
            tasks,
            make_sound(args.muted),
        );
        let mut app = Self {
            paths,
            theme: Theme::default(),
            board,
            viewport: (width, height),
            target_cell_width: args.cell_width,
            frames_per_second: args.fps,
            muted: args.muted,
            scroll: 0,
            last_click_at: None,
            storage_warning,
            storage_ok,
            should_quit: false,
        };
        app.clamp_scroll();
        Ok(app)
    }

    /// Returns true if the application should quit.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Whether the tick sound is currently muted.
    #[must_use]
    pub fn muted(&self) -> bool {
        self.muted
    }

    /// The live board, for assertions in tests and rendering.
    #[must_use]
    pub fn board(&self) -> &Board<GridCanvas> {
        &self.board
    }

    /// Current scroll offset in terminal rows.
    #[must_use]
    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// The one-shot persistence warning, if any has been raised.
    #[must_use]
    pub fn storage_warning(&self) -> Option<&str> {
        self.storage_warning.as_deref()
    }

    /// Advances board animation by the elapsed time since the last frame.
    pub fn tick(&mut self, dt: Duration) {
        self.board.tick(dt);
    }

    /// Renders the board, with the one-shot storage warning overlaid on the
    /// bottom row when present.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        BoardWidget {
            canvas: self.board.surface(),
            layout: self.board.layout(),
            theme: &self.theme,
            scroll: self.scroll,
        }
        .render(area, frame.buffer_mut());

        if let Some(warning) = &self.storage_warning
            && area.height > 0
        {
            let bottom = Rect::new(area.x, area.bottom() - 1, area.width, 1);
            frame.render_widget(
                Paragraph::new(Line::styled(warning.clone(), self.theme.warning_style())),
                bottom,
            );
        }
    }

    // =========================================================================
    // Board rebuilds
    // =========================================================================

    /// Persists the board's task list and rebuilds the board around it.
    ///
    /// Called after every committed edit. A failing save downgrades to the
    /// one-shot warning; the rebuild happens regardless so the grid reflects
    /// the new task list.
    pub(crate) fn persist_and_rebuild(&mut self) {
        let tasks = self.board.tasks().to_vec();
        if self.storage_ok
            && let Err(e) = fs::save_tasks(&self.paths, &tasks)
        {
            self.storage_warning = Some(format!("SAVE FAILED ({e}) - EDITS WILL NOT BE SAVED"));
            self.storage_ok = false;
        }
        self.rebuild_board(tasks);
    }

    /// Discards the current board and builds a fresh one from `tasks`.
    pub(crate) fn rebuild_board(&mut self, tasks: Vec<String>) {
        let (width, height) = self.viewport;
        self.board = Board::new(
            &board_config(width, height, self.target_cell_width, self.frames_per_second),
            tasks,
            make_sound(self.muted),
        );
        self.clamp_scroll();
    }

    /// Toggles the tick sound and swaps the board's click sink in place.
    pub(crate) fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        self.board.replace_sound(make_sound(self.muted));
    }

    // =========================================================================
    // Scrolling
    // =========================================================================

    /// Scrolls by whole terminal rows, clamped to the board's height.
    pub(crate) fn scroll_by(&mut self, delta: i32) {
        let proposed = i32::from(self.scroll) + delta;
        let clamped = proposed.clamp(0, i32::from(self.max_scroll()));
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            self.scroll = clamped as u16;
        }
    }

    fn clamp_scroll(&mut self) {
        self.scroll = self.scroll.min(self.max_scroll());
    }

    /// Rows of board that do not fit in the viewport.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::cast_sign_loss)]
    fn max_scroll(&self) -> u16 {
        let layout = self.board.layout();
        let board_height = (layout.rows as f32 * layout.cell_height).round() as i32;
        let visible = i32::from(self.viewport.1);
        (board_height - visible).max(0) as u16
    }

    /// For double-click detection: records this click and reports whether it
    /// completes a double click.
    pub(crate) fn register_click(&mut self) -> bool {
        let now = Instant::now();
        let is_double = self
            .last_click_at
            .is_some_and(|last| now.duration_since(last) < Duration::from_millis(DOUBLE_CLICK_MS));
        self.last_click_at = if is_double { None } else { Some(now) };
        is_double
    }

    /// Page size for PageUp/PageDown scrolling.
    pub(crate) const fn scroll_page() -> u16 {
        SCROLL_PAGE_SIZE
    }
}

/// Board configuration for a terminal size and the CLI tuning knobs.
fn board_config(width: u16, height: u16, target_cell_width: f32, fps: u32) -> BoardConfig {
    BoardConfig {
        viewport_width: f32::from(width).max(target_cell_width),
        viewport_height: f32::from(height).max(1.0),
        target_cell_width,
        frames_per_second: fps.max(1),
    }
}
