//! The split-flap board: grid state, animation, and editing.
//!
//! This module contains the core board state machine, organized into
//! submodules:
//! - `cell` - one animated grid position
//! - `layout` - grid geometry from viewport size and task content
//! - `assign` - task numbering and task-to-cell assignment
//! - `clock` - header clock/date strings
//! - `animate` - the sweep, per-cell flips, and the clock refresh
//! - `edit` - cursor navigation, typing, and edit commits
//! - `surface` - the rendering boundary
//!
//! ## Lifecycle
//!
//! A [`Board`] is built fresh for every viewport size and task list: resizing
//! the terminal or committing an edit discards the old instance and builds a
//! new one. All animation timing lives in the board's own accumulators, so
//! dropping a board cancels everything it had in flight.
//!
//! ## Driving
//!
//! The host loop calls [`Board::tick`] with measured elapsed time and routes
//! input through [`Board::on_click`], [`Board::on_hover`],
//! [`Board::on_type_char`] and [`Board::on_key`]. Input is ignored wholesale
//! while the opening sweep is still running.

pub mod assign;
pub mod cell;
pub mod clock;
pub mod layout;
pub mod surface;

mod animate;
mod edit;

#[cfg(test)]
mod tests;

use std::collections::HashMap;

use chrono::{DateTime, Local};

use crate::audio::TickSound;

pub use animate::CHAR_RAMP;
pub use cell::Cell;
pub use edit::NavKey;
pub use layout::BoardLayout;
pub use surface::{CellStyle, Surface};

/// Inputs that shape a board instance.
#[derive(Debug, Clone, Copy)]
pub struct BoardConfig {
    /// Viewport width in layout units (terminal columns).
    pub viewport_width: f32,
    /// Viewport height in layout units (terminal rows).
    pub viewport_height: f32,
    /// Ideal flap width; the actual width stretches to divide the viewport
    /// exactly.
    pub target_cell_width: f32,
    /// Animation tick rate.
    pub frames_per_second: u32,
}

/// What a command handler asks of the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardSignal {
    /// Nothing to do.
    None,
    /// An edit was committed into the task list: persist it and rebuild the
    /// board from the updated tasks.
    Committed,
}

/// The whole grid plus editing and animation state.
pub struct Board<S: Surface> {
    layout: BoardLayout,
    cells: Vec<Cell>,
    /// Raw task strings, threaded through rebuilds and persisted by the
    /// shell.
    tasks: Vec<String>,
    /// Tasks with their ordinal prefixes, as laid out on the grid.
    display_tasks: Vec<String>,
    clock: String,
    date: String,
    cursor_index: Option<usize>,
    edited_task: Option<usize>,
    has_started_editing: bool,
    sweep_char_index: usize,
    sweep_done: bool,
    /// Cell index -> ramp progress, for cells currently mid-flip.
    active_flips: HashMap<usize, usize>,
    interval_ms: f32,
    timer_ms: f32,
    clock_timer_ms: f32,
    sound_count: u32,
    surface: S,
    sound: Box<dyn TickSound>,
    /// Where the clock refresh reads time from. Frozen in tests so sweep
    /// results depend only on tick progress.
    time_source: Box<dyn Fn() -> DateTime<Local>>,
}

impl<S: Surface> Board<S> {
    /// Builds a board for the current wall clock.
    #[must_use]
    pub fn new(config: &BoardConfig, tasks: Vec<String>, sound: Box<dyn TickSound>) -> Self {
        Self::with_time_source(config, tasks, sound, Box::new(Local::now))
    }

    /// Builds a board with a frozen clock.
    ///
    /// Tests use this to pin header content and make sweep results depend
    /// only on tick progress; production code goes through [`Board::new`].
    pub(crate) fn with_time(
        config: &BoardConfig,
        tasks: Vec<String>,
        sound: Box<dyn TickSound>,
        now: DateTime<Local>,
    ) -> Self {
        Self::with_time_source(config, tasks, sound, Box::new(move || now))
    }

    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn with_time_source(
        config: &BoardConfig,
        tasks: Vec<String>,
        sound: Box<dyn TickSound>,
        time_source: Box<dyn Fn() -> DateTime<Local>>,
    ) -> Self {
        let now = time_source();
        let clock = clock::time_string(now);
        let date = clock::date_string(now);
        let display_tasks = assign::prepend_task_numbers(&tasks);
        let layout = BoardLayout::compute(
            config.viewport_width,
            config.viewport_height,
            config.target_cell_width,
            &display_tasks,
            &clock,
            &date,
        );

        let mut cells = Vec::with_capacity(layout.cell_count());
        for row in 0..layout.rows {
            for col in 0..layout.columns {
                cells.push(Cell::new(
                    row * layout.columns + col,
                    row,
                    col,
                    col as f32 * layout.cell_width,
                    row as f32 * layout.cell_height,
                ));
            }
        }
        assign::assign_tasks_to_cells(
            &mut cells,
            &display_tasks,
            layout.columns,
            layout.tasks_starting_row,
        );

        let interval_ms = 1000.0 / config.frames_per_second as f32;
        let surface = S::new(layout.columns, layout.rows);

        Self {
            layout,
            cells,
            tasks,
            display_tasks,
            clock,
            date,
            cursor_index: None,
            edited_task: None,
            has_started_editing: false,
            sweep_char_index: 0,
            sweep_done: false,
            active_flips: HashMap::new(),
            interval_ms,
            // Preloaded so the first elapsed tick advances the sweep.
            timer_ms: interval_ms,
            clock_timer_ms: 0.0,
            sound_count: 0,
            surface,
            sound,
            time_source,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Grid geometry of this board.
    #[must_use]
    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    /// All cells, row-major.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Raw task strings as currently held by the board.
    #[must_use]
    pub fn tasks(&self) -> &[String] {
        &self.tasks
    }

    /// Tasks with their ordinal prefixes.
    #[must_use]
    pub fn display_tasks(&self) -> &[String] {
        &self.display_tasks
    }

    /// The rendering surface, for the shell to blit from.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[cfg(test)]
    pub(crate) fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Index of the cell holding the cursor, if any.
    #[must_use]
    pub fn cursor_index(&self) -> Option<usize> {
        self.cursor_index
    }

    /// Index of the task currently being edited, if any.
    #[must_use]
    pub fn edited_task(&self) -> Option<usize> {
        self.edited_task
    }

    /// True once the open edit session has uncommitted changes.
    #[must_use]
    pub fn has_started_editing(&self) -> bool {
        self.has_started_editing
    }

    /// True while the opening sweep is still running. Input is rejected
    /// until it completes.
    #[must_use]
    pub fn sweep_in_progress(&self) -> bool {
        !self.sweep_done
    }

    /// True when the cell is currently flip-animating.
    #[must_use]
    pub fn is_flipping(&self, index: usize) -> bool {
        self.active_flips.contains_key(&index)
    }

    /// Number of cells currently mid-flip.
    #[must_use]
    pub fn active_flip_count(&self) -> usize {
        self.active_flips.len()
    }

    /// Swaps the click sink, e.g. when the user toggles mute.
    pub fn replace_sound(&mut self, sound: Box<dyn TickSound>) {
        self.sound = sound;
    }

    // =========================================================================
    // Pointer commands
    // =========================================================================

    /// Selects or deselects the cell under the pointer.
    ///
    /// Clicks outside every cell, or on a cell belonging to a different task
    /// than the one being edited, are ignored. Clicking the selected cell
    /// deselects it. A mid-flip cell is resolved to its settled character
    /// before selection.
    pub fn on_click(&mut self, x: f32, y: f32) {
        if self.sweep_in_progress() {
            return;
        }
        let Some(index) = self.cell_at(x, y) else {
            return;
        };
        if let Some(edited) = self.edited_task
            && self.cells[index].task != Some(edited)
        {
            return;
        }

        if self.cursor_index == Some(index) {
            self.cursor_index = None;
            self.redraw(index);
            return;
        }

        if self.active_flips.remove(&index).is_some() {
            self.redraw(index);
        }

        // Quirk, kept on purpose and pinned by a test: a previous selection
        // sitting on cell 0 is never repainted as deselected.
        let previous = self.cursor_index.filter(|&i| i != 0);
        self.cursor_index = Some(index);
        if let Some(prev) = previous {
            self.redraw(prev);
        }
        self.redraw(index);
    }

    /// Starts a preview flip on the hovered cell.
    ///
    /// Cells already selected or already animating are left alone.
    pub fn on_hover(&mut self, x: f32, y: f32) {
        if self.sweep_in_progress() {
            return;
        }
        let Some(index) = self.cell_at(x, y) else {
            return;
        };
        if self.active_flips.contains_key(&index) || self.cursor_index == Some(index) {
            return;
        }
        self.active_flips.insert(index, 0);
    }

    /// Finds the cell strictly containing the point, if any.
    fn cell_at(&self, x: f32, y: f32) -> Option<usize> {
        self.cells
            .iter()
            .position(|c| c.contains(x, y, self.layout.cell_width, self.layout.cell_height))
    }

    // =========================================================================
    // Drawing helpers
    // =========================================================================

    /// Repaints a cell with its settled character.
    pub(crate) fn redraw(&mut self, index: usize) {
        let style = self.style_for(index);
        let ch = self.cells[index].target_char;
        self.surface.draw_cell(&self.cells[index], ch, style);
    }

    /// Paints a cell with a transient character (mid-animation).
    pub(crate) fn draw_char(&mut self, index: usize, ch: Option<char>) {
        let style = self.style_for(index);
        self.surface.draw_cell(&self.cells[index], ch, style);
    }

    /// Rendering intent of a cell, in precedence order: prefix marking wins
    /// over selection, which wins over edit-session membership.
    fn style_for(&self, index: usize) -> CellStyle {
        let cell = &self.cells[index];
        if cell.marked_as_task_number {
            CellStyle::TaskNumber
        } else if self.cursor_index == Some(index) {
            CellStyle::Selected
        } else if self.edited_task.is_some() && self.edited_task == cell.task {
            CellStyle::EditedTask
        } else {
            CellStyle::Normal
        }
    }
}
