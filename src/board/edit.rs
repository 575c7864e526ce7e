//! Cursor navigation, typing, and edit commits.
//!
//! The controller is a small state machine over `cursor_index`,
//! `edited_task`, and `has_started_editing`:
//!
//! - a parked cursor with no edit session just navigates;
//! - the first mutation (keystroke, Backspace, Delete) opens an edit session
//!   on the cursor's task and marks it started;
//! - Enter commits a started session back into the task list and asks the
//!   shell to rebuild the board, or - outside a session - jumps to the next
//!   task, creating a brand-new one past the end of the list.
//!
//! Every out-of-bounds or invalid-target command is a silent no-op.

use super::surface::Surface;
use super::{Board, BoardSignal, assign};

/// Discrete navigation commands understood by the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Enter,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Escape,
}

impl<S: Surface> Board<S> {
    /// Types one character at the cursor.
    ///
    /// Rejected without a cursor, on a cell outside any task, or when the
    /// cursor or the cell after it carries the numeric task prefix. The
    /// first keystroke outside an edit session opens one and blanks the rest
    /// of the grid as the task's editable tail; the typed character flips in
    /// on its cell and the cursor advances one cell.
    pub fn on_type_char(&mut self, ch: char) {
        if self.sweep_in_progress() {
            return;
        }
        let Some(cursor) = self.cursor_index else {
            return;
        };
        if self.cells[cursor].task.is_none() {
            return;
        }
        if self.edited_task.is_some() && !self.has_started_editing {
            self.has_started_editing = true;
        }
        if self.cells[cursor].marked_as_task_number
            || self
                .cells
                .get(cursor + 1)
                .is_some_and(|c| c.marked_as_task_number)
        {
            return;
        }

        if self.edited_task.is_none() {
            let task = self.cells[cursor].task;
            self.edited_task = task;
            self.has_started_editing = true;
            // Everything after the cursor becomes the edited task's tail,
            // blanked now and refilled as typing proceeds. The commit path
            // reassigns the grid afterwards.
            for index in (cursor + 1)..self.cells.len() {
                let cell = &mut self.cells[index];
                cell.target_char = None;
                cell.task = task;
                cell.marked_as_task_number = false;
            }
            for index in (cursor + 1)..self.cells.len() {
                self.draw_char(index, None);
            }
        }

        self.cells[cursor].target_char = Some(ch);
        self.active_flips.insert(cursor, 0);

        // Advance, clamped to the grid end; the new cursor cell is blanked
        // ready for the next keystroke.
        let next = if cursor + 1 < self.cells.len() {
            cursor + 1
        } else {
            cursor
        };
        self.cursor_index = Some(next);
        self.cells[next].target_char = None;
        self.draw_char(next, None);
    }

    /// Handles a navigation key, returning what the shell should do next.
    pub fn on_key(&mut self, key: NavKey) -> BoardSignal {
        if self.sweep_in_progress() {
            return BoardSignal::None;
        }

        if key == NavKey::Escape {
            // Escape only clears a parked cursor; an open edit session keeps
            // its selection.
            if self.edited_task.is_none()
                && let Some(previous) = self.cursor_index.take()
            {
                self.redraw(previous);
            }
            return BoardSignal::None;
        }

        if key == NavKey::Enter {
            return self.handle_enter();
        }

        // Movement and deletion need a cursor; the first press just parks it
        // on the first task cell.
        let Some(cursor) = self.cursor_index else {
            self.park_cursor();
            return BoardSignal::None;
        };

        match key {
            NavKey::Backspace => self.backspace(cursor),
            NavKey::Delete => self.delete_forward(cursor),
            NavKey::Left => self.step_cursor(cursor, cursor.checked_sub(1)),
            NavKey::Right => self.step_cursor(cursor, Some(cursor + 1)),
            NavKey::Up => self.step_vertical(cursor, cursor.checked_sub(self.layout.columns)),
            NavKey::Down => self.step_vertical(cursor, Some(cursor + self.layout.columns)),
            NavKey::Enter | NavKey::Escape => {}
        }
        BoardSignal::None
    }

    // =========================================================================
    // Movement
    // =========================================================================

    /// First task cell of the grid: start of the task area, past the first
    /// task's prefix.
    fn park_index(&self) -> usize {
        self.layout.tasks_starting_row * self.layout.columns + assign::prefix_len(0)
    }

    fn park_cursor(&mut self) {
        let index = self.park_index();
        if index < self.cells.len() {
            self.cursor_index = Some(index);
            self.redraw(index);
        }
    }

    /// Moves the cursor to `target` unless it falls off the grid or lands on
    /// a prefix cell.
    fn step_cursor(&mut self, cursor: usize, target: Option<usize>) {
        let Some(target) = target else {
            return;
        };
        if target >= self.cells.len() || self.cells[target].marked_as_task_number {
            return;
        }
        self.cursor_index = Some(target);
        self.redraw(cursor);
        self.redraw(target);
    }

    /// Vertical movement is plain row hopping, disabled during an edit
    /// session (edits stay within the task's reflowed span).
    fn step_vertical(&mut self, cursor: usize, target: Option<usize>) {
        if self.edited_task.is_some() {
            return;
        }
        self.step_cursor(cursor, target);
    }

    // =========================================================================
    // Deletion
    // =========================================================================

    /// Blanks the cursor cell and moves left.
    ///
    /// Blanking is a mutation: it opens an edit session on the cell's task
    /// if none is open and marks the session started, so an Enter afterwards
    /// commits the shortened text.
    fn backspace(&mut self, cursor: usize) {
        if self.cells[cursor].marked_as_task_number {
            return;
        }
        if let Some(task) = self.cells[cursor].task {
            if self.edited_task.is_none() {
                self.edited_task = Some(task);
            }
            self.has_started_editing = true;
            self.cells[cursor].target_char = None;
            self.redraw(cursor);
        }
        self.step_cursor(cursor, cursor.checked_sub(1));
    }

    /// Blanks the cell to the right of the cursor without moving.
    fn delete_forward(&mut self, cursor: usize) {
        let target = cursor + 1;
        let Some(cell) = self.cells.get(target) else {
            return;
        };
        if cell.marked_as_task_number {
            return;
        }
        let Some(task) = cell.task else {
            return;
        };
        if self.edited_task.is_none() {
            self.edited_task = Some(task);
        }
        self.has_started_editing = true;
        self.cells[target].target_char = None;
        self.redraw(target);
    }

    // =========================================================================
    // Enter: commit, jump, create
    // =========================================================================

    fn handle_enter(&mut self) -> BoardSignal {
        if self.has_started_editing {
            self.commit_edit();
            return BoardSignal::Committed;
        }
        if self.edited_task.is_some() {
            // A freshly created task with nothing typed: nothing to commit,
            // nowhere to jump.
            return BoardSignal::None;
        }

        let columns = self.layout.columns;
        let (previous, landed) = match self.cursor_index {
            None => (None, self.park_index()),
            Some(cursor) if self.cells[cursor].task.is_none() => (Some(cursor), self.park_index()),
            Some(cursor) => {
                // Jump to the row after the current task's span, landing just
                // past where the next task's prefix sits.
                let Some(current_task) = self.cells[cursor].task else {
                    return BoardSignal::None;
                };
                let col = assign::prefix_len(current_task + 1);
                let mut target = (self.cells[cursor].row + 1) * columns + col;
                loop {
                    match self.cells.get(target) {
                        Some(c) if c.task == Some(current_task) => target += columns,
                        Some(_) => break,
                        None => return BoardSignal::None,
                    }
                }
                (Some(cursor), target)
            }
        };

        if landed >= self.cells.len() {
            return BoardSignal::None;
        }
        self.cursor_index = Some(landed);
        if let Some(prev) = previous {
            self.redraw(prev);
        }
        self.redraw(landed);

        // Landing past the final task on an unowned cell begins a brand-new
        // task at the next ordinal.
        if self.cells[landed].task.is_none() {
            let next_task = previous
                .and_then(|p| self.cells[p].task)
                .map_or(0, |t| t + 1);
            self.create_task(next_task, landed);
        }
        BoardSignal::None
    }

    /// Opens a new task at `cursor`: writes its numeric prefix into the
    /// cells to the left, and adopts the rest of the grid as its blank body.
    ///
    /// `has_started_editing` stays false until the first keystroke, so an
    /// immediate Enter is a no-op rather than an empty commit.
    fn create_task(&mut self, task: usize, cursor: usize) {
        self.edited_task = Some(task);

        let prefix = assign::display_prefix(task);
        for (offset, ch) in prefix.chars().rev().enumerate() {
            let Some(index) = cursor.checked_sub(offset + 1) else {
                break;
            };
            {
                let cell = &mut self.cells[index];
                cell.target_char = Some(ch);
                cell.task = Some(task);
                cell.marked_as_task_number = true;
            }
            self.redraw(index);
        }

        for index in cursor..self.cells.len() {
            let cell = &mut self.cells[index];
            cell.target_char = None;
            cell.task = Some(task);
        }
        for index in cursor..self.cells.len() {
            self.draw_char(index, None);
        }
    }

    /// Rebuilds the edited task's text from its cells and folds it back into
    /// the task list.
    ///
    /// Blank cells contribute nothing, so trailing (and interior) blanks
    /// vanish. An existing task emptied out is deleted; a new task emptied
    /// out is abandoned; anything else updates or appends.
    fn commit_edit(&mut self) {
        let Some(edited) = self.edited_task else {
            return;
        };

        let mut reconstructed = String::new();
        for cell in &self.cells {
            if cell.task == Some(edited)
                && let Some(ch) = cell.target_char
            {
                reconstructed.push(ch);
            }
        }
        let body: String = reconstructed
            .chars()
            .skip(assign::prefix_len(edited))
            .collect();

        if edited < self.tasks.len() {
            if body.is_empty() {
                self.tasks.remove(edited);
            } else {
                self.tasks[edited] = body;
            }
        } else if !body.is_empty() {
            self.tasks.push(body);
        }

        self.display_tasks = assign::prepend_task_numbers(&self.tasks);
    }
}
