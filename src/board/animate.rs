//! Animation: the opening sweep, per-cell flips, and the clock refresh.
//!
//! All three processes share one explicit state machine advanced by
//! [`Board::tick`]. The host loop measures elapsed time and calls `tick`
//! every frame; animation steps fire whenever the accumulated time crosses
//! the configured interval, so results depend on tick progress rather than
//! wall time.

use std::time::Duration;

use super::surface::Surface;
use super::{Board, clock};

/// The fixed character ramp every flap cycles through: punctuation, digits,
/// uppercase letters, and finally a space.
pub const CHAR_RAMP: &str =
    "!@#$%^&*()_-+={}[]:;'\"<>,.?/0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ ";

/// Ramp character at `index`; `None` once the ramp is exhausted.
///
/// Ramp and board content are ASCII by construction, so byte indexing is
/// exact.
fn ramp_char(index: usize) -> Option<char> {
    CHAR_RAMP.as_bytes().get(index).copied().map(char::from)
}

fn byte_char(s: &str, index: usize) -> Option<char> {
    s.as_bytes().get(index).copied().map(char::from)
}

impl<S: Surface> Board<S> {
    /// Advances the animation state machine by `dt` of elapsed time.
    ///
    /// While the opening sweep runs, only the sweep advances. Afterwards,
    /// active flips step at the frame interval and the clock refreshes once
    /// per second.
    pub fn tick(&mut self, dt: Duration) {
        let dt_ms = dt.as_secs_f32() * 1000.0;

        if !self.sweep_done {
            self.timer_ms += dt_ms;
            if self.timer_ms > self.interval_ms {
                self.sweep_step();
                self.timer_ms = 0.0;
            }
            return;
        }

        if !self.active_flips.is_empty() {
            self.timer_ms += dt_ms;
            if self.timer_ms > self.interval_ms {
                self.flip_step();
                self.timer_ms = 0.0;
            }
        }

        self.clock_timer_ms += dt_ms;
        if self.clock_timer_ms >= 1000.0 {
            self.clock_timer_ms = 0.0;
            self.update_clock();
        }
    }

    // =========================================================================
    // Sweep
    // =========================================================================

    /// One sweep tick: every cell is redrawn showing either its settled
    /// character or the current ramp character, and cells whose destination
    /// matches the ramp character lock it in.
    fn sweep_step(&mut self) {
        let Some(current) = ramp_char(self.sweep_char_index) else {
            self.finish_sweep();
            return;
        };

        self.surface.clear();
        for index in 0..self.cells.len() {
            if let Some(settled) = self.cells[index].target_char {
                self.draw_char(index, Some(settled));
                continue;
            }
            match self.sweep_destination(index) {
                Some((destination, in_prefix)) if destination == current => {
                    if in_prefix {
                        self.cells[index].marked_as_task_number = true;
                    }
                    self.cells[index].target_char = Some(current);
                    self.draw_char(index, Some(current));
                }
                _ => self.draw_char(index, Some(current)),
            }
        }

        self.sound.play_tick();
        self.sound_count += 1;
        self.sweep_char_index += 1;
        if self.sweep_char_index >= CHAR_RAMP.len() {
            self.finish_sweep();
        }
    }

    /// The character a blank cell is sweeping toward, if any, and whether
    /// that character is part of a task's numeric prefix.
    ///
    /// Header content lives on the first rows: the clock is left-aligned on
    /// row 0, the date is right-aligned beside it or left-aligned on row 1
    /// when it does not fit. Task text fills its assigned span, skipping the
    /// two indent cells at the start of every continuation row.
    fn sweep_destination(&self, index: usize) -> Option<(char, bool)> {
        let columns = self.layout.columns;
        let date_len = self.date.len();

        if let Some(digit) = byte_char(&self.clock, index) {
            return Some((digit, false));
        }

        if !self.layout.date_on_new_line {
            let date_start = columns - date_len;
            if index >= date_start
                && index < columns
                && let Some(ch) = byte_char(&self.date, index - date_start)
            {
                return Some((ch, false));
            }
        } else if index >= columns
            && index < columns + date_len
            && let Some(ch) = byte_char(&self.date, index - columns)
        {
            return Some((ch, false));
        }

        let cell = &self.cells[index];
        let (task, start, task_row) = match (cell.task, cell.task_start_index, cell.task_row_number)
        {
            (Some(task), Some(start), Some(task_row)) => (task, start, task_row),
            _ => return None,
        };
        let text = self.display_tasks.get(task)?;

        if task_row == 0 {
            let char_index = index - start;
            let ch = byte_char(text, char_index)?;
            return Some((ch, char_index < super::assign::prefix_len(task)));
        }

        // Continuation rows: the first two cells are indent filler.
        let col_offset = index - start - columns * task_row;
        if col_offset > 1 {
            let char_index = index - start - 2 * task_row;
            let ch = byte_char(text, char_index)?;
            return Some((ch, false));
        }
        None
    }

    /// Ends the sweep: refresh the clock immediately and hand timing over to
    /// the flip and clock processes.
    fn finish_sweep(&mut self) {
        self.sweep_done = true;
        self.sweep_char_index = 0;
        self.sound_count = 0;
        self.timer_ms = 0.0;
        self.clock_timer_ms = 0.0;
        self.update_clock();
    }

    // =========================================================================
    // Clock refresh
    // =========================================================================

    /// Re-reads the time and repaints only the clock cells whose character
    /// changed.
    fn update_clock(&mut self) {
        let new_time = clock::time_string((self.time_source)());
        for (index, digit) in new_time.chars().enumerate() {
            if index >= self.cells.len() {
                break;
            }
            if self.cells[index].target_char != Some(digit) {
                self.cells[index].target_char = Some(digit);
                self.redraw(index);
            }
        }
    }

    // =========================================================================
    // Flips
    // =========================================================================

    /// One flip tick: every animating cell shows its next ramp character,
    /// settling when the ramp reaches its target or runs out.
    ///
    /// Cells are removed from the active set after the whole batch, never
    /// mid-iteration. The click cadence thins out as the batch grows so a
    /// full row of flips does not hammer the bell: every 8th tick for a
    /// single cell, every 4th for 2-8 cells, every tick beyond that.
    #[allow(clippy::modulo_one)] // the cadence table is clearer kept parallel
    fn flip_step(&mut self) {
        let size = self.active_flips.len();
        if size == 0 {
            return;
        }

        let play = if size < 2 {
            self.sound_count % 8 == 0
        } else if size <= 8 {
            self.sound_count % 4 == 0
        } else {
            self.sound_count % 1 == 0
        };
        if play {
            self.sound.play_tick();
        }
        self.sound_count += 1;

        let mut batch: Vec<usize> = self.active_flips.keys().copied().collect();
        batch.sort_unstable();
        let mut finished: Vec<usize> = Vec::new();

        for index in batch {
            let Some(&count) = self.active_flips.get(&index) else {
                continue;
            };
            let current = ramp_char(count);
            if current == self.cells[index].target_char {
                self.draw_char(index, current);
                finished.push(index);
            } else if count < CHAR_RAMP.len() {
                self.draw_char(index, current);
                self.active_flips.insert(index, count + 1);
            } else {
                finished.push(index);
            }
        }

        for index in finished {
            self.active_flips.remove(&index);
        }
        if self.active_flips.is_empty() {
            self.sound_count = 0;
            self.timer_ms = 0.0;
        }
    }
}
