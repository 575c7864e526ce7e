//! Shared test utilities for board tests.
//!
//! Boards under test use a recording surface, a counting click sink, and a
//! frozen clock, so every assertion depends only on the commands fed in and
//! the number of ticks driven.

use std::rc::Rc;
use std::time::Duration;

use chrono::{DateTime, Local, TimeZone};

use crate::audio::TickSound;
use crate::board::cell::Cell;
use crate::board::surface::{CellStyle, Surface};
use crate::board::{Board, BoardConfig, CHAR_RAMP};

/// Records every paint the board issues.
pub struct TestSurface {
    /// Last character and style painted per cell.
    pub painted: Vec<(Option<char>, CellStyle)>,
    /// Full paint history: (cell index, character, style).
    pub draw_log: Vec<(usize, Option<char>, CellStyle)>,
    /// Number of full-surface clears.
    pub clears: usize,
}

impl Surface for TestSurface {
    fn new(columns: usize, rows: usize) -> Self {
        Self {
            painted: vec![(None, CellStyle::Normal); columns * rows],
            draw_log: Vec::new(),
            clears: 0,
        }
    }

    fn clear(&mut self) {
        self.clears += 1;
        for slot in &mut self.painted {
            *slot = (None, CellStyle::Normal);
        }
    }

    fn draw_cell(&mut self, cell: &Cell, ch: Option<char>, style: CellStyle) {
        self.painted[cell.index] = (ch, style);
        self.draw_log.push((cell.index, ch, style));
    }
}

/// Click sink that counts invocations through a shared cell.
pub struct CountingSound(pub Rc<std::cell::Cell<u32>>);

impl TickSound for CountingSound {
    fn play_tick(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

/// 80x24 viewport, 5-column flaps, 60 fps: a 16-column grid where the date
/// never fits beside the clock, so tasks start on row 3.
pub fn test_config() -> BoardConfig {
    BoardConfig {
        viewport_width: 80.0,
        viewport_height: 24.0,
        target_cell_width: 5.0,
        frames_per_second: 60,
    }
}

/// Frozen test clock: `3:04:05 PM`, `THURSDAY 8/6/26`.
#[allow(clippy::unwrap_used)]
pub fn fixed_now() -> DateTime<Local> {
    Local.with_ymd_and_hms(2026, 8, 6, 15, 4, 5).unwrap()
}

/// Builds a board over the test surface with a frozen clock, returning the
/// board and its click counter.
pub fn make_board(tasks: &[&str]) -> (Board<TestSurface>, Rc<std::cell::Cell<u32>>) {
    let clicks = Rc::new(std::cell::Cell::new(0));
    let board = Board::with_time(
        &test_config(),
        tasks.iter().map(ToString::to_string).collect(),
        Box::new(CountingSound(Rc::clone(&clicks))),
        fixed_now(),
    );
    (board, clicks)
}

/// One animation tick, comfortably past the 60 fps interval.
pub fn tick_once(board: &mut Board<TestSurface>) {
    board.tick(Duration::from_millis(17));
}

/// Drives the opening sweep to completion.
pub fn run_sweep(board: &mut Board<TestSurface>) {
    for _ in 0..=CHAR_RAMP.len() + 1 {
        if !board.sweep_in_progress() {
            return;
        }
        tick_once(board);
    }
    assert!(!board.sweep_in_progress(), "sweep did not finish");
}

/// Builds a board and finishes its sweep.
pub fn swept_board(tasks: &[&str]) -> (Board<TestSurface>, Rc<std::cell::Cell<u32>>) {
    let (mut board, clicks) = make_board(tasks);
    run_sweep(&mut board);
    clicks.set(0);
    (board, clicks)
}

/// Layout-unit center of a cell, for pointer commands.
pub fn cell_center(board: &Board<TestSurface>, index: usize) -> (f32, f32) {
    let cell = &board.cells()[index];
    let layout = board.layout();
    (
        cell.x + layout.cell_width / 2.0,
        cell.y + layout.cell_height / 2.0,
    )
}

/// Clicks the center of a cell.
pub fn click_cell(board: &mut Board<TestSurface>, index: usize) {
    let (x, y) = cell_center(board, index);
    board.on_click(x, y);
}

/// Hovers the center of a cell.
pub fn hover_cell(board: &mut Board<TestSurface>, index: usize) {
    let (x, y) = cell_center(board, index);
    board.on_hover(x, y);
}

/// Collects the settled characters of a cell index range as a string, using
/// `_` for blanks.
pub fn targets(board: &Board<TestSurface>, range: std::ops::Range<usize>) -> String {
    range
        .map(|i| board.cells()[i].target_char.unwrap_or('_'))
        .collect()
}
