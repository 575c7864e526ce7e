//! Shared test utilities for app tests.

use std::time::Duration;

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use tempfile::TempDir;

use crate::app::App;
use crate::board::CHAR_RAMP;
use crate::cli::Args;
use crate::fs::{FlapdeckPaths, save_tasks};

/// Muted, 60 fps, 5-column flaps.
pub fn test_args() -> Args {
    Args {
        tasks_file: None,
        muted: true,
        fps: 60,
        cell_width: 5.0,
    }
}

/// Builds an app over a temp directory seeded with `tasks`, on an 80x24
/// terminal (16-column grid, tasks starting on row 3).
pub fn temp_app(tasks: &[&str]) -> (TempDir, App) {
    let dir = TempDir::new().expect("temp dir");
    let paths = FlapdeckPaths::new(dir.path());
    let tasks: Vec<String> = tasks.iter().map(ToString::to_string).collect();
    save_tasks(&paths, &tasks).expect("seed tasks");
    let app = App::new_with_paths(&test_args(), 80, 24, paths).expect("app");
    (dir, app)
}

/// Drives the opening sweep to completion so input is accepted.
pub fn finish_sweep(app: &mut App) {
    for _ in 0..=CHAR_RAMP.len() + 1 {
        app.tick(Duration::from_millis(17));
    }
    assert!(!app.board().sweep_in_progress());
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

pub fn left_click(column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

pub fn mouse_move(column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::Moved,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

pub fn wheel(down: bool) -> MouseEvent {
    MouseEvent {
        kind: if down {
            MouseEventKind::ScrollDown
        } else {
            MouseEventKind::ScrollUp
        },
        column: 0,
        row: 0,
        modifiers: KeyModifiers::NONE,
    }
}
