//! CLI argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;

/// Flapdeck - a split-flap departure board for your to-do list.
///
/// Shows a live clock, the date, and your tasks on an animated board.
/// Click a cell and type to edit; press Enter to commit.
#[derive(Parser, Debug)]
#[command(name = "flapdeck", version, about, long_about = None)]
pub struct Args {
    /// Path to the tasks file (default: .flapdeck/tasks.json in the working
    /// directory)
    pub tasks_file: Option<PathBuf>,

    /// Start with the tick sound muted (double-click toggles it at runtime)
    #[arg(long)]
    pub muted: bool,

    /// Animation frame rate
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Ideal flap width in terminal columns; the actual width stretches so
    /// flaps fill the terminal exactly
    #[arg(long, default_value_t = 5.0)]
    pub cell_width: f32,
}
