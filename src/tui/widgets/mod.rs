//! Custom widgets for the TUI.

pub mod board;

pub use board::BoardWidget;
