//! TUI presentation layer.

pub mod canvas;
pub mod setup;
pub mod theme;
pub mod widgets;

pub use canvas::GridCanvas;
pub use setup::TerminalEventGuard;
pub use theme::Theme;
