//! Tests for the board state machine.
//!
//! This module is organized into submodules by functionality:
//! - `helpers` - shared test surface, sound sink, and board builders
//! - `animation` - sweep, flip, and clock refresh behavior
//! - `editing` - typing, deletion, and commit scenarios
//! - `selection` - click, hover, and cursor navigation

#[allow(clippy::unwrap_used, clippy::expect_used)]
pub mod helpers;
