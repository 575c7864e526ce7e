//! Rendering boundary of the board core.
//!
//! The board never touches pixels or terminal buffers directly; it reports
//! "draw this character on this cell, with this intent" through [`Surface`]
//! and leaves the visuals to the implementation. The production surface is
//! [`crate::tui::GridCanvas`]; tests substitute a recording surface.

use super::cell::Cell;

/// Rendering intent for a cell redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    /// Plain flap face.
    Normal,
    /// Part of a task's numeric prefix.
    TaskNumber,
    /// The cell currently holding the cursor.
    Selected,
    /// Body cell of the task being edited.
    EditedTask,
}

/// A drawing surface the board paints cells onto.
///
/// Implementations are expected to be cheap per call: the sweep redraws the
/// entire grid once per animation tick.
pub trait Surface {
    /// Creates a surface sized for a `columns x rows` grid.
    fn new(columns: usize, rows: usize) -> Self;

    /// Wipes the whole surface; the sweep clears before redrawing all cells.
    fn clear(&mut self);

    /// Paints one cell. `ch` is the character to show (`None` for a blank
    /// face); `cell` carries position and settledness for the implementation
    /// to style with.
    fn draw_cell(&mut self, cell: &Cell, ch: Option<char>, style: CellStyle);
}
