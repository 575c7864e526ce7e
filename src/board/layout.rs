//! Grid geometry: how many flaps fit the viewport, and how big each one is.
//!
//! All dimensions are in layout units (terminal character cells, as `f32`).
//! Widths divide the viewport exactly: the configured flap width is an ideal,
//! and the actual width stretches so `columns * cell_width == viewport_width`
//! with no remainder. The same exact-fit rule applies vertically to the rows
//! that were derived from the viewport height.
//!
//! The grid can be taller than the viewport: tasks that do not fit below the
//! clock/date header append extra rows, and a fixed margin of empty rows is
//! always kept at the bottom so a new task has somewhere to go.

/// Visual aspect ratio of a split flap (height / width).
pub const FLAP_ASPECT: f32 = 1.4;

/// A terminal character cell is roughly twice as tall as it is wide, so flap
/// heights measured in rows are scaled down by this factor.
pub const TERMINAL_CHAR_ASPECT: f32 = 2.0;

/// Empty rows always appended below the last task.
pub const MARGIN_ROWS: usize = 3;

/// Computed grid geometry for one board instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardLayout {
    /// Number of flap columns.
    pub columns: usize,
    /// Number of flap rows, including task overflow and the bottom margin.
    pub rows: usize,
    /// Exact flap width in layout units.
    pub cell_width: f32,
    /// Exact flap height in layout units.
    pub cell_height: f32,
    /// True when clock and date together do not fit on the first row, pushing
    /// the date down to its own row.
    pub date_on_new_line: bool,
    /// First grid row occupied by tasks (2, or 3 when the date gets its own
    /// row).
    pub tasks_starting_row: usize,
}

impl BoardLayout {
    /// Computes the grid for a viewport, a target flap width, and the current
    /// task content.
    ///
    /// `display_tasks` must already carry their numeric prefixes, since the
    /// prefix characters occupy grid cells and count toward reflow.
    ///
    /// Degenerate viewports (too narrow for one flap, or too short for one
    /// row) are the caller's responsibility; the shell guarantees a minimum
    /// terminal size before building a board.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn compute(
        viewport_width: f32,
        viewport_height: f32,
        target_cell_width: f32,
        display_tasks: &[String],
        clock: &str,
        date: &str,
    ) -> Self {
        let columns = ((viewport_width / target_cell_width).floor() as usize).max(1);
        let cell_width = viewport_width / columns as f32;

        let desired_cell_height = cell_width * FLAP_ASPECT / TERMINAL_CHAR_ASPECT;
        let default_rows = ((viewport_height / desired_cell_height).floor() as usize).max(1);
        let cell_height = viewport_height / default_rows as f32;

        let date_on_new_line = clock.chars().count() + date.chars().count() > columns;
        let tasks_starting_row = if date_on_new_line { 3 } else { 2 };

        let needed: usize = display_tasks
            .iter()
            .map(|task| rows_needed(task.chars().count(), columns))
            .sum();
        let available = default_rows.saturating_sub(tasks_starting_row);
        let additional_rows = needed.saturating_sub(available);

        Self {
            columns,
            rows: default_rows + additional_rows + MARGIN_ROWS,
            cell_width,
            cell_height,
            date_on_new_line,
            tasks_starting_row,
        }
    }

    /// Total cell count of the grid.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.columns * self.rows
    }
}

/// Display rows required by a task of `len` characters on a grid of
/// `columns`, accounting for the 2 filler cells that indent every wrapped
/// continuation line.
///
/// The indent cells themselves consume width, which can push the line count
/// up once more; a single re-evaluation is enough because the indent count
/// is derived from the unindented row count.
#[must_use]
pub fn rows_needed(len: usize, columns: usize) -> usize {
    if columns == 0 {
        return 0;
    }
    let indented_rows = len.div_ceil(columns).saturating_sub(1);
    (len + indented_rows * 2).div_ceil(columns)
}
