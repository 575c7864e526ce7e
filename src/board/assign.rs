//! Task numbering and task-to-cell assignment.
//!
//! Tasks are shown with a zero-padded ordinal prefix ("01", "02", ...) baked
//! into the display string, so the prefix characters occupy grid cells like
//! any other text. Assignment walks the task list in order, reserving whole
//! rows per task (including reflow for wrapped lines) and stamping every cell
//! of the span with its owning task, relative row, and span start.

use super::cell::Cell;
use super::layout::rows_needed;

/// Ordinal prefix shown before a task, by task index: "01" for the first
/// task, widening naturally at the hundredth and thousandth.
#[must_use]
pub fn display_prefix(task_index: usize) -> String {
    format!("{:02}", task_index + 1)
}

/// Number of prefix cells a task occupies at the start of its first line.
#[must_use]
pub fn prefix_len(task_index: usize) -> usize {
    display_prefix(task_index).len()
}

/// Returns the task list with ordinal prefixes prepended.
#[must_use]
pub fn prepend_task_numbers(tasks: &[String]) -> Vec<String> {
    tasks
        .iter()
        .enumerate()
        .map(|(i, task)| format!("{}{task}", display_prefix(i)))
        .collect()
}

/// Assigns each display task a contiguous span of whole grid rows, starting
/// at `tasks_starting_row`, and stamps the span's cells with task metadata.
///
/// Spans are clipped to the grid; tasks are laid out strictly in order with
/// no gaps, and a cell belongs to at most one task.
pub fn assign_tasks_to_cells(
    cells: &mut [Cell],
    display_tasks: &[String],
    columns: usize,
    tasks_starting_row: usize,
) {
    if display_tasks.is_empty() {
        return;
    }

    let mut task_start_row = tasks_starting_row;
    for (task_number, task) in display_tasks.iter().enumerate() {
        let task_start_index = task_start_row * columns;
        let span_rows = rows_needed(task.chars().count(), columns);

        for r in 0..span_rows {
            let row_start_index = (task_start_row + r) * columns;
            for c in 0..columns {
                let Some(cell) = cells.get_mut(row_start_index + c) else {
                    continue;
                };
                cell.task_row_number = Some(r);
                cell.task = Some(task_number);
                cell.task_start_index = Some(task_start_index);
            }
        }
        task_start_row += span_rows;
    }
}
