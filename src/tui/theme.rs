//! Centralized theme and styling.

use ratatui::style::{Color, Modifier, Style};

use crate::board::CellStyle;

/// Application theme with consistent colors and styles.
///
/// Each flap face is drawn in two shades, a darker top half and a lighter
/// bottom half, to suggest the fold of a split flap.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background behind and between flaps.
    pub bg: Color,
    /// Plain flap face.
    pub flap: Color,
    /// Face of the selected (cursor) flap.
    pub selected: Color,
    /// Face of task-number prefix flaps.
    pub task_number: Color,
    /// Face of flaps in the task currently being edited.
    pub edited_task: Color,
    /// Glyph color for a settled, non-blank character.
    pub glyph_settled: Color,
    /// Glyph color while a flap is mid-animation or blank.
    pub glyph_transient: Color,
    /// Warning line color (e.g. persistence unavailable).
    pub warning: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: Color::Rgb(0, 0, 0),
            flap: Color::Rgb(65, 65, 85),
            selected: Color::Rgb(193, 210, 210),
            task_number: Color::Rgb(102, 179, 212),
            edited_task: Color::Rgb(161, 184, 201),
            glyph_settled: Color::Rgb(255, 179, 0),
            glyph_transient: Color::Rgb(148, 148, 148),
            warning: Color::Yellow,
        }
    }
}

impl Theme {
    /// Face color for a cell style, before shading.
    #[must_use]
    pub fn face(&self, style: CellStyle) -> Color {
        match style {
            CellStyle::Normal => self.flap,
            CellStyle::TaskNumber => self.task_number,
            CellStyle::Selected => self.selected,
            CellStyle::EditedTask => self.edited_task,
        }
    }

    /// Darker shade for the top half of a flap face.
    #[must_use]
    pub fn face_top(&self, style: CellStyle) -> Color {
        shade(self.face(style), 0.55)
    }

    /// Lighter shade for the bottom half of a flap face.
    #[must_use]
    pub fn face_bottom(&self, style: CellStyle) -> Color {
        shade(self.face(style), 0.75)
    }

    /// Glyph style: settled characters glow amber, everything else stays
    /// muted.
    #[must_use]
    pub fn glyph_style(&self, settled: bool) -> Style {
        if settled {
            Style::default()
                .fg(self.glyph_settled)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.glyph_transient)
        }
    }

    /// Style for the one-line warning footer.
    #[must_use]
    pub fn warning_style(&self) -> Style {
        Style::default()
            .fg(self.warning)
            .add_modifier(Modifier::BOLD)
    }
}

/// Scales an RGB color toward black.
fn shade(color: Color, factor: f32) -> Color {
    match color {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Color::Rgb(r, g, b) => Color::Rgb(
            (f32::from(r) * factor) as u8,
            (f32::from(g) * factor) as u8,
            (f32::from(b) * factor) as u8,
        ),
        other => other,
    }
}
