//! Renders the painted flap grid into the terminal frame.
//!
//! Each flap occupies a rectangle of terminal cells derived from the board's
//! fractional layout: edges are quantized per flap so the grid always spans
//! the full viewport width regardless of rounding. The rightmost column and
//! bottom row of every flap rectangle are left as background, forming the
//! gaps between flaps; the face is shaded darker above the fold and lighter
//! below it, with the glyph centered on the face.
//!
//! The grid can be taller than the terminal; `scroll` shifts the visible
//! window down by whole terminal rows.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

use crate::board::BoardLayout;
use crate::tui::canvas::GridCanvas;
use crate::tui::theme::Theme;

/// One frame's view of the board.
pub struct BoardWidget<'a> {
    pub canvas: &'a GridCanvas,
    pub layout: &'a BoardLayout,
    pub theme: &'a Theme,
    /// Terminal rows scrolled off the top.
    pub scroll: u16,
}

impl Widget for BoardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                let cell = &mut buf[(x, y)];
                cell.set_symbol(" ");
                cell.set_bg(self.theme.bg);
            }
        }

        for row in 0..self.layout.rows {
            for col in 0..self.layout.columns {
                self.render_flap(row, col, area, buf);
            }
        }
    }
}

impl BoardWidget<'_> {
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn render_flap(&self, row: usize, col: usize, area: Rect, buf: &mut Buffer) {
        let Some(painted) = self.canvas.get(row, col) else {
            return;
        };

        // Quantized flap rectangle, relative to the board origin.
        let x0 = (col as f32 * self.layout.cell_width).round() as i32;
        let x1 = ((col + 1) as f32 * self.layout.cell_width).round() as i32;
        let y0 = (row as f32 * self.layout.cell_height).round() as i32 - i32::from(self.scroll);
        let y1 =
            ((row + 1) as f32 * self.layout.cell_height).round() as i32 - i32::from(self.scroll);

        // The last column and row of the rectangle stay background, forming
        // the gap between flaps.
        let body_right = if x1 - x0 > 1 { x1 - 1 } else { x1 };
        let body_bottom = if y1 - y0 > 1 { y1 - 1 } else { y1 };
        if body_right <= x0 || body_bottom <= y0 {
            return;
        }

        let fold = y0 + (body_bottom - y0) / 2;
        for y in y0.max(0)..body_bottom {
            let Some(screen_y) = to_screen(y, area.top(), area.bottom()) else {
                continue;
            };
            let shade = if y <= fold {
                self.theme.face_top(painted.style)
            } else {
                self.theme.face_bottom(painted.style)
            };
            for x in x0.max(0)..body_right {
                let Some(screen_x) = to_screen(x, area.left(), area.right()) else {
                    continue;
                };
                buf[(screen_x, screen_y)].set_bg(shade);
            }
        }

        // Glyph, centered on the face.
        if let Some(ch) = painted.ch
            && ch != ' '
        {
            let gx = x0 + (body_right - x0) / 2;
            let gy = y0 + (body_bottom - y0) / 2;
            if let (Some(screen_x), Some(screen_y)) = (
                to_screen(gx, area.left(), area.right()),
                to_screen(gy, area.top(), area.bottom()),
            ) {
                let cell = &mut buf[(screen_x, screen_y)];
                cell.set_symbol(ch.encode_utf8(&mut [0u8; 4]));
                cell.set_style(self.theme.glyph_style(painted.settled));
            }
        }
    }
}

/// Maps a board-relative coordinate into the render area, or `None` when it
/// falls outside.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_screen(value: i32, low: u16, high: u16) -> Option<u16> {
    if value < 0 {
        return None;
    }
    let screen = value as u16 + low;
    (screen < high).then_some(screen)
}
