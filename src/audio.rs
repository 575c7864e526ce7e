//! The mechanical click that accompanies flap movement.
//!
//! Audio is fire-and-forget: the board announces a tick and moves on.
//! Failures are swallowed; a board that cannot click still flips.

use std::io::Write;

/// A sink for the per-tick click cue.
pub trait TickSound {
    /// Plays one click. Implementations must not block the frame.
    fn play_tick(&mut self);
}

/// Clicks by ringing the terminal bell.
#[derive(Debug, Default)]
pub struct TerminalBell;

impl TerminalBell {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TickSound for TerminalBell {
    fn play_tick(&mut self) {
        let mut out = std::io::stdout();
        // BEL does not move the cursor, so it is safe mid-frame.
        let _ = out.write_all(b"\x07");
        let _ = out.flush();
    }
}

/// Muted sink.
#[derive(Debug, Default)]
pub struct Silent;

impl TickSound for Silent {
    fn play_tick(&mut self) {}
}

/// Builds the sound sink for the current mute setting.
#[must_use]
pub fn make_sound(muted: bool) -> Box<dyn TickSound> {
    if muted {
        Box::new(Silent)
    } else {
        Box::new(TerminalBell::new())
    }
}
