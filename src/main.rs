//! Flapdeck - a split-flap departure board for your to-do list.
//!
//! Entry point for the application.

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use ratatui::crossterm::event::{self, Event, KeyEventKind};

use flapdeck::app::App;
use flapdeck::cli::Args;
use flapdeck::tui::TerminalEventGuard;

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize the terminal with the crossterm backend
    let mut terminal = ratatui::init();

    // Run the application
    let result = run_app(&mut terminal, &args);

    // Restore the terminal
    ratatui::restore();

    result
}

fn run_app(terminal: &mut ratatui::DefaultTerminal, args: &Args) -> Result<()> {
    // Enable mouse capture for flap selection and hover previews. The guard
    // ensures cleanup even if the application panics.
    //
    // IMPORTANT: This must be initialized inside run_app (after ratatui has
    // set up the terminal) because terminal initialization can reset
    // terminal flags.
    let _event_guard = TerminalEventGuard::new();

    let size = terminal.size()?;
    let mut app = App::new(args, size.width, size.height)?;

    // The event poll timeout doubles as the frame pacing: the board
    // measures real elapsed time, so late frames never skew animation.
    let frame_interval = Duration::from_millis(u64::from(1000 / args.fps.clamp(1, 1000)));
    let mut last_tick = Instant::now();

    // Main event loop
    loop {
        // Render the current frame
        terminal.draw(|frame| app.render(frame))?;

        // Poll for events up to one frame's worth of time
        let timeout = frame_interval.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key);
                }
                Event::Mouse(mouse) => {
                    app.handle_mouse(mouse);
                }
                Event::Resize(width, height) => {
                    app.handle_resize(width, height);
                }
                _ => {}
            }
        }

        // Advance animations by the measured elapsed time
        let now = Instant::now();
        app.tick(now.duration_since(last_tick));
        last_tick = now;

        // Check if we should quit
        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
