use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::{App, FrameClock};

/// TUI application runtime.
///
/// Manages the frame loop and executes applications that implement the `App` trait.
#[derive(Debug)]
pub struct Runtime {
    clock: FrameClock,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    /// Creates a new Runtime running at [`FrameClock::DEFAULT_RATE`] frames per second.
    #[must_use]
    pub fn new() -> Self {
        Self {
            clock: FrameClock::from_rate(FrameClock::DEFAULT_RATE, Instant::now()),
        }
    }

    /// Sets the frame rate (Hz, frames per second).
    pub fn set_frame_rate(&mut self, rate: f64) {
        self.clock.set_frame_rate(rate);
    }

    /// Runs the application.
    ///
    /// 1. Calls `app.init()` for initialization
    /// 2. Repeats frames until `app.should_exit()` returns true
    ///    - drains pending terminal events into `app.handle_event()`
    ///    - calls `app.update()` with the time since the previous frame
    ///    - calls `app.draw()`
    ///
    /// Exit requests are honored immediately, even in the middle of a frame's
    /// events.
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);
        tracing::debug!(interval = ?self.clock.frame_interval(), "starting frame loop");

        ratatui::run(|terminal| {
            self.clock.restart(Instant::now());
            while !app.should_exit() {
                let elapsed = self.clock.restart(Instant::now());

                while event::poll(Duration::ZERO)? {
                    app.handle_event(&mut self, event::read()?);
                    if app.should_exit() {
                        return Ok(());
                    }
                }

                app.update(&mut self, elapsed);
                terminal.draw(|f| app.draw(f))?;

                // Input arriving early starts the next frame early; the
                // elapsed time passed to `update` stays accurate either way.
                event::poll(self.clock.time_until_next_frame(Instant::now()))?;
            }
            Ok(())
        })
    }
}
