use std::time::Duration;

use crossterm::event::Event;
use ratatui::Frame;

use crate::Runtime;

/// Trait for frame-driven TUI applications.
///
/// Applications executed by `Runtime::run()` must implement this trait.
pub trait App {
    /// Initializes the application.
    ///
    /// Called at the start of `Runtime::run()`. Use this to configure the frame rate.
    fn init(&mut self, runtime: &mut Runtime);

    /// Returns whether the application should exit.
    ///
    /// Checked before every frame and after every event.
    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, mouse, resize, etc.).
    fn handle_event(&mut self, runtime: &mut Runtime, event: Event);

    /// Advances the application by one frame.
    ///
    /// `elapsed` is the time since the previous frame started.
    fn update(&mut self, runtime: &mut Runtime, elapsed: Duration);

    /// Draws the screen (called once per frame, after `update`).
    fn draw(&self, frame: &mut Frame);
}
