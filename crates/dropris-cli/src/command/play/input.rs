use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use dropris_engine::FrameInput;

/// Collects key events between frames into a [`FrameInput`].
///
/// - Left / Right: shift one column (the last one pressed in a frame wins)
/// - Up: rotate
/// - Down: fast drop while held
/// - q / Esc / Ctrl-C: quit
///
/// Most terminals only report key presses and repeats, never releases, so
/// Down counts as held until `hold_grace` after its latest press or repeat.
/// A release event, where the terminal sends one, ends the hold at once.
#[derive(Debug)]
pub struct InputState {
    dx: i32,
    rotate: bool,
    drop_pressed_at: Option<Instant>,
    hold_grace: Duration,
    quit: bool,
}

impl InputState {
    pub fn new(hold_grace: Duration) -> Self {
        Self {
            dx: 0,
            rotate: false,
            drop_pressed_at: None,
            hold_grace,
            quit: false,
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    pub fn handle_event(&mut self, event: &Event, now: Instant) {
        if let Event::Key(key) = event {
            self.handle_key(*key, now);
        }
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.kind == KeyEventKind::Release {
            if key.code == KeyCode::Down {
                self.drop_pressed_at = None;
            }
            return;
        }
        match key.code {
            KeyCode::Left => self.dx = -1,
            KeyCode::Right => self.dx = 1,
            KeyCode::Up => self.rotate = true,
            KeyCode::Down => self.drop_pressed_at = Some(now),
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit = true,
            _ => {}
        }
    }

    /// Returns the input for the frame starting at `now` and clears the
    /// one-shot parts (shift and rotate).
    pub fn take_frame_input(&mut self, now: Instant) -> FrameInput {
        let accelerate = self
            .drop_pressed_at
            .is_some_and(|at| now.saturating_duration_since(at) <= self.hold_grace);
        let input = FrameInput {
            dx: self.dx,
            rotate: self.rotate,
            accelerate,
        };
        self.dx = 0;
        self.rotate = false;
        input
    }
}
