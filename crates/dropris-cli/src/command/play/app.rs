use std::time::{Duration, Instant};

use crossterm::event::Event;
use dropris_engine::GameSession;
use ratatui::Frame;
use ratatui_runtime::{App, Runtime};

use crate::{command::play::input::InputState, ui::widgets::SessionDisplay};

#[derive(Debug)]
pub struct PlayApp {
    session: GameSession,
    input: InputState,
    fps: f64,
}

impl PlayApp {
    pub fn new(session: GameSession, fps: f64, hold_grace: Duration) -> Self {
        Self {
            session,
            input: InputState::new(hold_grace),
            fps,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_frame_rate(self.fps);
    }

    // The game closes as soon as it ends, like closing the window.
    fn should_exit(&self) -> bool {
        self.input.quit_requested() || self.session.is_game_over()
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: Event) {
        self.input.handle_event(&event, Instant::now());
    }

    fn update(&mut self, _runtime: &mut Runtime, elapsed: Duration) {
        let input = self.input.take_frame_input(Instant::now());
        let report = self.session.update(input, elapsed);
        if report.cleared_rows > 0 {
            tracing::debug!(cleared = report.cleared_rows, "rows cleared");
        }
    }

    fn draw(&self, frame: &mut Frame) {
        frame.render_widget(SessionDisplay::new(&self.session), frame.area());
    }
}
