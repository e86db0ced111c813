//! Frame-driven terminal runtime.
//!
//! [`Runtime::run`] owns the terminal and repeats one frame at a time until
//! the [`App`] asks to exit:
//!
//! 1. measure the time since the previous frame with a [`FrameClock`]
//! 2. hand every pending terminal event to [`App::handle_event`]
//! 3. call [`App::update`] with the measured time
//! 4. draw with [`App::draw`]
//! 5. wait for the next frame, waking early on input

pub use self::{app::App, frame_clock::FrameClock, runtime::Runtime};

mod app;
mod frame_clock;
mod runtime;
