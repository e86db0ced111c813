//! Game engine logic and state management.
//!
//! - [`PieceController`] - Falling piece state: spawn, move, rotate, gravity tick, locking
//! - [`GameSession`] - Frame-by-frame driver owning the grid, the controller and the tick timer
//! - [`PieceSeed`] - Seed for deterministic shape generation
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`] from a [`GameConfig`](crate::GameConfig) and a seed
//! 2. Each frame, call [`GameSession::update`] with the frame's input and elapsed time
//! 3. The session moves/rotates the piece, applies gravity once the tick delay
//!    has passed, and compacts full rows
//! 4. Stop when [`GameSession::is_game_over`] reports true
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use dropris_engine::{FrameInput, GameConfig, GameSession, PieceSeed};
//!
//! let mut session = GameSession::new(&GameConfig::default(), PieceSeed::from_u128(7)).unwrap();
//!
//! session.update(FrameInput { dx: -1, ..FrameInput::IDLE }, Duration::from_millis(16));
//! session.update(FrameInput::IDLE, Duration::from_millis(400));
//!
//! assert!(!session.is_game_over());
//! ```

pub use self::{piece_controller::*, piece_seed::*, session::*};

mod piece_controller;
mod piece_seed;
mod session;
