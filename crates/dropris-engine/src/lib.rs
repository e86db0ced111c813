//! Game rules for a falling-block puzzle.
//!
//! The crate is split the same way the game is played:
//!
//! - [`core`] holds plain data: the occupancy [`Grid`], cell positions and the
//!   seven [`ShapeKind`] templates.
//! - [`engine`] drives that data: the [`PieceController`] moves, rotates and
//!   locks the falling piece, and [`GameSession`] turns per-frame input and
//!   elapsed time into controller calls.
//! - [`config`] describes grid dimensions and tick timing.
//!
//! Nothing here touches a terminal, a clock or a global random source. Time is
//! passed into [`GameSession::update`] and randomness is injected as an
//! [`rand::Rng`], so every rule is reproducible in tests.

pub use self::{config::*, core::*, engine::*};

pub mod config;
pub mod core;
pub mod engine;
