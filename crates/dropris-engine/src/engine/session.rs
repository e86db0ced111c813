use std::time::Duration;

use rand::Rng;
use rand_pcg::Pcg32;

use crate::{
    ConfigError, GameConfig,
    core::{
        grid::Grid,
        piece::{CellPosition, Piece, ShapeKind},
    },
};

use super::{
    PieceSeed,
    piece_controller::{PieceController, TickOutcome},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    GameOver,
}

/// Player input collected over one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Horizontal shift, -1, 0 or +1. Larger values are clamped.
    pub dx: i32,
    pub rotate: bool,
    /// Use the fast tick delay for this frame.
    pub accelerate: bool,
}

impl FrameInput {
    pub const IDLE: Self = Self {
        dx: 0,
        rotate: false,
        accelerate: false,
    };
}

/// What happened during one [`GameSession::update`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub moved: bool,
    pub rotated: bool,
    pub tick: Option<TickOutcome>,
    pub cleared_rows: usize,
}

/// Running totals for a session.
///
/// These are counters for logs and the exit summary, not a score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    frames: u64,
    ticks: u64,
    locked_pieces: u64,
    cleared_rows: u64,
}

impl SessionStats {
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    #[must_use]
    pub fn locked_pieces(&self) -> u64 {
        self.locked_pieces
    }

    #[must_use]
    pub fn cleared_rows(&self) -> u64 {
        self.cleared_rows
    }
}

/// A game from the first piece to game over.
///
/// Owns the grid, the piece controller and the gravity timer, and applies one
/// frame of input at a time in a fixed order:
///
/// 1. add the frame's elapsed time to the timer
/// 2. shift the piece if `dx` is non-zero
/// 3. rotate the piece if requested
/// 4. if the timer exceeds the tick delay (the fast delay while
///    `accelerate` is set), apply gravity and reset the timer
/// 5. compact full rows
/// 6. switch to [`SessionState::GameOver`] if the controller reports game end
///
/// The clock is not read here; callers pass the elapsed time, which keeps the
/// session deterministic.
#[derive(Debug, Clone)]
pub struct GameSession<R = Pcg32> {
    grid: Grid,
    controller: PieceController<R>,
    state: SessionState,
    stats: SessionStats,
    timer: Duration,
    tick_delay: Duration,
    fast_tick_delay: Duration,
}

impl GameSession<Pcg32> {
    /// Creates a session whose shapes are drawn from `seed`.
    pub fn new(config: &GameConfig, seed: PieceSeed) -> Result<Self, ConfigError> {
        Self::with_rng(config, seed.rng())
    }
}

impl<R> GameSession<R>
where
    R: Rng,
{
    /// Like [`Self::new`], but with any random source.
    pub fn with_rng(config: &GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let controller = PieceController::new(config.grid, rng)
            .with_rotation_snapshot(config.rotation_snapshot);
        Ok(Self::from_parts(config, Grid::new(config.grid), controller))
    }

    fn from_parts(config: &GameConfig, grid: Grid, controller: PieceController<R>) -> Self {
        Self {
            grid,
            controller,
            state: SessionState::Playing,
            stats: SessionStats::default(),
            timer: Duration::ZERO,
            tick_delay: config.tick_delay(),
            fast_tick_delay: config.fast_tick_delay(),
        }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn active_cells(&self) -> &[CellPosition; 4] {
        self.controller.active_cells()
    }

    #[must_use]
    pub fn active_piece(&self) -> &Piece {
        self.controller.active_piece()
    }

    #[must_use]
    pub fn active_kind(&self) -> ShapeKind {
        self.controller.active_piece().kind()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    #[must_use]
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Applies one frame of input after `elapsed` time has passed.
    ///
    /// Does nothing once the game is over.
    pub fn update(&mut self, input: FrameInput, elapsed: Duration) -> FrameReport {
        let mut report = FrameReport::default();
        if self.is_game_over() {
            return report;
        }
        self.stats.frames += 1;
        self.timer += elapsed;

        let dx = input.dx.clamp(-1, 1);
        if dx != 0 {
            report.moved = self.controller.move_horizontal(&self.grid, dx);
        }
        if input.rotate {
            report.rotated = self.controller.rotate(&self.grid);
        }

        let delay = if input.accelerate {
            self.fast_tick_delay
        } else {
            self.tick_delay
        };
        if self.timer > delay {
            let outcome = self.controller.time_tick(&mut self.grid);
            self.stats.ticks += 1;
            if outcome.is_locked() {
                self.stats.locked_pieces += 1;
            }
            report.tick = Some(outcome);
            self.timer = Duration::ZERO;
        }

        report.cleared_rows = self.grid.compact_rows();
        self.stats.cleared_rows += report.cleared_rows as u64;

        if self.controller.is_game_end() {
            self.state = SessionState::GameOver;
            tracing::info!(
                frames = self.stats.frames,
                locked_pieces = self.stats.locked_pieces,
                cleared_rows = self.stats.cleared_rows,
                "session over"
            );
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;

    use crate::{GridSize, RotationSnapshot};

    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn session_with(kind: ShapeKind, config: &GameConfig) -> GameSession<Pcg32> {
        let controller =
            PieceController::with_first_shape(config.grid, Pcg32::seed_from_u64(3), kind)
                .with_rotation_snapshot(config.rotation_snapshot);
        GameSession::from_parts(config, Grid::new(config.grid), controller)
    }

    fn session(kind: ShapeKind) -> GameSession<Pcg32> {
        session_with(kind, &GameConfig::default())
    }

    fn xs(session: &GameSession<Pcg32>) -> Vec<i32> {
        session.active_cells().iter().map(|c| c.x()).collect()
    }

    fn ys(session: &GameSession<Pcg32>) -> Vec<i32> {
        session.active_cells().iter().map(|c| c.y()).collect()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = GameConfig {
            grid: GridSize {
                rows: 3,
                columns: 10,
            },
            ..GameConfig::default()
        };
        assert!(GameSession::new(&config, PieceSeed::from_u128(1)).is_err());
    }

    #[test]
    fn test_same_seed_same_game() {
        let config = GameConfig::default();
        let seed = PieceSeed::from_u128(0xfeed);
        let mut a = GameSession::new(&config, seed).unwrap();
        let mut b = GameSession::new(&config, seed).unwrap();
        for i in 0..600 {
            let input = FrameInput {
                dx: [-1, 0, 1][i % 3],
                rotate: i % 7 == 0,
                accelerate: true,
            };
            assert_eq!(a.update(input, FRAME), b.update(input, FRAME));
            assert_eq!(a.active_cells(), b.active_cells());
        }
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.stats(), b.stats());
    }

    #[test]
    fn test_tick_requires_timer_strictly_above_delay() {
        let mut s = session(ShapeKind::O);
        let report = s.update(FrameInput::IDLE, Duration::from_millis(300));
        assert_eq!(report.tick, None);
        assert_eq!(ys(&s), [0, 0, 1, 1]);

        let report = s.update(FrameInput::IDLE, Duration::from_millis(1));
        assert_eq!(report.tick, Some(TickOutcome::Fell));
        assert_eq!(ys(&s), [1, 1, 2, 2]);

        // Timer was reset.
        let report = s.update(FrameInput::IDLE, Duration::from_millis(200));
        assert_eq!(report.tick, None);
    }

    #[test]
    fn test_accelerate_uses_fast_delay() {
        let mut s = session(ShapeKind::O);
        let fast = FrameInput {
            accelerate: true,
            ..FrameInput::IDLE
        };
        assert_eq!(s.update(fast, Duration::from_millis(40)).tick, None);
        assert_eq!(
            s.update(fast, Duration::from_millis(20)).tick,
            Some(TickOutcome::Fell)
        );
        // Releasing the key keeps the accumulated time but compares against
        // the normal delay again.
        assert_eq!(s.update(FrameInput::IDLE, Duration::from_millis(60)).tick, None);
        assert_eq!(s.stats().ticks(), 1);
    }

    #[test]
    fn test_move_then_rotate_then_tick_order() {
        let mut s = session(ShapeKind::I);
        let input = FrameInput {
            dx: -1,
            rotate: true,
            accelerate: false,
        };
        let report = s.update(input, Duration::from_millis(301));
        assert!(report.moved);
        assert!(report.rotated);
        assert_eq!(report.tick, Some(TickOutcome::Fell));
        // I spawns at x = 5, rows -1..=2. Shift to x = 4, rotate about (4, 0)
        // into row 0, then fall to row 1.
        assert_eq!(xs(&s), [5, 4, 3, 2]);
        assert_eq!(ys(&s), [1, 1, 1, 1]);
    }

    #[test]
    fn test_dx_is_clamped() {
        let mut s = session(ShapeKind::O);
        let report = s.update(
            FrameInput {
                dx: -5,
                ..FrameInput::IDLE
            },
            FRAME,
        );
        assert!(report.moved);
        assert_eq!(xs(&s), [3, 4, 3, 4]);
    }

    #[test]
    fn test_rotation_policy_from_config() {
        let config = GameConfig {
            rotation_snapshot: RotationSnapshot::Fresh,
            ..GameConfig::default()
        };
        let mut s = session_with(ShapeKind::I, &config);
        for _ in 0..5 {
            s.update(
                FrameInput {
                    dx: 1,
                    ..FrameInput::IDLE
                },
                FRAME,
            );
        }
        assert_eq!(xs(&s), [9, 9, 9, 9]);
        let before = *s.active_cells();
        let report = s.update(
            FrameInput {
                rotate: true,
                ..FrameInput::IDLE
            },
            FRAME,
        );
        assert!(!report.rotated);
        assert_eq!(s.active_cells(), &before);
    }

    #[test]
    fn test_full_row_is_cleared_after_lock() {
        let config = GameConfig {
            grid: GridSize::new(4, 4).unwrap(),
            ..GameConfig::default()
        };
        let mut s = session_with(ShapeKind::O, &config);
        // Bottom row already holds two cells on the left.
        s.grid
            .lock(&[(0, 3), (1, 3), (0, 3), (1, 3)].map(|(x, y)| CellPosition::new(x, y)));

        // O spawns at columns 1-2; move it right to columns 2-3.
        s.update(
            FrameInput {
                dx: 1,
                ..FrameInput::IDLE
            },
            FRAME,
        );
        assert_eq!(xs(&s), [2, 3, 2, 3]);

        let tick = Duration::from_millis(301);
        assert_eq!(s.update(FrameInput::IDLE, tick).tick, Some(TickOutcome::Fell));
        assert_eq!(s.update(FrameInput::IDLE, tick).tick, Some(TickOutcome::Fell));
        let report = s.update(FrameInput::IDLE, tick);
        assert!(report.tick.unwrap().is_locked());
        assert_eq!(report.cleared_rows, 1);

        // Row 3 cleared; the O's upper half shifted down into it.
        assert_eq!(s.grid().row(3).unwrap(), &[false, false, true, true]);
        assert_eq!(s.grid().occupied_count(), 2);
        assert_eq!(s.stats().cleared_rows(), 1);
        assert_eq!(s.stats().locked_pieces(), 1);
        assert!(!s.is_game_over());
    }

    #[test]
    fn test_game_over_stops_updates() {
        let mut s = session(ShapeKind::O);
        // Columns 4 and 5 blocked from row 1 down.
        for y in 1..20 {
            s.grid.lock(&[(4, y), (5, y), (4, y), (5, y)].map(|(x, y)| CellPosition::new(x, y)));
        }
        let report = s.update(FrameInput::IDLE, Duration::from_millis(301));
        assert_eq!(report.tick, Some(TickOutcome::Stalled));
        assert!(s.is_game_over());
        assert_eq!(s.state(), SessionState::GameOver);

        let frames = s.stats().frames();
        let report = s.update(
            FrameInput {
                dx: -1,
                ..FrameInput::IDLE
            },
            Duration::from_secs(1),
        );
        assert_eq!(report, FrameReport::default());
        assert_eq!(s.stats().frames(), frames);
    }

    #[test]
    fn test_random_play_never_leaves_piece_in_collision() {
        // The shared rotation snapshot can restore a stale position, so the
        // invariant only holds with fresh snapshots. New pieces are not
        // checked at spawn, so skip frames where the spawn rows are in use.
        let config = GameConfig {
            rotation_snapshot: RotationSnapshot::Fresh,
            ..GameConfig::default()
        };
        let mut s = GameSession::new(&config, PieceSeed::from_u128(42)).unwrap();
        let mut rng = Pcg32::seed_from_u64(5);
        while !s.is_game_over() && s.stats().frames() < 20_000 {
            let input = FrameInput {
                dx: rng.random_range(-1..=1),
                rotate: rng.random_bool(0.2),
                accelerate: rng.random_bool(0.8),
            };
            s.update(input, FRAME);
            if s.is_game_over() {
                break;
            }
            let spawn_rows_clear = (0..4).all(|y| s.grid().row(y).unwrap().iter().all(|&c| !c));
            if !spawn_rows_clear {
                continue;
            }
            for &cell in s.active_cells() {
                assert!((0..10).contains(&cell.x()), "{cell:?}");
                assert!(cell.y() < 20, "{cell:?}");
                assert!(!s.grid().is_occupied(cell), "{cell:?}");
            }
        }
    }
}
