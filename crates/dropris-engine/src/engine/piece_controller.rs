use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    GridSize,
    core::{
        grid::Grid,
        piece::{CellPosition, Piece, ShapeKind, coord},
    },
};

/// Where [`PieceController::rotate`] restores the piece from when the rotated
/// position collides.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RotationSnapshot {
    /// Restore from the snapshot shared with moves and gravity ticks.
    ///
    /// Rotation does not take a snapshot of its own, so a blocked rotation
    /// puts the piece back where the last move or tick found it. Before any
    /// move or tick the snapshot is four cells at (0, 0).
    #[default]
    Shared,
    /// Snapshot the piece immediately before rotating, so a blocked rotation
    /// always leaves the piece where it was.
    Fresh,
}

/// Result of a gravity tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TickOutcome {
    /// The piece moved down one row.
    Fell,
    /// The piece could not move down: its previous cells were written to the
    /// grid and a new piece spawned.
    Locked { locked: ShapeKind, next: ShapeKind },
    /// The piece could not move down and the game has ended. Nothing was
    /// locked and the piece stays at the blocked position.
    Stalled,
}

/// Owns the falling piece and every rule that moves it.
///
/// All operations validate the new position against the grid bounds and the
/// locked cells. A rejected move, rotation or tick never leaves the piece in
/// a colliding position, with one exception kept from the classic rules: once
/// the game has ended a blocked tick leaves the piece where it collided.
///
/// # Game end
///
/// The game-end flag is raised inside [`Self::check_collision`]: while walking
/// the four cells, once any cell has failed, every cell on row 1 from that
/// point on sets the flag. The flag never resets.
///
/// # Example
///
/// ```
/// use dropris_engine::{Grid, GridSize, PieceController, ShapeKind};
/// use rand::SeedableRng as _;
/// use rand_pcg::Pcg32;
///
/// let mut grid = Grid::new(GridSize::STANDARD);
/// let mut controller =
///     PieceController::with_first_shape(GridSize::STANDARD, Pcg32::seed_from_u64(1), ShapeKind::O);
///
/// assert!(controller.move_horizontal(&grid, -1));
/// assert!(controller.time_tick(&mut grid).is_fell());
/// assert!(!controller.is_game_end());
/// ```
#[derive(Debug, Clone)]
pub struct PieceController<R> {
    active: Piece,
    previous: [CellPosition; 4],
    game_end: bool,
    spawn_columns: usize,
    rotation_snapshot: RotationSnapshot,
    rng: R,
}

impl<R> PieceController<R>
where
    R: Rng,
{
    /// Creates a controller with a randomly chosen first piece.
    #[must_use]
    pub fn new(size: GridSize, mut rng: R) -> Self {
        let kind = rng.random();
        Self::with_first_shape(size, rng, kind)
    }

    /// Like [`Self::new`], but with a specific first piece.
    #[must_use]
    pub fn with_first_shape(size: GridSize, rng: R, kind: ShapeKind) -> Self {
        Self {
            active: Piece::spawn(kind, size.columns),
            previous: [CellPosition::default(); 4],
            game_end: false,
            spawn_columns: size.columns,
            rotation_snapshot: RotationSnapshot::default(),
            rng,
        }
    }

    #[must_use]
    pub fn with_rotation_snapshot(self, rotation_snapshot: RotationSnapshot) -> Self {
        Self {
            rotation_snapshot,
            ..self
        }
    }

    #[must_use]
    pub fn active_piece(&self) -> &Piece {
        &self.active
    }

    #[must_use]
    pub fn active_cells(&self) -> &[CellPosition; 4] {
        self.active.cells()
    }

    #[must_use]
    pub fn is_game_end(&self) -> bool {
        self.game_end
    }

    /// Replaces the falling piece with `kind` at the spawn position.
    pub fn spawn(&mut self, kind: ShapeKind) {
        self.active = Piece::spawn(kind, self.spawn_columns);
    }

    fn spawn_random(&mut self) -> ShapeKind {
        let kind = self.rng.random();
        self.spawn(kind);
        kind
    }

    fn take_snapshot(&mut self) {
        self.previous = *self.active.cells();
    }

    fn restore_snapshot(&mut self) {
        self.active = Piece::from_cells(self.active.kind(), self.previous);
    }

    /// Checks the falling piece against the grid bounds and locked cells.
    ///
    /// A cell fails when it is left of column 0, right of the last column or
    /// below the last row, or when the grid holds a locked cell there. Cells
    /// above the field never fail.
    ///
    /// Bounds come from `grid` alone. The size given at construction only
    /// decides where new pieces spawn.
    ///
    /// Also updates the game-end flag, see the type documentation.
    pub fn check_collision(&mut self, grid: &Grid) -> bool {
        let columns = coord(grid.columns());
        let rows = coord(grid.rows());

        let mut is_ok = true;
        for &cell in self.active.cells() {
            let inside = (0..columns).contains(&cell.x()) && cell.y() < rows;
            if !inside || grid.is_occupied(cell) {
                is_ok = false;
            }
            if !is_ok && cell.y() == 1 && !self.game_end {
                self.game_end = true;
                tracing::info!(
                    kind = %self.active.kind(),
                    x = cell.x(),
                    "piece blocked on row 1, game over"
                );
            }
        }
        is_ok
    }

    /// Shifts the piece `dx` columns, reverting all four cells if the new
    /// position collides.
    ///
    /// Returns whether the move was kept.
    pub fn move_horizontal(&mut self, grid: &Grid, dx: i32) -> bool {
        self.take_snapshot();
        self.active = self.active.translated(dx, 0);
        if self.check_collision(grid) {
            return true;
        }
        self.restore_snapshot();
        false
    }

    /// Rotates the piece a quarter turn around its pivot cell (index 1).
    ///
    /// When the rotated position collides the piece is restored according to
    /// the configured [`RotationSnapshot`].
    ///
    /// Returns whether the rotation was kept.
    pub fn rotate(&mut self, grid: &Grid) -> bool {
        if self.rotation_snapshot == RotationSnapshot::Fresh {
            self.take_snapshot();
        }
        self.active = self.active.rotated();
        if self.check_collision(grid) {
            return true;
        }
        self.restore_snapshot();
        false
    }

    /// Applies gravity: moves the piece down one row.
    ///
    /// If the lower position collides and the game has not ended, the piece's
    /// cells before the move are locked into `grid` and a random piece spawns.
    pub fn time_tick(&mut self, grid: &mut Grid) -> TickOutcome {
        self.take_snapshot();
        self.active = self.active.translated(0, 1);
        if self.check_collision(grid) {
            return TickOutcome::Fell;
        }
        if self.game_end {
            return TickOutcome::Stalled;
        }

        let locked = self.active.kind();
        grid.lock(&self.previous);
        let next = self.spawn_random();
        tracing::debug!(%locked, %next, "piece locked");
        TickOutcome::Locked { locked, next }
    }
}
