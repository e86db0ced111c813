use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// Position of a single cell on the grid.
///
/// # Coordinate System
///
/// - `x` is the column, increasing rightward
/// - `y` is the row, increasing downward; row 0 is the top visible row
/// - Coordinates are signed because freshly spawned pieces may reach above
///   the visible field (`y < 0`)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPosition {
    x: i32,
    y: i32,
}

impl CellPosition {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn x(self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(self) -> i32 {
        self.y
    }

    #[must_use]
    pub const fn translated(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Rotates this position a quarter turn around `pivot`.
    ///
    /// `(x, y) -> (px - (y - py), py + (x - px))`
    #[must_use]
    pub const fn rotated_about(self, pivot: Self) -> Self {
        Self::new(
            pivot.x - (self.y - pivot.y),
            pivot.y + (self.x - pivot.x),
        )
    }
}

/// Converts a grid dimension into the signed coordinate space.
#[must_use]
pub(crate) fn coord(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

/// The seven shapes, in template table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[repr(u8)]
pub enum ShapeKind {
    I = 0,
    Z = 1,
    S = 2,
    T = 3,
    L = 4,
    J = 5,
    O = 6,
}

impl Distribution<ShapeKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeKind {
        ShapeKind::ALL[rng.random_range(0..ShapeKind::LEN)]
    }
}

impl ShapeKind {
    /// Number of shapes (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        Self::I,
        Self::Z,
        Self::S,
        Self::T,
        Self::L,
        Self::J,
        Self::O,
    ];

    /// Returns the shape at `index` in the template table.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::LEN {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the four template offsets of this shape.
    ///
    /// Each offset addresses a cell in a box two columns wide:
    /// `x = offset % 2`, `y = offset / 2`.
    #[must_use]
    pub const fn template(self) -> [u8; 4] {
        SHAPE_TEMPLATES[self.index()]
    }
}

/// Template offsets, indexed by [`ShapeKind::index`].
///
/// ```text
/// 0 1
/// 2 3
/// 4 5
/// 6 7
/// ```
const SHAPE_TEMPLATES: [[u8; 4]; ShapeKind::LEN] = [
    [1, 3, 5, 7], // I
    [2, 4, 5, 7], // Z
    [3, 5, 4, 6], // S
    [3, 5, 4, 7], // T
    [2, 3, 5, 7], // L
    [3, 5, 7, 6], // J
    [2, 3, 4, 5], // O
];

/// A falling piece: a shape and its four occupied cells.
///
/// Cells keep template order. Cell index 1 is the rotation pivot.
/// Pieces are values; movement and rotation return new pieces and never
/// look at the grid.
///
/// # Example
///
/// ```
/// use dropris_engine::{CellPosition, Piece, ShapeKind};
///
/// let piece = Piece::spawn(ShapeKind::O, 10);
/// assert_eq!(
///     piece.cells(),
///     &[
///         CellPosition::new(4, 0),
///         CellPosition::new(5, 0),
///         CellPosition::new(4, 1),
///         CellPosition::new(5, 1),
///     ]
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: ShapeKind,
    cells: [CellPosition; 4],
}

impl Piece {
    /// Creates a piece at the spawn location of a grid `columns` wide.
    ///
    /// The two-column template is shifted so its left column lands on
    /// `columns / 2 - 1`, and lifted one row so that tall shapes start
    /// partially above the field.
    #[must_use]
    pub fn spawn(kind: ShapeKind, columns: usize) -> Self {
        let left = coord(columns / 2) - 1;
        let cells = kind.template().map(|offset| {
            let offset = i32::from(offset);
            CellPosition::new(offset % 2 + left, offset / 2 - 1)
        });
        Self { kind, cells }
    }

    #[must_use]
    pub const fn from_cells(kind: ShapeKind, cells: [CellPosition; 4]) -> Self {
        Self { kind, cells }
    }

    #[must_use]
    pub const fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[must_use]
    pub const fn cells(&self) -> &[CellPosition; 4] {
        &self.cells
    }

    #[must_use]
    pub const fn pivot(&self) -> CellPosition {
        self.cells[1]
    }

    #[must_use]
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            kind: self.kind,
            cells: self.cells.map(|cell| cell.translated(dx, dy)),
        }
    }

    /// Rotates all four cells a quarter turn around the pivot cell.
    #[must_use]
    pub fn rotated(&self) -> Self {
        let pivot = self.pivot();
        Self {
            kind: self.kind,
            cells: self.cells.map(|cell| cell.rotated_about(pivot)),
        }
    }

    #[must_use]
    pub fn contains(&self, pos: CellPosition) -> bool {
        self.cells.contains(&pos)
    }
}
