use crate::{GridSize, core::piece::CellPosition};

/// Occupancy storage for locked cells.
///
/// The grid only knows which cells are occupied. Walls and the floor are not
/// stored; the [`PieceController`](crate::PieceController) checks bounds
/// before asking the grid, and every lookup here is bounds-safe on its own.
///
/// The grid changes in exactly two ways: [`Grid::lock`] marks a piece's final
/// cells occupied and [`Grid::compact_rows`] removes full rows.
///
/// # Example
///
/// ```
/// use dropris_engine::{CellPosition, Grid, GridSize};
///
/// let mut grid = Grid::new(GridSize::STANDARD);
/// let cells = [(4, 19), (5, 19), (4, 18), (5, 18)].map(|(x, y)| CellPosition::new(x, y));
/// grid.lock(&cells);
///
/// assert!(grid.is_occupied(CellPosition::new(5, 18)));
/// assert!(!grid.is_occupied(CellPosition::new(5, -1)));
/// assert_eq!(grid.compact_rows(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: GridSize,
    cells: Vec<bool>,
}

impl Grid {
    /// Creates an empty grid.
    ///
    /// # Panics
    ///
    /// Panics if `size` is rejected by [`GridSize::validate`].
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        if let Err(err) = size.validate() {
            panic!("invalid grid size: {err}");
        }
        Self {
            size,
            cells: vec![false; size.rows * size.columns],
        }
    }

    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.size.rows
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.size.columns
    }

    fn index(&self, pos: CellPosition) -> Option<usize> {
        let x = usize::try_from(pos.x()).ok()?;
        let y = usize::try_from(pos.y()).ok()?;
        (x < self.size.columns && y < self.size.rows).then(|| y * self.size.columns + x)
    }

    /// Returns whether `pos` holds a locked cell.
    ///
    /// Positions outside the grid, including the rows above it, are reported
    /// as unoccupied without touching storage.
    #[must_use]
    pub fn is_occupied(&self, pos: CellPosition) -> bool {
        self.index(pos).is_some_and(|i| self.cells[i])
    }

    /// Returns the cells of row `y`, top row first.
    #[must_use]
    pub fn row(&self, y: usize) -> Option<&[bool]> {
        (y < self.size.rows).then(|| &self.cells[y * self.size.columns..][..self.size.columns])
    }

    /// Returns an iterator over all rows, top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks_exact(self.size.columns)
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Marks each of `cells` occupied.
    ///
    /// The caller is responsible for having checked the placement. Cells
    /// outside the grid cannot be stored and are skipped.
    pub fn lock(&mut self, cells: &[CellPosition; 4]) {
        for &pos in cells {
            match self.index(pos) {
                Some(i) => self.cells[i] = true,
                None => tracing::warn!(
                    x = pos.x(),
                    y = pos.y(),
                    "skipping locked cell outside the grid"
                ),
            }
        }
    }

    fn is_row_full(&self, y: usize) -> bool {
        self.cells[y * self.size.columns..][..self.size.columns]
            .iter()
            .all(|&c| c)
    }

    /// Removes full rows and shifts the rows above them down.
    ///
    /// Rows are scanned bottom-up. Full rows are skipped; every other row is
    /// copied down by the number of full rows found below it so far. The
    /// vacated rows at the top are cleared.
    ///
    /// # Returns
    ///
    /// The number of rows removed.
    pub fn compact_rows(&mut self) -> usize {
        let columns = self.size.columns;
        let mut cleared = 0;
        for y in (0..self.size.rows).rev() {
            if self.is_row_full(y) {
                cleared += 1;
                continue;
            }
            if cleared > 0 {
                let src = y * columns;
                self.cells
                    .copy_within(src..src + columns, (y + cleared) * columns);
            }
        }
        self.cells[..cleared * columns].fill(false);
        if cleared > 0 {
            tracing::debug!(cleared, "compacted full rows");
        }
        cleared
    }

    #[cfg(test)]
    pub(crate) fn set(&mut self, pos: CellPosition, occupied: bool) {
        let i = self.index(pos).unwrap();
        self.cells[i] = occupied;
    }

    #[cfg(test)]
    pub(crate) fn fill_row(&mut self, y: usize) {
        let columns = self.size.columns;
        self.cells[y * columns..][..columns].fill(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: i32, y: i32) -> CellPosition {
        CellPosition::new(x, y)
    }

    fn snapshot(grid: &Grid) -> Vec<Vec<bool>> {
        grid.iter_rows().map(<[bool]>::to_vec).collect()
    }

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(GridSize::STANDARD);
        assert_eq!(grid.rows(), 20);
        assert_eq!(grid.columns(), 10);
        assert_eq!(grid.iter_rows().count(), 20);
        assert!(grid.iter_rows().all(|row| row.len() == 10));
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    #[should_panic(expected = "invalid grid size")]
    fn test_new_rejects_oversized_grid() {
        let _ = Grid::new(GridSize {
            rows: usize::MAX / 2,
            columns: 4,
        });
    }

    #[test]
    fn test_out_of_range_lookups_are_unoccupied() {
        let mut grid = Grid::new(GridSize::STANDARD);
        for y in 0..20 {
            grid.fill_row(y);
        }
        assert!(!grid.is_occupied(pos(0, -1)));
        assert!(!grid.is_occupied(pos(-1, 0)));
        assert!(!grid.is_occupied(pos(10, 0)));
        assert!(!grid.is_occupied(pos(0, 20)));
        assert!(!grid.is_occupied(pos(i32::MIN, i32::MAX)));
        assert!(grid.is_occupied(pos(9, 19)));
        assert_eq!(grid.row(20), None);
    }

    #[test]
    fn test_lock_marks_cells() {
        let mut grid = Grid::new(GridSize::STANDARD);
        grid.lock(&[pos(0, 19), pos(1, 19), pos(2, 19), pos(2, 18)]);
        assert_eq!(grid.occupied_count(), 4);
        assert!(grid.is_occupied(pos(2, 18)));
        assert_eq!(
            grid.row(19).unwrap(),
            &[true, true, true, false, false, false, false, false, false, false]
        );
    }

    #[test]
    fn test_lock_skips_cells_above_field() {
        let mut grid = Grid::new(GridSize::STANDARD);
        grid.lock(&[pos(5, -1), pos(5, 0), pos(5, 1), pos(5, 2)]);
        assert_eq!(grid.occupied_count(), 3);
        assert!(grid.is_occupied(pos(5, 0)));
    }

    #[test]
    fn test_compact_empty_grid_is_noop() {
        let mut grid = Grid::new(GridSize::STANDARD);
        let before = grid.clone();
        assert_eq!(grid.compact_rows(), 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_compact_partial_rows_is_noop() {
        let mut grid = Grid::new(GridSize::STANDARD);
        for x in 0..9 {
            grid.set(pos(x, 19), true);
        }
        grid.set(pos(3, 10), true);
        let before = grid.clone();
        assert_eq!(grid.compact_rows(), 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_compact_single_full_row_shifts_rows_above() {
        for r in [0, 1, 7, 19] {
            let mut grid = Grid::new(GridSize::STANDARD);
            // A distinct marker in every row so shifts are observable.
            for y in 0..20 {
                grid.set(pos(i32::try_from(y % 10).unwrap(), i32::try_from(y).unwrap()), true);
            }
            grid.fill_row(r);
            let before = snapshot(&grid);

            assert_eq!(grid.compact_rows(), 1);
            let after = snapshot(&grid);

            assert_eq!(after.len(), 20);
            assert!(after[0].iter().all(|&c| !c), "top row must be empty");
            for y in 1..=r {
                assert_eq!(after[y], before[y - 1], "row {y} after clearing row {r}");
            }
            if r == 0 {
                assert!(after[0].iter().all(|&c| !c));
            }
            for y in r + 1..20 {
                assert_eq!(after[y], before[y], "row {y} below the cleared row must not move");
            }
        }
    }

    #[test]
    fn test_compact_multiple_rows_preserves_order() {
        let mut grid = Grid::new(GridSize::STANDARD);
        grid.fill_row(19);
        grid.set(pos(0, 18), true);
        grid.fill_row(17);
        grid.set(pos(1, 16), true);
        grid.fill_row(15);
        grid.set(pos(2, 14), true);

        assert_eq!(grid.compact_rows(), 3);

        assert!(grid.is_occupied(pos(0, 19)));
        assert!(grid.is_occupied(pos(1, 18)));
        assert!(grid.is_occupied(pos(2, 17)));
        assert_eq!(grid.occupied_count(), 3);
        for y in 0..17 {
            assert!(grid.row(y).unwrap().iter().all(|&c| !c));
        }
    }

    #[test]
    fn test_compact_all_full_rows() {
        let mut grid = Grid::new(GridSize::STANDARD);
        for y in 0..20 {
            grid.fill_row(y);
        }
        assert_eq!(grid.compact_rows(), 20);
        assert_eq!(grid.occupied_count(), 0);
        assert_eq!(grid.iter_rows().count(), 20);
    }

    #[test]
    fn test_compact_on_small_grid() {
        let mut grid = Grid::new(GridSize::new(4, 4).unwrap());
        grid.fill_row(3);
        grid.fill_row(2);
        grid.set(pos(3, 1), true);
        assert_eq!(grid.compact_rows(), 2);
        assert_eq!(grid.row(3).unwrap(), &[false, false, false, true]);
        assert_eq!(grid.occupied_count(), 1);
    }
}
