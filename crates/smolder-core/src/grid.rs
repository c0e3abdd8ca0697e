//! Row-major 2D grid of cells.

use crate::cell::Cell;
use crate::error::GridError;

/// A row-major 2D array of [`Cell`]s with fixed dimensions.
///
/// Dimensions are fixed for the lifetime of the grid. The outermost
/// one-cell ring is expected to carry `conduction == 0` (by construction of
/// the input); the sweep kernel relies on that margin to read neighbors
/// without bounds checks, and the halo ring relies on it to make wraparound
/// rows harmless. [`has_zero_margin`](Grid::has_zero_margin) checks the
/// invariant explicitly.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid of default (all-zero) cells.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EmptyGrid`] if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid);
        }
        Ok(Self {
            width,
            height,
            cells: vec![Cell::default(); width * height],
        })
    }

    /// Create a grid from an existing row-major cell buffer.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EmptyGrid`] for zero dimensions, or
    /// [`GridError::CellCountMismatch`] if `cells.len() != width * height`.
    pub fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid);
        }
        if cells.len() != width * height {
            return Err(GridError::CellCountMismatch {
                expected: width * height,
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Grid width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total cell count (`width * height`).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid holds no cells. Always false for a constructed
    /// grid; present for the usual `len`/`is_empty` pairing.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Shared access to one cell.
    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        &self.cells[self.idx(row, col)]
    }

    /// Mutable access to one cell.
    #[inline]
    pub fn cell_mut(&mut self, row: usize, col: usize) -> &mut Cell {
        let i = self.idx(row, col);
        &mut self.cells[i]
    }

    /// One full row as a slice.
    #[inline]
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.width;
        &self.cells[start..start + self.width]
    }

    /// One full row as a mutable slice.
    #[inline]
    pub fn row_mut(&mut self, row: usize) -> &mut [Cell] {
        let start = row * self.width;
        &mut self.cells[start..start + self.width]
    }

    /// The whole cell buffer in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The whole cell buffer, mutable.
    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Check that every cell on the outermost ring has zero conduction.
    ///
    /// The sweep kernel never updates the outer ring, and the halo ring
    /// topology wraps the global top and bottom edges around to each other;
    /// both are only correct when this margin holds.
    pub fn has_zero_margin(&self) -> bool {
        let (w, h) = (self.width, self.height);
        let top_bottom = (0..w).all(|c| {
            self.cell(0, c).conduction == 0.0 && self.cell(h - 1, c).conduction == 0.0
        });
        let sides = (0..h).all(|r| {
            self.cell(r, 0).conduction == 0.0 && self.cell(r, w - 1).conduction == 0.0
        });
        top_bottom && sides
    }

    /// Minimum and maximum temperature over the whole grid.
    pub fn temperature_range(&self) -> (f32, f32) {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for cell in &self.cells {
            min = min.min(cell.temperature);
            max = max.max(cell.temperature);
        }
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn bordered(width: usize, height: usize, interior: Cell) -> Grid {
        let mut g = Grid::new(width, height).unwrap();
        for r in 1..height - 1 {
            for c in 1..width - 1 {
                *g.cell_mut(r, c) = interior;
            }
        }
        g
    }

    // ── Constructors ────────────────────────────────────────────

    #[test]
    fn new_rejects_zero_dimensions() {
        assert_eq!(Grid::new(0, 4), Err(GridError::EmptyGrid));
        assert_eq!(Grid::new(4, 0), Err(GridError::EmptyGrid));
    }

    #[test]
    fn from_cells_rejects_wrong_length() {
        let cells = vec![Cell::default(); 7];
        assert_eq!(
            Grid::from_cells(3, 3, cells),
            Err(GridError::CellCountMismatch {
                expected: 9,
                actual: 7,
            })
        );
    }

    #[test]
    fn from_cells_preserves_layout() {
        let mut cells = vec![Cell::default(); 6];
        cells[1 * 3 + 2] = Cell::new(1.0, 2.0, 0.0);
        let g = Grid::from_cells(3, 2, cells).unwrap();
        assert_eq!(g.cell(1, 2).temperature, 2.0);
    }

    // ── Accessors ───────────────────────────────────────────────

    #[test]
    fn row_slices_cover_buffer() {
        let g = Grid::new(4, 3).unwrap();
        assert_eq!(g.row(0).len(), 4);
        assert_eq!(g.row(2).len(), 4);
        assert_eq!(g.len(), 12);
    }

    #[test]
    fn cell_mut_writes_through() {
        let mut g = Grid::new(3, 3).unwrap();
        g.cell_mut(1, 1).temperature = 42.0;
        assert_eq!(g.cell(1, 1).temperature, 42.0);
    }

    // ── Margin invariant ────────────────────────────────────────

    #[test]
    fn zero_margin_holds_for_bordered_grid() {
        let g = bordered(5, 5, Cell::new(0.0, 10.0, 0.8));
        assert!(g.has_zero_margin());
    }

    #[test]
    fn zero_margin_detects_conductive_border() {
        let mut g = bordered(5, 5, Cell::new(0.0, 10.0, 0.8));
        g.cell_mut(0, 2).conduction = 0.1;
        assert!(!g.has_zero_margin());
    }

    // ── Temperature range ───────────────────────────────────────

    #[test]
    fn temperature_range_finds_extremes() {
        let mut g = Grid::new(3, 3).unwrap();
        g.cell_mut(0, 0).temperature = -5.0;
        g.cell_mut(2, 2).temperature = 30.0;
        assert_eq!(g.temperature_range(), (-5.0, 30.0));
    }

    proptest! {
        #[test]
        fn index_round_trip(w in 1usize..20, h in 1usize..20, r in 0usize..20, c in 0usize..20) {
            let r = r % h;
            let c = c % w;
            let mut g = Grid::new(w, h).unwrap();
            g.cell_mut(r, c).heat = 7.0;
            // Exactly one cell was touched.
            let touched = g.cells().iter().filter(|cell| cell.heat == 7.0).count();
            prop_assert_eq!(touched, 1);
            prop_assert_eq!(g.cell(r, c).heat, 7.0);
            prop_assert_eq!(g.row(r)[c].heat, 7.0);
        }
    }
}
