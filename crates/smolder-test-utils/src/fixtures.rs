//! Grid builders.

use smolder_core::{Cell, Grid};

/// A grid whose outermost ring is default (zero-conduction) cells and
/// whose interior is filled with copies of `interior`.
///
/// The margin cells keep `interior`'s temperature so the border reads as
/// ambient rather than as a cold sink.
pub fn bordered_grid(width: usize, height: usize, interior: Cell) -> Grid {
    let mut g = Grid::new(width, height).expect("fixture dimensions are nonzero");
    for cell in g.cells_mut() {
        cell.temperature = interior.temperature;
    }
    for r in 1..height - 1 {
        for c in 1..width - 1 {
            *g.cell_mut(r, c) = interior;
        }
    }
    g
}

/// A grid with a two-row/two-column zero-conduction margin.
///
/// The inner band of the margin never updates, so the wraparound rows the
/// halo ring writes into the outer ghost rows are never read by any
/// updating cell. Single-worker distributed runs on such a grid match the
/// serial path exactly.
pub fn wide_margin_grid(width: usize, height: usize, interior: Cell) -> Grid {
    let mut g = Grid::new(width, height).expect("fixture dimensions are nonzero");
    for cell in g.cells_mut() {
        cell.temperature = interior.temperature;
    }
    for r in 2..height - 2 {
        for c in 2..width - 2 {
            *g.cell_mut(r, c) = interior;
        }
    }
    g
}

/// A grid that is already at its fixed point: `temperature == heat`
/// everywhere, arbitrary conduction. With zero noise, the first sweep
/// produces zero delta and the run converges at iteration 1.
pub fn settled_grid(width: usize, height: usize, level: f32, conduction: f32) -> Grid {
    let mut g = Grid::new(width, height).expect("fixture dimensions are nonzero");
    for cell in g.cells_mut() {
        *cell = Cell::new(level, level, conduction);
    }
    g
}

/// A bordered grid with one maximal heat source in the middle of an
/// otherwise source-free conductive interior.
pub fn source_grid(width: usize, height: usize) -> Grid {
    let mut g = bordered_grid(width, height, Cell::new(0.0, 20.0, 0.8));
    g.cell_mut(height / 2, width / 2).heat = 255.0;
    g
}
