//! The two-phase checkerboard relaxation sweep.

use std::ops::Range;

use smolder_core::{Cell, Grid};

/// One full relaxation sweep over global rows `rows` of a row-major cell
/// slice, returning the sum of absolute per-cell temperature deltas.
///
/// `cells` holds full rows of width `width`; its row 0 corresponds to
/// global row `base`. The sweep visits rows `rows` (which must lie strictly
/// inside the stored rows, so every visited cell has all four neighbors in
/// storage) and interior columns `[1, width - 1)`.
///
/// The sweep runs in two phases. In each phase, row `i` starts at column
/// `1 + (((i + 1) ^ phase) & 1)` and steps by 2, so across both phases
/// every interior column is visited exactly once per phase pair, and a
/// cell's orthogonal neighbors were last written in the *other* phase of
/// the same sweep. That is what lets one in-place buffer stand in for two
/// logical generations; a naive row-major sweep would change both the
/// convergence behavior and the numeric results.
///
/// Parity is computed from the global row index, so a partition sweeping
/// its local storage stays phase-aligned with every other partition.
///
/// Per selected cell:
///
/// ```text
/// target = max(heat, (up + down + left + right) / 4 + noise)
/// delta  = conduction * (target - temperature)
/// temperature += delta
/// ```
///
/// The additive `noise` biases high-conduction cells far from any heat
/// source toward slow heat accumulation instead of settling at the ambient
/// average.
pub fn checkerboard_sweep(
    cells: &mut [Cell],
    width: usize,
    rows: Range<usize>,
    base: usize,
    noise: f32,
) -> f32 {
    let mut delta_sum = 0.0f32;
    if width < 3 {
        return delta_sum;
    }

    for phase in 0..2usize {
        for i in rows.clone() {
            let offset = ((i + 1) ^ phase) & 1;
            let row_start = (i - base) * width;

            for j in (1 + offset..width - 1).step_by(2) {
                let idx = row_start + j;
                let conduction = cells[idx].conduction;
                let old_temp = cells[idx].temperature;
                let neighbor_avg = (cells[idx - width].temperature
                    + cells[idx - 1].temperature
                    + cells[idx + 1].temperature
                    + cells[idx + width].temperature)
                    / 4.0
                    + noise;
                let target = cells[idx].heat.max(neighbor_avg);
                let delta = conduction * (target - old_temp);

                cells[idx].temperature += delta;
                delta_sum += delta.abs();
            }
        }
    }

    delta_sum
}

/// Sweep a whole grid's interior rows `[1, height - 1)` in place and return
/// the absolute delta sum. The serial solve path.
pub fn sweep_grid(grid: &mut Grid, noise: f32) -> f32 {
    let width = grid.width();
    let rows = 1..grid.height().saturating_sub(1);
    checkerboard_sweep(grid.cells_mut(), width, rows, 0, noise)
}
