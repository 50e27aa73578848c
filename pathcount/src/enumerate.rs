use crate::combinations::Combinations;
use crate::configuration::Configuration;
use crate::grid::Grid;

/// The edges leaving `(row, c)` toward the not-yet-processed half of the
/// graph: at most a horizontal edge to `(row, c+1)` and a vertical edge to
/// `(row+1, c)`, since those are the only two directions a 4-connected
/// rectangular grid can have "next" neighbors in row-major scan order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NextNeighbor {
    Horizontal,
    Vertical,
}

/// The per-row inputs the enumerator needs, computed once per row from
/// the Grid.
pub struct RowContext {
    pub target_degrees: Vec<i8>,
    pub next_neighbors: Vec<Vec<NextNeighbor>>,
}

impl RowContext {
    pub fn for_row(grid: &Grid, row: usize) -> Self {
        let cols = grid.cols();
        let mut target_degrees = Vec::with_capacity(cols);
        let mut next_neighbors = Vec::with_capacity(cols);

        for col in 0..cols {
            let idx = grid.index(row, col);
            target_degrees.push(grid.target_degree(idx));

            let mut options = Vec::new();
            if col + 1 < cols && grid.connected(idx, grid.index(row, col + 1)) {
                options.push(NextNeighbor::Horizontal);
            }
            if row + 1 < grid.rows() && grid.connected(idx, grid.index(row + 1, col)) {
                options.push(NextNeighbor::Vertical);
            }
            next_neighbors.push(options);
        }

        RowContext { target_degrees, next_neighbors }
    }
}

/// Produce every legal successor configuration for one row transition,
/// invoking `action` once per successor. Uses the late-rejection strategy:
/// build hmask/vmask fully for a column assignment, then link at the leaf,
/// rejecting only a successor that would close a loop prematurely.
pub fn for_each_next_config<F: FnMut(&Configuration)>(
    row: usize,
    last_config: &Configuration,
    ctx: &RowContext,
    action: &mut F,
) {
    let size = last_config.width();
    let mut residual_degrees: Vec<i32> = (0..size)
        .map(|c| ctx.target_degrees[c] as i32 - if last_config.col_advances(c) { 1 } else { 0 })
        .collect();
    let endpoint_row = residual_degrees.iter().any(|&r| r == 1);

    let mut hmask = vec![false; size];
    let mut vmask = vec![false; size];

    descend(
        0,
        row,
        size,
        &mut residual_degrees,
        &ctx.next_neighbors,
        &mut hmask,
        &mut vmask,
        endpoint_row,
        last_config,
        action,
    );
}

#[allow(clippy::too_many_arguments)]
fn descend<F: FnMut(&Configuration)>(
    col: usize,
    row: usize,
    size: usize,
    residual_degrees: &mut [i32],
    next_neighbors: &[Vec<NextNeighbor>],
    hmask: &mut [bool],
    vmask: &mut [bool],
    endpoint_row: bool,
    last_config: &Configuration,
    action: &mut F,
) {
    if col == size {
        yield_configuration(size, hmask, vmask, endpoint_row, last_config, action);
        return;
    }

    let r = residual_degrees[col];
    let k = r.max(0) as usize;

    for choice in Combinations::new(&next_neighbors[col], k) {
        hmask[col] = false;
        vmask[col] = false;
        residual_degrees[col] -= choice.len() as i32;

        for &neighbor in &choice {
            match neighbor {
                NextNeighbor::Horizontal => {
                    residual_degrees[col + 1] -= 1;
                    hmask[col] = true;
                }
                NextNeighbor::Vertical => {
                    vmask[col] = true;
                }
            }
        }

        descend(
            col + 1,
            row,
            size,
            residual_degrees,
            next_neighbors,
            hmask,
            vmask,
            endpoint_row,
            last_config,
            action,
        );

        residual_degrees[col] += choice.len() as i32;
        for &neighbor in &choice {
            if neighbor == NextNeighbor::Horizontal {
                residual_degrees[col + 1] += 1;
            }
        }
    }
}

fn yield_configuration<F: FnMut(&Configuration)>(
    size: usize,
    hmask: &[bool],
    vmask: &[bool],
    endpoint_row: bool,
    last_config: &Configuration,
    action: &mut F,
) {
    let mut config = last_config.clone();

    let mut col = 0;
    while col < size {
        if !hmask[col] {
            col += 1;
            continue;
        }
        let start = col;
        while col < size && hmask[col] {
            col += 1;
        }
        let end = col; // one past the run, i.e. the column the run links to

        if config.link_would_close(start, end) {
            return; // premature closure: reject this successor entirely
        }
        config.link(start, end);
    }

    for c in 0..size {
        if vmask[c] {
            config.link(c, c);
        }
    }

    if endpoint_row {
        config.mask(vmask);
    }

    action(&config);
}
