//! Best Matching Unit search.
//!
//! Cells are scanned in flattened order (`x * height + y`) and the first
//! cell reaching the minimum distance wins. Both the sequential and the
//! parallel search honor that tie-break.
//!
//! Distances are compared after the square root. Two squared distances one
//! ULP apart can share a square root, and then the earlier cell must win.

use crate::error::{Result, SomError};
use crate::som::lattice::{GridCoord, Lattice};
use crate::som::vector::distance;
use rayon::prelude::*;

/// Checks that `input` has the lattice's input dimension.
#[inline]
pub(crate) fn check_dimension(lattice: &Lattice, input: &[f64]) -> Result<()> {
    if input.len() != lattice.input_dim() {
        return Err(SomError::DimensionMismatch {
            expected: lattice.input_dim(),
            actual: input.len(),
        });
    }
    Ok(())
}

/// Finds the Best Matching Unit (BMU) for an input vector.
///
/// The BMU is the cell whose prototype is closest to the input in
/// Euclidean distance. Does not mutate the lattice.
pub fn find_bmu(lattice: &Lattice, input: &[f64]) -> Result<GridCoord> {
    check_dimension(lattice, input)?;

    let (bmu_idx, _) = first_minimum(lattice.prototypes().map(|p| distance(p, input)));
    Ok(lattice.coord_of(bmu_idx))
}

/// Finds the BMU with per-cell distances computed in parallel.
///
/// Returns the same cell as [`find_bmu`]; only the distance computation is
/// parallel, the reduction stays in flattened order.
pub fn find_bmu_parallel(lattice: &Lattice, input: &[f64]) -> Result<GridCoord> {
    check_dimension(lattice, input)?;

    let distances: Vec<f64> = lattice
        .weights()
        .par_chunks_exact(lattice.input_dim())
        .map(|p| distance(p, input))
        .collect();

    let (bmu_idx, _) = first_minimum(distances.into_iter());
    Ok(lattice.coord_of(bmu_idx))
}

/// Finds the best and second-best cells for an input vector.
///
/// Ties resolve in flattened order for both ranks. Returns `None` for the
/// runner-up on a single-cell lattice.
pub fn find_two_best(lattice: &Lattice, input: &[f64]) -> Result<(GridCoord, Option<GridCoord>)> {
    check_dimension(lattice, input)?;

    let mut best: Option<(usize, f64)> = None;
    let mut second: Option<(usize, f64)> = None;

    for (i, p) in lattice.prototypes().enumerate() {
        let dist = distance(p, input);
        if dist.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if dist >= b => {
                if second.map_or(true, |(_, s)| dist < s) {
                    second = Some((i, dist));
                }
            }
            _ => {
                second = best;
                best = Some((i, dist));
            }
        }
    }

    // Lattices always have at least one cell.
    let (best_idx, _) = best.unwrap_or((0, f64::MAX));
    Ok((
        lattice.coord_of(best_idx),
        second.map(|(i, _)| lattice.coord_of(i)),
    ))
}

/// Returns the index and value of the first minimum of a sequence.
///
/// NaN distances never win.
#[inline]
fn first_minimum<I: Iterator<Item = f64>>(distances: I) -> (usize, f64) {
    let mut best_idx = 0;
    let mut best_dist = f64::INFINITY;

    for (i, dist) in distances.enumerate() {
        if dist < best_dist {
            best_dist = dist;
            best_idx = i;
        }
    }

    (best_idx, best_dist)
}
