//! Gaussian neighborhood update.
//!
//! Every cell moves toward the input by `alpha * theta`, where
//! `theta = exp(-d2 / (2 * sigma^2))` and `d2` is the squared grid distance
//! to the BMU. There is no radius cut-off: distant cells receive a
//! vanishing but non-zero pull.

use crate::error::{Result, SomError};
use crate::som::bmu::check_dimension;
use crate::som::lattice::{GridCoord, Lattice};
use crate::som::vector::pull_toward;
use rayon::prelude::*;

/// Lattices with at least this many cells are updated on the rayon pool.
pub const PARALLEL_CELL_THRESHOLD: usize = 4096;

/// Gaussian neighborhood weight for a squared grid distance.
#[inline]
pub fn gaussian(grid_dist_sq: f64, sigma: f64) -> f64 {
    (-grid_dist_sq / (2.0 * sigma * sigma)).exp()
}

/// Pulls every prototype toward `input`, weighted by grid distance to `bmu`.
///
/// Nothing is mutated if the input length or the BMU coordinate is invalid.
pub fn apply_update(
    lattice: &mut Lattice,
    bmu: GridCoord,
    input: &[f64],
    alpha: f64,
    sigma: f64,
) -> Result<()> {
    check_dimension(lattice, input)?;
    if !lattice.contains(bmu) {
        return Err(SomError::Configuration(format!(
            "BMU ({}, {}) lies outside the {}x{} lattice",
            bmu.x,
            bmu.y,
            lattice.width(),
            lattice.height()
        )));
    }

    if lattice.num_cells() >= PARALLEL_CELL_THRESHOLD {
        update_parallel(lattice, bmu, input, alpha, sigma);
    } else {
        update_sequential(lattice, bmu, input, alpha, sigma);
    }
    Ok(())
}

#[inline]
fn update_cell(
    cell: usize,
    height: usize,
    prototype: &mut [f64],
    bmu: GridCoord,
    input: &[f64],
    alpha: f64,
    sigma: f64,
) {
    let coord = GridCoord::new(cell / height, cell % height);
    let theta = gaussian(coord.grid_distance_squared(&bmu), sigma);
    pull_toward(prototype, input, alpha * theta);
}

fn update_sequential(lattice: &mut Lattice, bmu: GridCoord, input: &[f64], alpha: f64, sigma: f64) {
    let (_, height, input_dim) = lattice.shape();

    for (cell, prototype) in lattice.weights_mut().chunks_exact_mut(input_dim).enumerate() {
        update_cell(cell, height, prototype, bmu, input, alpha, sigma);
    }
}

fn update_parallel(lattice: &mut Lattice, bmu: GridCoord, input: &[f64], alpha: f64, sigma: f64) {
    let (_, height, input_dim) = lattice.shape();

    lattice
        .weights_mut()
        .par_chunks_exact_mut(input_dim)
        .enumerate()
        .for_each(|(cell, prototype)| {
            update_cell(cell, height, prototype, bmu, input, alpha, sigma);
        });
}
