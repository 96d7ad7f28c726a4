//! Map quality measures.

use crate::error::{Result, SomError};
use crate::som::bmu::{find_bmu, find_two_best};
use crate::som::lattice::Lattice;
use crate::som::vector::distance;

/// Mean Euclidean distance from each sample to its BMU prototype.
///
/// Returns 0.0 for an empty sample set.
pub fn quantization_error<V: AsRef<[f64]>>(lattice: &Lattice, samples: &[V]) -> Result<f64> {
    if samples.is_empty() {
        return Ok(0.0);
    }

    let mut total = 0.0;
    for sample in samples {
        let input = sample.as_ref();
        let bmu = find_bmu(lattice, input)?;
        // find_bmu only returns coordinates on the lattice.
        let prototype = lattice
            .prototype(bmu.x, bmu.y)
            .ok_or_else(|| SomError::Configuration("BMU outside lattice".to_string()))?;
        total += distance(prototype, input);
    }

    Ok(total / samples.len() as f64)
}

/// Fraction of samples whose best and second-best cells are not adjacent.
///
/// Adjacency includes diagonals. Needs at least two cells.
pub fn topographic_error<V: AsRef<[f64]>>(lattice: &Lattice, samples: &[V]) -> Result<f64> {
    if lattice.num_cells() < 2 {
        return Err(SomError::Configuration(
            "topographic error needs at least two cells".to_string(),
        ));
    }
    if samples.is_empty() {
        return Ok(0.0);
    }

    let mut errors = 0usize;
    for sample in samples {
        let (best, second) = find_two_best(lattice, sample.as_ref())?;
        if !second.is_some_and(|s| best.is_adjacent(&s)) {
            errors += 1;
        }
    }

    Ok(errors as f64 / samples.len() as f64)
}
