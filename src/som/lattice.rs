//! The prototype lattice of a self-organizing map.

use crate::config::LatticeConfig;
use crate::error::{Result, SomError};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A cell position on the lattice.
///
/// `x` ranges over the width, `y` over the height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCoord {
    /// Position along the width.
    pub x: usize,
    /// Position along the height.
    pub y: usize,
}

impl GridCoord {
    /// Creates a new coordinate.
    #[inline]
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another cell on the grid.
    #[inline]
    pub fn grid_distance_squared(&self, other: &GridCoord) -> f64 {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        dx * dx + dy * dy
    }

    /// Returns true if the two cells touch, diagonals included.
    #[inline]
    pub fn is_adjacent(&self, other: &GridCoord) -> bool {
        self != other && self.x.abs_diff(other.x) <= 1 && self.y.abs_diff(other.y) <= 1
    }
}

impl From<(usize, usize)> for GridCoord {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

/// A 2D lattice of prototype vectors plus its static hyperparameters.
///
/// Prototypes are stored flat with `x` as the slower-varying index: the
/// prototype of cell `(x, y)` starts at `(x * height + y) * input_dim`.
/// The storage length is fixed at construction.
#[derive(Debug, Clone)]
pub struct Lattice {
    width: usize,
    height: usize,
    input_dim: usize,
    alpha: f64,
    sigma: f64,
    weights: Vec<f64>,
}

impl Lattice {
    /// Creates a lattice with every component drawn uniformly from `[0, 1)`.
    ///
    /// `sigma` defaults to `max(width, height) / 2` when `None`.
    pub fn new<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        input_dim: usize,
        alpha: f64,
        sigma: Option<f64>,
        rng: &mut R,
    ) -> Result<Self> {
        let sigma = validate_params(width, height, input_dim, alpha, sigma)?;
        let weights: Vec<f64> = (0..width * height * input_dim)
            .map(|_| rng.gen::<f64>())
            .collect();

        Ok(Self {
            width,
            height,
            input_dim,
            alpha,
            sigma,
            weights,
        })
    }

    /// Creates a lattice from configuration, seeding the generator if a seed is set.
    pub fn from_config(config: &LatticeConfig) -> Result<Self> {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Self::new(
            config.width,
            config.height,
            config.input_dim,
            config.alpha,
            config.sigma,
            &mut rng,
        )
    }

    /// Creates a lattice with the given initial prototypes.
    ///
    /// `weights` must hold `width * height * input_dim` values in the
    /// flattened layout described on [`Lattice`].
    pub fn from_weights(
        width: usize,
        height: usize,
        input_dim: usize,
        weights: Vec<f64>,
        alpha: f64,
        sigma: Option<f64>,
    ) -> Result<Self> {
        let sigma = validate_params(width, height, input_dim, alpha, sigma)?;
        let expected = width * height * input_dim;
        if weights.len() != expected {
            return Err(SomError::Configuration(format!(
                "expected {} weights for a {}x{}x{} lattice, got {}",
                expected,
                width,
                height,
                input_dim,
                weights.len()
            )));
        }

        Ok(Self {
            width,
            height,
            input_dim,
            alpha,
            sigma,
            weights,
        })
    }

    /// Number of cells along x.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of cells along y.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Length of every prototype vector.
    #[inline]
    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    /// Base learning rate.
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Base neighborhood radius.
    #[inline]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Total number of cells.
    #[inline]
    pub fn num_cells(&self) -> usize {
        self.width * self.height
    }

    /// Shape of the weights as `(width, height, input_dim)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.width, self.height, self.input_dim)
    }

    /// All prototype components, flattened.
    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Mutable access for the neighborhood update. The length stays fixed.
    #[inline]
    pub(crate) fn weights_mut(&mut self) -> &mut [f64] {
        &mut self.weights
    }

    /// Converts a 2D coordinate to the flattened cell index.
    #[inline]
    pub fn cell_index(&self, x: usize, y: usize) -> usize {
        x * self.height + y
    }

    /// Converts a flattened cell index back to a coordinate.
    #[inline]
    pub fn coord_of(&self, index: usize) -> GridCoord {
        GridCoord::new(index / self.height, index % self.height)
    }

    /// Returns true if the coordinate lies on the lattice.
    #[inline]
    pub fn contains(&self, coord: GridCoord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    /// Gets the prototype of cell `(x, y)`.
    pub fn prototype(&self, x: usize, y: usize) -> Option<&[f64]> {
        if x < self.width && y < self.height {
            let offset = self.cell_index(x, y) * self.input_dim;
            Some(&self.weights[offset..offset + self.input_dim])
        } else {
            None
        }
    }

    /// Iterates over prototypes in flattened cell order.
    pub fn prototypes(&self) -> std::slice::ChunksExact<'_, f64> {
        self.weights.chunks_exact(self.input_dim)
    }

    /// Copies the weights into a nested `width x height x input_dim` array.
    pub fn to_nested(&self) -> Vec<Vec<Vec<f64>>> {
        self.weights
            .chunks_exact(self.height * self.input_dim)
            .map(|column| {
                column
                    .chunks_exact(self.input_dim)
                    .map(|p| p.to_vec())
                    .collect()
            })
            .collect()
    }
}

/// Validates construction parameters and resolves the default radius.
fn validate_params(
    width: usize,
    height: usize,
    input_dim: usize,
    alpha: f64,
    sigma: Option<f64>,
) -> Result<f64> {
    if width == 0 || height == 0 {
        return Err(SomError::Configuration(format!(
            "lattice dimensions must be positive, got {}x{}",
            width, height
        )));
    }
    if input_dim == 0 {
        return Err(SomError::Configuration(
            "input dimension must be positive".to_string(),
        ));
    }
    if !(alpha > 0.0 && alpha <= 1.0) {
        return Err(SomError::Configuration(format!(
            "learning rate must lie in (0, 1], got {}",
            alpha
        )));
    }

    match sigma {
        Some(s) if !(s > 0.0 && s.is_finite()) => Err(SomError::Configuration(format!(
            "neighborhood radius must be positive, got {}",
            s
        ))),
        Some(s) => Ok(s),
        None => Ok(width.max(height) as f64 / 2.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn test_lattice_creation() {
        let lattice = Lattice::new(10, 8, 3, 0.1, None, &mut seeded()).unwrap();

        assert_eq!(lattice.shape(), (10, 8, 3));
        assert_eq!(lattice.num_cells(), 80);
        assert_eq!(lattice.weights().len(), 240);
        assert!((lattice.sigma() - 5.0).abs() < 1e-12);
        assert!(lattice.weights().iter().all(|&w| (0.0..1.0).contains(&w)));
    }

    #[test]
    fn test_seeded_initialization_is_reproducible() {
        let a = Lattice::new(4, 4, 2, 0.1, None, &mut seeded()).unwrap();
        let b = Lattice::new(4, 4, 2, 0.1, None, &mut seeded()).unwrap();
        assert_eq!(a.weights(), b.weights());
    }

    #[test]
    fn test_from_config() {
        let config = LatticeConfig {
            width: 6,
            height: 4,
            seed: Some(7),
            ..Default::default()
        };
        let a = Lattice::from_config(&config).unwrap();
        let b = Lattice::from_config(&config).unwrap();
        assert_eq!(a.shape(), (6, 4, 3));
        assert_eq!(a.weights(), b.weights());
        assert!((a.sigma() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_parameters() {
        let mut rng = seeded();
        assert!(matches!(
            Lattice::new(0, 10, 3, 0.1, None, &mut rng),
            Err(SomError::Configuration(_))
        ));
        assert!(Lattice::new(10, 0, 3, 0.1, None, &mut rng).is_err());
        assert!(Lattice::new(10, 10, 0, 0.1, None, &mut rng).is_err());
        assert!(Lattice::new(10, 10, 3, 0.0, None, &mut rng).is_err());
        assert!(Lattice::new(10, 10, 3, 1.5, None, &mut rng).is_err());
        assert!(Lattice::new(10, 10, 3, f64::NAN, None, &mut rng).is_err());
        assert!(Lattice::new(10, 10, 3, 0.1, Some(0.0), &mut rng).is_err());
        assert!(Lattice::new(10, 10, 3, 0.1, Some(-2.0), &mut rng).is_err());
        assert!(Lattice::new(10, 10, 3, 1.0, Some(0.5), &mut rng).is_ok());
    }

    #[test]
    fn test_from_weights_length_check() {
        let err = Lattice::from_weights(2, 2, 2, vec![0.0; 7], 0.1, None);
        assert!(matches!(err, Err(SomError::Configuration(_))));
    }

    #[test]
    fn test_layout_x_slower_varying() {
        // 2x3 lattice, 1-dimensional prototypes numbered by flat index.
        let weights: Vec<f64> = (0..6).map(|i| i as f64).collect();
        let lattice = Lattice::from_weights(2, 3, 1, weights, 0.1, Some(2.0)).unwrap();

        assert_eq!(lattice.prototype(0, 2), Some(&[2.0][..]));
        assert_eq!(lattice.prototype(1, 0), Some(&[3.0][..]));
        assert_eq!(lattice.prototype(2, 0), None);
        assert_eq!(lattice.cell_index(1, 2), 5);
        assert_eq!(lattice.coord_of(4), GridCoord::new(1, 1));

        let nested = lattice.to_nested();
        assert_eq!(nested.len(), 2);
        assert_eq!(nested[0].len(), 3);
        assert_eq!(nested[1][2], vec![5.0]);
    }

    #[test]
    fn test_grid_coord_helpers() {
        let a = GridCoord::new(0, 0);
        assert!((a.grid_distance_squared(&GridCoord::new(3, 4)) - 25.0).abs() < 1e-12);
        assert!(a.is_adjacent(&GridCoord::new(1, 1)));
        assert!(!a.is_adjacent(&GridCoord::new(2, 0)));
        assert!(!a.is_adjacent(&a));
    }
}
