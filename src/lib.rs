//! # Kohonen - Self-Organizing Map Trainer
//!
//! A self-organizing map (SOM) is a 2D lattice of prototype vectors that is
//! iteratively pulled toward a set of input vectors, so that nearby cells end
//! up holding similar prototypes and the lattice approximates the input
//! distribution.
//!
//! ## Training
//!
//! For every epoch `t` the learning rate and neighborhood radius are decayed,
//! then each sample, in its original order, is matched to its Best Matching
//! Unit (BMU) and every prototype is moved toward the sample with a Gaussian
//! weight on its grid distance to the BMU.
//!
//! ## Quick Start
//!
//! ```rust
//! use kohonen::{train, find_bmu, Lattice};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let mut lattice = Lattice::new(10, 10, 3, 0.1, None, &mut rng)?;
//!
//! let samples = vec![[0.9, 0.1, 0.1], [0.1, 0.9, 0.1], [0.1, 0.1, 0.9]];
//! let weights = train(&mut lattice, &samples, 100)?;
//! assert_eq!(weights.len(), 10 * 10 * 3);
//!
//! let bmu = find_bmu(&lattice, &[0.9, 0.1, 0.1])?;
//! assert!(bmu.x < 10 && bmu.y < 10);
//! # Ok::<(), kohonen::SomError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`som`] - Lattice, BMU search, decay schedule, neighborhood update, trainer
//! - [`data`] - Synthetic sample generation
//! - [`render`] - PNG export of a lattice
//! - [`config`] - Run configuration
//! - [`error`] - Error types

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod data;
pub mod error;
pub mod render;
pub mod som;

// Re-export commonly used types
pub use config::{Config, DataConfig, LatticeConfig, OutputConfig, TrainingConfig};
pub use error::{Result, SomError};
pub use render::{lattice_to_image, save_lattice_png, RenderOptions};
pub use som::{
    apply_update, decay, find_bmu, find_bmu_parallel, quantization_error, topographic_error,
    train, DecayGranularity, DecayedParams, EpochReport, GridCoord, Lattice, SomTrainer,
    TrainingSummary,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default learning rate.
pub const DEFAULT_ALPHA: f64 = 0.1;
