//! Self-Organizing Map (SOM) core.
//!
//! - **Lattice**: prototype grid and hyperparameters (lattice.rs)
//! - **BMU search**: first-minimum Euclidean search (bmu.rs)
//! - **Decay**: exponential learning-rate and radius schedule (decay.rs)
//! - **Neighborhood**: Gaussian-weighted in-place update (neighborhood.rs)
//! - **Training**: the epoch x sample loop (training.rs)
//! - **Metrics**: quantization and topographic error (metrics.rs)

pub mod bmu;
pub mod decay;
pub mod lattice;
pub mod metrics;
pub mod neighborhood;
pub mod training;
pub mod vector;

pub use bmu::{find_bmu, find_bmu_parallel, find_two_best};
pub use decay::{decay, DecayGranularity, DecayedParams};
pub use lattice::{GridCoord, Lattice};
pub use metrics::{quantization_error, topographic_error};
pub use neighborhood::{apply_update, gaussian, PARALLEL_CELL_THRESHOLD};
pub use training::{train, EpochReport, SomTrainer, TrainingSummary};
