//! SOM training loop.
//!
//! Every epoch visits the samples in their given order. For each sample the
//! BMU is located against the current weights and the neighborhood update is
//! applied immediately, so later samples see the effect of earlier ones.

use crate::config::TrainingConfig;
use crate::error::{Result, SomError};
use crate::som::bmu::find_bmu;
use crate::som::decay::{decay, DecayGranularity, DecayedParams};
use crate::som::lattice::Lattice;
use crate::som::neighborhood::apply_update;
use log::{debug, info, warn};
use std::ops::ControlFlow;

/// State reported to the progress callback at each epoch boundary.
#[derive(Debug, Clone, Copy)]
pub struct EpochReport {
    /// Zero-based index of the epoch that just finished.
    pub epoch: usize,
    /// Total number of epochs requested.
    pub total_epochs: usize,
    /// Learning rate used at the start of the epoch.
    pub alpha: f64,
    /// Neighborhood radius used at the start of the epoch.
    pub sigma: f64,
}

/// Outcome of a training run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingSummary {
    /// Number of full epochs applied.
    pub epochs_completed: usize,
    /// Number of sample updates applied.
    pub samples_seen: usize,
    /// True if the callback stopped training before the last epoch.
    pub stopped_early: bool,
}

/// SOM trainer with a fixed epoch count and decay granularity.
#[derive(Debug, Clone, Default)]
pub struct SomTrainer {
    config: TrainingConfig,
}

impl SomTrainer {
    /// Creates a new trainer with the given configuration.
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    /// Returns the trainer configuration.
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Trains the lattice for the configured number of epochs.
    pub fn train<V: AsRef<[f64]>>(
        &self,
        lattice: &mut Lattice,
        samples: &[V],
    ) -> Result<TrainingSummary> {
        self.train_with_progress(lattice, samples, |_| ControlFlow::Continue(()))
    }

    /// Trains the lattice, invoking `on_epoch` after every completed epoch.
    ///
    /// Returning `ControlFlow::Break(())` from the callback stops training at
    /// that boundary, where the weights are consistent.
    ///
    /// Errors surface at first detection: a bad decay domain before any
    /// update of the epoch, a mismatched sample before its own update. Updates
    /// already applied by earlier samples are kept.
    pub fn train_with_progress<V, F>(
        &self,
        lattice: &mut Lattice,
        samples: &[V],
        mut on_epoch: F,
    ) -> Result<TrainingSummary>
    where
        V: AsRef<[f64]>,
        F: FnMut(&EpochReport) -> ControlFlow<()>,
    {
        let epochs = self.config.iterations;
        let per_sample = self.config.decay == DecayGranularity::PerSample;

        info!(
            "Starting SOM training: {} epochs on {} samples, {}x{} lattice, {} dim",
            epochs,
            samples.len(),
            lattice.width(),
            lattice.height(),
            lattice.input_dim()
        );
        if samples.is_empty() {
            warn!("No training samples provided; weights will not change");
        }
        if per_sample {
            warn!("Decay advances per sample instead of per epoch");
        }

        // Per-sample decay runs over every sample update; an empty set still
        // needs a positive horizon for the domain check.
        let horizon = if per_sample {
            epochs.checked_mul(samples.len().max(1)).ok_or_else(|| {
                SomError::NumericDomain(format!(
                    "{} epochs x {} samples overflows the decay step counter",
                    epochs,
                    samples.len()
                ))
            })?
        } else {
            epochs
        };

        // An undefined schedule fails here, before any weight changes.
        decay(0, lattice.alpha(), lattice.sigma(), horizon)?;

        let mut summary = TrainingSummary {
            epochs_completed: 0,
            samples_seen: 0,
            stopped_early: false,
        };

        for epoch in 0..epochs {
            // Bounded by `horizon`, so this cannot overflow.
            let step = if per_sample { epoch * samples.len() } else { epoch };
            let epoch_params = decay(step, lattice.alpha(), lattice.sigma(), horizon)?;

            for (i, sample) in samples.iter().enumerate() {
                let params = if per_sample && i > 0 {
                    decay(step + i, lattice.alpha(), lattice.sigma(), horizon)?
                } else {
                    epoch_params
                };
                train_sample(lattice, sample.as_ref(), params)?;
                summary.samples_seen += 1;
            }

            summary.epochs_completed += 1;
            debug!(
                "Epoch {}/{}: alpha={:.5}, sigma={:.4}",
                epoch + 1,
                epochs,
                epoch_params.alpha,
                epoch_params.sigma
            );

            let report = EpochReport {
                epoch,
                total_epochs: epochs,
                alpha: epoch_params.alpha,
                sigma: epoch_params.sigma,
            };
            if on_epoch(&report).is_break() {
                summary.stopped_early = summary.epochs_completed < epochs;
                info!("Training stopped after epoch {}/{}", epoch + 1, epochs);
                break;
            }
        }

        info!(
            "SOM training completed: {} epochs, {} updates",
            summary.epochs_completed, summary.samples_seen
        );
        Ok(summary)
    }
}

/// Applies one sample: locate its BMU, then pull the neighborhood toward it.
#[inline]
fn train_sample(lattice: &mut Lattice, input: &[f64], params: DecayedParams) -> Result<()> {
    let bmu = find_bmu(lattice, input)?;
    apply_update(lattice, bmu, input, params.alpha, params.sigma)
}

/// Trains `lattice` for exactly `num_iterations` epochs with per-epoch decay
/// and returns the trained weights.
///
/// The weights are flattened as `width x height x input_dim` with `x` as the
/// slower-varying index.
pub fn train<'a, V: AsRef<[f64]>>(
    lattice: &'a mut Lattice,
    samples: &[V],
    num_iterations: usize,
) -> Result<&'a [f64]> {
    let trainer = SomTrainer::new(TrainingConfig {
        iterations: num_iterations,
        decay: DecayGranularity::PerEpoch,
    });
    trainer.train(lattice, samples)?;
    Ok(lattice.weights())
}
