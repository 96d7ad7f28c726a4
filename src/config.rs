//! Configuration for SOM training runs.

use crate::error::{Result, SomError};
use crate::som::DecayGranularity;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration for a training run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Lattice shape and hyperparameters.
    pub lattice: LatticeConfig,

    /// Training loop configuration.
    pub training: TrainingConfig,

    /// Synthetic sample generation.
    pub data: DataConfig,

    /// Image output configuration.
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a JSON file.
    ///
    /// Missing sections and fields fall back to their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Checks constraints that span more than one section.
    ///
    /// Per-field lattice checks happen when the lattice is built.
    pub fn validate(&self) -> Result<()> {
        if self.training.iterations == 0 {
            return Err(SomError::Configuration(
                "training.iterations must be positive".to_string(),
            ));
        }
        if self.data.num_features != self.lattice.input_dim {
            return Err(SomError::Configuration(format!(
                "data.num_features ({}) must equal lattice.input_dim ({})",
                self.data.num_features, self.lattice.input_dim
            )));
        }
        if self.output.scale == 0 {
            return Err(SomError::Configuration(
                "output.scale must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Lattice configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeConfig {
    /// Number of cells along x.
    /// Default: 10.
    pub width: usize,

    /// Number of cells along y.
    /// Default: 10.
    pub height: usize,

    /// Length of every prototype and input vector.
    /// Default: 3.
    pub input_dim: usize,

    /// Base learning rate, in (0, 1].
    /// Default: 0.1.
    pub alpha: f64,

    /// Base neighborhood radius.
    /// Default: None (max(width, height) / 2).
    pub sigma: Option<f64>,

    /// Random seed for prototype initialization.
    /// Default: None (random).
    pub seed: Option<u64>,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            input_dim: 3,
            alpha: crate::DEFAULT_ALPHA,
            sigma: None,
            seed: None,
        }
    }
}

impl LatticeConfig {
    /// Returns the total number of cells in the lattice.
    #[inline]
    pub fn total_cells(&self) -> usize {
        self.width * self.height
    }
}

/// Training loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Number of epochs (full passes over the samples).
    /// Default: 100.
    pub iterations: usize,

    /// How often the decay schedule advances.
    /// Default: once per epoch.
    pub decay: DecayGranularity,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            iterations: 100,
            decay: DecayGranularity::PerEpoch,
        }
    }
}

/// Synthetic sample configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Number of samples to draw.
    /// Default: 10.
    pub num_samples: usize,

    /// Components per sample.
    /// Default: 3.
    pub num_features: usize,

    /// Random seed for sample generation.
    /// Default: None (random).
    pub seed: Option<u64>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            num_samples: 10,
            num_features: 3,
            seed: None,
        }
    }
}

/// Image output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the rendered lattice is written to.
    /// Default: "data/processed".
    pub directory: PathBuf,

    /// Outline the best-matching cell of every sample.
    /// Default: true.
    pub show_bmu: bool,

    /// Pixels per lattice cell along each axis.
    /// Default: 16.
    pub scale: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("data/processed"),
            show_bmu: true,
            scale: 16,
        }
    }
}

impl OutputConfig {
    /// File name for a rendered lattice of the given shape and training length.
    pub fn file_name(width: usize, height: usize, iterations: usize) -> String {
        format!("som_output{}x{}_{}.png", width, height, iterations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.lattice.total_cells(), 100);
        assert_eq!(config.lattice.input_dim, 3);
        assert!((config.lattice.alpha - 0.1).abs() < 1e-12);
        assert!(config.lattice.sigma.is_none());
        assert_eq!(config.training.iterations, 100);
        assert_eq!(config.training.decay, DecayGranularity::PerEpoch);
        assert_eq!(config.data.num_samples, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "lattice": { "width": 4, "sigma": 3.0 }, "training": { "iterations": 7 } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.lattice.width, 4);
        assert_eq!(config.lattice.height, 10);
        assert_eq!(config.lattice.sigma, Some(3.0));
        assert_eq!(config.training.iterations, 7);
        assert_eq!(config.output.directory, PathBuf::from("data/processed"));
    }

    #[test]
    fn test_validate_rejects_feature_mismatch() {
        let mut config = Config::default();
        config.data.num_features = 2;
        assert!(matches!(
            config.validate(),
            Err(SomError::Configuration(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_iterations() {
        let mut config = Config::default();
        config.training.iterations = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("som.json");
        std::fs::write(&path, r#"{ "data": { "num_samples": 25 } }"#).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.data.num_samples, 25);
        assert_eq!(config.lattice.width, 10);
    }

    #[test]
    fn test_file_name() {
        assert_eq!(OutputConfig::file_name(10, 10, 100), "som_output10x10_100.png");
    }
}
