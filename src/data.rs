//! Synthetic training samples.

use crate::config::DataConfig;
use crate::error::{Result, SomError};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Draws `num_samples` vectors with every component uniform in `[0, 1)`.
pub fn generate_random_samples<R: Rng + ?Sized>(
    num_samples: usize,
    num_features: usize,
    rng: &mut R,
) -> Result<Vec<Vec<f64>>> {
    if num_features == 0 {
        return Err(SomError::Configuration(
            "samples need at least one feature".to_string(),
        ));
    }

    Ok((0..num_samples)
        .map(|_| (0..num_features).map(|_| rng.gen::<f64>()).collect())
        .collect())
}

/// Draws samples as configured, seeding the generator if a seed is set.
pub fn samples_from_config(config: &DataConfig) -> Result<Vec<Vec<f64>>> {
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    generate_random_samples(config.num_samples, config.num_features, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_and_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let samples = generate_random_samples(10, 3, &mut rng).unwrap();
        assert_eq!(samples.len(), 10);
        assert!(samples.iter().all(|s| s.len() == 3));
        assert!(samples.iter().flatten().all(|&v| (0.0..1.0).contains(&v)));
    }

    #[test]
    fn test_zero_features_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        assert!(generate_random_samples(5, 0, &mut rng).is_err());
    }

    #[test]
    fn test_seeded_config_is_reproducible() {
        let config = DataConfig {
            num_samples: 4,
            num_features: 2,
            seed: Some(9),
        };
        assert_eq!(
            samples_from_config(&config).unwrap(),
            samples_from_config(&config).unwrap()
        );
    }
}
