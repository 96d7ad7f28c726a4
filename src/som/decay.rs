//! Exponential decay of the learning rate and neighborhood radius.
//!
//! With `lambda = max_iterations / ln(sigma)`, both parameters shrink by
//! `exp(-t / lambda)`, so the radius reaches 1 at `t = max_iterations`.

use crate::error::{Result, SomError};
use serde::{Deserialize, Serialize};

/// Learning rate and neighborhood radius for one step of the schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayedParams {
    /// Decayed learning rate.
    pub alpha: f64,
    /// Decayed neighborhood radius.
    pub sigma: f64,
}

/// How often the schedule advances during training.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecayGranularity {
    /// One step per epoch; every sample in an epoch shares the same parameters.
    #[default]
    PerEpoch,
    /// One step per sample, over `iterations * samples` steps.
    PerSample,
}

/// Computes the decayed parameters at step `t` of `max_iterations`.
///
/// Fails with [`SomError::NumericDomain`] when `sigma <= 1` (the time
/// constant would be infinite or negative) or `max_iterations == 0`.
pub fn decay(t: usize, alpha: f64, sigma: f64, max_iterations: usize) -> Result<DecayedParams> {
    if max_iterations == 0 {
        return Err(SomError::NumericDomain(
            "iteration count must be positive".to_string(),
        ));
    }
    if !(sigma > 1.0 && sigma.is_finite()) {
        return Err(SomError::NumericDomain(format!(
            "decay requires sigma > 1 so that ln(sigma) > 0, got {}",
            sigma
        )));
    }

    let lambda = max_iterations as f64 / sigma.ln();
    let factor = (-(t as f64) / lambda).exp();

    Ok(DecayedParams {
        alpha: alpha * factor,
        sigma: sigma * factor,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_step_is_undecayed() {
        let p = decay(0, 0.1, 5.0, 100).unwrap();
        assert!((p.alpha - 0.1).abs() < 1e-12);
        assert!((p.sigma - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_radius_reaches_one_at_horizon() {
        let p = decay(100, 0.1, 5.0, 100).unwrap();
        assert!((p.sigma - 1.0).abs() < 1e-9);
        assert!((p.alpha - 0.1 / 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_monotonic_decay() {
        let mut prev = decay(0, 0.5, 8.0, 50).unwrap();
        for t in 1..50 {
            let p = decay(t, 0.5, 8.0, 50).unwrap();
            assert!(p.alpha < prev.alpha);
            assert!(p.sigma < prev.sigma);
            prev = p;
        }
    }

    #[test]
    fn test_matches_closed_form() {
        let (alpha, sigma, max_iter, t) = (0.3, 4.0, 20, 7);
        let lambda = max_iter as f64 / f64::ln(sigma);
        let p = decay(t, alpha, sigma, max_iter).unwrap();
        assert!((p.sigma - sigma * (-(t as f64) / lambda).exp()).abs() < 1e-12);
        assert!((p.alpha - alpha * (-(t as f64) / lambda).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_domain_errors() {
        assert!(matches!(decay(0, 0.1, 1.0, 10), Err(SomError::NumericDomain(_))));
        assert!(matches!(decay(0, 0.1, 0.5, 10), Err(SomError::NumericDomain(_))));
        assert!(matches!(decay(0, 0.1, 3.0, 0), Err(SomError::NumericDomain(_))));
        assert!(decay(0, 0.1, f64::INFINITY, 10).is_err());
    }

    #[test]
    fn test_granularity_serde_names() {
        let json = serde_json::to_string(&DecayGranularity::PerSample).unwrap();
        assert_eq!(json, "\"per_sample\"");
        let parsed: DecayGranularity = serde_json::from_str("\"per_epoch\"").unwrap();
        assert_eq!(parsed, DecayGranularity::PerEpoch);
    }
}
