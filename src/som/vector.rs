//! Vector kernels shared by BMU search and the neighborhood update.
//!
//! Written with 4-wide unrolled loops so the compiler can autovectorize.
//! Both kernels are deterministic: the summation order depends only on
//! the vector length.

/// Computes the squared Euclidean distance between two slices.
#[inline]
pub fn distance_squared(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());

    let chunks = a.len() / 4;
    let remainder = a.len() % 4;

    let mut sum = 0.0f64;

    for i in 0..chunks {
        let base = i * 4;
        let d0 = a[base] - b[base];
        let d1 = a[base + 1] - b[base + 1];
        let d2 = a[base + 2] - b[base + 2];
        let d3 = a[base + 3] - b[base + 3];

        sum += d0 * d0 + d1 * d1 + d2 * d2 + d3 * d3;
    }

    let base = chunks * 4;
    for i in 0..remainder {
        let d = a[base + i] - b[base + i];
        sum += d * d;
    }

    sum
}

/// Computes the Euclidean distance between two slices.
#[inline]
pub fn distance(a: &[f64], b: &[f64]) -> f64 {
    distance_squared(a, b).sqrt()
}

/// Moves `weights` towards `input` by `influence`, component-wise:
/// `w += influence * (i - w)`.
#[inline]
pub fn pull_toward(weights: &mut [f64], input: &[f64], influence: f64) {
    debug_assert_eq!(weights.len(), input.len());

    let chunks = weights.len() / 4;
    let remainder = weights.len() % 4;

    for i in 0..chunks {
        let base = i * 4;
        weights[base] += influence * (input[base] - weights[base]);
        weights[base + 1] += influence * (input[base + 1] - weights[base + 1]);
        weights[base + 2] += influence * (input[base + 2] - weights[base + 2]);
        weights[base + 3] += influence * (input[base + 3] - weights[base + 3]);
    }

    let base = chunks * 4;
    for i in 0..remainder {
        weights[base + i] += influence * (input[base + i] - weights[base + i]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = [1.0, 0.0, 0.0];
        let b = [0.0, 1.0, 0.0];
        assert!((distance(&a, &b) - std::f64::consts::SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn test_distance_squared_unrolled_and_remainder() {
        let a: Vec<f64> = (0..9).map(|i| i as f64).collect();
        let b = vec![0.0; 9];
        // 0^2 + 1^2 + ... + 8^2
        assert!((distance_squared(&a, &b) - 204.0).abs() < 1e-12);
    }

    #[test]
    fn test_pull_toward() {
        let mut w = vec![0.0; 5];
        let input = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        pull_toward(&mut w, &input, 0.5);
        assert_eq!(w, vec![0.5, 1.0, 1.5, 2.0, 2.5]);
    }

    #[test]
    fn test_pull_toward_full_influence_reaches_input() {
        let mut w = vec![0.3, 0.7];
        pull_toward(&mut w, &[1.0, -1.0], 1.0);
        assert!((w[0] - 1.0).abs() < 1e-12);
        assert!((w[1] + 1.0).abs() < 1e-12);
    }
}
