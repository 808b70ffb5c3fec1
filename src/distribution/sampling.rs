//! Normal sample generation.
//!
//! Samples are drawn from a caller-supplied RNG.

use rand::Rng;
use std::f64::consts::PI;

use super::normal::Normal;
use crate::error::Result;

/// Draws one N(0, 1) variate with the Box–Muller transform.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use u_statcalc::distribution::sample_standard_normal;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// assert!(sample_standard_normal(&mut rng).is_finite());
/// ```
#[inline]
pub fn sample_standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // U1 ∈ [MIN_POSITIVE, 1) so ln U1 is finite; U2 ∈ [0, 1)
    let u1: f64 = rng.random::<f64>().max(f64::MIN_POSITIVE);
    let u2: f64 = rng.random::<f64>();
    let r = (-2.0 * u1.ln()).sqrt();
    r * (2.0 * PI * u2).cos()
}

impl Normal {
    /// Draws `count` independent variates.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<f64> {
        (0..count)
            .map(|_| self.mean() + self.std_dev() * sample_standard_normal(rng))
            .collect()
    }
}

/// Draws `count` independent samples from N(mean, std_dev).
///
/// # Errors
///
/// `InvalidParameter` if `std_dev ≤ 0` or either parameter is non-finite.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use u_statcalc::distribution::generate_normal_samples;
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let data = generate_normal_samples(10.0, 2.0, 100, &mut rng).unwrap();
/// assert_eq!(data.len(), 100);
/// ```
pub fn generate_normal_samples<R: Rng + ?Sized>(
    mean: f64,
    std_dev: f64,
    count: usize,
    rng: &mut R,
) -> Result<Vec<f64>> {
    let normal = Normal::new(mean, std_dev)?;
    Ok(normal.sample(rng, count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn requested_length() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            generate_normal_samples(0.0, 1.0, 37, &mut rng)
                .expect("valid")
                .len(),
            37
        );
        assert!(generate_normal_samples(0.0, 1.0, 0, &mut rng)
            .expect("valid")
            .is_empty());
    }

    #[test]
    fn same_seed_same_samples() {
        let a = generate_normal_samples(5.0, 2.0, 50, &mut StdRng::seed_from_u64(99))
            .expect("valid");
        let b = generate_normal_samples(5.0, 2.0, 50, &mut StdRng::seed_from_u64(99))
            .expect("valid");
        assert_eq!(a, b);
    }

    #[test]
    fn sample_moments_match_parameters() {
        let mut rng = StdRng::seed_from_u64(2024);
        let data = generate_normal_samples(10.0, 3.0, 20_000, &mut rng).expect("valid");
        let n = data.len() as f64;
        let mean = data.iter().sum::<f64>() / n;
        let var = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        // Standard error of the mean is 3/√20000 ≈ 0.021.
        assert!((mean - 10.0).abs() < 0.15, "mean = {mean}");
        assert!((var.sqrt() - 3.0).abs() < 0.15, "sd = {}", var.sqrt());
    }

    #[test]
    fn roughly_68_percent_within_one_sigma() {
        let mut rng = StdRng::seed_from_u64(17);
        let data = generate_normal_samples(0.0, 1.0, 10_000, &mut rng).expect("valid");
        let inside = data.iter().filter(|x| x.abs() <= 1.0).count() as f64 / 10_000.0;
        assert!((inside - 0.6827).abs() < 0.03, "fraction = {inside}");
    }

    #[test]
    fn invalid_std_dev() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate_normal_samples(0.0, -2.0, 10, &mut rng).is_err());
        assert!(generate_normal_samples(f64::NAN, 1.0, 10, &mut rng).is_err());
    }
}
