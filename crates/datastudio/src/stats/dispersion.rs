//! Shape statistics and their significance tests
//!
//! Sample skewness and kurtosis, D'Agostino's skewness test, and the
//! Anscombe-Glynn kurtosis test. The test statistics are the normal
//! approximations the omnibus normality test combines.

use crate::error::StatsError;

use super::dist::normal_sf;
use super::{mean, require_min, TestResult};

fn central_moment(xs: &[f64], order: i32) -> f64 {
    let m = mean(xs);
    xs.iter().map(|x| (x - m).powi(order)).sum::<f64>() / xs.len() as f64
}

/// Sample skewness g1 = m3 / m2^(3/2).
pub fn skewness(xs: &[f64]) -> Result<f64, StatsError> {
    require_min("skewness", 3, xs.len())?;
    let m2 = central_moment(xs, 2);
    if m2 == 0.0 {
        return Err(StatsError::Degenerate("the sample is constant".to_string()));
    }
    Ok(central_moment(xs, 3) / m2.powf(1.5))
}

/// Sample excess kurtosis g2 = m4 / m2^2 − 3.
pub fn kurtosis(xs: &[f64]) -> Result<f64, StatsError> {
    require_min("kurtosis", 4, xs.len())?;
    let m2 = central_moment(xs, 2);
    if m2 == 0.0 {
        return Err(StatsError::Degenerate("the sample is constant".to_string()));
    }
    Ok(central_moment(xs, 4) / (m2 * m2) - 3.0)
}

/// Bias-corrected sample skewness G1 = g1 · sqrt(n(n − 1)) / (n − 2).
pub fn skewness_corrected(xs: &[f64]) -> Result<f64, StatsError> {
    let n = xs.len() as f64;
    Ok(skewness(xs)? * (n * (n - 1.0)).sqrt() / (n - 2.0))
}

/// Bias-corrected excess kurtosis
/// G2 = ((n + 1) g2 + 6)(n − 1) / ((n − 2)(n − 3)).
pub fn kurtosis_corrected(xs: &[f64]) -> Result<f64, StatsError> {
    let n = xs.len() as f64;
    Ok(((n + 1.0) * kurtosis(xs)? + 6.0) * (n - 1.0) / ((n - 2.0) * (n - 3.0)))
}

/// D'Agostino's test that the skewness of the population is zero.
///
/// Transforms g1 to an approximately standard normal statistic; at
/// least eight observations are required.
pub fn skew_test(xs: &[f64]) -> Result<TestResult, StatsError> {
    require_min("skewness test", 8, xs.len())?;
    let n = xs.len() as f64;
    let g1 = skewness(xs)?;
    let y = g1 * ((n + 1.0) * (n + 3.0) / (6.0 * (n - 2.0))).sqrt();
    let beta2 = 3.0 * (n * n + 27.0 * n - 70.0) * (n + 1.0) * (n + 3.0)
        / ((n - 2.0) * (n + 5.0) * (n + 7.0) * (n + 9.0));
    let w2 = -1.0 + (2.0 * (beta2 - 1.0)).sqrt();
    let delta = 1.0 / (0.5 * w2.ln()).sqrt();
    let alpha = (2.0 / (w2 - 1.0)).sqrt();
    let ya = y / alpha;
    let z = delta * (ya + (ya * ya + 1.0).sqrt()).ln();
    Ok(TestResult::new(z, 2.0 * normal_sf(z.abs())))
}

/// Anscombe-Glynn test that the kurtosis matches a normal population.
///
/// At least twenty observations are required for the approximation to
/// hold.
pub fn kurtosis_test(xs: &[f64]) -> Result<TestResult, StatsError> {
    require_min("kurtosis test", 20, xs.len())?;
    let n = xs.len() as f64;
    let b2 = kurtosis(xs)? + 3.0;
    let e = 3.0 * (n - 1.0) / (n + 1.0);
    let var = 24.0 * n * (n - 2.0) * (n - 3.0)
        / ((n + 1.0) * (n + 1.0) * (n + 3.0) * (n + 5.0));
    let x = (b2 - e) / var.sqrt();
    let sqrt_beta1 = 6.0 * (n * n - 5.0 * n + 2.0) / ((n + 7.0) * (n + 9.0))
        * (6.0 * (n + 3.0) * (n + 5.0) / (n * (n - 2.0) * (n - 3.0))).sqrt();
    let a = 6.0
        + 8.0 / sqrt_beta1
            * (2.0 / sqrt_beta1 + (1.0 + 4.0 / (sqrt_beta1 * sqrt_beta1)).sqrt());
    let denom = 1.0 + x * (2.0 / (a - 4.0)).sqrt();
    if denom == 0.0 {
        return Err(StatsError::Degenerate(
            "kurtosis statistic is at the transform singularity".to_string(),
        ));
    }
    let term1 = 1.0 - 2.0 / (9.0 * a);
    let term2 = denom.signum() * ((1.0 - 2.0 / a) / denom.abs()).cbrt();
    let z = (term1 - term2) / (2.0 / (9.0 * a)).sqrt();
    Ok(TestResult::new(z, 2.0 * normal_sf(z.abs())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_skewness_symmetric() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert!(close(skewness(&xs).unwrap(), 0.0, 1e-12));
    }

    #[test]
    fn test_skewness_right_tail() {
        let xs = [1.0, 2.0, 3.0, 4.0, 100.0];
        assert!(skewness(&xs).unwrap() > 1.0);
    }

    #[test]
    fn test_bias_correction_scale() {
        let xs = [2.0, 8.0, 0.0, 4.0, 1.0, 9.0, 9.0, 0.0];
        let n = xs.len() as f64;
        let g1 = skewness(&xs).unwrap();
        let g2 = kurtosis(&xs).unwrap();
        // symmetric samples stay symmetric under the correction, skewed
        // samples move away from zero
        assert!(skewness_corrected(&xs).unwrap().abs() > g1.abs());
        assert!(close(
            skewness_corrected(&xs).unwrap(),
            g1 * (n * (n - 1.0)).sqrt() / (n - 2.0),
            1e-12
        ));
        assert!(close(
            kurtosis_corrected(&xs).unwrap(),
            ((n + 1.0) * g2 + 6.0) * (n - 1.0) / ((n - 2.0) * (n - 3.0)),
            1e-12
        ));
    }

    #[test]
    fn test_kurtosis_two_point() {
        // symmetric two-point distribution has b2 = 1, excess -2
        let xs: Vec<f64> = (0..20).map(|i| if i % 2 == 0 { -1.0 } else { 1.0 }).collect();
        assert!(close(kurtosis(&xs).unwrap(), -2.0, 1e-12));
    }

    #[test]
    fn test_skew_test_symmetric() {
        let xs: Vec<f64> = (1..=9).map(f64::from).collect();
        let r = skew_test(&xs).unwrap();
        assert!(close(r.statistic, 0.0, 1e-12));
        assert!(close(r.p_value, 1.0, 1e-12));
    }

    #[test]
    fn test_kurtosis_test_platykurtic() {
        let xs: Vec<f64> = (0..24).map(|i| if i % 2 == 0 { -1.0 } else { 1.0 }).collect();
        let r = kurtosis_test(&xs).unwrap();
        assert!(r.statistic < 0.0);
        assert!(r.p_value < 0.05);
    }

    #[test]
    fn test_constant_sample() {
        assert!(skewness(&[2.0, 2.0, 2.0]).is_err());
        assert!(kurtosis(&[2.0, 2.0, 2.0, 2.0]).is_err());
    }
}
