//! Goodness-of-fit tests against the normal distribution
//!
//! Kolmogorov-Smirnov with estimated parameters, Anderson-Darling with
//! Stephens' small-sample correction, and the D'Agostino-Pearson
//! omnibus test combining the skewness and kurtosis statistics.

use std::fmt;

use crate::error::StatsError;

use super::dispersion::{kurtosis_test, skew_test};
use super::dist::{chi2_sf, kolmogorov_sf, normal_cdf};
use super::{mean, require_min, variance, TestResult};

/// Kolmogorov-Smirnov test of normality with mean and standard
/// deviation estimated from the sample.
///
/// The p-value uses the asymptotic Kolmogorov distribution with the
/// Stephens finite-sample adjustment of the statistic.
pub fn ks_normal(xs: &[f64]) -> Result<TestResult, StatsError> {
    require_min("Kolmogorov-Smirnov", 4, xs.len())?;
    let n = xs.len() as f64;
    let m = mean(xs);
    let s = variance(xs, 1.0).sqrt();
    if s == 0.0 {
        return Err(StatsError::Degenerate("the sample is constant".to_string()));
    }
    let mut sorted = xs.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mut d: f64 = 0.0;
    for (i, x) in sorted.iter().enumerate() {
        let f = normal_cdf((x - m) / s);
        let upper = (i + 1) as f64 / n - f;
        let lower = f - i as f64 / n;
        d = d.max(upper).max(lower);
    }
    let lambda = (n.sqrt() + 0.12 + 0.11 / n.sqrt()) * d;
    Ok(TestResult::new(d, kolmogorov_sf(lambda)))
}

/// Outcome of the Anderson-Darling normality test.
#[derive(Debug, Clone, Copy)]
pub struct AndersonDarling {
    /// The corrected statistic A*²
    pub statistic: f64,
    /// `(significance percent, critical value)` pairs
    pub critical_values: [(f64, f64); 5],
}

impl AndersonDarling {
    /// Whether normality is rejected at the given significance
    /// percentage; `None` when the level is not tabulated.
    pub fn rejects_at(&self, significance: f64) -> Option<bool> {
        self.critical_values
            .iter()
            .find(|(sig, _)| *sig == significance)
            .map(|(_, crit)| self.statistic > *crit)
    }
}

impl fmt::Display for AndersonDarling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A*2 = {:.6}, critical values:", self.statistic)?;
        for (sig, crit) in &self.critical_values {
            write!(f, " {sig}% -> {crit:.3}")?;
        }
        Ok(())
    }
}

// Stephens' critical values for the case of estimated mean and variance.
const AD_CRITICAL: [(f64, f64); 5] = [
    (15.0, 0.576),
    (10.0, 0.656),
    (5.0, 0.787),
    (2.5, 0.918),
    (1.0, 1.092),
];

/// Anderson-Darling test of normality with estimated parameters.
pub fn anderson_darling(xs: &[f64]) -> Result<AndersonDarling, StatsError> {
    require_min("Anderson-Darling", 8, xs.len())?;
    let n = xs.len();
    let nf = n as f64;
    let m = mean(xs);
    let s = variance(xs, 1.0).sqrt();
    if s == 0.0 {
        return Err(StatsError::Degenerate("the sample is constant".to_string()));
    }
    let mut sorted = xs.to_vec();
    sorted.sort_by(f64::total_cmp);
    let z: Vec<f64> = sorted
        .iter()
        .map(|x| normal_cdf((x - m) / s).clamp(1e-15, 1.0 - 1e-15))
        .collect();
    let mut sum = 0.0;
    for i in 0..n {
        sum += (2.0 * i as f64 + 1.0) * (z[i].ln() + (1.0 - z[n - 1 - i]).ln());
    }
    let a2 = -nf - sum / nf;
    let statistic = a2 * (1.0 + 0.75 / nf + 2.25 / (nf * nf));
    Ok(AndersonDarling {
        statistic,
        critical_values: AD_CRITICAL,
    })
}

/// D'Agostino-Pearson omnibus normality test.
///
/// Combines the squared skewness and kurtosis statistics into a
/// chi-squared statistic with two degrees of freedom.
pub fn dagostino_pearson(xs: &[f64]) -> Result<TestResult, StatsError> {
    require_min("omnibus normality test", 20, xs.len())?;
    let zs = skew_test(xs)?.statistic;
    let zk = kurtosis_test(xs)?.statistic;
    let k2 = zs * zs + zk * zk;
    Ok(TestResult::new(k2, chi2_sf(k2, 2.0)))
}
