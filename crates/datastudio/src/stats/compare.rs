//! Two-sample comparison tests
//!
//! Parametric t-tests (pooled, Welch, paired), the rank-based
//! Mann-Whitney and Wilcoxon tests, the exact binomial test, and
//! McNemar's test for paired binary outcomes.

use std::fmt;

use crate::error::StatsError;

use super::centrality::{one_sided, t_test_one_sample};
use super::dist::{binom_cdf, binom_pmf, chi2_sf, normal_sf, t_sf_two_sided};
use super::{mean, rank_with_ties, require_min, variance, Alternative, TestResult};

/// Outcome of an independent two-sample t-test.
#[derive(Debug, Clone, Copy)]
pub struct TTest {
    /// The t statistic
    pub statistic: f64,
    /// p-value under the requested alternative
    pub p_value: f64,
    /// Degrees of freedom; fractional for the Welch variant
    pub df: f64,
}

impl fmt::Display for TTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t({:.2}) = {:.6}, p-value = {:.6}",
            self.df, self.statistic, self.p_value
        )
    }
}

/// Independent two-sample t-test.
///
/// `equal_var` selects the pooled-variance form; otherwise Welch's
/// unequal-variance form with Satterthwaite degrees of freedom is used.
pub fn t_test_independent(
    x: &[f64],
    y: &[f64],
    equal_var: bool,
    alternative: Alternative,
) -> Result<TTest, StatsError> {
    require_min("two-sample t-test", 2, x.len())?;
    require_min("two-sample t-test", 2, y.len())?;
    let (nx, ny) = (x.len() as f64, y.len() as f64);
    let (vx, vy) = (variance(x, 1.0), variance(y, 1.0));
    if vx == 0.0 && vy == 0.0 {
        return Err(StatsError::Degenerate("both samples are constant".to_string()));
    }
    let (se, df) = if equal_var {
        let pooled = ((nx - 1.0) * vx + (ny - 1.0) * vy) / (nx + ny - 2.0);
        ((pooled * (1.0 / nx + 1.0 / ny)).sqrt(), nx + ny - 2.0)
    } else {
        let (ax, ay) = (vx / nx, vy / ny);
        let df = (ax + ay).powi(2)
            / (ax * ax / (nx - 1.0) + ay * ay / (ny - 1.0));
        ((ax + ay).sqrt(), df)
    };
    let t = (mean(x) - mean(y)) / se;
    let p_two = t_sf_two_sided(t, df);
    Ok(TTest {
        statistic: t,
        p_value: one_sided(t, p_two, alternative).clamp(0.0, 1.0),
        df,
    })
}

/// Paired t-test: a one-sample t-test on the differences.
pub fn t_test_paired(
    x: &[f64],
    y: &[f64],
    alternative: Alternative,
) -> Result<TestResult, StatsError> {
    if x.len() != y.len() {
        return Err(StatsError::UnpairedSamples);
    }
    let diffs: Vec<f64> = x.iter().zip(y).map(|(a, b)| a - b).collect();
    t_test_one_sample(&diffs, 0.0, alternative)
}

/// Mann-Whitney U test via the tie-corrected normal approximation
/// with continuity correction. The statistic is U for the first sample.
pub fn mann_whitney_u(
    x: &[f64],
    y: &[f64],
    alternative: Alternative,
) -> Result<TestResult, StatsError> {
    require_min("Mann-Whitney U", 2, x.len())?;
    require_min("Mann-Whitney U", 2, y.len())?;
    let (nx, ny) = (x.len() as f64, y.len() as f64);
    let pooled: Vec<f64> = x.iter().chain(y).copied().collect();
    let (ranks, tie_term) = rank_with_ties(&pooled);
    let r1: f64 = ranks[..x.len()].iter().sum();
    let u1 = r1 - nx * (nx + 1.0) / 2.0;

    let n = nx + ny;
    let mu = nx * ny / 2.0;
    let sigma2 = nx * ny / 12.0 * ((n + 1.0) - tie_term / (n * (n - 1.0)));
    if sigma2 <= 0.0 {
        return Err(StatsError::Degenerate("all values are identical".to_string()));
    }
    let sigma = sigma2.sqrt();
    let p_value = match alternative {
        Alternative::TwoSided => {
            2.0 * normal_sf(((u1 - mu).abs() - 0.5) / sigma)
        }
        Alternative::Greater => normal_sf((u1 - mu - 0.5) / sigma),
        Alternative::Less => normal_sf((mu - u1 - 0.5) / sigma),
    };
    Ok(TestResult::new(u1, p_value))
}

/// Wilcoxon signed-rank test on paired samples.
///
/// Zero differences are discarded. The statistic is the smaller of the
/// positive and negative rank sums; the p-value comes from the
/// tie-corrected normal approximation, so at least ten nonzero
/// differences are required.
pub fn wilcoxon_signed_rank(x: &[f64], y: &[f64]) -> Result<TestResult, StatsError> {
    if x.len() != y.len() {
        return Err(StatsError::UnpairedSamples);
    }
    let diffs: Vec<f64> = x
        .iter()
        .zip(y)
        .map(|(a, b)| a - b)
        .filter(|d| *d != 0.0)
        .collect();
    require_min("Wilcoxon signed-rank", 10, diffs.len())?;
    let n = diffs.len() as f64;
    let abs: Vec<f64> = diffs.iter().map(|d| d.abs()).collect();
    let (ranks, tie_term) = rank_with_ties(&abs);
    let w_plus: f64 = diffs
        .iter()
        .zip(&ranks)
        .filter(|(d, _)| **d > 0.0)
        .map(|(_, r)| r)
        .sum();
    let w_minus = n * (n + 1.0) / 2.0 - w_plus;
    let statistic = w_plus.min(w_minus);

    let mu = n * (n + 1.0) / 4.0;
    let sigma2 = n * (n + 1.0) * (2.0 * n + 1.0) / 24.0 - tie_term / 48.0;
    if sigma2 <= 0.0 {
        return Err(StatsError::Degenerate("all differences are tied".to_string()));
    }
    let z = (w_plus - mu) / sigma2.sqrt();
    Ok(TestResult::new(statistic, 2.0 * normal_sf(z.abs())))
}

/// Exact binomial test of a success probability.
///
/// The statistic is the observed success count; the two-sided p-value
/// sums every outcome no more likely than the observed one.
pub fn binom_test(
    successes: u64,
    n: u64,
    p: f64,
    alternative: Alternative,
) -> Result<TestResult, StatsError> {
    if n == 0 || successes > n {
        return Err(StatsError::BadInput(
            "successes must not exceed a positive trial count".to_string(),
        ));
    }
    if !(0.0..=1.0).contains(&p) {
        return Err(StatsError::BadInput(
            "the null probability must lie in [0, 1]".to_string(),
        ));
    }
    let p_value = match alternative {
        Alternative::Less => binom_cdf(successes, n, p),
        Alternative::Greater => {
            if successes == 0 {
                1.0
            } else {
                1.0 - binom_cdf(successes - 1, n, p)
            }
        }
        Alternative::TwoSided => {
            let threshold = binom_pmf(successes, n, p) * (1.0 + 1e-7);
            (0..=n)
                .map(|k| binom_pmf(k, n, p))
                .filter(|&q| q <= threshold)
                .sum()
        }
    };
    Ok(TestResult::new(successes as f64, p_value))
}

/// McNemar's test for paired binary outcomes, continuity corrected.
///
/// Takes the full 2x2 table `[[a, b], [c, d]]`; only the discordant
/// cells `b` and `c` enter the statistic.
pub fn mcnemar(table: [[u64; 2]; 2]) -> Result<TestResult, StatsError> {
    let b = table[0][1] as f64;
    let c = table[1][0] as f64;
    if b + c == 0.0 {
        return Err(StatsError::Degenerate(
            "no discordant pairs in the table".to_string(),
        ));
    }
    let statistic = ((b - c).abs() - 1.0).max(0.0).powi(2) / (b + c);
    Ok(TestResult::new(statistic, chi2_sf(statistic, 1.0)))
}
