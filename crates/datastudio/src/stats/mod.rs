//! Statistical tests for data understanding
//!
//! The module groups hypothesis tests by question:
//!
//! - [`association`] - are two variables related?
//! - [`centrality`] - where is the center of a sample?
//! - [`compare`] - do two samples differ?
//! - [`dispersion`] - how spread out and how shaped is a sample?
//! - [`normality`] - is a sample plausibly Gaussian?
//!
//! Every test returns a result struct carrying at least a statistic and
//! a p-value; p-values are always clamped to `[0, 1]`. Distribution tail
//! areas come from [`dist`], which in turn reduces to the special
//! functions in [`special`].

pub mod association;
pub mod centrality;
pub mod compare;
pub mod dispersion;
pub mod dist;
pub mod normality;
pub mod special;

use std::fmt;

use crate::error::StatsError;

/// A test statistic and its p-value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestResult {
    /// The test statistic
    pub statistic: f64,
    /// Probability of a statistic at least this extreme under the null
    pub p_value: f64,
}

impl TestResult {
    pub(crate) fn new(statistic: f64, p_value: f64) -> Self {
        TestResult {
            statistic,
            p_value: p_value.clamp(0.0, 1.0),
        }
    }

    /// Whether the null hypothesis is rejected at significance `alpha`.
    pub fn rejects_at(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "statistic = {:.6}, p-value = {:.6}",
            self.statistic, self.p_value
        )
    }
}

/// Direction of the alternative hypothesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alternative {
    /// The parameter differs in either direction
    #[default]
    TwoSided,
    /// The parameter is smaller than under the null
    Less,
    /// The parameter is larger than under the null
    Greater,
}

pub(crate) fn require_min(test: &str, min: usize, got: usize) -> Result<(), StatsError> {
    if got < min {
        return Err(StatsError::SampleTooSmall {
            test: test.to_string(),
            min,
            got,
        });
    }
    Ok(())
}

pub(crate) fn mean(xs: &[f64]) -> f64 {
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Variance with `ddof` delta degrees of freedom (1.0 for the sample variance).
pub(crate) fn variance(xs: &[f64], ddof: f64) -> f64 {
    let m = mean(xs);
    xs.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (xs.len() as f64 - ddof)
}

/// Average ranks (1-based, ties share their mean rank) and the tie
/// correction term Σ(t³ − t) over the tie groups.
pub(crate) fn rank_with_ties(xs: &[f64]) -> (Vec<f64>, f64) {
    let n = xs.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| xs[a].total_cmp(&xs[b]));
    let mut ranks = vec![0.0; n];
    let mut tie_term = 0.0;
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && xs[order[j + 1]] == xs[order[i]] {
            j += 1;
        }
        let avg = (i + j) as f64 / 2.0 + 1.0;
        for &idx in &order[i..=j] {
            ranks[idx] = avg;
        }
        let t = (j - i + 1) as f64;
        tie_term += t * t * t - t;
        i = j + 1;
    }
    (ranks, tie_term)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_p_value_clamped() {
        assert_eq!(TestResult::new(1.0, 1.5).p_value, 1.0);
        assert_eq!(TestResult::new(1.0, -0.1).p_value, 0.0);
    }

    #[test]
    fn test_mean_and_variance() {
        let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&xs), 5.0);
        assert!((variance(&xs, 0.0) - 4.0).abs() < 1e-12);
        assert!((variance(&xs, 1.0) - 32.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_ranks_with_ties() {
        let (ranks, ties) = rank_with_ties(&[3.0, 1.0, 3.0, 2.0]);
        assert_eq!(ranks, vec![3.5, 1.0, 3.5, 2.0]);
        // one tie group of size 2
        assert_eq!(ties, 6.0);
    }
}
