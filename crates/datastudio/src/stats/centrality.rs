//! Tests and transforms concerning the center of a sample

use std::fmt;

use crate::error::StatsError;

use super::association::chi2_independence;
use super::dist::t_sf_two_sided;
use super::{mean, require_min, variance, Alternative, TestResult};

/// One-sample t-test of the mean against `mu`.
pub fn t_test_one_sample(
    xs: &[f64],
    mu: f64,
    alternative: Alternative,
) -> Result<TestResult, StatsError> {
    require_min("one-sample t-test", 2, xs.len())?;
    let n = xs.len() as f64;
    let s2 = variance(xs, 1.0);
    if s2 == 0.0 {
        return Err(StatsError::Degenerate("the sample is constant".to_string()));
    }
    let t = (mean(xs) - mu) / (s2 / n).sqrt();
    let p_two = t_sf_two_sided(t, n - 1.0);
    Ok(TestResult::new(t, one_sided(t, p_two, alternative)))
}

// Fold a two-sided t p-value into the requested alternative.
pub(crate) fn one_sided(statistic: f64, p_two: f64, alternative: Alternative) -> f64 {
    match alternative {
        Alternative::TwoSided => p_two,
        Alternative::Greater => {
            if statistic >= 0.0 {
                p_two / 2.0
            } else {
                1.0 - p_two / 2.0
            }
        }
        Alternative::Less => {
            if statistic <= 0.0 {
                p_two / 2.0
            } else {
                1.0 - p_two / 2.0
            }
        }
    }
}

/// How values equal to the grand median enter the median test table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ties {
    /// Count ties with the values below the median
    #[default]
    Below,
    /// Count ties with the values above the median
    Above,
    /// Drop ties from the table
    Ignore,
}

/// Outcome of Mood's median test.
#[derive(Debug, Clone)]
pub struct MedianTest {
    /// The chi-squared statistic of the above/below table
    pub statistic: f64,
    /// Upper tail probability
    pub p_value: f64,
    /// Median of the pooled samples
    pub grand_median: f64,
    /// Above-median and below-median counts per sample
    pub table: [Vec<f64>; 2],
}

impl fmt::Display for MedianTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "chi2 = {:.6}, p-value = {:.6}, grand median = {:.6}",
            self.statistic, self.p_value, self.grand_median
        )
    }
}

/// Mood's median test across two or more samples.
///
/// The Yates continuity correction is applied for exactly two samples.
pub fn median_test(groups: &[&[f64]], ties: Ties) -> Result<MedianTest, StatsError> {
    require_min("median test", 2, groups.len())?;
    for g in groups {
        require_min("median test group", 1, g.len())?;
    }
    let mut pooled: Vec<f64> = groups.iter().flat_map(|g| g.iter().copied()).collect();
    pooled.sort_by(f64::total_cmp);
    let grand_median = median_of_sorted(&pooled);

    let mut above = vec![0.0; groups.len()];
    let mut below = vec![0.0; groups.len()];
    for (j, g) in groups.iter().enumerate() {
        for &x in *g {
            if x > grand_median {
                above[j] += 1.0;
            } else if x < grand_median {
                below[j] += 1.0;
            } else {
                match ties {
                    Ties::Below => below[j] += 1.0,
                    Ties::Above => above[j] += 1.0,
                    Ties::Ignore => {}
                }
            }
        }
    }
    let table = vec![above.clone(), below.clone()];
    let chi2 = chi2_independence(&table, groups.len() == 2)?;
    Ok(MedianTest {
        statistic: chi2.statistic,
        p_value: chi2.p_value,
        grand_median,
        table: [above, below],
    })
}

fn median_of_sorted(xs: &[f64]) -> f64 {
    let n = xs.len();
    if n % 2 == 1 {
        xs[n / 2]
    } else {
        (xs[n / 2 - 1] + xs[n / 2]) / 2.0
    }
}

/// Standard scores of a sample, using `ddof` delta degrees of freedom.
pub fn z_scores(xs: &[f64], ddof: f64) -> Result<Vec<f64>, StatsError> {
    require_min("z-scores", 2, xs.len())?;
    let m = mean(xs);
    let s = variance(xs, ddof).sqrt();
    if s == 0.0 {
        return Err(StatsError::Degenerate("the sample is constant".to_string()));
    }
    Ok(xs.iter().map(|x| (x - m) / s).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_one_sample_t_at_null() {
        // symmetric around the null mean: t = 0, p = 1
        let xs = [9.0, 10.0, 11.0];
        let r = t_test_one_sample(&xs, 10.0, Alternative::TwoSided).unwrap();
        assert!(close(r.statistic, 0.0, 1e-12));
        assert!(close(r.p_value, 1.0, 1e-12));
    }

    #[test]
    fn test_one_sample_t_known() {
        // mean 12, s = 1.581..., n = 5, mu = 10: t = 2.8284
        let xs = [10.0, 11.0, 12.0, 13.0, 14.0];
        let r = t_test_one_sample(&xs, 10.0, Alternative::TwoSided).unwrap();
        assert!(close(r.statistic, 2.828_427_124_746_19, 1e-9));
        assert!(close(r.p_value, 0.047_420_655_584_32, 1e-9));
        let g = t_test_one_sample(&xs, 10.0, Alternative::Greater).unwrap();
        assert!(close(g.p_value, r.p_value / 2.0, 1e-12));
        let l = t_test_one_sample(&xs, 10.0, Alternative::Less).unwrap();
        assert!(close(l.p_value, 1.0 - r.p_value / 2.0, 1e-12));
    }

    #[test]
    fn test_median_test_counts() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [5.0, 6.0, 7.0, 8.0];
        let r = median_test(&[&a, &b], Ties::Below).unwrap();
        assert!(close(r.grand_median, 4.5, 1e-12));
        assert_eq!(r.table[0], vec![0.0, 4.0]);
        assert_eq!(r.table[1], vec![4.0, 0.0]);
    }

    #[test]
    fn test_median_test_tie_policy() {
        let a = [1.0, 2.0, 2.0];
        let b = [2.0, 3.0, 4.0];
        let below = median_test(&[&a, &b], Ties::Below).unwrap();
        assert_eq!(below.table[1], vec![3.0, 1.0]);
        let above = median_test(&[&a, &b], Ties::Above).unwrap();
        assert_eq!(above.table[0], vec![2.0, 3.0]);
    }

    #[test]
    fn test_z_scores() {
        let z = z_scores(&[2.0, 4.0, 6.0], 0.0).unwrap();
        assert!(close(z[0], -1.224_744_871_391_589, 1e-9));
        assert!(close(z[1], 0.0, 1e-12));
        assert!(close(z.iter().sum::<f64>(), 0.0, 1e-12));
    }
}
