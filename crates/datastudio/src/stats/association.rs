//! Tests of association between variables
//!
//! Chi-squared goodness of fit and independence, Fisher's exact test,
//! one-way analysis of variance, the Kruskal-Wallis rank test, and the
//! Pearson and Spearman correlation coefficients.

use std::fmt;

use crate::error::{FrameError, StatsError};
use crate::frame::{DataFrame, Series};

use super::dist::{chi2_sf, f_sf, t_sf_two_sided};
use super::special::ln_gamma;
use super::{mean, rank_with_ties, require_min, Alternative, TestResult};

/// Chi-squared goodness of fit against expected frequencies.
///
/// When `expected` is `None` a uniform distribution over the categories
/// is assumed. `ddof` is the number of parameters estimated from the
/// data, subtracted from the `k - 1` degrees of freedom.
pub fn chi2_goodness_of_fit(
    observed: &[f64],
    expected: Option<&[f64]>,
    ddof: usize,
) -> Result<TestResult, StatsError> {
    require_min("chi-squared goodness of fit", 2, observed.len())?;
    let uniform;
    let expected = match expected {
        Some(e) => {
            if e.len() != observed.len() {
                return Err(StatsError::BadShape(
                    "observed and expected frequencies differ in length".to_string(),
                ));
            }
            e
        }
        None => {
            let total: f64 = observed.iter().sum();
            uniform = vec![total / observed.len() as f64; observed.len()];
            uniform.as_slice()
        }
    };
    if expected.iter().any(|&e| e <= 0.0) {
        return Err(StatsError::BadInput(
            "expected frequencies must be positive".to_string(),
        ));
    }
    let statistic: f64 = observed
        .iter()
        .zip(expected)
        .map(|(o, e)| (o - e).powi(2) / e)
        .sum();
    if observed.len() < ddof + 2 {
        return Err(StatsError::BadInput(
            "ddof leaves no degrees of freedom".to_string(),
        ));
    }
    let df = (observed.len() - 1 - ddof) as f64;
    Ok(TestResult::new(statistic, chi2_sf(statistic, df)))
}

/// Outcome of a chi-squared test of independence.
#[derive(Debug, Clone)]
pub struct Chi2Independence {
    /// The chi-squared statistic
    pub statistic: f64,
    /// Upper tail probability
    pub p_value: f64,
    /// Degrees of freedom, (rows − 1)(cols − 1)
    pub df: usize,
    /// Expected cell counts under independence
    pub expected: Vec<Vec<f64>>,
}

impl fmt::Display for Chi2Independence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "chi2 = {:.6}, df = {}, p-value = {:.6}",
            self.statistic, self.df, self.p_value
        )
    }
}

/// Chi-squared test of independence on a contingency table.
///
/// `correction` applies the Yates continuity correction, which only
/// affects 2x2 tables.
pub fn chi2_independence(
    table: &[Vec<f64>],
    correction: bool,
) -> Result<Chi2Independence, StatsError> {
    let rows = table.len();
    let cols = table.first().map_or(0, Vec::len);
    if rows < 2 || cols < 2 || table.iter().any(|r| r.len() != cols) {
        return Err(StatsError::BadShape(
            "contingency table must be rectangular with at least 2 rows and 2 columns"
                .to_string(),
        ));
    }
    let row_totals: Vec<f64> = table.iter().map(|r| r.iter().sum()).collect();
    let col_totals: Vec<f64> =
        (0..cols).map(|j| table.iter().map(|r| r[j]).sum()).collect();
    let grand: f64 = row_totals.iter().sum();
    if grand <= 0.0 {
        return Err(StatsError::Degenerate("empty contingency table".to_string()));
    }
    let expected: Vec<Vec<f64>> = row_totals
        .iter()
        .map(|&rt| col_totals.iter().map(|&ct| rt * ct / grand).collect())
        .collect();
    if expected.iter().flatten().any(|&e| e <= 0.0) {
        return Err(StatsError::Degenerate(
            "a row or column of the table is entirely zero".to_string(),
        ));
    }
    let yates = correction && rows == 2 && cols == 2;
    let mut statistic = 0.0;
    for i in 0..rows {
        for j in 0..cols {
            let mut diff = (table[i][j] - expected[i][j]).abs();
            if yates {
                diff = (diff - 0.5).max(0.0);
            }
            statistic += diff * diff / expected[i][j];
        }
    }
    let df = (rows - 1) * (cols - 1);
    Ok(Chi2Independence {
        statistic,
        p_value: chi2_sf(statistic, df as f64).clamp(0.0, 1.0),
        df,
        expected,
    })
}

/// Outcome of Fisher's exact test on a 2x2 table.
#[derive(Debug, Clone, Copy)]
pub struct FisherExact {
    /// Sample odds ratio, ad / bc
    pub odds_ratio: f64,
    /// Exact p-value under the hypergeometric null
    pub p_value: f64,
}

impl fmt::Display for FisherExact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "odds ratio = {:.6}, p-value = {:.6}",
            self.odds_ratio, self.p_value
        )
    }
}

/// Fisher's exact test on a 2x2 contingency table `[[a, b], [c, d]]`.
pub fn fisher_exact(
    table: [[u64; 2]; 2],
    alternative: Alternative,
) -> Result<FisherExact, StatsError> {
    let [[a, b], [c, d]] = table;
    let n = a + b + c + d;
    if n == 0 {
        return Err(StatsError::Degenerate("empty contingency table".to_string()));
    }
    let odds_ratio = if b * c == 0 {
        if a * d == 0 {
            f64::NAN
        } else {
            f64::INFINITY
        }
    } else {
        (a * d) as f64 / (b * c) as f64
    };

    // Margins fix the support of the top-left cell.
    let row1 = a + b;
    let col1 = a + c;
    let lo = col1.saturating_sub(c + d);
    let hi = row1.min(col1);
    let pmf = |x: u64| -> f64 {
        hypergeom_ln_pmf(x, n, row1, col1).exp()
    };
    let p_obs = pmf(a);
    let p_value: f64 = match alternative {
        Alternative::Less => (lo..=a).map(pmf).sum(),
        Alternative::Greater => (a..=hi).map(pmf).sum(),
        Alternative::TwoSided => {
            let threshold = p_obs * (1.0 + 1e-7);
            (lo..=hi).map(pmf).filter(|&p| p <= threshold).sum()
        }
    };
    Ok(FisherExact {
        odds_ratio,
        p_value: p_value.clamp(0.0, 1.0),
    })
}

fn ln_factorial(n: u64) -> f64 {
    ln_gamma(n as f64 + 1.0)
}

// ln P(X = x) for X hypergeometric with population n, successes col1,
// draws row1.
fn hypergeom_ln_pmf(x: u64, n: u64, row1: u64, col1: u64) -> f64 {
    ln_factorial(row1) + ln_factorial(n - row1) + ln_factorial(col1) + ln_factorial(n - col1)
        - ln_factorial(n)
        - ln_factorial(x)
        - ln_factorial(row1 - x)
        - ln_factorial(col1 - x)
        - ln_factorial(n + x - row1 - col1)
}

/// Outcome of a one-way analysis of variance.
#[derive(Debug, Clone, Copy)]
pub struct Anova {
    /// The F statistic
    pub statistic: f64,
    /// Upper tail probability
    pub p_value: f64,
    /// Between-group degrees of freedom
    pub df_between: f64,
    /// Within-group degrees of freedom
    pub df_within: f64,
}

impl fmt::Display for Anova {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "F({:.0}, {:.0}) = {:.6}, p-value = {:.6}",
            self.df_between, self.df_within, self.statistic, self.p_value
        )
    }
}

/// One-way analysis of variance across two or more groups.
pub fn one_way_anova(groups: &[&[f64]]) -> Result<Anova, StatsError> {
    require_min("one-way ANOVA", 2, groups.len())?;
    for g in groups {
        require_min("one-way ANOVA group", 2, g.len())?;
    }
    let n: usize = groups.iter().map(|g| g.len()).sum();
    let grand = groups.iter().flat_map(|g| g.iter()).sum::<f64>() / n as f64;
    let ss_between: f64 = groups
        .iter()
        .map(|g| g.len() as f64 * (mean(g) - grand).powi(2))
        .sum();
    let ss_within: f64 = groups
        .iter()
        .map(|g| {
            let m = mean(g);
            g.iter().map(|x| (x - m).powi(2)).sum::<f64>()
        })
        .sum();
    let df_between = groups.len() as f64 - 1.0;
    let df_within = n as f64 - groups.len() as f64;
    if ss_within == 0.0 {
        return Err(StatsError::Degenerate(
            "zero within-group variance".to_string(),
        ));
    }
    let statistic = (ss_between / df_between) / (ss_within / df_within);
    Ok(Anova {
        statistic,
        p_value: f_sf(statistic, df_between, df_within).clamp(0.0, 1.0),
        df_between,
        df_within,
    })
}

/// Kruskal-Wallis rank test across two or more groups, tie-corrected.
pub fn kruskal_wallis(groups: &[&[f64]]) -> Result<TestResult, StatsError> {
    require_min("Kruskal-Wallis", 2, groups.len())?;
    for g in groups {
        require_min("Kruskal-Wallis group", 1, g.len())?;
    }
    let pooled: Vec<f64> = groups.iter().flat_map(|g| g.iter().copied()).collect();
    let n = pooled.len();
    require_min("Kruskal-Wallis", 5, n)?;
    let (ranks, tie_term) = rank_with_ties(&pooled);
    let nf = n as f64;
    let mut h = 0.0;
    let mut offset = 0;
    for g in groups {
        let r: f64 = ranks[offset..offset + g.len()].iter().sum();
        h += r * r / g.len() as f64;
        offset += g.len();
    }
    h = 12.0 / (nf * (nf + 1.0)) * h - 3.0 * (nf + 1.0);
    let correction = 1.0 - tie_term / (nf * nf * nf - nf);
    if correction <= 0.0 {
        return Err(StatsError::Degenerate(
            "all values are identical".to_string(),
        ));
    }
    h /= correction;
    let df = groups.len() as f64 - 1.0;
    Ok(TestResult::new(h, chi2_sf(h, df)))
}

/// A correlation coefficient and its p-value.
#[derive(Debug, Clone, Copy)]
pub struct Correlation {
    /// The correlation coefficient, in [−1, 1]
    pub r: f64,
    /// Two-sided p-value for the null of zero correlation
    pub p_value: f64,
}

impl fmt::Display for Correlation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r = {:.6}, p-value = {:.6}", self.r, self.p_value)
    }
}

/// Pearson product-moment correlation with a two-sided t-based p-value.
pub fn pearson(x: &[f64], y: &[f64]) -> Result<Correlation, StatsError> {
    if x.len() != y.len() {
        return Err(StatsError::UnpairedSamples);
    }
    require_min("Pearson correlation", 3, x.len())?;
    let n = x.len() as f64;
    let mx = mean(x);
    let my = mean(y);
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (a, b) in x.iter().zip(y) {
        sxy += (a - mx) * (b - my);
        sxx += (a - mx).powi(2);
        syy += (b - my).powi(2);
    }
    if sxx == 0.0 || syy == 0.0 {
        return Err(StatsError::Degenerate("a sample is constant".to_string()));
    }
    let r = (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0);
    let p_value = if r.abs() == 1.0 {
        0.0
    } else {
        let t = r * ((n - 2.0) / (1.0 - r * r)).sqrt();
        t_sf_two_sided(t, n - 2.0)
    };
    Ok(Correlation {
        r,
        p_value: p_value.clamp(0.0, 1.0),
    })
}

/// Spearman rank correlation: Pearson on average ranks.
pub fn spearman(x: &[f64], y: &[f64]) -> Result<Correlation, StatsError> {
    if x.len() != y.len() {
        return Err(StatsError::UnpairedSamples);
    }
    require_min("Spearman correlation", 3, x.len())?;
    let (rx, _) = rank_with_ties(x);
    let (ry, _) = rank_with_ties(y);
    pearson(&rx, &ry)
}

/// Covariance matrix over the numeric columns of a frame.
///
/// `ddof` is the delta degrees of freedom of the divisor `n - ddof`;
/// 1.0 gives the sample covariance, 0.0 the population covariance.
///
/// The result has a leading `column` label column followed by one
/// numeric column per input variable. Missing values are dropped per
/// column, so every numeric column must keep the same length.
pub fn covariance_matrix(frame: &DataFrame, ddof: f64) -> Result<DataFrame, StatsError> {
    let numeric: Vec<(&str, Vec<f64>)> = frame
        .iter()
        .filter_map(|(name, series)| {
            series.to_f64().map(|values| (name, values))
        })
        .collect();
    if numeric.len() < 2 {
        return Err(StatsError::BadShape(
            "covariance needs at least two numeric columns".to_string(),
        ));
    }
    let n = numeric[0].1.len();
    if numeric.iter().any(|(_, v)| v.len() != n) {
        return Err(StatsError::BadShape(
            "numeric columns differ in non-missing length".to_string(),
        ));
    }
    require_min("covariance", 2, n)?;
    if n as f64 - ddof <= 0.0 {
        return Err(StatsError::BadInput(
            "ddof must leave at least one degree of freedom".to_string(),
        ));
    }
    let means: Vec<f64> = numeric.iter().map(|(_, v)| mean(v)).collect();
    let labels: Vec<String> = numeric.iter().map(|(name, _)| name.to_string()).collect();
    let mut out = DataFrame::new();
    out.insert_column("column", Series::str(labels))
        .map_err(frame_to_stats)?;
    for (j, (name, vj)) in numeric.iter().enumerate() {
        let col: Vec<f64> = numeric
            .iter()
            .enumerate()
            .map(|(i, (_, vi))| {
                vi.iter()
                    .zip(vj)
                    .map(|(a, b)| (a - means[i]) * (b - means[j]))
                    .sum::<f64>()
                    / (n as f64 - ddof)
            })
            .collect();
        out.insert_column(*name, Series::float(col))
            .map_err(frame_to_stats)?;
    }
    Ok(out)
}

fn frame_to_stats(e: FrameError) -> StatsError {
    StatsError::BadShape(e.to_string())
}
