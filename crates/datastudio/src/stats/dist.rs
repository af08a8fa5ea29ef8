//! Tail areas of the reference distributions
//!
//! Everything here reduces to the special functions in [`super::special`].
//! The survival functions return the upper tail; two-sided p-values are
//! assembled by the individual tests.

use std::f64::consts::SQRT_2;

use super::special::{beta_inc, erfc, gamma_q, ln_gamma};

/// Standard normal cumulative distribution function.
pub fn normal_cdf(z: f64) -> f64 {
    0.5 * erfc(-z / SQRT_2)
}

/// Standard normal survival function.
pub fn normal_sf(z: f64) -> f64 {
    0.5 * erfc(z / SQRT_2)
}

/// Two-sided p-value for a Student t statistic with `df` degrees of freedom.
pub fn t_sf_two_sided(t: f64, df: f64) -> f64 {
    let x = df / (df + t * t);
    beta_inc(df / 2.0, 0.5, x)
}

/// Upper tail of the chi-squared distribution with `df` degrees of freedom.
pub fn chi2_sf(x: f64, df: f64) -> f64 {
    if x <= 0.0 {
        return 1.0;
    }
    gamma_q(df / 2.0, x / 2.0)
}

/// Upper tail of the F distribution with `d1` and `d2` degrees of freedom.
pub fn f_sf(f: f64, d1: f64, d2: f64) -> f64 {
    if f <= 0.0 {
        return 1.0;
    }
    beta_inc(d2 / 2.0, d1 / 2.0, d2 / (d2 + d1 * f))
}

/// Binomial probability mass at `k` successes out of `n` trials.
pub fn binom_pmf(k: u64, n: u64, p: f64) -> f64 {
    if p <= 0.0 {
        return if k == 0 { 1.0 } else { 0.0 };
    }
    if p >= 1.0 {
        return if k == n { 1.0 } else { 0.0 };
    }
    let ln_coef = ln_gamma(n as f64 + 1.0)
        - ln_gamma(k as f64 + 1.0)
        - ln_gamma((n - k) as f64 + 1.0);
    (ln_coef + k as f64 * p.ln() + (n - k) as f64 * (1.0 - p).ln()).exp()
}

/// Binomial cumulative probability of at most `k` successes out of `n` trials.
pub fn binom_cdf(k: u64, n: u64, p: f64) -> f64 {
    if k >= n {
        return 1.0;
    }
    // P(X <= k) = I_{1-p}(n - k, k + 1)
    beta_inc((n - k) as f64, k as f64 + 1.0, 1.0 - p.clamp(0.0, 1.0)).clamp(0.0, 1.0)
}

/// Kolmogorov distribution survival function, Q(λ) = 2 Σ (−1)^{j−1} e^{−2j²λ²}.
pub fn kolmogorov_sf(lambda: f64) -> f64 {
    if lambda <= 0.0 {
        return 1.0;
    }
    let mut sum = 0.0;
    let mut sign = 1.0;
    for j in 1..=100 {
        let j = j as f64;
        let term = (-2.0 * j * j * lambda * lambda).exp();
        sum += sign * term;
        if term < 1e-16 {
            break;
        }
        sign = -sign;
    }
    (2.0 * sum).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_normal_cdf() {
        assert!(close(normal_cdf(0.0), 0.5, 1e-15));
        assert!(close(normal_cdf(1.959_963_984_540_054), 0.975, 1e-9));
        assert!(close(normal_sf(1.644_853_626_951_472_4), 0.05, 1e-9));
    }

    #[test]
    fn test_t_two_sided() {
        // t distribution with df=1 is Cauchy: P(|T| > 1) = 0.5
        assert!(close(t_sf_two_sided(1.0, 1.0), 0.5, 1e-10));
        // df=10, t=2.228 is the 97.5% quantile
        assert!(close(t_sf_two_sided(2.228_138_851_986_273, 10.0), 0.05, 1e-9));
    }

    #[test]
    fn test_chi2_sf() {
        // df=2 is exponential with mean 2
        assert!(close(chi2_sf(2.0, 2.0), (-1.0_f64).exp(), 1e-12));
        assert!(close(chi2_sf(3.841_458_820_694_124, 1.0), 0.05, 1e-9));
    }

    #[test]
    fn test_f_sf() {
        // F(1, d2) equals a squared t(d2)
        let t = 2.228_138_851_986_273;
        assert!(close(f_sf(t * t, 1.0, 10.0), 0.05, 1e-9));
    }

    #[test]
    fn test_binom_pmf() {
        // fair coin, 4 flips
        assert!(close(binom_pmf(2, 4, 0.5), 0.375, 1e-12));
        assert!(close(binom_pmf(0, 4, 0.5), 0.0625, 1e-12));
        assert!(close(binom_cdf(2, 4, 0.5), 0.6875, 1e-12));
        assert!(close(binom_cdf(4, 4, 0.5), 1.0, 1e-15));
    }

    #[test]
    fn test_kolmogorov_sf() {
        assert!(close(kolmogorov_sf(10.0), 0.0, 1e-12));
        assert!(kolmogorov_sf(0.5) > 0.9);
        // Q(1.2238...) ≈ 0.10
        assert!(close(kolmogorov_sf(1.223_847_870_217_082), 0.1, 1e-4));
    }
}
