//! Closed-form cumulants and divergences for the Normal and Bernoulli families.
//!
//! The baseline increments are exponential tilts of the null distribution,
//! `exp(λx − ψ(λ))`, so only the cumulant generating function `ψ` is needed.
//! The GLR statistic at the running MLE reduces to `n · KL(mle ‖ null)`.

use super::stable::{log_add_exp, EPS};

/// Normal cumulant `ψ(λ) = λμ + λ²σ²/2`.
pub fn normal_cumulant(lambda: f64, mu: f64, sigma: f64) -> f64 {
    lambda * mu + 0.5 * lambda * lambda * sigma * sigma
}

/// Bernoulli cumulant `ψ(λ) = ln(1 − p + p·e^λ)`.
///
/// Evaluated as `log_add_exp(ln(1−p), ln p + λ)` so large tilts do not
/// overflow.
pub fn bernoulli_cumulant(lambda: f64, p: f64) -> f64 {
    log_add_exp((-p).ln_1p(), p.ln() + lambda)
}

/// KL divergence between `N(mean, σ²)` and `N(mu, σ²)`.
pub fn normal_kl(mean: f64, mu: f64, sigma: f64) -> f64 {
    let d = mean - mu;
    d * d / (2.0 * sigma * sigma)
}

/// KL divergence `KL(Ber(q) ‖ Ber(p))` with `0·ln 0 = 0`.
///
/// `q` within [`EPS`] of 0 or 1 is treated as the boundary point.
pub fn bernoulli_kl(q: f64, p: f64) -> f64 {
    if q.abs() < EPS {
        return -(-p).ln_1p();
    }
    if (q - 1.0).abs() < EPS {
        return -p.ln();
    }
    q * (q / p).ln() + (1.0 - q) * ((1.0 - q) / (1.0 - p)).ln()
}
