//! Likelihood-ratio increments and GLR statistics.
//!
//! A likelihood-ratio model compares a fixed alternative against the null for
//! the plain log-increment, and, for the windowed GLR detector, evaluates the
//! ratio at the running MLE:
//!
//! ```text
//! Normal:    max_llr(m, n) = n (m̃ − μ₀)² / (2σ²)
//! Bernoulli: max_llr(m, n) = n · KL(m̃ ‖ p)
//! ```
//!
//! where `m̃` is the MLE after the one-sided clamp of [`Side`].
//! Batch-average updates are not offered: the GLR recurrence needs
//! per-observation granularity.

use super::{check_probability, check_scale, parse_binary, Binary, LikelihoodRatio, LogIncrement, Side};
use crate::error::Result;
use stcp_math::{bernoulli_kl, normal_kl};

/// Normal likelihood ratio `N(μ₁, σ²)` against `N(μ₀, σ²)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalLr {
    mu0: f64,
    mu1: f64,
    sigma: f64,
    side: Side,
    slope: f64,
    intercept: f64,
}

impl NormalLr {
    /// Fixed-alternative ratio. Fails unless `sigma > 0`.
    pub fn new(mu0: f64, mu1: f64, sigma: f64, side: Side) -> Result<Self> {
        check_scale("sigma", sigma)?;
        let var = sigma * sigma;
        Ok(Self {
            mu0,
            mu1,
            sigma,
            side,
            slope: (mu1 - mu0) / var,
            intercept: (mu1 * mu1 - mu0 * mu0) / (2.0 * var),
        })
    }

    /// GLR-only model: the alternative is estimated, so the fixed
    /// alternative coincides with the null.
    pub fn glr(mu0: f64, sigma: f64, side: Side) -> Result<Self> {
        Self::new(mu0, mu0, sigma, side)
    }

    pub fn mu0(&self) -> f64 {
        self.mu0
    }

    pub fn mu1(&self) -> f64 {
        self.mu1
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn side(&self) -> Side {
        self.side
    }
}

impl LogIncrement for NormalLr {
    fn name(&self) -> &'static str {
        "normal_lr"
    }

    fn log_increment(&self, x: f64) -> Result<f64> {
        Ok(self.slope * x - self.intercept)
    }
}

impl LikelihoodRatio for NormalLr {
    fn max_log_likelihood_ratio(&self, mle: f64, n: usize) -> f64 {
        let mle = self.side.clamp(mle, self.mu0);
        n as f64 * normal_kl(mle, self.mu0, self.sigma)
    }
}

/// Bernoulli likelihood ratio `Ber(q)` against `Ber(p)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BernoulliLr {
    p: f64,
    q: f64,
    side: Side,
    log_one: f64,
    log_zero: f64,
}

impl BernoulliLr {
    /// Fixed-alternative ratio. Fails unless both probabilities are in (0, 1).
    pub fn new(p: f64, q: f64, side: Side) -> Result<Self> {
        check_probability("p", p)?;
        check_probability("q", q)?;
        Ok(Self {
            p,
            q,
            side,
            log_one: (q / p).ln(),
            log_zero: ((1.0 - q) / (1.0 - p)).ln(),
        })
    }

    /// GLR-only model with null probability `p`.
    pub fn glr(p: f64, side: Side) -> Result<Self> {
        Self::new(p, p, side)
    }

    pub fn p(&self) -> f64 {
        self.p
    }

    pub fn q(&self) -> f64 {
        self.q
    }

    pub fn side(&self) -> Side {
        self.side
    }
}

impl LogIncrement for BernoulliLr {
    fn name(&self) -> &'static str {
        "bernoulli_lr"
    }

    fn check(&self, x: f64) -> Result<()> {
        parse_binary(self.name(), x).map(|_| ())
    }

    fn log_increment(&self, x: f64) -> Result<f64> {
        Ok(match parse_binary(self.name(), x)? {
            Binary::Zero => self.log_zero,
            Binary::One => self.log_one,
        })
    }
}

impl LikelihoodRatio for BernoulliLr {
    fn max_log_likelihood_ratio(&self, mle: f64, n: usize) -> f64 {
        let mle = self.side.clamp(mle, self.p);
        n as f64 * bernoulli_kl(mle, self.p)
    }
}

/// Closed set of likelihood-ratio families.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LrModel {
    Normal(NormalLr),
    Bernoulli(BernoulliLr),
}

impl From<NormalLr> for LrModel {
    fn from(model: NormalLr) -> Self {
        LrModel::Normal(model)
    }
}

impl From<BernoulliLr> for LrModel {
    fn from(model: BernoulliLr) -> Self {
        LrModel::Bernoulli(model)
    }
}

impl LogIncrement for LrModel {
    fn name(&self) -> &'static str {
        match self {
            LrModel::Normal(m) => m.name(),
            LrModel::Bernoulli(m) => m.name(),
        }
    }

    fn check(&self, x: f64) -> Result<()> {
        match self {
            LrModel::Normal(m) => m.check(x),
            LrModel::Bernoulli(m) => m.check(x),
        }
    }

    fn log_increment(&self, x: f64) -> Result<f64> {
        match self {
            LrModel::Normal(m) => m.log_increment(x),
            LrModel::Bernoulli(m) => m.log_increment(x),
        }
    }
}

impl LikelihoodRatio for LrModel {
    fn update_running_mle(&self, mle: &mut f64, x: f64, n: usize) {
        match self {
            LrModel::Normal(m) => m.update_running_mle(mle, x, n),
            LrModel::Bernoulli(m) => m.update_running_mle(mle, x, n),
        }
    }

    fn max_log_likelihood_ratio(&self, mle: f64, n: usize) -> f64 {
        match self {
            LrModel::Normal(m) => m.max_log_likelihood_ratio(mle, n),
            LrModel::Bernoulli(m) => m.max_log_likelihood_ratio(mle, n),
        }
    }
}
