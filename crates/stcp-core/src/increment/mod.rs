//! Log-domain increment models.
//!
//! An increment model turns one observation into the log of one multiplicative
//! factor of a nonnegative supermartingale under the null. Two capability sets
//! exist:
//!
//! - [`LogIncrement`]: every model; baseline exponential-family tilts
//!   ([`baseline`]) and fixed-alternative likelihood ratios
//!   ([`likelihood_ratio`]).
//! - [`LikelihoodRatio`]: adds the running-mean MLE recurrence and the maximal
//!   log-likelihood ratio used by the windowed GLR detector.
//!
//! The family set is closed; accumulators are generic over these traits and
//! the [`Baseline`] / [`LrModel`] enums give a single concrete type per
//! capability set for configuration-driven construction.

pub mod baseline;
pub mod likelihood_ratio;

pub use baseline::{Baseline, Bernoulli, Bounded, Normal};
pub use likelihood_ratio::{BernoulliLr, LrModel, NormalLr};

use crate::error::{Result, StcpError};
use serde::{Deserialize, Serialize};
use stcp_math::EPS;

/// A model producing a real-valued log-increment from an observation.
pub trait LogIncrement {
    /// Short family name used in error messages.
    fn name(&self) -> &'static str;

    /// Check that `x` lies in the model's admissible domain.
    fn check(&self, _x: f64) -> Result<()> {
        Ok(())
    }

    /// Log of one multiplicative factor for observation `x`.
    fn log_increment(&self, x: f64) -> Result<f64>;

    /// Whether [`LogIncrement::log_increment_from_average`] is available.
    fn supports_average(&self) -> bool {
        false
    }

    /// Check a batch summary before any state is mutated.
    fn check_average(&self, _x_bar: f64, _n: f64) -> Result<()> {
        Err(StcpError::unsupported("update_by_avg", self.name()))
    }

    /// Combined log-increment of `n` observations with mean `x_bar`.
    ///
    /// Only families whose log-increment is linear in `x` support this.
    fn log_increment_from_average(&self, _x_bar: f64, _n: f64) -> Result<f64> {
        Err(StcpError::unsupported("update_by_avg", self.name()))
    }
}

/// Likelihood-ratio models usable by the windowed GLR detector.
pub trait LikelihoodRatio: LogIncrement {
    /// Running-mean recurrence; `n` is the sample size after including `x`.
    fn update_running_mle(&self, mle: &mut f64, x: f64, n: usize) {
        let n = n as f64;
        *mle = (*mle * (n - 1.0) + x) / n;
    }

    /// Log-likelihood ratio of `n` samples evaluated at `mle`, after the
    /// one-sided clamp of [`Side`].
    fn max_log_likelihood_ratio(&self, mle: f64, n: usize) -> f64;
}

/// Direction of change a likelihood-ratio model is sensitive to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Any change away from the null.
    #[default]
    TwoSided,
    /// Increases only: the MLE is clamped to be no less than the null.
    Greater,
    /// Decreases only: the MLE is clamped to be no greater than the null.
    Less,
}

impl Side {
    /// Clamp `mle` toward `null` according to the side.
    pub fn clamp(self, mle: f64, null: f64) -> f64 {
        match self {
            Side::TwoSided => mle,
            Side::Greater => mle.max(null),
            Side::Less => mle.min(null),
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::TwoSided => write!(f, "two_sided"),
            Side::Greater => write!(f, "greater"),
            Side::Less => write!(f, "less"),
        }
    }
}

/// Binary observation matched within [`EPS`].
pub(crate) enum Binary {
    Zero,
    One,
}

pub(crate) fn parse_binary(model: &'static str, x: f64) -> Result<Binary> {
    if x.abs() < EPS {
        Ok(Binary::Zero)
    } else if (x - 1.0).abs() < EPS {
        Ok(Binary::One)
    } else {
        Err(StcpError::invalid_input(
            model,
            format!("input must be 0 or 1, got {x}"),
        ))
    }
}

pub(crate) fn check_probability(name: &str, p: f64) -> Result<()> {
    if p.is_nan() || p <= 0.0 || p >= 1.0 {
        return Err(StcpError::invalid_parameter(
            name,
            format!("probability must be strictly between 0 and 1, got {p}"),
        ));
    }
    Ok(())
}

pub(crate) fn check_scale(name: &str, sigma: f64) -> Result<()> {
    if sigma.is_nan() || sigma <= 0.0 {
        return Err(StcpError::invalid_parameter(
            name,
            format!("must be strictly positive, got {sigma}"),
        ));
    }
    Ok(())
}

pub(crate) fn check_batch_size(model: &'static str, n: f64) -> Result<()> {
    if n.is_nan() || n <= 0.0 {
        return Err(StcpError::invalid_input(
            model,
            format!("batch size must be strictly positive, got {n}"),
        ));
    }
    Ok(())
}
