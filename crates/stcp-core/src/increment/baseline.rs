//! Exponential-family baseline increments.
//!
//! Each model is the log of the tilted null density ratio `exp(λx − ψ(λ))`
//! (Normal, Bernoulli) or the bounded-mean betting factor
//! `1 + λ(x/μ − 1)` (Bounded). Parameters are validated once at
//! construction; the constant parts of the increment are precomputed.

use super::{check_batch_size, check_probability, check_scale, parse_binary, Binary, LogIncrement};
use crate::error::{Result, StcpError};
use stcp_math::{bernoulli_cumulant, normal_cumulant};

/// Normal mean-shift tilt: `λx − (λμ + λ²σ²/2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normal {
    lambda: f64,
    mu: f64,
    sigma: f64,
    /// `λμ + ψ(λ)`, subtracted from every increment.
    offset: f64,
}

impl Normal {
    /// Create a Normal tilt. Fails unless `sigma > 0`.
    pub fn new(lambda: f64, mu: f64, sigma: f64) -> Result<Self> {
        check_scale("sigma", sigma)?;
        Ok(Self {
            lambda,
            mu,
            sigma,
            offset: normal_cumulant(lambda, mu, sigma),
        })
    }

    /// Standard-normal null with tilt `lambda`.
    pub fn standard(lambda: f64) -> Self {
        Self {
            lambda,
            mu: 0.0,
            sigma: 1.0,
            offset: normal_cumulant(lambda, 0.0, 1.0),
        }
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl LogIncrement for Normal {
    fn name(&self) -> &'static str {
        "normal"
    }

    fn log_increment(&self, x: f64) -> Result<f64> {
        Ok(self.lambda * x - self.offset)
    }

    fn supports_average(&self) -> bool {
        true
    }

    fn check_average(&self, _x_bar: f64, n: f64) -> Result<()> {
        check_batch_size(self.name(), n)
    }

    fn log_increment_from_average(&self, x_bar: f64, n: f64) -> Result<f64> {
        self.check_average(x_bar, n)?;
        Ok(n * (self.lambda * x_bar - self.offset))
    }
}

/// Bernoulli tilt with success probability `p` under the null.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bernoulli {
    lambda: f64,
    p: f64,
    log_one: f64,
    log_zero: f64,
}

impl Bernoulli {
    /// Create a Bernoulli tilt. Fails unless `0 < p < 1`.
    pub fn new(lambda: f64, p: f64) -> Result<Self> {
        check_probability("p", p)?;
        let psi = bernoulli_cumulant(lambda, p);
        Ok(Self {
            lambda,
            p,
            log_one: lambda - psi,
            log_zero: -psi,
        })
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    pub fn p(&self) -> f64 {
        self.p
    }
}

impl LogIncrement for Bernoulli {
    fn name(&self) -> &'static str {
        "bernoulli"
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

    fn supports_average(&self) -> bool {
        true
    }

    fn check_average(&self, x_bar: f64, n: f64) -> Result<()> {
        check_batch_size(self.name(), n)?;
        if !(0.0..=1.0).contains(&x_bar) {
            return Err(StcpError::invalid_input(
                self.name(),
                format!("average of binary inputs must lie in [0, 1], got {x_bar}"),
            ));
        }
        Ok(())
    }

    fn log_increment_from_average(&self, x_bar: f64, n: f64) -> Result<f64> {
        self.check_average(x_bar, n)?;
        Ok(n * (self.lambda * x_bar + self.log_zero))
    }
}

/// Bounded-support betting factor `ln(1 + λ(x/μ − 1))` for nonnegative data
/// with null mean `μ`.
///
/// The parameter range assumes observations in `[0, 1]`. Outside it, an
/// observation is accepted only while the factor stays nonnegative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounded {
    lambda: f64,
    mu: f64,
}

impl Bounded {
    /// Create a bounded factor. Requires `μ > 0` and `μ/(μ−1) < λ < 1`.
    pub fn new(lambda: f64, mu: f64) -> Result<Self> {
        if mu.is_nan() || mu <= 0.0 {
            return Err(StcpError::invalid_parameter(
                "mu",
                format!("mean must be strictly positive, got {mu}"),
            ));
        }
        let lower = mu / (mu - 1.0);
        if lambda.is_nan() || lambda >= 1.0 || lambda <= lower {
            return Err(StcpError::invalid_parameter(
                "lambda",
                format!("must lie strictly between {lower} and 1, got {lambda}"),
            ));
        }
        Ok(Self { lambda, mu })
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }
}

impl LogIncrement for Bounded {
    fn name(&self) -> &'static str {
        "bounded"
    }

    fn check(&self, x: f64) -> Result<()> {
        if x.is_nan() || x < 0.0 {
            return Err(StcpError::invalid_input(
                self.name(),
                format!("input must be non-negative, got {x}"),
            ));
        }
        // With λ < 0 a large x drives the factor negative; zero is allowed.
        let factor = 1.0 + self.lambda * (x / self.mu - 1.0);
        if factor < 0.0 {
            return Err(StcpError::invalid_input(
                self.name(),
                format!("input {x} gives a negative betting factor {factor}"),
            ));
        }
        Ok(())
    }

    fn log_increment(&self, x: f64) -> Result<f64> {
        self.check(x)?;
        Ok((self.lambda * (x / self.mu - 1.0)).ln_1p())
    }
}

/// Closed set of baseline families.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Baseline {
    Normal(Normal),
    Bernoulli(Bernoulli),
    Bounded(Bounded),
}

impl From<Normal> for Baseline {
    fn from(model: Normal) -> Self {
        Baseline::Normal(model)
    }
}

impl From<Bernoulli> for Baseline {
    fn from(model: Bernoulli) -> Self {
        Baseline::Bernoulli(model)
    }
}

impl From<Bounded> for Baseline {
    fn from(model: Bounded) -> Self {
        Baseline::Bounded(model)
    }
}

impl LogIncrement for Baseline {
    fn name(&self) -> &'static str {
        match self {
            Baseline::Normal(m) => m.name(),
            Baseline::Bernoulli(m) => m.name(),
            Baseline::Bounded(m) => m.name(),
        }
    }

    fn check(&self, x: f64) -> Result<()> {
        match self {
            Baseline::Normal(m) => m.check(x),
            Baseline::Bernoulli(m) => m.check(x),
            Baseline::Bounded(m) => m.check(x),
        }
    }

    fn log_increment(&self, x: f64) -> Result<f64> {
        match self {
            Baseline::Normal(m) => m.log_increment(x),
            Baseline::Bernoulli(m) => m.log_increment(x),
            Baseline::Bounded(m) => m.log_increment(x),
        }
    }

    fn supports_average(&self) -> bool {
        match self {
            Baseline::Normal(m) => m.supports_average(),
            Baseline::Bernoulli(m) => m.supports_average(),
            Baseline::Bounded(m) => m.supports_average(),
        }
    }

    fn check_average(&self, x_bar: f64, n: f64) -> Result<()> {
        match self {
            Baseline::Normal(m) => m.check_average(x_bar, n),
            Baseline::Bernoulli(m) => m.check_average(x_bar, n),
            Baseline::Bounded(m) => m.check_average(x_bar, n),
        }
    }

    fn log_increment_from_average(&self, x_bar: f64, n: f64) -> Result<f64> {
        match self {
            Baseline::Normal(m) => m.log_increment_from_average(x_bar, n),
            Baseline::Bernoulli(m) => m.log_increment_from_average(x_bar, n),
            Baseline::Bounded(m) => m.log_increment_from_average(x_bar, n),
        }
    }
}
