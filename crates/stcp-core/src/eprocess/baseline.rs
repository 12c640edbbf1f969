//! ST / SR / CU accumulation over a single increment model.
//!
//! With `δ` the new log-increment:
//!
//! ```text
//! ST: v ← v + δ                 (init 0)
//! SR: v ← ln(1 + e^v) + δ       (init −∞)
//! CU: v ← max(0, v) + δ         (init −∞)
//! ```
//!
//! ST starts at 0 (the multiplicative identity) rather than −∞; SR and CU start
//! at −∞ so that the first step contributes `δ` alone.

use super::EProcess;
use crate::error::Result;
use crate::increment::LogIncrement;
use serde::{Deserialize, Serialize};
use stcp_math::{log1p_exp, NEG_INF};

/// Combination rule applied to each new log-increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Simple running sum (test martingale).
    #[default]
    St,
    /// Shiryaev-Roberts soft accumulation.
    Sr,
    /// CUSUM reflection at zero.
    Cu,
}

impl Rule {
    /// Log-value before any observation.
    pub fn initial_log_value(self) -> f64 {
        match self {
            Rule::St => 0.0,
            Rule::Sr | Rule::Cu => NEG_INF,
        }
    }

    /// Combine the previous log-value with a new log-increment.
    pub fn combine(self, log_value: f64, delta: f64) -> f64 {
        match self {
            Rule::St => log_value + delta,
            Rule::Sr => log1p_exp(log_value) + delta,
            Rule::Cu => log_value.max(0.0) + delta,
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::St => write!(f, "st"),
            Rule::Sr => write!(f, "sr"),
            Rule::Cu => write!(f, "cu"),
        }
    }
}

/// Accumulator owning one increment model and a running log-value.
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineE<L> {
    rule: Rule,
    model: L,
    log_value: f64,
}

impl<L: LogIncrement> BaselineE<L> {
    pub fn new(model: L, rule: Rule) -> Self {
        Self {
            rule,
            model,
            log_value: rule.initial_log_value(),
        }
    }

    pub fn st(model: L) -> Self {
        Self::new(model, Rule::St)
    }

    pub fn sr(model: L) -> Self {
        Self::new(model, Rule::Sr)
    }

    pub fn cu(model: L) -> Self {
        Self::new(model, Rule::Cu)
    }

    pub fn rule(&self) -> Rule {
        self.rule
    }

    pub fn model(&self) -> &L {
        &self.model
    }
}

impl<L: LogIncrement> EProcess for BaselineE<L> {
    fn name(&self) -> &'static str {
        self.model.name()
    }

    fn log_value(&self) -> f64 {
        self.log_value
    }

    fn reset(&mut self) {
        self.log_value = self.rule.initial_log_value();
    }

    fn check(&self, x: f64) -> Result<()> {
        self.model.check(x)
    }

    fn update(&mut self, x: f64) -> Result<()> {
        let delta = self.model.log_increment(x)?;
        self.log_value = self.rule.combine(self.log_value, delta);
        Ok(())
    }

    fn check_average(&self, x_bar: f64, n: f64) -> Result<()> {
        self.model.check_average(x_bar, n)
    }

    fn update_by_avg(&mut self, x_bar: f64, n: f64) -> Result<()> {
        let delta = self.model.log_increment_from_average(x_bar, n)?;
        self.log_value = self.rule.combine(self.log_value, delta);
        Ok(())
    }
}
