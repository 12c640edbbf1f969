//! Stopping-rule driver.
//!
//! [`Stcp`] owns one e-process (possibly a mixture), a threshold and the
//! bookkeeping of elapsed time and the first stopping time:
//!
//! ```text
//! Running ──(log_value > threshold)──▶ Stopped
//!    ▲                                    │
//!    └────────────── reset ───────────────┘
//! ```
//!
//! Updates keep flowing after the stop (time and log-value evolve), but the
//! stopping time is written exactly once. With `threshold = ln(1/α)`, Ville's
//! inequality bounds the false-alarm probability of ST detectors by α at
//! every time, not just at a fixed sample size.

use crate::eprocess::EProcess;
use crate::error::{Result, StcpError};
use serde::{Deserialize, Serialize};
use stcp_math::{log_threshold, DEFAULT_ALPHA};
use tracing::{debug, trace};

/// Threshold for the default level α = 0.05, i.e. `ln 20`.
pub fn default_threshold() -> f64 {
    log_threshold(DEFAULT_ALPHA)
}

/// Threshold `ln(1/α)` for a level strictly inside (0, 1).
pub fn threshold_from_alpha(alpha: f64) -> Result<f64> {
    if alpha.is_nan() || alpha <= 0.0 || alpha >= 1.0 {
        return Err(StcpError::invalid_parameter(
            "alpha",
            format!("level must be strictly between 0 and 1, got {alpha}"),
        ));
    }
    Ok(log_threshold(alpha))
}

/// Serializable snapshot of a driver's state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StcpSummary {
    pub log_value: f64,
    pub e_value: f64,
    pub threshold: f64,
    pub time: f64,
    pub stopped: bool,
    pub stopped_time: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stcp<E> {
    e_process: E,
    threshold: f64,
    /// Elapsed observations; fractional when batch sizes are.
    time: f64,
    stopped: bool,
    stopped_time: Option<f64>,
}

impl<E: EProcess> Stcp<E> {
    /// Create a driver. The threshold is on the log scale and must not be NaN.
    pub fn new(e_process: E, threshold: f64) -> Result<Self> {
        if threshold.is_nan() {
            return Err(StcpError::invalid_parameter(
                "threshold",
                "must be a number",
            ));
        }
        Ok(Self {
            e_process,
            threshold,
            time: 0.0,
            stopped: false,
            stopped_time: None,
        })
    }

    /// Driver with threshold `ln(1/α)`.
    pub fn with_alpha(e_process: E, alpha: f64) -> Result<Self> {
        Self::new(e_process, threshold_from_alpha(alpha)?)
    }

    /// Driver at the default level α = 0.05.
    pub fn with_default_threshold(e_process: E) -> Self {
        Self {
            e_process,
            threshold: default_threshold(),
            time: 0.0,
            stopped: false,
            stopped_time: None,
        }
    }

    pub fn e_process(&self) -> &E {
        &self.e_process
    }

    pub fn log_value(&self) -> f64 {
        self.e_process.log_value()
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// Time of the first threshold crossing, if any.
    pub fn stopped_time(&self) -> Option<f64> {
        self.stopped_time
    }

    pub fn summary(&self) -> StcpSummary {
        let log_value = self.log_value();
        StcpSummary {
            log_value,
            e_value: log_value.exp(),
            threshold: self.threshold,
            time: self.time,
            stopped: self.stopped,
            stopped_time: self.stopped_time,
        }
    }

    /// Return the e-process and the bookkeeping to their initial state.
    pub fn reset(&mut self) {
        debug!(
            detector = self.e_process.name(),
            time = self.time,
            stopped = self.stopped,
            "resetting detector"
        );
        self.e_process.reset();
        self.time = 0.0;
        self.stopped = false;
        self.stopped_time = None;
    }

    fn advance(&mut self, dt: f64) {
        self.time += dt;
        let log_value = self.e_process.log_value();
        if log_value > self.threshold && !self.stopped {
            self.stopped = true;
            self.stopped_time = Some(self.time);
            debug!(
                detector = self.e_process.name(),
                time = self.time,
                log_value,
                threshold = self.threshold,
                "threshold crossed"
            );
        }
    }

    /// Absorb one observation.
    pub fn update(&mut self, x: f64) -> Result<()> {
        self.e_process.update(x)?;
        self.advance(1.0);
        Ok(())
    }

    /// Absorb every observation in order.
    ///
    /// An error stops the loop; earlier observations stay absorbed.
    pub fn update_many(&mut self, xs: &[f64]) -> Result<()> {
        for &x in xs {
            self.update(x)?;
        }
        trace!(count = xs.len(), time = self.time, "absorbed sequence");
        Ok(())
    }

    /// Absorb observations until the detector stops.
    ///
    /// Returns how many observations were consumed; the rest are untouched.
    /// The stop check follows each update, so a detector that is already
    /// stopped still absorbs one observation.
    pub fn update_until_stop(&mut self, xs: &[f64]) -> Result<usize> {
        let mut consumed = 0;
        for &x in xs {
            self.update(x)?;
            consumed += 1;
            if self.stopped {
                break;
            }
        }
        trace!(consumed, total = xs.len(), stopped = self.stopped, "sequence until stop");
        Ok(consumed)
    }

    /// Absorb one observation and return the updated log-value.
    pub fn update_and_return_history(&mut self, x: f64) -> Result<f64> {
        self.update(x)?;
        Ok(self.log_value())
    }

    /// Absorb every observation and return the log-value trajectory.
    pub fn update_and_return_histories(&mut self, xs: &[f64]) -> Result<Vec<f64>> {
        xs.iter()
            .map(|&x| self.update_and_return_history(x))
            .collect()
    }

    /// Absorb a batch of `n` observations summarized by their mean.
    pub fn update_by_avg(&mut self, x_bar: f64, n: f64) -> Result<()> {
        self.e_process.update_by_avg(x_bar, n)?;
        self.advance(n);
        Ok(())
    }

    /// Batch form of [`Stcp::update_many`].
    pub fn update_many_by_avgs(&mut self, x_bars: &[f64], ns: &[f64]) -> Result<()> {
        check_lengths(x_bars, ns)?;
        for (&x_bar, &n) in x_bars.iter().zip(ns) {
            self.update_by_avg(x_bar, n)?;
        }
        Ok(())
    }

    /// Batch form of [`Stcp::update_until_stop`]; returns batches consumed.
    pub fn update_until_stop_by_avgs(&mut self, x_bars: &[f64], ns: &[f64]) -> Result<usize> {
        check_lengths(x_bars, ns)?;
        let mut consumed = 0;
        for (&x_bar, &n) in x_bars.iter().zip(ns) {
            self.update_by_avg(x_bar, n)?;
            consumed += 1;
            if self.stopped {
                break;
            }
        }
        Ok(consumed)
    }

    /// Batch form of [`Stcp::update_and_return_history`].
    pub fn update_and_return_history_by_avg(&mut self, x_bar: f64, n: f64) -> Result<f64> {
        self.update_by_avg(x_bar, n)?;
        Ok(self.log_value())
    }

    /// Batch form of [`Stcp::update_and_return_histories`].
    pub fn update_and_return_histories_by_avgs(
        &mut self,
        x_bars: &[f64],
        ns: &[f64],
    ) -> Result<Vec<f64>> {
        check_lengths(x_bars, ns)?;
        x_bars
            .iter()
            .zip(ns)
            .map(|(&x_bar, &n)| self.update_and_return_history_by_avg(x_bar, n))
            .collect()
    }
}

fn check_lengths(x_bars: &[f64], ns: &[f64]) -> Result<()> {
    if x_bars.len() != ns.len() {
        return Err(StcpError::length_mismatch("x_bars vs ns", x_bars.len(), ns.len()));
    }
    Ok(())
}
