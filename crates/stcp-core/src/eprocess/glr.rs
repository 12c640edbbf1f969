//! Windowed generalized-likelihood-ratio CUSUM.
//!
//! Keeps one running-mean estimate per candidate change-point among the last
//! `window_size` observations, newest first. Each update:
//!
//! 1. evicts the oldest estimate when the window is full,
//! 2. opens a new window at the current time with estimate 0,
//! 3. folds `x` into every open window (age `n = 1..=len`) and evaluates
//!    `max_llr(mle, n)`,
//! 4. sets the log-value to the maximum over open windows.
//!
//! Cost per update is O(window_size); memory is fixed at construction.

use super::EProcess;
use crate::error::{Result, StcpError};
use crate::increment::LikelihoodRatio;
use std::collections::VecDeque;
use stcp_math::NEG_INF;

/// Default number of candidate change-points tracked.
pub const DEFAULT_WINDOW_SIZE: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct GlrCu<L> {
    model: L,
    window_size: usize,
    log_value: f64,
    /// Running MLE per open window, newest at the front.
    h1_mle: VecDeque<f64>,
}

impl<L: LikelihoodRatio> GlrCu<L> {
    /// Create a detector tracking at most `window_size` windows.
    pub fn new(model: L, window_size: usize) -> Result<Self> {
        if window_size == 0 {
            return Err(StcpError::invalid_parameter(
                "window_size",
                "must be at least 1",
            ));
        }
        Ok(Self {
            model,
            window_size,
            log_value: NEG_INF,
            // Grows up to `window_size` through eviction in `update`; only a
            // default-sized block is reserved so huge windows cannot abort here.
            h1_mle: VecDeque::with_capacity(window_size.min(DEFAULT_WINDOW_SIZE)),
        })
    }

    pub fn model(&self) -> &L {
        &self.model
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Number of windows currently open.
    pub fn open_windows(&self) -> usize {
        self.h1_mle.len()
    }

    /// Running MLE of each open window, newest first.
    pub fn estimates(&self) -> impl Iterator<Item = f64> + '_ {
        self.h1_mle.iter().copied()
    }
}

impl<L: LikelihoodRatio> EProcess for GlrCu<L> {
    fn name(&self) -> &'static str {
        "glr_cu"
    }

    fn log_value(&self) -> f64 {
        self.log_value
    }

    fn reset(&mut self) {
        self.log_value = NEG_INF;
        self.h1_mle.clear();
    }

    fn check(&self, x: f64) -> Result<()> {
        self.model.check(x)
    }

    fn update(&mut self, x: f64) -> Result<()> {
        self.model.check(x)?;

        if self.h1_mle.len() >= self.window_size {
            self.h1_mle.pop_back();
        }
        self.h1_mle.push_front(0.0);

        let mut max_log_value = NEG_INF;
        for (age, mle) in self.h1_mle.iter_mut().enumerate() {
            let n = age + 1;
            self.model.update_running_mle(mle, x, n);
            let candidate = self.model.max_log_likelihood_ratio(*mle, n);
            if candidate > max_log_value {
                max_log_value = candidate;
            }
        }
        self.log_value = max_log_value;
        Ok(())
    }
}
