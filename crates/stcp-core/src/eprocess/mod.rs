//! E-processes: accumulation rules over log-increments.
//!
//! An e-process is a nonnegative process that is a supermartingale under the
//! null; everything here tracks it in log space. Available shapes:
//!
//! - [`BaselineE`]: one increment model combined by [`Rule`] (ST/SR/CU).
//! - [`GlrCu`]: windowed generalized likelihood ratio over the last
//!   `window_size` candidate change-points.
//! - [`Mixture`]: weighted log-sum-exp over children of one kind.
//! - [`AnyEProcess`]: closed enum used by configuration-driven detectors.
//!
//! Updates are all-or-nothing: an observation is validated before any state
//! is touched, so a failed update leaves the log-value unchanged.

pub mod any;
pub mod baseline;
pub mod glr;
pub mod mixture;

pub use any::AnyEProcess;
pub use baseline::{BaselineE, Rule};
pub use glr::GlrCu;
pub use mixture::Mixture;

use crate::error::{Result, StcpError};

/// Common interface of every accumulator.
pub trait EProcess {
    /// Short name used in error messages.
    fn name(&self) -> &'static str;

    /// Current log-value (`-inf` is the zero e-value).
    fn log_value(&self) -> f64;

    /// Return to the initial log-value and clear any history.
    fn reset(&mut self);

    /// Validate an observation without mutating state.
    fn check(&self, x: f64) -> Result<()>;

    /// Absorb one observation.
    fn update(&mut self, x: f64) -> Result<()>;

    /// Validate a batch summary without mutating state.
    fn check_average(&self, _x_bar: f64, _n: f64) -> Result<()> {
        Err(StcpError::unsupported("update_by_avg", self.name()))
    }

    /// Absorb `n` observations summarized by their mean `x_bar`.
    fn update_by_avg(&mut self, _x_bar: f64, _n: f64) -> Result<()> {
        Err(StcpError::unsupported("update_by_avg", self.name()))
    }
}
