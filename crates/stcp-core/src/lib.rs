//! Anytime-valid sequential testing.
//!
//! This library tracks e-processes (nonnegative supermartingales under a null
//! hypothesis) in log space and stops the first time one crosses a threshold:
//! - Increment models: Normal, Bernoulli and bounded exponential-family tilts,
//!   plus fixed-alternative and GLR likelihood ratios
//! - Accumulation rules: ST (product), SR (Shiryaev-Roberts), CU (CUSUM),
//!   windowed GLR
//! - Weighted mixtures over a grid of tilts
//! - The stopping-rule driver with time and stopping-time bookkeeping
//! - Declarative detector configuration (JSON/TOML) and logging setup
//!
//! Numerics live in `stcp-math`.

pub mod config;
pub mod eprocess;
pub mod error;
pub mod increment;
pub mod logging;
pub mod stopping;

pub use config::{load_detector, Detector, DetectorConfig};
pub use eprocess::{AnyEProcess, BaselineE, EProcess, GlrCu, Mixture, Rule};
pub use error::{ErrorCategory, Result, StcpError};
pub use increment::{
    Baseline, Bernoulli, BernoulliLr, Bounded, LikelihoodRatio, LogIncrement, LrModel, Normal,
    NormalLr, Side,
};
pub use stopping::{default_threshold, threshold_from_alpha, Stcp, StcpSummary};
