//! Log-domain math utilities for sequential testing.

pub mod math;

pub use math::exp_family::*;
pub use math::stable::*;
