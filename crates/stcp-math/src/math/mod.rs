//! Core math modules.

pub mod exp_family;
pub mod stable;
