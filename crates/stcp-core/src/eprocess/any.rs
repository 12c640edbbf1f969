//! Closed enum over the accumulator shapes a configuration can describe.

use super::{BaselineE, EProcess, GlrCu, Mixture};
use crate::error::Result;
use crate::increment::{Baseline, LrModel};

#[derive(Debug, Clone, PartialEq)]
pub enum AnyEProcess {
    /// Weighted mixture of baseline ST/SR/CU accumulators.
    Mixture(Mixture<BaselineE<Baseline>>),
    /// Fixed-alternative likelihood ratio under ST/SR/CU.
    LikelihoodRatio(BaselineE<LrModel>),
    /// Windowed GLR detector.
    Glr(GlrCu<LrModel>),
}

impl From<Mixture<BaselineE<Baseline>>> for AnyEProcess {
    fn from(e: Mixture<BaselineE<Baseline>>) -> Self {
        AnyEProcess::Mixture(e)
    }
}

impl From<BaselineE<LrModel>> for AnyEProcess {
    fn from(e: BaselineE<LrModel>) -> Self {
        AnyEProcess::LikelihoodRatio(e)
    }
}

impl From<GlrCu<LrModel>> for AnyEProcess {
    fn from(e: GlrCu<LrModel>) -> Self {
        AnyEProcess::Glr(e)
    }
}

impl EProcess for AnyEProcess {
    fn name(&self) -> &'static str {
        match self {
            AnyEProcess::Mixture(e) => e.name(),
            AnyEProcess::LikelihoodRatio(e) => e.name(),
            AnyEProcess::Glr(e) => e.name(),
        }
    }

    fn log_value(&self) -> f64 {
        match self {
            AnyEProcess::Mixture(e) => e.log_value(),
            AnyEProcess::LikelihoodRatio(e) => e.log_value(),
            AnyEProcess::Glr(e) => e.log_value(),
        }
    }

    fn reset(&mut self) {
        match self {
            AnyEProcess::Mixture(e) => e.reset(),
            AnyEProcess::LikelihoodRatio(e) => e.reset(),
            AnyEProcess::Glr(e) => e.reset(),
        }
    }

    fn check(&self, x: f64) -> Result<()> {
        match self {
            AnyEProcess::Mixture(e) => e.check(x),
            AnyEProcess::LikelihoodRatio(e) => e.check(x),
            AnyEProcess::Glr(e) => e.check(x),
        }
    }

    fn update(&mut self, x: f64) -> Result<()> {
        match self {
            AnyEProcess::Mixture(e) => e.update(x),
            AnyEProcess::LikelihoodRatio(e) => e.update(x),
            AnyEProcess::Glr(e) => e.update(x),
        }
    }

    fn check_average(&self, x_bar: f64, n: f64) -> Result<()> {
        match self {
            AnyEProcess::Mixture(e) => e.check_average(x_bar, n),
            AnyEProcess::LikelihoodRatio(e) => e.check_average(x_bar, n),
            AnyEProcess::Glr(e) => e.check_average(x_bar, n),
        }
    }

    fn update_by_avg(&mut self, x_bar: f64, n: f64) -> Result<()> {
        match self {
            AnyEProcess::Mixture(e) => e.update_by_avg(x_bar, n),
            AnyEProcess::LikelihoodRatio(e) => e.update_by_avg(x_bar, n),
            AnyEProcess::Glr(e) => e.update_by_avg(x_bar, n),
        }
    }
}
