//! Declarative detector configuration.
//!
//! A [`DetectorConfig`] describes one detector (accumulator shape, increment
//! family, parameters and threshold) and can be loaded from JSON or TOML:
//!
//! ```json
//! {
//!   "kind": "mixture",
//!   "rule": "sr",
//!   "model": { "family": "normal", "mu": 0.0, "sigma": 1.0 },
//!   "lambdas": [0.25, 0.5, 1.0],
//!   "alpha": 0.01
//! }
//! ```
//!
//! ```toml
//! kind = "glr"
//! side = "greater"
//! window_size = 50
//! model = { family = "bernoulli", p = 0.1 }
//! ```
//!
//! The threshold is either given directly on the log scale (`threshold`) or
//! derived from a level (`alpha`, default 0.05); giving both is an error.
//! [`DetectorConfig::build`] runs every parameter through the same
//! constructors as hand-built detectors.

use crate::eprocess::glr::DEFAULT_WINDOW_SIZE;
use crate::eprocess::{AnyEProcess, BaselineE, GlrCu, Mixture, Rule};
use crate::error::{Result, StcpError};
use crate::increment::{Baseline, Bernoulli, BernoulliLr, Bounded, LrModel, Normal, NormalLr, Side};
use crate::stopping::{default_threshold, threshold_from_alpha, Stcp};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Detector over the closed set of configurable accumulators.
pub type Detector = Stcp<AnyEProcess>;

/// Baseline increment family and its null parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum BaselineFamily {
    Normal {
        #[serde(default)]
        mu: f64,
        #[serde(default = "default_sigma")]
        sigma: f64,
    },
    Bernoulli {
        p: f64,
    },
    Bounded {
        mu: f64,
    },
}

impl BaselineFamily {
    fn model(&self, lambda: f64) -> Result<Baseline> {
        Ok(match *self {
            BaselineFamily::Normal { mu, sigma } => Normal::new(lambda, mu, sigma)?.into(),
            BaselineFamily::Bernoulli { p } => Bernoulli::new(lambda, p)?.into(),
            BaselineFamily::Bounded { mu } => Bounded::new(lambda, mu)?.into(),
        })
    }
}

/// Likelihood-ratio family: null parameter plus an optional fixed alternative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum LrFamily {
    Normal {
        #[serde(default)]
        mu0: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mu1: Option<f64>,
        #[serde(default = "default_sigma")]
        sigma: f64,
    },
    Bernoulli {
        p: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        q: Option<f64>,
    },
}

impl LrFamily {
    /// Model with the configured fixed alternative (required).
    fn fixed_alternative(&self) -> Result<LrModel> {
        Ok(match *self {
            LrFamily::Normal { mu0, mu1, sigma } => {
                let mu1 = mu1.ok_or_else(|| missing_alternative("mu1"))?;
                NormalLr::new(mu0, mu1, sigma, Side::TwoSided)?.into()
            }
            LrFamily::Bernoulli { p, q } => {
                let q = q.ok_or_else(|| missing_alternative("q"))?;
                BernoulliLr::new(p, q, Side::TwoSided)?.into()
            }
        })
    }

    /// GLR model; any fixed alternative is ignored.
    fn glr(&self, side: Side) -> Result<LrModel> {
        Ok(match *self {
            LrFamily::Normal { mu0, sigma, .. } => NormalLr::glr(mu0, sigma, side)?.into(),
            LrFamily::Bernoulli { p, .. } => BernoulliLr::glr(p, side)?.into(),
        })
    }
}

fn missing_alternative(name: &str) -> StcpError {
    StcpError::invalid_parameter(name, "a fixed alternative is required for likelihood_ratio")
}

fn default_sigma() -> f64 {
    1.0
}

fn default_window_size() -> usize {
    DEFAULT_WINDOW_SIZE
}

/// One detector, tagged by accumulator shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetectorConfig {
    /// Mixture of baseline accumulators over a grid of tilts.
    Mixture {
        #[serde(default)]
        rule: Rule,
        model: BaselineFamily,
        lambdas: Vec<f64>,
        /// Uniform when omitted.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        weights: Option<Vec<f64>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        threshold: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alpha: Option<f64>,
    },
    /// Fixed-alternative likelihood ratio.
    LikelihoodRatio {
        #[serde(default)]
        rule: Rule,
        model: LrFamily,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        threshold: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alpha: Option<f64>,
    },
    /// Windowed GLR CUSUM.
    Glr {
        model: LrFamily,
        #[serde(default)]
        side: Side,
        #[serde(default = "default_window_size")]
        window_size: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        threshold: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alpha: Option<f64>,
    },
}

impl DetectorConfig {
    /// Parse a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| StcpError::Parse {
            format: "json".to_string(),
            message: e.to_string(),
        })
    }

    /// Parse a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| StcpError::Parse {
            format: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Load from a file; `.toml` files are parsed as TOML, anything else as JSON.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| StcpError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_toml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("toml"));
        if is_toml {
            Self::from_toml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| StcpError::Parse {
            format: "json".to_string(),
            message: e.to_string(),
        })
    }

    /// Resolved log-scale threshold.
    pub fn threshold(&self) -> Result<f64> {
        let (threshold, alpha) = match self {
            DetectorConfig::Mixture { threshold, alpha, .. }
            | DetectorConfig::LikelihoodRatio { threshold, alpha, .. }
            | DetectorConfig::Glr { threshold, alpha, .. } => (*threshold, *alpha),
        };
        match (threshold, alpha) {
            (Some(_), Some(_)) => Err(StcpError::invalid_parameter(
                "threshold",
                "give either threshold or alpha, not both",
            )),
            (Some(t), None) => Ok(t),
            (None, Some(a)) => threshold_from_alpha(a),
            (None, None) => Ok(default_threshold()),
        }
    }

    /// Build the accumulator described by this configuration.
    pub fn build_e_process(&self) -> Result<AnyEProcess> {
        match self {
            DetectorConfig::Mixture {
                rule,
                model,
                lambdas,
                weights,
                ..
            } => {
                if lambdas.is_empty() {
                    return Err(StcpError::invalid_parameter(
                        "lambdas",
                        "at least one tilt is required",
                    ));
                }
                let children = lambdas
                    .iter()
                    .map(|&lambda| Ok(BaselineE::new(model.model(lambda)?, *rule)))
                    .collect::<Result<Vec<_>>>()?;
                let mixture = match weights {
                    Some(w) => Mixture::new(children, w.clone())?,
                    None => Mixture::uniform(children)?,
                };
                Ok(mixture.into())
            }
            DetectorConfig::LikelihoodRatio { rule, model, .. } => {
                Ok(BaselineE::new(model.fixed_alternative()?, *rule).into())
            }
            DetectorConfig::Glr {
                model,
                side,
                window_size,
                ..
            } => Ok(GlrCu::new(model.glr(*side)?, *window_size)?.into()),
        }
    }

    /// Build a ready-to-run detector.
    pub fn build(&self) -> Result<Detector> {
        let threshold = self.threshold()?;
        Stcp::new(self.build_e_process()?, threshold)
    }

    /// Semantic validation without keeping the detector.
    pub fn validate(&self) -> Result<()> {
        self.build().map(|_| ())
    }
}

/// Load a configuration file and build its detector.
pub fn load_detector(path: &Path) -> Result<Detector> {
    let config = DetectorConfig::from_file(path)?;
    config.build().inspect_err(|e| {
        warn!(path = %path.display(), error = %e, "detector config failed validation");
    })
}
