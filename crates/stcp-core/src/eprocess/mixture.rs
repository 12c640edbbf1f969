//! Weighted mixtures of e-processes.
//!
//! A convex combination of e-processes is an e-process; in log space it is
//!
//! ```text
//! log_value = logsumexp_i(ln wᵢ + vᵢ)
//! ```
//!
//! evaluated through [`stcp_math::weighted_log_sum_exp`]. Updates and resets
//! are broadcast to every child; an observation is validated against every
//! child before any child is mutated.

use super::EProcess;
use crate::error::{Result, StcpError};
use stcp_math::{weighted_log_sum_exp, EPS};

#[derive(Debug, Clone, PartialEq)]
pub struct Mixture<E> {
    weights: Vec<f64>,
    log_weights: Vec<f64>,
    children: Vec<E>,
}

impl<E: EProcess> Mixture<E> {
    /// Create a mixture. Weights must be strictly positive, sum to one within
    /// `1e-8`, and match the number of children.
    pub fn new(children: Vec<E>, weights: Vec<f64>) -> Result<Self> {
        if weights.len() != children.len() {
            return Err(StcpError::length_mismatch(
                "weights vs children",
                weights.len(),
                children.len(),
            ));
        }
        let log_weights = validate_weights(&weights)?;
        Ok(Self {
            weights,
            log_weights,
            children,
        })
    }

    /// Singleton mixture with weight one.
    pub fn single(child: E) -> Self {
        Self {
            weights: vec![1.0],
            log_weights: vec![0.0],
            children: vec![child],
        }
    }

    /// Equal-weight mixture over `children`.
    pub fn uniform(children: Vec<E>) -> Result<Self> {
        let n = children.len();
        if n == 0 {
            return Err(StcpError::invalid_parameter(
                "children",
                "mixture needs at least one component",
            ));
        }
        Self::new(children, vec![1.0 / n as f64; n])
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn log_weights(&self) -> &[f64] {
        &self.log_weights
    }

    pub fn children(&self) -> &[E] {
        &self.children
    }

    /// Log-value of each child, in order.
    pub fn log_values(&self) -> Vec<f64> {
        self.children.iter().map(|c| c.log_value()).collect()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

fn validate_weights(weights: &[f64]) -> Result<Vec<f64>> {
    let mut sum = 0.0;
    let mut log_weights = Vec::with_capacity(weights.len());
    for (i, &w) in weights.iter().enumerate() {
        if !w.is_finite() || w <= 0.0 {
            return Err(StcpError::invalid_parameter(
                "weights",
                format!("all weights must be strictly positive, weights[{i}] = {w}"),
            ));
        }
        sum += w;
        log_weights.push(w.ln());
    }
    if (sum - 1.0).abs() > EPS {
        return Err(StcpError::invalid_parameter(
            "weights",
            format!("weights must sum to 1, got {sum}"),
        ));
    }
    Ok(log_weights)
}

impl<E: EProcess> EProcess for Mixture<E> {
    fn name(&self) -> &'static str {
        self.children.first().map_or("mixture", |c| c.name())
    }

    fn log_value(&self) -> f64 {
        if let [only] = self.children.as_slice() {
            // Weight is one by construction.
            return only.log_value();
        }
        let log_values = self.log_values();
        weighted_log_sum_exp(&self.log_weights, &log_values)
    }

    fn reset(&mut self) {
        for child in &mut self.children {
            child.reset();
        }
    }

    fn check(&self, x: f64) -> Result<()> {
        self.children.iter().try_for_each(|c| c.check(x))
    }

    fn update(&mut self, x: f64) -> Result<()> {
        self.check(x)?;
        for child in &mut self.children {
            child.update(x)?;
        }
        Ok(())
    }

    fn check_average(&self, x_bar: f64, n: f64) -> Result<()> {
        self.children
            .iter()
            .try_for_each(|c| c.check_average(x_bar, n))
    }

    fn update_by_avg(&mut self, x_bar: f64, n: f64) -> Result<()> {
        self.check_average(x_bar, n)?;
        for child in &mut self.children {
            child.update_by_avg(x_bar, n)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eprocess::{BaselineE, GlrCu};
    use crate::increment::{Bernoulli, Normal, NormalLr, Side};
    use stcp_math::NEG_INF;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    fn normal_st(lambdas: &[f64]) -> Vec<BaselineE<Normal>> {
        lambdas
            .iter()
            .map(|&l| BaselineE::st(Normal::standard(l)))
            .collect()
    }

    #[test]
    fn rejects_weights_not_summing_to_one() {
        let err = Mixture::new(normal_st(&[0.5, 1.0, 2.0]), vec![0.5, 0.3, 0.3]).unwrap_err();
        assert!(matches!(err, StcpError::InvalidParameter { .. }));
    }

    #[test]
    fn rejects_nonpositive_weight() {
        let err = Mixture::new(normal_st(&[0.5, 1.0]), vec![1.2, -0.2]).unwrap_err();
        assert!(matches!(err, StcpError::InvalidParameter { .. }));
        let err = Mixture::new(normal_st(&[0.5, 1.0]), vec![1.0, 0.0]).unwrap_err();
        assert!(matches!(err, StcpError::InvalidParameter { .. }));
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = Mixture::new(normal_st(&[0.5, 1.0]), vec![1.0]).unwrap_err();
        assert!(matches!(err, StcpError::LengthMismatch { left: 1, right: 2, .. }));
    }

    #[test]
    fn accepts_sum_within_tolerance() {
        assert!(Mixture::new(normal_st(&[0.5, 1.0]), vec![0.5, 0.5 + 5e-9]).is_ok());
        assert!(Mixture::new(normal_st(&[0.5, 1.0]), vec![0.5, 0.5 + 5e-8]).is_err());
    }

    #[test]
    fn singleton_equals_child() {
        let mut mix = Mixture::new(normal_st(&[1.0]), vec![1.0]).unwrap();
        for x in [0.3, 2.0, -1.0] {
            mix.update(x).unwrap();
            assert_eq!(mix.log_value(), mix.children()[0].log_value());
        }
    }

    #[test]
    fn combined_value_is_weighted_lse() {
        let mut mix = Mixture::new(normal_st(&[0.5, 1.5]), vec![0.25, 0.75]).unwrap();
        mix.update(1.0).unwrap();
        let v = mix.log_values();
        let expected = (0.25 * v[0].exp() + 0.75 * v[1].exp()).ln();
        assert!(approx_eq(mix.log_value(), expected, 1e-12));
    }

    #[test]
    fn broadcast_reset() {
        let children = vec![
            BaselineE::cu(Normal::standard(0.5)),
            BaselineE::cu(Normal::standard(1.0)),
        ];
        let mut mix = Mixture::uniform(children).unwrap();
        mix.update(3.0).unwrap();
        assert!(mix.log_value() > 0.0);
        mix.reset();
        assert!(mix.log_values().iter().all(|v| *v == NEG_INF));
        assert_eq!(mix.log_value(), NEG_INF);
    }

    #[test]
    fn invalid_observation_mutates_no_child() {
        let children = vec![
            BaselineE::st(Bernoulli::new(0.5, 0.5).unwrap()),
            BaselineE::st(Bernoulli::new(1.0, 0.5).unwrap()),
        ];
        let mut mix = Mixture::uniform(children).unwrap();
        mix.update(1.0).unwrap();
        let before = mix.log_values();
        assert!(mix.update(2.0).is_err());
        assert_eq!(mix.log_values(), before);
    }

    #[test]
    fn glr_mixture_rejects_average_update() {
        let g = GlrCu::new(NormalLr::glr(0.0, 1.0, Side::TwoSided).unwrap(), 5).unwrap();
        let mut mix = Mixture::single(g);
        assert!(matches!(
            mix.update_by_avg(0.0, 3.0),
            Err(StcpError::UnsupportedOperation { .. })
        ));
    }

    #[test]
    fn average_update_broadcasts() {
        let mut mix = Mixture::uniform(normal_st(&[0.5, 1.0])).unwrap();
        mix.update_by_avg(1.0, 2.0).unwrap();
        let v = mix.log_values();
        assert!(approx_eq(v[0], 2.0 * (0.5 - 0.125), 1e-12));
        assert!(approx_eq(v[1], 2.0 * (1.0 - 0.5), 1e-12));
    }

    #[test]
    fn uniform_rejects_empty() {
        let empty: Vec<BaselineE<Normal>> = Vec::new();
        assert!(Mixture::uniform(empty).is_err());
    }
}
