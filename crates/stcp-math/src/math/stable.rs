//! Numerically stable primitives for log-domain e-process arithmetic.
//!
//! Every weighted combination of e-values in the workspace goes through
//! [`weighted_log_sum_exp`], so mixtures built from any accumulator kind share
//! the same overflow/underflow behavior.

/// Tolerance used for binary-input matching and weight-sum validation.
pub const EPS: f64 = 1e-8;

/// Log of the zero e-value; the initial state of SR/CU/GLR accumulators.
pub const NEG_INF: f64 = f64::NEG_INFINITY;

/// Default type-I error level for stopping thresholds.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Threshold `ln(1/alpha)` implied by Ville's inequality.
pub fn log_threshold(alpha: f64) -> f64 {
    -alpha.ln()
}

/// Stable log(sum(exp(values))).
///
/// Returns NEG_INFINITY for empty input or all -inf inputs.
pub fn log_sum_exp(values: &[f64]) -> f64 {
    if values.is_empty() {
        return NEG_INF;
    }
    if values.iter().any(|v| v.is_nan()) {
        return f64::NAN;
    }
    let max = values.iter().cloned().fold(NEG_INF, f64::max);
    if max == NEG_INF {
        return NEG_INF;
    }
    if max == f64::INFINITY {
        return f64::INFINITY;
    }
    let sum: f64 = values.iter().map(|v| (*v - max).exp()).sum();
    max + sum.ln()
}

/// Stable log(sum(w_i * exp(v_i))) given `log_weights[i] = ln(w_i)`.
///
/// Pairs beyond the shorter slice are ignored; callers validate lengths.
pub fn weighted_log_sum_exp(log_weights: &[f64], log_values: &[f64]) -> f64 {
    let mut max = NEG_INF;
    for (lw, lv) in log_weights.iter().zip(log_values) {
        let term = lw + lv;
        if term.is_nan() {
            return f64::NAN;
        }
        if term > max {
            max = term;
        }
    }
    if max == NEG_INF {
        return NEG_INF;
    }
    if max == f64::INFINITY {
        return f64::INFINITY;
    }
    let sum: f64 = log_weights
        .iter()
        .zip(log_values)
        .map(|(lw, lv)| (lw + lv - max).exp())
        .sum();
    max + sum.ln()
}

/// Stable log(exp(a) + exp(b)).
pub fn log_add_exp(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        return f64::NAN;
    }
    if a == NEG_INF {
        return b;
    }
    if b == NEG_INF {
        return a;
    }
    if a == f64::INFINITY || b == f64::INFINITY {
        return f64::INFINITY;
    }
    let m = a.max(b);
    let diff = (a - b).abs();
    m + (-diff).exp().ln_1p()
}

/// Stable ln(1 + exp(x)), i.e. `log_add_exp(0, x)`.
///
/// Exactly 0 at `x = -inf`, so an SR accumulator started at -inf takes its
/// first factor at face value.
pub fn log1p_exp(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x == NEG_INF {
        return 0.0;
    }
    if x > 0.0 {
        x + (-x).exp().ln_1p()
    } else {
        x.exp().ln_1p()
    }
}
