//! Fuzz target for the weighted log-sum-exp reduction.

#![no_main]

use libfuzzer_sys::fuzz_target;
use stcp_math::weighted_log_sum_exp;

fuzz_target!(|pairs: Vec<(f64, f64)>| {
    let (log_weights, log_values): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
    let out = weighted_log_sum_exp(&log_weights, &log_values);
    let finite = log_weights
        .iter()
        .zip(&log_values)
        .all(|(w, v)| w.is_finite() && v.is_finite() && w.abs() < 1e300 && v.abs() < 1e300);
    if finite && !log_weights.is_empty() {
        assert!(!out.is_nan());
    }
});
