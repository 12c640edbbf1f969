//! Monte Carlo checks of the anytime false-alarm guarantee.
//!
//! Under the null an ST mixture is a nonnegative martingale with initial
//! value one, so the chance it ever exceeds `1/α` is at most `α`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use stcp_core::{BaselineE, Bernoulli, Mixture, Normal, Stcp};

const RUNS: usize = 400;
const HORIZON: usize = 300;
const ALPHA: f64 = 0.05;

fn bernoulli_stream(rng: &mut StdRng, p: f64, len: usize) -> Vec<f64> {
    (0..len)
        .map(|_| if rng.random_bool(p) { 1.0 } else { 0.0 })
        .collect()
}

/// Standard normal draws via Box-Muller.
fn normal_stream(rng: &mut StdRng, len: usize) -> Vec<f64> {
    (0..len)
        .map(|_| {
            let u1: f64 = rng.random::<f64>().max(f64::MIN_POSITIVE);
            let u2: f64 = rng.random();
            (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
        })
        .collect()
}

fn bernoulli_detector(p: f64) -> Stcp<Mixture<BaselineE<Bernoulli>>> {
    let children = [0.25, 0.5, 1.0, 2.0]
        .iter()
        .map(|&l| BaselineE::st(Bernoulli::new(l, p).unwrap()))
        .collect();
    Stcp::with_alpha(Mixture::uniform(children).unwrap(), ALPHA).unwrap()
}

#[test]
fn bernoulli_st_mixture_false_alarm_rate() {
    let mut rng = StdRng::seed_from_u64(0x5eed_0001);
    let mut alarms = 0;
    for _ in 0..RUNS {
        let xs = bernoulli_stream(&mut rng, 0.3, HORIZON);
        let mut det = bernoulli_detector(0.3);
        det.update_until_stop(&xs).unwrap();
        if det.is_stopped() {
            alarms += 1;
        }
    }
    let rate = alarms as f64 / RUNS as f64;
    // Binomial slack around α for a finite number of runs.
    assert!(rate <= ALPHA + 0.03, "false alarm rate {rate}");
}

#[test]
fn normal_st_mixture_false_alarm_rate() {
    let mut rng = StdRng::seed_from_u64(0x5eed_0002);
    let mut alarms = 0;
    for _ in 0..RUNS {
        let xs = normal_stream(&mut rng, HORIZON);
        let children = [0.1, 0.3, 1.0]
            .iter()
            .map(|&l| BaselineE::st(Normal::standard(l)))
            .collect();
        let mut det = Stcp::with_alpha(Mixture::uniform(children).unwrap(), ALPHA).unwrap();
        det.update_until_stop(&xs).unwrap();
        if det.is_stopped() {
            alarms += 1;
        }
    }
    let rate = alarms as f64 / RUNS as f64;
    assert!(rate <= ALPHA + 0.03, "false alarm rate {rate}");
}

#[test]
fn bernoulli_st_mixture_detects_shift() {
    let mut rng = StdRng::seed_from_u64(0x5eed_0003);
    let mut detected = 0;
    for _ in 0..100 {
        let xs = bernoulli_stream(&mut rng, 0.7, HORIZON);
        let mut det = bernoulli_detector(0.3);
        det.update_until_stop(&xs).unwrap();
        if det.is_stopped() {
            detected += 1;
        }
    }
    assert!(detected >= 95, "detected only {detected}/100");
}
