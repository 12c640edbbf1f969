//! Fuzz target for detector updates with arbitrary parameters and inputs.
//!
//! Checks that construction rejects bad parameters instead of panicking, and
//! that the stopping time, once recorded, never changes.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use stcp_core::{BaselineE, Bernoulli, GlrCu, Mixture, Normal, NormalLr, Rule, Side, Stcp};

#[derive(Debug, Arbitrary)]
enum Shape {
    NormalMixture { rule: u8, lambdas: Vec<f64> },
    BernoulliMixture { rule: u8, p: f64, lambdas: Vec<f64> },
    Glr { side: u8, window: u8 },
}

#[derive(Debug, Arbitrary)]
struct Input {
    shape: Shape,
    threshold: f64,
    xs: Vec<f64>,
}

fn rule(tag: u8) -> Rule {
    match tag % 3 {
        0 => Rule::St,
        1 => Rule::Sr,
        _ => Rule::Cu,
    }
}

fn side(tag: u8) -> Side {
    match tag % 3 {
        0 => Side::TwoSided,
        1 => Side::Greater,
        _ => Side::Less,
    }
}

fn drive<E: stcp_core::EProcess>(e: E, threshold: f64, xs: &[f64]) {
    let Ok(mut det) = Stcp::new(e, threshold) else {
        return;
    };
    let mut first = None;
    for &x in xs {
        if det.update(x).is_err() {
            continue;
        }
        match first {
            None => first = det.stopped_time(),
            Some(t) => assert_eq!(det.stopped_time(), Some(t)),
        }
    }
}

fuzz_target!(|input: Input| {
    match input.shape {
        Shape::NormalMixture { rule: r, lambdas } => {
            let children: Option<Vec<_>> = lambdas
                .iter()
                .take(16)
                .map(|&l| Normal::new(l, 0.0, 1.0).ok().map(|m| BaselineE::new(m, rule(r))))
                .collect();
            if let Some(Ok(mix)) = children.map(Mixture::uniform) {
                drive(mix, input.threshold, &input.xs);
            }
        }
        Shape::BernoulliMixture { rule: r, p, lambdas } => {
            let children: Option<Vec<_>> = lambdas
                .iter()
                .take(16)
                .map(|&l| Bernoulli::new(l, p).ok().map(|m| BaselineE::new(m, rule(r))))
                .collect();
            if let Some(Ok(mix)) = children.map(Mixture::uniform) {
                drive(mix, input.threshold, &input.xs);
            }
        }
        Shape::Glr { side: s, window } => {
            let Ok(model) = NormalLr::glr(0.0, 1.0, side(s)) else {
                return;
            };
            if let Ok(g) = GlrCu::new(model, window as usize) {
                drive(g, input.threshold, &input.xs);
            }
        }
    }
});
