//! Fuzz target for JSON detector configuration.
//!
//! Parsing and building must never panic; a detector that builds must accept
//! a short stream of observations without panicking either.

#![no_main]

use libfuzzer_sys::fuzz_target;
use stcp_core::DetectorConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(cfg) = serde_json::from_slice::<DetectorConfig>(data) else {
        return;
    };
    if let Ok(mut det) = cfg.build() {
        let _ = det.update_many(&[0.0, 1.0, 0.5, -1.0]);
        let _ = det.update_by_avg(0.5, 3.0);
    }
});
