//! Fuzz target for TOML detector configuration parsing.

#![no_main]

use libfuzzer_sys::fuzz_target;
use stcp_core::DetectorConfig;

fuzz_target!(|data: &str| {
    // Should never panic, only return an error
    if let Ok(cfg) = DetectorConfig::from_toml_str(data) {
        let _ = cfg.validate();
    }
});
