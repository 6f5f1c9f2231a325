//! Fuzz target: calibration file parser
//!
//! Feeds arbitrary bytes through `CalibrationStore::parse` and the typed
//! getters, verifying:
//! - No panics on any input
//! - `v_levels` is either absent or exactly six entries
//!
//! cargo fuzz run fuzz_calibration_parse

#![no_main]

use libfuzzer_sys::fuzz_target;
use vibrator::app::calibration::CalibrationStore;
use vibrator::app::ports::CalibrationPort;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let store = CalibrationStore::parse(&text);

    let _ = store.f0();
    let _ = store.redc();
    let _ = store.q();
    if let Some(levels) = store.voltage_levels() {
        assert_eq!(levels.as_array().len(), 6);
        assert!(store.try_voltage_levels().is_ok());
    }
});
