//! Fuzz target: JSON effect catalog loader
//!
//! Any descriptor that loads must resolve every (effect, strength) pair to
//! either a positive duration or `UnsupportedOperation`, never a panic.
//!
//! cargo fuzz run fuzz_catalog_json

#![no_main]

use libfuzzer_sys::fuzz_target;
use vibrator::VibratorError;
use vibrator::app::catalog::EffectCatalog;
use vibrator::app::composer::EffectComposer;
use vibrator::app::effect::{Effect, EffectStrength};
use vibrator::app::levels::VoltageLevels;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(catalog) = EffectCatalog::from_json(json) else {
        return;
    };
    let composer = EffectComposer::new(catalog, VoltageLevels::default());
    for effect in Effect::ALL {
        for strength in EffectStrength::ALL {
            match composer.resolve(effect, strength) {
                Ok(spec) => assert!(spec.queue.is_some() || spec.volume_level > 0),
                Err(e) => assert_eq!(e, VibratorError::UnsupportedOperation),
            }
        }
    }
});
