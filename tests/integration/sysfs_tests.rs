//! Controller over the sysfs adapter, with every control point backed by a
//! plain file in a temp directory.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use vibrator::ActuatorController;
use vibrator::adapters::sysfs::SysfsHardware;
use vibrator::app::calibration::CalibrationStore;
use vibrator::app::catalog::EffectCatalog;
use vibrator::app::effect::{Effect, EffectStrength};
use vibrator::app::ports::ControlPoint;
use vibrator::config::VibratorConfig;

fn setup() -> (TempDir, VibratorConfig) {
    let dir = TempDir::new().unwrap();
    let mut cfg = VibratorConfig::default();
    for p in ControlPoint::ALL {
        let path = dir.path().join(p.name());
        fs::write(&path, "0\n").unwrap();
        cfg.control_points.insert(p, path);
    }
    cfg.calibration_path = dir.path().join("cs40l25a.cal");
    (dir, cfg)
}

fn contents(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn perform_leaves_final_register_values_on_disk() {
    let (_dir, cfg) = setup();
    fs::write(&cfg.calibration_path, "q_measured: 999\n").unwrap();
    let cal = CalibrationStore::load_or_default(&cfg.calibration_path);

    let mut c = ActuatorController::new(SysfsHardware::open(&cfg), &cal, EffectCatalog::default());
    assert_eq!(
        c.perform_effect(Effect::DoubleClick, EffectStrength::Light),
        // tick light + 100 ms + 1 + click light
        Ok(18 + 101 + 18)
    );

    assert_eq!(contents(cfg.path(ControlPoint::State)), "1\n");
    assert_eq!(contents(cfg.path(ControlPoint::Q)), "999\n");
    assert_eq!(contents(cfg.path(ControlPoint::EffectQueue)), "2.60,100,2.70\n");
    assert_eq!(contents(cfg.path(ControlPoint::EffectIndex)), "65534\n");
    assert_eq!(contents(cfg.path(ControlPoint::Duration)), "137\n");
    assert_eq!(contents(cfg.path(ControlPoint::Activate)), "1\n");
}

#[test]
fn external_control_round_trips_through_file() {
    let (_dir, cfg) = setup();
    let cal = CalibrationStore::default();
    let mut c = ActuatorController::new(SysfsHardware::open(&cfg), &cal, EffectCatalog::default());

    c.set_external_control(true).unwrap();
    assert!(c.is_under_external_control());
    c.set_external_control(false).unwrap();
    assert!(!c.is_under_external_control());
}

#[test]
fn missing_files_degrade_capabilities() {
    let (dir, mut cfg) = setup();
    cfg.control_points
        .insert(ControlPoint::EffectScale, dir.path().join("nope/cp_dig_scale"));
    cfg.control_points
        .insert(ControlPoint::AspEnable, dir.path().join("nope/asp_enable"));
    let cal = CalibrationStore::default();
    let mut c = ActuatorController::new(SysfsHardware::open(&cfg), &cal, EffectCatalog::default());

    assert!(!c.supports_amplitude_control());
    assert!(!c.supports_external_control());
    assert_eq!(c.perform_effect(Effect::Click, EffectStrength::Strong), Ok(18));
}
