//! End-to-end: calibration file on disk → CalibrationStore → controller
//! startup writes.

use std::fs;

use tempfile::TempDir;

use crate::mock_hw::MockHardware;

use vibrator::ActuatorController;
use vibrator::app::calibration::{CalibrationStore, Q_DEFAULT};
use vibrator::app::catalog::EffectCatalog;
use vibrator::app::effect::{Effect, EffectStrength};
use vibrator::app::levels::V_LEVELS_DEFAULT;
use vibrator::app::ports::{CalibrationPort, ControlPoint};

fn store_from(text: &str) -> CalibrationStore {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cs40l25a.cal");
    fs::write(&path, text).unwrap();
    CalibrationStore::load(&path).unwrap()
}

#[test]
fn factory_file_is_pushed_at_startup() {
    let store = store_from(
        "# factory\nf0_measured: 0x24c000\nredc_measured: 7023\nq_index: 10\nv_levels: 50 60 70 80 90 66\n",
    );
    let c = ActuatorController::new(MockHardware::new(), &store, EffectCatalog::default());

    assert_eq!(c.hardware().last(ControlPoint::F0), Some("2408448"));
    assert_eq!(c.hardware().last(ControlPoint::Redc), Some("7023"));
    assert_eq!(c.hardware().last(ControlPoint::Q), Some("1114112"));
    assert_eq!(c.voltage_levels().as_array(), &[50, 60, 70, 80, 90, 66]);
}

#[test]
fn short_voltage_list_keeps_defaults() {
    let store = store_from("v_levels: 10 20 30 40 50\n");
    assert_eq!(store.voltage_levels(), None);

    let mut c = ActuatorController::new(MockHardware::new(), &store, EffectCatalog::default());
    assert_eq!(c.voltage_levels().as_array(), &V_LEVELS_DEFAULT);
    c.hardware_mut().clear();
    c.perform_effect(Effect::Click, EffectStrength::Medium).unwrap();
    // scale(80 / 100) from the default table
    assert_eq!(c.hardware().last(ControlPoint::EffectScale), Some("16"));
}

#[test]
fn out_of_scale_levels_fall_back_to_defaults() {
    let store = store_from("v_levels: 60 70 80 90 150 76\n");
    assert_eq!(store.voltage_levels(), None);

    let mut c = ActuatorController::new(MockHardware::new(), &store, EffectCatalog::default());
    assert_eq!(c.voltage_levels().as_array(), &V_LEVELS_DEFAULT);
    c.hardware_mut().clear();
    assert_eq!(c.perform_effect(Effect::HeavyClick, EffectStrength::Strong), Ok(18));
    // scale(100 / 100) from the default table
    assert_eq!(
        c.hardware().points(),
        vec![
            ControlPoint::EffectScale,
            ControlPoint::EffectIndex,
            ControlPoint::Duration,
            ControlPoint::Activate,
        ]
    );
    assert_eq!(c.hardware().last(ControlPoint::EffectScale), Some("0"));
}

#[test]
fn missing_file_uses_every_default() {
    let dir = TempDir::new().unwrap();
    let store = CalibrationStore::load_or_default(&dir.path().join("absent.cal"));
    let c = ActuatorController::new(MockHardware::new(), &store, EffectCatalog::default());

    assert_eq!(c.hardware().last(ControlPoint::F0), None);
    assert_eq!(c.hardware().last(ControlPoint::Q), Some(Q_DEFAULT.to_string().as_str()));
    assert_eq!(c.voltage_levels().as_array(), &V_LEVELS_DEFAULT);
}

#[test]
fn unreadable_file_reports_io_kind() {
    let dir = TempDir::new().unwrap();
    let err = CalibrationStore::load(&dir.path().join("absent.cal")).unwrap_err();
    assert_eq!(
        err,
        vibrator::app::calibration::CalibrationError::Unreadable(std::io::ErrorKind::NotFound)
    );
}
