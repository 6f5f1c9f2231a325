//! Integration tests for the ActuatorController → HardwarePort pipeline.
//!
//! These run on the host and check the exact register sequence each
//! operation produces against the recording mock adapter.

use crate::mock_hw::{MockCalibration, MockHardware};

use vibrator::ActuatorController;
use vibrator::app::catalog::EffectCatalog;
use vibrator::app::commands::{CommandOutcome, VibratorCommand};
use vibrator::app::effect::{Effect, EffectStrength};
use vibrator::app::levels::VoltageLevels;
use vibrator::app::ports::ControlPoint::{self, *};
use vibrator::{Status, VibratorError};

fn make(hw: MockHardware) -> ActuatorController<MockHardware> {
    make_with(hw, &MockCalibration::default())
}

fn make_with(hw: MockHardware, cal: &MockCalibration) -> ActuatorController<MockHardware> {
    let mut c = ActuatorController::new(hw, cal, EffectCatalog::default());
    c.hardware_mut().clear();
    c
}

fn w(point: ControlPoint, value: &str) -> (ControlPoint, String) {
    (point, value.to_owned())
}

// ── Construction ─────────────────────────────────────────────

#[test]
fn startup_sequence_with_full_calibration() {
    let cal = MockCalibration {
        f0: Some(2_408_448),
        redc: Some(7023),
        q: 1_114_112,
        levels: None,
    };
    let c = ActuatorController::new(MockHardware::new(), &cal, EffectCatalog::default());

    assert_eq!(
        c.hardware().writes,
        vec![
            w(State, "1"),
            w(F0, "2408448"),
            w(Redc, "7023"),
            w(Q, "1114112"),
            w(EffectIndex, "2"),
            w(GpioFallIndex, "2"),
            w(GpioFallScale, "16"),
            w(GpioRiseIndex, "2"),
            w(GpioRiseScale, "7"),
        ]
    );
}

#[test]
fn startup_skips_absent_f0_and_redc_but_always_pushes_q() {
    let cal = MockCalibration {
        q: 1_015_808,
        ..MockCalibration::default()
    };
    let c = ActuatorController::new(MockHardware::new(), &cal, EffectCatalog::default());
    let points = c.hardware().points();

    assert!(!points.contains(&F0));
    assert!(!points.contains(&Redc));
    assert_eq!(c.hardware().last(Q), Some("1015808"));
}

#[test]
fn calibrated_levels_drive_edge_triggers_and_effects() {
    let cal = MockCalibration {
        levels: Some(VoltageLevels::new([10, 20, 30, 40, 50, 60])),
        ..MockCalibration::default()
    };
    let c = ActuatorController::new(MockHardware::new(), &cal, EffectCatalog::default());
    // scale(30 / 100) and scale(40 / 100)
    assert_eq!(c.hardware().last(GpioFallScale), Some("84"));
    assert_eq!(c.hardware().last(GpioRiseScale), Some("64"));
    assert_eq!(c.voltage_levels().as_array(), &[10, 20, 30, 40, 50, 60]);
}

#[test]
fn measured_effect_duration_replaces_simple_length() {
    // 500 samples at 48 kHz rounds up to 11 ms.
    let mut c = make(MockHardware::new().with_value(EffectDuration, "500\n"));
    assert_eq!(c.perform_effect(Effect::Click, EffectStrength::Medium), Ok(17));
}

#[test]
fn startup_survives_missing_control_points() {
    let hw = MockHardware::new()
        .without(State)
        .without(Q)
        .without(GpioFallScale);
    let mut c = make(hw);
    assert_eq!(c.perform_effect(Effect::Tick, EffectStrength::Light), Ok(18));
}

// ── activate / deactivate ────────────────────────────────────

#[test]
fn activate_writes_global_index_duration_activate() {
    let mut c = make(MockHardware::new());
    assert_eq!(c.activate(100), Ok(()));
    assert_eq!(
        c.hardware().writes,
        vec![
            w(GlobalScale, "19"),
            w(EffectIndex, "0"),
            w(Duration, "106"),
            w(Activate, "1"),
        ]
    );
}

#[test]
fn activate_is_best_effort() {
    let mut c = make(MockHardware::new().failing(Duration).failing(GlobalScale));
    assert_eq!(c.activate(50), Ok(()));
    assert_eq!(c.hardware().points(), vec![EffectIndex, Activate]);
}

#[test]
fn activate_saturates_duration() {
    let mut c = make(MockHardware::new());
    c.activate(u32::MAX).unwrap();
    assert_eq!(c.hardware().last(Duration), Some("4294967295"));
}

#[test]
fn deactivate_resets_global_scale_then_stops() {
    let mut c = make(MockHardware::new());
    assert_eq!(c.deactivate(), Ok(()));
    assert_eq!(c.deactivate(), Ok(()));
    assert_eq!(
        c.hardware().writes,
        vec![
            w(GlobalScale, "0"),
            w(Activate, "0"),
            w(GlobalScale, "0"),
            w(Activate, "0"),
        ]
    );
}

#[test]
fn deactivate_reports_failed_stop() {
    let mut c = make(MockHardware::new().failing(Activate));
    assert_eq!(c.deactivate(), Err(VibratorError::UnknownError));
}

// ── Amplitude ────────────────────────────────────────────────

#[test]
fn zero_amplitude_is_rejected_without_writes() {
    let mut c = make(MockHardware::new());
    assert_eq!(c.set_amplitude(0), Err(VibratorError::BadValue));
    assert!(c.hardware().writes.is_empty());
}

#[test]
fn amplitude_is_written_as_attenuation() {
    let mut c = make(MockHardware::new());
    c.set_amplitude(255).unwrap();
    assert_eq!(c.hardware().last(EffectScale), Some("0"));
    c.set_amplitude(128).unwrap();
    assert_eq!(c.hardware().last(EffectScale), Some("48"));
    c.set_amplitude(1).unwrap();
    assert_eq!(c.hardware().last(EffectScale), Some("385"));
}

#[test]
fn amplitude_write_failure_is_unknown_error() {
    let mut c = make(MockHardware::new().failing(EffectScale));
    assert_eq!(c.set_amplitude(10), Err(VibratorError::UnknownError));
}

#[test]
fn amplitude_unsupported_under_external_control() {
    let mut c = make(MockHardware::new());
    c.set_external_control(true).unwrap();
    assert!(c.is_under_external_control());
    assert!(!c.supports_amplitude_control());
    assert_eq!(c.set_amplitude(100), Err(VibratorError::UnsupportedOperation));

    c.set_external_control(false).unwrap();
    assert!(c.supports_amplitude_control());
    assert_eq!(c.set_amplitude(100), Ok(()));
}

#[test]
fn amplitude_control_needs_effect_scale() {
    let mut c = make(MockHardware::new().without(EffectScale));
    assert!(!c.supports_amplitude_control());
}

// ── External control ─────────────────────────────────────────

#[test]
fn external_control_sets_global_scale_then_flag() {
    let mut c = make(MockHardware::new());
    c.set_external_control(true).unwrap();
    c.set_external_control(false).unwrap();
    assert_eq!(
        c.hardware().writes,
        vec![
            w(GlobalScale, "19"),
            w(AspEnable, "1"),
            w(GlobalScale, "0"),
            w(AspEnable, "0"),
        ]
    );
}

#[test]
fn external_control_capability_is_presence() {
    let mut present = make(MockHardware::new());
    assert!(present.supports_external_control());
    assert!(!present.is_under_external_control());

    let mut absent = make(MockHardware::new().without(AspEnable));
    assert!(!absent.supports_external_control());
    assert!(!absent.is_under_external_control());
    assert_eq!(
        absent.set_external_control(true),
        Err(VibratorError::UnknownError)
    );
}

// ── perform_effect ───────────────────────────────────────────

#[test]
fn simple_effect_sequence() {
    let mut c = make(MockHardware::new());
    assert_eq!(c.perform_effect(Effect::Click, EffectStrength::Medium), Ok(18));
    assert_eq!(
        c.hardware().writes,
        vec![
            w(EffectScale, "16"),
            w(EffectIndex, "2"),
            w(Duration, "18"),
            w(Activate, "1"),
        ]
    );
}

#[test]
fn double_click_goes_through_queue() {
    let mut c = make(MockHardware::new());
    assert_eq!(
        c.perform_effect(Effect::DoubleClick, EffectStrength::Medium),
        Ok(18 + 100 + 1 + 18)
    );
    assert_eq!(
        c.hardware().writes,
        vec![
            w(EffectQueue, "2.70,100,2.80"),
            w(EffectScale, "0"),
            w(EffectIndex, "65534"),
            w(Duration, "137"),
            w(Activate, "1"),
        ]
    );
}

#[test]
fn ringtone_writes_stored_queue() {
    let mut c = make(MockHardware::new());
    assert_eq!(
        c.perform_effect(Effect::Ringtone1, EffectStrength::Light),
        Ok(3696)
    );
    assert_eq!(c.hardware().last(EffectQueue), Some("!!2.100,100,2.100,800!!4!"));
    // scale(33 / 100)
    assert_eq!(c.hardware().last(EffectScale), Some("77"));
    assert_eq!(c.hardware().last(EffectIndex), Some("65534"));
}

#[test]
fn unsupported_effect_touches_nothing() {
    let mut c = make(MockHardware::new());
    for effect in [Effect::Thud, Effect::Pop, Effect::Ringtone9] {
        for strength in EffectStrength::ALL {
            assert_eq!(
                c.perform(effect, strength),
                (Status::UnsupportedOperation, 0)
            );
        }
    }
    assert!(c.hardware().writes.is_empty());
}

#[test]
fn queue_failure_aborts_before_trigger() {
    let mut c = make(MockHardware::new().failing(EffectQueue));
    assert_eq!(
        c.perform_effect(Effect::DoubleClick, EffectStrength::Strong),
        Err(VibratorError::UnknownError)
    );
    assert!(c.hardware().writes.is_empty());
}

#[test]
fn effect_scale_failure_does_not_block_playback() {
    let mut c = make(MockHardware::new().failing(EffectScale));
    assert_eq!(c.perform(Effect::HeavyClick, EffectStrength::Strong), (Status::Ok, 18));
    assert_eq!(c.hardware().points(), vec![EffectIndex, Duration, Activate]);
}

#[test]
fn failed_write_does_not_poison_channel() {
    let mut c = make(MockHardware::new().failing(EffectQueue));
    assert!(c.perform_effect(Effect::DoubleClick, EffectStrength::Light).is_err());
    c.hardware_mut().set_failing(EffectQueue, false);
    assert!(c.perform_effect(Effect::DoubleClick, EffectStrength::Light).is_ok());
}

// ── Command dispatch ─────────────────────────────────────────

#[test]
fn commands_map_to_operations() {
    let mut c = make(MockHardware::new());

    assert_eq!(
        c.handle_command(VibratorCommand::SetAmplitude { amplitude: 0 }),
        CommandOutcome::Status {
            status: Status::BadValue
        }
    );
    assert_eq!(
        c.handle_command(VibratorCommand::Perform {
            effect: Effect::Tick,
            strength: EffectStrength::Strong,
        }),
        CommandOutcome::Performed {
            status: Status::Ok,
            duration_ms: 18
        }
    );
    assert!(c.handle_command(VibratorCommand::Off).status_code().is_ok());
}

#[test]
fn capabilities_reflect_hardware() {
    let mut c = make(MockHardware::new().without(AspEnable));
    assert_eq!(
        c.handle_command(VibratorCommand::QueryCapabilities),
        CommandOutcome::Capabilities {
            amplitude_control: true,
            external_control: false,
        }
    );
}
