//! `vibratorctl`: drive the vibrator from the command line.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  clap Args ──▶ VibratorCommand                          │
//! │                                                         │
//! │  VibratorConfig (defaults · --config JSON · env)        │
//! │  CalibrationStore (calibration file)                    │
//! │  EffectCatalog (built-in or JSON descriptor)            │
//! │                                                         │
//! │  ──────────────── Port Trait Boundary ───────────────── │
//! │                                                         │
//! │  ActuatorController<SysfsHardware | MemoryHardware>     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ```bash
//! vibratorctl perform double-click --strength strong
//! vibratorctl --dry-run on 500
//! CALIBRATION_FILEPATH=/tmp/cal vibratorctl -v caps
//! ```

#![deny(unused_must_use)]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use log::{LevelFilter, info};

use vibrator::ActuatorController;
use vibrator::adapters::memory::MemoryHardware;
use vibrator::adapters::sysfs::SysfsHardware;
use vibrator::app::calibration::CalibrationStore;
use vibrator::app::catalog::EffectCatalog;
use vibrator::app::commands::{CommandOutcome, VibratorCommand};
use vibrator::app::effect::{Effect, EffectStrength};
use vibrator::app::ports::HardwarePort;
use vibrator::config::VibratorConfig;

/// Control an LRA haptic actuator through its sysfs interface
#[derive(Parser, Debug)]
#[command(name = "vibratorctl")]
#[command(version)]
#[command(about = "Control an LRA haptic actuator through its sysfs interface")]
struct Args {
    /// JSON config file (control-point paths, calibration and catalog files)
    #[arg(short, long, value_name = "FILE", env = "VIBRATOR_CONFIG")]
    config: Option<PathBuf>,

    /// Use an in-memory backend and print the register writes instead of
    /// touching the driver
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose logging (repeat for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Vibrate for a number of milliseconds
    On { duration_ms: u32 },
    /// Stop vibrating
    Off,
    /// Set the effect amplitude (1-255)
    Amplitude { amplitude: u8 },
    /// Enable or disable external (audio-stream) control
    External {
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
    /// Play a named effect
    Perform {
        #[arg(value_parser = parse_effect)]
        effect: Effect,
        #[arg(short, long, default_value = "medium", value_parser = parse_strength)]
        strength: EffectStrength,
    },
    /// Report supported controls
    Caps,
    /// List the effects in the active catalog
    Effects,
}

fn parse_effect(s: &str) -> Result<Effect, String> {
    s.parse().map_err(|()| format!("unknown effect '{s}'"))
}

fn parse_strength(s: &str) -> Result<EffectStrength, String> {
    s.parse()
        .map_err(|()| format!("unknown strength '{s}' (light, medium, strong)"))
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    info!("vibratorctl v{} starting", env!("CARGO_PKG_VERSION"));

    let config = load_config(args.config.as_deref())?;
    let calibration = CalibrationStore::load_or_default(&config.calibration_path);
    let catalog = load_catalog(&config)?;

    if args.dry_run {
        let mut controller =
            ActuatorController::new(MemoryHardware::new(), &calibration, catalog);
        controller.hardware_mut().clear_journal();
        let ok = run(&mut controller, &args.action)?;
        for (point, value) in controller.hardware().journal() {
            println!("{point} <- {value}");
        }
        finish(ok)
    } else {
        let hw = SysfsHardware::open(&config);
        let mut controller = ActuatorController::new(hw, &calibration, catalog);
        let ok = run(&mut controller, &args.action)?;
        finish(ok)
    }
}

fn setup_logging(verbose: u8) {
    let default = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(default)
        .parse_default_env()
        .format_timestamp_millis()
        .init();
}

fn load_config(path: Option<&Path>) -> Result<VibratorConfig> {
    let mut config = match path {
        Some(path) => VibratorConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => VibratorConfig::default(),
    };
    config.apply_env();
    config.validate().context("invalid config")?;
    Ok(config)
}

fn load_catalog(config: &VibratorConfig) -> Result<EffectCatalog> {
    let Some(path) = &config.catalog_path else {
        return Ok(EffectCatalog::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading catalog {}", path.display()))?;
    EffectCatalog::from_json(&json).with_context(|| format!("loading catalog {}", path.display()))
}

/// Dispatch one action; returns whether the controller reported success.
fn run<H: HardwarePort>(controller: &mut ActuatorController<H>, action: &Action) -> Result<bool> {
    let command = match *action {
        Action::On { duration_ms } => VibratorCommand::On { duration_ms },
        Action::Off => VibratorCommand::Off,
        Action::Amplitude { amplitude } => VibratorCommand::SetAmplitude { amplitude },
        Action::External { enabled } => VibratorCommand::SetExternalControl { enabled },
        Action::Perform { effect, strength } => VibratorCommand::Perform { effect, strength },
        Action::Caps => VibratorCommand::QueryCapabilities,
        Action::Effects => {
            for effect in controller.catalog().effects() {
                println!("{:>2}  {}", effect.id(), effect);
            }
            return Ok(true);
        }
    };
    let outcome: CommandOutcome = controller.handle_command(command);
    println!("{}", serde_json::to_string(&outcome)?);
    Ok(outcome.status_code().is_ok())
}

fn finish(ok: bool) -> Result<()> {
    if !ok {
        bail!("command failed");
    }
    Ok(())
}
