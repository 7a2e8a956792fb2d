//! Command line interface for Orrery

use clap::Parser;
use std::fmt;
use std::path::Path;

use crate::config::{ScenarioKind, SimulationConfig};
use crate::physics::math::Scalar;

/// CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Configuration file could not be loaded
    ConfigLoad(String),
    /// Scenario cannot be built with the requested settings
    InvalidScenario(String),
    /// A numeric override is out of range
    InvalidParameter(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::ConfigLoad(msg) => write!(f, "Failed to load configuration: {msg}"),
            CliError::InvalidScenario(msg) => write!(f, "Invalid scenario: {msg}"),
            CliError::InvalidParameter(msg) => write!(f, "Invalid parameter: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Orrery - headless N-body gravity simulation
#[derive(Parser, Debug)]
#[command(
    version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")"),
    about,
    long_about = None
)]
pub struct Args {
    /// Path to configuration file (TOML format)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// Initial conditions to start from (overrides config file)
    #[arg(long, value_name = "KIND")]
    pub scenario: Option<ScenarioKind>,

    /// Number of bodies for the random scenario (overrides config file)
    #[arg(short = 'n', long, value_name = "COUNT")]
    pub bodies: Option<usize>,

    /// Gravitational constant (overrides config file)
    #[arg(short = 'g', long, value_name = "VALUE")]
    pub gravity: Option<f64>,

    /// Multiplier on the base time step of 0.01
    #[arg(short = 't', long, value_name = "SCALE")]
    pub time_scale: Option<f64>,

    /// Random seed for body generation
    #[arg(short = 's', long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Restart from the initial conditions after this much simulated time, 0 never restarts
    #[arg(long, value_name = "T")]
    pub max_time: Option<f64>,

    /// Exit after this many frames
    #[arg(long, value_name = "N")]
    pub frames: Option<u64>,

    /// Integration steps per frame
    #[arg(long, value_name = "N")]
    pub steps_per_frame: Option<usize>,

    /// Log energy every N steps, 0 disables
    #[arg(long, value_name = "N")]
    pub energy_interval: Option<u64>,

    /// Start paused
    #[arg(short = 'p', long)]
    pub paused: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// List available scenarios and exit
    #[arg(long)]
    pub list_scenarios: bool,
}

/// Handles the --list-scenarios flag by printing available scenarios
pub fn handle_list_scenarios() {
    println!("Available scenarios:");
    for kind in ScenarioKind::ALL {
        println!("  - {:<16}{}", kind.name(), kind.description());
    }
}

/// Loads configuration from file or defaults, then applies command-line overrides
pub fn load_and_apply_config(args: &Args) -> Result<SimulationConfig, CliError> {
    let mut config = if let Some(config_path) = &args.config {
        println!("Loading configuration from: {config_path}");
        if !Path::new(config_path).exists() {
            return Err(CliError::ConfigLoad(format!("{config_path} not found")));
        }
        SimulationConfig::load_layered(config_path)
            .map_err(|e| CliError::ConfigLoad(format!("{config_path}: {e}")))?
    } else {
        SimulationConfig::load_from_user_config()
    };

    if let Some(kind) = args.scenario {
        println!("Using scenario: {}", kind.name());
        config.scenario.kind = kind;
    }

    if let Some(body_count) = args.bodies {
        println!("Overriding body count to: {body_count}");
        config.scenario.body_count = body_count;
    }

    if let Some(gravity) = args.gravity {
        println!("Overriding gravitational constant to: {gravity}");
        config.physics.gravitational_constant = gravity;
    }

    if let Some(time_scale) = args.time_scale {
        println!("Overriding time scale to: {time_scale}");
        config.physics.time_scale = time_scale;
    }

    if let Some(seed) = args.seed {
        println!("Using random seed: {seed}");
        config.scenario.seed = Some(seed);
    }

    if let Some(max_time) = args.max_time {
        if max_time == 0.0 {
            println!("Disabling automatic restart");
            config.run.restart_after = None;
        } else {
            println!("Restarting after t = {max_time}");
            config.run.restart_after = Some(max_time);
        }
    }

    if let Some(frames) = args.frames {
        println!("Stopping after {frames} frames");
        config.run.max_frames = Some(frames);
    }

    if let Some(steps_per_frame) = args.steps_per_frame {
        println!("Overriding steps per frame to: {steps_per_frame}");
        config.run.steps_per_frame = steps_per_frame;
    }

    if let Some(interval) = args.energy_interval {
        println!("Overriding energy report interval to: {interval}");
        config.run.energy_report_interval = interval;
    }

    if args.paused {
        config.run.start_paused = true;
    }

    validate(&config)?;
    Ok(config)
}

fn validate(config: &SimulationConfig) -> Result<(), CliError> {
    let g = config.physics.gravitational_constant;
    if !g.is_finite() {
        return Err(CliError::InvalidParameter(format!(
            "gravitational constant must be finite, got {g}"
        )));
    }

    let time_scale = config.physics.time_scale;
    if !is_non_negative(time_scale) {
        return Err(CliError::InvalidParameter(format!(
            "time scale must be finite and non-negative, got {time_scale}"
        )));
    }

    if config.run.steps_per_frame == 0 {
        return Err(CliError::InvalidParameter(
            "steps per frame must be at least 1".to_string(),
        ));
    }

    if config.run.frame_duration().is_none() {
        return Err(CliError::InvalidParameter(format!(
            "frame rate must be 0 or a positive rate with a representable frame time, got {}",
            config.run.frame_rate
        )));
    }

    if let Some(limit) = config.run.restart_after {
        if !(limit.is_finite() && limit > 0.0) {
            return Err(CliError::InvalidParameter(format!(
                "max time must be positive, got {limit}"
            )));
        }
    }

    if config.scenario.kind == ScenarioKind::Random && config.scenario.body_count == 0 {
        return Err(CliError::InvalidScenario(
            "the random scenario needs at least one body".to_string(),
        ));
    }

    Ok(())
}

fn is_non_negative(value: Scalar) -> bool {
    value.is_finite() && value >= 0.0
}
