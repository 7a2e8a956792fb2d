use crate::physics::math::Scalar;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Prefix for environment overrides, e.g. `ORRERY__PHYSICS__TIME_SCALE=0.5`
pub const ENV_PREFIX: &str = "ORRERY";

#[derive(Resource, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub physics: PhysicsConfig,
    pub scenario: ScenarioConfig,
    pub run: RunConfig,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravitational_constant: Scalar,
    pub time_scale: Scalar,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: 1.0,
            time_scale: 1.0,
        }
    }
}

/// Which set of initial conditions to start from
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum ScenarioKind {
    #[default]
    ThreeBody,
    CircularOrbit,
    Random,
    Custom,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 4] = [
        ScenarioKind::ThreeBody,
        ScenarioKind::CircularOrbit,
        ScenarioKind::Random,
        ScenarioKind::Custom,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ScenarioKind::ThreeBody => "three_body",
            ScenarioKind::CircularOrbit => "circular_orbit",
            ScenarioKind::Random => "random",
            ScenarioKind::Custom => "custom",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ScenarioKind::ThreeBody => "masses 5, 3 and 2 on the corners of a right triangle",
            ScenarioKind::CircularOrbit => "a light body orbiting a unit mass at distance 1",
            ScenarioKind::Random => "seeded random bodies on a sphere with tangential velocities",
            ScenarioKind::Custom => "bodies listed in the configuration file",
        }
    }
}

/// Initial state of one body in a custom scenario
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BodyConfig {
    pub mass: Scalar,
    pub position: [Scalar; 3],
    #[serde(default)]
    pub velocity: [Scalar; 3],
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ScenarioConfig {
    pub kind: ScenarioKind,
    /// Number of bodies for the random scenario
    pub body_count: usize,
    pub seed: Option<u64>,
    pub spawn_radius: Scalar,
    pub min_mass: Scalar,
    pub max_mass: Scalar,
    /// Fraction of the circular speed given to random bodies
    pub velocity_factor: Scalar,
    pub bodies: Vec<BodyConfig>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            kind: ScenarioKind::default(),
            body_count: 3,
            seed: None,
            spawn_radius: 10.0,
            min_mass: 1.0,
            max_mass: 5.0,
            velocity_factor: 0.5,
            bodies: Vec::new(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    pub steps_per_frame: usize,
    /// Frames per second of the headless loop, 0 runs unthrottled
    pub frame_rate: f64,
    /// Stop after this many frames, run forever when unset
    pub max_frames: Option<u64>,
    /// Reset to the initial conditions once simulated time passes this value
    pub restart_after: Option<Scalar>,
    /// Log energy every this many steps, 0 disables
    pub energy_report_interval: u64,
    pub start_paused: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            steps_per_frame: 1,
            frame_rate: 60.0,
            max_frames: None,
            restart_after: Some(50.0),
            energy_report_interval: 100,
            start_paused: false,
        }
    }
}

impl RunConfig {
    /// Wait between frames, `None` when `frame_rate` cannot be turned into one
    pub fn frame_duration(&self) -> Option<Duration> {
        let frame_rate = self.frame_rate;
        if frame_rate == 0.0 {
            return Some(Duration::ZERO);
        }
        if !(frame_rate.is_finite() && frame_rate > 0.0) {
            return None;
        }
        Duration::try_from_secs_f64(1.0 / frame_rate).ok()
    }
}

impl SimulationConfig {
    /// Load configuration from a file, falling back to defaults if the file doesn't exist
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!(
                        "Failed to parse config file {}: {}. Using defaults.",
                        path.display(),
                        e
                    );
                    Self::default()
                }
            },
            Err(_) => {
                info!("Config file {} not found. Using defaults.", path.display());
                Self::default()
            }
        }
    }

    /// Layer an optional TOML file under `ORRERY__`-prefixed environment variables
    pub fn load_layered(path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::File::from(path.as_ref())
                    .format(config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Platform config location, e.g. `~/.config/orrery/config.toml` on Linux
    pub fn user_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "orrery")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load the user's configuration, falling back to defaults on any error
    pub fn load_from_user_config() -> Self {
        let Some(path) = Self::user_config_path() else {
            info!("No user config directory available. Using defaults.");
            return Self::default();
        };

        match Self::load_layered(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load user config {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("orrery-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();

        assert_eq!(config.physics.gravitational_constant, 1.0);
        assert_eq!(config.physics.time_scale, 1.0);
        assert_eq!(config.scenario.kind, ScenarioKind::ThreeBody);
        assert_eq!(config.run.steps_per_frame, 1);
        assert_eq!(config.run.restart_after, Some(50.0));
        assert_eq!(config.run.max_frames, None);
    }

    #[test]
    fn test_partial_toml_fills_in_defaults() {
        let config: SimulationConfig = toml::from_str(
            r#"
            [physics]
            gravitational_constant = 1.5

            [scenario]
            kind = "custom"

            [[scenario.bodies]]
            mass = 2.0
            position = [1.0, 0.0, 0.0]

            [[scenario.bodies]]
            mass = 1.0
            position = [-1.0, 0.0, 0.0]
            velocity = [0.0, 0.5, 0.0]
            "#,
        )
        .unwrap();

        assert_eq!(config.physics.gravitational_constant, 1.5);
        assert_eq!(config.physics.time_scale, 1.0);
        assert_eq!(config.scenario.kind, ScenarioKind::Custom);
        assert_eq!(config.scenario.bodies.len(), 2);
        assert_eq!(config.scenario.bodies[0].velocity, [0.0, 0.0, 0.0]);
        assert_eq!(config.scenario.bodies[1].velocity, [0.0, 0.5, 0.0]);
        assert_eq!(config.run, RunConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("save.toml");
        let mut config = SimulationConfig::default();
        config.physics.time_scale = 0.25;
        config.scenario.kind = ScenarioKind::Random;
        config.scenario.seed = Some(9);

        config.save(&path).unwrap();
        let loaded = SimulationConfig::load_or_default(&path);
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = SimulationConfig::load_or_default(temp_path("does-not-exist.toml"));
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn test_load_or_default_malformed_file() {
        let path = temp_path("malformed.toml");
        std::fs::write(&path, "physics = [not toml").unwrap();
        let config = SimulationConfig::load_or_default(&path);
        std::fs::remove_file(&path).ok();

        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn test_load_layered_reads_file() {
        let path = temp_path("layered.toml");
        std::fs::write(
            &path,
            "[run]\nsteps_per_frame = 4\nenergy_report_interval = 0\n",
        )
        .unwrap();
        let config = SimulationConfig::load_layered(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.run.steps_per_frame, 4);
        assert_eq!(config.run.energy_report_interval, 0);
        assert_eq!(config.physics, PhysicsConfig::default());
    }

    #[test]
    fn test_load_layered_without_file_gives_defaults() {
        let config = SimulationConfig::load_layered(temp_path("absent.toml")).unwrap();
        assert_eq!(config.scenario, ScenarioConfig::default());
    }

    #[test]
    fn test_frame_duration() {
        let mut run = RunConfig::default();
        assert_eq!(run.frame_duration(), Some(Duration::from_secs_f64(1.0 / 60.0)));

        run.frame_rate = 0.0;
        assert_eq!(run.frame_duration(), Some(Duration::ZERO));

        for frame_rate in [1e-30, -1.0, f64::NAN, f64::INFINITY] {
            run.frame_rate = frame_rate;
            assert_eq!(run.frame_duration(), None, "frame rate {frame_rate}");
        }
    }

    #[test]
    fn test_scenario_kind_names_match_serde() {
        for kind in ScenarioKind::ALL {
            let encoded = toml::to_string(&ScenarioConfig {
                kind,
                ..Default::default()
            })
            .unwrap();
            assert!(encoded.contains(&format!("kind = \"{}\"", kind.name())));
        }
    }
}
