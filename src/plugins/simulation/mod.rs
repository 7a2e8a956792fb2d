//! Simulation plugin - Self-contained plugin pattern
//!
//! Owns the [`NBodySystem`] as a resource and drives it from the `Update`
//! schedule. Commands are applied first, then the system is stepped, then
//! energy bookkeeping runs, all chained within one frame.

use crate::prelude::*;
use crate::scenario::{self, ScenarioError};

mod actions;
mod physics;

use actions::handle_simulation_commands;
use physics::{advance_simulation, enforce_frame_limit, restart_after_time_limit, track_energy};

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Input,
    Integrate,
    Diagnostics,
}

pub struct SimulationPlugin {
    system: NBodySystem,
    config: SimulationConfig,
}

impl SimulationPlugin {
    pub fn new(system: NBodySystem, config: SimulationConfig) -> Self {
        Self { system, config }
    }

    /// Build the configured scenario and wrap it in a plugin
    pub fn from_config(config: SimulationConfig) -> Result<Self, ScenarioError> {
        let system = scenario::build(&config.scenario, &config.physics)?;
        Ok(Self::new(system, config))
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = &self.config;

        match toml::to_string_pretty(config) {
            Ok(toml_string) => {
                debug!("=== Current Configuration (TOML) ===\n{}", toml_string);
                debug!("=== End Configuration ===");
            }
            Err(e) => {
                error!("Failed to serialize configuration to TOML: {}", e);
            }
        }

        info!(
            "Simulating {} bodies with G = {}, time scale = {}",
            self.system.body_count(),
            self.system.gravitational_constant(),
            self.system.time_scale()
        );

        app.insert_resource(config.clone());
        app.insert_resource(Simulation(self.system.clone()));
        app.insert_resource(PhysicsTime {
            paused: config.run.start_paused,
            steps_per_frame: config.run.steps_per_frame.max(1),
            restart_after: config.run.restart_after,
        });
        app.insert_resource(EnergyMonitor::new(
            self.system.total_energy(),
            config.run.energy_report_interval,
        ));
        if let Some(max_frames) = config.run.max_frames {
            app.insert_resource(FrameLimit::new(max_frames));
        }

        app.add_event::<SimulationCommand>();

        app.configure_sets(
            Update,
            (
                SimulationSet::Input,
                SimulationSet::Integrate,
                SimulationSet::Diagnostics,
            )
                .chain(),
        );

        app.add_systems(
            Update,
            (
                handle_simulation_commands.in_set(SimulationSet::Input),
                (advance_simulation, restart_after_time_limit)
                    .chain()
                    .in_set(SimulationSet::Integrate),
                (
                    track_energy,
                    enforce_frame_limit.run_if(resource_exists::<FrameLimit>),
                )
                    .in_set(SimulationSet::Diagnostics),
            ),
        );
    }
}
