//! Simulation diagnostics module.
//!
//! Publishes simulation metrics through Bevy's diagnostic system so they can
//! be consumed by `LogDiagnosticsPlugin` or any other reader of the
//! [`DiagnosticsStore`](bevy::diagnostic::DiagnosticsStore):
//!
//! - **Simulated time**: `simulation/time`
//! - **Total energy**: `simulation/energy`
//! - **Relative energy drift**: `simulation/energy_drift`, measured against the
//!   energy at the last restart
//!
//! # Usage
//!
//! ```rust,ignore
//! app.add_plugins(SimulationDiagnosticsPlugin::default());
//! ```

use crate::plugins::simulation::SimulationSet;
use crate::prelude::*;
use bevy::diagnostic::{
    DEFAULT_MAX_HISTORY_LENGTH, Diagnostic, DiagnosticPath, Diagnostics, RegisterDiagnostic,
};

pub struct SimulationDiagnosticsPlugin {
    max_history_length: usize,
    smoothing_factor: f64,
}

impl Default for SimulationDiagnosticsPlugin {
    fn default() -> Self {
        Self {
            max_history_length: DEFAULT_MAX_HISTORY_LENGTH,
            smoothing_factor: 0.0,
        }
    }
}

impl SimulationDiagnosticsPlugin {
    pub const SIM_TIME: DiagnosticPath = DiagnosticPath::const_new("simulation/time");
    pub const ENERGY: DiagnosticPath = DiagnosticPath::const_new("simulation/energy");
    pub const ENERGY_DRIFT: DiagnosticPath = DiagnosticPath::const_new("simulation/energy_drift");

    const DIAGNOSTIC_PATHS: &'static [DiagnosticPath] =
        &[Self::SIM_TIME, Self::ENERGY, Self::ENERGY_DRIFT];

    pub fn with_max_history_length(mut self, max_history_length: usize) -> Self {
        self.max_history_length = max_history_length;
        self
    }

    pub fn with_smoothing_factor(mut self, smoothing_factor: f64) -> Self {
        self.smoothing_factor = smoothing_factor;
        self
    }

    fn register_diagnostics(&self, app: &mut App) {
        for path in Self::DIAGNOSTIC_PATHS {
            app.register_diagnostic(
                Diagnostic::new(path.clone())
                    .with_max_history_length(self.max_history_length)
                    .with_smoothing_factor(self.smoothing_factor),
            );
        }
    }

    fn measure(
        mut diagnostics: Diagnostics,
        simulation: Res<Simulation>,
        energy_monitor: Res<EnergyMonitor>,
    ) {
        diagnostics.add_measurement(&Self::SIM_TIME, || simulation.sim_time());
        diagnostics.add_measurement(&Self::ENERGY, || energy_monitor.latest_energy);
        diagnostics.add_measurement(&Self::ENERGY_DRIFT, || {
            energy_monitor.relative_drift(energy_monitor.latest_energy)
        });
    }
}

impl Plugin for SimulationDiagnosticsPlugin {
    fn build(&self, app: &mut App) {
        self.register_diagnostics(app);

        app.add_systems(
            Update,
            Self::measure
                .after(SimulationSet::Diagnostics)
                .run_if(resource_exists::<Simulation>),
        );
    }
}
