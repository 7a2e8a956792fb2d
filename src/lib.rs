//! Orrery library
//!
//! Softened N-body gravity integrated with semi-implicit Euler, plus the
//! headless bevy plumbing that drives it frame by frame.

pub mod cli;
pub mod config;
pub mod events;
pub mod physics;
pub mod plugins;
pub mod prelude;
pub mod resources;
pub mod scenario;

pub use config::SimulationConfig;
pub use events::SimulationCommand;
pub use physics::{
    NBodySystem, PositionHistory, SystemError,
    math::{Scalar, Vector},
};
pub use plugins::{diagnostics::SimulationDiagnosticsPlugin, simulation::SimulationPlugin};
