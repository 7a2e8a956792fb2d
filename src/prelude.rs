//! Orrery prelude module
//!
//! Re-exports the most commonly used types across the crate to reduce
//! import boilerplate.

// External crate re-exports
pub use bevy::prelude::*;
pub use rand::Rng;

// Internal re-exports - Config
pub use crate::config::{ScenarioKind, SimulationConfig};

// Internal re-exports - Events
pub use crate::events::SimulationCommand;

// Internal re-exports - Physics
pub use crate::physics::NBodySystem;
pub use crate::physics::math::{Scalar, Vector};

// Internal re-exports - Resources
pub use crate::resources::{EnergyMonitor, FrameLimit, PhysicsTime, SharedRng, Simulation};
