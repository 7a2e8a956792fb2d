//! Centralized event definitions
//!
//! Parameter changes and control actions reach the simulation only through
//! these events. They are applied in [`SimulationSet::Input`], which runs
//! before any stepping in the same frame, so a change never lands in the
//! middle of a step.
//!
//! [`SimulationSet::Input`]: crate::plugins::simulation::SimulationSet::Input

use crate::physics::math::Scalar;
use bevy::prelude::*;

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum SimulationCommand {
    /// Return to the initial conditions, keeping parameters
    Restart,
    TogglePause,
    SetGravitationalConstant(Scalar),
    SetTimeScale(Scalar),
    Quit,
}
