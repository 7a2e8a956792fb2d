//! The N-body system: masses, state, clock and energy bookkeeping
//!
//! Bodies are stored column-wise (parallel mass/velocity/position arrays)
//! and identified by index. Positions live in a bounded [`PositionHistory`]
//! whose newest snapshot is the current state.

use crate::physics::gravity::{compute_accelerations, kinetic_energy, potential_energy};
use crate::physics::history::PositionHistory;
use crate::physics::integrator::integrate_single;
use crate::physics::math::{BASE_TIME_STEP, Scalar, Vector};
use std::fmt;

/// Errors raised while constructing an [`NBodySystem`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemError {
    /// A per-body sequence does not have one entry per body
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for SystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemError::LengthMismatch {
                field,
                expected,
                actual,
            } => write!(
                f,
                "expected {expected} {field} (one per body), got {actual}"
            ),
        }
    }
}

impl std::error::Error for SystemError {}

#[derive(Debug, Clone)]
pub struct NBodySystem {
    masses: Vec<Scalar>,
    velocities: Vec<Vector>,
    history: PositionHistory,
    initial_positions: Vec<Vector>,
    initial_velocities: Vec<Vector>,
    sim_time: Scalar,
    step_count: u64,
    gravitational_constant: Scalar,
    time_scale: Scalar,
}

impl NBodySystem {
    pub const DEFAULT_GRAVITATIONAL_CONSTANT: Scalar = 1.0;
    pub const DEFAULT_TIME_SCALE: Scalar = 1.0;

    /// Build a system from explicit initial conditions
    ///
    /// Only the shape of the input is checked. Masses are not required to be
    /// positive and coincident bodies are accepted; the softened force law
    /// keeps such configurations finite.
    pub fn new(
        body_count: usize,
        masses: Vec<Scalar>,
        positions: Vec<Vector>,
        velocities: Vec<Vector>,
    ) -> Result<Self, SystemError> {
        check_length("masses", body_count, masses.len())?;
        check_length("positions", body_count, positions.len())?;
        check_length("velocities", body_count, velocities.len())?;

        Ok(Self {
            masses,
            history: PositionHistory::new(positions.clone()),
            initial_positions: positions,
            initial_velocities: velocities.clone(),
            velocities,
            sim_time: 0.0,
            step_count: 0,
            gravitational_constant: Self::DEFAULT_GRAVITATIONAL_CONSTANT,
            time_scale: Self::DEFAULT_TIME_SCALE,
        })
    }

    pub fn with_gravitational_constant(mut self, gravitational_constant: Scalar) -> Self {
        self.set_gravitational_constant(gravitational_constant);
        self
    }

    pub fn with_time_scale(mut self, time_scale: Scalar) -> Self {
        self.set_time_scale(time_scale);
        self
    }

    /// Advance one tick with semi-implicit Euler
    pub fn step(&mut self) {
        let dt = self.dt();
        self.sim_time += dt;
        self.step_count += 1;

        let accelerations = self.compute_acceleration(self.history.latest());
        let mut positions = self.history.latest().to_vec();

        for ((position, velocity), acceleration) in positions
            .iter_mut()
            .zip(self.velocities.iter_mut())
            .zip(accelerations)
        {
            integrate_single(position, velocity, acceleration, dt);
        }

        self.history.push(positions);
    }

    /// Restore the constructed state; masses and parameters are kept
    pub fn reset(&mut self) {
        self.velocities.clone_from(&self.initial_velocities);
        self.history.reset(self.initial_positions.clone());
        self.sim_time = 0.0;
        self.step_count = 0;
    }

    /// Net acceleration on each body for the given position snapshot
    pub fn compute_acceleration(&self, positions: &[Vector]) -> Vec<Vector> {
        compute_accelerations(positions, &self.masses, self.gravitational_constant)
    }

    pub fn kinetic_energy(&self) -> Scalar {
        kinetic_energy(&self.masses, &self.velocities)
    }

    pub fn potential_energy(&self) -> Scalar {
        potential_energy(self.positions(), &self.masses, self.gravitational_constant)
    }

    /// Kinetic plus softened potential energy
    ///
    /// Diagnostic only: the softening and the first-order integrator both
    /// keep this from being conserved exactly.
    pub fn total_energy(&self) -> Scalar {
        self.kinetic_energy() + self.potential_energy()
    }

    pub fn total_momentum(&self) -> Vector {
        self.masses
            .iter()
            .zip(&self.velocities)
            .fold(Vector::ZERO, |momentum, (&mass, &velocity)| {
                momentum + velocity * mass
            })
    }

    /// Mass-weighted mean position, `None` when the total mass vanishes
    pub fn barycenter(&self) -> Option<Vector> {
        let (weighted_positions, total_mass) = self
            .positions()
            .iter()
            .zip(&self.masses)
            .fold((Vector::ZERO, 0.0), |(pos_acc, mass_acc), (&pos, &mass)| {
                (pos_acc + pos * mass, mass_acc + mass)
            });

        if total_mass.abs() <= Scalar::EPSILON {
            return None;
        }

        Some(weighted_positions / total_mass).filter(|barycenter| barycenter.is_finite())
    }

    #[inline]
    pub fn dt(&self) -> Scalar {
        BASE_TIME_STEP * self.time_scale
    }

    #[inline]
    pub fn body_count(&self) -> usize {
        self.masses.len()
    }

    #[inline]
    pub fn masses(&self) -> &[Scalar] {
        &self.masses
    }

    /// Current positions (newest history snapshot)
    #[inline]
    pub fn positions(&self) -> &[Vector] {
        self.history.latest()
    }

    #[inline]
    pub fn velocities(&self) -> &[Vector] {
        &self.velocities
    }

    #[inline]
    pub fn history(&self) -> &PositionHistory {
        &self.history
    }

    pub fn trail(&self, body: usize) -> impl Iterator<Item = Vector> + '_ {
        self.history.trail(body)
    }

    #[inline]
    pub fn sim_time(&self) -> Scalar {
        self.sim_time
    }

    /// Steps taken since construction or the last reset
    #[inline]
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    #[inline]
    pub fn gravitational_constant(&self) -> Scalar {
        self.gravitational_constant
    }

    pub fn set_gravitational_constant(&mut self, gravitational_constant: Scalar) {
        self.gravitational_constant = gravitational_constant;
    }

    #[inline]
    pub fn time_scale(&self) -> Scalar {
        self.time_scale
    }

    /// Negative and NaN values clamp to zero so simulated time never runs backwards
    pub fn set_time_scale(&mut self, time_scale: Scalar) {
        self.time_scale = time_scale.max(0.0);
    }
}

fn check_length(field: &'static str, expected: usize, actual: usize) -> Result<(), SystemError> {
    if expected == actual {
        Ok(())
    } else {
        Err(SystemError::LengthMismatch {
            field,
            expected,
            actual,
        })
    }
}
