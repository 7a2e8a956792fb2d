//! Initial conditions for the simulation

use crate::config::{BodyConfig, PhysicsConfig, ScenarioConfig, ScenarioKind};
use crate::physics::math::{Scalar, Vector, random_unit_vector};
use crate::physics::{NBodySystem, SystemError};
use crate::resources::SharedRng;
use rand::Rng;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioError {
    /// The custom scenario was selected without any bodies
    NoBodies,
    /// The random scenario needs a positive, finite, ordered mass range
    InvalidMassRange { min: Scalar, max: Scalar },
    /// Spawn radius must be positive and finite
    InvalidSpawnRadius(Scalar),
    System(SystemError),
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioError::NoBodies => write!(f, "scenario has no bodies"),
            ScenarioError::InvalidMassRange { min, max } => {
                write!(f, "invalid mass range {min}..={max}")
            }
            ScenarioError::InvalidSpawnRadius(radius) => {
                write!(f, "invalid spawn radius {radius}")
            }
            ScenarioError::System(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ScenarioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScenarioError::System(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SystemError> for ScenarioError {
    fn from(e: SystemError) -> Self {
        ScenarioError::System(e)
    }
}

/// Column-wise initial conditions, ready for [`NBodySystem::new`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InitialConditions {
    pub masses: Vec<Scalar>,
    pub positions: Vec<Vector>,
    pub velocities: Vec<Vector>,
}

impl InitialConditions {
    pub fn push(&mut self, mass: Scalar, position: Vector, velocity: Vector) {
        self.masses.push(mass);
        self.positions.push(position);
        self.velocities.push(velocity);
    }

    pub fn len(&self) -> usize {
        self.masses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }

    pub fn into_system(self) -> Result<NBodySystem, SystemError> {
        NBodySystem::new(self.len(), self.masses, self.positions, self.velocities)
    }
}

impl FromIterator<BodyConfig> for InitialConditions {
    fn from_iter<I: IntoIterator<Item = BodyConfig>>(iter: I) -> Self {
        let mut conditions = Self::default();
        for body in iter {
            conditions.push(
                body.mass,
                Vector::from_array(body.position),
                Vector::from_array(body.velocity),
            );
        }
        conditions
    }
}

/// Build the configured scenario with the configured parameters applied
pub fn build(
    scenario: &ScenarioConfig,
    physics: &PhysicsConfig,
) -> Result<NBodySystem, ScenarioError> {
    let g = physics.gravitational_constant;

    let conditions = match scenario.kind {
        ScenarioKind::ThreeBody => three_body(),
        ScenarioKind::CircularOrbit => circular_orbit(g),
        ScenarioKind::Random => {
            let mut rng = SharedRng::from_optional_seed(scenario.seed);
            random(scenario, g, &mut rng)?
        }
        ScenarioKind::Custom => {
            if scenario.bodies.is_empty() {
                return Err(ScenarioError::NoBodies);
            }
            scenario.bodies.iter().cloned().collect()
        }
    };

    Ok(conditions
        .into_system()?
        .with_gravitational_constant(g)
        .with_time_scale(physics.time_scale))
}

/// Three bodies of masses 5, 3 and 2 on the corners of a right triangle
pub fn three_body() -> InitialConditions {
    let mut conditions = InitialConditions::default();
    conditions.push(5.0, Vector::ZERO, Vector::ZERO);
    conditions.push(3.0, Vector::new(5.0, 0.0, 0.0), Vector::new(0.0, 1.0, 0.0));
    conditions.push(2.0, Vector::new(0.0, 5.0, 0.0), Vector::new(-1.0, 0.0, 0.0));
    conditions
}

/// A 0.001 mass body at distance 1 from a unit mass, moving at `sqrt(G)`
pub fn circular_orbit(gravitational_constant: Scalar) -> InitialConditions {
    let mut conditions = InitialConditions::default();
    conditions.push(1.0, Vector::ZERO, Vector::ZERO);
    conditions.push(
        0.001,
        Vector::new(1.0, 0.0, 0.0),
        Vector::new(0.0, gravitational_constant.sqrt(), 0.0),
    );
    conditions
}

/// Bodies scattered in a shell, each moving tangentially around the origin
pub fn random(
    scenario: &ScenarioConfig,
    gravitational_constant: Scalar,
    rng: &mut SharedRng,
) -> Result<InitialConditions, ScenarioError> {
    let (min_mass, max_mass) = (scenario.min_mass, scenario.max_mass);
    if !(min_mass > 0.0 && max_mass.is_finite() && min_mass <= max_mass) {
        return Err(ScenarioError::InvalidMassRange {
            min: min_mass,
            max: max_mass,
        });
    }
    let radius = scenario.spawn_radius;
    if !(radius.is_finite() && radius > 0.0) {
        return Err(ScenarioError::InvalidSpawnRadius(radius));
    }

    let masses: Vec<Scalar> = (0..scenario.body_count)
        .map(|_| rng.random_range(min_mass..=max_mass))
        .collect();
    let total_mass: Scalar = masses.iter().sum();
    if !total_mass.is_finite() {
        return Err(ScenarioError::InvalidMassRange {
            min: min_mass,
            max: max_mass,
        });
    }

    let mut conditions = InitialConditions::default();
    for mass in masses {
        let distance = radius * rng.random_range(0.2..=1.0);
        let position = random_unit_vector(rng) * distance;

        let tangent = position
            .cross(Vector::Z)
            .try_normalize()
            .unwrap_or(Vector::X);
        let speed = scenario.velocity_factor
            * (gravitational_constant.abs() * total_mass / distance).sqrt();

        conditions.push(mass, position, tangent * speed);
    }

    Ok(conditions)
}
