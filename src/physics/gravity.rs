//! Softened Newtonian gravity
//!
//! Direct O(n²) summation over every pair of bodies. The softening term is
//! added to the separation before it is cubed, so coincident bodies produce
//! a bounded contribution instead of a division by zero. Self-interaction is
//! excluded by index, never by distance.

use crate::physics::math::{Scalar, Vector, softened_distance};

/// Acceleration that `source` induces on a body at `target`
#[inline]
pub fn pairwise_acceleration(
    target: Vector,
    source: Vector,
    source_mass: Scalar,
    gravitational_constant: Scalar,
) -> Vector {
    let displacement = source - target;
    let distance = softened_distance(source, target);
    displacement * (gravitational_constant * source_mass / (distance * distance * distance))
}

/// Net acceleration on every body, index-aligned with `positions`
pub fn compute_accelerations(
    positions: &[Vector],
    masses: &[Scalar],
    gravitational_constant: Scalar,
) -> Vec<Vector> {
    positions
        .iter()
        .enumerate()
        .map(|(i, &target)| {
            positions
                .iter()
                .zip(masses)
                .enumerate()
                .filter(|&(j, _)| j != i)
                .fold(Vector::ZERO, |acceleration, (_, (&source, &mass))| {
                    acceleration
                        + pairwise_acceleration(target, source, mass, gravitational_constant)
                })
        })
        .collect()
}

/// `0.5 * Σ m |v|²`
pub fn kinetic_energy(masses: &[Scalar], velocities: &[Vector]) -> Scalar {
    0.5 * masses
        .iter()
        .zip(velocities)
        .map(|(&mass, velocity)| mass * velocity.length_squared())
        .sum::<Scalar>()
}

/// Softened potential, each unordered pair counted once
pub fn potential_energy(
    positions: &[Vector],
    masses: &[Scalar],
    gravitational_constant: Scalar,
) -> Scalar {
    let mut potential = 0.0;
    for (i, (&p_i, &m_i)) in positions.iter().zip(masses).enumerate() {
        for (&p_j, &m_j) in positions.iter().zip(masses).skip(i + 1) {
            potential -= gravitational_constant * m_i * m_j / softened_distance(p_i, p_j);
        }
    }
    potential
}
