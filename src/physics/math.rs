use crate::resources::SharedRng;
use rand::Rng;

/// Scalar type for physics calculations (f64 for precision)
pub type Scalar = f64;

/// 3D vector type for positions, velocities, and accelerations
pub type Vector = bevy::math::DVec3;

/// Added to every pairwise distance before it is inverted
pub const SOFTENING: Scalar = 0.1;

/// Step size before the time scale multiplier is applied
pub const BASE_TIME_STEP: Scalar = 0.01;

/// Number of position snapshots retained for trails
pub const HISTORY_CAPACITY: usize = 50;

/// Distance between two points with the softening term added
#[inline]
pub fn softened_distance(a: Vector, b: Vector) -> Scalar {
    a.distance(b) + SOFTENING
}

/// Uniformly distributed direction on the unit sphere
pub fn random_unit_vector(rng: &mut SharedRng) -> Vector {
    let theta = rng.random_range(0.0..=2.0 * std::f64::consts::PI);
    let phi = rng.random_range(-1.0_f64..=1.0).acos();

    Vector::new(
        phi.sin() * theta.cos(),
        phi.sin() * theta.sin(),
        phi.cos(),
    )
}
