//! Semi-implicit Euler integration method (symplectic Euler)

use crate::physics::math::{Scalar, Vector};

/// Semi-implicit Euler (also known as symplectic Euler) for a single body
///
/// First-order and symplectic: the velocity is advanced with the
/// acceleration evaluated at the old position, and the position is then
/// advanced with the new velocity. Energy error stays bounded for orbits
/// instead of growing like it does with explicit Euler.
///
/// ```text
/// v(t+dt) = v(t) + a(x(t)) * dt
/// x(t+dt) = x(t) + v(t+dt) * dt
/// ```
#[inline]
pub fn integrate_single(
    position: &mut Vector,
    velocity: &mut Vector,
    acceleration: Vector,
    dt: Scalar,
) {
    *velocity += acceleration * dt;
    *position += *velocity * dt;
}
