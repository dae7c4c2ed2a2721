//! Ray representation for ray casting.
//!
//! A ray is defined as r(t) = origin + t * direction, representing a semi-infinite
//! line in 3D space used for intersection testing.

use glam::DVec3;

/// Ray in 3D space defined by origin and direction.
///
/// Mathematical representation: r(t) = origin + t * direction
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Starting point of the ray in world coordinates.
    ///
    /// Typically the camera position for primary rays.
    pub origin: DVec3,

    /// Direction vector of the ray.
    ///
    /// Stored exactly as given, not normalized. Intersection scalars are
    /// parameterized by this vector, so a scaled direction rescales every
    /// returned t; callers must stay consistent about which form they use.
    pub direction: DVec3,
}

impl Ray {
    /// Create a new ray with origin and direction.
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self { origin, direction }
    }

    /// Create a ray from an origin through a target point.
    ///
    /// The direction is the normalized vector from origin to target, so
    /// intersection scalars are world-space distances.
    pub fn toward(origin: DVec3, target: DVec3) -> Self {
        Self {
            origin,
            direction: (target - origin).normalize(),
        }
    }

    /// Compute a point at parameter t along the ray.
    ///
    /// Returns r(t) = origin + t * direction.
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + t * self.direction
    }
}
