//! Sphere primitive.
//!
//! Implements ray-sphere intersection by solving the quadratic
//! |O + tD - C|^2 = r^2 in full form.

use glam::DVec3;

use crate::ray::Ray;
use crate::solid::{Color, Solid, NO_HIT};

/// Sphere defined by center, radius, and flat color.
#[derive(Debug, Clone)]
pub struct Sphere {
    /// Center point in world coordinates.
    pub center: DVec3,

    /// Radius of the sphere (always non-negative).
    ///
    /// Negative radius values are clamped to 0.0 in the constructor.
    pub radius: f64,

    /// Flat shading color.
    pub color: Color,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// Negative radius values are clamped to 0.0.
    pub fn new(center: DVec3, radius: f64, color: Color) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            color,
        }
    }
}

impl Solid for Sphere {
    fn intersection_scalar(&self, ray: &Ray) -> f64 {
        // Quadratic a*t^2 + b*t + c = 0 for |O + tD - C|^2 = r^2
        let oc = ray.origin - self.center;
        let a = ray.direction.dot(ray.direction);
        let b = 2.0 * oc.dot(ray.direction);
        let c = oc.dot(oc) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;

        if discriminant > 0.0 {
            // Two real roots: the smaller one is the entry point. It may be
            // negative (sphere behind the origin, or origin inside); the
            // caller decides whether that counts.
            let sqrtd = discriminant.sqrt();
            let t0 = (-b - sqrtd) / (2.0 * a);
            let t1 = (-b + sqrtd) / (2.0 * a);
            t0.min(t1)
        } else if discriminant == 0.0 {
            // Grazing ray, single root
            -b / (2.0 * a)
        } else {
            NO_HIT
        }
    }

    fn bounds(&self) -> (DVec3, DVec3) {
        let extent = DVec3::splat(self.radius);
        (self.center - extent, self.center + extent)
    }

    fn color(&self) -> Color {
        self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3A;

    fn sphere_at_minus_five() -> Sphere {
        Sphere::new(DVec3::new(0.0, 0.0, -5.0), 1.0, Vec3A::ONE)
    }

    #[test]
    fn central_ray_returns_entry_distance() {
        // Entry point is at z = -4, so t = 4 with a unit direction
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));
        let t = sphere_at_minus_five().intersection_scalar(&ray);
        assert!((t - 4.0).abs() < 1e-12);
    }

    #[test]
    fn scaled_direction_rescales_the_root() {
        // Same geometry, direction doubled: a = 4 and the parametrization
        // halves t.
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -2.0));
        let t = sphere_at_minus_five().intersection_scalar(&ray);
        assert!((t - 2.0).abs() < 1e-12);
    }

    #[test]
    fn perpendicular_ray_misses() {
        let ray = Ray::new(DVec3::ZERO, DVec3::new(1.0, 0.0, 0.0));
        assert!(sphere_at_minus_five().intersection_scalar(&ray) < 0.0);
    }

    #[test]
    fn sphere_behind_origin_reports_negative_root() {
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, 1.0));
        let t = sphere_at_minus_five().intersection_scalar(&ray);
        assert!(t < 0.0);
        assert!((t + 6.0).abs() < 1e-12);
    }

    #[test]
    fn roots_are_symmetric_around_center_projection() {
        // Ray through the center: projection of the center onto the ray is
        // at t = 5, roots at 5 -+ radius.
        let sphere = sphere_at_minus_five();
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));
        let entry = sphere.intersection_scalar(&ray);
        assert!((entry - (5.0 - sphere.radius)).abs() < 1e-12);
    }

    #[test]
    fn zero_radius_sphere_resolves_to_miss() {
        let degenerate = Sphere::new(DVec3::new(0.0, 0.0, -5.0), -3.0, Vec3A::ONE);
        assert_eq!(degenerate.radius, 0.0);
        let ray = Ray::new(DVec3::ZERO, DVec3::new(1.0, 0.0, 0.0));
        assert!(degenerate.intersection_scalar(&ray) < 0.0);
    }

    #[test]
    fn bounds_are_center_plus_minus_radius() {
        let (min, max) = sphere_at_minus_five().bounds();
        assert_eq!(min, DVec3::new(-1.0, -1.0, -6.0));
        assert_eq!(max, DVec3::new(1.0, 1.0, -4.0));
    }
}
