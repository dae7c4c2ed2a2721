//! Triangle primitive.
//!
//! Implements the Möller–Trumbore ray-triangle intersection test.

use glam::DVec3;

use crate::ray::Ray;
use crate::solid::{Color, Solid, NO_HIT};

const DET_EPSILON: f64 = 1e-12;

/// Triangle defined by three vertices and a flat color.
#[derive(Debug, Clone)]
pub struct Triangle {
    /// First vertex.
    pub a: DVec3,
    /// Second vertex.
    pub b: DVec3,
    /// Third vertex.
    pub c: DVec3,
    /// Flat shading color.
    pub color: Color,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(a: DVec3, b: DVec3, c: DVec3, color: Color) -> Self {
        Self { a, b, c, color }
    }

    /// Geometric (non-interpolated) unit normal.
    pub fn normal(&self) -> DVec3 {
        (self.b - self.a).cross(self.c - self.a).normalize()
    }
}

impl Solid for Triangle {
    fn intersection_scalar(&self, ray: &Ray) -> f64 {
        // Möller–Trumbore: solve O + tD = a + u*e1 + v*e2
        let e1 = self.b - self.a;
        let e2 = self.c - self.a;

        let pvec = ray.direction.cross(e2);
        let det = e1.dot(pvec);
        // Ray parallel to the plane, or degenerate triangle
        if det.abs() < DET_EPSILON {
            return NO_HIT;
        }
        let inv_det = 1.0 / det;

        let tvec = ray.origin - self.a;
        let u = tvec.dot(pvec) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return NO_HIT;
        }

        let qvec = tvec.cross(e1);
        let v = ray.direction.dot(qvec) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return NO_HIT;
        }

        // May be negative when the plane lies behind the origin; the
        // caller filters.
        e2.dot(qvec) * inv_det
    }

    fn bounds(&self) -> (DVec3, DVec3) {
        (
            self.a.min(self.b).min(self.c),
            self.a.max(self.b).max(self.c),
        )
    }

    fn color(&self) -> Color {
        self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3A;

    fn xy_triangle() -> Triangle {
        // Right triangle in the z = -2 plane
        Triangle::new(
            DVec3::new(-1.0, -1.0, -2.0),
            DVec3::new(1.0, -1.0, -2.0),
            DVec3::new(-1.0, 1.0, -2.0),
            Vec3A::ONE,
        )
    }

    #[test]
    fn ray_through_interior_hits() {
        let ray = Ray::new(DVec3::new(-0.5, -0.5, 0.0), DVec3::new(0.0, 0.0, -1.0));
        let t = xy_triangle().intersection_scalar(&ray);
        assert!((t - 2.0).abs() < 1e-12);
    }

    #[test]
    fn ray_outside_barycentric_range_misses() {
        let ray = Ray::new(DVec3::new(0.9, 0.9, 0.0), DVec3::new(0.0, 0.0, -1.0));
        assert!(xy_triangle().intersection_scalar(&ray) < 0.0);
    }

    #[test]
    fn parallel_ray_misses() {
        let ray = Ray::new(DVec3::new(0.0, 0.0, 0.0), DVec3::X);
        assert!(xy_triangle().intersection_scalar(&ray) < 0.0);
    }

    #[test]
    fn degenerate_triangle_misses() {
        let line = Triangle::new(
            DVec3::ZERO,
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(2.0, 0.0, 0.0),
            Vec3A::ONE,
        );
        let ray = Ray::new(DVec3::new(0.5, 5.0, 0.0), DVec3::new(0.0, -1.0, 0.0));
        assert!(line.intersection_scalar(&ray) < 0.0);
    }

    #[test]
    fn bounds_cover_all_vertices() {
        let (min, max) = xy_triangle().bounds();
        assert_eq!(min, DVec3::new(-1.0, -1.0, -2.0));
        assert_eq!(max, DVec3::new(1.0, 1.0, -2.0));
    }

    #[test]
    fn normal_is_perpendicular_to_the_plane() {
        let n = xy_triangle().normal();
        assert!((n.z.abs() - 1.0).abs() < 1e-12);
    }
}
