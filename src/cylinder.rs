//! Finite capped cylinder primitive.
//!
//! Doubles as the shape of every bounding volume, so the intersection test
//! covers the lateral surface and both cap discs.

use glam::DVec3;

use crate::ray::Ray;
use crate::solid::{Color, Solid, NO_HIT};

const PARALLEL_EPSILON: f64 = 1e-12;

/// Finite cylinder defined by the centers of its two caps and a radius.
#[derive(Debug, Clone)]
pub struct Cylinder {
    /// Center of the bottom cap.
    pub base: DVec3,
    /// Center of the top cap.
    pub top: DVec3,
    /// Radius (always non-negative; clamped in the constructors).
    pub radius: f64,
    /// Flat shading color.
    pub color: Color,
}

impl Cylinder {
    /// Create a cylinder from its two cap centers.
    pub fn new(base: DVec3, top: DVec3, radius: f64, color: Color) -> Self {
        Self {
            base,
            top,
            radius: radius.max(0.0),
            color,
        }
    }

    /// Create a cylinder from a base point, an axis direction, and a height.
    pub fn from_axis(base: DVec3, direction: DVec3, height: f64, radius: f64, color: Color) -> Self {
        let top = base + direction.normalize() * height;
        Self::new(base, top, radius, color)
    }

    /// Height of the cylinder along its axis.
    pub fn height(&self) -> f64 {
        (self.top - self.base).length()
    }

    /// Unit axis from base to top, or +Y for a degenerate (flat) cylinder.
    fn axis(&self) -> DVec3 {
        let axis = self.top - self.base;
        if axis.length_squared() < PARALLEL_EPSILON {
            DVec3::Y
        } else {
            axis.normalize()
        }
    }

    /// Intersection of the ray with one cap disc, or None.
    fn intersect_cap(&self, ray: &Ray, cap_center: DVec3, axis: DVec3) -> Option<f64> {
        let denom = ray.direction.dot(axis);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }
        let t = (cap_center - ray.origin).dot(axis) / denom;
        let hit = ray.at(t);
        if (hit - cap_center).length_squared() <= self.radius * self.radius {
            Some(t)
        } else {
            None
        }
    }
}

impl Solid for Cylinder {
    fn intersection_scalar(&self, ray: &Ray) -> f64 {
        let axis = self.axis();
        let height = self.height();
        let oc = ray.origin - self.base;

        // Components of the ray perpendicular to the axis; the lateral
        // surface is a circle in that plane.
        let d_perp = ray.direction - ray.direction.dot(axis) * axis;
        let oc_perp = oc - oc.dot(axis) * axis;

        let a = d_perp.dot(d_perp);
        let b = 2.0 * oc_perp.dot(d_perp);
        let c = oc_perp.dot(oc_perp) - self.radius * self.radius;

        let mut nearest = f64::INFINITY;

        if a.abs() >= PARALLEL_EPSILON {
            let discriminant = b * b - 4.0 * a * c;
            if discriminant >= 0.0 {
                let sqrtd = discriminant.sqrt();
                for t in [(-b - sqrtd) / (2.0 * a), (-b + sqrtd) / (2.0 * a)] {
                    if t < 0.0 || t >= nearest {
                        continue;
                    }
                    // Accept lateral hits only between the two caps
                    let along = (ray.at(t) - self.base).dot(axis);
                    if (0.0..=height).contains(&along) {
                        nearest = t;
                    }
                }
            }
        }
        // A ray parallel to the axis can still enter through the caps

        for cap in [self.base, self.top] {
            if let Some(t) = self.intersect_cap(ray, cap, axis) {
                if t >= 0.0 && t < nearest {
                    nearest = t;
                }
            }
        }

        if nearest.is_finite() {
            nearest
        } else {
            NO_HIT
        }
    }

    fn bounds(&self) -> (DVec3, DVec3) {
        // Exact AABB of an oriented cylinder: around each cap center the
        // disc extends radius * sqrt(1 - axis_i^2) along axis i.
        let axis = self.axis();
        let extent = DVec3::new(
            self.radius * (1.0 - axis.x * axis.x).max(0.0).sqrt(),
            self.radius * (1.0 - axis.y * axis.y).max(0.0).sqrt(),
            self.radius * (1.0 - axis.z * axis.z).max(0.0).sqrt(),
        );
        (
            (self.base - extent).min(self.top - extent),
            (self.base + extent).max(self.top + extent),
        )
    }

    fn color(&self) -> Color {
        self.color
    }
}
