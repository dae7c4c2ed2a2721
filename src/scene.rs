//! Scene: a camera plus the top-level bounding volume.

use crate::bounding::BoundingVolume;
use crate::camera::Camera;
use crate::ray::Ray;
use crate::solid::Color;

/// Everything the renderer needs: camera and object hierarchy.
pub struct Scene {
    /// The viewpoint rays are cast from.
    pub camera: Camera,
    /// Top-level bounding volume holding every object.
    pub objects: BoundingVolume,
}

impl Scene {
    /// Create a scene from a camera and a fully built bounding volume.
    pub fn new(camera: Camera, objects: BoundingVolume) -> Self {
        Self { camera, objects }
    }

    /// Color seen along a ray: the nearest hit's flat color, or the
    /// fallback when the ray hits nothing.
    pub fn color_at(&self, ray: &Ray, fallback: Color) -> Color {
        let hit = self.objects.intersect(ray);
        match hit.solid {
            Some(solid) => solid.color(),
            None => fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sphere::Sphere;
    use glam::{DVec3, Vec3A};
    use std::rc::Rc;

    #[test]
    fn hit_returns_solid_color_and_miss_returns_fallback() {
        let mut objects = BoundingVolume::new(1.0);
        objects.insert_solid(Rc::new(Sphere::new(DVec3::new(0.0, 0.0, -5.0), 1.0, Vec3A::X)));
        let scene = Scene::new(Camera::default(), objects);

        let hit_ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));
        assert_eq!(scene.color_at(&hit_ray, Vec3A::ZERO), Vec3A::X);

        let miss_ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 1.0, 0.0));
        assert_eq!(scene.color_at(&miss_ray, Vec3A::splat(0.3)), Vec3A::splat(0.3));
    }
}
