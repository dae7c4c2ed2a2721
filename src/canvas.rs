//! Canvas: the pixel grid and the render loop.
//!
//! For every pixel the canvas computes the pixel's center on the camera's
//! projection plane, casts a ray from the camera through it, and writes the
//! scene's color answer into an image buffer.

use glam::DVec3;
use image::{ImageBuffer, Rgb};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use crate::ray::Ray;
use crate::scene::Scene;
use crate::solid::Color;

/// Pixel grid plus the background color used when a ray hits nothing.
pub struct Canvas {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Color written where no object is hit.
    pub background: Color,
}

impl Canvas {
    /// Create a canvas of the given pixel dimensions.
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            width,
            height,
            background,
        }
    }

    /// Center of pixel (col, row) on the camera's projection plane, in
    /// camera-relative coordinates (plane at z = -distance).
    fn pixel_center(&self, scene: &Scene, col: u32, row: u32) -> DVec3 {
        let camera = &scene.camera;
        let dx = camera.width / self.width as f64;
        let dy = camera.height / self.height as f64;

        let cx = -camera.width / 2.0 + dx / 2.0 + col as f64 * dx;
        let cy = camera.height / 2.0 - dy / 2.0 - row as f64 * dy;

        DVec3::new(cx, cy, -camera.distance)
    }

    /// The primary ray for pixel (col, row).
    pub fn pixel_ray(&self, scene: &Scene, col: u32, row: u32) -> Ray {
        let target = scene.camera.position + self.pixel_center(scene, col, row);
        Ray::toward(scene.camera.position, target)
    }

    /// Render the scene, one ray per pixel, row by row.
    ///
    /// Returns a linear f32 RGB image buffer ready for PNG/EXR output.
    pub fn render(&self, scene: &Scene) -> ImageBuffer<Rgb<f32>, Vec<f32>> {
        let mut image: ImageBuffer<Rgb<f32>, Vec<f32>> =
            ImageBuffer::new(self.width, self.height);

        info!("Casting {} rays...", self.width as u64 * self.height as u64);
        let generation_start = std::time::Instant::now();
        let pb = ProgressBar::new(self.height as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40} {pos}/{len} ETA: {eta}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        for row in 0..self.height {
            for col in 0..self.width {
                let ray = self.pixel_ray(scene, col, row);
                let color = scene.color_at(&ray, self.background);
                image.put_pixel(col, row, Rgb([color.x, color.y, color.z]));
            }
            pb.inc(1);
        }

        pb.finish_and_clear();
        info!("Image generated in {:.2?}", generation_start.elapsed());
        image
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounding::BoundingVolume;
    use crate::camera::Camera;
    use crate::sphere::Sphere;
    use glam::Vec3A;
    use std::rc::Rc;

    fn one_sphere_scene() -> Scene {
        let mut objects = BoundingVolume::new(1.0);
        objects.insert_solid(Rc::new(Sphere::new(DVec3::new(0.0, 0.0, -5.0), 1.0, Vec3A::X)));
        Scene::new(Camera::default(), objects)
    }

    #[test]
    fn center_pixel_ray_points_down_the_view_axis() {
        let canvas = Canvas::new(3, 3, Vec3A::ZERO);
        let scene = one_sphere_scene();
        let ray = canvas.pixel_ray(&scene, 1, 1);
        assert_eq!(ray.origin, DVec3::ZERO);
        assert!((ray.direction - DVec3::new(0.0, 0.0, -1.0)).length() < 1e-12);
    }

    #[test]
    fn corner_pixels_are_offset_symmetrically() {
        let canvas = Canvas::new(2, 2, Vec3A::ZERO);
        let scene = one_sphere_scene();
        let top_left = canvas.pixel_ray(&scene, 0, 0);
        let bottom_right = canvas.pixel_ray(&scene, 1, 1);
        assert!((top_left.direction.x + bottom_right.direction.x).abs() < 1e-12);
        assert!((top_left.direction.y + bottom_right.direction.y).abs() < 1e-12);
    }

    #[test]
    fn render_paints_hit_and_background_pixels() {
        let canvas = Canvas::new(9, 9, Vec3A::splat(0.2));
        let scene = one_sphere_scene();
        let image = canvas.render(&scene);

        // Center ray goes straight through the sphere
        let center = image.get_pixel(4, 4);
        assert_eq!(center.0, [1.0, 0.0, 0.0]);

        // Corner rays clear the sphere and see the background
        let corner = image.get_pixel(0, 0);
        assert_eq!(corner.0, [0.2, 0.2, 0.2]);
    }
}
