//! Pinhole camera collaborator.
//!
//! The camera sits at a position and projects onto a viewport rectangle in
//! world units, one projection distance in front of it along -z. The canvas
//! uses these values to build one ray per pixel.

use glam::DVec3;

/// Camera described by its position and projection rectangle.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world coordinates.
    pub position: DVec3,
    /// Distance from the camera to the projection plane.
    pub distance: f64,
    /// Viewport width in world units.
    pub width: f64,
    /// Viewport height in world units.
    pub height: f64,
}

impl Camera {
    /// Create a camera from position, projection distance and viewport size.
    pub fn new(position: DVec3, distance: f64, width: f64, height: f64) -> Self {
        Self {
            position,
            distance,
            width,
            height,
        }
    }
}

impl Default for Camera {
    /// Camera at the origin with a 2x2 viewport one unit away.
    fn default() -> Self {
        Self::new(DVec3::ZERO, 1.0, 2.0, 2.0)
    }
}
