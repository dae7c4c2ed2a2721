//! Ray-object intersection system.
//!
//! Defines the Solid trait implemented by every geometric primitive and the
//! HitInfo record produced by bounding-volume queries.

use std::rc::Rc;

use glam::{DVec3, Vec3A};

use crate::bounding::BoundingVolume;
use crate::mesh::Mesh;
use crate::ray::Ray;

/// RGB color type, matching the image buffer's f32 channels.
pub type Color = Vec3A;

/// Sentinel intersection scalar meaning "no intersection".
///
/// Every primitive returns this (or another negative value) for a miss;
/// callers only ever accept scalars >= 0.0 as hits.
pub const NO_HIT: f64 = -1.0;

/// Trait for objects that can be intersected by rays.
///
/// Core abstraction for geometric primitives: a scalar intersection test
/// and an axis-aligned bounding box used to grow bounding volumes.
pub trait Solid {
    /// Scalar distance t along the ray to the intersection.
    ///
    /// Returns a negative sentinel if the ray never meets the surface. The
    /// returned scalar may itself be negative when the surface lies behind
    /// the ray origin; callers filter with `t >= 0.0`.
    fn intersection_scalar(&self, ray: &Ray) -> f64;

    /// Axis-aligned (min, max) corners enclosing the solid.
    fn bounds(&self) -> (DVec3, DVec3);

    /// Flat shading color of the solid.
    fn color(&self) -> Color;
}

/// Result of a nearest-hit query against a bounding volume.
///
/// Produced fresh per query and never persisted.
#[derive(Clone)]
pub struct HitInfo {
    /// Whether anything in the volume was hit.
    pub intersected: bool,
    /// The nearest solid, when hit. For a mesh hit, this is the winning
    /// face reconstructed as a standalone triangle.
    pub solid: Option<Rc<dyn Solid>>,
    /// The mesh owning the winning face, when the nearest hit was a mesh.
    pub mesh: Option<Rc<Mesh>>,
    /// Snapshot of the queried volume, filled in only on a hit.
    pub bounding_volume: Option<Box<BoundingVolume>>,
    /// Distance along the ray to the nearest hit.
    pub distance: f64,
}

impl HitInfo {
    /// A query result with nothing hit.
    pub fn miss() -> Self {
        Self {
            intersected: false,
            solid: None,
            mesh: None,
            bounding_volume: None,
            distance: NO_HIT,
        }
    }
}

impl Default for HitInfo {
    fn default() -> Self {
        Self::miss()
    }
}
