//! Cylindrical bounding volumes.
//!
//! A bounding volume owns a set of solids and meshes and keeps a vertical
//! cylinder around every point ever folded into it, inflated by a padding
//! factor. Rays that miss the cylinder are rejected without touching the
//! contents, which is the whole point of the structure.
//!
//! Volumes nest: a volume holds shared handles to sub-groups, so the same
//! group can appear under several parents. In this version sub-groups are
//! structural only — they neither inflate the parent's extent nor
//! participate in hit testing.

use std::rc::Rc;

use glam::DVec3;

use crate::cylinder::Cylinder;
use crate::mesh::Mesh;
use crate::ray::Ray;
use crate::solid::{Color, HitInfo, Solid, NO_HIT};

/// Axis of every bounding cylinder. Fixed vertical.
const BOUND_AXIS: DVec3 = DVec3::Y;

/// A padded cylindrical bound over a dynamic set of solids and meshes.
///
/// Built incrementally during scene construction and read-only afterwards:
/// every query takes `&self`.
#[derive(Clone)]
pub struct BoundingVolume {
    volume: Cylinder,
    min_point: DVec3,
    max_point: DVec3,
    padding: f64,
    solids: Vec<Rc<dyn Solid>>,
    meshes: Vec<Rc<Mesh>>,
    sub_groups: Vec<Rc<BoundingVolume>>,
}

impl BoundingVolume {
    /// Create an empty volume with the given padding factor.
    ///
    /// Padding below 1.0 is clamped to 1.0: the fitted cylinder is only
    /// ever inflated, never shrunk. The min/max corners start at
    /// +/-infinity so the first inserted point overrides them outright.
    pub fn new(padding: f64) -> Self {
        Self {
            volume: Cylinder::new(DVec3::ZERO, DVec3::ZERO, 0.0, Color::ZERO),
            min_point: DVec3::splat(f64::INFINITY),
            max_point: DVec3::splat(f64::NEG_INFINITY),
            padding: padding.max(1.0),
            solids: Vec::new(),
            meshes: Vec::new(),
            sub_groups: Vec::new(),
        }
    }

    /// Minimum corner of the extent folded in so far.
    pub fn min_point(&self) -> DVec3 {
        self.min_point
    }

    /// Maximum corner of the extent folded in so far.
    pub fn max_point(&self) -> DVec3 {
        self.max_point
    }

    /// Current padding factor.
    pub fn padding(&self) -> f64 {
        self.padding
    }

    /// Change the padding factor, clamped to >= 1.0.
    ///
    /// Takes effect the next time an inserted point extends the extent.
    pub fn set_padding(&mut self, padding: f64) {
        self.padding = padding.max(1.0);
    }

    /// The derived cylindrical bound.
    pub fn volume(&self) -> &Cylinder {
        &self.volume
    }

    /// Number of directly owned solids.
    pub fn solid_count(&self) -> usize {
        self.solids.len()
    }

    /// Number of directly owned meshes.
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Number of nested sub-groups.
    pub fn sub_group_count(&self) -> usize {
        self.sub_groups.len()
    }

    /// Fold a point into the extent, recomputing the cylinder if it grew.
    ///
    /// Inserting a point already inside the current extent is a no-op; the
    /// cylinder is only rebuilt when some min/max component actually moved.
    pub fn insert_point(&mut self, point: DVec3) {
        let mut extent_changed = false;

        for axis in 0..3 {
            if point[axis] < self.min_point[axis] {
                self.min_point[axis] = point[axis];
                extent_changed = true;
            }
            if point[axis] > self.max_point[axis] {
                self.max_point[axis] = point[axis];
                extent_changed = true;
            }
        }

        if extent_changed {
            self.refit_volume();
        }
    }

    /// Fold a solid's bounding corners into the extent and take ownership
    /// of the handle.
    pub fn insert_solid(&mut self, solid: Rc<dyn Solid>) {
        let (min, max) = solid.bounds();
        self.insert_point(min);
        self.insert_point(max);
        self.solids.push(solid);
    }

    /// Fold a mesh's bounding corners into the extent and take ownership
    /// of the handle.
    pub fn insert_mesh(&mut self, mesh: Rc<Mesh>) {
        let (min, max) = mesh.bounds();
        self.insert_point(min);
        self.insert_point(max);
        self.meshes.push(mesh);
    }

    /// Attach a nested sub-group.
    ///
    /// Deliberately does NOT touch this volume's own extent: sub-groups
    /// compose structurally, and a caller who wants the parent bound to
    /// cover the child must fold the child's corners in explicitly.
    pub fn insert_group(&mut self, group: Rc<BoundingVolume>) {
        self.sub_groups.push(group);
    }

    /// Rebuild the padded cylinder around the current min/max extent.
    ///
    /// Radius is half the larger of the two horizontal extents, height is
    /// the vertical extent, both scaled by the padding factor; the base is
    /// lowered so the padded cylinder stays vertically centered on the
    /// unpadded extent.
    fn refit_volume(&mut self) {
        let height = self.max_point.y - self.min_point.y;
        let padded_height = height * self.padding;

        let radius = (self.max_point.x - self.min_point.x)
            .max(self.max_point.z - self.min_point.z)
            / 2.0
            * self.padding;

        let base = DVec3::new(
            (self.max_point.x + self.min_point.x) / 2.0,
            self.min_point.y - (padded_height - height) / 2.0,
            (self.max_point.z + self.min_point.z) / 2.0,
        );

        self.volume = Cylinder::new(base, base + BOUND_AXIS * padded_height, radius, Color::ZERO);
    }

    /// Nearest-hit query.
    ///
    /// Rays that miss the cylindrical bound are rejected immediately.
    /// Otherwise every owned solid is scanned, then every owned mesh,
    /// keeping the strictly smallest non-negative distance; at equal
    /// distance the earlier candidate in iteration order wins. Sub-groups
    /// are not traversed. On a hit the result carries a by-value snapshot
    /// of this volume.
    pub fn intersect(&self, ray: &Ray) -> HitInfo {
        let mut result = HitInfo::miss();
        let mut min_distance = f64::INFINITY;

        if self.volume.intersection_scalar(ray) <= NO_HIT {
            return result;
        }

        for solid in &self.solids {
            let distance = solid.intersection_scalar(ray);
            if distance >= 0.0 && distance < min_distance {
                min_distance = distance;
                result.intersected = true;
                result.solid = Some(Rc::clone(solid));
                result.distance = distance;
            }
        }

        for mesh in &self.meshes {
            let distance = mesh.intersection_scalar(ray);
            if distance >= 0.0 && distance < min_distance {
                min_distance = distance;
                result.intersected = true;
                // Report the winning face as a standalone triangle
                result.solid = mesh
                    .last_face_hit()
                    .map(|face| Rc::new(face) as Rc<dyn Solid>);
                result.mesh = Some(Rc::clone(mesh));
                result.distance = distance;
            }
        }

        if result.intersected {
            result.bounding_volume = Some(Box::new(self.clone()));
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sphere::Sphere;
    use glam::Vec3A;

    #[test]
    fn padding_is_clamped_to_one() {
        assert_eq!(BoundingVolume::new(0.5).padding(), 1.0);
        assert_eq!(BoundingVolume::new(-3.0).padding(), 1.0);
        assert_eq!(BoundingVolume::new(1.5).padding(), 1.5);

        let mut volume = BoundingVolume::new(1.0);
        volume.set_padding(0.0);
        assert_eq!(volume.padding(), 1.0);
    }

    #[test]
    fn two_points_fit_the_documented_cylinder() {
        let mut volume = BoundingVolume::new(1.0);
        volume.insert_point(DVec3::new(1.0, 2.0, 3.0));
        volume.insert_point(DVec3::new(-1.0, 0.0, -3.0));

        assert_eq!(volume.min_point(), DVec3::new(-1.0, 0.0, -3.0));
        assert_eq!(volume.max_point(), DVec3::new(1.0, 2.0, 3.0));

        // Horizontal extents are 2 and 6, so radius = 6/2 = 3; height = 2
        let cylinder = volume.volume();
        assert!((cylinder.radius - 3.0).abs() < 1e-12);
        assert!((cylinder.height() - 2.0).abs() < 1e-12);
        assert_eq!(cylinder.base, DVec3::new(0.0, 0.0, 0.0));
        assert_eq!(cylinder.top, DVec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn inserting_an_interior_point_is_a_no_op() {
        let mut volume = BoundingVolume::new(1.0);
        volume.insert_point(DVec3::new(1.0, 2.0, 3.0));
        volume.insert_point(DVec3::new(-1.0, 0.0, -3.0));

        let before = volume.volume().clone();
        volume.insert_point(DVec3::new(0.5, 1.0, 0.0));
        let after = volume.volume();

        assert_eq!(before.base, after.base);
        assert_eq!(before.top, after.top);
        assert_eq!(before.radius, after.radius);
    }

    #[test]
    fn padded_cylinder_stays_vertically_centered() {
        let mut volume = BoundingVolume::new(2.0);
        volume.insert_point(DVec3::new(-1.0, 0.0, -1.0));
        volume.insert_point(DVec3::new(1.0, 2.0, 1.0));

        // Unpadded height 2 grows to 4, centered on [0, 2]
        let cylinder = volume.volume();
        assert!((cylinder.base.y + 1.0).abs() < 1e-12);
        assert!((cylinder.top.y - 3.0).abs() < 1e-12);
        assert!((cylinder.radius - 2.0).abs() < 1e-12);
    }

    #[test]
    fn corners_accumulate_across_inserted_solids() {
        let mut volume = BoundingVolume::new(1.0);
        volume.insert_solid(Rc::new(Sphere::new(DVec3::new(2.0, 0.0, 0.0), 1.0, Vec3A::ONE)));
        volume.insert_solid(Rc::new(Sphere::new(DVec3::new(-3.0, 1.0, 4.0), 0.5, Vec3A::ONE)));

        assert_eq!(volume.min_point(), DVec3::new(-3.5, -1.0, -1.0));
        assert_eq!(volume.max_point(), DVec3::new(3.0, 1.5, 4.5));
        assert_eq!(volume.solid_count(), 2);
    }

    #[test]
    fn nearest_solid_wins() {
        let mut volume = BoundingVolume::new(1.0);
        let near = Rc::new(Sphere::new(DVec3::new(0.0, 0.0, -5.0), 1.0, Vec3A::X));
        let far = Rc::new(Sphere::new(DVec3::new(0.0, 0.0, -10.0), 1.0, Vec3A::Y));
        volume.insert_solid(far);
        volume.insert_solid(near);

        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));
        let hit = volume.intersect(&ray);
        assert!(hit.intersected);
        assert!((hit.distance - 4.0).abs() < 1e-12);
        assert_eq!(hit.solid.unwrap().color(), Vec3A::X);
        assert!(hit.bounding_volume.is_some());
    }

    #[test]
    fn first_inserted_wins_exact_ties() {
        let mut volume = BoundingVolume::new(1.0);
        let first = Rc::new(Sphere::new(DVec3::new(0.0, 0.0, -5.0), 1.0, Vec3A::X));
        let second = Rc::new(Sphere::new(DVec3::new(0.0, 0.0, -5.0), 1.0, Vec3A::Y));
        volume.insert_solid(first);
        volume.insert_solid(second);

        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));
        let hit = volume.intersect(&ray);
        assert_eq!(hit.solid.unwrap().color(), Vec3A::X);
    }

    #[test]
    fn solids_beat_meshes_at_equal_distance() {
        let mut volume = BoundingVolume::new(1.0);
        let mesh = Rc::new(Mesh::from_faces(
            vec![
                DVec3::new(-1.0, -1.0, -4.0),
                DVec3::new(1.0, -1.0, -4.0),
                DVec3::new(0.0, 1.0, -4.0),
            ],
            vec![[0, 1, 2]],
            Vec3A::Z,
        ));
        let sphere = Rc::new(Sphere::new(DVec3::new(0.0, 0.0, -5.0), 1.0, Vec3A::X));
        volume.insert_mesh(mesh);
        volume.insert_solid(sphere);

        // Both surfaces sit at t = 4 along this ray
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));
        let hit = volume.intersect(&ray);
        assert!((hit.distance - 4.0).abs() < 1e-12);
        assert_eq!(hit.solid.unwrap().color(), Vec3A::X);
        assert!(hit.mesh.is_none());
    }

    #[test]
    fn mesh_hit_reports_face_and_mesh() {
        let mut volume = BoundingVolume::new(1.0);
        let mesh = Rc::new(Mesh::from_faces(
            vec![
                DVec3::new(-1.0, -1.0, -4.0),
                DVec3::new(1.0, -1.0, -4.0),
                DVec3::new(0.0, 1.0, -4.0),
            ],
            vec![[0, 1, 2]],
            Vec3A::Z,
        ));
        volume.insert_mesh(Rc::clone(&mesh));

        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));
        let hit = volume.intersect(&ray);
        assert!(hit.intersected);
        assert!((hit.distance - 4.0).abs() < 1e-12);
        assert!(hit.mesh.is_some());
        assert_eq!(hit.solid.unwrap().color(), Vec3A::Z);
    }

    #[test]
    fn ray_missing_the_bound_is_pruned() {
        // Two tiny spheres at opposite corners of the extent. The cylinder
        // radius is half the larger axis extent, so the corners stick out
        // of the bound and a ray straight down onto one of them misses the
        // cylinder even though it would hit the sphere.
        let mut volume = BoundingVolume::new(1.0);
        let corner = Rc::new(Sphere::new(DVec3::new(1.0, 0.0, 1.0), 0.05, Vec3A::X));
        volume.insert_solid(Rc::clone(&corner) as Rc<dyn Solid>);
        volume.insert_solid(Rc::new(Sphere::new(DVec3::new(-1.0, 0.0, -1.0), 0.05, Vec3A::Y)));

        let ray = Ray::new(DVec3::new(1.0, 5.0, 1.0), DVec3::new(0.0, -1.0, 0.0));
        assert!(corner.intersection_scalar(&ray) >= 0.0);

        let hit = volume.intersect(&ray);
        assert!(!hit.intersected);
        assert!(hit.bounding_volume.is_none());
    }

    #[test]
    fn sub_groups_do_not_grow_or_answer_queries() {
        let mut child = BoundingVolume::new(1.0);
        child.insert_solid(Rc::new(Sphere::new(DVec3::new(0.0, 0.0, -5.0), 1.0, Vec3A::X)));

        let mut parent = BoundingVolume::new(1.0);
        parent.insert_group(Rc::new(child));
        assert_eq!(parent.sub_group_count(), 1);

        // The parent's own extent is untouched by the sub-group
        assert_eq!(parent.min_point(), DVec3::splat(f64::INFINITY));

        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));
        assert!(!parent.intersect(&ray).intersected);
    }
}
