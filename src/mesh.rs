//! Indexed triangle mesh.
//!
//! A mesh is a vertex pool plus index triples. Intersection scans every
//! face and remembers the winning one, so a query can later be reported as
//! a standalone triangle.

use std::cell::Cell;

use glam::DVec3;

use crate::ray::Ray;
use crate::solid::{Color, Solid, NO_HIT};
use crate::triangle::Triangle;

/// Collection of triangular faces over a shared vertex pool.
#[derive(Debug, Clone)]
pub struct Mesh {
    vertices: Vec<DVec3>,
    faces: Vec<[usize; 3]>,
    color: Color,
    /// Index of the face the most recent intersection query hit.
    ///
    /// Queries take `&self`, so the memo lives in a Cell. This also keeps
    /// the mesh single-thread only, which matches the renderer.
    last_face_hit: Cell<Option<usize>>,
}

impl Mesh {
    /// Create an empty mesh with the given flat color.
    pub fn new(color: Color) -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            color,
            last_face_hit: Cell::new(None),
        }
    }

    /// Create a mesh from a vertex pool and face index triples.
    pub fn from_faces(vertices: Vec<DVec3>, faces: Vec<[usize; 3]>, color: Color) -> Self {
        Self {
            vertices,
            faces,
            color,
            last_face_hit: Cell::new(None),
        }
    }

    /// Append a vertex, returning its index.
    pub fn push_vertex(&mut self, vertex: DVec3) -> usize {
        self.vertices.push(vertex);
        self.vertices.len() - 1
    }

    /// Append a face referencing three existing vertices.
    pub fn push_face(&mut self, face: [usize; 3]) {
        self.faces.push(face);
    }

    /// Number of faces in the mesh.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Materialize one face as a triangle carrying the mesh color.
    fn face(&self, index: usize) -> Triangle {
        let [i, j, k] = self.faces[index];
        Triangle::new(self.vertices[i], self.vertices[j], self.vertices[k], self.color)
    }

    /// The face hit by the most recent intersection query, as a triangle.
    pub fn last_face_hit(&self) -> Option<Triangle> {
        self.last_face_hit.get().map(|index| self.face(index))
    }
}

impl Solid for Mesh {
    fn intersection_scalar(&self, ray: &Ray) -> f64 {
        let mut nearest = f64::INFINITY;
        let mut nearest_face = None;

        for index in 0..self.faces.len() {
            let t = self.face(index).intersection_scalar(ray);
            if t >= 0.0 && t < nearest {
                nearest = t;
                nearest_face = Some(index);
            }
        }

        match nearest_face {
            Some(index) => {
                self.last_face_hit.set(Some(index));
                nearest
            }
            None => NO_HIT,
        }
    }

    fn bounds(&self) -> (DVec3, DVec3) {
        let mut min = DVec3::splat(f64::INFINITY);
        let mut max = DVec3::splat(f64::NEG_INFINITY);
        for vertex in &self.vertices {
            min = min.min(*vertex);
            max = max.max(*vertex);
        }
        (min, max)
    }

    fn color(&self) -> Color {
        self.color
    }
}
