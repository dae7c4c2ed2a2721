//! Lumecast ray-casting renderer
//!
//! Casts one ray per pixel into a scene of spheres, cylinders and triangle
//! meshes grouped under padded cylindrical bounding volumes, and shades
//! each pixel with the flat color of the nearest hit. Outputs PNG and EXR
//! formats with optional TEV viewer integration.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod bounding;
pub mod camera;
pub mod canvas;
pub mod cylinder;
pub mod mesh;
pub mod ray;
pub mod scene;
pub mod solid;
pub mod sphere;
pub mod triangle;

pub mod cli;
pub mod logger;
pub mod output;
pub mod random;
