use std::rc::Rc;

use clap::Parser;
use glam::{DVec3, Vec3A};
use log::info;

use lumecast::bounding::BoundingVolume;
use lumecast::camera::Camera;
use lumecast::canvas::Canvas;
use lumecast::cli::Args;
use lumecast::cylinder::Cylinder;
use lumecast::logger::init_logger;
use lumecast::mesh::Mesh;
use lumecast::output::{save_image_as_exr, save_image_as_png, send_image_to_tev};
use lumecast::random;
use lumecast::scene::Scene;
use lumecast::solid::Solid;
use lumecast::sphere::Sphere;

/// Square pyramid sitting on y = base_y, apex straight up.
fn pyramid_mesh(center: DVec3, half_width: f64, height: f64, color: Vec3A) -> Mesh {
    let mut mesh = Mesh::new(color);
    let a = mesh.push_vertex(center + DVec3::new(-half_width, 0.0, -half_width));
    let b = mesh.push_vertex(center + DVec3::new(half_width, 0.0, -half_width));
    let c = mesh.push_vertex(center + DVec3::new(half_width, 0.0, half_width));
    let d = mesh.push_vertex(center + DVec3::new(-half_width, 0.0, half_width));
    let apex = mesh.push_vertex(center + DVec3::new(0.0, height, 0.0));

    for side in [[a, b, apex], [b, c, apex], [c, d, apex], [d, a, apex]] {
        mesh.push_face(side);
    }
    // Base quad
    mesh.push_face([a, b, c]);
    mesh.push_face([a, c, d]);
    mesh
}

/// Build the demo scene: three feature shapes front and center, a seeded
/// random ring of small spheres around them, and the ring doubled up as a
/// nested sub-group to keep the hierarchy honest.
fn create_scene(padding: f64) -> Scene {
    let mut objects = BoundingVolume::new(padding);

    objects.insert_solid(Rc::new(Sphere::new(
        DVec3::new(0.0, 0.0, -7.0),
        1.2,
        Vec3A::new(0.9, 0.25, 0.2),
    )));
    objects.insert_solid(Rc::new(Cylinder::new(
        DVec3::new(2.6, -1.2, -8.0),
        DVec3::new(2.6, 1.0, -8.0),
        0.7,
        Vec3A::new(0.2, 0.5, 0.9),
    )));
    objects.insert_mesh(Rc::new(pyramid_mesh(
        DVec3::new(-2.6, -1.2, -8.0),
        1.0,
        2.2,
        Vec3A::new(0.95, 0.8, 0.2),
    )));

    // Ring of small spheres around the feature shapes
    let mut ring: Vec<Rc<dyn Solid>> = Vec::new();
    for i in 0..12 {
        let angle = i as f64 / 12.0 * std::f64::consts::TAU;
        let center = DVec3::new(
            4.5 * angle.cos(),
            random::random_f64_range(-1.0, 1.0),
            -9.0 + 2.5 * angle.sin(),
        );
        let radius = random::random_f64_range(0.2, 0.45);
        ring.push(Rc::new(Sphere::new(
            center,
            radius,
            random::random_color_range(0.3, 1.0),
        )));
    }

    // The ring spheres also live in a shared sub-group under the top
    // volume. Sub-groups are structural only (not hit-tested), so the
    // spheres are inserted directly as well.
    let mut ring_group = BoundingVolume::new(padding);
    for sphere in &ring {
        ring_group.insert_solid(Rc::clone(sphere));
    }
    objects.insert_group(Rc::new(ring_group));
    for sphere in ring {
        objects.insert_solid(sphere);
    }

    let camera = Camera::new(DVec3::ZERO, 1.0, 2.0, 2.0);
    Scene::new(camera, objects)
}

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.into());

    // Log application startup with version information
    info!("Lumecast - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));
    info!(
        "Image resolution: {}x{}, bounding padding: {}",
        args.width, args.height, args.padding
    );

    let scene = create_scene(args.padding);
    info!(
        "Scene built: {} solids, {} meshes, {} sub-groups",
        scene.objects.solid_count(),
        scene.objects.mesh_count(),
        scene.objects.sub_group_count()
    );

    let canvas = Canvas::new(args.width, args.height, Vec3A::new(0.05, 0.05, 0.08));
    let image = canvas.render(&scene);

    // Send image to TEV if requested
    let should_send_to_tev = args.tev || args.tev_address.is_some();
    if should_send_to_tev {
        let tev_address = args.tev_address.as_deref().unwrap_or("localhost:14158");
        send_image_to_tev(&image, tev_address, args.width, args.height);
    }

    // Save image based on file extension
    if args.output.ends_with(".exr") {
        save_image_as_exr(&image, &args.output, args.width, args.height);
    } else if args.output.ends_with(".png") {
        save_image_as_png(&image, &args.output, args.width, args.height);
    } else {
        log::error!(
            "Unsupported file extension '{}'. Only .png and .exr formats are supported.",
            std::path::Path::new(&args.output)
                .extension()
                .unwrap_or_default()
                .to_string_lossy()
        );
        std::process::exit(1);
    }
}
