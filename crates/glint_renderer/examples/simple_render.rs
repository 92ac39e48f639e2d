//! Simple ray tracer example.
//!
//! Renders a blue sphere and a mirrored floor over a reflective backdrop
//! and saves to PPM format.

use glint_renderer::{
    render, save_ppm, Camera, Color, Hittable, Material, Plane, RenderConfig, Scene, Sphere, Vec3,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // Objects are owned here; the scene only borrows them
    let ball = Sphere::new(Vec3::new(-1.5, 0.0, 6.0), 1.0, Material::new(30.0, 60.0, 230.0))?;
    let chrome = Sphere::new(
        Vec3::new(1.5, 0.0, 7.0),
        1.0,
        Material::with_reflectance(220.0, 220.0, 220.0, 0.8),
    )?;
    let floor = Plane::new(
        Vec3::new(0.0, -1.0, 0.0),
        Vec3::Y,
        Material::with_reflectance(180.0, 180.0, 160.0, 0.3),
    )?;
    let backdrop = Plane::new(
        Vec3::new(0.0, 0.0, 15.0),
        Vec3::new(0.0, 0.0, -1.0),
        Material::new(200.0, 120.0, 60.0),
    )?;

    let mut world = Scene::new();
    for object in [&ball as &dyn Hittable, &chrome, &floor, &backdrop] {
        world.add(object);
    }

    let camera = Camera::new(800, 450)?
        .with_position(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, 6.0), Vec3::Y)?
        .with_fov(50.0)?;

    let config = RenderConfig {
        max_depth: 8,
        background: Color::new(20.0, 20.0, 30.0),
        light_position: Vec3::new(-4.0, 6.0, 0.0),
        ..RenderConfig::default()
    };

    let image = render(&camera, &world, &config);

    let filename = "output.ppm";
    save_ppm(&image, filename)?;
    log::info!("Saved to {}", filename);

    Ok(())
}
