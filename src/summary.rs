use std::io::{self, Write};

use glam::{Mat4, Vec3};

use crate::config::DemoConfig;
use crate::light::Light;
use crate::scene::Scene;

/// Prints the effective settings plus the camera matrices and light positions
/// the first frame would use.
pub fn write_summary(config: &DemoConfig, out: &mut impl Write) -> io::Result<()> {
    let window = &config.window;
    let camera = config.camera.build(window.aspect_ratio());
    let mut scene = Scene::new(config.lighting.clone());
    scene.update(0.0);
    let lighting = &scene.settings;

    writeln!(out, "Lighting demo settings")?;
    writeln!(
        out,
        " window: {}x{} {:?}",
        window.width, window.height, window.title
    )?;
    writeln!(
        out,
        " camera: position {} yaw {:.1} pitch {:.1} fov {:.1} projection {}",
        fmt_vec3(camera.position()),
        camera.yaw(),
        camera.pitch(),
        camera.fov(),
        camera.projection().name()
    )?;
    writeln!(out, " background: {}", fmt_vec3(lighting.background))?;
    writeln!(
        out,
        " material: ambient {} diffuse {} specular {} shininess {:.1}",
        fmt_vec3(lighting.material.ambient),
        fmt_vec3(lighting.material.diffuse),
        fmt_vec3(lighting.material.specular),
        lighting.material.shininess
    )?;
    writeln!(
        out,
        " directional: direction {} {}",
        fmt_vec3(lighting.directional.direction),
        fmt_light(&lighting.directional.light)
    )?;
    writeln!(
        out,
        " orbital: {} attenuation {}",
        fmt_light(&lighting.orbital),
        fmt_vec3(lighting.orbital_attenuation.to_vec3())
    )?;
    writeln!(
        out,
        " spot: {} attenuation {} cutoff {:.1} deg",
        fmt_light(&lighting.spot),
        fmt_vec3(lighting.spot_attenuation.to_vec3()),
        lighting.spot_cutoff_degrees
    )?;
    for (index, orbit) in lighting.orbits.iter().enumerate() {
        writeln!(
            out,
            " orbit {}: center {} radius {:.2} speed {:.2}",
            index + 1,
            fmt_vec3(orbit.center),
            orbit.radius,
            orbit.speed
        )?;
    }
    writeln!(out, " draw as points: {}", lighting.draw_as_points)?;

    write_matrix(out, "View matrix", &camera.view_matrix())?;
    write_matrix(out, "Projection matrix", &camera.projection_matrix())?;

    writeln!(out, "Light positions at t=0:")?;
    for (index, light) in scene.point_lights().iter().enumerate() {
        writeln!(out, " - light {}: {}", index + 1, fmt_vec3(light.position()))?;
    }
    Ok(())
}

fn write_matrix(out: &mut impl Write, title: &str, matrix: &Mat4) -> io::Result<()> {
    writeln!(out, "{title}:")?;
    for row in 0..4 {
        let row = matrix.row(row);
        writeln!(
            out,
            "  [{:>9.4} {:>9.4} {:>9.4} {:>9.4}]",
            row.x, row.y, row.z, row.w
        )?;
    }
    Ok(())
}

fn fmt_light(light: &Light) -> String {
    format!(
        "ambient {} diffuse {} specular {}",
        fmt_vec3(light.ambient),
        fmt_vec3(light.diffuse),
        fmt_vec3(light.specular)
    )
}

fn fmt_vec3(value: Vec3) -> String {
    format!("({:.2}, {:.2}, {:.2})", value.x, value.y, value.z)
}
