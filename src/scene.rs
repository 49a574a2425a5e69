use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::light::{Attenuation, DirectionalLight, Light, Material, PointLight, SpotLight};
use crate::transform::Transform;

/// Number of orbiting point lights sent to the shader.
pub const POINT_LIGHT_COUNT: usize = 2;

const LIGHT_MARKER_SCALE: f32 = 0.5;

/// Plane a point light circles in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrbitPlane {
    /// `x` follows cosine, `z` follows sine.
    XZ,
    /// `y` follows cosine, `z` follows sine.
    YZ,
}

/// Circular path followed by a point light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orbit {
    pub center: Vec3,
    pub radius: f32,
    /// Angular speed in radians per second; the sign picks the direction.
    pub speed: f32,
    pub plane: OrbitPlane,
}

impl Orbit {
    pub fn position_at(&self, time: f32) -> Vec3 {
        let angle = time * self.speed;
        let (cos, sin) = (angle.cos() * self.radius, angle.sin() * self.radius);
        let mut position = self.center;
        match self.plane {
            OrbitPlane::XZ => position.x += cos,
            OrbitPlane::YZ => position.y += cos,
        }
        position.z += sin;
        position
    }
}

/// Every parameter exposed on the settings panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightingSettings {
    pub background: Vec3,
    /// Color of the unlit spheres marking the orbiting lights.
    pub light_color: Vec3,
    pub material: Material,
    pub directional: DirectionalLight,
    pub orbital: Light,
    pub orbital_attenuation: Attenuation,
    pub spot: Light,
    pub spot_attenuation: Attenuation,
    pub spot_cutoff_degrees: f32,
    pub orbits: [Orbit; POINT_LIGHT_COUNT],
    pub draw_as_points: bool,
}

impl Default for LightingSettings {
    fn default() -> Self {
        Self {
            background: Vec3::ZERO,
            light_color: Vec3::ONE,
            material: Material::default(),
            directional: DirectionalLight::new(
                Light::new(
                    Vec3::new(0.0, 0.0, 0.25),
                    Vec3::new(0.0, 0.0, 0.1),
                    Vec3::new(0.0, 0.0, 0.5),
                ),
                Vec3::new(-0.2, -1.0, -0.3),
            ),
            orbital: Light::new(
                Vec3::new(0.5, 0.0, 0.0),
                Vec3::new(0.2, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
            ),
            orbital_attenuation: Attenuation::new(1.0, 0.22, 0.20),
            spot: Light::new(
                Vec3::new(0.0, 0.5, 0.0),
                Vec3::new(0.0, 0.2, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ),
            spot_attenuation: Attenuation::new(1.0, 0.045, 0.0075),
            spot_cutoff_degrees: 12.5,
            orbits: [
                Orbit {
                    center: Vec3::ZERO,
                    radius: 1.0,
                    speed: 1.0,
                    plane: OrbitPlane::XZ,
                },
                Orbit {
                    center: Vec3::ZERO,
                    radius: 1.0,
                    speed: -1.0,
                    plane: OrbitPlane::YZ,
                },
            ],
            draw_as_points: false,
        }
    }
}

/// Which procedural mesh a draw uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    Cube,
    Sphere,
    Cone,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shading {
    Lit,
    Unlit(Vec3),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub mesh: MeshKind,
    pub model: Mat4,
    pub shading: Shading,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameState {
    pub projection: Mat4,
    pub view: Mat4,
    pub eye_position: Vec3,
    pub background: Vec3,
    pub material: Material,
    pub directional: DirectionalLight,
    pub point_lights: [PointLight; POINT_LIGHT_COUNT],
    pub spot: SpotLight,
    pub draw_as_points: bool,
    pub draws: Vec<DrawCommand>,
}

/// Fixed demo scene: three lit shapes and two orbiting lights.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub cube: Transform,
    pub sphere: Transform,
    pub cone: Transform,
    pub light_markers: [Transform; POINT_LIGHT_COUNT],
    pub settings: LightingSettings,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(LightingSettings::default())
    }
}

impl Scene {
    pub fn new(settings: LightingSettings) -> Self {
        let marker = Transform::default().with_scale(Vec3::splat(LIGHT_MARKER_SCALE));
        Self {
            cube: Transform::from_position(Vec3::new(-2.0, 0.0, 0.0)),
            sphere: Transform::from_position(Vec3::ZERO),
            cone: Transform::from_position(Vec3::new(2.0, 0.0, 0.0)),
            light_markers: [marker; POINT_LIGHT_COUNT],
            settings,
        }
    }

    /// Moves the light markers along their orbits to `time` seconds.
    pub fn update(&mut self, time: f32) {
        for (marker, orbit) in self.light_markers.iter_mut().zip(self.settings.orbits.iter()) {
            marker.position = orbit.position_at(time);
        }
    }

    pub fn point_lights(&self) -> [PointLight; POINT_LIGHT_COUNT] {
        let settings = &self.settings;
        self.light_markers.map(|marker| {
            PointLight::new(settings.orbital, marker.position, settings.orbital_attenuation)
        })
    }

    /// Spot light carried by the camera, pointing where it looks.
    pub fn spot_light(&self, camera: &Camera) -> SpotLight {
        SpotLight {
            light: self.settings.spot,
            position: camera.position(),
            direction: camera.forward(),
            attenuation: self.settings.spot_attenuation,
            cutoff_degrees: self.settings.spot_cutoff_degrees,
        }
    }

    /// Builds uniforms and the draw list: lit shapes first, then light markers.
    pub fn frame(&self, camera: &Camera) -> FrameState {
        let settings = &self.settings;
        let mut draws = vec![
            DrawCommand {
                mesh: MeshKind::Cube,
                model: self.cube.model_matrix(),
                shading: Shading::Lit,
            },
            DrawCommand {
                mesh: MeshKind::Sphere,
                model: self.sphere.model_matrix(),
                shading: Shading::Lit,
            },
            DrawCommand {
                mesh: MeshKind::Cone,
                model: self.cone.model_matrix(),
                shading: Shading::Lit,
            },
        ];
        draws.extend(self.light_markers.iter().map(|marker| DrawCommand {
            mesh: MeshKind::Sphere,
            model: marker.model_matrix(),
            shading: Shading::Unlit(settings.light_color),
        }));

        FrameState {
            projection: camera.projection_matrix(),
            view: camera.view_matrix(),
            eye_position: camera.position(),
            background: settings.background,
            material: settings.material,
            directional: settings.directional,
            point_lights: self.point_lights(),
            spot: self.spot_light(camera),
            draw_as_points: settings.draw_as_points,
            draws,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn orbits_trace_their_planes() {
        let settings = LightingSettings::default();
        let [first, second] = settings.orbits;
        let quarter = std::f32::consts::FRAC_PI_2;

        assert!(first.position_at(0.0).abs_diff_eq(Vec3::X, EPS));
        assert!(first.position_at(quarter).abs_diff_eq(Vec3::Z, EPS));
        assert!(second.position_at(0.0).abs_diff_eq(Vec3::Y, EPS));
        assert!(second.position_at(quarter).abs_diff_eq(Vec3::NEG_Z, EPS));
    }

    #[test]
    fn orbit_offsets_from_center() {
        let orbit = Orbit {
            center: Vec3::new(1.0, 2.0, 3.0),
            radius: 2.0,
            speed: 1.0,
            plane: OrbitPlane::XZ,
        };
        assert!(orbit
            .position_at(0.0)
            .abs_diff_eq(Vec3::new(3.0, 2.0, 3.0), EPS));
    }

    #[test]
    fn update_moves_light_markers_only() {
        let mut scene = Scene::default();
        scene.update(0.0);
        assert!(scene.light_markers[0].position.abs_diff_eq(Vec3::X, EPS));
        assert!(scene.light_markers[1].position.abs_diff_eq(Vec3::Y, EPS));
        assert_eq!(scene.light_markers[0].scale, Vec3::splat(0.5));
        assert_eq!(scene.cube.position, Vec3::new(-2.0, 0.0, 0.0));
    }

    #[test]
    fn frame_draws_shapes_then_markers() {
        let mut scene = Scene::default();
        scene.update(0.0);
        let camera = Camera::new(1.5);
        let frame = scene.frame(&camera);

        let meshes: Vec<MeshKind> = frame.draws.iter().map(|draw| draw.mesh).collect();
        assert_eq!(
            meshes,
            vec![
                MeshKind::Cube,
                MeshKind::Sphere,
                MeshKind::Cone,
                MeshKind::Sphere,
                MeshKind::Sphere
            ]
        );
        assert!(frame.draws[..3]
            .iter()
            .all(|draw| draw.shading == Shading::Lit));
        assert_eq!(frame.draws[3].shading, Shading::Unlit(Vec3::ONE));
        assert_eq!(frame.view, camera.view_matrix());
        assert_eq!(frame.projection, camera.projection_matrix());
    }

    #[test]
    fn frame_lights_follow_markers_and_camera() {
        let mut scene = Scene::default();
        scene.settings.spot_cutoff_degrees = 20.0;
        scene.update(0.0);
        let mut camera = Camera::new(1.0);
        camera.set_position(Vec3::new(0.0, 1.0, 4.0));
        let frame = scene.frame(&camera);

        assert_eq!(frame.point_lights[0].position, scene.light_markers[0].position);
        assert_eq!(frame.point_lights[1].attenuation, Attenuation::new(1.0, 0.22, 0.20));
        assert_eq!(frame.spot.position, camera.position());
        assert_eq!(frame.spot.direction, camera.forward());
        assert_eq!(frame.spot.cutoff_degrees, 20.0);
    }
}
