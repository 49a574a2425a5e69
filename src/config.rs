//! Startup settings loaded from an optional XML file.
//!
//! Every element is optional; anything left out keeps its built-in default.
//!
//! ```xml
//! <settings>
//!     <window><width>1280</width><height>720</height></window>
//!     <camera><fov>75</fov><projection>orthographic</projection></camera>
//!     <lighting>
//!         <spot><cutoff>20</cutoff></spot>
//!         <orbit1><radius>2</radius></orbit1>
//!     </lighting>
//! </settings>
//! ```

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use glam::Vec3;
use roxmltree::{Document, Node};
use serde::{Deserialize, Serialize};

use crate::camera::{Camera, Projection};
use crate::light::{Attenuation, Light};
use crate::scene::{LightingSettings, Orbit};

/// Window creation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 640,
            title: "Lighting".to_string(),
        }
    }
}

impl WindowConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Initial camera state plus the input tuning that drives it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub ortho_size: f32,
    pub move_speed: f32,
    pub zoom_speed: f32,
    pub mouse_sensitivity: f32,
    pub projection: Projection,
}

impl Default for CameraConfig {
    fn default() -> Self {
        let camera = Camera::new(1.0);
        Self {
            position: camera.position(),
            yaw: camera.yaw(),
            pitch: camera.pitch(),
            fov: camera.fov(),
            near: camera.near_plane(),
            far: camera.far_plane(),
            ortho_size: camera.ortho_size(),
            move_speed: camera.move_speed(),
            zoom_speed: camera.zoom_speed(),
            mouse_sensitivity: 0.1,
            projection: camera.projection(),
        }
    }
}

impl CameraConfig {
    /// Builds a camera for a viewport with the given aspect ratio.
    pub fn build(&self, aspect_ratio: f32) -> Camera {
        let mut camera = Camera::new(aspect_ratio)
            .with_planes(self.near, self.far)
            .with_ortho_size(self.ortho_size);
        camera.set_position(self.position);
        camera.set_yaw(self.yaw);
        camera.set_pitch(self.pitch);
        camera.set_fov(self.fov);
        camera.set_move_speed(self.move_speed);
        camera.set_zoom_speed(self.zoom_speed);
        camera.set_projection(self.projection);
        camera
    }
}

/// Complete startup configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DemoConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub lighting: LightingSettings,
}

impl DemoConfig {
    /// Reads and parses a settings file from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let xml = fs::read_to_string(path)
            .with_context(|| format!("unable to read {}", path.display()))?;
        Self::from_xml(&xml).with_context(|| format!("invalid settings in {}", path.display()))
    }

    /// Parses settings XML, starting from the defaults.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let document = Document::parse(xml).context("invalid settings XML")?;
        let root = document.root_element();
        if !root.has_tag_name("settings") {
            return Err(anyhow!(
                "expected <settings> root element, found <{}>",
                root.tag_name().name()
            ));
        }

        let mut config = Self::default();
        if let Some(window) = child(&root, "window") {
            parse_window(&window, &mut config.window)?;
        }
        if let Some(camera) = child(&root, "camera") {
            parse_camera(&camera, &mut config.camera)?;
        }
        if let Some(lighting) = child(&root, "lighting") {
            parse_lighting(&lighting, &mut config.lighting)?;
        }
        Ok(config)
    }
}

fn parse_window(node: &Node<'_, '_>, window: &mut WindowConfig) -> Result<()> {
    window.width = parse_u32(node, "width", window.width)?;
    window.height = parse_u32(node, "height", window.height)?;
    if let Some(title) = optional_text(node, "title") {
        window.title = title;
    }
    Ok(())
}

fn parse_camera(node: &Node<'_, '_>, camera: &mut CameraConfig) -> Result<()> {
    camera.position = parse_vec3(node, "position", camera.position)?;
    camera.yaw = parse_f32(node, "yaw", camera.yaw)?;
    camera.pitch = parse_f32(node, "pitch", camera.pitch)?;
    camera.fov = parse_f32(node, "fov", camera.fov)?;
    camera.near = parse_f32(node, "near", camera.near)?;
    camera.far = parse_f32(node, "far", camera.far)?;
    camera.ortho_size = parse_f32(node, "ortho_size", camera.ortho_size)?;
    camera.move_speed = parse_f32(node, "move_speed", camera.move_speed)?;
    camera.zoom_speed = parse_f32(node, "zoom_speed", camera.zoom_speed)?;
    camera.mouse_sensitivity = parse_f32(node, "mouse_sensitivity", camera.mouse_sensitivity)?;
    if let Some(name) = optional_text(node, "projection") {
        camera.projection = Projection::from_name(&name)
            .ok_or_else(|| anyhow!("<projection>: unknown projection {name:?}"))?;
    }
    Ok(())
}

fn parse_lighting(node: &Node<'_, '_>, lighting: &mut LightingSettings) -> Result<()> {
    lighting.background = parse_vec3(node, "background", lighting.background)?;
    lighting.light_color = parse_vec3(node, "light_color", lighting.light_color)?;
    lighting.draw_as_points = parse_bool(node, "draw_as_points", lighting.draw_as_points)?;

    if let Some(material) = child(node, "material") {
        let target = &mut lighting.material;
        target.ambient = parse_vec3(&material, "ambient", target.ambient)?;
        target.diffuse = parse_vec3(&material, "diffuse", target.diffuse)?;
        target.specular = parse_vec3(&material, "specular", target.specular)?;
        target.shininess = parse_f32(&material, "shininess", target.shininess)?;
    }
    if let Some(directional) = child(node, "directional") {
        let target = &mut lighting.directional;
        target.direction = parse_vec3(&directional, "direction", target.direction)?;
        parse_light_colors(&directional, &mut target.light)?;
    }
    if let Some(orbital) = child(node, "orbital") {
        parse_light_colors(&orbital, &mut lighting.orbital)?;
        lighting.orbital_attenuation =
            parse_attenuation(&orbital, lighting.orbital_attenuation)?;
    }
    if let Some(spot) = child(node, "spot") {
        parse_light_colors(&spot, &mut lighting.spot)?;
        lighting.spot_attenuation = parse_attenuation(&spot, lighting.spot_attenuation)?;
        lighting.spot_cutoff_degrees = parse_f32(&spot, "cutoff", lighting.spot_cutoff_degrees)?;
    }
    for (tag, orbit) in ["orbit1", "orbit2"].into_iter().zip(lighting.orbits.iter_mut()) {
        if let Some(node) = child(node, tag) {
            parse_orbit(&node, orbit)?;
        }
    }
    Ok(())
}

fn parse_light_colors(node: &Node<'_, '_>, light: &mut Light) -> Result<()> {
    light.ambient = parse_vec3(node, "ambient", light.ambient)?;
    light.diffuse = parse_vec3(node, "diffuse", light.diffuse)?;
    light.specular = parse_vec3(node, "specular", light.specular)?;
    Ok(())
}

fn parse_attenuation(node: &Node<'_, '_>, default: Attenuation) -> Result<Attenuation> {
    parse_vec3(node, "attenuation", default.to_vec3()).map(Attenuation::from_vec3)
}

fn parse_orbit(node: &Node<'_, '_>, orbit: &mut Orbit) -> Result<()> {
    orbit.center = parse_vec3(node, "center", orbit.center)?;
    orbit.radius = parse_f32(node, "radius", orbit.radius)?;
    orbit.speed = parse_f32(node, "speed", orbit.speed)?;
    Ok(())
}

fn child<'a, 'input>(node: &Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|child| child.has_tag_name(tag))
}

fn optional_text(node: &Node<'_, '_>, tag: &str) -> Option<String> {
    child(node, tag)
        .and_then(|child| child.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(|text| text.to_string())
}

fn parse_vec3(node: &Node<'_, '_>, tag: &str, default: Vec3) -> Result<Vec3> {
    let Some(value) = optional_text(node, tag) else {
        return Ok(default);
    };
    let components = value
        .split_whitespace()
        .map(|component| component.parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| anyhow!("<{tag}>: failed to parse vector {value:?}: {err}"))?;
    match components.as_slice() {
        [x, y, z] => Ok(Vec3::new(*x, *y, *z)),
        _ => Err(anyhow!(
            "<{tag}>: expected 3 components, found {}",
            components.len()
        )),
    }
}

fn parse_f32(node: &Node<'_, '_>, tag: &str, default: f32) -> Result<f32> {
    match optional_text(node, tag) {
        Some(value) => value
            .parse::<f32>()
            .map_err(|err| anyhow!("<{tag}>: failed to parse float {value:?}: {err}")),
        None => Ok(default),
    }
}

fn parse_u32(node: &Node<'_, '_>, tag: &str, default: u32) -> Result<u32> {
    match optional_text(node, tag) {
        Some(value) => value
            .parse::<u32>()
            .map_err(|err| anyhow!("<{tag}>: failed to parse integer {value:?}: {err}")),
        None => Ok(default),
    }
}

fn parse_bool(node: &Node<'_, '_>, tag: &str, default: bool) -> Result<bool> {
    match optional_text(node, tag).as_deref() {
        Some("true" | "1" | "yes") => Ok(true),
        Some("false" | "0" | "no") => Ok(false),
        Some(other) => Err(anyhow!("<{tag}>: expected true or false, found {other:?}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
    <settings>
        <window>
            <width>800</width>
            <height>400</height>
            <title>Test</title>
        </window>
        <camera>
            <position>1 2 3</position>
            <fov>75</fov>
            <projection>orthographic</projection>
        </camera>
        <lighting>
            <background>0.1 0.1 0.1</background>
            <material><shininess>64</shininess></material>
            <spot>
                <cutoff>20</cutoff>
                <attenuation>1 0.1 0.01</attenuation>
            </spot>
            <orbit2>
                <radius>3</radius>
                <speed>-2</speed>
            </orbit2>
            <draw_as_points>true</draw_as_points>
        </lighting>
    </settings>
    "#;

    #[test]
    fn parse_overrides_only_listed_fields() {
        let config = DemoConfig::from_xml(SAMPLE).unwrap();
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.title, "Test");
        assert_eq!(config.window.aspect_ratio(), 2.0);

        assert_eq!(config.camera.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(config.camera.fov, 75.0);
        assert_eq!(config.camera.yaw, -90.0);
        assert_eq!(config.camera.projection, Projection::Orthographic);

        let lighting = &config.lighting;
        let defaults = LightingSettings::default();
        assert_eq!(lighting.background, Vec3::splat(0.1));
        assert_eq!(lighting.material.shininess, 64.0);
        assert_eq!(lighting.material.diffuse, defaults.material.diffuse);
        assert_eq!(lighting.spot_cutoff_degrees, 20.0);
        assert_eq!(lighting.spot_attenuation, Attenuation::new(1.0, 0.1, 0.01));
        assert_eq!(lighting.orbits[0], defaults.orbits[0]);
        assert_eq!(lighting.orbits[1].radius, 3.0);
        assert_eq!(lighting.orbits[1].speed, -2.0);
        assert!(lighting.draw_as_points);
    }

    #[test]
    fn empty_settings_yield_defaults() {
        let config = DemoConfig::from_xml("<settings/>").unwrap();
        assert_eq!(config, DemoConfig::default());
    }

    #[test]
    fn camera_config_builds_matching_camera() {
        let config = DemoConfig::from_xml(SAMPLE).unwrap();
        let camera = config.camera.build(config.window.aspect_ratio());
        assert_eq!(camera.position(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(camera.fov(), 75.0);
        assert_eq!(camera.projection(), Projection::Orthographic);
        assert_eq!(camera.aspect_ratio(), 2.0);
    }

    #[test]
    fn malformed_values_name_the_tag() {
        let bad = "<settings><camera><fov>wide</fov></camera></settings>";
        let err = DemoConfig::from_xml(bad).unwrap_err();
        assert!(format!("{err:#}").contains("<fov>"));

        let short = "<settings><lighting><background>1 0</background></lighting></settings>";
        let err = DemoConfig::from_xml(short).unwrap_err();
        assert!(format!("{err:#}").contains("expected 3 components"));
    }

    #[test]
    fn unknown_projection_is_an_error() {
        let bad = "<settings><camera><projection>fisheye</projection></camera></settings>";
        assert!(DemoConfig::from_xml(bad).is_err());
    }

    #[test]
    fn bundled_settings_match_defaults() {
        let config = DemoConfig::from_xml(include_str!("../assets/settings.xml")).unwrap();
        assert_eq!(config, DemoConfig::default());
    }

    #[test]
    fn wrong_root_is_an_error() {
        assert!(DemoConfig::from_xml("<scene/>").is_err());
    }
}
