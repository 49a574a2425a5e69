//! On-screen settings panel built with egui.

use std::ops::RangeInclusive;

use egui::{Context, Slider, Ui};
use glam::Vec3;
use winit::event::WindowEvent;
use winit::window::Window;

use crate::camera::{Camera, Projection};
use crate::light::{Attenuation, Light};
use crate::scene::{LightingSettings, Orbit};

/// Tessellated overlay output ready for the GPU.
pub struct OverlayFrame {
    pub primitives: Vec<egui::ClippedPrimitive>,
    pub textures_delta: egui::TexturesDelta,
    pub pixels_per_point: f32,
}

/// Window side of the egui integration: input routing and frame building.
pub struct Overlay {
    context: Context,
    state: egui_winit::State,
}

impl Overlay {
    pub fn new(window: &Window, max_texture_side: usize) -> Self {
        let context = Context::default();
        let state = egui_winit::State::new(
            context.clone(),
            context.viewport_id(),
            window,
            Some(window.scale_factor() as f32),
            None,
            Some(max_texture_side),
        );
        Self { context, state }
    }

    /// Feeds a window event to egui; returns `true` when egui consumed it.
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    pub fn wants_pointer(&self) -> bool {
        self.context.wants_pointer_input()
    }

    pub fn wants_keyboard(&self) -> bool {
        self.context.wants_keyboard_input()
    }

    pub fn run(&mut self, window: &Window, build: impl FnMut(&Context)) -> OverlayFrame {
        let raw_input = self.state.take_egui_input(window);
        let output = self.context.run(raw_input, build);
        self.state
            .handle_platform_output(window, output.platform_output);
        let primitives = self
            .context
            .tessellate(output.shapes, output.pixels_per_point);
        OverlayFrame {
            primitives,
            textures_delta: output.textures_delta,
            pixels_per_point: output.pixels_per_point,
        }
    }
}

/// Draws the "Settings" window editing `settings` and the camera projection.
pub fn settings_panel(ctx: &Context, settings: &mut LightingSettings, camera: &mut Camera) {
    egui::Window::new("Settings")
        .default_width(280.0)
        .show(ctx, |ui| {
            ui.collapsing("Directional light", |ui| {
                light_colors(ui, &mut settings.directional.light);
                vec3_sliders(ui, "Direction", &mut settings.directional.direction, -1.0..=1.0);
            });

            ui.collapsing("Spot light", |ui| {
                light_colors(ui, &mut settings.spot);
                ui.add(
                    Slider::new(&mut settings.spot_cutoff_degrees, 0.0..=90.0)
                        .text("Cutoff")
                        .suffix("°"),
                );
                attenuation_sliders(ui, &mut settings.spot_attenuation);
            });

            ui.collapsing("Orbital lights", |ui| {
                light_colors(ui, &mut settings.orbital);
                attenuation_sliders(ui, &mut settings.orbital_attenuation);
                let [first, second] = &mut settings.orbits;
                orbit_sliders(ui, "Light one", first, 0.0..=3.0);
                orbit_sliders(ui, "Light two", second, -3.0..=0.0);
            });

            ui.collapsing("Material", |ui| {
                color_row(ui, "Ambient", &mut settings.material.ambient);
                color_row(ui, "Diffuse", &mut settings.material.diffuse);
                color_row(ui, "Specular", &mut settings.material.specular);
                ui.add(
                    Slider::new(&mut settings.material.shininess, 1.0..=256.0)
                        .logarithmic(true)
                        .text("Shininess"),
                );
            });

            ui.separator();
            color_row(ui, "Background", &mut settings.background);
            color_row(ui, "Light markers", &mut settings.light_color);
            ui.checkbox(&mut settings.draw_as_points, "Draw as points");

            ui.separator();
            camera_section(ui, camera);
        });
}

fn camera_section(ui: &mut Ui, camera: &mut Camera) {
    let mut projection = camera.projection();
    ui.horizontal(|ui| {
        ui.radio_value(&mut projection, Projection::Perspective, "Perspective");
        ui.radio_value(&mut projection, Projection::Orthographic, "Orthographic");
    });
    if projection != camera.projection() {
        camera.set_projection(projection);
    }
    let position = camera.position();
    ui.label(format!(
        "Position ({:.2}, {:.2}, {:.2})",
        position.x, position.y, position.z
    ));
    ui.label(format!(
        "Yaw {:.1}  Pitch {:.1}  FOV {:.1}",
        camera.yaw(),
        camera.pitch(),
        camera.fov()
    ));
}

fn light_colors(ui: &mut Ui, light: &mut Light) {
    color_row(ui, "Ambient", &mut light.ambient);
    color_row(ui, "Diffuse", &mut light.diffuse);
    color_row(ui, "Specular", &mut light.specular);
}

fn color_row(ui: &mut Ui, label: &str, color: &mut Vec3) {
    ui.horizontal(|ui| {
        let mut rgb = color.to_array();
        if ui.color_edit_button_rgb(&mut rgb).changed() {
            *color = Vec3::from_array(rgb);
        }
        ui.label(label);
    });
}

fn attenuation_sliders(ui: &mut Ui, attenuation: &mut Attenuation) {
    ui.label("Attenuation");
    ui.add(Slider::new(&mut attenuation.constant, 0.0..=1.0).text("Constant"));
    ui.add(Slider::new(&mut attenuation.linear, 0.0..=1.0).text("Linear"));
    ui.add(Slider::new(&mut attenuation.quadratic, 0.0..=1.0).text("Quadratic"));
}

fn vec3_sliders(ui: &mut Ui, label: &str, value: &mut Vec3, range: RangeInclusive<f32>) {
    ui.label(label);
    ui.add(Slider::new(&mut value.x, range.clone()).text("x"));
    ui.add(Slider::new(&mut value.y, range.clone()).text("y"));
    ui.add(Slider::new(&mut value.z, range).text("z"));
}

fn orbit_sliders(ui: &mut Ui, label: &str, orbit: &mut Orbit, speed: RangeInclusive<f32>) {
    ui.push_id(label, |ui| {
        vec3_sliders(ui, label, &mut orbit.center, -5.0..=5.0);
        ui.add(Slider::new(&mut orbit.radius, 0.0..=5.0).text("Radius"));
        ui.add(Slider::new(&mut orbit.speed, speed).text("Speed"));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_without_input_leaves_settings_untouched() {
        let ctx = Context::default();
        let mut settings = LightingSettings::default();
        let mut camera = Camera::new(1.5);
        for _ in 0..2 {
            let _ = ctx.run(egui::RawInput::default(), |ctx| {
                settings_panel(ctx, &mut settings, &mut camera)
            });
        }
        assert_eq!(settings, LightingSettings::default());
        assert_eq!(camera.projection(), Projection::Perspective);
    }
}
