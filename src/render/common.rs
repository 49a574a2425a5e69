use bytemuck::{Pod, Zeroable};
use egui::epaint::ImageDelta;
use egui::TextureId;
use glam::{Mat3, Mat4, Vec3};

use crate::light::{Attenuation, DirectionalLight, Light, PointLight, SpotLight};
use crate::scene::{FrameState, Shading, POINT_LIGHT_COUNT};
use crate::ui::OverlayFrame;

/// Remaps OpenGL clip depth `[-w, w]` onto the `[0, w]` range wgpu expects.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU: Mat4 = Mat4::from_cols_array(&[
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
]);

/// Std140 mirror of the WGSL `Light` struct.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct LightUniform {
    pub position: [f32; 4],
    pub direction: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    /// Constant, linear and quadratic terms, then the spot cutoff cosine.
    pub attenuation: [f32; 4],
}

impl LightUniform {
    fn colored(light: &Light) -> Self {
        Self {
            ambient: light.ambient.extend(1.0).into(),
            diffuse: light.diffuse.extend(1.0).into(),
            specular: light.specular.extend(1.0).into(),
            ..Self::default()
        }
    }

    fn with_attenuation(mut self, attenuation: Attenuation, cutoff_cos: f32) -> Self {
        self.attenuation = [
            attenuation.constant,
            attenuation.linear,
            attenuation.quadratic,
            cutoff_cos,
        ];
        self
    }

    pub fn directional(light: &DirectionalLight) -> Self {
        Self {
            direction: light.direction.extend(0.0).into(),
            ..Self::colored(&light.light)
        }
        .with_attenuation(Attenuation::new(1.0, 0.0, 0.0), -1.0)
    }

    pub fn point(light: &PointLight) -> Self {
        Self {
            position: light.position.extend(1.0).into(),
            ..Self::colored(&light.light)
        }
        .with_attenuation(light.attenuation, -1.0)
    }

    pub fn spot(light: &SpotLight) -> Self {
        Self {
            position: light.position.extend(1.0).into(),
            direction: light.direction.extend(0.0).into(),
            ..Self::colored(&light.light)
        }
        .with_attenuation(light.attenuation, light.cutoff_cos())
    }
}

/// Per-frame data shared by every draw.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct GlobalUniform {
    pub projection: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub eye_position: [f32; 4],
    pub material_ambient: [f32; 4],
    pub material_diffuse: [f32; 4],
    /// Specular color with shininess in `w`.
    pub material_specular: [f32; 4],
    pub directional: LightUniform,
    pub points: [LightUniform; POINT_LIGHT_COUNT],
    pub spot: LightUniform,
}

impl GlobalUniform {
    pub fn from_frame(frame: &FrameState) -> Self {
        let material = &frame.material;
        Self {
            projection: (OPENGL_TO_WGPU * frame.projection).to_cols_array_2d(),
            view: frame.view.to_cols_array_2d(),
            eye_position: frame.eye_position.extend(1.0).into(),
            material_ambient: material.ambient.extend(1.0).into(),
            material_diffuse: material.diffuse.extend(1.0).into(),
            material_specular: material.specular.extend(material.shininess).into(),
            directional: LightUniform::directional(&frame.directional),
            points: frame.point_lights.map(|light| LightUniform::point(&light)),
            spot: LightUniform::spot(&frame.spot),
        }
    }
}

/// Per-draw model transform and flat color.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ObjectConstants {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 3],
    pub color: [f32; 4],
}

impl ObjectConstants {
    pub fn new(model: Mat4, shading: Shading) -> Self {
        let normal = Mat3::from_mat4(model).inverse().transpose();
        let color = match shading {
            Shading::Lit => Vec3::ONE,
            Shading::Unlit(color) => color,
        };
        Self {
            model: model.to_cols_array_2d(),
            normal: mat3_to_3x4(normal),
            color: color.extend(1.0).into(),
        }
    }
}

pub fn mat3_to_3x4(matrix: Mat3) -> [[f32; 4]; 3] {
    let cols = matrix.to_cols_array();
    [
        [cols[0], cols[1], cols[2], 0.0],
        [cols[3], cols[4], cols[5], 0.0],
        [cols[6], cols[7], cols[8], 0.0],
    ]
}

/// A surface that draws frames and owns the overlay's textures.
pub trait FrameTarget {
    type Error;

    fn upload_texture(&mut self, id: TextureId, delta: &ImageDelta);
    fn draw_frame(&mut self, frame: &FrameState, overlay: &OverlayFrame) -> Result<(), Self::Error>;
    fn free_texture(&mut self, id: &TextureId);
}

/// Applies the overlay's texture delta around one draw.
///
/// Uploads run before the draw can fail and frees run after it either way.
/// egui sends its font atlas only once, so a dropped upload is never resent.
pub fn present_frame<T: FrameTarget>(
    target: &mut T,
    frame: &FrameState,
    overlay: &OverlayFrame,
) -> Result<(), T::Error> {
    for (id, delta) in &overlay.textures_delta.set {
        target.upload_texture(*id, delta);
    }
    let result = target.draw_frame(frame, overlay);
    for id in &overlay.textures_delta.free {
        target.free_texture(id);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{Camera, Projection};
    use crate::scene::Scene;
    use egui::{ColorImage, TextureOptions, TexturesDelta};
    use glam::Vec4;

    #[derive(Debug, PartialEq)]
    enum Step {
        Upload(TextureId),
        Draw,
        Free(TextureId),
    }

    struct RecordingTarget {
        steps: Vec<Step>,
        fail_draw: bool,
    }

    impl FrameTarget for RecordingTarget {
        type Error = &'static str;

        fn upload_texture(&mut self, id: TextureId, _delta: &ImageDelta) {
            self.steps.push(Step::Upload(id));
        }

        fn draw_frame(&mut self, _frame: &FrameState, _overlay: &OverlayFrame) -> Result<(), Self::Error> {
            self.steps.push(Step::Draw);
            if self.fail_draw {
                Err("outdated")
            } else {
                Ok(())
            }
        }

        fn free_texture(&mut self, id: &TextureId) {
            self.steps.push(Step::Free(*id));
        }
    }

    fn overlay_with_textures() -> OverlayFrame {
        let mut textures_delta = TexturesDelta::default();
        let atlas = ColorImage::from_rgba_unmultiplied([1, 1], &[255; 4]);
        textures_delta.set.push((
            TextureId::Managed(0),
            ImageDelta::full(atlas, TextureOptions::LINEAR),
        ));
        textures_delta.free.push(TextureId::Managed(1));
        OverlayFrame {
            primitives: Vec::new(),
            textures_delta,
            pixels_per_point: 1.0,
        }
    }

    fn sample_frame() -> FrameState {
        let mut scene = Scene::default();
        scene.update(0.0);
        scene.frame(&Camera::new(1.0))
    }

    #[test]
    fn textures_upload_before_draw_and_free_after() {
        let mut target = RecordingTarget {
            steps: Vec::new(),
            fail_draw: false,
        };
        present_frame(&mut target, &sample_frame(), &overlay_with_textures()).unwrap();
        assert_eq!(
            target.steps,
            vec![
                Step::Upload(TextureId::Managed(0)),
                Step::Draw,
                Step::Free(TextureId::Managed(1)),
            ]
        );
    }

    #[test]
    fn failed_draw_keeps_texture_updates() {
        let mut target = RecordingTarget {
            steps: Vec::new(),
            fail_draw: true,
        };
        let result = present_frame(&mut target, &sample_frame(), &overlay_with_textures());
        assert_eq!(result, Err("outdated"));
        assert_eq!(
            target.steps,
            vec![
                Step::Upload(TextureId::Managed(0)),
                Step::Draw,
                Step::Free(TextureId::Managed(1)),
            ]
        );
    }

    #[test]
    fn uniform_sizes_match_wgsl_layout() {
        assert_eq!(std::mem::size_of::<LightUniform>(), 96);
        assert_eq!(std::mem::size_of::<GlobalUniform>(), 64 * 2 + 16 * 4 + 96 * 4);
        assert_eq!(std::mem::size_of::<ObjectConstants>(), 128);
    }

    #[test]
    fn clip_correction_maps_depth_to_unit_range() {
        let near = OPENGL_TO_WGPU * Vec4::new(0.0, 0.0, -1.0, 1.0);
        let far = OPENGL_TO_WGPU * Vec4::new(0.0, 0.0, 1.0, 1.0);
        assert_eq!(near.z / near.w, 0.0);
        assert_eq!(far.z / far.w, 1.0);
    }

    #[test]
    fn orthographic_frame_stays_inside_clip_volume() {
        let mut scene = Scene::default();
        scene.update(0.0);
        let mut camera = Camera::new(1.5);
        camera.set_projection(Projection::Orthographic);
        let uniform = GlobalUniform::from_frame(&scene.frame(&camera));
        let clip = Mat4::from_cols_array_2d(&uniform.projection)
            * Mat4::from_cols_array_2d(&uniform.view)
            * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let depth = clip.z / clip.w;
        assert!((0.0..=1.0).contains(&depth), "depth {depth} is clipped");
    }

    #[test]
    fn frame_packs_material_and_lights() {
        let mut scene = Scene::default();
        scene.update(0.0);
        let camera = Camera::new(1.0);
        let frame = scene.frame(&camera);
        let uniform = GlobalUniform::from_frame(&frame);

        assert_eq!(uniform.material_specular[3], 32.0);
        assert_eq!(uniform.points[0].position, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(uniform.points[1].attenuation[..3], [1.0, 0.22, 0.20]);
        assert_eq!(uniform.directional.direction, [-0.2, -1.0, -0.3, 0.0]);
        assert!((uniform.spot.attenuation[3] - frame.spot.cutoff_cos()).abs() < 1e-6);
        assert_eq!(uniform.eye_position, [0.0, 0.0, 5.0, 1.0]);
    }

    #[test]
    fn object_constants_use_inverse_transpose_normal() {
        let model = Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0));
        let constants = ObjectConstants::new(model, Shading::Unlit(Vec3::new(1.0, 0.0, 0.0)));
        assert_eq!(constants.normal[0], [0.5, 0.0, 0.0, 0.0]);
        assert_eq!(constants.color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(ObjectConstants::new(model, Shading::Lit).color, [1.0; 4]);
    }
}
