use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::math;

/// Position, Euler rotation (radians) and scale of a drawable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    #[serde(default)]
    pub position: Vec3,
    #[serde(default)]
    pub rotation: Vec3,
    #[serde(default = "default_scale")]
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: default_scale(),
        }
    }
}

fn default_scale() -> Vec3 {
    Vec3::ONE
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Model matrix composed as `translate * rotate * scale`.
    pub fn model_matrix(&self) -> Mat4 {
        math::translate(self.position) * math::euler_rotation(self.rotation) * math::scale(self.scale)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Perspective and orthographic matrices cached for a fixed viewport.
///
/// The orthographic box is as tall as the viewport is in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionMatrices {
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub width: u32,
    pub height: u32,
    pub aspect: f32,
    pub perspective: Mat4,
    pub orthographic: Mat4,
}

impl ProjectionMatrices {
    pub fn new(fov: f32, near: f32, far: f32, width: u32, height: u32) -> Self {
        let aspect = width as f32 / height.max(1) as f32;
        Self {
            fov,
            near,
            far,
            width,
            height,
            aspect,
            perspective: math::perspective(fov, aspect, near, far),
            orthographic: math::ortho_sized(height as f32, aspect, near, far),
        }
    }

    /// Widens (or narrows) the field of view and rebuilds the perspective matrix.
    pub fn update_fov(&mut self, delta: f32) {
        self.fov += delta;
        self.perspective = math::perspective(self.fov, self.aspect, self.near, self.far);
    }
}
