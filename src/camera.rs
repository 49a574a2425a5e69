use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::math::{self, WORLD_UP};

const DEFAULT_POSITION: Vec3 = Vec3::new(0.0, 0.0, 5.0);
const DEFAULT_YAW: f32 = -90.0;
const DEFAULT_PITCH: f32 = 0.0;
const PITCH_LIMIT: f32 = 89.9;
const MAX_FOV: f32 = 180.0;

/// Projection used by [`Camera::projection_matrix`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Projection {
    #[default]
    Perspective,
    Orthographic,
}

impl Projection {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "perspective" => Some(Self::Perspective),
            "orthographic" | "ortho" => Some(Self::Orthographic),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Perspective => "perspective",
            Self::Orthographic => "orthographic",
        }
    }
}

/// Free-flying yaw/pitch camera. Angles are stored in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    position: Vec3,
    yaw: f32,
    pitch: f32,
    fov: f32,
    near_plane: f32,
    far_plane: f32,
    ortho_size: f32,
    projection: Projection,
    move_speed: f32,
    zoom_speed: f32,
    aspect_ratio: f32,
}

impl Camera {
    pub fn new(aspect_ratio: f32) -> Self {
        Self {
            position: DEFAULT_POSITION,
            yaw: DEFAULT_YAW,
            pitch: DEFAULT_PITCH,
            fov: 60.0,
            near_plane: 0.001,
            far_plane: 1000.0,
            ortho_size: 7.5,
            projection: Projection::Perspective,
            move_speed: 5.0,
            zoom_speed: 3.0,
            aspect_ratio,
        }
    }

    pub fn with_planes(mut self, near_plane: f32, far_plane: f32) -> Self {
        self.near_plane = near_plane;
        self.far_plane = far_plane;
        self
    }

    pub fn with_ortho_size(mut self, ortho_size: f32) -> Self {
        self.ortho_size = ortho_size;
        self
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn add_position(&mut self, offset: Vec3) {
        self.position += offset;
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
    }

    pub fn add_yaw(&mut self, delta: f32) {
        self.yaw += delta;
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch;
    }

    pub fn add_pitch(&mut self, delta: f32) {
        self.pitch += delta;
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov;
    }

    pub fn add_fov(&mut self, delta: f32) {
        self.fov += delta;
    }

    pub fn near_plane(&self) -> f32 {
        self.near_plane
    }

    pub fn far_plane(&self) -> f32 {
        self.far_plane
    }

    pub fn ortho_size(&self) -> f32 {
        self.ortho_size
    }

    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    pub fn set_move_speed(&mut self, move_speed: f32) {
        self.move_speed = move_speed;
    }

    pub fn zoom_speed(&self) -> f32 {
        self.zoom_speed
    }

    /// Field-of-view degrees removed per scroll click.
    pub fn set_zoom_speed(&mut self, zoom_speed: f32) {
        self.zoom_speed = zoom_speed;
    }

    /// Unit view direction derived from yaw and pitch.
    pub fn forward(&self) -> Vec3 {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(WORLD_UP).normalize()
    }

    /// Camera-relative vertical axis used by the up/down movement keys.
    pub fn local_up(&self) -> Vec3 {
        self.right().cross(self.forward()).normalize()
    }

    pub fn view_matrix(&self) -> Mat4 {
        math::look_at(self.position, self.position + self.forward(), WORLD_UP)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        match self.projection {
            Projection::Orthographic => math::ortho_sized(
                self.ortho_size,
                self.aspect_ratio,
                self.near_plane,
                self.far_plane,
            ),
            Projection::Perspective => math::perspective(
                self.fov,
                self.aspect_ratio,
                self.near_plane,
                self.far_plane,
            ),
        }
    }

    /// Applies a mouse delta in pixels; pitch stays short of straight up/down.
    pub fn look(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        self.yaw += dx * sensitivity;
        self.pitch = (self.pitch - dy * sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Narrows the field of view for positive scroll, clamped to `[0, 180]`.
    pub fn zoom(&mut self, scroll: f32) {
        if scroll == 0.0 {
            return;
        }
        self.fov = (self.fov - scroll * self.zoom_speed).clamp(0.0, MAX_FOV);
    }

    /// Moves along forward/right/local-up; each axis is expected in `[-1, 1]`.
    pub fn fly(&mut self, forward_axis: f32, right_axis: f32, up_axis: f32, dt: f32) {
        let amount = self.move_speed * dt;
        let forward = self.forward();
        let right = forward.cross(WORLD_UP).normalize();
        let up = right.cross(forward).normalize();
        self.position += forward * forward_axis * amount;
        self.position += right * right_axis * amount;
        self.position += up * up_axis * amount;
    }

    /// Returns position and orientation to their start values.
    pub fn reset(&mut self) {
        self.position = DEFAULT_POSITION;
        self.yaw = DEFAULT_YAW;
        self.pitch = DEFAULT_PITCH;
    }
}
