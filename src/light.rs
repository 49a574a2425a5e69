//! Phong light sources and surface material.
//!
//! These are plain value types. Color channels are expected in `[0, 1]` but
//! nothing enforces it; out of range values are handed to the shader as is.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Selects one of the three Phong color terms of a [`Light`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LightChannel {
    Ambient,
    Diffuse,
    Specular,
}

/// Ambient, diffuse and specular colors shared by every light kind.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Light {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl Light {
    pub const fn new(ambient: Vec3, diffuse: Vec3, specular: Vec3) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
        }
    }

    pub fn channel(&self, channel: LightChannel) -> Vec3 {
        match channel {
            LightChannel::Ambient => self.ambient,
            LightChannel::Diffuse => self.diffuse,
            LightChannel::Specular => self.specular,
        }
    }

    pub fn set_channel(&mut self, channel: LightChannel, color: Vec3) {
        match channel {
            LightChannel::Ambient => self.ambient = color,
            LightChannel::Diffuse => self.diffuse = color,
            LightChannel::Specular => self.specular = color,
        }
    }
}

/// Distance falloff coefficients of a positional light.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Attenuation {
    pub const fn new(constant: f32, linear: f32, quadratic: f32) -> Self {
        Self {
            constant,
            linear,
            quadratic,
        }
    }

    pub fn from_vec3(values: Vec3) -> Self {
        Self::new(values.x, values.y, values.z)
    }

    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.constant, self.linear, self.quadratic)
    }

    /// Intensity multiplier at `distance`: `1 / (c + l*d + q*d^2)`.
    pub fn factor(&self, distance: f32) -> f32 {
        1.0 / (self.constant + self.linear * distance + self.quadratic * distance * distance)
    }
}

/// Omnidirectional light at a position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointLight {
    pub light: Light,
    pub position: Vec3,
    pub attenuation: Attenuation,
}

impl PointLight {
    pub fn new(light: Light, position: Vec3, attenuation: Attenuation) -> Self {
        Self {
            light,
            position,
            attenuation,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn constant(&self) -> f32 {
        self.attenuation.constant
    }

    pub fn linear(&self) -> f32 {
        self.attenuation.linear
    }

    pub fn quadratic(&self) -> f32 {
        self.attenuation.quadratic
    }
}

/// Light arriving from infinitely far away along `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DirectionalLight {
    pub light: Light,
    pub direction: Vec3,
}

impl DirectionalLight {
    pub fn new(light: Light, direction: Vec3) -> Self {
        Self { light, direction }
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }
}

/// Cone-shaped light with a hard edge at `cutoff_degrees` from its axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpotLight {
    pub light: Light,
    pub position: Vec3,
    pub direction: Vec3,
    pub attenuation: Attenuation,
    pub cutoff_degrees: f32,
}

impl SpotLight {
    /// Cosine of the cutoff angle, the form the fragment shader compares against.
    pub fn cutoff_cos(&self) -> f32 {
        self.cutoff_degrees.to_radians().cos()
    }

    /// Whether `point` lies inside the cone (ignores attenuation).
    pub fn illuminates(&self, point: Vec3) -> bool {
        let to_point = (point - self.position).normalize_or_zero();
        to_point.dot(self.direction.normalize_or_zero()) > self.cutoff_cos()
    }
}

/// Surface response to each Phong term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        let coral = Vec3::new(1.0, 0.5, 0.31);
        Self {
            ambient: coral,
            diffuse: coral,
            specular: coral,
            shininess: 32.0,
        }
    }
}
