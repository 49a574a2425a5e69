//! Matrix construction helpers.
//!
//! Every function builds a column-major [`Mat4`] following OpenGL clip-space
//! conventions (right handed, NDC depth in `[-1, 1]`). Degenerate inputs such
//! as `near == far` are not rejected; they produce a degenerate matrix.

use glam::{Mat4, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Up direction shared by the camera and the look-at helper.
pub const WORLD_UP: Vec3 = Vec3::Y;

/// Cartesian axis selector for the single-axis helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Translation by `offset`.
pub fn translate(offset: Vec3) -> Mat4 {
    let mut m = Mat4::IDENTITY;
    m.w_axis = offset.extend(1.0);
    m
}

/// Translation by `distance` along a single axis.
pub fn translate_axis(axis: Axis, distance: f32) -> Mat4 {
    let offset = match axis {
        Axis::X => Vec3::new(distance, 0.0, 0.0),
        Axis::Y => Vec3::new(0.0, distance, 0.0),
        Axis::Z => Vec3::new(0.0, 0.0, distance),
    };
    translate(offset)
}

/// Rotation of `angle` radians around +X.
pub fn rotate_x(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    let mut m = Mat4::IDENTITY;
    m.y_axis = Vec4::new(0.0, c, s, 0.0);
    m.z_axis = Vec4::new(0.0, -s, c, 0.0);
    m
}

/// Rotation of `angle` radians around +Y.
pub fn rotate_y(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    let mut m = Mat4::IDENTITY;
    m.x_axis = Vec4::new(c, 0.0, -s, 0.0);
    m.z_axis = Vec4::new(s, 0.0, c, 0.0);
    m
}

/// Rotation of `angle` radians around +Z.
pub fn rotate_z(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    let mut m = Mat4::IDENTITY;
    m.x_axis = Vec4::new(c, s, 0.0, 0.0);
    m.y_axis = Vec4::new(-s, c, 0.0, 0.0);
    m
}

pub fn rotate(axis: Axis, angle: f32) -> Mat4 {
    match axis {
        Axis::X => rotate_x(angle),
        Axis::Y => rotate_y(angle),
        Axis::Z => rotate_z(angle),
    }
}

/// Euler rotation composed as `X * Y * Z` (Z is applied first).
pub fn euler_rotation(angles: Vec3) -> Mat4 {
    rotate(Axis::X, angles.x) * rotate(Axis::Y, angles.y) * rotate(Axis::Z, angles.z)
}

/// Non-uniform scale.
pub fn scale(factors: Vec3) -> Mat4 {
    Mat4::from_diagonal(factors.extend(1.0))
}

/// Scale along a single axis, leaving the other two untouched.
pub fn scale_axis(axis: Axis, factor: f32) -> Mat4 {
    let factors = match axis {
        Axis::X => Vec3::new(factor, 1.0, 1.0),
        Axis::Y => Vec3::new(1.0, factor, 1.0),
        Axis::Z => Vec3::new(1.0, 1.0, factor),
    };
    scale(factors)
}

/// Orthographic projection of the box `[left, right] x [bottom, top] x [-near, -far]`.
pub fn ortho(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    let mut m = Mat4::IDENTITY;
    m.x_axis.x = 2.0 / (right - left);
    m.y_axis.y = 2.0 / (top - bottom);
    m.z_axis.z = -2.0 / (far - near);
    m.w_axis.x = -(right + left) / (right - left);
    m.w_axis.y = -(top + bottom) / (top - bottom);
    m.w_axis.z = -(far + near) / (far - near);
    m
}

/// Symmetric orthographic projection `height` units tall, `aspect * height` wide.
pub fn ortho_sized(height: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let top = height / 2.0;
    let right = aspect * height / 2.0;
    ortho(-right, right, -top, top, near, far)
}

/// Perspective projection with a vertical field of view given in degrees.
pub fn perspective(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let c = (fov_degrees.to_radians() / 2.0).tan();
    let mut m = Mat4::IDENTITY;
    m.x_axis.x = 1.0 / (aspect * c);
    m.y_axis.y = 1.0 / c;
    m.z_axis.z = -(far + near) / (far - near);
    m.z_axis.w = -1.0;
    m.w_axis.z = -(2.0 * far * near) / (far - near);
    m.w_axis.w = 0.0;
    m
}

/// World-to-camera transform for an eye at `eye` looking at `target`.
///
/// The camera basis is built from `f = normalize(eye - target)`,
/// `r = normalize(up x f)` and `u = f x r`; those vectors become the rows of
/// the rotation, which is then applied after translating by `-eye`.
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let f = (eye - target).normalize();
    let r = up.cross(f).normalize();
    let u = f.cross(r).normalize();

    let rotation = Mat4::from_cols(
        Vec4::new(r.x, u.x, f.x, 0.0),
        Vec4::new(r.y, u.y, f.y, 0.0),
        Vec4::new(r.z, u.z, f.z, 0.0),
        Vec4::W,
    );
    rotation * translate(-eye)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1e-5;

    fn project(m: Mat4, point: Vec3) -> Vec3 {
        let clip = m * point.extend(1.0);
        clip.truncate() / clip.w
    }

    #[test]
    fn translate_moves_points_but_not_directions() {
        let m = translate(Vec3::new(1.0, -2.0, 3.0));
        assert_eq!(m.transform_point3(Vec3::ZERO), Vec3::new(1.0, -2.0, 3.0));
        assert_eq!(m.transform_vector3(Vec3::X), Vec3::X);
        assert_eq!(translate_axis(Axis::Y, 4.0), translate(Vec3::new(0.0, 4.0, 0.0)));
    }

    #[test]
    fn axis_rotations_agree_with_glam() {
        for angle in [0.3_f32, -1.2, 2.5] {
            assert!(rotate_x(angle).abs_diff_eq(Mat4::from_rotation_x(angle), EPS));
            assert!(rotate_y(angle).abs_diff_eq(Mat4::from_rotation_y(angle), EPS));
            assert!(rotate_z(angle).abs_diff_eq(Mat4::from_rotation_z(angle), EPS));
        }
    }

    #[test]
    fn quarter_turns_follow_right_hand_rule() {
        assert!(rotate(Axis::Z, FRAC_PI_2)
            .transform_vector3(Vec3::X)
            .abs_diff_eq(Vec3::Y, EPS));
        assert!(rotate(Axis::X, FRAC_PI_2)
            .transform_vector3(Vec3::Y)
            .abs_diff_eq(Vec3::Z, EPS));
        assert!(rotate(Axis::Y, FRAC_PI_2)
            .transform_vector3(Vec3::Z)
            .abs_diff_eq(Vec3::X, EPS));
    }

    #[test]
    fn euler_rotation_applies_z_first() {
        let angles = Vec3::new(0.4, -0.7, 1.1);
        let expected = Mat4::from_rotation_x(angles.x)
            * Mat4::from_rotation_y(angles.y)
            * Mat4::from_rotation_z(angles.z);
        assert!(euler_rotation(angles).abs_diff_eq(expected, EPS));
        assert_eq!(euler_rotation(Vec3::ZERO), Mat4::IDENTITY);
    }

    #[test]
    fn scale_helpers_build_diagonals() {
        let m = scale(Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(m.transform_point3(Vec3::ONE), Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(scale_axis(Axis::Z, 5.0), scale(Vec3::new(1.0, 1.0, 5.0)));
    }

    #[test]
    fn perspective_maps_near_and_far_planes_to_ndc_bounds() {
        let (near, far) = (0.5, 50.0);
        let m = perspective(60.0, 16.0 / 9.0, near, far);
        assert!((project(m, Vec3::new(0.0, 0.0, -near)).z + 1.0).abs() < EPS);
        assert!((project(m, Vec3::new(0.0, 0.0, -far)).z - 1.0).abs() < 1e-4);
    }

    #[test]
    fn perspective_matches_glam_gl_convention() {
        let m = perspective(75.0, 1.5, 0.1, 100.0);
        let expected = Mat4::perspective_rh_gl(75.0_f32.to_radians(), 1.5, 0.1, 100.0);
        assert!(m.abs_diff_eq(expected, EPS));
    }

    #[test]
    fn ortho_matches_glam_and_maps_box_corners() {
        let m = ortho(-4.0, 2.0, -1.0, 3.0, 0.1, 10.0);
        let expected = Mat4::orthographic_rh_gl(-4.0, 2.0, -1.0, 3.0, 0.1, 10.0);
        assert!(m.abs_diff_eq(expected, EPS));
        assert!(project(m, Vec3::new(2.0, 3.0, -10.0)).abs_diff_eq(Vec3::ONE, EPS));
        assert!(project(m, Vec3::new(-4.0, -1.0, -0.1)).abs_diff_eq(Vec3::NEG_ONE, EPS));
    }

    #[test]
    fn ortho_sized_is_symmetric() {
        let m = ortho_sized(7.5, 2.0, 0.001, 1000.0);
        assert!(m.abs_diff_eq(ortho(-7.5, 7.5, -3.75, 3.75, 0.001, 1000.0), EPS));
    }

    #[test]
    fn look_at_moves_eye_to_origin_and_target_down_negative_z() {
        let eye = Vec3::new(3.0, 2.0, 5.0);
        let target = Vec3::new(-1.0, 0.5, 0.0);
        let view = look_at(eye, target, WORLD_UP);

        assert!(view.transform_point3(eye).abs_diff_eq(Vec3::ZERO, EPS));
        let distance = (target - eye).length();
        assert!(view
            .transform_point3(target)
            .abs_diff_eq(Vec3::new(0.0, 0.0, -distance), 1e-4));
        assert!(view.abs_diff_eq(Mat4::look_at_rh(eye, target, WORLD_UP), EPS));
    }

    #[test]
    fn look_at_translation_is_negated_rotated_eye() {
        let eye = Vec3::new(0.0, 1.0, 5.0);
        let forward = Vec3::new(0.2, -0.1, -1.0).normalize();
        let view = look_at(eye, eye + forward, WORLD_UP);
        let rotation = glam::Mat3::from_mat4(view);
        assert!(view.w_axis.truncate().abs_diff_eq(-(rotation * eye), EPS));
    }

    #[test]
    fn degenerate_inputs_do_not_panic() {
        let m = perspective(60.0, 1.0, 1.0, 1.0);
        assert!(!m.z_axis.z.is_finite());
        let view = look_at(Vec3::ONE, Vec3::ONE, WORLD_UP);
        assert!(view.x_axis.x.is_nan());
    }
}
