//! Procedural primitives drawn by the demo.
//!
//! Vertices are interleaved as `position.xyz` followed by `normal.xyz`.
//! Triangles wind counter-clockwise when seen from outside the shape.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Floats per interleaved vertex.
pub const VERTEX_STRIDE: usize = 6;

/// GPU ready mesh arrays.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeshData {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> u32 {
        (self.vertices.len() / VERTEX_STRIDE) as u32
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    pub fn position(&self, index: u32) -> Vec3 {
        let start = index as usize * VERTEX_STRIDE;
        Vec3::from_slice(&self.vertices[start..start + 3])
    }

    pub fn normal(&self, index: u32) -> Vec3 {
        let start = index as usize * VERTEX_STRIDE + 3;
        Vec3::from_slice(&self.vertices[start..start + 3])
    }

    fn push_vertex(&mut self, position: Vec3, normal: Vec3) -> u32 {
        let index = self.vertex_count();
        self.vertices.extend_from_slice(&[
            position.x, position.y, position.z, normal.x, normal.y, normal.z,
        ]);
        index
    }

    fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }
}

/// Axis-aligned box centered on the origin with flat per-face normals.
pub fn create_cube(width: f32, height: f32, depth: f32) -> MeshData {
    let half = Vec3::new(width, height, depth) * 0.5;
    // (normal, u, v) with u x v == normal so the quad winds outward.
    let faces = [
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    ];

    let mut mesh = MeshData::default();
    for (normal, u, v) in faces {
        let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
        let base = mesh.vertex_count();
        for (su, sv) in corners {
            let position = (normal + u * su + v * sv) * half;
            mesh.push_vertex(position, normal);
        }
        mesh.push_triangle(base, base + 1, base + 2);
        mesh.push_triangle(base, base + 2, base + 3);
    }
    mesh
}

/// UV sphere with `segments` slices around and `segments` stacks top to bottom.
pub fn create_sphere(radius: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let mut mesh = MeshData::default();

    for row in 0..=segments {
        let phi = PI * row as f32 / segments as f32;
        for col in 0..=segments {
            let theta = TAU * col as f32 / segments as f32;
            let normal = Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            mesh.push_vertex(normal * radius, normal);
        }
    }

    let columns = segments + 1;
    for row in 0..segments {
        for col in 0..segments {
            let a = row * columns + col;
            let b = a + 1;
            let c = a + columns;
            let d = c + 1;
            mesh.push_triangle(a, b, c);
            mesh.push_triangle(b, d, c);
        }
    }
    mesh
}

/// Cone standing on the XZ plane, apex at `+height / 2`, closed base at `-height / 2`.
pub fn create_cone(radius: f32, height: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let apex = Vec3::new(0.0, height * 0.5, 0.0);
    let base_y = -height * 0.5;
    let ring = |theta: f32| Vec3::new(radius * theta.cos(), base_y, radius * theta.sin());
    let slant = |theta: f32| Vec3::new(height * theta.cos(), radius, height * theta.sin()).normalize();

    let mut mesh = MeshData::default();

    // Side: each slice gets its own apex vertex so normals can follow the slant.
    for col in 0..segments {
        let theta0 = TAU * col as f32 / segments as f32;
        let theta1 = TAU * (col + 1) as f32 / segments as f32;
        let b0 = mesh.push_vertex(ring(theta0), slant(theta0));
        let tip = mesh.push_vertex(apex, slant((theta0 + theta1) * 0.5));
        let b1 = mesh.push_vertex(ring(theta1), slant(theta1));
        mesh.push_triangle(b0, tip, b1);
    }

    let center = mesh.push_vertex(Vec3::new(0.0, base_y, 0.0), Vec3::NEG_Y);
    let first = mesh.vertex_count();
    for col in 0..=segments {
        let theta = TAU * col as f32 / segments as f32;
        mesh.push_vertex(ring(theta), Vec3::NEG_Y);
    }
    for col in 0..segments {
        mesh.push_triangle(center, first + col, first + col + 1);
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every non-degenerate triangle must face the same way as its vertex normals.
    fn assert_outward_winding(mesh: &MeshData) {
        assert_eq!(mesh.indices.len() % 3, 0);
        for triangle in mesh.indices.chunks_exact(3) {
            let [a, b, c] = [triangle[0], triangle[1], triangle[2]];
            let face = (mesh.position(b) - mesh.position(a)).cross(mesh.position(c) - mesh.position(a));
            if face.length_squared() < 1e-12 {
                continue;
            }
            let normal = mesh.normal(a) + mesh.normal(b) + mesh.normal(c);
            assert!(
                face.dot(normal) > 0.0,
                "triangle {triangle:?} winds against its normals"
            );
        }
    }

    #[test]
    fn cube_has_four_vertices_per_face() {
        let cube = create_cube(1.0, 2.0, 3.0);
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.index_count(), 36);
        for index in 0..cube.vertex_count() {
            let p = cube.position(index);
            assert_eq!(p.abs(), Vec3::new(0.5, 1.0, 1.5));
        }
        assert_outward_winding(&cube);
    }

    #[test]
    fn sphere_vertices_lie_on_radius() {
        let sphere = create_sphere(0.5, 16);
        assert_eq!(sphere.vertex_count(), 17 * 17);
        assert_eq!(sphere.index_count(), 16 * 16 * 6);
        for index in 0..sphere.vertex_count() {
            assert!((sphere.position(index).length() - 0.5).abs() < 1e-5);
            assert!((sphere.normal(index).length() - 1.0).abs() < 1e-5);
        }
        assert_outward_winding(&sphere);
    }

    #[test]
    fn cone_side_and_base_wind_outward() {
        let cone = create_cone(0.75, 1.0, 32);
        assert_eq!(cone.index_count(), 32 * 3 * 2);
        assert_outward_winding(&cone);
        let top = (0..cone.vertex_count())
            .map(|index| cone.position(index).y)
            .fold(f32::MIN, f32::max);
        assert_eq!(top, 0.5);
    }

    #[test]
    fn segment_count_has_a_floor() {
        assert_eq!(create_sphere(1.0, 0).vertex_count(), 16);
    }

    #[test]
    fn all_indices_are_in_range() {
        for mesh in [
            create_cube(1.0, 1.0, 1.0),
            create_sphere(0.5, 64),
            create_cone(0.75, 1.0, 64),
        ] {
            let count = mesh.vertex_count();
            assert!(mesh.indices.iter().all(|&index| index < count));
        }
    }
}
