use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Interleaved vertex as uploaded to the GPU.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    /// Texture coordinates, origin top-left.
    pub uv: [f32; 2],
}

/// Indexed triangle mesh with material groups.
///
/// Each group is an index range drawn with its own material; group order is
/// defined by the constructor (see [`card_box`](super::card_box)).
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub groups: Vec<Range<u32>>,
}

impl Mesh {
    /// Appends a quad centered at `center`. `right` and `up` are unit axes of
    /// the texture; the face normal is `right × up` and winding is CCW seen
    /// from the normal side.
    pub(crate) fn push_quad(&mut self, center: Vec3, right: Vec3, up: Vec3, half_w: f32, half_h: f32) {
        let normal = right.cross(up).normalize_or_zero().to_array();
        let base = self.vertices.len() as u32;

        let corners = [
            (center - right * half_w + up * half_h, [0.0, 0.0]),
            (center + right * half_w + up * half_h, [1.0, 0.0]),
            (center + right * half_w - up * half_h, [1.0, 1.0]),
            (center - right * half_w - up * half_h, [0.0, 1.0]),
        ];
        self.vertices.extend(corners.iter().map(|(p, uv)| Vertex {
            position: p.to_array(),
            normal,
            uv: *uv,
        }));
        self.indices
            .extend_from_slice(&[base, base + 3, base + 2, base, base + 2, base + 1]);
    }

    /// Closes a material group covering every index pushed since `start`.
    pub(crate) fn end_group(&mut self, start: u32) {
        self.groups.push(start..self.indices.len() as u32);
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter().map(|v| Vec3::from_array(v.position)))
    }
}

/// Axis-aligned bounds in mesh-local space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub const EMPTY: Aabb = Aabb { min: Vec3::splat(f32::MAX), max: Vec3::splat(f32::MIN) };

    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        points.into_iter().fold(Self::EMPTY, |acc, p| Aabb {
            min: acc.min.min(p),
            max: acc.max.max(p),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Grows thin axes to `min_thickness` so flat quads stay hittable edge-on.
    pub fn thickened(self, min_thickness: f32) -> Self {
        let pad = (Vec3::splat(min_thickness) - self.size()).max(Vec3::ZERO) * 0.5;
        Aabb::new(self.min - pad, self.max + pad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_winding_faces_the_normal() {
        let mut mesh = Mesh::default();
        mesh.push_quad(Vec3::ZERO, Vec3::X, Vec3::Y, 1.0, 1.0);
        assert_eq!(mesh.vertices[0].normal, [0.0, 0.0, 1.0]);

        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3::from_array(mesh.vertices[i as usize].position));
            let n = (b - a).cross(c - a);
            assert!(n.z > 0.0, "triangle {tri:?} is clockwise");
        }
    }

    #[test]
    fn empty_bounds() {
        assert!(Aabb::from_points(std::iter::empty()).is_empty());
        assert!(!Aabb::new(Vec3::ZERO, Vec3::ONE).is_empty());
    }

    #[test]
    fn thickened_pads_flat_axis_only() {
        let b = Aabb::new(Vec3::new(-1.0, -1.5, 0.0), Vec3::new(1.0, 1.5, 0.0)).thickened(0.02);
        assert!((b.size().z - 0.02).abs() < 1e-6);
        assert!((b.size().x - 2.0).abs() < 1e-6);
    }
}
