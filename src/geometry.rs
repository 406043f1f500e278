use std::f32::consts::TAU;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Radii and tessellation of a torus lying in the XY plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TorusParams {
    /// Distance from the torus center to the center of the tube.
    pub radius: f32,
    /// Radius of the tube.
    pub tube: f32,
    /// Rings around the tube cross-section.
    pub radial_segments: u32,
    /// Segments along the main ring.
    pub tubular_segments: u32,
}

/// Interleaved vertex layout uploaded to the GPU: `position.xyz`,
/// `normal.xyz`, `color.rgb`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

/// Indexed torus mesh with an optional per-vertex color attribute.
///
/// Vertices are laid out ring by ring: for every radial ring `j` there are
/// `tubular_segments + 1` vertices, the last one duplicating the first so the
/// seam can carry its own attributes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TorusGeometry {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    colors: Vec<Vec3>,
    indices: Vec<u32>,
}

impl TorusGeometry {
    pub fn new(params: &TorusParams) -> Self {
        let radial = params.radial_segments;
        let tubular = params.tubular_segments;
        let vertex_count = ((radial + 1) * (tubular + 1)) as usize;

        let mut positions = Vec::with_capacity(vertex_count);
        let mut normals = Vec::with_capacity(vertex_count);

        for j in 0..=radial {
            let v = j as f32 / radial.max(1) as f32 * TAU;
            for i in 0..=tubular {
                let u = i as f32 / tubular.max(1) as f32 * TAU;
                let ring = params.radius + params.tube * v.cos();
                let position = Vec3::new(ring * u.cos(), ring * u.sin(), params.tube * v.sin());
                let center = Vec3::new(params.radius * u.cos(), params.radius * u.sin(), 0.0);
                positions.push(position);
                normals.push((position - center).normalize_or_zero());
            }
        }

        let stride = tubular + 1;
        let mut indices = Vec::with_capacity((radial * tubular * 6) as usize);
        for j in 1..=radial {
            for i in 1..=tubular {
                let a = stride * j + i - 1;
                let b = stride * (j - 1) + i - 1;
                let c = stride * (j - 1) + i;
                let d = stride * j + i;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Self {
            positions,
            normals,
            colors: Vec::new(),
            indices,
        }
    }

    /// Fills the color attribute with the same RGB value for every vertex.
    pub fn set_uniform_color(&mut self, color: Vec3) {
        self.colors.clear();
        self.colors.resize(self.positions.len(), color);
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Interleaves the attributes for upload. Vertices without a color fall
    /// back to white.
    pub fn vertices(&self) -> Vec<Vertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .enumerate()
            .map(|(index, (position, normal))| Vertex {
                position: position.to_array(),
                normal: normal.to_array(),
                color: self.colors.get(index).copied().unwrap_or(Vec3::ONE).to_array(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> TorusParams {
        TorusParams {
            radius: 2.0,
            tube: 1.0,
            radial_segments: 8,
            tubular_segments: 12,
        }
    }

    #[test]
    fn counts_follow_tessellation() {
        let geometry = TorusGeometry::new(&params());
        assert_eq!(geometry.vertex_count(), 9 * 13);
        assert_eq!(geometry.triangle_count(), 8 * 12 * 2);
        let max_index = *geometry.indices().iter().max().unwrap() as usize;
        assert!(max_index < geometry.vertex_count());
    }

    #[test]
    fn outer_equator_sits_at_radius_plus_tube() {
        let geometry = TorusGeometry::new(&params());
        let first = geometry.positions()[0];
        assert!((first - Vec3::new(3.0, 0.0, 0.0)).length() < 1e-5);
        assert!((geometry.normals()[0] - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn every_vertex_lies_on_the_tube_surface() {
        let p = params();
        let geometry = TorusGeometry::new(&p);
        for (position, normal) in geometry.positions().iter().zip(geometry.normals()) {
            let ring = (position.x * position.x + position.y * position.y).sqrt();
            let distance = ((ring - p.radius).powi(2) + position.z * position.z).sqrt();
            assert!((distance - p.tube).abs() < 1e-4);
            assert!((normal.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn uniform_color_covers_every_vertex() {
        let mut geometry = TorusGeometry::new(&params());
        let orange = Vec3::new(0.88, 0.53, 0.29);
        geometry.set_uniform_color(orange);
        assert_eq!(geometry.colors().len(), geometry.vertex_count());
        assert!(geometry.colors().iter().all(|color| *color == orange));
        let vertices = geometry.vertices();
        assert_eq!(vertices.len(), geometry.vertex_count());
        assert_eq!(vertices[5].color, orange.to_array());
    }

    #[test]
    fn uncolored_vertices_default_to_white() {
        let geometry = TorusGeometry::new(&params());
        assert!(geometry.colors().is_empty());
        assert_eq!(geometry.vertices()[0].color, [1.0, 1.0, 1.0]);
    }
}
