//! Surface grid mesh with per-frame wave displacement.

use bytemuck::{Pod, Zeroable};

use super::field;
use crate::params::{SurfaceGeometry, WaveParams};

/// Vertex data for the surface mesh (local position + UV + normalised elevation)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Local plane coordinates; `position[2]` is the wave displacement
    pub position: [f32; 3],
    pub uv: [f32; 2],
    /// Displacement mapped to `[-1, 1]`, consumed by the fragment shader
    pub elevation: f32,
}

/// Fixed-topology grid; only displacement and elevation change per frame
pub struct SurfaceMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    /// Simulation time the vertices were last evaluated at
    time_s: f32,
}

impl SurfaceMesh {
    /// Build a flat plane in local XY, rows laid out top (+Y) to bottom
    pub fn new(geometry: &SurfaceGeometry) -> Self {
        let segments = geometry.segments.max(1);
        let half_width = geometry.width / 2.0;
        let half_height = geometry.height / 2.0;

        let mut vertices = Vec::with_capacity((segments + 1) * (segments + 1));
        let mut indices = Vec::with_capacity(segments * segments * 6);

        for iy in 0..=segments {
            for ix in 0..=segments {
                let u = ix as f32 / segments as f32;
                let v = iy as f32 / segments as f32;

                vertices.push(Vertex {
                    position: [
                        u * geometry.width - half_width,
                        half_height - v * geometry.height,
                        0.0,
                    ],
                    uv: [u, 1.0 - v],
                    elevation: 0.0,
                });
            }
        }

        // Two triangles per cell, counter-clockwise when viewed from +Z
        let row = segments + 1;
        for iy in 0..segments {
            for ix in 0..segments {
                let a = (iy * row + ix) as u32;
                let b = ((iy + 1) * row + ix) as u32;
                let c = b + 1;
                let d = a + 1;

                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Self {
            vertices,
            indices,
            time_s: 0.0,
        }
    }

    /// Displace every vertex for simulation time `time_s`
    pub fn update(&mut self, time_s: f32, waves: &WaveParams) {
        for vertex in &mut self.vertices {
            let [x, y, _] = vertex.position;
            let (height, elevation) = field::sample(x, y, time_s, waves);
            vertex.position[2] = height;
            vertex.elevation = elevation;
        }
        self.time_s = time_s;
    }

    pub fn time_s(&self) -> f32 {
        self.time_s
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Current displacement of every vertex, in vertex order
    pub fn heights(&self) -> impl Iterator<Item = f32> + '_ {
        self.vertices.iter().map(|v| v.position[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_counts() {
        let geometry = SurfaceGeometry::default();
        let mesh = SurfaceMesh::new(&geometry);

        // (segments + 1)^2 vertices, segments^2 * 2 triangles * 3 indices
        assert_eq!(mesh.vertices.len(), 81 * 81);
        assert_eq!(mesh.indices.len(), 80 * 80 * 6);
        assert!(mesh
            .indices
            .iter()
            .all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn grid_corners_and_uvs() {
        let mesh = SurfaceMesh::new(&SurfaceGeometry::default());
        let first = mesh.vertices[0];
        let last = mesh.vertices[mesh.vertices.len() - 1];

        assert_eq!(first.position, [-7.0, 7.0, 0.0]);
        assert_eq!(first.uv, [0.0, 1.0]);
        assert_eq!(last.position, [7.0, -7.0, 0.0]);
        assert_eq!(last.uv, [1.0, 0.0]);
    }

    #[test]
    fn update_only_touches_displacement() {
        let mut mesh = SurfaceMesh::new(&SurfaceGeometry::default());
        let before = mesh.vertices.clone();
        let indices = mesh.indices.clone();

        mesh.update(2.5, &WaveParams::default());

        assert_eq!(mesh.indices, indices);
        assert_eq!(mesh.time_s(), 2.5);
        for (old, new) in before.iter().zip(&mesh.vertices) {
            assert_eq!(old.position[0], new.position[0]);
            assert_eq!(old.position[1], new.position[1]);
            assert_eq!(old.uv, new.uv);
            assert!((-1.0..=1.0).contains(&new.elevation));
        }
        assert!(mesh.heights().any(|h| h != 0.0));
    }

    #[test]
    fn same_time_same_surface() {
        let waves = WaveParams::default();
        let mut a = SurfaceMesh::new(&SurfaceGeometry::default());
        let mut b = SurfaceMesh::new(&SurfaceGeometry::default());

        a.update(7.25, &waves);
        b.update(1.0, &waves);
        b.update(7.25, &waves);

        assert_eq!(a.vertices, b.vertices);
    }

    #[test]
    fn vertex_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
    }
}
