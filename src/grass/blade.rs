//! Template blade geometry shared by every grass instance.

use std::f32::consts::FRAC_PI_2;

use bytemuck::{Pod, Zeroable};
use glam::{Quat, Vec2, Vec3};

use crate::core::{Error, Result};

/// Interleaved blade vertex. Locations 0..=2 of the grass pipeline.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct BladeVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    // Total: 32 bytes
}

/// A narrow vertical strip, bent so the tip curls away from the root.
///
/// Rows run from the root to the tip, two vertices per row. Texture rows are
/// stored top first, so the root samples `v = 1` and the tip `v = 0`. The root is turned a quarter revolution about Y and each row blends
/// toward a fixed lean as it rises, which is what gives blades their curve.
#[derive(Clone, Debug)]
pub struct BladeMesh {
    height: f32,
    vertices: Vec<BladeVertex>,
    indices: Vec<u16>,
}

impl BladeMesh {
    pub fn new(width: f32, height: f32, joints: u32) -> Result<Self> {
        if joints == 0 || !(width > 0.0) || !(height > 0.0) {
            return Err(Error::Config(format!(
                "blade needs positive width, height and joints (got {} / {} / {})",
                width, height, joints
            )));
        }
        if (joints + 1) * 2 > u16::MAX as u32 {
            return Err(Error::Config(format!("too many blade joints: {}", joints)));
        }

        let root = Quat::from_rotation_y(FRAC_PI_2);
        let lean = Quat::from_rotation_y(0.05) * Quat::from_rotation_x(0.3) * Quat::from_rotation_z(0.1);
        let half = width * 0.5;

        let mut positions = Vec::with_capacity(((joints + 1) * 2) as usize);
        let mut uvs = Vec::with_capacity(positions.capacity());
        for row in 0..=joints {
            let t = row as f32 / joints as f32;
            let y = t * height;
            let bend = root.slerp(lean, t);
            for (u, x) in [(0.0, -half), (1.0, half)] {
                positions.push(bend * Vec3::new(x, y, 0.0));
                uvs.push(Vec2::new(u, 1.0 - t));
            }
        }

        let mut indices = Vec::with_capacity((joints * 6) as usize);
        for row in 0..joints as u16 {
            let bl = row * 2;
            let br = bl + 1;
            let tl = bl + 2;
            let tr = bl + 3;
            indices.extend_from_slice(&[bl, br, tl, br, tr, tl]);
        }

        let normals = vertex_normals(&positions, &indices);
        let vertices = positions
            .iter()
            .zip(&normals)
            .zip(&uvs)
            .map(|((p, n), uv)| BladeVertex {
                position: p.to_array(),
                normal: n.to_array(),
                uv: uv.to_array(),
            })
            .collect();

        Ok(Self { height, vertices, indices })
    }

    pub fn from_config(config: &super::GrassConfig) -> Result<Self> {
        Self::new(config.blade_width, config.blade_height, config.joints)
    }

    /// Unscaled blade height; the vertex stage divides by it to get the
    /// fraction along the blade.
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn vertices(&self) -> &[BladeVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }
}

/// Area-weighted smooth normals.
fn vertex_normals(positions: &[Vec3], indices: &[u16]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let n = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        normals[a] += n;
        normals[b] += n;
        normals[c] += n;
    }
    normals.into_iter().map(|n| n.normalize_or(Vec3::Z)).collect()
}
