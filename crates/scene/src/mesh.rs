use foundation::bounds::Aabb3;
use foundation::math::Vec3;

use crate::components::StandardMaterial;

/// Indexed triangle mesh in model space.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    pub material: StandardMaterial,
}

impl Mesh {
    /// Builds a mesh, computing smooth normals when none are supplied.
    pub fn new(
        positions: Vec<[f32; 3]>,
        normals: Option<Vec<[f32; 3]>>,
        indices: Vec<u32>,
        material: StandardMaterial,
    ) -> Self {
        let normals = match normals {
            Some(n) if n.len() == positions.len() => n,
            _ => smooth_normals(&positions, &indices),
        };
        Self {
            positions,
            normals,
            indices,
            material,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn bounds(&self) -> Aabb3 {
        Aabb3::from_points(self.positions.iter().map(|p| Vec3::from_f32(*p)))
    }
}

/// Area-weighted vertex normals. Vertices on no triangle get +Y.
pub fn smooth_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut acc = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }
        let pa = Vec3::from_f32(positions[a]);
        let pb = Vec3::from_f32(positions[b]);
        let pc = Vec3::from_f32(positions[c]);
        let n = (pb - pa).cross(pc - pa);
        acc[a] = acc[a] + n;
        acc[b] = acc[b] + n;
        acc[c] = acc[c] + n;
    }
    acc.into_iter()
        .map(|n| {
            let n = n.normalize();
            if n == Vec3::ZERO { [0.0, 1.0, 0.0] } else { n.to_f32() }
        })
        .collect()
}
