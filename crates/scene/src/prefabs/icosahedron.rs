use std::collections::HashMap;

use foundation::math::Vec3;

use crate::components::StandardMaterial;
use crate::mesh::Mesh;
use crate::model::{Model, ModelSource};

const BASE_VERTICES: [[f64; 3]; 12] = {
    const T: f64 = 1.618_033_988_749_895;
    [
        [-1.0, T, 0.0],
        [1.0, T, 0.0],
        [-1.0, -T, 0.0],
        [1.0, -T, 0.0],
        [0.0, -1.0, T],
        [0.0, 1.0, T],
        [0.0, -1.0, -T],
        [0.0, 1.0, -T],
        [T, 0.0, -1.0],
        [T, 0.0, 1.0],
        [-T, 0.0, -1.0],
        [-T, 0.0, 1.0],
    ]
};

const BASE_FACES: [[u32; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// Icosahedron on a sphere of `radius`, each face split `4^detail` ways.
/// Shared edges reuse midpoints, so the mesh stays watertight.
pub fn icosahedron(radius: f64, detail: u32, material: StandardMaterial) -> Mesh {
    let mut verts: Vec<Vec3> = BASE_VERTICES
        .iter()
        .map(|v| Vec3::new(v[0], v[1], v[2]).normalize())
        .collect();
    let mut faces: Vec<[u32; 3]> = BASE_FACES.to_vec();

    for _ in 0..detail {
        let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
        let mut next = Vec::with_capacity(faces.len() * 4);
        for [a, b, c] in faces {
            let ab = midpoint(&mut verts, &mut midpoints, a, b);
            let bc = midpoint(&mut verts, &mut midpoints, b, c);
            let ca = midpoint(&mut verts, &mut midpoints, c, a);
            next.push([a, ab, ca]);
            next.push([b, bc, ab]);
            next.push([c, ca, bc]);
            next.push([ab, bc, ca]);
        }
        faces = next;
    }

    let positions = verts.iter().map(|v| (*v * radius).to_f32()).collect();
    let normals = verts.iter().map(|v| v.to_f32()).collect();
    let indices = faces.into_iter().flatten().collect();
    Mesh::new(positions, Some(normals), indices, material)
}

fn midpoint(
    verts: &mut Vec<Vec3>,
    cache: &mut HashMap<(u32, u32), u32>,
    a: u32,
    b: u32,
) -> u32 {
    let key = if a < b { (a, b) } else { (b, a) };
    if let Some(&idx) = cache.get(&key) {
        return idx;
    }
    let m = ((verts[a as usize] + verts[b as usize]) * 0.5).normalize();
    let idx = verts.len() as u32;
    verts.push(m);
    cache.insert(key, idx);
    idx
}

/// The placeholder shown whenever the configured asset cannot be used.
pub fn fallback_model(radius: f64) -> Model {
    Model::new(
        vec![icosahedron(radius, 1, StandardMaterial::placeholder())],
        ModelSource::Fallback,
    )
}
