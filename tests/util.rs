#![allow(dead_code)]
use fabmesh::prelude::*;
use nalgebra::Vector3;

/// Corners of the unit tetrahedron at the origin.
pub const TETRA_NODES: [[f32; 3]; 4] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
];

/// Outward-wound faces of [`TETRA_NODES`].
pub const TETRA_FACES: [[u32; 3]; 4] = [[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]];

/// Add `nodes` and `faces` to `mesh`, returning the first new node index.
pub fn add_surface(mesh: &mut Mesh, nodes: &[[f32; 3]], faces: &[[u32; 3]]) -> u32 {
    let base = mesh.node_count();
    for &p in nodes {
        mesh.add_node(Vector3::from(p)).unwrap();
    }
    for &[a, b, c] in faces {
        mesh.add_face(base + a, base + b, base + c).unwrap();
    }
    base
}

/// Closed, outward-oriented tetrahedron.
pub fn tetrahedron() -> Mesh {
    let mut mesh = Mesh::new();
    add_surface(&mut mesh, &TETRA_NODES, &TETRA_FACES);
    mesh
}

/// Axis-aligned unit cube as 12 outward-wound triangles.
pub fn cube() -> Mesh {
    let nodes = [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 1.0],
        [1.0, 1.0, 1.0],
        [0.0, 1.0, 1.0],
    ];
    let faces = [
        [0, 2, 1],
        [0, 3, 2],
        [4, 5, 6],
        [4, 6, 7],
        [0, 1, 5],
        [0, 5, 4],
        [1, 2, 6],
        [1, 6, 5],
        [2, 3, 7],
        [2, 7, 6],
        [3, 0, 4],
        [3, 4, 7],
    ];
    let mut mesh = Mesh::new();
    add_surface(&mut mesh, &nodes, &faces);
    mesh
}
