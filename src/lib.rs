#![cfg_attr(docsrs, feature(doc_cfg))]
//! # fabmesh
//!
//! fabmesh is the geometry kernel of a 3D-manufacturing model library. It
//! stores triangle meshes and beam lattices, keeps typed per-face data
//! (materials, vertex colors, texture coordinates, ...) in lock-step with the
//! faces, and answers the topological questions a printer pipeline asks of
//! an object before slicing it.
//!
//! ## Features
//! - Append-only node, face and beam stores with configurable capacity limits
//! - Manifold and orientation check over shared directed edges
//! - Epsilon-tolerant node deduplication during ingestion
//! - Type-erased per-face data registry with typed keys
//! - Transform-and-merge of one mesh into another, with resource-id remapping
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! fabmesh = "0.3"
//! # Optional features:
//! # features = ["rayon", "check-invariants"]
//! ```
//!
//! ```
//! use fabmesh::prelude::*;
//! use nalgebra::Vector3;
//!
//! let mut mesh = Mesh::new();
//! for p in [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]] {
//!     mesh.add_node(Vector3::from(p))?;
//! }
//! for [a, b, c] in [[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]] {
//!     mesh.add_face(a, b, c)?;
//! }
//! assert!(mesh.is_manifold_and_oriented());
//! # Ok::<(), fabmesh::mesh_error::MeshError>(())
//! ```
//!
//! ## Invariant checking
//!
//! Structural invariants are re-validated after bulk mutations when
//! `debug_assertions` is on, or when the `check-invariants` feature is
//! enabled in release builds.

pub mod algs;
pub mod creation;
pub mod data;
pub mod debug_invariants;
pub mod geometry;
pub mod mesh;
pub mod mesh_error;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::merge::MergeSource;
    pub use crate::creation::{CreationOptions, CreationSession};
    pub use crate::data::info::{BASE_MATERIAL, NODE_COLOR, TEXTURE_COORDS};
    pub use crate::data::{
        BaseMaterialInfo, DataKind, FaceData, FaceDataKey, FaceDataRegistry, MemoryContainer,
        NodeColorInfo, ResourceIdMap, Rgba, TextureCoordsInfo,
    };
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::mesh::{Mesh, MeshLimits, ObjectType};
    pub use crate::mesh_error::{Element, MeshError, MeshResult};
    pub use crate::topology::{
        Beam, BeamLatticeAttributes, BeamProfile, BeamSet, CapMode, EdgeReport, Face, Node,
    };
}
