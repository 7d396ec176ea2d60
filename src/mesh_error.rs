//! MeshError: Unified error type for fabmesh public APIs
//!
//! Every fallible operation in the crate returns this error. Mutations are
//! validate-then-commit, so receiving an error always means the mesh was left
//! exactly as it was before the call.

use crate::data::kind::DataKind;
use thiserror::Error;

/// Which element family a capacity or reference error is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    /// Mesh nodes (vertices).
    Node,
    /// Triangular faces.
    Face,
    /// Lattice beams.
    Beam,
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Element::Node => "node",
            Element::Face => "face",
            Element::Beam => "beam",
        })
    }
}

/// Unified error type for mesh operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// Appending would push an element count past its configured maximum.
    #[error("capacity exceeded: {requested} {element}s requested, maximum is {max}")]
    CapacityExceeded {
        element: Element,
        requested: u64,
        max: u32,
    },
    /// A node, face or beam index is out of current bounds.
    #[error("invalid {element} reference {index} (count is {count})")]
    InvalidReference {
        element: Element,
        index: u32,
        count: u32,
    },
    /// A face's three node indices are not pairwise distinct.
    #[error("degenerate face: node indices [{0}, {1}, {2}] are not pairwise distinct")]
    DegenerateFace(u32, u32, u32),
    /// A beam connects a node with itself.
    #[error("degenerate beam: both ends reference node {0}")]
    DegenerateBeam(u32),
    /// An auxiliary container's growth does not match the geometry's growth.
    #[error("face count mismatch: expected {expected} faces, container would hold {found}")]
    FaceCountMismatch { expected: u32, found: u32 },
    /// A point query addressed past a container's length.
    #[error("index {index} out of range (length {len})")]
    IndexOutOfRange { index: u32, len: u32 },
    /// No container is registered for the data kind.
    #[error("no face data registered for {0}")]
    UnknownDataKind(DataKind),
    /// A container exists for the kind but stores a different value type.
    #[error("face data for {0} holds a different value type")]
    DataKindMismatch(DataKind),
    /// A container is already registered for the kind.
    #[error("face data for {0} is already registered")]
    DuplicateDataKind(DataKind),
    /// A coincidence query was issued in a creation session opened without connectivity.
    #[error("connectivity index unavailable: creation session was opened without calculate_connectivity")]
    ConnectivityUnavailable,
    /// A face spans no area, so it has no normal.
    #[error("face {0} has zero area")]
    ZeroAreaFace(u32),
}

/// Shorthand used throughout the crate.
pub type MeshResult<T> = Result<T, MeshError>;
