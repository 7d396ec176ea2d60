//! `Mesh`: the facade that owns geometry, beams and per-face data together.
//!
//! Every mutation that touches more than one store goes through here so the
//! stores stay consistent: adding a face grows every registered data
//! container by one slot, and merging appends nodes, faces, beams and face
//! data as a single all-or-nothing step.
//!
//! # Invariants
//!
//! - `nodes[i].index == i`, `faces[i].index == i`, `beams[i].index == i`.
//! - Every face and beam references existing, pairwise distinct nodes.
//! - Every registered container holds exactly one value per face.

use nalgebra::{Matrix4, Vector3};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::algs::merge::merge_into;
use crate::creation::{CreationOptions, CreationSession};
use crate::data::container::{FaceData, MemoryContainer};
use crate::data::kind::FaceDataKey;
use crate::data::registry::FaceDataRegistry;
use crate::data::remap::ResourceIdMap;
use crate::debug_invariants::DebugInvariants;
use crate::geometry;
use crate::mesh_error::{Element, MeshError, MeshResult};
use crate::topology::beam::{Beam, BeamLattice, BeamLatticeAttributes, BeamProfile, BeamSet};
use crate::topology::face::{Face, FaceStore, validate_face};
use crate::topology::node::{Node, NodeStore};
use crate::topology::validation::{self, EdgeReport};

/// Largest element count a mesh accepts by default (`2^31 - 1`).
pub const DEFAULT_MAX_ELEMENTS: u32 = 0x7FFF_FFFF;

/// Capacity limits of a mesh.
///
/// Adds beyond a limit fail with `CapacityExceeded`. Lowering a limit below
/// the current count is allowed; [`Mesh::check_sanity`] reports it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MeshLimits {
    pub max_nodes: u32,
    pub max_faces: u32,
    pub max_beams: u32,
}

impl Default for MeshLimits {
    fn default() -> Self {
        Self {
            max_nodes: DEFAULT_MAX_ELEMENTS,
            max_faces: DEFAULT_MAX_ELEMENTS,
            max_beams: DEFAULT_MAX_ELEMENTS,
        }
    }
}

/// Role of the object a mesh belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    #[default]
    Model,
    SolidSupport,
    Support,
    Surface,
    Other,
}

/// Triangle mesh with beam lattice and per-face data.
///
/// Cloning produces a fully independent copy: nodes, faces, beams, beam
/// sets, lattice attributes and every data container.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub(crate) limits: MeshLimits,
    pub(crate) nodes: NodeStore,
    pub(crate) faces: FaceStore,
    pub(crate) lattice: BeamLattice,
    pub(crate) face_data: FaceDataRegistry,
}

impl Mesh {
    /// Empty mesh with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty mesh with the given limits.
    pub fn with_limits(limits: MeshLimits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    #[inline]
    pub fn limits(&self) -> MeshLimits {
        self.limits
    }

    /// Re-declare the capacity limits.
    ///
    /// Existing elements are kept even if they now exceed a limit.
    pub fn set_limits(&mut self, limits: MeshLimits) {
        self.limits = limits;
    }

    // --- geometry -----------------------------------------------------------

    /// Append a node at `position`.
    pub fn add_node(&mut self, position: Vector3<f32>) -> MeshResult<Node> {
        self.nodes.add(position, self.limits.max_nodes)
    }

    /// Append the triangle `(a, b, c)` and give it a default slot in every
    /// registered data container.
    ///
    /// # Errors
    /// `DegenerateFace`, then `InvalidReference`, then `CapacityExceeded`.
    /// Nothing is modified on error.
    pub fn add_face(&mut self, a: u32, b: u32, c: u32) -> MeshResult<Face> {
        self.face_data.validate_face_count(self.faces.count())?;
        let face = self
            .faces
            .add([a, b, c], self.nodes.count(), self.limits.max_faces)?;
        self.face_data.add_face(face.index + 1)?;
        Ok(face)
    }

    /// Append a beam between nodes `a` and `b`.
    pub fn add_beam(&mut self, a: u32, b: u32, profile: BeamProfile) -> MeshResult<Beam> {
        self.lattice
            .add([a, b], profile, self.nodes.count(), self.limits.max_beams)
    }

    /// Append a beam with the lattice's default radius and cap.
    pub fn add_default_beam(&mut self, a: u32, b: u32) -> MeshResult<Beam> {
        let profile = self.lattice.default_profile();
        self.add_beam(a, b, profile)
    }

    /// Append a named beam group.
    pub fn add_beam_set(&mut self, set: BeamSet) -> MeshResult<&BeamSet> {
        self.lattice.add_beam_set(set)
    }

    #[inline]
    pub fn node(&self, index: u32) -> Option<&Node> {
        self.nodes.get(index)
    }

    #[inline]
    pub fn face(&self, index: u32) -> Option<&Face> {
        self.faces.get(index)
    }

    #[inline]
    pub fn beam(&self, index: u32) -> Option<&Beam> {
        self.lattice.get(index)
    }

    #[inline]
    pub fn nodes(&self) -> &[Node] {
        self.nodes.as_slice()
    }

    #[inline]
    pub fn faces(&self) -> &[Face] {
        self.faces.as_slice()
    }

    #[inline]
    pub fn beams(&self) -> &[Beam] {
        self.lattice.beams()
    }

    #[inline]
    pub fn node_count(&self) -> u32 {
        self.nodes.count()
    }

    #[inline]
    pub fn face_count(&self) -> u32 {
        self.faces.count()
    }

    #[inline]
    pub fn beam_count(&self) -> u32 {
        self.lattice.count()
    }

    /// Beam lattice, including beam sets and attributes.
    #[inline]
    pub fn beam_lattice(&self) -> &BeamLattice {
        &self.lattice
    }

    /// Replace the lattice-wide beam defaults.
    pub fn set_lattice_attributes(&mut self, attributes: BeamLatticeAttributes) {
        self.lattice.set_attributes(attributes);
    }

    /// The three corner nodes of face `index`, in winding order.
    pub fn face_nodes(&self, index: u32) -> MeshResult<[&Node; 3]> {
        let face = self.faces.try_get(index)?;
        let [a, b, c] = face.node_indices;
        Ok([
            self.nodes.try_get(a)?,
            self.nodes.try_get(b)?,
            self.nodes.try_get(c)?,
        ])
    }

    /// Unit normal of face `index`.
    ///
    /// # Errors
    /// `IndexOutOfRange` for an unknown face, `ZeroAreaFace` when its corners
    /// are collinear.
    pub fn face_normal(&self, index: u32) -> MeshResult<Vector3<f32>> {
        let [a, b, c] = self.face_nodes(index)?;
        geometry::face_normal(&a.position, &b.position, &c.position)
            .ok_or(MeshError::ZeroAreaFace(index))
    }

    /// Unit normal of every face, `None` for zero-area faces.
    pub fn face_normals(&self) -> Vec<Option<Vector3<f32>>> {
        let normal = |face: &Face| {
            let nodes = self.nodes.as_slice();
            let [a, b, c] = face.node_indices.map(|i| &nodes[i as usize].position);
            geometry::face_normal(a, b, c)
        };
        #[cfg(feature = "rayon")]
        let normals = self.faces.as_slice().par_iter().map(normal).collect();
        #[cfg(not(feature = "rayon"))]
        let normals = self.faces.as_slice().iter().map(normal).collect();
        normals
    }

    // --- validation ---------------------------------------------------------

    /// Whether every element count is within the current limits.
    pub fn check_sanity(&self) -> bool {
        self.nodes.count() <= self.limits.max_nodes
            && self.faces.count() <= self.limits.max_faces
            && self.lattice.count() <= self.limits.max_beams
    }

    /// Whether the faces form a closed, consistently oriented 2-manifold.
    ///
    /// Always `false` for meshes that fail [`check_sanity`](Self::check_sanity).
    pub fn is_manifold_and_oriented(&self) -> bool {
        if !self.check_sanity() {
            log::debug!("manifold check: mesh exceeds its limits");
            return false;
        }
        validation::is_manifold_and_oriented(self.nodes.count(), self.faces.as_slice())
    }

    /// Boundary, non-manifold and misoriented edge counts.
    pub fn edge_report(&self) -> EdgeReport {
        validation::edge_report(self.faces.as_slice())
    }

    /// Whether this mesh is acceptable for an object of type `object_type`.
    ///
    /// Models and solid supports must be closed and oriented; supports and
    /// surfaces may be open but carry no beams.
    pub fn is_valid_for_object_type(&self, object_type: ObjectType) -> bool {
        match object_type {
            ObjectType::Model | ObjectType::SolidSupport => self.is_manifold_and_oriented(),
            ObjectType::Support | ObjectType::Surface => {
                self.check_sanity() && self.lattice.count() == 0
            }
            ObjectType::Other => false,
        }
    }

    // --- face data ----------------------------------------------------------

    /// Register a data container for `key`, pre-filled with one default
    /// value per existing face.
    pub fn register_face_data<T: FaceData>(&mut self, key: FaceDataKey<T>) -> MeshResult<()> {
        let face_count = self.faces.count();
        self.face_data.register(key, face_count).map(|_| ())
    }

    /// Typed, read-only view of the container for `key`.
    pub fn face_data<T: FaceData>(&self, key: FaceDataKey<T>) -> MeshResult<&MemoryContainer<T>> {
        self.face_data.get(key)
    }

    /// The values stored under `key`, one per face, mutable in place.
    pub fn face_data_mut<T: FaceData>(&mut self, key: FaceDataKey<T>) -> MeshResult<&mut [T]> {
        self.face_data.get_mut(key).map(MemoryContainer::as_mut_slice)
    }

    /// Replace the value stored under `key` for face `index`.
    pub fn set_face_data<T: FaceData>(
        &mut self,
        key: FaceDataKey<T>,
        index: u32,
        value: T,
    ) -> MeshResult<()> {
        self.face_data.get_mut(key)?.set_face_data(index, value)
    }

    /// All registered containers.
    #[inline]
    pub fn face_data_registry(&self) -> &FaceDataRegistry {
        &self.face_data
    }

    /// Drop every data container; geometry is kept.
    pub fn clear_face_data(&mut self) {
        self.face_data.clear();
    }

    // --- whole-mesh operations ----------------------------------------------

    /// Open an ingestion session that exclusively borrows this mesh.
    pub fn start_creation(&mut self, options: CreationOptions) -> CreationSession<'_> {
        CreationSession::open(self, options)
    }

    /// Append `source`, moved by `transform`, keeping resource ids as they are.
    pub fn merge(&mut self, source: &Mesh, transform: &Matrix4<f32>) -> MeshResult<()> {
        merge_into(self, source, transform, &ResourceIdMap::identity())
    }

    /// Append `source`, moved by `transform`, translating resource ids in
    /// its face data through `remap`.
    pub fn merge_with(
        &mut self,
        source: &Mesh,
        transform: &Matrix4<f32>,
        remap: &ResourceIdMap,
    ) -> MeshResult<()> {
        merge_into(self, source, transform, remap)
    }

    /// Remove all nodes, faces, beams, beam sets and data containers.
    ///
    /// Limits and lattice attributes are kept.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.faces.clear();
        self.lattice.clear();
        self.face_data.clear();
        self.debug_assert_invariants();
    }
}

impl DebugInvariants for Mesh {
    fn validate_invariants(&self) -> Result<(), MeshError> {
        let node_count = self.nodes.count();
        for (i, node) in self.nodes.as_slice().iter().enumerate() {
            if node.index as usize != i {
                return Err(MeshError::InvalidReference {
                    element: Element::Node,
                    index: node.index,
                    count: node_count,
                });
            }
        }
        for (i, face) in self.faces.as_slice().iter().enumerate() {
            if face.index as usize != i {
                return Err(MeshError::InvalidReference {
                    element: Element::Face,
                    index: face.index,
                    count: self.faces.count(),
                });
            }
            validate_face(face.node_indices, node_count)?;
        }
        self.lattice.validate_invariants()?;
        if let Some(&index) = self
            .lattice
            .beams()
            .iter()
            .flat_map(|b| b.node_indices.iter())
            .find(|&&n| n >= node_count)
        {
            return Err(MeshError::InvalidReference {
                element: Element::Node,
                index,
                count: node_count,
            });
        }
        self.face_data.validate_invariants()?;
        self.face_data.validate_face_count(self.faces.count())
    }
}
