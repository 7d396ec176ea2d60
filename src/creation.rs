//! Ingestion sessions.
//!
//! A decoder that streams vertices usually sees the same corner position
//! once per incident triangle. [`CreationSession`] exclusively borrows a
//! [`Mesh`] for the duration of such a stream and, when asked to, keeps a
//! [`ConnectivityIndex`] over its nodes so repeated positions collapse onto
//! one node. The index lives exactly as long as the session: it is built in
//! [`Mesh::start_creation`] and released on [`CreationSession::end`] or drop.

use nalgebra::Vector3;

use crate::data::container::FaceData;
use crate::data::kind::FaceDataKey;
use crate::mesh::Mesh;
use crate::mesh_error::{MeshError, MeshResult};
use crate::topology::beam::{Beam, BeamProfile};
use crate::topology::connectivity::ConnectivityIndex;
use crate::topology::face::Face;
use crate::topology::node::Node;

/// Default tolerance under which two positions are the same node.
pub const DEFAULT_NODE_EPSILON: f32 = 1e-4;

/// How a creation session treats incoming nodes.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CreationOptions {
    /// Build a spatial index so coincident nodes can be found.
    pub calculate_connectivity: bool,
    /// Per-axis distance under which two positions coincide.
    pub epsilon: f32,
}

impl Default for CreationOptions {
    fn default() -> Self {
        Self {
            calculate_connectivity: false,
            epsilon: DEFAULT_NODE_EPSILON,
        }
    }
}

impl CreationOptions {
    /// Options with the connectivity index enabled.
    pub fn with_connectivity() -> Self {
        Self {
            calculate_connectivity: true,
            ..Self::default()
        }
    }
}

/// Exclusive authoring access to a mesh.
///
/// Mutations that bypass the session cannot happen while it is alive, so the
/// index never goes stale.
#[derive(Debug)]
pub struct CreationSession<'m> {
    mesh: &'m mut Mesh,
    index: Option<ConnectivityIndex>,
}

impl<'m> CreationSession<'m> {
    pub(crate) fn open(mesh: &'m mut Mesh, options: CreationOptions) -> Self {
        let index = options
            .calculate_connectivity
            .then(|| ConnectivityIndex::from_nodes(options.epsilon, mesh.nodes()));
        log::debug!(
            "creation session opened on {} nodes (connectivity: {})",
            mesh.node_count(),
            index.is_some()
        );
        Self { mesh, index }
    }

    /// Whether node lookups are available.
    #[inline]
    pub fn has_connectivity(&self) -> bool {
        self.index.is_some()
    }

    /// Append a node, recording it in the index when there is one.
    pub fn add_node(&mut self, position: Vector3<f32>) -> MeshResult<Node> {
        let node = self.mesh.add_node(position)?;
        if let Some(index) = self.index.as_mut() {
            index.insert(node.index, position);
        }
        Ok(node)
    }

    /// Existing node within tolerance of `position`, if any.
    ///
    /// # Errors
    /// `ConnectivityUnavailable` if the session was opened without an index.
    pub fn find_node(&self, position: &Vector3<f32>) -> MeshResult<Option<Node>> {
        let index = self
            .index
            .as_ref()
            .ok_or(MeshError::ConnectivityUnavailable)?;
        Ok(index
            .find(position)
            .and_then(|i| self.mesh.node(i))
            .copied())
    }

    /// Existing node within tolerance of `position`, or a new one there.
    ///
    /// # Errors
    /// `ConnectivityUnavailable` if the session was opened without an index;
    /// `CapacityExceeded` if a new node would exceed the limit.
    pub fn find_or_add_node(&mut self, position: Vector3<f32>) -> MeshResult<Node> {
        match self.find_node(&position)? {
            Some(node) => Ok(node),
            None => self.add_node(position),
        }
    }

    /// See [`Mesh::add_face`].
    #[inline]
    pub fn add_face(&mut self, a: u32, b: u32, c: u32) -> MeshResult<Face> {
        self.mesh.add_face(a, b, c)
    }

    /// See [`Mesh::add_beam`].
    #[inline]
    pub fn add_beam(&mut self, a: u32, b: u32, profile: BeamProfile) -> MeshResult<Beam> {
        self.mesh.add_beam(a, b, profile)
    }

    /// See [`Mesh::face_data_mut`].
    #[inline]
    pub fn face_data_mut<T: FaceData>(&mut self, key: FaceDataKey<T>) -> MeshResult<&mut [T]> {
        self.mesh.face_data_mut(key)
    }

    #[inline]
    pub fn node_count(&self) -> u32 {
        self.mesh.node_count()
    }

    #[inline]
    pub fn face_count(&self) -> u32 {
        self.mesh.face_count()
    }

    /// Read-only view of the mesh being built.
    #[inline]
    pub fn mesh(&self) -> &Mesh {
        &*self.mesh
    }

    /// Close the session and release the index.
    pub fn end(self) {}
}

impl Drop for CreationSession<'_> {
    fn drop(&mut self) {
        let released = self.index.take().map_or(0, |index| index.len());
        log::debug!(
            "creation session closed with {} nodes, {} faces ({released} indexed nodes released)",
            self.mesh.node_count(),
            self.mesh.face_count()
        );
    }
}
