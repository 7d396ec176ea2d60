//! Nodes: dense, sequentially indexed vertex positions.

use nalgebra::{Matrix4, Point3, Vector3};

use crate::mesh_error::{Element, MeshError, MeshResult};

/// A mesh vertex. `index` equals the node's position in the store.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Node {
    pub index: u32,
    pub position: Vector3<f32>,
}

/// Append-only node storage.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeStore {
    nodes: Vec<Node>,
}

impl NodeStore {
    /// Append a node at `position`, refusing to exceed `max` nodes.
    pub fn add(&mut self, position: Vector3<f32>, max: u32) -> MeshResult<Node> {
        let index = self.count();
        if index >= max {
            return Err(MeshError::CapacityExceeded {
                element: Element::Node,
                requested: u64::from(index) + 1,
                max,
            });
        }
        let node = Node { index, position };
        self.nodes.push(node);
        Ok(node)
    }

    /// Append copies of `nodes`, renumbered after the existing ones and
    /// moved by `transform` when given.
    ///
    /// Capacity is the caller's responsibility.
    pub(crate) fn extend_transformed(&mut self, nodes: &[Node], transform: Option<&Matrix4<f32>>) {
        let base = self.count();
        self.nodes.reserve(nodes.len());
        self.nodes.extend(nodes.iter().enumerate().map(|(i, n)| Node {
            index: base + i as u32,
            position: match transform {
                Some(m) => m.transform_point(&Point3::from(n.position)).coords,
                None => n.position,
            },
        }));
    }

    /// Node at `index`.
    #[inline]
    pub fn get(&self, index: u32) -> Option<&Node> {
        self.nodes.get(index as usize)
    }

    /// Node at `index`, or `InvalidReference`.
    pub fn try_get(&self, index: u32) -> MeshResult<&Node> {
        self.get(index).ok_or(MeshError::InvalidReference {
            element: Element::Node,
            index,
            count: self.count(),
        })
    }

    /// Number of stored nodes.
    #[inline]
    pub fn count(&self) -> u32 {
        self.nodes.len() as u32
    }

    /// All nodes in index order.
    #[inline]
    pub fn as_slice(&self) -> &[Node] {
        &self.nodes
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}
