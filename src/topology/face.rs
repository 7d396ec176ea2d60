//! Faces: triangles over the node store.
//!
//! # Invariants
//!
//! - A face's three node indices are pairwise distinct.
//! - Every node index is below the node count at the time the face was
//!   added. Nodes are never removed individually, so this keeps holding.

use itertools::Itertools;

use crate::mesh_error::{Element, MeshError, MeshResult};

/// A triangle, wound `node_indices[0] -> [1] -> [2]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Face {
    pub index: u32,
    pub node_indices: [u32; 3],
}

impl Face {
    /// The three directed edges in winding order.
    pub fn directed_edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.node_indices.iter().copied().circular_tuple_windows()
    }
}

/// Check a candidate triangle against a node count.
///
/// Coincident indices are reported before out-of-range ones.
pub fn validate_face(nodes: [u32; 3], node_count: u32) -> MeshResult<()> {
    let [a, b, c] = nodes;
    if a == b || a == c || b == c {
        return Err(MeshError::DegenerateFace(a, b, c));
    }
    if let Some(&index) = nodes.iter().find(|&&i| i >= node_count) {
        return Err(MeshError::InvalidReference {
            element: Element::Node,
            index,
            count: node_count,
        });
    }
    Ok(())
}

/// Append-only face storage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FaceStore {
    faces: Vec<Face>,
}

impl FaceStore {
    /// Append a validated face, refusing to exceed `max` faces.
    pub fn add(&mut self, nodes: [u32; 3], node_count: u32, max: u32) -> MeshResult<Face> {
        validate_face(nodes, node_count)?;
        let index = self.count();
        if index >= max {
            return Err(MeshError::CapacityExceeded {
                element: Element::Face,
                requested: u64::from(index) + 1,
                max,
            });
        }
        let face = Face {
            index,
            node_indices: nodes,
        };
        self.faces.push(face);
        Ok(face)
    }

    /// Append copies of `faces`, renumbered after the existing ones, with
    /// node indices shifted by `node_offset`.
    ///
    /// The faces must already have been validated against their own nodes.
    pub(crate) fn extend_offset(&mut self, faces: &[Face], node_offset: u32) {
        let base = self.count();
        self.faces.reserve(faces.len());
        self.faces.extend(faces.iter().enumerate().map(|(i, f)| Face {
            index: base + i as u32,
            node_indices: f.node_indices.map(|n| n + node_offset),
        }));
    }

    /// Face at `index`.
    #[inline]
    pub fn get(&self, index: u32) -> Option<&Face> {
        self.faces.get(index as usize)
    }

    /// Face at `index`, or `IndexOutOfRange`.
    pub fn try_get(&self, index: u32) -> MeshResult<&Face> {
        self.get(index).ok_or(MeshError::IndexOutOfRange {
            index,
            len: self.count(),
        })
    }

    /// Number of stored faces.
    #[inline]
    pub fn count(&self) -> u32 {
        self.faces.len() as u32
    }

    /// All faces in index order.
    #[inline]
    pub fn as_slice(&self) -> &[Face] {
        &self.faces
    }

    pub fn clear(&mut self) {
        self.faces.clear();
    }

    /// Store holding `faces` as given, without renumbering or validation.
    #[cfg(test)]
    pub(crate) fn from_raw(faces: Vec<Face>) -> Self {
        Self { faces }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use static_assertions::{assert_eq_align, assert_eq_size};

    assert_eq_size!(Face, [u32; 4]);
    assert_eq_align!(Face, u32);

    #[test]
    fn degenerate_before_out_of_range() {
        assert_eq!(validate_face([5, 5, 1], 3), Err(MeshError::DegenerateFace(5, 5, 1)));
        assert_eq!(validate_face([0, 1, 0], 3), Err(MeshError::DegenerateFace(0, 1, 0)));
        assert_eq!(
            validate_face([0, 1, 3], 3),
            Err(MeshError::InvalidReference {
                element: Element::Node,
                index: 3,
                count: 3
            })
        );
        assert!(validate_face([2, 0, 1], 3).is_ok());
    }

    #[test]
    fn directed_edges_follow_winding() {
        let face = Face {
            index: 0,
            node_indices: [4, 7, 9],
        };
        let edges: Vec<_> = face.directed_edges().collect();
        assert_eq!(edges, vec![(4, 7), (7, 9), (9, 4)]);
    }

    #[test]
    fn add_checks_capacity_after_shape() {
        let mut store = FaceStore::default();
        store.add([0, 1, 2], 3, 1).unwrap();
        assert!(matches!(
            store.add([0, 2, 1], 3, 1),
            Err(MeshError::CapacityExceeded { max: 1, .. })
        ));
        assert!(matches!(
            store.add([0, 0, 1], 3, 1),
            Err(MeshError::DegenerateFace(..))
        ));
    }

    #[test]
    fn extend_offsets_indices() {
        let mut a = FaceStore::default();
        a.add([0, 1, 2], 3, 10).unwrap();
        let mut b = FaceStore::default();
        b.add([2, 1, 0], 3, 10).unwrap();
        a.extend_offset(b.as_slice(), 3);
        assert_eq!(
            a.get(1),
            Some(&Face {
                index: 1,
                node_indices: [5, 4, 3]
            })
        );
    }
}
