//! ConnectivityIndex: spatial hash over node positions.
//!
//! Used while geometry is authored to find an existing node at (almost) the
//! same position as a new one, so shared vertices are stored once. The index
//! is owned by a [`CreationSession`](crate::creation::CreationSession) and
//! never outlives it.
//!
//! Positions are bucketed into cubic cells of edge `epsilon`. Two positions
//! coincide when they differ by at most `epsilon` on every axis, which
//! places them in the same or an adjacent cell; a query therefore inspects
//! the 27 cells around the probe.

use hashbrown::HashMap;
use itertools::iproduct;
use nalgebra::Vector3;

use crate::topology::node::Node;

type CellKey = [i64; 3];

/// Spatial hash from cell to the nodes stored in it.
#[derive(Debug)]
pub struct ConnectivityIndex {
    epsilon: f32,
    inv_cell: f32,
    cells: HashMap<CellKey, Vec<(u32, Vector3<f32>)>>,
    len: usize,
}

impl ConnectivityIndex {
    /// Empty index with coincidence tolerance `epsilon`.
    ///
    /// Non-positive or non-finite tolerances fall back to `f32::EPSILON`.
    pub fn new(epsilon: f32) -> Self {
        let epsilon = if epsilon.is_finite() && epsilon > 0.0 {
            epsilon
        } else {
            f32::EPSILON
        };
        Self {
            epsilon,
            inv_cell: 1.0 / epsilon,
            cells: HashMap::new(),
            len: 0,
        }
    }

    /// Index built from existing nodes.
    pub fn from_nodes(epsilon: f32, nodes: &[Node]) -> Self {
        let mut index = Self::new(epsilon);
        index.cells.reserve(nodes.len());
        for node in nodes {
            index.insert(node.index, node.position);
        }
        index
    }

    #[inline]
    fn cell_of(&self, p: &Vector3<f32>) -> CellKey {
        [
            (p.x * self.inv_cell).floor() as i64,
            (p.y * self.inv_cell).floor() as i64,
            (p.z * self.inv_cell).floor() as i64,
        ]
    }

    /// Record node `index` at `position`. Amortized O(1).
    pub fn insert(&mut self, index: u32, position: Vector3<f32>) {
        let key = self.cell_of(&position);
        self.cells.entry(key).or_default().push((index, position));
        self.len += 1;
    }

    /// Lowest node index within `epsilon` of `position` on every axis.
    ///
    /// Cell coordinates saturate at the `i64` range, so positions far beyond
    /// `epsilon * i64::MAX` share the outermost cells.
    pub fn find(&self, position: &Vector3<f32>) -> Option<u32> {
        let [cx, cy, cz] = self.cell_of(position);
        iproduct!(-1..=1i64, -1..=1i64, -1..=1i64)
            .map(|(dx, dy, dz)| {
                [
                    cx.saturating_add(dx),
                    cy.saturating_add(dy),
                    cz.saturating_add(dz),
                ]
            })
            .filter_map(|key| self.cells.get(&key))
            .flatten()
            .filter(|(_, q)| (q - position).iter().all(|d| d.abs() <= self.epsilon))
            .map(|&(index, _)| index)
            .min()
    }

    /// Coincidence tolerance.
    #[inline]
    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Number of indexed nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_within_tolerance_across_cell_borders() {
        let mut index = ConnectivityIndex::new(0.01);
        index.insert(0, Vector3::new(0.0099, 0.0, 0.0));
        // sits in the next cell along x but within epsilon
        assert_eq!(index.find(&Vector3::new(0.0101, 0.0, 0.0)), Some(0));
        assert_eq!(index.find(&Vector3::new(0.03, 0.0, 0.0)), None);
    }

    #[test]
    fn negative_coordinates_and_lowest_index() {
        let mut index = ConnectivityIndex::new(0.001);
        index.insert(3, Vector3::new(-1.0, -2.0, -3.0));
        index.insert(1, Vector3::new(-1.0, -2.0, -3.0));
        assert_eq!(index.find(&Vector3::new(-1.0005, -2.0, -3.0)), Some(1));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn built_from_nodes() {
        let nodes = [
            Node {
                index: 0,
                position: Vector3::new(1.0, 1.0, 1.0),
            },
            Node {
                index: 1,
                position: Vector3::new(2.0, 1.0, 1.0),
            },
        ];
        let index = ConnectivityIndex::from_nodes(1e-4, &nodes);
        assert_eq!(index.find(&Vector3::new(2.0, 1.0, 1.0)), Some(1));
        assert_eq!(index.find(&Vector3::new(1.5, 1.0, 1.0)), None);
    }

    #[test]
    fn huge_and_infinite_coordinates_stay_in_edge_cells() {
        let mut index = ConnectivityIndex::new(1e-4);
        index.insert(0, Vector3::new(1.0e20, 0.0, 0.0));
        index.insert(1, Vector3::new(-1.0e20, 0.0, 0.0));
        index.insert(2, Vector3::new(f32::INFINITY, 0.0, 0.0));
        assert_eq!(index.find(&Vector3::new(1.0e20, 0.0, 0.0)), Some(0));
        assert_eq!(index.find(&Vector3::new(-1.0e20, 0.0, 0.0)), Some(1));
        assert_eq!(index.find(&Vector3::new(0.0, 1.0e20, -1.0e20)), None);
        // inf - inf is NaN, which never compares within tolerance
        assert_eq!(index.find(&Vector3::new(f32::INFINITY, 0.0, 0.0)), None);
        assert_eq!(index.find(&Vector3::new(f32::NEG_INFINITY, 0.0, 0.0)), None);
    }

    #[test]
    fn invalid_tolerance_falls_back() {
        assert_eq!(ConnectivityIndex::new(-1.0).epsilon(), f32::EPSILON);
        assert_eq!(ConnectivityIndex::new(f32::NAN).epsilon(), f32::EPSILON);
    }
}
