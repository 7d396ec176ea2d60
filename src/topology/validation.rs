//! Manifold and orientation checks over a face list.
//!
//! Every face contributes three directed edges in winding order. A closed,
//! consistently oriented surface uses every undirected edge exactly twice,
//! once in each direction.

use crate::topology::face::Face;
use crate::topology::pair_match::PairMatch;

/// Per-edge traversal counts, indexed by the edge id stored in the pair table.
struct EdgeUsage {
    /// Traversals from the lower to the higher node index.
    forward: Vec<u32>,
    /// Traversals from the higher to the lower node index.
    backward: Vec<u32>,
}

fn edge_usage(faces: &[Face]) -> EdgeUsage {
    let mut pairs = PairMatch::with_capacity(faces.len() * 3 / 2);
    let mut usage = EdgeUsage {
        forward: Vec::new(),
        backward: Vec::new(),
    };
    for face in faces {
        for (u, v) in face.directed_edges() {
            let edge = match pairs.check_match(u, v) {
                Some(edge) => edge as usize,
                None => {
                    let edge = usage.forward.len();
                    pairs.add_match(u, v, edge as u32);
                    usage.forward.push(0);
                    usage.backward.push(0);
                    edge
                }
            };
            if u < v {
                usage.forward[edge] += 1;
            } else {
                usage.backward[edge] += 1;
            }
        }
    }
    usage
}

/// Edge statistics of a face list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EdgeReport {
    /// Distinct undirected edges.
    pub edge_count: usize,
    /// Edges used by a single face.
    pub boundary_edges: usize,
    /// Edges used by more than two faces.
    pub non_manifold_edges: usize,
    /// Edges used by two faces that traverse it in the same direction.
    pub misoriented_edges: usize,
}

impl EdgeReport {
    /// No boundary, no non-manifold and no misoriented edge.
    pub fn is_closed_and_oriented(&self) -> bool {
        self.edge_count > 0
            && self.boundary_edges == 0
            && self.non_manifold_edges == 0
            && self.misoriented_edges == 0
    }
}

/// Classify every undirected edge of `faces`.
pub fn edge_report(faces: &[Face]) -> EdgeReport {
    let usage = edge_usage(faces);
    let mut report = EdgeReport {
        edge_count: usage.forward.len(),
        ..Default::default()
    };
    for (&fwd, &bwd) in usage.forward.iter().zip(&usage.backward) {
        match fwd + bwd {
            1 => report.boundary_edges += 1,
            2 if fwd != 1 => report.misoriented_edges += 1,
            2 => {}
            _ => report.non_manifold_edges += 1,
        }
    }
    report
}

/// Whether `faces` form a closed, consistently oriented 2-manifold.
///
/// Meshes with fewer than three nodes or three faces are too sparse to close
/// and are rejected outright.
pub fn is_manifold_and_oriented(node_count: u32, faces: &[Face]) -> bool {
    if node_count < 3 || faces.len() < 3 {
        log::debug!(
            "manifold check: too sparse ({node_count} nodes, {} faces)",
            faces.len()
        );
        return false;
    }
    let usage = edge_usage(faces);
    let bad = usage
        .forward
        .iter()
        .zip(&usage.backward)
        .position(|(&fwd, &bwd)| fwd != 1 || bwd != 1);
    if let Some(edge) = bad {
        log::debug!(
            "manifold check: edge #{edge} traversed {}x forward, {}x backward",
            usage.forward[edge],
            usage.backward[edge]
        );
        return false;
    }
    true
}
