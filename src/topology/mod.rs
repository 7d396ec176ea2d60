//! Mesh geometry and its topological checks.
//!
//! - [`node`], [`face`] and [`beam`] hold the append-only element stores.
//! - [`pair_match`] keys unordered index pairs; [`validation`] uses it to
//!   classify edges.
//! - [`connectivity`] answers "is there already a node here" during ingestion.

pub mod beam;
pub mod connectivity;
pub mod face;
pub mod node;
pub mod pair_match;
pub mod validation;

pub use beam::{Beam, BeamLattice, BeamLatticeAttributes, BeamProfile, BeamSet, CapMode};
pub use connectivity::ConnectivityIndex;
pub use face::{Face, FaceStore};
pub use node::{Node, NodeStore};
pub use pair_match::{PairEntry, PairMatch};
pub use validation::{EdgeReport, edge_report, is_manifold_and_oriented};
