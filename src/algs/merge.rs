//! Transform-and-append of one mesh into another.
//!
//! The source is treated as untrusted: its counts are checked against the
//! target's limits and every face and beam is re-validated against the
//! source's own nodes before anything is written. Only then are nodes
//! (transformed), faces and beams (offset) and face data (remapped) appended.
//! On error the target is unchanged.

use nalgebra::Matrix4;

use crate::data::registry::FaceDataRegistry;
use crate::data::remap::ResourceIdMap;
use crate::debug_invariants::DebugInvariants;
use crate::geometry::transform::has_transform;
use crate::mesh::Mesh;
use crate::mesh_error::{Element, MeshError, MeshResult};
use crate::topology::beam::{Beam, validate_beam};
use crate::topology::face::{Face, validate_face};
use crate::topology::node::Node;

/// Anything that can be appended to a [`Mesh`].
///
/// `Mesh` itself implements it; decoders can implement it over their own
/// buffers to merge without building an intermediate mesh. Element `index`
/// fields are ignored, elements are renumbered on append.
pub trait MergeSource {
    fn nodes(&self) -> &[Node];
    fn faces(&self) -> &[Face];

    fn beams(&self) -> &[Beam] {
        &[]
    }

    /// Per-face data whose containers each hold one value per source face.
    fn face_data(&self) -> Option<&FaceDataRegistry> {
        None
    }
}

impl MergeSource for Mesh {
    fn nodes(&self) -> &[Node] {
        Mesh::nodes(self)
    }

    fn faces(&self) -> &[Face] {
        Mesh::faces(self)
    }

    fn beams(&self) -> &[Beam] {
        Mesh::beams(self)
    }

    fn face_data(&self) -> Option<&FaceDataRegistry> {
        Some(self.face_data_registry())
    }
}

fn check_capacity(element: Element, current: u32, added: usize, max: u32) -> MeshResult<u32> {
    let requested = u64::from(current) + added as u64;
    if requested > u64::from(max) {
        return Err(MeshError::CapacityExceeded {
            element,
            requested,
            max,
        });
    }
    Ok(added as u32)
}

/// Append `source` to `target`, moving its nodes by `transform` and passing
/// its face data through `remap`.
///
/// # Errors
/// - `CapacityExceeded` if any combined count exceeds `target`'s limits.
/// - `DegenerateFace` / `DegenerateBeam` / `InvalidReference` for a malformed
///   source element.
/// - `FaceCountMismatch` if a source container is not sized to its faces.
/// - `DataKindMismatch` if a kind is registered on both sides with different
///   value types.
pub fn merge_into<S: MergeSource + ?Sized>(
    target: &mut Mesh,
    source: &S,
    transform: &Matrix4<f32>,
    remap: &ResourceIdMap,
) -> MeshResult<()> {
    let limits = target.limits;
    let src_nodes = check_capacity(
        Element::Node,
        target.nodes.count(),
        source.nodes().len(),
        limits.max_nodes,
    )?;
    let src_faces = check_capacity(
        Element::Face,
        target.faces.count(),
        source.faces().len(),
        limits.max_faces,
    )?;
    check_capacity(
        Element::Beam,
        target.lattice.count(),
        source.beams().len(),
        limits.max_beams,
    )?;

    for face in source.faces() {
        validate_face(face.node_indices, src_nodes)?;
    }
    for beam in source.beams() {
        validate_beam(beam.node_indices, src_nodes)?;
    }
    target.face_data.validate_face_count(target.faces.count())?;
    let empty = FaceDataRegistry::new();
    let src_data = source.face_data().unwrap_or(&empty);
    target.face_data.check_merge(src_data, src_faces)?;

    let node_offset = target.nodes.count();
    let face_offset = target.faces.count();
    let moved = has_transform(transform).then_some(transform);
    target.nodes.extend_transformed(source.nodes(), moved);
    target.faces.extend_offset(source.faces(), node_offset);
    target.lattice.extend_offset(source.beams(), node_offset);
    target
        .face_data
        .commit_merge(src_data, face_offset, src_faces, remap)?;

    log::debug!(
        "merged {src_nodes} nodes, {src_faces} faces, {} beams{}",
        source.beams().len(),
        if moved.is_some() { " (transformed)" } else { "" }
    );
    target.debug_assert_invariants();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MeshLimits;
    use nalgebra::Vector3;

    struct Raw {
        nodes: Vec<Node>,
        faces: Vec<Face>,
    }

    impl MergeSource for Raw {
        fn nodes(&self) -> &[Node] {
            &self.nodes
        }

        fn faces(&self) -> &[Face] {
            &self.faces
        }
    }

    fn node(x: f32) -> Node {
        Node {
            index: 0,
            position: Vector3::new(x, 0.0, 0.0),
        }
    }

    fn face(node_indices: [u32; 3]) -> Face {
        Face {
            index: 0,
            node_indices,
        }
    }

    #[test]
    fn empty_and_node_only_sources_merge() {
        let mut target = Mesh::new();
        let id = Matrix4::identity();
        let empty = Raw {
            nodes: vec![],
            faces: vec![],
        };
        merge_into(&mut target, &empty, &id, &ResourceIdMap::identity()).unwrap();
        let one = Raw {
            nodes: vec![node(1.0)],
            faces: vec![],
        };
        merge_into(&mut target, &one, &id, &ResourceIdMap::identity()).unwrap();
        assert_eq!(target.node_count(), 1);
    }

    #[test]
    fn malformed_source_face_is_rejected_untouched() {
        let mut target = Mesh::new();
        target.add_node(Vector3::zeros()).unwrap();
        let before = target.clone();
        let zeroed = Raw {
            nodes: vec![node(0.0)],
            faces: vec![face([0, 0, 0])],
        };
        assert_eq!(
            merge_into(
                &mut target,
                &zeroed,
                &Matrix4::identity(),
                &ResourceIdMap::identity()
            ),
            Err(MeshError::DegenerateFace(0, 0, 0))
        );
        let dangling = Raw {
            nodes: vec![node(0.0), node(1.0), node(2.0)],
            faces: vec![face([0, 1, 3])],
        };
        assert!(matches!(
            merge_into(
                &mut target,
                &dangling,
                &Matrix4::identity(),
                &ResourceIdMap::identity()
            ),
            Err(MeshError::InvalidReference { index: 3, count: 3, .. })
        ));
        assert_eq!(target, before);
    }

    #[test]
    fn combined_counts_respect_target_limits() {
        let mut target = Mesh::with_limits(MeshLimits {
            max_nodes: 3,
            ..MeshLimits::default()
        });
        target.add_node(Vector3::zeros()).unwrap();
        let source = Raw {
            nodes: vec![node(1.0), node(2.0), node(3.0)],
            faces: vec![],
        };
        assert_eq!(
            merge_into(
                &mut target,
                &source,
                &Matrix4::identity(),
                &ResourceIdMap::identity()
            ),
            Err(MeshError::CapacityExceeded {
                element: Element::Node,
                requested: 4,
                max: 3
            })
        );
        assert_eq!(target.node_count(), 1);
    }

    #[test]
    fn raw_source_faces_are_offset_and_padded() {
        use crate::data::info::BASE_MATERIAL;

        let mut target = Mesh::new();
        for x in [0.0, 1.0, 2.0] {
            target.add_node(Vector3::new(x, x * x, 0.0)).unwrap();
        }
        target.register_face_data(BASE_MATERIAL).unwrap();
        target.add_face(0, 1, 2).unwrap();

        let source = Raw {
            nodes: vec![node(5.0), node(6.0), node(7.0)],
            faces: vec![face([2, 1, 0])],
        };
        merge_into(
            &mut target,
            &source,
            &Matrix4::identity(),
            &ResourceIdMap::identity(),
        )
        .unwrap();
        assert_eq!(target.face(1).unwrap().node_indices, [5, 4, 3]);
        assert_eq!(target.face(1).unwrap().index, 1);
        assert_eq!(target.face_data(BASE_MATERIAL).unwrap().count(), 2);
    }
}
