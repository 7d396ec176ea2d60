mod util;

use fabmesh::prelude::*;
use nalgebra::Vector3;
use proptest::prelude::*;
use util::*;

#[test]
fn default_limits_are_signed_32_bit_max() {
    let limits = MeshLimits::default();
    assert_eq!(limits.max_nodes, 2_147_483_647);
    assert_eq!(limits.max_faces, 2_147_483_647);
    assert_eq!(limits.max_beams, 2_147_483_647);
    assert!(Mesh::new().check_sanity());
}

#[test]
fn limits_load_from_config() {
    let limits: MeshLimits =
        serde_json::from_str(r#"{ "max_nodes": 4, "max_faces": 2 }"#).unwrap();
    assert_eq!(limits.max_nodes, 4);
    assert_eq!(limits.max_faces, 2);
    assert_eq!(limits.max_beams, MeshLimits::default().max_beams);

    let mut mesh = Mesh::with_limits(limits);
    add_surface(&mut mesh, &TETRA_NODES, &TETRA_FACES[..2]);
    assert!(matches!(
        mesh.add_node(Vector3::zeros()),
        Err(MeshError::CapacityExceeded {
            element: Element::Node,
            requested: 5,
            max: 4
        })
    ));
    assert!(matches!(
        mesh.add_face(0, 3, 2),
        Err(MeshError::CapacityExceeded {
            element: Element::Face,
            ..
        })
    ));
    assert!(mesh.check_sanity());
}

#[test]
fn beam_limits_and_degenerate_beams() {
    let mut mesh = tetrahedron();
    mesh.set_limits(MeshLimits {
        max_beams: 1,
        ..MeshLimits::default()
    });
    assert_eq!(mesh.add_default_beam(2, 2), Err(MeshError::DegenerateBeam(2)));
    mesh.add_beam(0, 1, BeamProfile::uniform(0.25, CapMode::Hemisphere))
        .unwrap();
    assert!(matches!(
        mesh.add_default_beam(1, 2),
        Err(MeshError::CapacityExceeded {
            element: Element::Beam,
            ..
        })
    ));
    assert_eq!(mesh.beam(0).unwrap().radius, [0.25, 0.25]);
}

#[test]
fn lowering_a_limit_makes_the_mesh_insane() {
    for limits in [
        MeshLimits {
            max_nodes: 3,
            ..MeshLimits::default()
        },
        MeshLimits {
            max_faces: 3,
            ..MeshLimits::default()
        },
    ] {
        let mut mesh = tetrahedron();
        mesh.set_limits(limits);
        assert!(!mesh.check_sanity());
    }
    let mut beams = tetrahedron();
    beams.add_default_beam(0, 1).unwrap();
    beams.add_default_beam(1, 2).unwrap();
    beams.set_limits(MeshLimits {
        max_beams: 1,
        ..MeshLimits::default()
    });
    assert!(!beams.check_sanity());
}

proptest! {
    #[test]
    fn node_count_never_exceeds_limit(max in 0u32..32, attempts in 0usize..48) {
        let mut mesh = Mesh::with_limits(MeshLimits {
            max_nodes: max,
            ..MeshLimits::default()
        });
        let mut accepted = 0u32;
        for i in 0..attempts {
            match mesh.add_node(Vector3::new(i as f32, 0.0, 0.0)) {
                Ok(node) => {
                    prop_assert_eq!(node.index, accepted);
                    accepted += 1;
                }
                Err(e) => {
                    let is_capacity = matches!(e, MeshError::CapacityExceeded { .. });
                    prop_assert!(is_capacity);
                }
            }
        }
        prop_assert_eq!(mesh.node_count(), max.min(attempts as u32));
        prop_assert!(mesh.check_sanity());
    }

    #[test]
    fn add_face_accepts_exactly_distinct_in_range(
        node_count in 0u32..6,
        a in 0u32..8,
        b in 0u32..8,
        c in 0u32..8,
    ) {
        let mut mesh = Mesh::new();
        mesh.register_face_data(BASE_MATERIAL).unwrap();
        for i in 0..node_count {
            mesh.add_node(Vector3::new(i as f32, (i * i) as f32, 0.0)).unwrap();
        }
        let distinct = a != b && a != c && b != c;
        let in_range = a < node_count && b < node_count && c < node_count;
        match mesh.add_face(a, b, c) {
            Ok(face) => {
                prop_assert!(distinct && in_range);
                prop_assert_eq!(face.node_indices, [a, b, c]);
                prop_assert_eq!(mesh.face_count(), 1);
            }
            Err(MeshError::DegenerateFace(..)) => prop_assert!(!distinct),
            Err(MeshError::InvalidReference { .. }) => prop_assert!(distinct && !in_range),
            Err(other) => prop_assert!(false, "unexpected error {other:?}"),
        }
        prop_assert_eq!(mesh.face_data(BASE_MATERIAL).unwrap().count(), mesh.face_count());
    }

    #[test]
    fn sanity_holds_iff_every_count_is_within_its_limit(
        nodes in 3u32..12,
        faces in 0u32..8,
        beams in 0u32..8,
        max_nodes in 0u32..12,
        max_faces in 0u32..8,
        max_beams in 0u32..8,
    ) {
        let mut mesh = Mesh::new();
        for i in 0..nodes {
            mesh.add_node(Vector3::new(i as f32, (i * i) as f32, 0.0)).unwrap();
        }
        for i in 0..faces {
            let a = i % (nodes - 2);
            mesh.add_face(a, a + 1, a + 2).unwrap();
        }
        for i in 0..beams {
            let a = i % (nodes - 1);
            mesh.add_default_beam(a, a + 1).unwrap();
        }
        mesh.set_limits(MeshLimits { max_nodes, max_faces, max_beams });
        prop_assert_eq!(
            mesh.check_sanity(),
            nodes <= max_nodes && faces <= max_faces && beams <= max_beams
        );
        prop_assert_eq!(
            (mesh.node_count(), mesh.face_count(), mesh.beam_count()),
            (nodes, faces, beams)
        );
    }
}
