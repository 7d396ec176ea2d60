//! Geometric helpers on node positions and affine transforms.

pub mod transform;

use nalgebra::Vector3;

/// Unit normal of the triangle `(n1, n2, n3)` by the right-hand rule.
///
/// Returns `None` when the triangle has no area.
pub fn face_normal(
    n1: &Vector3<f32>,
    n2: &Vector3<f32>,
    n3: &Vector3<f32>,
) -> Option<Vector3<f32>> {
    (n2 - n1).cross(&(n3 - n1)).try_normalize(0.0)
}
