//! Affine transform predicates used when placing objects.

use nalgebra::Matrix4;

const IDENTITY_TOLERANCE: f32 = 1e-6;

/// Whether `m` differs from the identity by more than a rounding error.
pub fn has_transform(m: &Matrix4<f32>) -> bool {
    let id = Matrix4::<f32>::identity();
    m.iter()
        .zip(id.iter())
        .any(|(a, b)| (a - b).abs() > IDENTITY_TOLERANCE)
}

/// Whether `m` maps the XY plane onto itself without tilting or scaling Z.
///
/// Slice stacks are planar in Z, so only such transforms may be applied to
/// objects that carry them.
pub fn is_valid_for_slices(m: &Matrix4<f32>) -> bool {
    m[(2, 0)] == 0.0
        && m[(2, 1)] == 0.0
        && m[(0, 2)] == 0.0
        && m[(1, 2)] == 0.0
        && m[(2, 2)] == 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn identity_detection_tolerates_rounding() {
        assert!(!has_transform(&Matrix4::identity()));
        let mut nearly = Matrix4::identity();
        nearly[(0, 3)] = 1e-8;
        assert!(!has_transform(&nearly));
        assert!(has_transform(&Matrix4::new_translation(&Vector3::new(
            0.0, 1.0, 0.0
        ))));
    }

    #[test]
    fn slice_compatible_transforms() {
        let shift = Matrix4::new_translation(&Vector3::new(3.0, 4.0, 5.0));
        assert!(is_valid_for_slices(&shift));
        let spin_z = Matrix4::from_euler_angles(0.0, 0.0, 0.7);
        assert!(is_valid_for_slices(&spin_z));
        let tilt = Matrix4::from_euler_angles(0.3, 0.0, 0.0);
        assert!(!is_valid_for_slices(&tilt));
        assert!(!is_valid_for_slices(&Matrix4::new_scaling(2.0)));
    }
}
