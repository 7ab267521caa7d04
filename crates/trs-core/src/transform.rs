//! Translation / rotation / scale transform value

use glam::{Mat3, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Decomposed affine transform (scale, then rotate, then translate).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trs {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Trs {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Trs {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn new(translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            rotation,
            ..Self::IDENTITY
        }
    }

    /// Decompose a matrix. Shear is discarded.
    pub fn from_matrix(matrix: Mat4) -> Self {
        let (scale, rotation, translation) = matrix.to_scale_rotation_translation();
        Self {
            translation,
            rotation,
            scale,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    /// Rotation + translation only, used for placing local-space gizmos.
    pub fn rigid_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.translation)
    }

    /// Unit axes of the rotation frame (columns X, Y, Z).
    pub fn basis(&self) -> Mat3 {
        Mat3::from_quat(self.rotation)
    }

    pub fn inverse(&self) -> Self {
        Self::from_matrix(self.matrix().inverse())
    }

    /// `self` composed after `local`, i.e. `self * local`.
    pub fn mul_trs(&self, local: &Trs) -> Self {
        Self::from_matrix(self.matrix() * local.matrix())
    }

    /// Translation offset by `delta`; rotation and scale are untouched.
    pub fn translated(&self, delta: Vec3) -> Self {
        Self {
            translation: self.translation + delta,
            ..*self
        }
    }

    /// Rotated about `center` by `rotation`; scale is untouched.
    pub fn rotated_about(&self, center: Vec3, rotation: Quat) -> Self {
        Self {
            translation: center + rotation * (self.translation - center),
            rotation: (rotation * self.rotation).normalize(),
            scale: self.scale,
        }
    }

    /// Rotated about its own origin by a world-space rotation.
    pub fn rotated_in_place(&self, rotation: Quat) -> Self {
        Self {
            rotation: (rotation * self.rotation).normalize(),
            ..*self
        }
    }

    /// Scale multiplied component-wise in the transform's own axes.
    pub fn scaled_local(&self, factor: Vec3) -> Self {
        Self {
            scale: self.scale * factor,
            ..*self
        }
    }

    pub fn is_finite(&self) -> bool {
        self.translation.is_finite() && self.rotation.is_finite() && self.scale.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_matrix_roundtrip() {
        let trs = Trs::new(
            Vec3::new(1.0, -2.0, 3.0),
            Quat::from_rotation_y(0.4),
            Vec3::new(2.0, 1.0, 0.5),
        );
        let back = Trs::from_matrix(trs.matrix());
        assert_relative_eq!(back.translation.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(back.scale.z, 0.5, epsilon = 1e-5);
        assert!(back.rotation.abs_diff_eq(trs.rotation, 1e-5));
    }

    #[test]
    fn test_translated_keeps_other_components_bitwise() {
        let trs = Trs::new(Vec3::new(0.1, 0.2, 0.3), Quat::from_rotation_x(1.0), Vec3::splat(3.0));
        let moved = trs.translated(Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(moved.translation.y.to_bits(), 0.2_f32.to_bits());
        assert_eq!(moved.translation.z.to_bits(), 0.3_f32.to_bits());
        assert_eq!(moved.rotation, trs.rotation);
        assert_eq!(moved.scale, trs.scale);
    }

    #[test]
    fn test_rotated_about_center() {
        let trs = Trs::from_translation(Vec3::new(2.0, 0.0, 0.0));
        let rotated = trs.rotated_about(Vec3::new(1.0, 0.0, 0.0), Quat::from_rotation_z(FRAC_PI_2));
        assert_relative_eq!(rotated.translation.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(rotated.translation.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_mul_and_inverse() {
        let parent = Trs::new(Vec3::new(0.0, 0.0, 1.0), Quat::from_rotation_z(0.3), Vec3::ONE);
        let child = Trs::from_translation(Vec3::X);
        let world = parent.mul_trs(&child);
        let local = parent.inverse().mul_trs(&world);
        assert!(local.translation.abs_diff_eq(Vec3::X, 1e-5));
    }
}
