//! Hierarchical transform with dirty tracking
//!
//! A `Transform` owns the local position, Euler rotation (degrees) and scale of a
//! scene node plus the cached global matrix resolved from its parent. Setters only
//! mark the node dirty; the matrix is recomputed by the scene graph's update pass.

use crate::foundation::math::{Mat4, Mat4Ext, Vec3};

/// Local TRS parameters and cached global matrix of a scene node
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    position: Vec3,
    euler_rotation: Vec3,
    scale: Vec3,

    global: Mat4,

    dirty: bool,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            euler_rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            global: Mat4::identity(),
            dirty: true,
        }
    }
}

impl Transform {
    /// Create an identity transform (dirty, so the first update resolves it)
    #[must_use]
    pub fn identity() -> Self {
        Self::default()
    }

    /// Builder pattern: start from a local position
    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Local matrix, translation * rotation(Y * X * Z) * scale
    #[must_use]
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::trs(&self.position, &Mat4::euler_yxz(&self.euler_rotation), &self.scale)
    }

    /// Resolve the global matrix for a root node
    pub fn compute_model_matrix(&mut self) {
        self.global = self.local_matrix();
        self.dirty = false;
    }

    /// Resolve the global matrix as `parent_global * local`
    pub fn compute_model_matrix_with_parent(&mut self, parent_global: &Mat4) {
        self.global = parent_global * self.local_matrix();
        self.dirty = false;
    }

    /// Set the local position
    pub fn set_local_position(&mut self, position: Vec3) {
        self.position = position;
        self.dirty = true;
    }

    /// Set the local Euler rotation in degrees
    pub fn set_local_rotation(&mut self, euler_degrees: Vec3) {
        self.euler_rotation = euler_degrees;
        self.dirty = true;
    }

    /// Set the local scale
    pub fn set_local_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.dirty = true;
    }

    /// Mark the node as needing a recompute without touching its parameters
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Local position
    #[must_use]
    pub const fn local_position(&self) -> &Vec3 {
        &self.position
    }

    /// Local Euler rotation in degrees
    #[must_use]
    pub const fn local_rotation(&self) -> &Vec3 {
        &self.euler_rotation
    }

    /// Local scale
    #[must_use]
    pub const fn local_scale(&self) -> &Vec3 {
        &self.scale
    }

    /// Cached global matrix, valid as of the last update pass
    #[must_use]
    pub const fn model_matrix(&self) -> &Mat4 {
        &self.global
    }

    /// Translation column of the global matrix
    #[must_use]
    pub fn global_position(&self) -> Vec3 {
        self.global.fixed_view::<3, 1>(0, 3).into_owned()
    }

    /// Axis scale factors of the global matrix (basis vector lengths)
    #[must_use]
    pub fn global_scale(&self) -> Vec3 {
        self.global.basis_lengths()
    }

    /// Whether local parameters changed since the last recompute
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_transform_is_dirty_identity() {
        let transform = Transform::identity();
        assert!(transform.is_dirty());
        assert_eq!(*transform.model_matrix(), Mat4::identity());
    }

    #[test]
    fn test_setters_dirty_and_recompute_cleans() {
        let mut transform = Transform::identity();
        transform.compute_model_matrix();
        assert!(!transform.is_dirty());

        transform.set_local_scale(Vec3::new(2.0, 2.0, 2.0));
        assert!(transform.is_dirty());
        transform.compute_model_matrix();
        assert!(!transform.is_dirty());

        transform.set_local_rotation(Vec3::new(0.0, 45.0, 0.0));
        assert!(transform.is_dirty());
        transform.compute_model_matrix();

        transform.set_local_position(Vec3::new(1.0, 0.0, 0.0));
        assert!(transform.is_dirty());
    }

    #[test]
    fn test_parent_composition() {
        let parent = Mat4::new_translation(&Vec3::new(10.0, 0.0, 0.0));
        let mut child = Transform::from_position(Vec3::new(0.0, 2.0, 0.0));
        child.compute_model_matrix_with_parent(&parent);

        assert_relative_eq!(child.global_position(), Vec3::new(10.0, 2.0, 0.0));
        assert_relative_eq!(*child.model_matrix(), parent * child.local_matrix());
    }

    #[test]
    fn test_global_scale_survives_rotation() {
        let mut transform = Transform::identity();
        transform.set_local_rotation(Vec3::new(33.0, 71.0, -12.0));
        transform.set_local_scale(Vec3::new(1.0, 4.0, 2.0));
        transform.compute_model_matrix();

        assert_relative_eq!(transform.global_scale(), Vec3::new(1.0, 4.0, 2.0), epsilon = 1e-5);
    }
}
