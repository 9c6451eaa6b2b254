//! Bounding sphere used for frustum culling
//!
//! The sphere lives in model space. World-space tests move its centre with the
//! entity's global matrix and inflate the radius by the largest axis scale,
//! which stays conservative under non-uniform scale.

use crate::foundation::math::{Mat4Ext, Vec3};
use crate::scene::frustum::{Frustum, Plane};
use crate::scene::transform::Transform;
use crate::scene::SceneError;

/// Sphere bounding volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// Centre in model space
    pub center: Vec3,
    /// Radius in model space
    pub radius: f32,
}

impl BoundingSphere {
    /// Create a sphere from centre and radius
    #[must_use]
    pub const fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Sphere enclosing the axis-aligned box of a vertex set
    ///
    /// Centre is the box centre, radius half the box diagonal. An empty vertex
    /// set has no extent and is rejected.
    pub fn from_positions(positions: &[Vec3]) -> Result<Self, SceneError> {
        let (first, rest) = positions.split_first().ok_or(SceneError::EmptyVertexSet)?;

        let (min, max) = rest.iter().fold((*first, *first), |(min, max), position| {
            (min.inf(position), max.sup(position))
        });

        Ok(Self {
            center: (min + max) * 0.5,
            radius: (max - min).norm() * 0.5,
        })
    }

    /// Whether the sphere is in front of, or intersects, the plane
    #[must_use]
    pub fn is_on_or_forward_plane(&self, plane: &Plane) -> bool {
        plane.signed_distance(&self.center) > -self.radius
    }

    /// Frustum test with the sphere taken as already in world space
    ///
    /// Every plane must pass; a single failing plane culls the sphere.
    #[must_use]
    pub fn is_on_frustum(&self, frustum: &Frustum) -> bool {
        frustum.planes().all(|plane| self.is_on_or_forward_plane(plane))
    }

    /// The sphere moved into world space by a resolved transform
    #[must_use]
    pub fn to_world(&self, transform: &Transform) -> Self {
        let global_scale = transform.global_scale();
        let max_scale = global_scale.x.max(global_scale.y).max(global_scale.z);

        Self {
            center: transform.model_matrix().transform_point3(&self.center),
            radius: self.radius * max_scale,
        }
    }

    /// Frustum test of the model-space sphere under an entity's global transform
    #[must_use]
    pub fn is_on_frustum_transformed(&self, frustum: &Frustum, transform: &Transform) -> bool {
        self.to_world(transform).is_on_frustum(frustum)
    }
}
