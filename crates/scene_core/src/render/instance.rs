//! GPU-ready per-instance records

use bytemuck::{Pod, Zeroable};

use crate::foundation::math::{Mat4, Vec4};

/// One instance of an instanced draw: model matrix plus tint
///
/// Laid out as four column vectors followed by an RGBA colour, the shape an
/// instanced vertex buffer expects.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct InstanceData {
    /// Column-major model matrix
    pub model: [[f32; 4]; 4],
    /// RGBA colour
    pub color: [f32; 4],
}

impl InstanceData {
    /// Instance with a white tint
    #[must_use]
    pub fn from_matrix(model: &Mat4) -> Self {
        Self::new(model, &Vec4::new(1.0, 1.0, 1.0, 1.0))
    }

    /// Instance from a model matrix and colour
    #[must_use]
    pub fn new(model: &Mat4, color: &Vec4) -> Self {
        Self {
            model: (*model).into(),
            color: (*color).into(),
        }
    }

    /// The model matrix back as a `Mat4`
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from(self.model)
    }
}

/// View a slice of instances as raw bytes for upload
#[must_use]
pub fn as_bytes(instances: &[InstanceData]) -> &[u8] {
    bytemuck::cast_slice(instances)
}
