//! Math utilities and types
//!
//! Provides the nalgebra aliases used throughout the scene core plus the
//! handful of matrix helpers the transform hierarchy and the animation
//! sampler share.

pub use nalgebra::{Matrix3, Matrix4, Quaternion, Unit, UnitQuaternion, Vector3, Vector4};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = UnitQuaternion<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    #[must_use]
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    #[must_use]
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Linear interpolation
    #[must_use]
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }
}

/// Extension trait for Mat4 with the helpers the scene core relies on
pub trait Mat4Ext {
    /// Rotation from Euler angles in degrees, composed in Y * X * Z order
    fn euler_yxz(degrees: &Vec3) -> Mat4;

    /// Translation * rotation * scale
    fn trs(position: &Vec3, rotation: &Mat4, scale: &Vec3) -> Mat4;

    /// Lengths of the first three basis columns (the axis scale factors)
    fn basis_lengths(&self) -> Vec3;

    /// Transform a point, treating it as `(x, y, z, 1)`
    fn transform_point3(&self, point: &Vec3) -> Vec3;
}

impl Mat4Ext for Mat4 {
    fn euler_yxz(degrees: &Vec3) -> Mat4 {
        let rotation_x = Mat4::from_axis_angle(&Vec3::x_axis(), utils::deg_to_rad(degrees.x));
        let rotation_y = Mat4::from_axis_angle(&Vec3::y_axis(), utils::deg_to_rad(degrees.y));
        let rotation_z = Mat4::from_axis_angle(&Vec3::z_axis(), utils::deg_to_rad(degrees.z));

        rotation_y * rotation_x * rotation_z
    }

    fn trs(position: &Vec3, rotation: &Mat4, scale: &Vec3) -> Mat4 {
        Mat4::new_translation(position) * rotation * Mat4::new_nonuniform_scaling(scale)
    }

    fn basis_lengths(&self) -> Vec3 {
        Vec3::new(
            self.fixed_view::<3, 1>(0, 0).norm(),
            self.fixed_view::<3, 1>(0, 1).norm(),
            self.fixed_view::<3, 1>(0, 2).norm(),
        )
    }

    fn transform_point3(&self, point: &Vec3) -> Vec3 {
        (self * Vec4::new(point.x, point.y, point.z, 1.0)).xyz()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_euler_yxz_order() {
        // 90 degrees around Y sends +X to -Z in a right-handed system
        let rotation = Mat4::euler_yxz(&Vec3::new(0.0, 90.0, 0.0));
        let rotated = rotation.transform_vector(&Vec3::x());
        assert_relative_eq!(rotated, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-6);

        // Y is applied last, so the X rotation acts on the already Z-rotated axis
        let combined = Mat4::euler_yxz(&Vec3::new(30.0, 45.0, 60.0));
        let expected = Mat4::euler_yxz(&Vec3::new(0.0, 45.0, 0.0))
            * Mat4::euler_yxz(&Vec3::new(30.0, 0.0, 0.0))
            * Mat4::euler_yxz(&Vec3::new(0.0, 0.0, 60.0));
        assert_relative_eq!(combined, expected, epsilon = 1e-6);
    }

    #[test]
    fn test_basis_lengths_reads_scale() {
        let matrix = Mat4::trs(
            &Vec3::new(4.0, 5.0, 6.0),
            &Mat4::euler_yxz(&Vec3::new(10.0, 20.0, 30.0)),
            &Vec3::new(2.0, 3.0, 0.5),
        );
        assert_relative_eq!(matrix.basis_lengths(), Vec3::new(2.0, 3.0, 0.5), epsilon = 1e-5);
    }

    #[test]
    fn test_transform_point3_applies_translation() {
        let matrix = Mat4::new_translation(&Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(matrix.transform_point3(&Vec3::zeros()), Vec3::new(1.0, 2.0, 3.0));
    }
}
