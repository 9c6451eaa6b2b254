//! View frustum built from camera parameters
//!
//! The frustum is six half-spaces whose normals all point inward, so a point is
//! inside when its signed distance to every plane is non-negative.

use crate::foundation::math::Vec3;
use crate::scene::SceneError;

/// Plane stored as a unit normal and its signed distance from the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal
    pub normal: Vec3,
    /// `dot(normal, p)` for any point `p` on the plane
    pub distance: f32,
}

impl Default for Plane {
    fn default() -> Self {
        Self {
            normal: Vec3::new(0.0, 1.0, 0.0),
            distance: 0.0,
        }
    }
}

impl Plane {
    /// Plane through `point` with the given (not necessarily unit) normal
    #[must_use]
    pub fn new(point: &Vec3, normal: &Vec3) -> Self {
        let normal = normal.normalize();
        Self {
            distance: normal.dot(point),
            normal,
        }
    }

    /// Signed distance from the plane to a point, positive on the normal side
    #[must_use]
    pub fn signed_distance(&self, point: &Vec3) -> f32 {
        self.normal.dot(point) - self.distance
    }
}

/// Identifies one of the six frustum planes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrustumFace {
    /// Near clip plane
    Near,
    /// Far clip plane
    Far,
    /// Left side
    Left,
    /// Right side
    Right,
    /// Top side
    Top,
    /// Bottom side
    Bottom,
}

impl FrustumFace {
    /// All faces, in the order side planes first (the ones most likely to reject)
    pub const ALL: [Self; 6] = [
        Self::Left,
        Self::Right,
        Self::Far,
        Self::Near,
        Self::Top,
        Self::Bottom,
    ];
}

/// Symmetric perspective frustum
#[derive(Debug, Clone, PartialEq)]
pub struct Frustum {
    /// Near clip plane, normal = forward
    pub near: Plane,
    /// Far clip plane, normal = -forward
    pub far: Plane,
    /// Left side plane
    pub left: Plane,
    /// Right side plane
    pub right: Plane,
    /// Top side plane
    pub top: Plane,
    /// Bottom side plane
    pub bottom: Plane,
}

impl Frustum {
    /// Build the frustum for a camera
    ///
    /// `fov_y` is the vertical field of view in radians. Side planes all pass
    /// through the eye and are spanned by the far-plane corner edges.
    pub fn from_camera(
        position: &Vec3,
        direction: &Vec3,
        up: &Vec3,
        aspect_ratio: f32,
        fov_y: f32,
        z_near: f32,
        z_far: f32,
    ) -> Result<Self, SceneError> {
        if z_near <= 0.0 || z_far <= z_near {
            return Err(SceneError::InvalidFrustum(format!(
                "clip range must satisfy 0 < near < far, got near={z_near} far={z_far}"
            )));
        }
        if fov_y <= 0.0 || fov_y >= std::f32::consts::PI {
            return Err(SceneError::InvalidFrustum(format!(
                "vertical field of view must be in (0, pi) radians, got {fov_y}"
            )));
        }
        if aspect_ratio <= 0.0 {
            return Err(SceneError::InvalidFrustum(format!(
                "aspect ratio must be positive, got {aspect_ratio}"
            )));
        }

        let front = direction
            .try_normalize(f32::EPSILON)
            .ok_or_else(|| SceneError::InvalidFrustum("camera direction is zero".to_string()))?;
        let cam_right = front.cross(up).try_normalize(f32::EPSILON).ok_or_else(|| {
            SceneError::InvalidFrustum("camera up is zero or parallel to direction".to_string())
        })?;
        let cam_up = cam_right.cross(&front);

        let half_v_side = z_far * (fov_y * 0.5).tan();
        let half_h_side = half_v_side * aspect_ratio;
        let far_center = front * z_far;

        Ok(Self {
            near: Plane::new(&(position + front * z_near), &front),
            far: Plane::new(&(position + far_center), &-front),
            left: Plane::new(position, &(far_center - cam_right * half_h_side).cross(&cam_up)),
            right: Plane::new(position, &cam_up.cross(&(far_center + cam_right * half_h_side))),
            top: Plane::new(position, &(far_center + cam_up * half_v_side).cross(&cam_right)),
            bottom: Plane::new(position, &cam_right.cross(&(far_center - cam_up * half_v_side))),
        })
    }

    /// Plane for a face
    #[must_use]
    pub const fn plane(&self, face: FrustumFace) -> &Plane {
        match face {
            FrustumFace::Near => &self.near,
            FrustumFace::Far => &self.far,
            FrustumFace::Left => &self.left,
            FrustumFace::Right => &self.right,
            FrustumFace::Top => &self.top,
            FrustumFace::Bottom => &self.bottom,
        }
    }

    /// Iterate the planes in rejection-friendly order
    pub fn planes(&self) -> impl Iterator<Item = &Plane> {
        FrustumFace::ALL.into_iter().map(move |face| self.plane(face))
    }

    /// Whether a point lies inside or on the frustum
    #[must_use]
    pub fn contains_point(&self, point: &Vec3) -> bool {
        self.planes().all(|plane| plane.signed_distance(point) >= 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn looking_down_neg_z() -> Frustum {
        Frustum::from_camera(
            &Vec3::zeros(),
            &Vec3::new(0.0, 0.0, -1.0),
            &Vec3::new(0.0, 1.0, 0.0),
            1.0,
            FRAC_PI_2,
            0.1,
            100.0,
        )
        .unwrap()
    }

    #[test]
    fn test_plane_signed_distance() {
        let plane = Plane::new(&Vec3::new(0.0, 2.0, 0.0), &Vec3::new(0.0, 5.0, 0.0));
        assert_relative_eq!(plane.normal, Vec3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(plane.distance, 2.0);
        assert_relative_eq!(plane.signed_distance(&Vec3::new(3.0, 7.0, -1.0)), 5.0);
        assert_relative_eq!(plane.signed_distance(&Vec3::new(0.0, 0.0, 0.0)), -2.0);
    }

    #[test]
    fn test_all_normals_point_inward() {
        let frustum = looking_down_neg_z();
        let inside = Vec3::new(0.0, 0.0, -50.0);
        for face in FrustumFace::ALL {
            assert!(
                frustum.plane(face).signed_distance(&inside) > 0.0,
                "{face:?} normal points outward"
            );
        }
    }

    #[test]
    fn test_side_planes_reject_their_own_side() {
        let frustum = looking_down_neg_z();
        let cases = [
            (FrustumFace::Left, Vec3::new(-200.0, 0.0, -50.0)),
            (FrustumFace::Right, Vec3::new(200.0, 0.0, -50.0)),
            (FrustumFace::Top, Vec3::new(0.0, 200.0, -50.0)),
            (FrustumFace::Bottom, Vec3::new(0.0, -200.0, -50.0)),
            (FrustumFace::Near, Vec3::new(0.0, 0.0, 1.0)),
            (FrustumFace::Far, Vec3::new(0.0, 0.0, -150.0)),
        ];
        for (face, point) in cases {
            assert!(frustum.plane(face).signed_distance(&point) < 0.0, "{face:?}");
            assert!(!frustum.contains_point(&point));
        }
    }

    #[test]
    fn test_near_and_far_offsets() {
        let frustum = looking_down_neg_z();
        assert_relative_eq!(frustum.near.signed_distance(&Vec3::new(0.0, 0.0, -0.1)), 0.0, epsilon = 1e-6);
        assert_relative_eq!(frustum.far.signed_distance(&Vec3::new(0.0, 0.0, -100.0)), 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let forward = Vec3::new(0.0, 0.0, -1.0);
        let up = Vec3::new(0.0, 1.0, 0.0);
        let origin = Vec3::zeros();

        assert!(Frustum::from_camera(&origin, &forward, &up, 1.0, FRAC_PI_2, 10.0, 1.0).is_err());
        assert!(Frustum::from_camera(&origin, &forward, &up, 1.0, 0.0, 0.1, 100.0).is_err());
        assert!(Frustum::from_camera(&origin, &forward, &up, 0.0, FRAC_PI_2, 0.1, 100.0).is_err());
        assert!(Frustum::from_camera(&origin, &forward, &forward, 1.0, FRAC_PI_2, 0.1, 100.0).is_err());
        assert!(Frustum::from_camera(&origin, &Vec3::zeros(), &up, 1.0, FRAC_PI_2, 0.1, 100.0).is_err());
    }
}
