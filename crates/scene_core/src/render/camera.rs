//! # Fly Camera
//!
//! Perspective camera driven by yaw/pitch look input and planar translation,
//! plus the bridge from its projection parameters to a culling [`Frustum`].
//!
//! ## Design Principles
//! - **Library-agnostic**: No graphics API types in camera math
//! - **Matrices on demand**: View and projection are derived from the stored
//!   parameters each call, so there is no cache to invalidate
//! - **One source of truth**: The culling frustum uses exactly the same
//!   position, direction and projection as the view/projection matrices

use crate::config::CameraConfig;
use crate::foundation::math::{utils, Mat4, Point3, Vec3};
use crate::scene::{Frustum, SceneError};

/// Pitch limit in degrees, keeps the view direction off the up axis
const PITCH_LIMIT: f32 = 89.0;

/// Perspective projection parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionProperties {
    /// Viewport width / height
    pub aspect_ratio: f32,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clip distance
    pub z_near: f32,
    /// Far clip distance
    pub z_far: f32,
}

impl ProjectionProperties {
    /// Projection with the default 45 degree field of view and 0.1..1000 clip range
    #[must_use]
    pub const fn new(aspect_ratio: f32) -> Self {
        Self {
            aspect_ratio,
            fov_degrees: 45.0,
            z_near: 0.1,
            z_far: 1000.0,
        }
    }

    /// Vertical field of view in radians
    #[must_use]
    pub fn fov_radians(&self) -> f32 {
        utils::deg_to_rad(self.fov_degrees)
    }
}

/// Directions accepted by [`Camera::process_translation`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationDirection {
    /// Along the view direction
    Forward,
    /// Against the view direction
    Back,
    /// Along `direction x up`
    Right,
    /// Against `direction x up`
    Left,
    /// Along the world up vector
    Up,
    /// Against the world up vector
    Down,
}

/// Perspective fly camera
///
/// # Coordinate System
/// Right-handed, Y-up. With yaw = -90 degrees and pitch = 0 the camera looks
/// down -Z, matching the OpenGL-style default view.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    direction: Vec3,
    up: Vec3,

    /// Euler look angles in degrees
    pitch: f32,
    yaw: f32,

    speed: f32,
    sensitivity: f32,

    projection: ProjectionProperties,
}

impl Camera {
    /// Create a camera looking along `direction`
    ///
    /// # Arguments
    /// * `position` - Camera position in world space
    /// * `direction` - View direction (normalized internally)
    /// * `up` - World up vector
    /// * `projection` - Perspective parameters
    ///
    /// Yaw and pitch are recovered from the direction so later look input
    /// continues smoothly from the initial orientation.
    #[must_use]
    pub fn new(position: Vec3, direction: Vec3, up: Vec3, projection: ProjectionProperties) -> Self {
        let direction = direction.try_normalize(f32::EPSILON).unwrap_or_else(|| {
            log::warn!("Camera created with a zero direction, defaulting to -Z");
            Vec3::new(0.0, 0.0, -1.0)
        });
        let pitch = utils::rad_to_deg(direction.y.clamp(-1.0, 1.0).asin());
        let yaw = utils::rad_to_deg(direction.z.atan2(direction.x));

        Self {
            position,
            direction,
            up,
            pitch,
            yaw,
            speed: 7.5,
            sensitivity: 0.5,
            projection,
        }
    }

    /// Create a camera from configuration
    #[must_use]
    pub fn from_config(config: &CameraConfig) -> Self {
        let projection = ProjectionProperties {
            aspect_ratio: config.aspect_ratio,
            fov_degrees: config.fov_degrees,
            z_near: config.z_near,
            z_far: config.z_far,
        };
        let mut camera = Self::new(config.position, config.direction, config.up, projection);
        camera.speed = config.speed;
        camera.sensitivity = config.sensitivity;
        camera
    }

    /// Camera position in world space
    #[must_use]
    pub const fn position(&self) -> &Vec3 {
        &self.position
    }

    /// Unit view direction
    #[must_use]
    pub const fn direction(&self) -> &Vec3 {
        &self.direction
    }

    /// World up vector
    #[must_use]
    pub const fn up(&self) -> &Vec3 {
        &self.up
    }

    /// Current projection parameters
    #[must_use]
    pub const fn projection(&self) -> &ProjectionProperties {
        &self.projection
    }

    /// Move the camera to a new position
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        log::trace!("Camera position updated to: {:?}", position);
    }

    /// Replace the projection parameters (viewport resize, zoom)
    pub fn set_projection(&mut self, projection: ProjectionProperties) {
        if (self.projection.aspect_ratio - projection.aspect_ratio).abs() > 0.01 {
            log::info!(
                "Camera aspect ratio changed: {:.3} -> {:.3}",
                self.projection.aspect_ratio,
                projection.aspect_ratio
            );
        }
        self.projection = projection;
    }

    /// Translate the camera for one frame of held input
    ///
    /// Distance travelled is `speed * delta_time`. Right/left strafe along the
    /// normalized `direction x up`; up/down follow the world up vector.
    pub fn process_translation(&mut self, translation: TranslationDirection, delta_time: f32) {
        let step = self.speed * delta_time;
        let right = self.direction.cross(&self.up).try_normalize(f32::EPSILON).unwrap_or_else(Vec3::zeros);
        let up = self.up.try_normalize(f32::EPSILON).unwrap_or_else(Vec3::zeros);

        let offset = match translation {
            TranslationDirection::Forward => self.direction * step,
            TranslationDirection::Back => -self.direction * step,
            TranslationDirection::Right => right * step,
            TranslationDirection::Left => -right * step,
            TranslationDirection::Up => up * step,
            TranslationDirection::Down => -up * step,
        };
        self.position += offset;
    }

    /// Apply look input in screen units
    ///
    /// Offsets are scaled by the sensitivity. Pitch is clamped to +-89 degrees so
    /// the direction never becomes parallel to the up vector.
    pub fn process_rotation(&mut self, x_offset: f32, y_offset: f32) {
        self.yaw += x_offset * self.sensitivity;
        self.pitch = (self.pitch + y_offset * self.sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);

        let (yaw, pitch) = (utils::deg_to_rad(self.yaw), utils::deg_to_rad(self.pitch));
        self.direction = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize();
    }

    /// World-to-view matrix (right-handed look-at)
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        let eye = Point3::from(self.position);
        let target = Point3::from(self.position + self.direction);
        Mat4::look_at_rh(&eye, &target, &self.up)
    }

    /// Perspective projection matrix (OpenGL clip conventions)
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::new_perspective(
            self.projection.aspect_ratio,
            self.projection.fov_radians(),
            self.projection.z_near,
            self.projection.z_far,
        )
    }

    /// Combined `projection * view`
    #[must_use]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Culling frustum for the current position, direction and projection
    pub fn frustum(&self) -> Result<Frustum, SceneError> {
        Frustum::from_camera(
            &self.position,
            &self.direction,
            &self.up,
            self.projection.aspect_ratio,
            self.projection.fov_radians(),
            self.projection.z_near,
            self.projection.z_far,
        )
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}
