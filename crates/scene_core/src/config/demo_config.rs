//! # Demo Configuration
//!
//! Top-level settings for a headless demo run plus one section per scene
//! subsystem. Defaults reproduce the constants the original technique demos
//! were tuned with.

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::foundation::math::{Vec3, Vec4};
use crate::scenes::SceneKind;

/// Whether transforms are resolved before or after the render traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FrameOrder {
    /// Resolve transforms first, so edits are visible the same frame
    #[default]
    UpdateThenRender,
    /// Render with last frame's matrices, then resolve (one-frame lag)
    RenderThenUpdate,
}

/// # Camera Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// World-space eye position
    pub position: Vec3,
    /// Initial view direction
    pub direction: Vec3,
    /// World up vector
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Viewport width / height
    pub aspect_ratio: f32,
    /// Near clip distance
    pub z_near: f32,
    /// Far clip distance
    pub z_far: f32,
    /// Translation speed in units per second
    pub speed: f32,
    /// Degrees of yaw/pitch per unit of look input
    pub sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            direction: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov_degrees: 45.0,
            aspect_ratio: 16.0 / 9.0,
            z_near: 0.1,
            z_far: 1000.0,
            speed: 7.5,
            sensitivity: 0.5,
        }
    }
}

impl CameraConfig {
    /// Validate the projection parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.z_near <= 0.0 || self.z_far <= self.z_near {
            return Err(ConfigError::Invalid(format!(
                "clip range must satisfy 0 < near < far, got near={} far={}",
                self.z_near, self.z_far
            )));
        }
        if !(0.0..180.0).contains(&self.fov_degrees) || self.fov_degrees == 0.0 {
            return Err(ConfigError::Invalid(format!(
                "field of view must be in (0, 180) degrees, got {}",
                self.fov_degrees
            )));
        }
        if self.aspect_ratio <= 0.0 {
            return Err(ConfigError::Invalid("aspect ratio must be positive".to_string()));
        }
        if self.direction.norm_squared() == 0.0 || self.up.norm_squared() == 0.0 {
            return Err(ConfigError::Invalid("camera direction and up must be non-zero".to_string()));
        }
        Ok(())
    }
}

/// # Frustum Culling Scene Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CullingConfig {
    /// Entities per grid axis
    pub grid_size: u32,
    /// Distance between neighbouring grid entities
    pub spacing: f32,
    /// Offset applied to both grid axes so the grid is centred
    pub origin_offset: f32,
    /// Depth of the child chain hung under each grid root (1 = no children)
    pub hierarchy_depth: u32,
    /// Local offset of each child relative to its parent
    pub child_offset: Vec3,
    /// Degrees per second the grid roots spin around Y
    pub spin_speed: f32,
}

impl Default for CullingConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            spacing: 10.0,
            origin_offset: -100.0,
            hierarchy_depth: 3,
            child_offset: Vec3::new(0.0, 3.0, 0.0),
            spin_speed: 0.0,
        }
    }
}

/// # Instancing Scene Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstancingConfig {
    /// Total instances, laid out on a square grid
    pub instances: u32,
    /// Distance between neighbouring instances
    pub spacing: f32,
    /// Offset applied to both grid axes
    pub origin_offset: f32,
}

impl Default for InstancingConfig {
    fn default() -> Self {
        Self {
            instances: 400,
            spacing: 10.0,
            origin_offset: -100.0,
        }
    }
}

/// # Particle Scene Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleConfig {
    /// Fixed pool capacity
    pub pool_size: usize,
    /// Particles emitted per second of (clamped) frame time
    pub emit_rate: f32,
    /// Upper bound on the frame time used to compute emission
    pub max_emit_step: f32,
    /// Seed for the emitter's random generator
    pub seed: u64,
    /// Emitter position
    pub position: Vec3,
    /// Base linear velocity, scaled per particle by a random factor
    pub linear_velocity: Vec3,
    /// Constant acceleration (gravity)
    pub acceleration: Vec3,
    /// Base angular velocity in degrees per second
    pub angular_velocity: f32,
    /// Colour at birth
    pub initial_color: Vec4,
    /// Colour at death
    pub final_color: Vec4,
    /// Size at birth
    pub initial_size: f32,
    /// Size at death
    pub final_size: f32,
    /// Lifetime in seconds
    pub life_time: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            pool_size: 500,
            emit_rate: 1000.0,
            max_emit_step: 0.016,
            seed: 0x5eed,
            position: Vec3::new(0.0, -2.5, -25.0),
            linear_velocity: Vec3::new(5.0, 10.0, 5.0),
            acceleration: Vec3::new(0.0, -9.81, 0.0),
            angular_velocity: 90.0,
            initial_color: Vec4::new(1.0, 0.7, 0.0, 1.0),
            final_color: Vec4::new(0.7, 0.0, 0.0, 0.0),
            initial_size: 0.25,
            final_size: 1.25,
            life_time: 2.5,
        }
    }
}

impl ParticleConfig {
    /// Validate pool and lifetime settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pool_size == 0 {
            return Err(ConfigError::Invalid("particle pool size must be at least 1".to_string()));
        }
        if self.life_time <= 0.0 {
            return Err(ConfigError::Invalid("particle lifetime must be positive".to_string()));
        }
        Ok(())
    }
}

/// # Grass Scene Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrassConfig {
    /// Blades to plant, laid out on a square grid
    pub instances: u32,
    /// Grid cells per world unit
    pub density: f32,
    /// Horizontal scale of each blade
    pub blade_width: f32,
    /// Seed for placement jitter and for both noise fields
    pub seed: u64,
    /// Frequency of the blade height noise
    pub height_frequency: f32,
    /// Frequency of the wind noise
    pub wind_frequency: f32,
    /// Side length of the square wind texture in texels
    pub wind_texture_size: usize,
    /// Blade tint
    pub color: Vec4,
}

impl Default for GrassConfig {
    fn default() -> Self {
        Self {
            instances: 40_000,
            density: 16.0,
            blade_width: 0.1,
            seed: 0x9a55,
            height_frequency: 1.0,
            wind_frequency: 0.05,
            wind_texture_size: 256,
            color: Vec4::new(0.25, 0.55, 0.15, 1.0),
        }
    }
}

impl GrassConfig {
    /// Validate field layout and noise settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.density <= 0.0 {
            return Err(ConfigError::Invalid("grass density must be positive".to_string()));
        }
        if self.wind_texture_size == 0 {
            return Err(ConfigError::Invalid("wind texture needs at least one texel".to_string()));
        }
        if self.height_frequency <= 0.0 || self.wind_frequency <= 0.0 {
            return Err(ConfigError::Invalid("noise frequencies must be positive".to_string()));
        }
        Ok(())
    }
}

/// # Skeletal Animation Scene Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Clip ticks per second
    pub ticks_per_second: f32,
    /// Clip length in ticks
    pub duration: f32,
    /// Bones in the generated chain
    pub bone_count: usize,
    /// Length of each bone along +Y
    pub bone_length: f32,
    /// Peak swing of each joint in degrees
    pub swing_degrees: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            ticks_per_second: 25.0,
            duration: 100.0,
            bone_count: 3,
            bone_length: 1.0,
            swing_degrees: 45.0,
        }
    }
}

impl AnimationConfig {
    /// Validate clip timing
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ticks_per_second <= 0.0 || self.duration <= 0.0 {
            return Err(ConfigError::Invalid(
                "animation duration and ticks per second must be positive".to_string(),
            ));
        }
        if self.bone_count == 0 {
            return Err(ConfigError::Invalid("skeleton needs at least one bone".to_string()));
        }
        Ok(())
    }
}

/// # Complete Demo Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Default log filter, overridable through `RUST_LOG`
    pub log_level: String,
    /// Which demo scene to run
    pub scene: SceneKind,
    /// Frames to simulate before exiting
    pub frame_count: u64,
    /// Seconds per simulated frame
    pub fixed_delta_time: f32,
    /// Update/render ordering within a frame
    pub frame_order: FrameOrder,
    /// Camera settings
    pub camera: CameraConfig,
    /// Frustum culling scene settings
    pub culling: CullingConfig,
    /// Instancing scene settings
    pub instancing: InstancingConfig,
    /// Particle scene settings
    pub particles: ParticleConfig,
    /// Skeletal animation scene settings
    pub animation: AnimationConfig,
    /// Grass scene settings
    pub grass: GrassConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            scene: SceneKind::FrustumCulling,
            frame_count: 120,
            fixed_delta_time: 1.0 / 60.0,
            frame_order: FrameOrder::default(),
            camera: CameraConfig::default(),
            culling: CullingConfig::default(),
            instancing: InstancingConfig::default(),
            particles: ParticleConfig::default(),
            animation: AnimationConfig::default(),
            grass: GrassConfig::default(),
        }
    }
}

impl DemoConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fixed_delta_time <= 0.0 {
            return Err(ConfigError::Invalid("fixed delta time must be positive".to_string()));
        }
        self.camera.validate()?;
        self.particles.validate()?;
        self.animation.validate()?;
        self.grass.validate()?;
        Ok(())
    }
}

impl Config for DemoConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(DemoConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_clip_range_rejected() {
        let mut config = DemoConfig::default();
        config.camera.z_near = 10.0;
        config.camera.z_far = 1.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_empty_particle_pool_rejected() {
        let mut config = DemoConfig::default();
        config.particles.pool_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_grass_density_rejected() {
        let mut config = DemoConfig::default();
        config.grass.density = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
