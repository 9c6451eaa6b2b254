//! Technique demo scenes
//!
//! Every demo implements [`DemoScene`], a small lifecycle driven by the frame
//! loop: `setup` once, then `update` and `render` every frame, then
//! `teardown`. [`SceneKind`] names the closed set of demos and builds the
//! selected one from configuration.

pub mod frustum_culling;
pub mod grass;
pub mod instancing;
pub mod particles;
pub mod skeletal_animation;

pub use frustum_culling::FrustumCullingScene;
pub use grass::{grass_instances, height_scale, wind_texture, GrassScene};
pub use instancing::{grid_instances, InstancingScene};
pub use particles::ParticlesScene;
pub use skeletal_animation::SkeletalAnimationScene;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::animation::AnimationError;
use crate::config::DemoConfig;
use crate::render::{Camera, RenderSink};
use crate::scene::{CullStats, SceneError};

/// Lifecycle of a demo scene
pub trait DemoScene {
    /// Human readable name for logs
    fn name(&self) -> &'static str;

    /// Build models, entities and simulation state
    fn setup(&mut self) -> Result<(), DemoSceneError>;

    /// Advance the simulation by `delta_time` seconds
    fn update(&mut self, delta_time: f32) -> Result<(), DemoSceneError>;

    /// Submit this frame's draws
    ///
    /// Returns how many of the scene's objects were drawn out of how many
    /// were considered.
    fn render(&mut self, camera: &Camera, sink: &mut dyn RenderSink) -> Result<CullStats, DemoSceneError>;

    /// Release everything `setup` created
    fn teardown(&mut self);
}

/// Selector for the available demos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SceneKind {
    /// Grid of entity hierarchies culled against the camera frustum
    #[default]
    FrustumCulling,
    /// One model drawn many times in a single instanced call
    Instancing,
    /// Bone chain driven by a looping animation clip
    SkeletalAnimation,
    /// Pooled particle fountain
    Particles,
    /// Noise-shaped field of instanced grass blades
    Grass,
}

impl SceneKind {
    /// Every selectable demo
    pub const ALL: [Self; 5] = [
        Self::FrustumCulling,
        Self::Instancing,
        Self::SkeletalAnimation,
        Self::Particles,
        Self::Grass,
    ];

    /// Construct the demo this kind names; call `setup` before the first frame
    #[must_use]
    pub fn build(self, config: &DemoConfig) -> Box<dyn DemoScene> {
        match self {
            Self::FrustumCulling => Box::new(FrustumCullingScene::new(config.culling.clone())),
            Self::Instancing => Box::new(InstancingScene::new(config.instancing.clone())),
            Self::SkeletalAnimation => Box::new(SkeletalAnimationScene::new(config.animation.clone())),
            Self::Particles => Box::new(ParticlesScene::new(config.particles.clone())),
            Self::Grass => Box::new(GrassScene::new(config.grass.clone())),
        }
    }
}

/// Errors raised while running a demo scene
#[derive(Error, Debug)]
pub enum DemoSceneError {
    /// Scene graph or visibility failure
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// Animation evaluation failure
    #[error("Animation error: {0}")]
    Animation(#[from] AnimationError),

    /// A frame was requested before `setup`
    #[error("Scene '{0}' used before setup")]
    NotSetUp(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingSink;

    #[test]
    fn test_every_kind_runs_a_frame() {
        let config = DemoConfig::default();
        let camera = Camera::from_config(&config.camera);

        for kind in SceneKind::ALL {
            let mut scene = kind.build(&config);
            let mut sink = RecordingSink::new();
            scene.setup().unwrap();
            scene.update(config.fixed_delta_time).unwrap();
            let stats = scene.render(&camera, &mut sink).unwrap();
            assert!(stats.displayed <= stats.total, "{}", scene.name());
            scene.teardown();
        }
    }

    #[test]
    fn test_frame_before_setup_is_rejected() {
        let config = DemoConfig::default();
        let camera = Camera::from_config(&config.camera);
        for kind in SceneKind::ALL {
            let mut scene = kind.build(&config);
            let result = scene.render(&camera, &mut RecordingSink::new());
            assert!(matches!(result, Err(DemoSceneError::NotSetUp(_))), "{}", scene.name());
        }
    }
}
