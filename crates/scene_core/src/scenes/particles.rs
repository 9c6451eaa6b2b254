//! Particle demo: a seeded fountain over a fixed pool

use crate::config::ParticleConfig;
use crate::foundation::collections::ModelId;
use crate::foundation::math::Vec3;
use crate::particles::{ParticleEmitter, ParticleSystem};
use crate::render::{Camera, RenderSink};
use crate::scene::{CullStats, Model, ModelLibrary};
use crate::scenes::{DemoScene, DemoSceneError};

const NAME: &str = "particles";

struct Loaded {
    library: ModelLibrary,
    quad: ModelId,
    emitter: ParticleEmitter,
    system: ParticleSystem,
}

/// Fountain of billboarded particles
pub struct ParticlesScene {
    config: ParticleConfig,
    loaded: Option<Loaded>,
}

impl ParticlesScene {
    /// Create the scene; nothing is built until `setup`
    #[must_use]
    pub const fn new(config: ParticleConfig) -> Self {
        Self { config, loaded: None }
    }

    /// Particle pool, once set up
    #[must_use]
    pub fn system(&self) -> Option<&ParticleSystem> {
        self.loaded.as_ref().map(|loaded| &loaded.system)
    }
}

impl DemoScene for ParticlesScene {
    fn name(&self) -> &'static str {
        NAME
    }

    fn setup(&mut self) -> Result<(), DemoSceneError> {
        let quad_positions = vec![
            Vec3::new(-0.5, -0.5, 0.0),
            Vec3::new(0.5, -0.5, 0.0),
            Vec3::new(0.5, 0.5, 0.0),
            Vec3::new(-0.5, 0.5, 0.0),
        ];
        let mut library = ModelLibrary::new();
        let quad = library.insert(Model::new("particle_quad", quad_positions)?);

        log::info!(
            "Particle scene: pool of {}, seed {:#x}",
            self.config.pool_size,
            self.config.seed
        );

        self.loaded = Some(Loaded {
            library,
            quad,
            emitter: ParticleEmitter::from_config(&self.config),
            system: ParticleSystem::new(self.config.pool_size),
        });
        Ok(())
    }

    fn update(&mut self, delta_time: f32) -> Result<(), DemoSceneError> {
        let loaded = self.loaded.as_mut().ok_or(DemoSceneError::NotSetUp(NAME))?;
        loaded.emitter.emit_into(&mut loaded.system, delta_time);
        loaded.system.update(delta_time);
        Ok(())
    }

    fn render(&mut self, camera: &Camera, sink: &mut dyn RenderSink) -> Result<CullStats, DemoSceneError> {
        let loaded = self.loaded.as_ref().ok_or(DemoSceneError::NotSetUp(NAME))?;
        let instances = loaded.system.instances(camera);
        if !instances.is_empty() {
            sink.draw_instanced(Some(loaded.quad), &instances);
        }

        Ok(CullStats {
            displayed: instances.len(),
            total: loaded.system.capacity(),
        })
    }

    fn teardown(&mut self) {
        if let Some(mut loaded) = self.loaded.take() {
            loaded.system.clear();
            log::debug!("Particle scene released {} models", loaded.library.len());
        }
    }
}
