//! Instancing demo: one model, one draw call, a grid of instances

use crate::config::InstancingConfig;
use crate::foundation::collections::ModelId;
use crate::foundation::math::{Mat4, Vec3};
use crate::render::{Camera, InstanceData, RenderSink};
use crate::scene::{CullStats, Model, ModelLibrary};
use crate::scenes::{DemoScene, DemoSceneError};

const NAME: &str = "instancing";

/// Model matrices for a square grid on the XZ plane
///
/// The grid side is `floor(sqrt(count))`, so a non-square count is rounded
/// down to the largest square that fits. Instances are ordered row by row
/// along X, then Z within each row.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn grid_instances(count: u32, spacing: f32, origin_offset: f32) -> Vec<InstanceData> {
    let side = f64::from(count).sqrt().floor() as u32;

    (0..side)
        .flat_map(|x| (0..side).map(move |z| (x, z)))
        .map(|(x, z)| {
            let position = Vec3::new(
                x as f32 * spacing + origin_offset,
                0.0,
                z as f32 * spacing + origin_offset,
            );
            InstanceData::from_matrix(&Mat4::new_translation(&position))
        })
        .collect()
}

struct Loaded {
    library: ModelLibrary,
    model: ModelId,
    instances: Vec<InstanceData>,
}

/// Grid of model instances submitted in one instanced draw
pub struct InstancingScene {
    config: InstancingConfig,
    loaded: Option<Loaded>,
}

impl InstancingScene {
    /// Create the scene; nothing is built until `setup`
    #[must_use]
    pub const fn new(config: InstancingConfig) -> Self {
        Self { config, loaded: None }
    }

    /// Instance records, once set up
    #[must_use]
    pub fn instances(&self) -> Option<&[InstanceData]> {
        self.loaded.as_ref().map(|loaded| loaded.instances.as_slice())
    }
}

impl DemoScene for InstancingScene {
    fn name(&self) -> &'static str {
        NAME
    }

    fn setup(&mut self) -> Result<(), DemoSceneError> {
        let mut library = ModelLibrary::new();
        let model = library.insert(Model::unit_cube("cube")?);
        let instances = grid_instances(self.config.instances, self.config.spacing, self.config.origin_offset);

        if instances.len() != self.config.instances as usize {
            log::warn!(
                "Instance count {} is not a square, drawing {}",
                self.config.instances,
                instances.len()
            );
        }
        log::info!("Instancing scene: {} instances", instances.len());

        self.loaded = Some(Loaded {
            library,
            model,
            instances,
        });
        Ok(())
    }

    fn update(&mut self, _delta_time: f32) -> Result<(), DemoSceneError> {
        if self.loaded.is_none() {
            return Err(DemoSceneError::NotSetUp(NAME));
        }
        Ok(())
    }

    fn render(&mut self, _camera: &Camera, sink: &mut dyn RenderSink) -> Result<CullStats, DemoSceneError> {
        let loaded = self.loaded.as_ref().ok_or(DemoSceneError::NotSetUp(NAME))?;
        sink.draw_instanced(Some(loaded.model), &loaded.instances);

        let count = loaded.instances.len();
        Ok(CullStats {
            displayed: count,
            total: count,
        })
    }

    fn teardown(&mut self) {
        if let Some(loaded) = self.loaded.take() {
            log::debug!("Instancing scene released {} models", loaded.library.len());
        }
    }
}
