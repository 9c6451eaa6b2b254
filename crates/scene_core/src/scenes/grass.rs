//! Grass demo: a noise-shaped field of instanced blades
//!
//! Blades sit on a jittered grid with a random turn about Y. Their height is
//! scaled by one noise field, and a second field is baked into a square wind
//! texture the blade shader scrolls over time.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GrassConfig;
use crate::foundation::collections::ModelId;
use crate::foundation::math::{Mat4, Mat4Ext, Vec3};
use crate::foundation::noise::{to_byte, NoiseField};
use crate::render::{Camera, InstanceData, RenderSink};
use crate::scene::{CullStats, Model, ModelLibrary};
use crate::scenes::{DemoScene, DemoSceneError};

const NAME: &str = "grass";

/// Height multiplier for a noise value, mapping `[-1, 1]` onto `[0.5, 1.5]`
#[must_use]
pub fn height_scale(noise_value: f32) -> f32 {
    1.0 + noise_value.clamp(-1.0, 1.0) / 2.0
}

/// Blade instances for a square field centred on the origin
///
/// The grid side is `floor(sqrt(count))`. Each cell is jittered by up to one
/// cell, divided by `density` and turned by a random angle. The blade is
/// scaled to `blade_width` across and by [`height_scale`] of the height noise
/// sampled at its position.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn grass_instances(rng: &mut impl Rng, heights: &NoiseField, config: &GrassConfig) -> Vec<InstanceData> {
    let side = f64::from(config.instances).sqrt().floor() as u32;
    let half = (side / 2) as f32;
    let width = config.blade_width;

    let mut instances = Vec::with_capacity((side * side) as usize);
    for x in 0..side {
        for z in 0..side {
            let jitter_x: f32 = rng.gen();
            let jitter_z: f32 = rng.gen();
            let turn: f32 = rng.gen_range(0.0..360.0);

            let position = Vec3::new(x as f32 + jitter_x - half, 0.0, z as f32 + jitter_z - half) / config.density;
            let height = height_scale(heights.sample(position.x, position.z));

            let model = Mat4::trs(
                &position,
                &Mat4::euler_yxz(&Vec3::new(0.0, turn, 0.0)),
                &Vec3::new(width, height, width),
            );
            instances.push(InstanceData::new(&model, &config.color));
        }
    }
    instances
}

/// Square wind texture, one byte per texel, rows along X
#[must_use]
pub fn wind_texture(wind: &NoiseField, size: usize) -> Vec<u8> {
    (0..size)
        .flat_map(|x| (0..size).map(move |y| (x, y)))
        .map(|(x, y)| to_byte(wind.sample(x as f32, y as f32)))
        .collect()
}

struct Loaded {
    library: ModelLibrary,
    model: ModelId,
    instances: Vec<InstanceData>,
    wind: Vec<u8>,
    elapsed: f32,
}

/// Instanced grass field with a baked wind texture
pub struct GrassScene {
    config: GrassConfig,
    loaded: Option<Loaded>,
}

impl GrassScene {
    /// Create the scene; nothing is built until `setup`
    #[must_use]
    pub const fn new(config: GrassConfig) -> Self {
        Self { config, loaded: None }
    }

    /// Blade instances, once set up
    #[must_use]
    pub fn instances(&self) -> Option<&[InstanceData]> {
        self.loaded.as_ref().map(|loaded| loaded.instances.as_slice())
    }

    /// Wind texture bytes, once set up
    #[must_use]
    pub fn wind_texture(&self) -> Option<&[u8]> {
        self.loaded.as_ref().map(|loaded| loaded.wind.as_slice())
    }

    /// Seconds the wind has been blowing
    #[must_use]
    pub fn elapsed(&self) -> Option<f32> {
        self.loaded.as_ref().map(|loaded| loaded.elapsed)
    }
}

impl DemoScene for GrassScene {
    fn name(&self) -> &'static str {
        NAME
    }

    fn setup(&mut self) -> Result<(), DemoSceneError> {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let heights = NoiseField::new(rng.gen(), self.config.height_frequency);
        let wind = NoiseField::new(rng.gen(), self.config.wind_frequency);

        let mut library = ModelLibrary::new();
        let blade = Model::new(
            "blade",
            vec![Vec3::new(-0.5, 0.0, 0.0), Vec3::new(0.5, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)],
        )?;
        let model = library.insert(blade);

        let instances = grass_instances(&mut rng, &heights, &self.config);
        let wind = wind_texture(&wind, self.config.wind_texture_size);
        log::info!(
            "Grass scene: {} blades, {}x{} wind texture",
            instances.len(),
            self.config.wind_texture_size,
            self.config.wind_texture_size
        );

        self.loaded = Some(Loaded {
            library,
            model,
            instances,
            wind,
            elapsed: 0.0,
        });
        Ok(())
    }

    fn update(&mut self, delta_time: f32) -> Result<(), DemoSceneError> {
        let loaded = self.loaded.as_mut().ok_or(DemoSceneError::NotSetUp(NAME))?;
        loaded.elapsed += delta_time;
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
            log::debug!("Grass scene released {} models", loaded.library.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingSink;
    use approx::assert_relative_eq;

    fn small_config() -> GrassConfig {
        GrassConfig {
            instances: 400,
            wind_texture_size: 16,
            ..GrassConfig::default()
        }
    }

    #[test]
    fn test_height_scale_range() {
        assert_relative_eq!(height_scale(-1.0), 0.5);
        assert_relative_eq!(height_scale(0.0), 1.0);
        assert_relative_eq!(height_scale(1.0), 1.5);
        assert_relative_eq!(height_scale(-4.0), 0.5);
    }

    #[test]
    fn test_blade_heights_follow_noise() {
        let config = small_config();
        let heights = NoiseField::new(11, config.height_frequency);
        let instances = grass_instances(&mut StdRng::seed_from_u64(1), &heights, &config);
        assert_eq!(instances.len(), 400);

        for instance in &instances {
            let scale = instance.matrix().basis_lengths();
            assert!((0.5..=1.5).contains(&scale.y), "{scale:?}");
            assert_relative_eq!(scale.x, config.blade_width, epsilon = 1e-5);
            assert_relative_eq!(scale.z, config.blade_width, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_field_stays_inside_grid_bounds() {
        let config = small_config();
        let heights = NoiseField::new(11, config.height_frequency);
        let instances = grass_instances(&mut StdRng::seed_from_u64(2), &heights, &config);

        // 20x20 cells centred on the origin, one world unit per 16 cells
        let limit = 11.0 / config.density;
        for instance in &instances {
            let position = instance.matrix().transform_point3(&Vec3::zeros());
            assert!(position.x.abs() <= limit && position.z.abs() <= limit, "{position:?}");
            assert_relative_eq!(position.y, 0.0);
        }
    }

    #[test]
    fn test_fixed_seed_is_deterministic() {
        let config = small_config();
        let build = |seed| {
            let mut scene = GrassScene::new(GrassConfig { seed, ..config.clone() });
            scene.setup().unwrap();
            (scene.instances().unwrap().to_vec(), scene.wind_texture().unwrap().to_vec())
        };

        let (first_instances, first_wind) = build(5);
        let (second_instances, second_wind) = build(5);
        assert_eq!(first_instances, second_instances);
        assert_eq!(first_wind, second_wind);

        let (other_instances, _) = build(6);
        assert_ne!(first_instances, other_instances);
    }

    #[test]
    fn test_wind_texture_bytes() {
        let wind = NoiseField::new(3, 0.05);
        let texture = wind_texture(&wind, 8);
        assert_eq!(texture.len(), 64);
        // Row-major along X: texel (x, y) lives at x * size + y
        assert_eq!(texture[2 * 8 + 5], to_byte(wind.sample(2.0, 5.0)));
        assert_eq!(texture[0], to_byte(wind.sample(0.0, 0.0)));
    }

    #[test]
    fn test_single_instanced_draw_and_wind_clock() {
        let mut scene = GrassScene::new(small_config());
        scene.setup().unwrap();
        scene.update(0.25).unwrap();
        scene.update(0.25).unwrap();
        assert_relative_eq!(scene.elapsed().unwrap(), 0.5);

        let mut sink = RecordingSink::new();
        let stats = scene.render(&Camera::default(), &mut sink).unwrap();
        assert_eq!(stats.displayed, 400);
        assert_eq!(sink.instanced_draws(), 1);
        assert_eq!(sink.instance_count(), 400);
    }
}
