//! Skeletal animation demo: a swinging bone chain
//!
//! The clip is generated rather than loaded: a vertical chain of bones, each
//! swinging around Z and back over one loop, plus an unskinned tip node that
//! is animated but never weighted by the mesh.

use crate::animation::{
    AnimationClip, Animator, BoneChannel, BoneRegistry, BoneWeights, KeyTrack, Keyframe, Skeleton, SkinBinding,
    VertexSkin,
};
use crate::config::AnimationConfig;
use crate::foundation::collections::ModelId;
use crate::foundation::math::{utils, Mat4, Mat4Ext, Quat, Vec3};
use crate::render::{Camera, RenderSink};
use crate::scene::{BoundingSphere, CullStats, Model, ModelLibrary};
use crate::scenes::{DemoScene, DemoSceneError};

const NAME: &str = "skeletal animation";

/// Half width of the generated arm mesh
const ARM_HALF_WIDTH: f32 = 0.1;

struct Loaded {
    library: ModelLibrary,
    model: ModelId,
    skins: Vec<VertexSkin>,
    animator: Animator,
}

/// Bone chain animated by a looping clip
pub struct SkeletalAnimationScene {
    config: AnimationConfig,
    loaded: Option<Loaded>,
}

fn bone_name(index: usize) -> String {
    format!("bone{index}")
}

impl SkeletalAnimationScene {
    /// Create the scene; nothing is built until `setup`
    #[must_use]
    pub const fn new(config: AnimationConfig) -> Self {
        Self { config, loaded: None }
    }

    /// Animator driving the chain, once set up
    #[must_use]
    pub fn animator(&self) -> Option<&Animator> {
        self.loaded.as_ref().map(|loaded| &loaded.animator)
    }

    /// Mesh vertices deformed by the current palette, once set up
    #[must_use]
    pub fn skinned_positions(&self) -> Option<Vec<Vec3>> {
        let loaded = self.loaded.as_ref()?;
        let model = loaded.library.get(loaded.model)?;
        let palette = loaded.animator.bone_matrices();

        Some(
            model
                .positions()
                .iter()
                .zip(&loaded.skins)
                .map(|(position, skin)| skin.blended_matrix(palette).transform_point3(position))
                .collect(),
        )
    }

    /// Two vertices per bone, each fully weighted to its bone
    fn arm_mesh(&self) -> (Vec<Vec3>, Vec<BoneWeights>) {
        let length = self.config.bone_length;
        let mut positions = Vec::with_capacity(self.config.bone_count * 2);
        let mut weights = Vec::with_capacity(self.config.bone_count);

        for index in 0..self.config.bone_count {
            let base = index as f32 * length;
            let first = positions.len();
            positions.push(Vec3::new(-ARM_HALF_WIDTH, base, 0.0));
            positions.push(Vec3::new(ARM_HALF_WIDTH, base + length, 0.0));

            weights.push(BoneWeights {
                name: bone_name(index),
                offset: Mat4::new_translation(&Vec3::new(0.0, -base, 0.0)),
                weights: vec![(first, 1.0), (first + 1, 1.0)],
            });
        }
        (positions, weights)
    }

    /// Chain skeleton and its clip over the registry the mesh filled
    fn clip(&self, bones: BoneRegistry) -> Result<AnimationClip, DemoSceneError> {
        let length = self.config.bone_length;
        let duration = self.config.duration;
        let swing = Quat::from_axis_angle(&Vec3::z_axis(), utils::deg_to_rad(self.config.swing_degrees));

        let mut skeleton = Skeleton::new("Armature", Mat4::identity());
        let mut channels = Vec::with_capacity(self.config.bone_count + 1);
        let mut parent = skeleton.root();

        for index in 0..=self.config.bone_count {
            let offset = if index == 0 { Vec3::zeros() } else { Vec3::new(0.0, length, 0.0) };
            let is_tip = index == self.config.bone_count;
            let name = if is_tip { "tip".to_owned() } else { bone_name(index) };

            parent = skeleton.add_child(parent, name.as_str(), Mat4::new_translation(&offset))?;

            let rotations = if is_tip {
                KeyTrack::constant(Quat::identity())
            } else {
                KeyTrack::new(vec![
                    Keyframe::new(0.0, Quat::identity()),
                    Keyframe::new(duration * 0.5, swing),
                    Keyframe::new(duration, Quat::identity()),
                ])?
            };
            channels.push(BoneChannel::new(
                name,
                KeyTrack::constant(offset),
                rotations,
                KeyTrack::constant(Vec3::new(1.0, 1.0, 1.0)),
            ));
        }

        Ok(AnimationClip::new(
            "swing",
            duration,
            self.config.ticks_per_second,
            skeleton,
            channels,
            bones,
        )?)
    }
}

impl DemoScene for SkeletalAnimationScene {
    fn name(&self) -> &'static str {
        NAME
    }

    fn setup(&mut self) -> Result<(), DemoSceneError> {
        let (positions, bone_weights) = self.arm_mesh();
        let mut registry = BoneRegistry::new();
        let skins = SkinBinding::extract_weights(&mut registry, &bone_weights, positions.len())?;

        let mut library = ModelLibrary::new();
        let model = library.insert(Model::new("arm", positions)?);
        let mut animator = Animator::new(self.clip(registry)?);
        animator.sample_at(0.0)?;

        log::info!(
            "Skeletal animation scene: {} bones, {:.2}s loop",
            animator.clip().bones().len(),
            animator.clip().duration_seconds()
        );

        self.loaded = Some(Loaded {
            library,
            model,
            skins,
            animator,
        });
        Ok(())
    }

    fn update(&mut self, delta_time: f32) -> Result<(), DemoSceneError> {
        let loaded = self.loaded.as_mut().ok_or(DemoSceneError::NotSetUp(NAME))?;
        loaded.animator.update(delta_time)?;
        Ok(())
    }

    fn render(&mut self, camera: &Camera, sink: &mut dyn RenderSink) -> Result<CullStats, DemoSceneError> {
        let positions = self.skinned_positions().ok_or(DemoSceneError::NotSetUp(NAME))?;
        let loaded = self.loaded.as_ref().ok_or(DemoSceneError::NotSetUp(NAME))?;

        let bounds = BoundingSphere::from_positions(&positions)?;
        if !bounds.is_on_frustum(&camera.frustum()?) {
            log::trace!("Skinned mesh outside the frustum at t={}", loaded.animator.current_time());
            return Ok(CullStats { displayed: 0, total: 1 });
        }

        sink.set_bone_matrices(loaded.animator.bone_matrices());
        sink.draw_model(loaded.model, &Mat4::identity());
        Ok(CullStats { displayed: 1, total: 1 })
    }

    fn teardown(&mut self) {
        if let Some(loaded) = self.loaded.take() {
            log::debug!("Skeletal animation scene released {} models", loaded.library.len());
        }
    }
}
