//! Clip playback and skinning palette evaluation
//!
//! Each update advances the clip time by `delta_time * ticks_per_second`,
//! wraps it into `[0, duration)` and walks the bind-pose hierarchy top-down.
//! Animated nodes use their sampled channel transform, the rest keep their
//! bind pose. Nodes that are bones write `global * offset` into the palette.

use crate::animation::clip::AnimationClip;
use crate::animation::skeleton::MAX_BONES;
use crate::animation::AnimationError;
use crate::foundation::math::Mat4;

/// Wrap `time` into `[0, duration)`
///
/// `rem_euclid` rounds tiny negative inputs up to exactly `duration`, which
/// would land past the last key of a full-length track.
fn wrap_time(time: f32, duration: f32) -> f32 {
    let wrapped = time.rem_euclid(duration);
    if wrapped >= duration {
        0.0
    } else {
        wrapped
    }
}

/// Plays one clip and owns the resulting skinning palette
#[derive(Debug, Clone)]
pub struct Animator {
    clip: AnimationClip,
    current_time: f32,
    bone_matrices: Vec<Mat4>,
}

impl Animator {
    /// Create an animator at time zero with an identity palette
    #[must_use]
    pub fn new(clip: AnimationClip) -> Self {
        Self {
            clip,
            current_time: 0.0,
            bone_matrices: vec![Mat4::identity(); MAX_BONES],
        }
    }

    /// Switch to another clip, restarting from time zero
    pub fn play(&mut self, clip: AnimationClip) {
        log::debug!("Playing animation '{}'", clip.name());
        self.clip = clip;
        self.current_time = 0.0;
        self.bone_matrices.fill(Mat4::identity());
    }

    /// Advance playback by `delta_time` seconds and re-evaluate the palette
    pub fn update(&mut self, delta_time: f32) -> Result<(), AnimationError> {
        let time = self.current_time + self.clip.ticks_per_second() * delta_time;
        self.sample_at(time)
    }

    /// Jump to `time` ticks (wrapped into the clip) and re-evaluate the palette
    pub fn sample_at(&mut self, time: f32) -> Result<(), AnimationError> {
        self.current_time = wrap_time(time, self.clip.duration());
        self.evaluate()
    }

    fn evaluate(&mut self) -> Result<(), AnimationError> {
        let skeleton = self.clip.skeleton();
        let mut stack = vec![(skeleton.root(), Mat4::identity())];

        while let Some((index, parent_global)) = stack.pop() {
            let Some(node) = skeleton.node(index) else {
                continue;
            };

            let local = match self.clip.channel(&node.name) {
                Some(channel) => channel.local_transform(self.current_time)?,
                None => node.transformation,
            };
            let global = parent_global * local;

            if let Some(bone) = self.clip.bones().get(&node.name) {
                if let Some(slot) = self.bone_matrices.get_mut(bone.id) {
                    *slot = global * bone.offset;
                }
            }

            stack.extend(node.children.iter().map(|&child| (child, global)));
        }

        Ok(())
    }

    /// Current clip time in ticks, always in `[0, duration)`
    #[must_use]
    pub const fn current_time(&self) -> f32 {
        self.current_time
    }

    /// Clip being played
    #[must_use]
    pub const fn clip(&self) -> &AnimationClip {
        &self.clip
    }

    /// Skinning palette, [`MAX_BONES`] entries indexed by bone id
    #[must_use]
    pub fn bone_matrices(&self) -> &[Mat4] {
        &self.bone_matrices
    }
}
