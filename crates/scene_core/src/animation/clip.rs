//! Animation clip: timeline, bind-pose hierarchy and keyframed channels

use std::collections::HashMap;

use crate::animation::channel::BoneChannel;
use crate::animation::skeleton::{BoneRegistry, Skeleton};
use crate::animation::AnimationError;

/// A looping animation over a skeleton
#[derive(Debug, Clone)]
pub struct AnimationClip {
    name: String,
    duration: f32,
    ticks_per_second: f32,
    skeleton: Skeleton,
    channels: HashMap<String, BoneChannel>,
    bones: BoneRegistry,
}

impl AnimationClip {
    /// Assemble a clip
    ///
    /// `bones` is the registry the mesh weights were extracted with. Channels
    /// animating nodes the mesh never referenced are added to it with identity
    /// offsets, so every animated bone has a palette slot.
    ///
    /// Every multi-key track must reach `duration`, since playback samples
    /// anywhere in `[0, duration)`.
    pub fn new(
        name: impl Into<String>,
        duration: f32,
        ticks_per_second: f32,
        skeleton: Skeleton,
        channels: Vec<BoneChannel>,
        mut bones: BoneRegistry,
    ) -> Result<Self, AnimationError> {
        if !(duration > 0.0 && duration.is_finite()) {
            return Err(AnimationError::InvalidDuration(duration));
        }
        if !(ticks_per_second > 0.0 && ticks_per_second.is_finite()) {
            return Err(AnimationError::InvalidTickRate(ticks_per_second));
        }

        for channel in &channels {
            if let Some(last_key) = channel.end_time().filter(|&end| end < duration) {
                return Err(AnimationError::ChannelTooShort {
                    channel: channel.name().to_owned(),
                    last_key,
                    duration,
                });
            }
        }

        let before = bones.len();
        for channel in &channels {
            bones.ensure(channel.name())?;
        }

        let name = name.into();
        log::debug!(
            "Animation '{}': {} ticks at {} tps, {} channels, {} bones ({} channel-only)",
            name,
            duration,
            ticks_per_second,
            channels.len(),
            bones.len(),
            bones.len() - before
        );

        Ok(Self {
            name,
            duration,
            ticks_per_second,
            skeleton,
            channels: channels.into_iter().map(|channel| (channel.name().to_owned(), channel)).collect(),
            bones,
        })
    }

    /// Clip name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Length in ticks
    #[must_use]
    pub const fn duration(&self) -> f32 {
        self.duration
    }

    /// Playback rate
    #[must_use]
    pub const fn ticks_per_second(&self) -> f32 {
        self.ticks_per_second
    }

    /// Length in seconds
    #[must_use]
    pub fn duration_seconds(&self) -> f32 {
        self.duration / self.ticks_per_second
    }

    /// Bind-pose hierarchy
    #[must_use]
    pub const fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    /// Channel animating the node called `name`
    #[must_use]
    pub fn channel(&self, name: &str) -> Option<&BoneChannel> {
        self.channels.get(name)
    }

    /// Bones with palette slots
    #[must_use]
    pub const fn bones(&self) -> &BoneRegistry {
        &self.bones
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::keyframe::{KeyTrack, Keyframe};
    use crate::foundation::math::{Mat4, Quat, Vec3};

    fn channel(name: &str) -> BoneChannel {
        BoneChannel::new(
            name,
            KeyTrack::constant(Vec3::zeros()),
            KeyTrack::constant(Quat::identity()),
            KeyTrack::constant(Vec3::new(1.0, 1.0, 1.0)),
        )
    }

    #[test]
    fn test_channel_only_bones_are_registered() {
        let mut bones = BoneRegistry::new();
        bones.register("skinned", Mat4::new_scaling(2.0)).unwrap();

        let clip = AnimationClip::new(
            "wave",
            10.0,
            5.0,
            Skeleton::new("root", Mat4::identity()),
            vec![channel("skinned"), channel("helper")],
            bones,
        )
        .unwrap();

        assert_eq!(clip.bones().len(), 2);
        assert_eq!(clip.bones().get("skinned").map(|info| info.id), Some(0));
        assert_eq!(clip.bones().get("helper").map(|info| info.offset), Some(Mat4::identity()));
        assert!(clip.channel("helper").is_some());
        assert!((clip.duration_seconds() - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_rejects_bad_timeline() {
        let skeleton = Skeleton::new("root", Mat4::identity());
        let zero = AnimationClip::new("a", 0.0, 25.0, skeleton.clone(), Vec::new(), BoneRegistry::new());
        assert!(matches!(zero, Err(AnimationError::InvalidDuration(_))));

        let rate = AnimationClip::new("a", 10.0, -1.0, skeleton, Vec::new(), BoneRegistry::new());
        assert!(matches!(rate, Err(AnimationError::InvalidTickRate(_))));
    }

    #[test]
    fn test_channel_ending_early_rejected() {
        let rotations = KeyTrack::new(vec![
            Keyframe::new(0.0, Quat::identity()),
            Keyframe::new(8.0, Quat::from_axis_angle(&Vec3::y_axis(), 1.0)),
        ])
        .unwrap();
        let short = BoneChannel::new(
            "arm",
            KeyTrack::constant(Vec3::zeros()),
            rotations,
            KeyTrack::constant(Vec3::new(1.0, 1.0, 1.0)),
        );
        let skeleton = Skeleton::new("root", Mat4::identity());

        let err = AnimationClip::new("a", 10.0, 5.0, skeleton.clone(), vec![short.clone()], BoneRegistry::new())
            .unwrap_err();
        assert_eq!(
            err,
            AnimationError::ChannelTooShort {
                channel: "arm".to_owned(),
                last_key: 8.0,
                duration: 10.0,
            }
        );

        // The same channel covers a clip that ends at its last key
        assert!(AnimationClip::new("a", 8.0, 5.0, skeleton, vec![short], BoneRegistry::new()).is_ok());
    }
}
