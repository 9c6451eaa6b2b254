//! Animated node channel: position, rotation and scale tracks for one node

use crate::animation::keyframe::KeyTrack;
use crate::animation::AnimationError;
use crate::foundation::math::{Mat4, Quat, Vec3};

/// Keyframed local transform of a single named node
#[derive(Debug, Clone, PartialEq)]
pub struct BoneChannel {
    name: String,
    positions: KeyTrack<Vec3>,
    rotations: KeyTrack<Quat>,
    scales: KeyTrack<Vec3>,
}

impl BoneChannel {
    /// Create a channel from its three tracks
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        positions: KeyTrack<Vec3>,
        rotations: KeyTrack<Quat>,
        scales: KeyTrack<Vec3>,
    ) -> Self {
        Self {
            name: name.into(),
            positions,
            rotations,
            scales,
        }
    }

    /// Name of the animated node
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position track
    #[must_use]
    pub const fn positions(&self) -> &KeyTrack<Vec3> {
        &self.positions
    }

    /// Rotation track
    #[must_use]
    pub const fn rotations(&self) -> &KeyTrack<Quat> {
        &self.rotations
    }

    /// Scale track
    #[must_use]
    pub const fn scales(&self) -> &KeyTrack<Vec3> {
        &self.scales
    }

    /// Earliest end among the multi-key tracks, `None` if every track is constant
    #[must_use]
    pub fn end_time(&self) -> Option<f32> {
        [self.positions.end_time(), self.rotations.end_time(), self.scales.end_time()]
            .into_iter()
            .flatten()
            .reduce(f32::min)
    }

    /// Local transform at `time`: translation * rotation * scale
    pub fn local_transform(&self, time: f32) -> Result<Mat4, AnimationError> {
        let position = self.positions.sample(time).map_err(|err| self.context(err))?;
        let rotation = self.rotations.sample(time).map_err(|err| self.context(err))?;
        let scale = self.scales.sample(time).map_err(|err| self.context(err))?;

        Ok(Mat4::new_translation(&position) * rotation.to_homogeneous() * Mat4::new_nonuniform_scaling(&scale))
    }

    fn context(&self, err: AnimationError) -> AnimationError {
        match err {
            AnimationError::KeyframeOutOfRange { time, last_key } => AnimationError::ChannelOutOfRange {
                channel: self.name.clone(),
                time,
                last_key,
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::keyframe::Keyframe;
    use crate::foundation::math::Mat4Ext;
    use approx::assert_relative_eq;

    #[test]
    fn test_tracks_sample_independently() {
        // Three keys for position, two for rotation, one for scale
        let channel = BoneChannel::new(
            "arm",
            KeyTrack::new(vec![
                Keyframe::new(0.0, Vec3::zeros()),
                Keyframe::new(2.0, Vec3::new(2.0, 0.0, 0.0)),
                Keyframe::new(4.0, Vec3::new(2.0, 2.0, 0.0)),
            ])
            .unwrap(),
            KeyTrack::new(vec![
                Keyframe::new(0.0, Quat::identity()),
                Keyframe::new(8.0, Quat::identity()),
            ])
            .unwrap(),
            KeyTrack::constant(Vec3::new(2.0, 2.0, 2.0)),
        );

        let local = channel.local_transform(1.0).unwrap();
        assert_relative_eq!(local.transform_point3(&Vec3::zeros()), Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(local.basis_lengths(), Vec3::new(2.0, 2.0, 2.0), epsilon = 1e-6);
    }

    #[test]
    fn test_out_of_range_names_channel() {
        let channel = BoneChannel::new(
            "hand",
            KeyTrack::new(vec![Keyframe::new(0.0, Vec3::zeros()), Keyframe::new(1.0, Vec3::zeros())]).unwrap(),
            KeyTrack::constant(Quat::identity()),
            KeyTrack::constant(Vec3::new(1.0, 1.0, 1.0)),
        );

        match channel.local_transform(5.0) {
            Err(AnimationError::ChannelOutOfRange { channel, time, .. }) => {
                assert_eq!(channel, "hand");
                assert_relative_eq!(time, 5.0);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
