//! Keyframe tracks and their sampling
//!
//! A track is a time-sorted list of keys for one property of one node.
//! Position, rotation and scale each get their own track, with their own key
//! count and timestamps.

use crate::animation::AnimationError;
use crate::foundation::math::{Quat, Vec3};

/// Values that can be blended between two keys
pub trait Interpolate: Copy {
    /// Blend from `self` towards `other` by `factor` in `[0, 1]`
    fn interpolate(&self, other: &Self, factor: f32) -> Self;
}

impl Interpolate for Vec3 {
    fn interpolate(&self, other: &Self, factor: f32) -> Self {
        self.lerp(other, factor)
    }
}

impl Interpolate for Quat {
    fn interpolate(&self, other: &Self, factor: f32) -> Self {
        // slerp is undefined for opposite rotations, fall back to nlerp there
        let blended = self
            .try_slerp(other, factor, f32::EPSILON)
            .unwrap_or_else(|| self.nlerp(other, factor));
        Quat::new_normalize(blended.into_inner())
    }
}

/// A value at a point on the clip timeline, in ticks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe<T> {
    /// Key value
    pub value: T,
    /// Timestamp in ticks
    pub time: f32,
}

impl<T> Keyframe<T> {
    /// Create a key
    pub const fn new(time: f32, value: T) -> Self {
        Self { value, time }
    }
}

/// Time-sorted keys for one property
#[derive(Debug, Clone, PartialEq)]
pub struct KeyTrack<T> {
    keys: Vec<Keyframe<T>>,
}

impl<T: Interpolate> KeyTrack<T> {
    /// Build a track, sorting keys by timestamp
    ///
    /// A track needs at least one key to be sampled.
    pub fn new(mut keys: Vec<Keyframe<T>>) -> Result<Self, AnimationError> {
        if keys.is_empty() {
            return Err(AnimationError::EmptyTrack);
        }
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Ok(Self { keys })
    }

    /// Track holding a single constant key
    #[must_use]
    pub fn constant(value: T) -> Self {
        Self {
            keys: vec![Keyframe::new(0.0, value)],
        }
    }

    /// Keys in time order
    #[must_use]
    pub fn keys(&self) -> &[Keyframe<T>] {
        &self.keys
    }

    /// Last time this track can be sampled up to, `None` when any time works
    #[must_use]
    pub fn end_time(&self) -> Option<f32> {
        match self.keys.as_slice() {
            [_] => None,
            keys => keys.last().map(|key| key.time),
        }
    }

    /// Index of the key starting the segment that contains `time`
    ///
    /// Finds the first `i` with `time < keys[i + 1].time`. Times past the last
    /// key have no bracketing segment and are reported as an error.
    pub fn bracket(&self, time: f32) -> Result<usize, AnimationError> {
        self.keys
            .windows(2)
            .position(|pair| time < pair[1].time)
            .ok_or_else(|| AnimationError::KeyframeOutOfRange {
                time,
                last_key: self.keys.last().map_or(0.0, |key| key.time),
            })
    }

    /// Value of the track at `time`
    ///
    /// A single-key track returns its key for any time. Otherwise the two keys
    /// bracketing `time` are blended; times before the first key clamp to it.
    pub fn sample(&self, time: f32) -> Result<T, AnimationError> {
        if let [only] = self.keys.as_slice() {
            return Ok(only.value);
        }

        let index = self.bracket(time)?;
        let (from, to) = (&self.keys[index], &self.keys[index + 1]);
        Ok(from.value.interpolate(&to.value, scale_factor(from.time, to.time, time)))
    }
}

/// Normalised position of `time` between two key timestamps, clamped to `[0, 1]`
#[must_use]
pub fn scale_factor(last_time: f32, next_time: f32, time: f32) -> f32 {
    let span = next_time - last_time;
    if span <= f32::EPSILON {
        return 0.0;
    }
    ((time - last_time) / span).clamp(0.0, 1.0)
}
