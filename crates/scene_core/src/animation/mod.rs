//! Skeletal animation
//!
//! Keyframe tracks are grouped into per-node channels, channels into a clip
//! over a bind-pose [`Skeleton`], and an [`Animator`] turns the clip time into
//! a flat palette of skinning matrices indexed by bone id.

pub mod animator;
pub mod channel;
pub mod clip;
pub mod keyframe;
pub mod skeleton;
pub mod skin;

pub use animator::Animator;
pub use channel::BoneChannel;
pub use clip::AnimationClip;
pub use keyframe::{Interpolate, KeyTrack, Keyframe};
pub use skeleton::{BoneInfo, BoneRegistry, Skeleton, SkeletonNode, MAX_BONES};
pub use skin::{BoneWeights, SkinBinding, VertexSkin, MAX_BONE_INFLUENCE};

use thiserror::Error;

/// Animation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// A track was built with no keys
    #[error("Keyframe track has no keys")]
    EmptyTrack,

    /// Sample time lies past the last key of a track
    #[error("No keyframe brackets time {time} (last key at {last_key})")]
    KeyframeOutOfRange {
        /// Requested time in ticks
        time: f32,
        /// Timestamp of the last key
        last_key: f32,
    },

    /// Sample time lies past the last key of a named channel
    #[error("Channel '{channel}' has no keyframe bracketing time {time} (last key at {last_key})")]
    ChannelOutOfRange {
        /// Animated node name
        channel: String,
        /// Requested time in ticks
        time: f32,
        /// Timestamp of the last key
        last_key: f32,
    },

    /// A channel runs out of keys before the clip ends
    #[error("Channel '{channel}' ends at {last_key} but the clip lasts {duration} ticks")]
    ChannelTooShort {
        /// Animated node name
        channel: String,
        /// Earliest last key among the channel's tracks
        last_key: f32,
        /// Clip length in ticks
        duration: f32,
    },

    /// Clip duration must be positive
    #[error("Invalid clip duration: {0}")]
    InvalidDuration(f32),

    /// Clip tick rate must be positive
    #[error("Invalid ticks per second: {0}")]
    InvalidTickRate(f32),

    /// Skeleton node index does not exist
    #[error("Unknown skeleton node: {0}")]
    UnknownNode(usize),

    /// Registering another bone would overflow the palette
    #[error("Cannot register bone '{name}': palette holds at most {max} bones")]
    TooManyBones {
        /// Bone that did not fit
        name: String,
        /// Palette size
        max: usize,
    },

    /// A bone weight refers to a vertex the mesh does not have
    #[error("Bone '{bone}' weights vertex {vertex} but the mesh has {vertex_count}")]
    VertexOutOfRange {
        /// Bone name
        bone: String,
        /// Offending vertex index
        vertex: usize,
        /// Mesh vertex count
        vertex_count: usize,
    },
}
