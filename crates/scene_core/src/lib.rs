//! # Scene Core
//!
//! CPU-side core of a set of real-time rendering technique demos: a transform
//! hierarchy with dirty propagation, frustum culling with bounding spheres,
//! skeletal animation evaluation, instancing, a pooled particle system and a
//! noise-shaped grass field.
//!
//! ## Features
//!
//! - **Scene graph**: Arena-backed hierarchy resolved top-down each frame
//! - **Frustum culling**: Six inward planes tested against world-space spheres
//! - **Skeletal animation**: Keyframe sampling into a flat skinning palette
//! - **Headless rendering**: Draws go through the [`render::RenderSink`] trait
//!
//! ## Quick Start
//!
//! ```rust
//! use scene_core::prelude::*;
//!
//! let mut library = ModelLibrary::new();
//! let cube = library.insert(Model::unit_cube("cube")?);
//!
//! let mut graph = SceneGraph::new();
//! let root = graph.spawn(&library, cube)?;
//! graph.transform_mut(root)?.set_local_position(Vec3::new(0.0, 0.0, -10.0));
//! graph.update();
//!
//! let camera = Camera::default();
//! let mut sink = RecordingSink::new();
//! let stats = graph.render(&camera.frustum()?, &mut sink);
//! assert_eq!(stats.displayed, 1);
//! # Ok::<(), SceneError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod animation;
pub mod config;
pub mod foundation;
pub mod particles;
pub mod render;
pub mod scene;
pub mod scenes;

/// Common imports for scene core users
pub mod prelude {
    pub use crate::{
        animation::{AnimationClip, AnimationError, Animator, BoneRegistry, Skeleton},
        config::{Config, ConfigError, DemoConfig, FrameOrder},
        foundation::{
            collections::{EntityId, ModelId},
            math::{Mat4, Quat, Vec3, Vec4},
            time::Timer,
        },
        particles::{ParticleEmitter, ParticleProps, ParticleSystem},
        render::{Camera, InstanceData, RecordingSink, RenderSink},
        scene::{BoundingSphere, CullStats, Frustum, Model, ModelLibrary, SceneError, SceneGraph, Transform},
        scenes::{DemoScene, DemoSceneError, SceneKind},
    };
}
