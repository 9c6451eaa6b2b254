//! Scene graph, transforms and visibility
//!
//! Bottom-up: [`Transform`] holds local parameters and a cached global matrix,
//! [`Frustum`] and [`BoundingSphere`] answer visibility, and [`SceneGraph`]
//! ties them into a hierarchy that is updated and rendered once per frame.

pub mod bounding;
pub mod frustum;
pub mod model;
pub mod scene_graph;
pub mod transform;

pub use bounding::BoundingSphere;
pub use frustum::{Frustum, FrustumFace, Plane};
pub use model::{Model, ModelLibrary};
pub use scene_graph::{CullStats, EntityNode, SceneGraph};
pub use transform::Transform;

use crate::foundation::collections::{EntityId, ModelId};
use thiserror::Error;

/// Scene errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// Handle does not refer to a live entity
    #[error("Unknown entity: {0:?}")]
    UnknownEntity(EntityId),

    /// Handle does not refer to a model in the library
    #[error("Unknown model: {0:?}")]
    UnknownModel(ModelId),

    /// Reparenting would make an entity its own ancestor
    #[error("Cannot attach {child:?} under {parent:?}: would create a cycle")]
    CyclicHierarchy {
        /// Entity being moved
        child: EntityId,
        /// Requested new parent
        parent: EntityId,
    },

    /// Bounding volume requested for a mesh with no vertices
    #[error("Cannot bound an empty vertex set")]
    EmptyVertexSet,

    /// Camera parameters that do not describe a frustum
    #[error("Invalid frustum: {0}")]
    InvalidFrustum(String),
}
