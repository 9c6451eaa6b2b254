//! Shared renderable models
//!
//! Entities reference models by [`ModelId`]; many entities may point at the
//! same model, which is what the instancing and culling demos rely on.

use crate::foundation::collections::{ModelId, SlotMap};
use crate::foundation::math::Vec3;
use crate::scene::bounding::BoundingSphere;
use crate::scene::SceneError;

/// Vertex positions of a mesh plus its precomputed bounds
#[derive(Debug, Clone)]
pub struct Model {
    name: String,
    positions: Vec<Vec3>,
    bounds: BoundingSphere,
}

impl Model {
    /// Create a model, computing its bounding sphere from the vertex positions
    pub fn new(name: impl Into<String>, positions: Vec<Vec3>) -> Result<Self, SceneError> {
        let name = name.into();
        let bounds = BoundingSphere::from_positions(&positions).map_err(|err| {
            log::warn!("Model '{name}' has no vertices, cannot bound it");
            err
        })?;

        log::debug!(
            "Model '{}': {} vertices, bounds center={:?} radius={}",
            name,
            positions.len(),
            bounds.center,
            bounds.radius
        );

        Ok(Self {
            name,
            positions,
            bounds,
        })
    }

    /// Axis-aligned unit cube centred on the origin
    pub fn unit_cube(name: impl Into<String>) -> Result<Self, SceneError> {
        let mut positions = Vec::with_capacity(8);
        for corner in 0..8u8 {
            let pick = |bit: u8| if corner & bit != 0 { 0.5 } else { -0.5 };
            positions.push(Vec3::new(pick(1), pick(2), pick(4)));
        }
        Self::new(name, positions)
    }

    /// Model name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Vertex positions
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Model-space bounding sphere
    #[must_use]
    pub const fn bounds(&self) -> &BoundingSphere {
        &self.bounds
    }
}

/// Store of models shared between entities
#[derive(Debug, Default)]
pub struct ModelLibrary {
    models: SlotMap<ModelId, Model>,
}

impl ModelLibrary {
    /// Create an empty library
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a model and return its handle
    pub fn insert(&mut self, model: Model) -> ModelId {
        self.models.insert(model)
    }

    /// Look up a model
    #[must_use]
    pub fn get(&self, id: ModelId) -> Option<&Model> {
        self.models.get(id)
    }

    /// Remove a model; entities keep their (now stale) handle
    pub fn remove(&mut self, id: ModelId) -> Option<Model> {
        self.models.remove(id)
    }

    /// Number of models
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether the library holds no models
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
