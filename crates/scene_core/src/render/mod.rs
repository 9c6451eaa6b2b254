//! Rendering collaborators
//!
//! The scene core never talks to a graphics API. Everything it wants drawn goes
//! through [`RenderSink`], which a real backend implements by binding the model
//! matrix and issuing the draw call. [`RecordingSink`] is the headless
//! implementation used by the demo runner and the tests.

pub mod camera;
pub mod instance;

pub use camera::{Camera, ProjectionProperties, TranslationDirection};
pub use instance::InstanceData;

use crate::foundation::collections::ModelId;
use crate::foundation::math::Mat4;

/// Receiver of draw requests produced by the scene traversals
pub trait RenderSink {
    /// Draw one model with the given model matrix
    fn draw_model(&mut self, model: ModelId, model_matrix: &Mat4);

    /// Draw a model once per instance record
    fn draw_instanced(&mut self, model: Option<ModelId>, instances: &[InstanceData]);

    /// Upload the skinning palette used by subsequent skinned draws
    fn set_bone_matrices(&mut self, matrices: &[Mat4]);
}

/// Headless sink that records what would have been drawn
#[derive(Debug, Default)]
pub struct RecordingSink {
    draws: Vec<(ModelId, Mat4)>,
    instanced_draws: usize,
    instances: usize,
    instance_bytes: usize,
    bone_matrices: Vec<Mat4>,
}

impl RecordingSink {
    /// Create an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything recorded so far (call between frames)
    pub fn clear(&mut self) {
        self.draws.clear();
        self.instanced_draws = 0;
        self.instances = 0;
        self.instance_bytes = 0;
        self.bone_matrices.clear();
    }

    /// Individual model draws, in submission order
    #[must_use]
    pub fn draws(&self) -> &[(ModelId, Mat4)] {
        &self.draws
    }

    /// Number of instanced draw calls
    #[must_use]
    pub const fn instanced_draws(&self) -> usize {
        self.instanced_draws
    }

    /// Total instances across instanced draws
    #[must_use]
    pub const fn instance_count(&self) -> usize {
        self.instances
    }

    /// Bytes that would have been uploaded for instance buffers
    #[must_use]
    pub const fn instance_bytes(&self) -> usize {
        self.instance_bytes
    }

    /// Last uploaded skinning palette
    #[must_use]
    pub fn bone_matrices(&self) -> &[Mat4] {
        &self.bone_matrices
    }
}

impl RenderSink for RecordingSink {
    fn draw_model(&mut self, model: ModelId, model_matrix: &Mat4) {
        self.draws.push((model, *model_matrix));
    }

    fn draw_instanced(&mut self, _model: Option<ModelId>, instances: &[InstanceData]) {
        self.instanced_draws += 1;
        self.instances += instances.len();
        self.instance_bytes += instance::as_bytes(instances).len();
    }

    fn set_bone_matrices(&mut self, matrices: &[Mat4]) {
        self.bone_matrices.clear();
        self.bone_matrices.extend_from_slice(matrices);
    }
}
