//! Per-vertex skin weights

use crate::animation::skeleton::BoneRegistry;
use crate::animation::AnimationError;
use crate::foundation::math::Mat4;

/// Bones that can influence one vertex
pub const MAX_BONE_INFLUENCE: usize = 4;

/// Bone ids and weights of one vertex, `None` marks an empty slot
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VertexSkin {
    /// Palette slots
    pub bone_ids: [Option<usize>; MAX_BONE_INFLUENCE],
    /// Weights matching `bone_ids`
    pub weights: [f32; MAX_BONE_INFLUENCE],
}

impl VertexSkin {
    /// Store an influence in the first empty slot
    ///
    /// Returns false when every slot is taken; the influence is dropped.
    pub fn push_bone_data(&mut self, bone_id: usize, weight: f32) -> bool {
        match self.bone_ids.iter().position(Option::is_none) {
            Some(slot) => {
                self.bone_ids[slot] = Some(bone_id);
                self.weights[slot] = weight;
                true
            }
            None => false,
        }
    }

    /// Number of occupied slots
    #[must_use]
    pub fn influence_count(&self) -> usize {
        self.bone_ids.iter().flatten().count()
    }

    /// Weights rescaled to sum to one; all zero when the vertex has no weight
    #[must_use]
    pub fn normalized_weights(&self) -> [f32; MAX_BONE_INFLUENCE] {
        let total: f32 = self.weights.iter().sum();
        if total <= f32::EPSILON {
            return [0.0; MAX_BONE_INFLUENCE];
        }
        self.weights.map(|weight| weight / total)
    }

    /// Blend of palette matrices this vertex is skinned with
    #[must_use]
    pub fn blended_matrix(&self, palette: &[Mat4]) -> Mat4 {
        let weights = self.normalized_weights();
        self.bone_ids
            .iter()
            .zip(weights)
            .filter_map(|(id, weight)| id.and_then(|id| palette.get(id)).map(|matrix| matrix * weight))
            .fold(Mat4::zeros(), |sum, matrix| sum + matrix)
    }
}

/// Weights of one bone as stored by a mesh
#[derive(Debug, Clone, PartialEq)]
pub struct BoneWeights {
    /// Bone name
    pub name: String,
    /// Inverse bind pose
    pub offset: Mat4,
    /// `(vertex index, weight)` pairs
    pub weights: Vec<(usize, f32)>,
}

/// Turns per-bone weight lists into per-vertex skin data
pub struct SkinBinding;

impl SkinBinding {
    /// Build skin data for `vertex_count` vertices
    ///
    /// Bones not yet in the registry are registered with the offset the mesh
    /// supplies. Influences beyond [`MAX_BONE_INFLUENCE`] per vertex are
    /// dropped with a debug log.
    pub fn extract_weights(
        registry: &mut BoneRegistry,
        bones: &[BoneWeights],
        vertex_count: usize,
    ) -> Result<Vec<VertexSkin>, AnimationError> {
        let mut skins = vec![VertexSkin::default(); vertex_count];
        let mut dropped = 0usize;

        for bone in bones {
            let bone_id = registry.register(&bone.name, bone.offset)?;

            for &(vertex, weight) in &bone.weights {
                let skin = skins.get_mut(vertex).ok_or(AnimationError::VertexOutOfRange {
                    bone: bone.name.clone(),
                    vertex,
                    vertex_count,
                })?;
                if !skin.push_bone_data(bone_id, weight) {
                    dropped += 1;
                }
            }
        }

        if dropped > 0 {
            log::debug!("Dropped {} bone influences beyond {} per vertex", dropped, MAX_BONE_INFLUENCE);
        }
        Ok(skins)
    }
}
