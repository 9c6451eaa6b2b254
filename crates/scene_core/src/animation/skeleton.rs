//! Bind-pose node hierarchy and the bone registry
//!
//! The hierarchy is a flat list of nodes with child indices, root at index 0.
//! The registry maps bone names to the slot they occupy in the skinning
//! palette. Mesh weight extraction and clip construction share one registry,
//! so a bone seen by both gets a single id.

use std::collections::HashMap;

use crate::animation::AnimationError;
use crate::foundation::math::Mat4;

/// Size of the skinning palette uploaded to the renderer
pub const MAX_BONES: usize = 100;

/// Node of the bind-pose hierarchy
#[derive(Debug, Clone, PartialEq)]
pub struct SkeletonNode {
    /// Node name, matched against channel and bone names
    pub name: String,
    /// Bind-pose local transform
    pub transformation: Mat4,
    /// Indices of child nodes
    pub children: Vec<usize>,
}

/// Bind-pose hierarchy
#[derive(Debug, Clone, PartialEq)]
pub struct Skeleton {
    nodes: Vec<SkeletonNode>,
}

impl Skeleton {
    /// Skeleton holding only a root node
    #[must_use]
    pub fn new(root_name: impl Into<String>, root_transformation: Mat4) -> Self {
        Self {
            nodes: vec![SkeletonNode {
                name: root_name.into(),
                transformation: root_transformation,
                children: Vec::new(),
            }],
        }
    }

    /// Append a node under `parent`, returning its index
    pub fn add_child(
        &mut self,
        parent: usize,
        name: impl Into<String>,
        transformation: Mat4,
    ) -> Result<usize, AnimationError> {
        if parent >= self.nodes.len() {
            return Err(AnimationError::UnknownNode(parent));
        }
        let index = self.nodes.len();
        self.nodes.push(SkeletonNode {
            name: name.into(),
            transformation,
            children: Vec::new(),
        });
        self.nodes[parent].children.push(index);
        Ok(index)
    }

    /// Root node index
    #[must_use]
    pub const fn root(&self) -> usize {
        0
    }

    /// All nodes, root first
    #[must_use]
    pub fn nodes(&self) -> &[SkeletonNode] {
        &self.nodes
    }

    /// Node by index
    #[must_use]
    pub fn node(&self, index: usize) -> Option<&SkeletonNode> {
        self.nodes.get(index)
    }

    /// Number of nodes
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false, a skeleton has at least its root
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Palette slot and inverse bind pose of a bone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoneInfo {
    /// Index into the skinning palette
    pub id: usize,
    /// Mesh space to bone space (inverse bind pose)
    pub offset: Mat4,
}

/// Deduplicating bone name to palette slot map
///
/// Ids are handed out densely in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoneRegistry {
    bones: HashMap<String, BoneInfo>,
}

impl BoneRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of `name`, registering it with `offset` if unseen
    ///
    /// An already registered bone keeps its id and its original offset.
    pub fn register(&mut self, name: &str, offset: Mat4) -> Result<usize, AnimationError> {
        if let Some(info) = self.bones.get(name) {
            return Ok(info.id);
        }

        let id = self.bones.len();
        if id >= MAX_BONES {
            return Err(AnimationError::TooManyBones {
                name: name.to_owned(),
                max: MAX_BONES,
            });
        }
        self.bones.insert(name.to_owned(), BoneInfo { id, offset });
        log::trace!("Registered bone '{}' as {}", name, id);
        Ok(id)
    }

    /// Id of `name`, registering it with an identity offset if unseen
    pub fn ensure(&mut self, name: &str) -> Result<usize, AnimationError> {
        self.register(name, Mat4::identity())
    }

    /// Look up a bone
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&BoneInfo> {
        self.bones.get(name)
    }

    /// Number of registered bones
    #[must_use]
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    /// Whether no bone is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    /// Iterate over `(name, info)` pairs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BoneInfo)> {
        self.bones.iter().map(|(name, info)| (name.as_str(), info))
    }
}
