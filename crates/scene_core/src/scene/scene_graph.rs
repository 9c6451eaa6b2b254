//! Arena-backed transform hierarchy with frustum-culled rendering
//!
//! Nodes live in a slot map and refer to their parent and children by
//! [`EntityId`], so the tree owns no pointers and removing a node cannot leave
//! a dangling back-reference. Removing a node removes its whole subtree.
//!
//! Two traversals run each frame:
//! - [`SceneGraph::update`] resolves global matrices top-down. A node that
//!   recomputes forces every descendant to recompute too, because their
//!   globals were built from the old parent matrix.
//! - [`SceneGraph::render`] tests each node's bounding sphere against the
//!   camera frustum and hands visible nodes to a [`RenderSink`].

use std::fmt;

use crate::foundation::collections::{EntityId, ModelId, SlotMap};
use crate::foundation::math::Mat4;
use crate::render::RenderSink;
use crate::scene::bounding::BoundingSphere;
use crate::scene::frustum::Frustum;
use crate::scene::model::ModelLibrary;
use crate::scene::transform::Transform;
use crate::scene::SceneError;

/// A node of the scene graph
#[derive(Debug, Clone)]
pub struct EntityNode {
    transform: Transform,
    model: ModelId,
    bounds: BoundingSphere,
    parent: Option<EntityId>,
    children: Vec<EntityId>,
}

impl EntityNode {
    /// Local parameters and cached global matrix
    #[must_use]
    pub const fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Shared model drawn for this node
    #[must_use]
    pub const fn model(&self) -> ModelId {
        self.model
    }

    /// Model-space bounding sphere, copied from the model at spawn time
    #[must_use]
    pub const fn bounds(&self) -> &BoundingSphere {
        &self.bounds
    }

    /// Parent handle, `None` for roots
    #[must_use]
    pub const fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    /// Child handles in insertion order
    #[must_use]
    pub fn children(&self) -> &[EntityId] {
        &self.children
    }
}

/// Result of one render traversal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CullStats {
    /// Nodes forwarded to the sink
    pub displayed: usize,
    /// Nodes visited
    pub total: usize,
}

impl CullStats {
    /// Nodes rejected by the frustum
    #[must_use]
    pub const fn culled(&self) -> usize {
        self.total - self.displayed
    }
}

impl fmt::Display for CullStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entities in CPU: {} / sent to GPU: {}", self.total, self.displayed)
    }
}

/// Transform hierarchy of entities
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: SlotMap<EntityId, EntityNode>,
    roots: Vec<EntityId>,
}

impl SceneGraph {
    /// Create an empty graph
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a root entity drawing `model`
    pub fn spawn(&mut self, library: &ModelLibrary, model: ModelId) -> Result<EntityId, SceneError> {
        let node = Self::make_node(library, model, None)?;
        let id = self.nodes.insert(node);
        self.roots.push(id);
        log::trace!("Spawned root entity {:?}", id);
        Ok(id)
    }

    /// Add an entity under `parent`
    pub fn spawn_child(
        &mut self,
        parent: EntityId,
        library: &ModelLibrary,
        model: ModelId,
    ) -> Result<EntityId, SceneError> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::UnknownEntity(parent));
        }
        let node = Self::make_node(library, model, Some(parent))?;
        let id = self.nodes.insert(node);
        self.nodes[parent].children.push(id);
        log::trace!("Spawned entity {:?} under {:?}", id, parent);
        Ok(id)
    }

    fn make_node(
        library: &ModelLibrary,
        model: ModelId,
        parent: Option<EntityId>,
    ) -> Result<EntityNode, SceneError> {
        let bounds = *library.get(model).ok_or(SceneError::UnknownModel(model))?.bounds();
        Ok(EntityNode {
            transform: Transform::identity(),
            model,
            bounds,
            parent,
            children: Vec::new(),
        })
    }

    /// Remove an entity and its whole subtree, returning how many nodes went
    pub fn remove(&mut self, id: EntityId) -> Result<usize, SceneError> {
        let parent = self.nodes.get(id).ok_or(SceneError::UnknownEntity(id))?.parent;
        self.detach(id, parent);

        let mut removed = 0;
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if let Some(node) = self.nodes.remove(current) {
                pending.extend(node.children);
                removed += 1;
            }
        }
        log::debug!("Removed entity {:?} and {} descendants", id, removed - 1);
        Ok(removed)
    }

    /// Move an entity under a new parent, or to the root level with `None`
    ///
    /// The entity is marked dirty so the next update rebuilds its subtree
    /// against the new parent. Attaching a node below one of its own
    /// descendants is rejected.
    pub fn reparent(&mut self, id: EntityId, new_parent: Option<EntityId>) -> Result<(), SceneError> {
        let old_parent = self.nodes.get(id).ok_or(SceneError::UnknownEntity(id))?.parent;

        if let Some(target) = new_parent {
            if !self.nodes.contains_key(target) {
                return Err(SceneError::UnknownEntity(target));
            }
            let mut ancestor = Some(target);
            while let Some(current) = ancestor {
                if current == id {
                    return Err(SceneError::CyclicHierarchy { child: id, parent: target });
                }
                ancestor = self.nodes[current].parent;
            }
        }

        self.detach(id, old_parent);
        match new_parent {
            Some(target) => self.nodes[target].children.push(id),
            None => self.roots.push(id),
        }

        let node = &mut self.nodes[id];
        node.parent = new_parent;
        node.transform.mark_dirty();
        Ok(())
    }

    fn detach(&mut self, id: EntityId, parent: Option<EntityId>) {
        let siblings = match parent {
            Some(parent) => match self.nodes.get_mut(parent) {
                Some(node) => &mut node.children,
                None => return,
            },
            None => &mut self.roots,
        };
        siblings.retain(|&sibling| sibling != id);
    }

    /// Look up a node
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&EntityNode> {
        self.nodes.get(id)
    }

    /// Transform of a node, for reading
    pub fn transform(&self, id: EntityId) -> Result<&Transform, SceneError> {
        self.nodes.get(id).map(|node| &node.transform).ok_or(SceneError::UnknownEntity(id))
    }

    /// Transform of a node, for editing through its dirtying setters
    pub fn transform_mut(&mut self, id: EntityId) -> Result<&mut Transform, SceneError> {
        self.nodes
            .get_mut(id)
            .map(|node| &mut node.transform)
            .ok_or(SceneError::UnknownEntity(id))
    }

    /// Swap the model a node draws, refreshing its bounds
    pub fn set_model(&mut self, id: EntityId, library: &ModelLibrary, model: ModelId) -> Result<(), SceneError> {
        let bounds = *library.get(model).ok_or(SceneError::UnknownModel(model))?.bounds();
        let node = self.nodes.get_mut(id).ok_or(SceneError::UnknownEntity(id))?;
        node.model = model;
        node.bounds = bounds;
        Ok(())
    }

    /// Parent of a node
    pub fn parent(&self, id: EntityId) -> Result<Option<EntityId>, SceneError> {
        self.nodes.get(id).map(|node| node.parent).ok_or(SceneError::UnknownEntity(id))
    }

    /// Children of a node
    pub fn children(&self, id: EntityId) -> Result<&[EntityId], SceneError> {
        self.nodes
            .get(id)
            .map(|node| node.children.as_slice())
            .ok_or(SceneError::UnknownEntity(id))
    }

    /// Root entities in insertion order
    #[must_use]
    pub fn roots(&self) -> &[EntityId] {
        &self.roots
    }

    /// Whether the handle refers to a live node
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of nodes
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Resolve global matrices below and including `id`
    ///
    /// With `forced == false` only dirty nodes (and everything under them)
    /// recompute; clean nodes pass their cached matrix down unchanged.
    /// Returns how many nodes were recomputed.
    pub fn update_self_and_children(&mut self, id: EntityId, forced: bool) -> Result<usize, SceneError> {
        let node = self.nodes.get(id).ok_or(SceneError::UnknownEntity(id))?;
        let parent_global = node
            .parent
            .and_then(|parent| self.nodes.get(parent))
            .map(|parent| *parent.transform.model_matrix());

        let mut recomputed = 0;
        let mut stack: Vec<(EntityId, bool, Option<Mat4>)> = vec![(id, forced, parent_global)];

        while let Some((current, forced, parent_global)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(current) else {
                continue;
            };

            let refresh = forced || node.transform.is_dirty();
            if refresh {
                match &parent_global {
                    Some(parent_global) => node.transform.compute_model_matrix_with_parent(parent_global),
                    None => node.transform.compute_model_matrix(),
                }
                recomputed += 1;
            }

            let global = *node.transform.model_matrix();
            // Reversed so children pop in insertion order
            stack.extend(node.children.iter().rev().map(|&child| (child, refresh, Some(global))));
        }

        Ok(recomputed)
    }

    /// Resolve every root's subtree; returns how many nodes were recomputed
    pub fn update(&mut self) -> usize {
        let roots = self.roots.clone();
        let recomputed = roots
            .into_iter()
            .filter_map(|root| match self.update_self_and_children(root, false) {
                Ok(count) => Some(count),
                Err(err) => {
                    log::warn!("Skipping root {:?} during update: {}", root, err);
                    None
                }
            })
            .sum();
        log::trace!("Scene update recomputed {} of {} nodes", recomputed, self.nodes.len());
        recomputed
    }

    /// Draw every node whose bounds intersect the frustum
    ///
    /// Children are visited whether or not their parent was culled; each node
    /// is tested with its own sphere.
    pub fn render(&self, frustum: &Frustum, sink: &mut dyn RenderSink) -> CullStats {
        let mut stats = CullStats::default();

        self.walk(|_, node| {
            stats.total += 1;
            if node.bounds.is_on_frustum_transformed(frustum, &node.transform) {
                sink.draw_model(node.model, node.transform.model_matrix());
                stats.displayed += 1;
            }
        });

        log::debug!("Frustum culling: {}", stats);
        stats
    }

    /// Handles of nodes whose bounds intersect the frustum, depth-first
    #[must_use]
    pub fn query_visible(&self, frustum: &Frustum) -> Vec<EntityId> {
        let mut visible = Vec::new();
        self.walk(|id, node| {
            if node.bounds.is_on_frustum_transformed(frustum, &node.transform) {
                visible.push(id);
            }
        });
        visible
    }

    /// Depth-first pre-order visit of every node, roots in insertion order
    fn walk(&self, mut visit: impl FnMut(EntityId, &EntityNode)) {
        let mut stack: Vec<EntityId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.get(id) {
                visit(id, node);
                stack.extend(node.children.iter().rev().copied());
            }
        }
    }
}
