//! Handle types for the arenas backing the scene graph

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Stable handle to a node in a [`SceneGraph`](crate::scene::SceneGraph)
    pub struct EntityId;

    /// Stable handle to a shared model in a [`ModelLibrary`](crate::scene::ModelLibrary)
    pub struct ModelId;
}
