//! Frustum culling demo: a grid of small entity hierarchies
//!
//! Each grid cell holds a root with a chain of children stacked above it.
//! Only nodes whose bounding spheres intersect the camera frustum reach the
//! render sink.

use crate::config::CullingConfig;
use crate::foundation::collections::{EntityId, ModelId};
use crate::foundation::math::Vec3;
use crate::render::{Camera, RenderSink};
use crate::scene::{CullStats, Model, ModelLibrary, SceneGraph};
use crate::scenes::{DemoScene, DemoSceneError};

const NAME: &str = "frustum culling";

struct Loaded {
    library: ModelLibrary,
    graph: SceneGraph,
    roots: Vec<EntityId>,
    spin: f32,
}

/// Grid of entity hierarchies rendered through frustum culling
pub struct FrustumCullingScene {
    config: CullingConfig,
    loaded: Option<Loaded>,
}

impl FrustumCullingScene {
    /// Create the scene; nothing is built until `setup`
    #[must_use]
    pub const fn new(config: CullingConfig) -> Self {
        Self { config, loaded: None }
    }

    /// The scene graph, once set up
    #[must_use]
    pub fn graph(&self) -> Option<&SceneGraph> {
        self.loaded.as_ref().map(|loaded| &loaded.graph)
    }

    fn spawn_cell(
        &self,
        graph: &mut SceneGraph,
        library: &ModelLibrary,
        model: ModelId,
        position: Vec3,
    ) -> Result<EntityId, DemoSceneError> {
        let root = graph.spawn(library, model)?;
        graph.transform_mut(root)?.set_local_position(position);

        let mut parent = root;
        for _ in 1..self.config.hierarchy_depth {
            let child = graph.spawn_child(parent, library, model)?;
            let transform = graph.transform_mut(child)?;
            transform.set_local_position(self.config.child_offset);
            transform.set_local_scale(Vec3::new(0.5, 0.5, 0.5));
            parent = child;
        }
        Ok(root)
    }
}

impl DemoScene for FrustumCullingScene {
    fn name(&self) -> &'static str {
        NAME
    }

    fn setup(&mut self) -> Result<(), DemoSceneError> {
        let mut library = ModelLibrary::new();
        let cube = library.insert(Model::unit_cube("cube")?);
        let mut graph = SceneGraph::new();
        let mut roots = Vec::new();

        for x in 0..self.config.grid_size {
            for z in 0..self.config.grid_size {
                let position = Vec3::new(
                    x as f32 * self.config.spacing + self.config.origin_offset,
                    0.0,
                    z as f32 * self.config.spacing + self.config.origin_offset,
                );
                roots.push(self.spawn_cell(&mut graph, &library, cube, position)?);
            }
        }

        graph.update();
        log::info!(
            "Frustum culling scene: {} roots, {} entities",
            roots.len(),
            graph.len()
        );

        self.loaded = Some(Loaded {
            library,
            graph,
            roots,
            spin: 0.0,
        });
        Ok(())
    }

    fn update(&mut self, delta_time: f32) -> Result<(), DemoSceneError> {
        let loaded = self.loaded.as_mut().ok_or(DemoSceneError::NotSetUp(NAME))?;

        if self.config.spin_speed != 0.0 {
            loaded.spin = (loaded.spin + self.config.spin_speed * delta_time) % 360.0;
            for &root in &loaded.roots {
                loaded.graph.transform_mut(root)?.set_local_rotation(Vec3::new(0.0, loaded.spin, 0.0));
            }
        }

        loaded.graph.update();
        Ok(())
    }

    fn render(&mut self, camera: &Camera, sink: &mut dyn RenderSink) -> Result<CullStats, DemoSceneError> {
        let loaded = self.loaded.as_ref().ok_or(DemoSceneError::NotSetUp(NAME))?;
        let frustum = camera.frustum()?;
        Ok(loaded.graph.render(&frustum, sink))
    }

    fn teardown(&mut self) {
        if let Some(loaded) = self.loaded.take() {
            log::debug!(
                "Frustum culling scene released {} entities and {} models",
                loaded.graph.len(),
                loaded.library.len()
            );
        }
    }
}
