//! Integration tests for hierarchy resolution and frustum culling
//!
//! Exercises the public API end to end: models, scene graph, camera frustum
//! and the recording sink.

use std::f32::consts::FRAC_PI_2;

use approx::assert_relative_eq;
use scene_core::prelude::*;
use scene_core::render::ProjectionProperties;
use scene_core::scene::FrustumFace;

fn forward_frustum() -> Frustum {
    Frustum::from_camera(
        &Vec3::zeros(),
        &Vec3::new(0.0, 0.0, -1.0),
        &Vec3::new(0.0, 1.0, 0.0),
        1.0,
        FRAC_PI_2,
        0.1,
        100.0,
    )
    .unwrap()
}

#[test]
fn test_camera_at_origin_scenario() {
    let frustum = forward_frustum();

    assert!(BoundingSphere::new(Vec3::new(0.0, 0.0, -50.0), 1.0).is_on_frustum(&frustum));
    assert!(!BoundingSphere::new(Vec3::new(0.0, 0.0, 50.0), 1.0).is_on_frustum(&frustum));
    assert!(!BoundingSphere::new(Vec3::new(200.0, 0.0, -50.0), 1.0).is_on_frustum(&frustum));
}

#[test]
fn test_camera_frustum_matches_direct_construction() {
    let camera = Camera::new(
        Vec3::zeros(),
        Vec3::new(0.0, 0.0, -1.0),
        Vec3::new(0.0, 1.0, 0.0),
        ProjectionProperties {
            aspect_ratio: 1.0,
            fov_degrees: 90.0,
            z_near: 0.1,
            z_far: 100.0,
        },
    );
    let from_camera = camera.frustum().unwrap();
    let direct = forward_frustum();

    for face in FrustumFace::ALL {
        let (a, b) = (from_camera.plane(face), direct.plane(face));
        assert_relative_eq!(a.normal, b.normal, epsilon = 1e-5);
        assert_relative_eq!(a.distance, b.distance, epsilon = 1e-5);
    }
}

#[test]
fn test_depth_three_hierarchy_accumulates_translation() {
    let mut library = ModelLibrary::new();
    let cube = library.insert(Model::unit_cube("cube").unwrap());
    let mut graph = SceneGraph::new();

    let root = graph.spawn(&library, cube).unwrap();
    let middle = graph.spawn_child(root, &library, cube).unwrap();
    let leaf = graph.spawn_child(middle, &library, cube).unwrap();

    graph.transform_mut(root).unwrap().set_local_position(Vec3::new(10.0, 0.0, 0.0));
    graph.transform_mut(middle).unwrap().set_local_position(Vec3::new(0.0, 2.0, 0.0));
    graph.transform_mut(leaf).unwrap().set_local_position(Vec3::new(0.0, 0.0, 3.0));
    graph.update();

    assert_relative_eq!(
        graph.transform(leaf).unwrap().global_position(),
        Vec3::new(10.0, 2.0, 3.0),
        epsilon = 1e-6
    );
}

#[test]
fn test_parent_change_reaches_every_descendant() {
    let mut library = ModelLibrary::new();
    let cube = library.insert(Model::unit_cube("cube").unwrap());
    let mut graph = SceneGraph::new();

    let root = graph.spawn(&library, cube).unwrap();
    let mut chain = vec![root];
    for depth in 1..5 {
        let child = graph.spawn_child(*chain.last().unwrap(), &library, cube).unwrap();
        let transform = graph.transform_mut(child).unwrap();
        transform.set_local_position(Vec3::new(1.0, 0.0, 0.0));
        transform.set_local_rotation(Vec3::new(0.0, 10.0 * depth as f32, 0.0));
        chain.push(child);
    }
    graph.update();

    graph.transform_mut(root).unwrap().set_local_scale(Vec3::new(2.0, 1.0, 3.0));
    graph.transform_mut(root).unwrap().set_local_rotation(Vec3::new(15.0, 30.0, 45.0));
    assert_eq!(graph.update(), chain.len());

    for pair in chain.windows(2) {
        let parent = *graph.transform(pair[0]).unwrap().model_matrix();
        let child = graph.transform(pair[1]).unwrap();
        assert_relative_eq!(*child.model_matrix(), parent * child.local_matrix(), epsilon = 1e-5);
    }
}

#[test]
fn test_repeated_update_is_stable() {
    let mut library = ModelLibrary::new();
    let cube = library.insert(Model::unit_cube("cube").unwrap());
    let mut graph = SceneGraph::new();
    let root = graph.spawn(&library, cube).unwrap();
    let child = graph.spawn_child(root, &library, cube).unwrap();
    graph.transform_mut(root).unwrap().set_local_rotation(Vec3::new(0.0, 45.0, 0.0));
    graph.transform_mut(child).unwrap().set_local_position(Vec3::new(0.0, 1.0, -2.0));

    graph.update();
    let first: Vec<Mat4> = [root, child]
        .iter()
        .map(|&id| *graph.transform(id).unwrap().model_matrix())
        .collect();
    graph.update();
    let second: Vec<Mat4> = [root, child]
        .iter()
        .map(|&id| *graph.transform(id).unwrap().model_matrix())
        .collect();

    assert_eq!(first, second);
}

#[test]
fn test_render_then_update_lags_one_frame() {
    let mut library = ModelLibrary::new();
    let cube = library.insert(Model::unit_cube("cube").unwrap());
    let mut graph = SceneGraph::new();
    let entity = graph.spawn(&library, cube).unwrap();
    graph.transform_mut(entity).unwrap().set_local_position(Vec3::new(0.0, 0.0, -20.0));
    graph.update();

    let frustum = forward_frustum();
    let mut sink = RecordingSink::new();

    // Move behind the camera but render before resolving
    graph.transform_mut(entity).unwrap().set_local_position(Vec3::new(0.0, 0.0, 20.0));
    assert_eq!(graph.render(&frustum, &mut sink).displayed, 1);
    graph.update();
    assert_eq!(graph.render(&frustum, &mut sink).displayed, 0);
}

#[test]
fn test_scaled_entity_inflates_bounds() {
    let mut library = ModelLibrary::new();
    let cube = library.insert(Model::unit_cube("cube").unwrap());
    let mut graph = SceneGraph::new();
    let entity = graph.spawn(&library, cube).unwrap();

    // Just outside the right plane at unit scale
    graph.transform_mut(entity).unwrap().set_local_position(Vec3::new(52.0, 0.0, -50.0));
    graph.update();
    assert!(graph.query_visible(&forward_frustum()).is_empty());

    graph.transform_mut(entity).unwrap().set_local_scale(Vec3::new(1.0, 8.0, 1.0));
    graph.update();
    assert_eq!(graph.query_visible(&forward_frustum()), vec![entity]);
}
