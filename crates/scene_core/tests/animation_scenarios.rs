//! Integration tests for skeletal animation playback

use std::f32::consts::FRAC_PI_2;

use approx::assert_relative_eq;
use scene_core::animation::{BoneChannel, BoneWeights, KeyTrack, Keyframe, SkinBinding, MAX_BONES};
use scene_core::prelude::*;

fn swinging_arm(ticks_per_second: f32, duration: f32) -> AnimationClip {
    let mut skeleton = Skeleton::new("root", Mat4::identity());
    let shoulder = skeleton.add_child(0, "shoulder", Mat4::identity()).unwrap();
    skeleton
        .add_child(shoulder, "elbow", Mat4::new_translation(&Vec3::new(0.0, 2.0, 0.0)))
        .unwrap();

    let mut bones = BoneRegistry::new();
    let weights = vec![
        BoneWeights {
            name: "shoulder".into(),
            offset: Mat4::identity(),
            weights: vec![(0, 1.0)],
        },
        BoneWeights {
            name: "elbow".into(),
            offset: Mat4::new_translation(&Vec3::new(0.0, -2.0, 0.0)),
            weights: vec![(1, 0.5), (2, 1.0)],
        },
    ];
    SkinBinding::extract_weights(&mut bones, &weights, 3).unwrap();

    let shoulder_channel = BoneChannel::new(
        "shoulder",
        KeyTrack::constant(Vec3::zeros()),
        KeyTrack::new(vec![
            Keyframe::new(0.0, Quat::identity()),
            Keyframe::new(duration * 0.5, Quat::from_axis_angle(&Vec3::z_axis(), FRAC_PI_2)),
            Keyframe::new(duration, Quat::identity()),
        ])
        .unwrap(),
        KeyTrack::constant(Vec3::new(1.0, 1.0, 1.0)),
    );
    // Wrist is animated but never weighted by the mesh
    let wrist_channel = BoneChannel::new(
        "wrist",
        KeyTrack::constant(Vec3::new(0.0, 1.0, 0.0)),
        KeyTrack::constant(Quat::identity()),
        KeyTrack::constant(Vec3::new(1.0, 1.0, 1.0)),
    );

    AnimationClip::new(
        "swing",
        duration,
        ticks_per_second,
        skeleton,
        vec![shoulder_channel, wrist_channel],
        bones,
    )
    .unwrap()
}

#[test]
fn test_one_loop_returns_to_start() {
    let clip = swinging_arm(25.0, 100.0);
    let mut animator = Animator::new(clip.clone());
    animator.sample_at(0.0).unwrap();
    let start = animator.bone_matrices().to_vec();

    // Advance exactly duration / ticks_per_second seconds, in uneven steps
    let loop_seconds = clip.duration_seconds();
    let mut elapsed = 0.0;
    for step in [0.7, 1.3, 0.9] {
        animator.update(step).unwrap();
        elapsed += step;
    }
    animator.update(loop_seconds - elapsed).unwrap();

    assert!(animator.current_time() < 1e-3 || clip.duration() - animator.current_time() < 1e-3);
    for (looped, initial) in animator.bone_matrices().iter().zip(&start) {
        assert_relative_eq!(*looped, *initial, epsilon = 1e-3);
    }
}

#[test]
fn test_elbow_follows_shoulder_swing() {
    let mut animator = Animator::new(swinging_arm(25.0, 100.0));
    animator.sample_at(50.0).unwrap();

    let bones = animator.clip().bones();
    let elbow = bones.get("elbow").unwrap().id;
    // Bind-space elbow joint at (0, 2, 0) ends up rotated 90 degrees about Z
    let joint = animator.bone_matrices()[elbow] * Vec4::new(0.0, 2.0, 0.0, 1.0);
    assert_relative_eq!(joint.xyz(), Vec3::new(-2.0, 0.0, 0.0), epsilon = 1e-5);
}

#[test]
fn test_channel_only_bone_gets_a_slot() {
    let clip = swinging_arm(25.0, 100.0);
    let bones = clip.bones();
    assert_eq!(bones.len(), 3);
    assert_eq!(bones.get("wrist").map(|info| info.id), Some(2));

    // Not in the hierarchy, so its palette entry stays identity
    let mut animator = Animator::new(clip);
    animator.update(1.0).unwrap();
    assert_eq!(animator.bone_matrices().len(), MAX_BONES);
    assert_eq!(animator.bone_matrices()[2], Mat4::identity());
}

#[test]
fn test_single_key_channel_is_constant() {
    let value = Vec3::new(0.5, -1.0, 4.0);
    let track = KeyTrack::new(vec![Keyframe::new(30.0, value)]).unwrap();
    for time in [0.0, 29.9, 30.0, 99.9, 1e6] {
        assert_eq!(track.sample(time).unwrap(), value);
    }
}

#[test]
fn test_time_past_last_key_is_an_error() {
    let track = KeyTrack::new(vec![
        Keyframe::new(0.0, Vec3::zeros()),
        Keyframe::new(10.0, Vec3::new(1.0, 0.0, 0.0)),
    ])
    .unwrap();
    let err = track.sample(12.0).unwrap_err();
    assert!(matches!(err, AnimationError::KeyframeOutOfRange { .. }));
    assert!(err.to_string().contains("12"));
}
