//! Headless technique demo runner
//!
//! Usage: `technique_demo [config.toml|config.ron] [scene]`
//!
//! Loads the configuration (defaults when no file is given), runs the
//! selected scene for the configured number of fixed-step frames against a
//! recording sink and logs what would have been drawn.

mod runner;

use scene_core::config::{Config, ConfigError, DemoConfig};
use scene_core::foundation::logging;
use scene_core::render::Camera;
use scene_core::scenes::{DemoSceneError, SceneKind};
use thiserror::Error;

/// Application-level errors
#[derive(Error, Debug)]
pub enum DemoError {
    /// Configuration could not be loaded or is invalid
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// The scene failed during setup or a frame
    #[error("Scene error: {0}")]
    Scene(#[from] DemoSceneError),

    /// Unrecognised scene name on the command line
    #[error("Unknown scene '{0}', expected one of: culling, instancing, skeletal, particles, grass")]
    UnknownScene(String),
}

fn parse_scene(name: &str) -> Result<SceneKind, DemoError> {
    match name.to_ascii_lowercase().as_str() {
        "culling" | "frustum_culling" => Ok(SceneKind::FrustumCulling),
        "instancing" => Ok(SceneKind::Instancing),
        "skeletal" | "skeletal_animation" => Ok(SceneKind::SkeletalAnimation),
        "particles" => Ok(SceneKind::Particles),
        "grass" => Ok(SceneKind::Grass),
        _ => Err(DemoError::UnknownScene(name.to_owned())),
    }
}

fn load_config(args: &[String]) -> Result<DemoConfig, DemoError> {
    let mut config = match args.first() {
        Some(path) if path.ends_with(".toml") || path.ends_with(".ron") => DemoConfig::load_from_file(path)?,
        _ => DemoConfig::default(),
    };

    let scene_arg = args.iter().find(|arg| !(arg.ends_with(".toml") || arg.ends_with(".ron")));
    if let Some(name) = scene_arg {
        config.scene = parse_scene(name)?;
    }

    config.validate()?;
    Ok(config)
}

fn run() -> Result<(), DemoError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = load_config(&args)?;
    logging::init_with_level(&config.log_level);

    log::info!(
        "Running {:?} for {} frames ({:?})",
        config.scene,
        config.frame_count,
        config.frame_order
    );

    let camera = Camera::from_config(&config.camera);
    let mut scene = config.scene.build(&config);
    scene.setup()?;
    let result = runner::run_frames(scene.as_mut(), &camera, &config);
    scene.teardown();
    let summary = result?;

    let frames = usize::try_from(summary.frames).unwrap_or(usize::MAX).max(1);
    log::info!(
        "{} frames: {} / {} objects drawn per frame on average, {} draw calls",
        summary.frames,
        summary.displayed / frames,
        summary.total / frames,
        summary.draw_calls
    );
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        logging::init();
        log::error!("{err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_names() {
        assert_eq!(parse_scene("Particles").unwrap(), SceneKind::Particles);
        assert_eq!(parse_scene("culling").unwrap(), SceneKind::FrustumCulling);
        assert_eq!(parse_scene("grass").unwrap(), SceneKind::Grass);
        assert!(matches!(parse_scene("water"), Err(DemoError::UnknownScene(_))));
    }

    #[test]
    fn test_scene_argument_without_config_file() {
        let config = load_config(&["skeletal".to_owned()]).unwrap();
        assert_eq!(config.scene, SceneKind::SkeletalAnimation);
        assert_eq!(config.frame_count, DemoConfig::default().frame_count);
    }
}
