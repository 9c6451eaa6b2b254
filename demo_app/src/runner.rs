//! Headless frame loop

use scene_core::config::{DemoConfig, FrameOrder};
use scene_core::foundation::time::Timer;
use scene_core::render::{Camera, RecordingSink};
use scene_core::scenes::{DemoScene, DemoSceneError};

/// Totals over a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames simulated
    pub frames: u64,
    /// Objects drawn, summed over frames
    pub displayed: usize,
    /// Objects considered, summed over frames
    pub total: usize,
    /// Draw calls recorded, summed over frames
    pub draw_calls: usize,
}

/// Run `config.frame_count` frames of an already set-up scene
pub fn run_frames(
    scene: &mut dyn DemoScene,
    camera: &Camera,
    config: &DemoConfig,
) -> Result<RunSummary, DemoSceneError> {
    let mut timer = Timer::fixed(config.fixed_delta_time);
    let mut sink = RecordingSink::new();
    let mut summary = RunSummary::default();

    while timer.frame_count() < config.frame_count {
        let delta_time = timer.tick();
        sink.clear();

        let stats = match config.frame_order {
            FrameOrder::UpdateThenRender => {
                scene.update(delta_time)?;
                scene.render(camera, &mut sink)?
            }
            FrameOrder::RenderThenUpdate => {
                let stats = scene.render(camera, &mut sink)?;
                scene.update(delta_time)?;
                stats
            }
        };

        summary.frames += 1;
        summary.displayed += stats.displayed;
        summary.total += stats.total;
        summary.draw_calls += sink.draws().len() + sink.instanced_draws();

        log::debug!(
            "[{}] frame {} t={:.3}s: {}",
            scene.name(),
            timer.frame_count(),
            timer.total_time(),
            stats
        );
    }

    Ok(summary)
}
