//! Frame time management

use std::time::Instant;

/// Frame clock driving the per-frame update
///
/// Runs either from the wall clock or from a fixed step, the latter being what
/// the headless demos and the tests use so results stay deterministic.
pub struct Timer {
    last_frame: Instant,
    fixed_step: Option<f32>,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a wall-clock timer
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            fixed_step: None,
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Create a timer that advances by exactly `step` seconds per frame
    #[must_use]
    pub fn fixed(step: f32) -> Self {
        Self {
            fixed_step: Some(step),
            ..Self::new()
        }
    }

    /// Advance one frame and return the new delta time
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.delta_time = self
            .fixed_step
            .unwrap_or_else(|| now.duration_since(self.last_frame).as_secs_f32());
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
        self.delta_time
    }

    /// Get the time since the last frame in seconds
    #[must_use]
    pub const fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    #[must_use]
    pub const fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    #[must_use]
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since timer creation
    #[must_use]
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}
