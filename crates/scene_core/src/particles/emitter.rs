//! Randomised particle emission
//!
//! The emitter owns its generator, seeded from configuration, so two runs with
//! the same seed and frame times produce the same particles.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::ParticleConfig;
use crate::foundation::math::Vec3;
use crate::particles::system::{ParticleProps, ParticleSystem};

/// Fountain-style emitter spraying jittered copies of a base particle
#[derive(Debug, Clone)]
pub struct ParticleEmitter {
    base: ParticleProps,
    emit_rate: f32,
    max_emit_step: f32,
    rng: StdRng,
}

impl ParticleEmitter {
    /// Create an emitter around `base` with its own seeded generator
    #[must_use]
    pub fn new(base: ParticleProps, emit_rate: f32, max_emit_step: f32, seed: u64) -> Self {
        Self {
            base,
            emit_rate,
            max_emit_step,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create an emitter from the particle scene settings
    #[must_use]
    pub fn from_config(config: &ParticleConfig) -> Self {
        let base = ParticleProps {
            position: config.position,
            linear_velocity: config.linear_velocity,
            acceleration: config.acceleration,
            rotation: 0.0,
            angular_velocity: config.angular_velocity,
            initial_color: config.initial_color,
            final_color: config.final_color,
            initial_size: config.initial_size,
            final_size: config.final_size,
            life_time: config.life_time,
        };
        Self::new(base, config.emit_rate, config.max_emit_step, config.seed)
    }

    /// Base particle every emission is derived from
    #[must_use]
    pub const fn base(&self) -> &ParticleProps {
        &self.base
    }

    /// Particles to emit for a frame of `delta_time` seconds
    ///
    /// The frame time is clamped so a long stall does not flood the pool.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn spawn_count(&self, delta_time: f32) -> usize {
        let step = delta_time.clamp(0.0, self.max_emit_step);
        // Truncation matches whole particles per frame
        (step * self.emit_rate) as usize
    }

    /// Next particle: the base with jittered velocity and spin
    ///
    /// Velocity is scaled per axis by `(r - 0.5, r + 0.5, r - 0.5)` so the
    /// spray always rises; spin by a factor in `[-1, 1)`.
    pub fn next_props(&mut self) -> ParticleProps {
        let jitter = Vec3::new(
            self.rng.gen::<f32>() - 0.5,
            self.rng.gen::<f32>() + 0.5,
            self.rng.gen::<f32>() - 0.5,
        );
        let spin = self.rng.gen_range(-1.0_f32..1.0);

        ParticleProps {
            linear_velocity: self.base.linear_velocity.component_mul(&jitter),
            angular_velocity: self.base.angular_velocity * spin,
            ..self.base
        }
    }

    /// Emit this frame's share of particles into `system`, returning how many
    pub fn emit_into(&mut self, system: &mut ParticleSystem, delta_time: f32) -> usize {
        let count = self.spawn_count(delta_time);
        for _ in 0..count {
            let props = self.next_props();
            system.emit(&props);
        }
        count
    }
}
