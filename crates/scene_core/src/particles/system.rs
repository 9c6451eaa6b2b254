//! Fixed-capacity particle pool
//!
//! Dead slots are recycled in round-robin order starting from the last used
//! slot. When every slot is alive the scan falls back to slot 0, overwriting
//! whatever lives there, so emission never fails and never allocates.

use crate::foundation::math::{utils, Mat4, Vec3, Vec4};
use crate::render::{Camera, InstanceData};

/// Spawn parameters of one particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleProps {
    /// World-space spawn position
    pub position: Vec3,
    /// Initial velocity in units per second
    pub linear_velocity: Vec3,
    /// Constant acceleration
    pub acceleration: Vec3,
    /// Initial roll in degrees
    pub rotation: f32,
    /// Roll rate in degrees per second
    pub angular_velocity: f32,
    /// Colour at birth
    pub initial_color: Vec4,
    /// Colour at death
    pub final_color: Vec4,
    /// Size at birth
    pub initial_size: f32,
    /// Size at death
    pub final_size: f32,
    /// Lifetime in seconds
    pub life_time: f32,
}

impl Default for ParticleProps {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            linear_velocity: Vec3::zeros(),
            acceleration: Vec3::zeros(),
            rotation: 0.0,
            angular_velocity: 0.0,
            initial_color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            final_color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            initial_size: 1.0,
            final_size: 1.0,
            life_time: 1.0,
        }
    }
}

/// Pool slot
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Particle {
    /// Spawn parameters with position, velocity and rotation integrated so far
    pub state: ParticleProps,
    /// Seconds left before the slot can be reused
    pub life_remaining: f32,
}

impl Particle {
    /// Whether the slot holds a live particle
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.life_remaining > 0.0
    }

    /// Remaining fraction of life, 1 at birth and 0 at death
    #[must_use]
    pub fn life_factor(&self) -> f32 {
        if self.state.life_time <= 0.0 {
            return 0.0;
        }
        (self.life_remaining / self.state.life_time).clamp(0.0, 1.0)
    }

    /// Current size, blended from final to initial by life factor
    #[must_use]
    pub fn size(&self) -> f32 {
        utils::lerp(self.state.final_size, self.state.initial_size, self.life_factor())
    }

    /// Current colour, blended from final to initial by life factor
    #[must_use]
    pub fn color(&self) -> Vec4 {
        self.state.final_color.lerp(&self.state.initial_color, self.life_factor())
    }
}

/// Pool of particles with instance generation for rendering
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    pool: Vec<Particle>,
    pool_index: usize,
}

impl ParticleSystem {
    /// Create a pool of `pool_size` dead particles
    #[must_use]
    pub fn new(pool_size: usize) -> Self {
        log::debug!("Particle pool created with {} slots", pool_size);
        Self {
            pool: vec![Particle::default(); pool_size],
            pool_index: 0,
        }
    }

    /// Spawn a particle in the next free slot
    ///
    /// Returns the slot index, or `None` for a zero-capacity pool.
    pub fn emit(&mut self, props: &ParticleProps) -> Option<usize> {
        let slot = self.next_free_slot()?;
        self.pool[slot] = Particle {
            state: *props,
            life_remaining: props.life_time,
        };
        Some(slot)
    }

    fn next_free_slot(&mut self) -> Option<usize> {
        if self.pool.is_empty() {
            return None;
        }

        let start = self.pool_index.min(self.pool.len() - 1);
        let slot = (start..self.pool.len())
            .chain(0..start)
            .find(|&index| !self.pool[index].is_alive())
            .unwrap_or(0);

        self.pool_index = slot;
        Some(slot)
    }

    /// Age and integrate every live particle
    pub fn update(&mut self, delta_time: f32) {
        for particle in self.pool.iter_mut().filter(|particle| particle.is_alive()) {
            let state = &mut particle.state;
            particle.life_remaining -= delta_time;
            state.position += state.linear_velocity * delta_time;
            state.linear_velocity += state.acceleration * delta_time;
            state.rotation += state.angular_velocity * delta_time;
        }
    }

    /// Billboarded instances of live particles, farthest from the camera first
    #[must_use]
    pub fn instances(&self, camera: &Camera) -> Vec<InstanceData> {
        let eye = *camera.position();
        let forward = *camera.direction();
        let right = forward.cross(camera.up()).try_normalize(f32::EPSILON).unwrap_or_else(Vec3::x);
        let up = right.cross(&forward);

        let mut live: Vec<(f32, &Particle)> = self
            .pool
            .iter()
            .filter(|particle| particle.is_alive())
            .map(|particle| ((particle.state.position - eye).norm_squared(), particle))
            .collect();
        live.sort_by(|a, b| b.0.total_cmp(&a.0));

        live.into_iter()
            .map(|(_, particle)| {
                let model = billboard_matrix(&right, &up, &forward, particle);
                InstanceData::new(&model, &particle.color())
            })
            .collect()
    }

    /// Number of live particles
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.pool.iter().filter(|particle| particle.is_alive()).count()
    }

    /// Pool capacity
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.pool.len()
    }

    /// All slots, live and dead
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.pool
    }

    /// Kill every particle
    pub fn clear(&mut self) {
        self.pool.fill(Particle::default());
        self.pool_index = 0;
    }
}

/// Camera-aligned quad at the particle, rolled around the view axis and scaled
fn billboard_matrix(right: &Vec3, up: &Vec3, forward: &Vec3, particle: &Particle) -> Mat4 {
    let size = particle.size();
    let roll = utils::deg_to_rad(particle.state.rotation);
    let (sin, cos) = roll.sin_cos();

    let rolled_right = (right * cos + up * sin) * size;
    let rolled_up = (up * cos - right * sin) * size;
    let facing = -forward * size;
    let position = particle.state.position;

    Mat4::new(
        rolled_right.x, rolled_up.x, facing.x, position.x,
        rolled_right.y, rolled_up.y, facing.y, position.y,
        rolled_right.z, rolled_up.z, facing.z, position.z,
        0.0, 0.0, 0.0, 1.0,
    )
}
