//! Pooled particle simulation and its seeded emitter

pub mod emitter;
pub mod system;

pub use emitter::ParticleEmitter;
pub use system::{Particle, ParticleProps, ParticleSystem};
