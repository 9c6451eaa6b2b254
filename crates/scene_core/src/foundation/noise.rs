//! Seeded fractal noise
//!
//! Each [`NoiseField`] owns its generator. Two fields built with the same seed
//! and frequency return the same values, independent of any other field.

use std::fmt;

use ::noise::{Fbm, MultiFractal, NoiseFn, Perlin};

/// 2D fractal Perlin noise with values in `[-1, 1]`
pub struct NoiseField {
    seed: u32,
    frequency: f32,
    fbm: Fbm<Perlin>,
}

impl NoiseField {
    /// Octaves summed per sample
    pub const OCTAVES: usize = 4;

    /// Create a field sampling Perlin FBm at `frequency` cycles per unit
    #[must_use]
    pub fn new(seed: u32, frequency: f32) -> Self {
        let fbm = Fbm::<Perlin>::new(seed)
            .set_octaves(Self::OCTAVES)
            .set_frequency(f64::from(frequency));
        Self { seed, frequency, fbm }
    }

    /// Seed the field was built with
    #[must_use]
    pub const fn seed(&self) -> u32 {
        self.seed
    }

    /// Sample frequency
    #[must_use]
    pub const fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Noise at `(x, y)`, clamped to `[-1, 1]`
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        let value = self.fbm.get([f64::from(x), f64::from(y)]) as f32;
        value.clamp(-1.0, 1.0)
    }
}

impl fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoiseField")
            .field("seed", &self.seed)
            .field("frequency", &self.frequency)
            .finish_non_exhaustive()
    }
}

/// Map a noise value from `[-1, 1]` onto a texel byte
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn to_byte(value: f32) -> u8 {
    ((value.clamp(-1.0, 1.0) + 1.0) * 127.5) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_values() {
        let a = NoiseField::new(7, 0.05);
        let b = NoiseField::new(7, 0.05);
        let c = NoiseField::new(8, 0.05);

        let points = [(1.5, 2.25), (10.0, 3.0), (37.0, 113.0)];
        for (x, y) in points {
            assert_eq!(a.sample(x, y).to_bits(), b.sample(x, y).to_bits());
        }
        assert!(points.iter().any(|&(x, y)| a.sample(x, y) != c.sample(x, y)));
    }

    #[test]
    fn test_samples_stay_in_range() {
        let field = NoiseField::new(3, 1.0);
        for step in 0..500 {
            let t = step as f32 * 0.37;
            let value = field.sample(t, -t * 0.5);
            assert!((-1.0..=1.0).contains(&value), "{value}");
        }
    }

    #[test]
    fn test_byte_mapping() {
        assert_eq!(to_byte(-1.0), 0);
        assert_eq!(to_byte(0.0), 127);
        assert_eq!(to_byte(1.0), 255);
        assert_eq!(to_byte(0.5), 191);
        assert_eq!(to_byte(3.0), 255);
    }
}
