//! Random helpers for the demo scene builder.
//!
//! Uses a seeded ChaCha20 PRNG so repeated runs produce the same scene and
//! therefore the same image.

use std::cell::RefCell;

use glam::Vec3A;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Fixed seed: the demo scene must be reproducible.
const SCENE_SEED: u64 = 0x6c75_6d65;

thread_local! {
    static RNG: RefCell<ChaCha20Rng> = RefCell::new(ChaCha20Rng::seed_from_u64(SCENE_SEED));
}

/// Generate a random f64 in [0.0, 1.0)
pub fn random_f64() -> f64 {
    RNG.with(|rng| rng.borrow_mut().random())
}

/// Generate a random f64 in [min, max)
pub fn random_f64_range(min: f64, max: f64) -> f64 {
    min + (max - min) * random_f64()
}

/// Generate random RGB color with components in [min, max).
pub fn random_color_range(min: f32, max: f32) -> Vec3A {
    let component = || min + (max - min) * random_f64() as f32;
    Vec3A::new(component(), component(), component())
}
