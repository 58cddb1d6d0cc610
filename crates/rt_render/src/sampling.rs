//! Per-work-unit random number generation.
//!
//! Every pixel owns its own generator, seeded from the render seed and the
//! pixel coordinates. Nothing is shared between concurrently running work
//! units, and a pixel's samples do not depend on which thread ran it or when.

use crate::{Real, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// SplitMix64 finalizer.
#[inline]
fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Generator for the work unit at pixel `(x, y)`.
pub fn pixel_rng(seed: u64, x: u32, y: u32) -> StdRng {
    let coords = (u64::from(y) << 32) | u64::from(x);
    StdRng::seed_from_u64(mix64(mix64(seed) ^ coords))
}

/// Uniform sample in `[0, 1)`.
#[inline]
pub fn jitter(rng: &mut dyn RngCore) -> Real {
    rng.gen::<Real>()
}

/// Uniformly distributed unit vector on the sphere.
///
/// Rejection sampling inside the unit ball, then normalized.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let v = Vec3::new(
            rng.gen::<Real>() * 2.0 - 1.0,
            rng.gen::<Real>() * 2.0 - 1.0,
            rng.gen::<Real>() * 2.0 - 1.0,
        );
        let len_sq = v.length_squared();
        if len_sq > 1e-6 && len_sq <= 1.0 {
            return v / len_sq.sqrt();
        }
    }
}
