//! Injectable randomness for the resolver.
//!
//! Every roll in an encounter comes from one [`CombatRng`] owned by the
//! session. Implementations must be deterministic: the same seed produces the
//! same sequence, so an encounter can be replayed action by action.

use sha2::{Digest, Sha256};

use crate::catalog::PlayerId;

/// Source of random rolls consumed by the resolver.
///
/// Only [`next_u32`](Self::next_u32) is required; the derived helpers are
/// overridable so scripted test doubles can pin specific outcomes.
pub trait CombatRng: Send {
    fn next_u32(&mut self) -> u32;

    /// Uniform integer in `[min, max]` inclusive.
    fn range(&mut self, min: i64, max: i64) -> i64 {
        if min >= max {
            return min;
        }
        let span = (max - min) as u64 + 1;
        min + (u64::from(self.next_u32()) % span) as i64
    }

    /// Uniform float in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        f64::from(self.next_u32()) / (f64::from(u32::MAX) + 1.0)
    }

    /// Bernoulli trial. Always consumes one roll, whatever `p` is.
    fn chance(&mut self, p: f64) -> bool {
        self.unit() < p
    }
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
///
/// Small, fast and of good statistical quality; the whole state is a single
/// `u64`, so a session's generator can be reconstructed from its seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    pub fn new(seed: u64) -> Self {
        let mut rng = Self { state: 0 };
        rng.step();
        rng.state = rng.state.wrapping_add(seed);
        rng.step();
        rng
    }

    #[inline]
    fn step(&mut self) {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
    }

    /// XSH-RR output permutation.
    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl CombatRng for PcgRng {
    fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.step();
        Self::output(old)
    }
}

/// Test double: every range roll lands on its midpoint and every unit roll
/// returns a fixed value (0.5 unless overridden).
///
/// With the default unit value a 0% critical chance never crits and a
/// certain (p = 1.0) drop always drops.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MidpointRng {
    unit: f64,
}

impl MidpointRng {
    pub fn new() -> Self {
        Self { unit: 0.5 }
    }

    pub fn with_unit(unit: f64) -> Self {
        Self { unit }
    }
}

impl Default for MidpointRng {
    fn default() -> Self {
        Self::new()
    }
}

impl CombatRng for MidpointRng {
    fn next_u32(&mut self) -> u32 {
        u32::MAX / 2
    }

    fn range(&mut self, min: i64, max: i64) -> i64 {
        if min >= max {
            return min;
        }
        (min + max).div_euclid(2)
    }

    fn unit(&mut self) -> f64 {
        self.unit
    }
}

/// Derive a per-session seed from a base seed, the player and a counter.
///
/// Hashing keeps sessions of different players independent even when the
/// base seed is shared, while staying reproducible for a fixed base seed.
pub fn derive_session_seed(base_seed: u64, player: &PlayerId, session: u64) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(base_seed.to_le_bytes());
    hasher.update(player.as_str().as_bytes());
    hasher.update(session.to_le_bytes());
    let digest = hasher.finalize();

    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}
