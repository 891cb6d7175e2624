//! Deterministic identifier selection.
//!
//! The generator lives inside [`AppState`](crate::state::AppState) so a
//! recorded action log replays to the same sequence of creatures.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// PCG-XSH-RR generator: 64-bit state, 32-bit output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RoundRng {
    state: u64,
}

impl RoundRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    pub fn new(seed: u64) -> Self {
        // Scramble the seed so nearby seeds don't start on nearby states.
        let mut hash = seed ^ 0x9e3779b97f4a7c15;
        hash ^= hash >> 33;
        hash = hash.wrapping_mul(0xff51afd7ed558ccd);
        hash ^= hash >> 33;
        Self { state: hash }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
        let xorshifted = (((self.state >> 18) ^ self.state) >> 27) as u32;
        let rot = (self.state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// Uniform value in `[min, max]` inclusive.
    ///
    /// Rejects the tail of the u32 range that would bias the modulo.
    pub fn next_in_range(&mut self, min: u16, max: u16) -> u16 {
        if min >= max {
            return min;
        }
        let span = (max - min) as u32 + 1;
        let zone = u32::MAX - (u32::MAX % span);
        loop {
            let value = self.next_u32();
            if value < zone {
                return min + (value % span) as u16;
            }
        }
    }
}

impl Default for RoundRng {
    fn default() -> Self {
        Self::new(0)
    }
}
