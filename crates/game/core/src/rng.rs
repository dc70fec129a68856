//! Deterministic randomness.
//!
//! All random choices (random placement, enemy wandering) go through an
//! [`RngOracle`] keyed by an explicit seed. The same descriptor seed and the
//! same sequence of turns always replay the same run.

/// Stateless seed-to-value generator.
pub trait RngOracle: Send + Sync {
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform index in `0..len`, `None` for an empty range.
    fn pick_index(&self, seed: u64, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let len_u32 = u32::try_from(len).unwrap_or(u32::MAX);
        usize::try_from(self.next_u32(seed) % len_u32).ok()
    }

    /// Value in `[min, max]` inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = max - min;
        match span.checked_add(1) {
            Some(width) => min + self.next_u32(seed) % width,
            None => self.next_u32(seed),
        }
    }
}

/// PCG-XSH-RR: one LCG step followed by an xorshift and a random rotation.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rotation = (state >> 59) as u32;
        xorshifted.rotate_right(rotation)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Mixes the run seed with the turn nonce, the acting creature and a context
/// slot into one well-spread seed.
///
/// Use a distinct `context` for each independent roll within the same turn.
pub fn compute_seed(game_seed: u64, nonce: u64, actor: u32, context: u32) -> u64 {
    let mut hash = game_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= u64::from(actor).wrapping_mul(0x517cc1b727220a95);
    hash ^= u64::from(context).wrapping_mul(0x85ebca6b);

    // splitmix-style finalizer
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}
