//! RNG oracle for deterministic random number generation.
//!
//! Every random decision in a resolution (hit roll, critical/stumble sub-roll,
//! strategy draw) pulls from a [`RollOracle`] passed in by the caller, so a
//! fixed seed reproduces an exact outcome sequence.
//!
//! # Draw order
//!
//! Per resolved action the resolver draws, in this order:
//!
//! 1. hit roll (decision tree root)
//! 2. critical or stumble sub-roll (second tree level)
//! 3. boss only: strategy roll selecting the next move
//!
//! Actions that bypass the tree (heal, shield, buff, cleanse) draw nothing.

use std::collections::VecDeque;

/// Source of uniform rolls in `[0, 1)`.
///
/// Implementations must be deterministic: given the same seed, they must
/// produce the same sequence of rolls.
pub trait RollOracle {
    /// Draws the next roll in `[0, 1)`.
    fn roll(&mut self) -> f64;
}

impl<R: RollOracle + ?Sized> RollOracle for &mut R {
    fn roll(&mut self) -> f64 {
        (**self).roll()
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// This implementation uses PCG-XSH-RR, which produces 32-bit output from
/// 64-bit state.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Creates a generator from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            state: Self::pcg_step(seed),
        }
    }

    /// Creates an independent stream for one combatant's turn.
    pub fn for_turn(battle_seed: u64, turn: u64, actor: u32) -> Self {
        Self::new(compute_seed(battle_seed, turn, actor, 0))
    }

    /// Advance the PCG state by one step.
    ///
    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// Generates the next raw 32-bit value.
    pub fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.state = Self::pcg_step(old);
        Self::pcg_output(old)
    }
}

impl RollOracle for PcgRng {
    fn roll(&mut self) -> f64 {
        // 2^32 buckets; the upper bound is never reached.
        f64::from(self.next_u32()) / 4_294_967_296.0
    }
}

/// Replays a fixed roll sequence.
///
/// Used to force specific decision-tree paths and strategy draws. When the
/// script runs out, the last roll is repeated (or `0.0` for an empty script).
#[derive(Clone, Debug, Default)]
pub struct ScriptedRolls {
    queue: VecDeque<f64>,
    last: f64,
}

impl ScriptedRolls {
    pub fn new(rolls: impl IntoIterator<Item = f64>) -> Self {
        Self {
            queue: rolls.into_iter().collect(),
            last: 0.0,
        }
    }

    /// Number of scripted rolls not yet consumed.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl RollOracle for ScriptedRolls {
    fn roll(&mut self) -> f64 {
        if let Some(next) = self.queue.pop_front() {
            self.last = next;
        }
        self.last
    }
}

/// Compute deterministic seed from battle state components.
///
/// # Arguments
///
/// * `battle_seed` - Base seed set at battle start (for replay/determinism)
/// * `turn` - Turn sequence number
/// * `actor` - Index of the acting combatant
/// * `context` - Additional context for multiple streams in the same turn
pub fn compute_seed(battle_seed: u64, turn: u64, actor: u32, context: u32) -> u64 {
    // SplitMix64 and FxHash multipliers
    let mut hash = battle_seed;
    hash ^= turn.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = PcgRng::new(42);
        let mut b = PcgRng::new(42);
        let left: Vec<f64> = (0..32).map(|_| a.roll()).collect();
        let right: Vec<f64> = (0..32).map(|_| b.roll()).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn rolls_stay_in_unit_interval() {
        let mut rng = PcgRng::new(7);
        for _ in 0..10_000 {
            let r = rng.roll();
            assert!((0.0..1.0).contains(&r), "roll {r} out of range");
        }
    }

    #[test]
    fn turn_streams_differ() {
        let mut first = PcgRng::for_turn(99, 1, 0);
        let mut second = PcgRng::for_turn(99, 2, 0);
        assert_ne!(first.next_u32(), second.next_u32());
    }

    #[test]
    fn scripted_rolls_repeat_last_value() {
        let mut rolls = ScriptedRolls::new([0.1, 0.9]);
        assert_eq!(rolls.roll(), 0.1);
        assert_eq!(rolls.roll(), 0.9);
        assert_eq!(rolls.remaining(), 0);
        assert_eq!(rolls.roll(), 0.9);
    }
}
