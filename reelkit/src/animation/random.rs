/// Seed type shared by every seeded computation in the crate.
pub type Seed = i64;

const LCG_MUL: i64 = 9301;
const LCG_INC: i64 = 49297;
const LCG_MOD: i64 = 233280;

/// Small linear congruential generator.
///
/// The constants are fixed so a given seed yields the same sequence on every platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeededRandom {
    state: i64,
}

impl SeededRandom {
    /// Create a generator from `seed`. Any `i64` is accepted.
    pub fn new(seed: Seed) -> Self {
        Self {
            state: seed.rem_euclid(LCG_MOD),
        }
    }

    /// Advance the generator and return a value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = (self.state * LCG_MUL + LCG_INC) % LCG_MOD;
        self.state as f64 / LCG_MOD as f64
    }
}

/// Return a seeded Fisher-Yates permutation of `items`. The input is left untouched.
pub fn shuffle<T: Clone>(items: &[T], seed: Seed) -> Vec<T> {
    let mut out = items.to_vec();
    let mut rng = SeededRandom::new(seed);
    for i in (1..out.len()).rev() {
        let j = (rng.next_f64() * (i + 1) as f64).floor() as usize;
        out.swap(i, j.min(i));
    }
    out
}

/// Derive a non-negative seed from a string.
///
/// Runs `hash = hash * 31 + unit` over the UTF-16 code units of `s`, wrapping at 32 bits, and
/// returns the absolute value of the result.
pub fn string_to_seed(s: &str) -> Seed {
    let hash = s.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    });
    i64::from(hash).abs()
}

#[cfg(test)]
#[path = "../../tests/unit/animation/random.rs"]
mod tests;
