//! Seed expansion and word-array marshalling
//!
//! Two small pieces that every generator shares: the SplitMix64 mixer used
//! to turn user seeds into full-width state, and the canonical conversion
//! between integers and little-endian 32-bit word arrays used for counters,
//! keys, and snapshots.

use smallvec::SmallVec;

use crate::error::Error;

/// Weyl increment for the SplitMix64 stream.
pub(crate) const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// Stateless-by-construction 64-bit mixer from Steele, Lea & Flood,
/// "Fast Splittable Pseudorandom Number Generators" (2014).
///
/// Used only to bootstrap generator state from user seeds; never exposed
/// as an output stream.
#[derive(Debug, Clone)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    /// Create a mixer whose stream starts at `state`.
    pub fn new(state: u64) -> Self {
        Self { state }
    }

    /// XOR-fold a seed word into the stream state.
    #[inline]
    pub fn fold(&mut self, word: u64) {
        self.state ^= word;
    }

    /// Advance the stream and return the mixed output.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

/// Expand a seed array into `n` 64-bit state words.
///
/// A single SplitMix64 stream starts from zero; each seed word is XOR-folded
/// into the stream state before the stream advances for its slot. Iteration
/// runs over `max(seed.len(), n)` slots so oversized seed arrays keep
/// folding into the state (wrapping over the output), and a one-element
/// array produces exactly the same state as the equivalent scalar.
pub fn seed_by_array(seed: &[u64], n: usize) -> Vec<u64> {
    let mut mixer = SplitMix64::new(0);
    let mut out = vec![0u64; n];
    for i in 0..seed.len().max(n) {
        if let Some(&word) = seed.get(i) {
            mixer.fold(word);
        }
        out[i % n] = mixer.next_u64();
    }
    out
}

/// Serialize a non-negative integer into little-endian 32-bit words.
///
/// `word[i] = (value >> 32*i) & 0xFFFF_FFFF`, producing `total_bits / 32`
/// words. Fails with a range error when `value` does not fit in
/// `total_bits`; the check runs before anything else, so callers can rely
/// on failed conversions having no side effects.
pub fn int_to_words(
    value: u128,
    name: &'static str,
    total_bits: u32,
) -> Result<SmallVec<[u32; 8]>, Error> {
    debug_assert!(total_bits % 32 == 0);
    if total_bits < 128 && (value >> total_bits) != 0 {
        return Err(Error::OutOfRange { name, bits: total_bits });
    }
    let n_words = (total_bits / 32) as usize;
    let mut words = SmallVec::with_capacity(n_words);
    for i in 0..n_words {
        words.push((value >> (32 * i)) as u32);
    }
    Ok(words)
}

/// Inverse of [`int_to_words`] for up to four words.
pub fn words_to_int(words: &[u32]) -> u128 {
    debug_assert!(words.len() <= 4);
    words
        .iter()
        .enumerate()
        .fold(0u128, |acc, (i, &w)| acc | (u128::from(w) << (32 * i)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splitmix_reference_sequence() {
        // Published test vector for a zero-seeded SplitMix64 stream
        let mut mixer = SplitMix64::new(0);
        assert_eq!(mixer.next_u64(), 0xE220_A839_7B1D_CDAF);
        assert_eq!(mixer.next_u64(), 0x6E78_9E6A_A1B9_65F4);
        assert_eq!(mixer.next_u64(), 0x06C4_5D18_8009_454F);
    }

    #[test]
    fn test_expansion_deterministic() {
        for seed in [0u64, 1, 42, u64::MAX] {
            assert_eq!(seed_by_array(&[seed], 4), seed_by_array(&[seed], 4));
        }
        assert_ne!(seed_by_array(&[1], 4), seed_by_array(&[2], 4));
    }

    #[test]
    fn test_expansion_slots_differ() {
        let state = seed_by_array(&[0], 4);
        assert_eq!(state.len(), 4);
        for i in 0..4 {
            for j in (i + 1)..4 {
                assert_ne!(state[i], state[j], "slots {} and {} collide", i, j);
            }
        }
    }

    #[test]
    fn test_oversized_seed_folds_back() {
        // More seed words than slots must still influence the state
        let short = seed_by_array(&[1, 2], 2);
        let long = seed_by_array(&[1, 2, 3], 2);
        assert_ne!(short, long);
    }

    #[test]
    fn test_int_to_words_layout() {
        let words = int_to_words(0x0000_0002_0000_0001u128, "counter", 128).unwrap();
        assert_eq!(&words[..], &[1, 2, 0, 0]);
    }

    #[test]
    fn test_int_to_words_range_check() {
        assert!(int_to_words(u128::from(u64::MAX), "seed", 64).is_ok());
        assert_eq!(
            int_to_words(u128::from(u64::MAX) + 1, "seed", 64),
            Err(Error::OutOfRange { name: "seed", bits: 64 })
        );
    }

    #[test]
    fn test_words_round_trip() {
        let value = 0x0123_4567_89AB_CDEF_0011_2233_4455_6677u128;
        let words = int_to_words(value, "key", 128).unwrap();
        assert_eq!(words_to_int(&words), value);
    }
}
