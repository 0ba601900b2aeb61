//! Unpredictable seed material
//!
//! Generators seeded without an explicit value pull 32-bit words from here.
//! The primary source is the operating system; when that fails a
//! deterministic-quality fallback mixes the wall clock and the process id
//! through SplitMix64 so seeding still succeeds on exotic platforms.

use rand::rngs::OsRng;
use rand::RngCore;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::Error;
use crate::seed::SplitMix64;

/// Fetch `n_words` 32-bit words from the OS entropy source.
pub fn system_entropy(n_words: usize) -> Result<Vec<u32>, Error> {
    let mut bytes = vec![0u8; n_words * 4];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| Error::EntropyUnavailable { detail: e.to_string() })?;
    Ok(bytes
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

/// Produce `n_words` words without touching the OS.
///
/// Mixes nanosecond wall-clock time and the process id through SplitMix64.
/// Not suitable as an output stream; only as last-resort seed material.
pub fn fallback_entropy(n_words: usize) -> Vec<u32> {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let mut mixer = SplitMix64::new(nanos ^ (u64::from(process::id()) << 32));
    (0..n_words).map(|_| mixer.next_u64() as u32).collect()
}

/// Fetch entropy words, falling back when the OS source is unavailable.
pub fn random_entropy(n_words: usize) -> Vec<u32> {
    match system_entropy(n_words) {
        Ok(words) => words,
        Err(err) => {
            log::debug!("system entropy failed ({}), using fallback", err);
            fallback_entropy(n_words)
        }
    }
}
