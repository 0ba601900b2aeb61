//! Bit generator interface and state transfer
//!
//! Every concrete algorithm implements [`BitGenerator`], the raw-bits seam
//! the distribution layer and host bindings consume. [`Generator`] wraps a
//! boxed generator together with the per-handle lock that callers hold
//! around any sequence of draws they treat atomically; the primitive
//! `next_*` calls never lock on their own. [`Snapshot`] is the sole
//! serialization format for generator state.

pub mod mt19937;
mod jump;
pub mod threefry;
pub mod xoshiro256;

use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::Error;

pub use mt19937::Mt19937;
pub use threefry::{ThreeFry32, ThreeFryParams};
pub use xoshiro256::Xoshiro256StarStar;

/// Raw bit source with seedable, transferable state.
///
/// Identical seeds on a cold generator must yield identical infinite
/// sequences for every method here, across platforms and executions. The
/// 32/64-bit adapters are part of that contract: a 32-bit algorithm builds
/// `next_u64` from two draws (high word first), a 64-bit algorithm splits
/// one output across two `next_u32` calls (low half first).
pub trait BitGenerator: Send {
    /// Algorithm name, matching the tag carried by this generator's snapshots.
    fn name(&self) -> &'static str;

    /// Next 32-bit output.
    fn next_u32(&mut self) -> u32;

    /// Next 64-bit output.
    fn next_u64(&mut self) -> u64;

    /// Next double in [0, 1) using the algorithm's documented conversion.
    fn next_double(&mut self) -> f64;

    /// Next native-width output, zero-extended to 64 bits.
    fn next_raw(&mut self) -> u64;

    /// Capture the full state, including any adapter buffers.
    fn snapshot(&self) -> Snapshot;

    /// Replace the state with a previously captured snapshot.
    ///
    /// Rejects snapshots whose tag names a different algorithm and
    /// snapshots with out-of-range fields; on any error the state is
    /// unchanged.
    fn restore(&mut self, snapshot: &Snapshot) -> Result<(), Error>;
}

/// Tagged state record; the only serialization format generators accept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "brng")]
pub enum Snapshot {
    /// MT19937: 624-word key block and the position within it.
    #[serde(rename = "MT19937")]
    Mt19937 {
        key: Vec<u32>,
        pos: usize,
    },
    /// ThreeFry-4x32: counter, key, and the buffered output block. The
    /// counter names the block most recently encrypted into the buffer.
    #[serde(rename = "ThreeFry32")]
    ThreeFry32 {
        counter: [u32; 4],
        key: [u32; 4],
        buffer: [u32; 4],
        buffer_pos: usize,
    },
    /// xoshiro256**: state words and the 32-bit half-word cache.
    #[serde(rename = "Xoshiro256StarStar")]
    Xoshiro256StarStar {
        s: [u64; 4],
        has_uint32: bool,
        uinteger: u32,
    },
}

impl Snapshot {
    /// Tag string for this snapshot's algorithm.
    pub fn brng(&self) -> &'static str {
        match self {
            Snapshot::Mt19937 { .. } => "MT19937",
            Snapshot::ThreeFry32 { .. } => "ThreeFry32",
            Snapshot::Xoshiro256StarStar { .. } => "Xoshiro256StarStar",
        }
    }

    /// Serialize to the tagged JSON record format.
    pub fn to_json(&self) -> String {
        // Serialization of these variants cannot fail
        serde_json::to_string(self).expect("snapshot serialization")
    }

    /// Parse a tagged JSON record.
    pub fn from_json(text: &str) -> Result<Self, Error> {
        serde_json::from_str(text).map_err(|e| Error::MalformedState { detail: e.to_string() })
    }
}

/// Owning handle: a boxed generator behind its per-handle lock.
///
/// Handles share no state with each other, so distinct handles are freely
/// usable from distinct threads. Within one handle, callers acquire the
/// lock for the whole span of draws they need to be uninterleaved (a bulk
/// fill, a distribution's multi-draw rejection loop) and make primitive
/// calls through the guard.
pub struct Generator {
    lock: Mutex<Box<dyn BitGenerator>>,
}

impl Generator {
    /// Take ownership of a concrete generator.
    pub fn new<G>(inner: G) -> Self
    where
        G: BitGenerator + 'static,
    {
        Self { lock: Mutex::new(Box::new(inner)) }
    }

    /// Acquire the handle's lock for a span of draws.
    pub fn lock(&self) -> MutexGuard<'_, Box<dyn BitGenerator>> {
        // A panicked holder cannot leave the integer state torn; recover.
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Canonical [0, 1) conversion for one 64-bit output.
#[inline]
pub(crate) fn double_from_u64(value: u64) -> f64 {
    (value >> 11) as f64 * (1.0 / 9007199254740992.0)
}

/// Canonical [0, 1) conversion for a pair of 32-bit outputs, first draw `a`.
#[inline]
pub(crate) fn double_from_u32_pair(a: u32, b: u32) -> f64 {
    (f64::from(a >> 5) * 67108864.0 + f64::from(b >> 6)) * (1.0 / 9007199254740992.0)
}
