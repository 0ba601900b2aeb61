//! ThreeFry-4x32 counter-based generator
//!
//! The 20-round Threefry-4x32 block cipher of Salmon et al., "Parallel
//! Random Numbers: As Easy as 1, 2, 3" (Random123), driven as a generator:
//! each refill increments the 128-bit counter by one (word 0 first, carry
//! propagating) and encrypts it under the 128-bit key, yielding four 32-bit
//! outputs consumed buffer[0] first. The stored counter names the block
//! currently buffered; construction, seeding, and advance seat it one step
//! behind the requested starting counter, so the first block encrypts the
//! starting counter unchanged and the counter reads back as that value
//! while its block drains. Because output is a pure function of
//! (key, counter), `advance` is O(1): add the delta to the counter and drop
//! the buffered block.

use crate::brng::{double_from_u32_pair, BitGenerator, Snapshot};
use crate::entropy::random_entropy;
use crate::error::Error;
use crate::seed::{int_to_words, seed_by_array, words_to_int};

const BUFFER_LEN: usize = 4;
const ROUNDS: usize = 20;

/// Skein key-schedule parity constant for 32-bit words.
const PARITY: u32 = 0x1BD1_1BDA;

/// Rotation distances for the (0,1)/(2,3) and (0,3)/(2,1) mix pairs,
/// cycling every eight rounds.
const ROTATIONS: [[u32; 2]; 8] = [
    [10, 26],
    [11, 21],
    [13, 27],
    [23, 5],
    [6, 20],
    [17, 11],
    [25, 10],
    [18, 20],
];

/// One Threefry-4x32-20 block: encrypt `counter` under `key`.
fn threefry4x32(key: &[u32; 4], counter: &[u32; 4]) -> [u32; 4] {
    let ks = [
        key[0],
        key[1],
        key[2],
        key[3],
        PARITY ^ key[0] ^ key[1] ^ key[2] ^ key[3],
    ];
    let mut x = [
        counter[0].wrapping_add(ks[0]),
        counter[1].wrapping_add(ks[1]),
        counter[2].wrapping_add(ks[2]),
        counter[3].wrapping_add(ks[3]),
    ];
    for round in 0..ROUNDS {
        let [r0, r1] = ROTATIONS[round % 8];
        if round % 2 == 0 {
            x[0] = x[0].wrapping_add(x[1]);
            x[1] = x[1].rotate_left(r0) ^ x[0];
            x[2] = x[2].wrapping_add(x[3]);
            x[3] = x[3].rotate_left(r1) ^ x[2];
        } else {
            x[0] = x[0].wrapping_add(x[3]);
            x[3] = x[3].rotate_left(r0) ^ x[0];
            x[2] = x[2].wrapping_add(x[1]);
            x[1] = x[1].rotate_left(r1) ^ x[2];
        }
        if (round + 1) % 4 == 0 {
            let inject = (round + 1) / 4;
            for i in 0..4 {
                x[i] = x[i].wrapping_add(ks[(inject + i) % 5]);
            }
            x[3] = x[3].wrapping_add(inject as u32);
        }
    }
    x
}

/// Construction inputs for [`ThreeFry32`].
///
/// `seed` and `key` are mutually exclusive; the counter defaults to zero.
#[derive(Debug, Clone, Default)]
pub struct ThreeFryParams {
    /// Seed words expanded into a key through SplitMix64.
    pub seed: Option<Vec<u64>>,
    /// Starting 128-bit counter.
    pub counter: Option<u128>,
    /// Explicit 128-bit key, bypassing seed expansion.
    pub key: Option<u128>,
}

/// ThreeFry-4x32 state: counter, key, and the buffered output block.
///
/// `buffer_pos == 4` means the buffer is empty and the next draw advances
/// the counter and refills. The counter holds the index of the block most
/// recently encrypted, one behind the next refill.
#[derive(Debug, Clone)]
pub struct ThreeFry32 {
    counter: [u32; 4],
    key: [u32; 4],
    buffer: [u32; 4],
    buffer_pos: usize,
}

impl ThreeFry32 {
    /// Seed from a scalar with the counter at zero.
    pub fn new(seed: u64) -> Self {
        Self::from_parts(Self::key_from_seed(&[seed]), 0)
    }

    /// Seed from an array of 64-bit words with the counter at zero.
    pub fn from_seed_array(seed: &[u64]) -> Result<Self, Error> {
        if seed.is_empty() {
            return Err(Error::EmptySeedArray);
        }
        Ok(Self::from_parts(Self::key_from_seed(seed), 0))
    }

    /// Use an explicit 128-bit key with the counter at zero.
    pub fn with_key(key: u128) -> Self {
        Self::from_parts(Self::key_words(key), 0)
    }

    /// Draw the key from the entropy source.
    pub fn from_entropy() -> Self {
        let words = random_entropy(4);
        Self::from_parts([words[0], words[1], words[2], words[3]], 0)
    }

    /// Construct from explicit parameters.
    ///
    /// Fails with a conflicting-inputs error when both `seed` and `key` are
    /// present; validation happens before any state exists.
    pub fn with_params(params: &ThreeFryParams) -> Result<Self, Error> {
        let key = match (&params.seed, params.key) {
            (Some(_), Some(_)) => return Err(Error::ConflictingSeedAndKey),
            (Some(seed), None) => {
                if seed.is_empty() {
                    return Err(Error::EmptySeedArray);
                }
                Self::key_from_seed(seed)
            }
            (None, Some(key)) => Self::key_words(key),
            (None, None) => {
                let words = random_entropy(4);
                [words[0], words[1], words[2], words[3]]
            }
        };
        Ok(Self::from_parts(key, params.counter.unwrap_or(0)))
    }

    fn from_parts(key: [u32; 4], counter: u128) -> Self {
        // Seat the stored counter one step behind the start: refill
        // pre-increments, so the first block encrypts `counter` itself.
        // 128 bits always fit; the conversion cannot fail here
        let words =
            int_to_words(counter.wrapping_sub(1), "counter", 128).expect("counter width");
        Self {
            counter: [words[0], words[1], words[2], words[3]],
            key,
            buffer: [0; BUFFER_LEN],
            buffer_pos: BUFFER_LEN,
        }
    }

    /// Expand seed words into four key words, low word of each 64-bit half
    /// first.
    fn key_from_seed(seed: &[u64]) -> [u32; 4] {
        let state = seed_by_array(seed, 2);
        [
            state[0] as u32,
            (state[0] >> 32) as u32,
            state[1] as u32,
            (state[1] >> 32) as u32,
        ]
    }

    fn key_words(key: u128) -> [u32; 4] {
        let words = int_to_words(key, "key", 128).expect("key width");
        [words[0], words[1], words[2], words[3]]
    }

    /// Re-seed in place, returning the counter to zero.
    pub fn seed(&mut self, seed: u64) {
        *self = Self::from_parts(Self::key_from_seed(&[seed]), 0);
    }

    /// Advance the counter (word 0 first, carry up) and encrypt it.
    fn refill(&mut self) {
        for word in self.counter.iter_mut() {
            *word = word.wrapping_add(1);
            if *word != 0 {
                break;
            }
        }
        self.buffer = threefry4x32(&self.key, &self.counter);
        self.buffer_pos = 0;
    }

    /// Add `delta` to the 128-bit counter and drop any buffered outputs.
    pub fn advance(&mut self, delta: u128) {
        let current = words_to_int(&self.counter);
        let next = current.wrapping_add(delta);
        self.counter = [
            next as u32,
            (next >> 32) as u32,
            (next >> 64) as u32,
            (next >> 96) as u32,
        ];
        self.buffer_pos = BUFFER_LEN;
        log::debug!("ThreeFry32 advance by {}, counter now {:?}", delta, self.counter);
    }

    /// Jump `iter * 2^64` counter positions ahead.
    ///
    /// The scaled delta wraps modulo 2^128 just like the counter; callers
    /// wanting more than 2^64 jumps must track the wrap themselves.
    pub fn jump(&mut self, iter: u64) {
        self.advance(u128::from(iter) << 64);
    }
}

impl BitGenerator for ThreeFry32 {
    fn name(&self) -> &'static str {
        "ThreeFry32"
    }

    #[inline]
    fn next_u32(&mut self) -> u32 {
        if self.buffer_pos < BUFFER_LEN {
            let out = self.buffer[self.buffer_pos];
            self.buffer_pos += 1;
            return out;
        }
        self.refill();
        self.buffer_pos = 1;
        self.buffer[0]
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        let high = self.next_u32();
        let low = self.next_u32();
        (u64::from(high) << 32) | u64::from(low)
    }

    #[inline]
    fn next_double(&mut self) -> f64 {
        let a = self.next_u32();
        let b = self.next_u32();
        double_from_u32_pair(a, b)
    }

    #[inline]
    fn next_raw(&mut self) -> u64 {
        u64::from(self.next_u32())
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot::ThreeFry32 {
            counter: self.counter,
            key: self.key,
            buffer: self.buffer,
            buffer_pos: self.buffer_pos,
        }
    }

    fn restore(&mut self, snapshot: &Snapshot) -> Result<(), Error> {
        let (counter, key, buffer, buffer_pos) = match snapshot {
            Snapshot::ThreeFry32 { counter, key, buffer, buffer_pos } => {
                (*counter, *key, *buffer, *buffer_pos)
            }
            other => {
                return Err(Error::StateMismatch {
                    expected: self.name(),
                    found: other.brng().to_string(),
                })
            }
        };
        if buffer_pos > BUFFER_LEN {
            return Err(Error::InvalidStateField {
                field: "buffer_pos",
                detail: format!("must be at most {}, got {}", BUFFER_LEN, buffer_pos),
            });
        }
        self.counter = counter;
        self.key = key;
        self.buffer = buffer;
        self.buffer_pos = buffer_pos;
        Ok(())
    }
}

impl rand::RngCore for ThreeFry32 {
    fn next_u32(&mut self) -> u32 {
        BitGenerator::next_u32(self)
    }

    fn next_u64(&mut self) -> u64 {
        BitGenerator::next_u64(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let mut i = 0;
        while i < dest.len() {
            let bytes = BitGenerator::next_u32(self).to_le_bytes();
            let take = (dest.len() - i).min(4);
            dest[i..i + take].copy_from_slice(&bytes[..take]);
            i += take;
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
