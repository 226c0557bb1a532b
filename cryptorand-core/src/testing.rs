//! Deterministic entropy sources for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::entropy::OsRandom;
use crate::error::RandError;
use crate::traits::random::SecureRandom;

/// Replays a fixed byte sequence, wrapping around at the end.
pub(crate) struct FixedRandom {
    bytes: Vec<u8>,
    pos: AtomicUsize,
}

impl FixedRandom {
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        assert!(!bytes.is_empty(), "FixedRandom needs at least one byte");
        Self {
            bytes,
            pos: AtomicUsize::new(0),
        }
    }

    /// Each word is emitted little-endian, so `next_u64` returns the words in order.
    pub(crate) fn from_words(words: &[u64]) -> Self {
        Self::new(words.iter().flat_map(|w| w.to_le_bytes()).collect())
    }
}

impl SecureRandom for FixedRandom {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), RandError> {
        for b in dest.iter_mut() {
            let i = self.pos.fetch_add(1, Ordering::Relaxed);
            *b = self.bytes[i % self.bytes.len()];
        }
        Ok(())
    }
}

/// OS randomness that counts how many times it was asked for bytes.
#[derive(Default)]
pub(crate) struct CountingRandom {
    inner: OsRandom,
    calls: AtomicUsize,
}

impl CountingRandom {
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl SecureRandom for CountingRandom {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), RandError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.inner.fill_bytes(dest)
    }
}

/// An entropy source that is never available.
pub(crate) struct FailingRandom;

impl SecureRandom for FailingRandom {
    fn fill_bytes(&self, _dest: &mut [u8]) -> Result<(), RandError> {
        Err(RandError::EntropyUnavailable("entropy pool offline".to_string()))
    }
}
