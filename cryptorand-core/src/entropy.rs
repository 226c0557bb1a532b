use crate::error::RandError;
use crate::traits::random::SecureRandom;

/// SecureRandom backed by the operating system CSPRNG via getrandom.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandom;

impl OsRandom {
    pub fn new() -> Self {
        Self
    }
}

impl SecureRandom for OsRandom {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), RandError> {
        getrandom::getrandom(dest)
            .map_err(|e| RandError::EntropyUnavailable(format!("getrandom failed: {e}")))
    }
}
