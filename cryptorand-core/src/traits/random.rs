use crate::error::RandError;

/// A source of cryptographically secure random bytes.
///
/// Implementations must be safe to share across request tasks.
pub trait SecureRandom: Send + Sync {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), RandError>;

    fn random_bytes(&self, len: usize) -> Result<Vec<u8>, RandError> {
        let mut buf = vec![0u8; len];
        self.fill_bytes(&mut buf)?;
        Ok(buf)
    }

    fn next_u64(&self) -> Result<u64, RandError> {
        let mut buf = [0u8; 8];
        self.fill_bytes(&mut buf)?;
        Ok(u64::from_le_bytes(buf))
    }
}
