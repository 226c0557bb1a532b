use cryptorand_core::entropy::OsRandom;
use cryptorand_core::registry::Registry;
use cryptorand_core::traits::random::SecureRandom;

/// Shared, read-only state handed to every request.
pub struct AppState {
    /// Operation table, built once at startup.
    pub registry: Registry,
    /// Entropy source backing every operation.
    pub rng: Box<dyn SecureRandom>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_rng(Box::new(OsRandom::new()))
    }

    pub fn with_rng(rng: Box<dyn SecureRandom>) -> Self {
        Self {
            registry: Registry::new(),
            rng,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
