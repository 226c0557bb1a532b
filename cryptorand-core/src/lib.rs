//! Cryptographically secure random value generation.
//!
//! Every operation validates its arguments completely before drawing a single
//! byte of entropy, so a request either produces its full result or nothing.
//! Servers share one read-only [`registry::Registry`] across all requests.

pub mod error;
pub mod constants;
pub mod traits;
pub mod entropy;
pub mod sampling;
pub mod args;
pub mod schema;
pub mod ops;
pub mod registry;
pub mod prompt;

#[cfg(test)]
pub(crate) mod testing;
