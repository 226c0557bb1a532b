//! Abstraction over the entropy source so operations can be driven by the OS
//! CSPRNG in production and by deterministic byte streams in tests.

pub mod random;
