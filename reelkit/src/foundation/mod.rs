/// Frame, rate, and canvas primitives.
pub mod core;
/// Crate error type.
pub mod error;
