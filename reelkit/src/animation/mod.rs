//! Frame-driven animation primitives.

/// Easing curves.
pub mod ease;
/// Piecewise-linear interpolation with easing and extrapolation.
pub mod interpolate;
/// Deterministic pseudo-random sequences.
pub mod random;
