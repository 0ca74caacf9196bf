//! Scene derivation and per-frame evaluation.

/// Props to scene derivation.
pub mod derive;
/// Frame evaluation, sequential or parallel.
pub mod evaluator;
/// Stable props fingerprints.
pub mod fingerprint;
