//! Render boundary.
//!
//! A [`backend::RenderBackend`] turns a derived scene into an output file. The
//! [`service::render_request`] entry point validates a request, derives the scene, and hands it
//! to a backend exactly once.

/// Backend trait and job description.
pub mod backend;
/// External renderer process backend.
pub mod command;
/// NDJSON frame state backend.
pub mod frame_dump;
/// Request handling.
pub mod service;
