use std::io::Write as _;

use crate::eval::evaluator::{Evaluator, RenderThreading};
use crate::foundation::error::{ReelkitError, ReelkitResult};
use crate::render::backend::{RenderBackend, RenderJob, ensure_parent_dir};

/// Backend that writes evaluated frame states as newline-delimited JSON.
///
/// One [`crate::FrameState`] per line, in frame order. Useful for inspecting a composition
/// without a video renderer, and for diffing two props values frame by frame.
#[derive(Clone, Debug, Default)]
pub struct FrameDumpBackend {
    threading: RenderThreading,
}

impl FrameDumpBackend {
    /// Create a backend evaluating with `threading`.
    pub fn new(threading: RenderThreading) -> Self {
        Self { threading }
    }
}

impl RenderBackend for FrameDumpBackend {
    fn name(&self) -> &'static str {
        "frame-dump"
    }

    #[tracing::instrument(skip(self, job), fields(composition = %job.composition()))]
    fn render(&self, job: &RenderJob) -> ReelkitResult<()> {
        let states = Evaluator::eval_range(&job.scene, job.frames, &self.threading)?;
        ensure_parent_dir(&job.output_path)?;

        let io_err = |e: std::io::Error| {
            ReelkitError::backend(format!(
                "failed to write frame dump '{}': {e}",
                job.output_path.display()
            ))
        };
        let file = std::fs::File::create(&job.output_path).map_err(io_err)?;
        let mut out = std::io::BufWriter::new(file);
        for st in &states {
            serde_json::to_writer(&mut out, st)?;
            out.write_all(b"\n").map_err(io_err)?;
        }
        out.flush().map_err(io_err)?;

        tracing::debug!(frames = states.len(), "frame dump written");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame_dump.rs"]
mod tests;
