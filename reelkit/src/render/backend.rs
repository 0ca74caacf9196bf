use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::composition::registry::{CompositionId, CompositionProps, VideoConfig};
use crate::eval::derive::DerivedScene;
use crate::foundation::core::FrameRange;
use crate::foundation::error::ReelkitResult;

/// Everything a backend needs to produce one output file.
#[derive(Clone, Debug)]
pub struct RenderJob {
    /// Derived scene, including the resolved props.
    pub scene: Arc<DerivedScene>,
    /// Frames to render.
    pub frames: FrameRange,
    /// Destination file.
    pub output_path: PathBuf,
}

impl RenderJob {
    /// Job covering every frame of `scene`.
    pub fn whole(scene: Arc<DerivedScene>, output_path: impl Into<PathBuf>) -> Self {
        let frames = scene.frames();
        Self {
            scene,
            frames,
            output_path: output_path.into(),
        }
    }

    /// Composition name.
    pub fn composition(&self) -> CompositionId {
        self.scene.id()
    }

    /// Props with media sources resolved, as forwarded to external renderers.
    pub fn props(&self) -> &CompositionProps {
        self.scene.props()
    }

    /// Output format.
    pub fn config(&self) -> VideoConfig {
        self.scene.config()
    }
}

/// Produces an output file from a [`RenderJob`].
///
/// Backends are black boxes to the rest of the crate: failures come back as
/// [`crate::ReelkitError::Backend`] and are never retried.
pub trait RenderBackend: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Render `job` to `job.output_path`.
    fn render(&self, job: &RenderJob) -> ReelkitResult<()>;
}

/// Create the parent directory of `path` if it is missing.
pub fn ensure_parent_dir(path: &Path) -> ReelkitResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}
