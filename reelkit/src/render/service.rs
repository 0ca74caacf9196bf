use std::path::PathBuf;
use std::sync::Arc;

use crate::assets::resolve::AssetResolver;
use crate::composition::registry::{CompositionId, CompositionProps, Registry};
use crate::eval::derive::DerivedScene;
use crate::foundation::core::FrameRange;
use crate::foundation::error::{ReelkitError, ReelkitResult};
use crate::render::backend::{RenderBackend, RenderJob};

/// Body of a render call.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    /// Registered composition name.
    pub composition_id: String,
    /// Raw props, validated against the composition's schema.
    #[serde(default)]
    pub props: serde_json::Value,
    /// Destination file.
    pub output_path: PathBuf,
    /// Optional sub-range; the whole composition when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frames: Option<FrameRange>,
}

/// Outcome of a render call.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderResponse {
    /// `true` when the backend produced the output.
    pub success: bool,
    /// Output file on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
    /// Error message on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RenderResponse {
    fn ok(output_path: PathBuf) -> Self {
        Self {
            success: true,
            output_path: Some(output_path),
            error: None,
        }
    }

    fn failed(err: &ReelkitError) -> Self {
        Self {
            success: false,
            output_path: None,
            error: Some(err.to_string()),
        }
    }
}

/// Validate `req` and derive its scene into a [`RenderJob`].
pub fn prepare_job(
    registry: &Registry,
    resolver: &AssetResolver,
    req: &RenderRequest,
) -> ReelkitResult<RenderJob> {
    let id: CompositionId = req.composition_id.parse()?;
    let props = CompositionProps::from_json(id, req.props.clone())?;
    let scene = Arc::new(DerivedScene::derive(registry, &props, resolver)?);
    if scene.duration() == 0 {
        return Err(ReelkitError::validation(format!("composition {id} has no frames")));
    }
    if req.output_path.as_os_str().is_empty() {
        return Err(ReelkitError::validation("outputPath must be non-empty"));
    }

    let frames = match req.frames {
        Some(r) => {
            if r.is_empty() || r.end.0 > scene.duration() {
                return Err(ReelkitError::validation(format!(
                    "frame range {}..{} outside composition of {} frames",
                    r.start.0,
                    r.end.0,
                    scene.duration()
                )));
            }
            r
        }
        None => scene.frames(),
    };

    Ok(RenderJob {
        scene,
        frames,
        output_path: req.output_path.clone(),
    })
}

/// Run one render request end to end.
///
/// Every failure is folded into the response; nothing is retried.
#[tracing::instrument(
    skip(registry, resolver, backend, req),
    fields(composition = %req.composition_id, backend = backend.name())
)]
pub fn render_request(
    registry: &Registry,
    resolver: &AssetResolver,
    backend: &dyn RenderBackend,
    req: RenderRequest,
) -> RenderResponse {
    tracing::info!(output = %req.output_path.display(), "render starting");
    let result = prepare_job(registry, resolver, &req).and_then(|job| {
        tracing::info!(frames = job.frames.len_frames(), "scene derived");
        backend.render(&job).map(|()| job.output_path)
    });

    match result {
        Ok(output_path) => {
            tracing::info!(output = %output_path.display(), "render complete");
            RenderResponse::ok(output_path)
        }
        Err(e) => {
            tracing::error!(error = %e, "render failed");
            RenderResponse::failed(&e)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/service.rs"]
mod tests;
