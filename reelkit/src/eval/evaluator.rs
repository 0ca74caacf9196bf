use rayon::prelude::*;
use smallvec::SmallVec;

use crate::composition::battle::BattleFrame;
use crate::composition::registry::CompositionId;
use crate::composition::reveal::{
    BrushFrame, ParticleFrame, SketchFrame, brush_reveal, sketch_to_color,
};
use crate::composition::stitch::{ActiveMedia, MediaKind, active_media};
use crate::eval::derive::{DerivedScene, SceneKind};
use crate::foundation::core::{FrameIndex, FrameRange};
use crate::foundation::error::{ReelkitError, ReelkitResult};

/// One visible clip of a stitched composition.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ClipFrame {
    /// Resolved source.
    pub src: String,
    /// Media type.
    pub media: MediaKind,
    /// Style transform as a CSS `transform` value.
    pub css_transform: String,
    /// Style transform in canvas pixels, as affine coefficients `[a, b, c, d, e, f]`.
    pub matrix: [f64; 6],
    /// Timing and style.
    #[serde(flatten)]
    pub active: ActiveMedia,
}

/// Composition-specific part of a [`FrameState`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", content = "state", rename_all = "snake_case")]
pub enum CompositionFrame {
    /// Battle intro.
    Battle(BattleFrame),
    /// Visible clips of a stitched composition, bottom first.
    Stitch(SmallVec<[ClipFrame; 2]>),
    /// Sketch-to-color reveal.
    SketchToColor(SketchFrame),
    /// Particle assembly reveal.
    ParticleAssembly(ParticleFrame),
    /// Brush reveal.
    BrushReveal(BrushFrame),
}

/// Full visual state of one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameState {
    /// Composition name.
    pub composition: CompositionId,
    /// Frame index.
    pub frame: FrameIndex,
    /// Composition-specific state.
    #[serde(flatten)]
    pub state: CompositionFrame,
}

/// Threading controls for multi-frame evaluation.
#[derive(Clone, Debug, Default)]
pub struct RenderThreading {
    /// Evaluate frames on a rayon pool when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

/// Frame evaluator over a [`DerivedScene`].
pub struct Evaluator;

impl Evaluator {
    /// Evaluate one frame. Frames outside `[0, duration)` are rejected.
    #[tracing::instrument(skip(scene), fields(composition = %scene.id()))]
    pub fn eval_frame(scene: &DerivedScene, frame: FrameIndex) -> ReelkitResult<FrameState> {
        if !scene.frames().contains(frame) {
            return Err(ReelkitError::evaluation(format!(
                "frame {} is outside [0, {}) of {}",
                frame.0,
                scene.duration(),
                scene.id()
            )));
        }
        Ok(Self::eval_frame_unchecked(scene, frame))
    }

    /// Evaluate every frame in `range`, in order.
    ///
    /// Parallel and sequential evaluation produce identical results.
    #[tracing::instrument(skip(scene, threading), fields(composition = %scene.id()))]
    pub fn eval_range(
        scene: &DerivedScene,
        range: FrameRange,
        threading: &RenderThreading,
    ) -> ReelkitResult<Vec<FrameState>> {
        if range.is_empty() {
            return Err(ReelkitError::validation("eval range must be non-empty"));
        }
        if range.end.0 > scene.duration() {
            return Err(ReelkitError::evaluation(format!(
                "range end {} exceeds duration {} of {}",
                range.end.0,
                scene.duration(),
                scene.id()
            )));
        }

        if !threading.parallel {
            return Ok((range.start.0..range.end.0)
                .map(|f| Self::eval_frame_unchecked(scene, FrameIndex(f)))
                .collect());
        }

        let pool = build_thread_pool(threading.threads)?;
        Ok(pool.install(|| {
            (range.start.0..range.end.0)
                .into_par_iter()
                .map(|f| Self::eval_frame_unchecked(scene, FrameIndex(f)))
                .collect()
        }))
    }

    fn eval_frame_unchecked(scene: &DerivedScene, frame: FrameIndex) -> FrameState {
        let duration = scene.duration();
        let state = match scene.kind() {
            SceneKind::Battle { timeline } => CompositionFrame::Battle(timeline.frame(frame)),
            SceneKind::Stitch {
                timed,
                transition,
                transition_duration,
            } => CompositionFrame::Stitch(
                active_media(timed, *transition_duration, transition, frame)
                    .into_iter()
                    .map(|active| {
                        let item = &timed[active.index].item;
                        let transform = active.style.transform;
                        ClipFrame {
                            src: item.src.clone(),
                            media: item.kind,
                            css_transform: transform.to_string(),
                            matrix: transform.to_affine(scene.config().canvas()).as_coeffs(),
                            active,
                        }
                    })
                    .collect(),
            ),
            SceneKind::SketchToColor { .. } => {
                CompositionFrame::SketchToColor(sketch_to_color(duration, frame))
            }
            SceneKind::ParticleAssembly { field, .. } => {
                CompositionFrame::ParticleAssembly(field.frame(duration, frame))
            }
            SceneKind::BrushReveal { .. } => {
                CompositionFrame::BrushReveal(brush_reveal(duration, frame))
            }
        };
        FrameState {
            composition: scene.id(),
            frame,
            state,
        }
    }
}

fn build_thread_pool(threads: Option<usize>) -> ReelkitResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ReelkitError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ReelkitError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
