use crate::assets::resolve::AssetResolver;
use crate::composition::battle::{BattleTimeline, BattleVariant, SlotMachineProps};
use crate::composition::registry::{CompositionId, CompositionProps, Registry, VideoConfig};
use crate::composition::reveal::ParticleField;
use crate::composition::stitch::{TimedMediaItem, schedule_media};
use crate::effects::transitions::TransitionKind;
use crate::foundation::core::FrameRange;
use crate::foundation::error::ReelkitResult;

/// Background audio of a composition.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AudioTrack {
    /// Resolved source.
    pub src: String,
    /// Playback volume.
    pub volume: f64,
}

/// Per-composition structures derived from props.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SceneKind {
    /// Battle intro, plain or with the rush.
    Battle {
        /// Both reels and the shared timing.
        timeline: BattleTimeline,
    },
    /// Stitched clips.
    Stitch {
        /// Clips with resolved sources placed on the timeline.
        timed: Vec<TimedMediaItem>,
        /// Blend between clips.
        transition: TransitionKind,
        /// Overlap in frames.
        transition_duration: u64,
    },
    /// Sketch-to-color reveal.
    SketchToColor {
        /// Resolved image source.
        src: String,
    },
    /// Particle assembly reveal.
    ParticleAssembly {
        /// Resolved image source.
        src: String,
        /// Cell grid.
        field: ParticleField,
    },
    /// Brush reveal.
    BrushReveal {
        /// Resolved image source.
        src: String,
    },
}

/// Everything a render needs that does not depend on the frame.
///
/// Built once per render and then shared read-only by every frame evaluation, sequential or
/// parallel.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DerivedScene {
    id: CompositionId,
    config: VideoConfig,
    #[serde(skip)]
    props: CompositionProps,
    audio: Option<AudioTrack>,
    kind: SceneKind,
}

impl DerivedScene {
    /// Derive the scene for `props`, resolving media sources through `resolver` first.
    #[tracing::instrument(skip(registry, props, resolver), fields(composition = %props.id()))]
    pub fn derive(
        registry: &Registry,
        props: &CompositionProps,
        resolver: &AssetResolver,
    ) -> ReelkitResult<Self> {
        let config = registry.video_config_for(props)?;
        let props = props.resolve_sources(resolver)?;
        let (audio, kind) = match &props {
            CompositionProps::SlotMachine(p) => battle(p, BattleVariant::Plain),
            CompositionProps::SlotMachineWithEffect(p) => battle(p, BattleVariant::Rush),
            CompositionProps::StitchMedia(p) => {
                let kind = SceneKind::Stitch {
                    timed: schedule_media(&p.media, p.transition_duration),
                    transition: p.transition.clone(),
                    transition_duration: p.transition_duration,
                };
                (None, kind)
            }
            CompositionProps::SketchToColor(p) => {
                (None, SceneKind::SketchToColor { src: p.src.clone() })
            }
            CompositionProps::ParticleAssembly(p) => (
                None,
                SceneKind::ParticleAssembly {
                    src: p.src.clone(),
                    field: ParticleField::derive(p.grid_size),
                },
            ),
            CompositionProps::BrushReveal(p) => {
                (None, SceneKind::BrushReveal { src: p.src.clone() })
            }
        };
        tracing::debug!(duration = config.duration_in_frames, "derived scene");
        Ok(Self {
            id: props.id(),
            config,
            props,
            audio,
            kind,
        })
    }

    /// Composition name.
    pub fn id(&self) -> CompositionId {
        self.id
    }

    /// Output format with the resolved duration.
    pub fn config(&self) -> VideoConfig {
        self.config
    }

    /// Props the scene was derived from, with media sources resolved.
    pub fn props(&self) -> &CompositionProps {
        &self.props
    }

    /// Frame count.
    pub fn duration(&self) -> u64 {
        self.config.duration_in_frames
    }

    /// Every frame of the composition.
    pub fn frames(&self) -> FrameRange {
        FrameRange::whole(self.duration())
    }

    /// Background audio, if any.
    pub fn audio(&self) -> Option<&AudioTrack> {
        self.audio.as_ref()
    }

    /// Per-composition structures.
    pub fn kind(&self) -> &SceneKind {
        &self.kind
    }
}

fn battle(props: &SlotMachineProps, variant: BattleVariant) -> (Option<AudioTrack>, SceneKind) {
    let audio = match props.audio_src.as_deref() {
        Some(src) if !src.is_empty() => Some(AudioTrack {
            src: src.to_owned(),
            volume: props.audio_volume,
        }),
        _ => None,
    };
    let timeline = BattleTimeline::derive(props, variant);
    (audio, SceneKind::Battle { timeline })
}

#[cfg(test)]
#[path = "../../tests/unit/eval/derive.rs"]
mod tests;
