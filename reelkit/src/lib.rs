//! Reelkit is a frame-deterministic engine for short vertical videos.
//!
//! Every composition is a pure function of its props and a frame index. The crate derives a scene
//! once per render, evaluates the visual state of any frame from it, and hands whole renders to a
//! pluggable backend:
//!
//! - Look up a composition in the [`Registry`] and parse its [`CompositionProps`]
//! - Derive a [`DerivedScene`] (reels, clip schedules, particle fields)
//! - Evaluate a [`FrameState`] per frame with the [`Evaluator`]
//! - Render a [`RenderRequest`] through a [`RenderBackend`]
//!
//! Identical props always produce identical frames: randomness comes from [`SeededRandom`] and
//! every timeline is computed from integer frame indices.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod assets;
mod composition;
mod effects;
mod eval;
mod foundation;
mod render;

pub use crate::foundation::core::{Affine, Canvas, Fps, FrameIndex, FrameRange, Vec2};
pub use crate::foundation::error::{ReelkitError, ReelkitResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::interpolate::{Extrapolate, InterpolateOpts, interpolate};
pub use crate::animation::random::{Seed, SeededRandom, shuffle, string_to_seed};

pub use crate::assets::resolve::{AssetResolver, normalize_rel_path};

pub use crate::composition::battle::{
    BOSS_OPTIONS, BOSS_START, BattleFrame, BattleTimeline, BattleVariant, HERO_OPTIONS,
    LIGHT_COUNT, LightColor, LightState, RUSH_LENGTH, RushState, SETTLED_HOLD, SlotMachineProps,
    TimingSpec, TitleState, light_opacity, lights,
};
pub use crate::composition::reel::{
    ITEM_HEIGHT, Reel, ReelFrame, ReelPhase, ReelSequence, ReelSpec, build_reel_sequence,
};
pub use crate::composition::registry::{
    CompositionId, CompositionProps, DEFAULT_DURATION, Registry, RegistryEntry, VideoConfig,
};
pub use crate::composition::reveal::{
    BrushFrame, CellState, ImageRevealProps, MAX_GRID_SIZE, ParticleCell, ParticleField,
    ParticleFrame, SketchFrame, brush_reveal, sketch_to_color,
};
pub use crate::composition::stitch::{
    ActiveMedia, MediaItem, MediaKind, StitchMediaProps, TimedMediaItem, active_media,
    calculate_total_duration, schedule_media,
};

pub use crate::effects::transitions::{
    ElementTransform, TransitionKind, TransitionStyle, parse_transition_kind, transition_style,
};

pub use crate::eval::derive::{AudioTrack, DerivedScene, SceneKind};
pub use crate::eval::evaluator::{
    ClipFrame, CompositionFrame, Evaluator, FrameState, RenderThreading,
};
pub use crate::eval::fingerprint::{PropsFingerprint, fingerprint_props};

pub use crate::render::backend::{RenderBackend, RenderJob, ensure_parent_dir};
pub use crate::render::command::{CommandBackend, CommandBackendOpts};
pub use crate::render::frame_dump::FrameDumpBackend;
pub use crate::render::service::{RenderRequest, RenderResponse, prepare_job, render_request};
