use std::fmt;
use std::str::FromStr;

use crate::assets::resolve::AssetResolver;
use crate::composition::battle::SlotMachineProps;
use crate::composition::reveal::{ImageRevealProps, MAX_GRID_SIZE};
use crate::composition::stitch::{StitchMediaProps, calculate_total_duration};
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{ReelkitError, ReelkitResult};

/// Frame count used when a composition does not say otherwise.
pub const DEFAULT_DURATION: u64 = 150;

/// Registered composition names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum CompositionId {
    /// Battle intro with two reels.
    SlotMachine,
    /// Battle intro followed by a zoom-and-fade rush.
    SlotMachineWithEffect,
    /// Clips joined with transitions.
    StitchMedia,
    /// Image fading from a sketch look into full color.
    SketchToColor,
    /// Image assembled from a grid of tiles.
    ParticleAssembly,
    /// Image revealed through a growing elliptical mask.
    BrushReveal,
}

impl CompositionId {
    /// Every registered id.
    pub const ALL: [Self; 6] = [
        Self::SlotMachine,
        Self::SlotMachineWithEffect,
        Self::StitchMedia,
        Self::SketchToColor,
        Self::ParticleAssembly,
        Self::BrushReveal,
    ];

    /// Wire name of this id.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SlotMachine => "SlotMachine",
            Self::SlotMachineWithEffect => "SlotMachineWithEffect",
            Self::StitchMedia => "StitchMedia",
            Self::SketchToColor => "SketchToColor",
            Self::ParticleAssembly => "ParticleAssembly",
            Self::BrushReveal => "BrushReveal",
        }
    }
}

impl fmt::Display for CompositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompositionId {
    type Err = ReelkitError;

    fn from_str(s: &str) -> ReelkitResult<Self> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ReelkitError::validation(format!("unknown composition id '{s}'")))
    }
}

/// Typed props of one composition.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "composition", content = "props")]
pub enum CompositionProps {
    /// Props of [`CompositionId::SlotMachine`].
    SlotMachine(SlotMachineProps),
    /// Props of [`CompositionId::SlotMachineWithEffect`].
    SlotMachineWithEffect(SlotMachineProps),
    /// Props of [`CompositionId::StitchMedia`].
    StitchMedia(StitchMediaProps),
    /// Props of [`CompositionId::SketchToColor`].
    SketchToColor(ImageRevealProps),
    /// Props of [`CompositionId::ParticleAssembly`].
    ParticleAssembly(ImageRevealProps),
    /// Props of [`CompositionId::BrushReveal`].
    BrushReveal(ImageRevealProps),
}

impl CompositionProps {
    /// Convert raw JSON props for `id`. `null` selects every default.
    pub fn from_json(id: CompositionId, value: serde_json::Value) -> ReelkitResult<Self> {
        let value = if value.is_null() {
            serde_json::Value::Object(serde_json::Map::new())
        } else {
            value
        };
        Ok(match id {
            CompositionId::SlotMachine => Self::SlotMachine(parse_props(id, value)?),
            CompositionId::SlotMachineWithEffect => {
                Self::SlotMachineWithEffect(parse_props(id, value)?)
            }
            CompositionId::StitchMedia => Self::StitchMedia(parse_props(id, value)?),
            CompositionId::SketchToColor => Self::SketchToColor(reveal_props(id, value)?),
            CompositionId::ParticleAssembly => Self::ParticleAssembly(reveal_props(id, value)?),
            CompositionId::BrushReveal => Self::BrushReveal(reveal_props(id, value)?),
        })
    }

    /// Default props for `id`.
    pub fn defaults(id: CompositionId) -> Self {
        match id {
            CompositionId::SlotMachine => Self::SlotMachine(SlotMachineProps::default()),
            CompositionId::SlotMachineWithEffect => {
                Self::SlotMachineWithEffect(SlotMachineProps::default())
            }
            CompositionId::StitchMedia => Self::StitchMedia(StitchMediaProps::default()),
            CompositionId::SketchToColor => Self::SketchToColor(ImageRevealProps::default()),
            CompositionId::ParticleAssembly => Self::ParticleAssembly(ImageRevealProps::default()),
            CompositionId::BrushReveal => Self::BrushReveal(ImageRevealProps::default()),
        }
    }

    /// Composition these props belong to.
    pub fn id(&self) -> CompositionId {
        match self {
            Self::SlotMachine(_) => CompositionId::SlotMachine,
            Self::SlotMachineWithEffect(_) => CompositionId::SlotMachineWithEffect,
            Self::StitchMedia(_) => CompositionId::StitchMedia,
            Self::SketchToColor(_) => CompositionId::SketchToColor,
            Self::ParticleAssembly(_) => CompositionId::ParticleAssembly,
            Self::BrushReveal(_) => CompositionId::BrushReveal,
        }
    }

    /// Copy of these props with every media source rewritten through `resolver`.
    ///
    /// Media and image sources under the media root become media URLs. A non-empty
    /// `audioSrc` becomes its location under the static root.
    pub fn resolve_sources(&self, resolver: &AssetResolver) -> ReelkitResult<Self> {
        let mut out = self.clone();
        match &mut out {
            Self::SlotMachine(p) | Self::SlotMachineWithEffect(p) => {
                if let Some(src) = p.audio_src.as_mut()
                    && !src.is_empty()
                {
                    *src = resolver.static_file(src)?;
                }
            }
            Self::StitchMedia(p) => {
                for m in &mut p.media {
                    m.src = resolver.resolve_src(&m.src);
                }
            }
            Self::SketchToColor(p) | Self::ParticleAssembly(p) | Self::BrushReveal(p) => {
                p.src = resolver.resolve_src(&p.src);
            }
        }
        Ok(out)
    }

    /// Props as the JSON object the external renderer expects.
    pub fn to_json(&self) -> ReelkitResult<serde_json::Value> {
        let v = match self {
            Self::SlotMachine(p) | Self::SlotMachineWithEffect(p) => serde_json::to_value(p),
            Self::StitchMedia(p) => serde_json::to_value(p),
            Self::SketchToColor(p) | Self::ParticleAssembly(p) | Self::BrushReveal(p) => {
                serde_json::to_value(p)
            }
        };
        Ok(v?)
    }
}

fn parse_props<T: serde::de::DeserializeOwned>(
    id: CompositionId,
    value: serde_json::Value,
) -> ReelkitResult<T> {
    serde_json::from_value(value)
        .map_err(|e| ReelkitError::validation(format!("invalid props for {id}: {e}")))
}

fn reveal_props(id: CompositionId, value: serde_json::Value) -> ReelkitResult<ImageRevealProps> {
    let props: ImageRevealProps = parse_props(id, value)?;
    if props.grid_size > MAX_GRID_SIZE {
        return Err(ReelkitError::validation(format!(
            "invalid props for {id}: gridSize {} exceeds {MAX_GRID_SIZE}",
            props.grid_size
        )));
    }
    Ok(props)
}

/// Output format of a composition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoConfig {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Frame rate.
    pub fps: Fps,
    /// Frame count.
    pub duration_in_frames: u64,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1920,
            fps: Fps::whole(30),
            duration_in_frames: DEFAULT_DURATION,
        }
    }
}

impl VideoConfig {
    /// Output canvas.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }
}

/// One registered composition.
#[derive(Clone, Debug)]
pub struct RegistryEntry {
    /// Composition name.
    pub id: CompositionId,
    /// Output format. `duration_in_frames` is the fallback length.
    pub config: VideoConfig,
    /// Frame count for a props value of this composition.
    pub duration: fn(&CompositionProps) -> u64,
}

/// Immutable table of every composition the renderer knows.
#[derive(Clone, Debug)]
pub struct Registry {
    entries: Vec<RegistryEntry>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Registry {
    /// The built-in compositions.
    pub fn builtin() -> Self {
        let entry = |id, duration: fn(&CompositionProps) -> u64| RegistryEntry {
            id,
            config: VideoConfig::default(),
            duration,
        };
        Self {
            entries: vec![
                entry(CompositionId::SlotMachine, battle_duration),
                entry(CompositionId::SlotMachineWithEffect, battle_duration),
                entry(CompositionId::StitchMedia, stitch_duration),
                entry(CompositionId::SketchToColor, reveal_duration),
                entry(CompositionId::ParticleAssembly, reveal_duration),
                entry(CompositionId::BrushReveal, reveal_duration),
            ],
        }
    }

    /// All entries in registration order.
    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// Look up `id`.
    pub fn get(&self, id: CompositionId) -> ReelkitResult<&RegistryEntry> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| {
                ReelkitError::validation(format!("composition '{id}' is not registered"))
            })
    }

    /// Frame count of the composition described by `props`.
    pub fn duration_for(&self, props: &CompositionProps) -> ReelkitResult<u64> {
        let entry = self.get(props.id())?;
        Ok((entry.duration)(props))
    }

    /// Output format of `props` with the duration resolved.
    pub fn video_config_for(&self, props: &CompositionProps) -> ReelkitResult<VideoConfig> {
        let entry = self.get(props.id())?;
        Ok(VideoConfig {
            duration_in_frames: self.duration_for(props)?,
            ..entry.config
        })
    }
}

fn battle_duration(props: &CompositionProps) -> u64 {
    match props {
        CompositionProps::SlotMachine(p) => p.timing.intro_frames(),
        CompositionProps::SlotMachineWithEffect(p) => p.timing.rush_frames(),
        _ => DEFAULT_DURATION,
    }
}

fn stitch_duration(props: &CompositionProps) -> u64 {
    match props {
        CompositionProps::StitchMedia(p) => {
            calculate_total_duration(&p.media, p.transition_duration)
        }
        _ => DEFAULT_DURATION,
    }
}

fn reveal_duration(props: &CompositionProps) -> u64 {
    match props {
        CompositionProps::SketchToColor(p)
        | CompositionProps::ParticleAssembly(p)
        | CompositionProps::BrushReveal(p) => p.duration_in_frames,
        _ => DEFAULT_DURATION,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/registry.rs"]
mod tests;
