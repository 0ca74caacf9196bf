use std::fmt;

use crate::animation::ease::Ease;
use crate::animation::interpolate::{InterpolateOpts, interpolate};
use crate::foundation::core::{Affine, Canvas};

/// Blend strategy between two sequential clips.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransitionKind {
    /// Incoming clip fades in over the outgoing one.
    #[default]
    Crossfade,
    /// Crossfade with a scale change on both clips.
    Zoom,
    /// Clips move towards the left edge.
    SlideLeft,
    /// Clips move towards the right edge.
    SlideRight,
    /// Hard cut.
    None,
    /// Any other kind name. Rendered as a hard cut.
    Unknown(String),
}

/// Parse a transition kind name. Unrecognized names map to [`TransitionKind::Unknown`].
pub fn parse_transition_kind(kind: &str) -> TransitionKind {
    match kind.trim().to_ascii_lowercase().as_str() {
        "crossfade" => TransitionKind::Crossfade,
        "zoom" => TransitionKind::Zoom,
        "slide-left" | "slide_left" => TransitionKind::SlideLeft,
        "slide-right" | "slide_right" => TransitionKind::SlideRight,
        "none" => TransitionKind::None,
        _ => TransitionKind::Unknown(kind.to_owned()),
    }
}

impl From<String> for TransitionKind {
    fn from(s: String) -> Self {
        parse_transition_kind(&s)
    }
}

impl From<TransitionKind> for String {
    fn from(k: TransitionKind) -> Self {
        match k {
            TransitionKind::Crossfade => "crossfade".to_owned(),
            TransitionKind::Zoom => "zoom".to_owned(),
            TransitionKind::SlideLeft => "slide-left".to_owned(),
            TransitionKind::SlideRight => "slide-right".to_owned(),
            TransitionKind::None => "none".to_owned(),
            TransitionKind::Unknown(s) => s,
        }
    }
}

/// Geometric transform applied to a whole media element.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ElementTransform {
    /// Identity.
    #[default]
    None,
    /// Uniform scale about the element center.
    Scale(f64),
    /// Horizontal shift in percent of the element width.
    TranslateXPercent(f64),
}

impl ElementTransform {
    /// Equivalent affine transform for an element covering `canvas`.
    pub fn to_affine(self, canvas: Canvas) -> Affine {
        match self {
            Self::None => Affine::IDENTITY,
            Self::Scale(s) => {
                let c = canvas.center();
                Affine::translate(c) * Affine::scale(s) * Affine::translate(-c)
            }
            Self::TranslateXPercent(p) => {
                Affine::translate((p / 100.0 * f64::from(canvas.width), 0.0))
            }
        }
    }
}

/// CSS transform syntax.
impl fmt::Display for ElementTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Scale(s) => write!(f, "scale({s})"),
            Self::TranslateXPercent(p) => write!(f, "translateX({p}%)"),
        }
    }
}

/// Opacity and transform of one clip during a transition.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TransitionStyle {
    /// Element opacity.
    pub opacity: f64,
    /// Element transform.
    pub transform: ElementTransform,
}

impl TransitionStyle {
    /// Fully opaque, untransformed.
    pub const IDENTITY: Self = Self {
        opacity: 1.0,
        transform: ElementTransform::None,
    };
}

/// Style of a clip at transition `progress` in `[0, 1]`.
///
/// The outgoing clip stays opaque under crossfade and zoom so the two clips never blend through
/// the background.
pub fn transition_style(
    progress: f64,
    kind: &TransitionKind,
    is_outgoing: bool,
) -> TransitionStyle {
    if progress == 0.0 || *kind == TransitionKind::None {
        return TransitionStyle::IDENTITY;
    }

    let eased = Ease::InOutEase.apply(progress);
    let map = |from: f64, to: f64| {
        interpolate(eased, [0.0, 1.0], [from, to], InterpolateOpts::default())
    };
    let fade = if is_outgoing { 1.0 } else { eased };

    match kind {
        TransitionKind::Crossfade => TransitionStyle {
            opacity: fade,
            transform: ElementTransform::None,
        },
        TransitionKind::Zoom => {
            let scale = if is_outgoing { map(1.0, 1.2) } else { map(0.8, 1.0) };
            TransitionStyle {
                opacity: fade,
                transform: ElementTransform::Scale(scale),
            }
        }
        TransitionKind::SlideLeft => {
            let x = if is_outgoing { map(0.0, -100.0) } else { map(100.0, 0.0) };
            TransitionStyle {
                opacity: 1.0,
                transform: ElementTransform::TranslateXPercent(x),
            }
        }
        TransitionKind::SlideRight => {
            let x = if is_outgoing { map(0.0, 100.0) } else { map(-100.0, 0.0) };
            TransitionStyle {
                opacity: 1.0,
                transform: ElementTransform::TranslateXPercent(x),
            }
        }
        TransitionKind::None | TransitionKind::Unknown(_) => TransitionStyle::IDENTITY,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/transitions.rs"]
mod tests;
