use crate::animation::ease::Ease;
use crate::animation::interpolate::{InterpolateOpts, interpolate};
use crate::animation::random::{Seed, shuffle, string_to_seed};
use crate::foundation::core::{FrameIndex, FrameRange};

/// Height of one reel cell in pixels.
pub const ITEM_HEIGHT: f64 = 50.0;

/// Inputs for one slot-machine reel.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReelSpec {
    /// Candidate labels shown while the reel spins.
    pub pool: Vec<String>,
    /// Label the reel settles on.
    pub final_value: String,
    /// First frame of the spin.
    pub start_frame: u64,
    /// Spin length in frames.
    pub duration_frames: u64,
    /// Reel tag mixed into the seed (for example `"boss"` or `"hero"`).
    pub tag: String,
    /// Externally supplied seed. `None` selects the string-derived fallback.
    pub seed: Option<Seed>,
}

/// Labels a reel scrolls through, ending on the final value.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ReelSequence {
    items: Vec<String>,
}

impl ReelSequence {
    /// All labels in scroll order.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the sequence holds no labels. Never the case for a built sequence.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the terminal label.
    pub fn final_index(&self) -> usize {
        self.items.len().saturating_sub(1)
    }

    /// Terminal label.
    pub fn final_value(&self) -> &str {
        self.items.last().map_or("", String::as_str)
    }
}

/// Build the scroll sequence for a reel.
///
/// With a seed the pool is shuffled three times at `s`, `s + 1` and `s + 2`, where
/// `s = seed + string_to_seed(tag)`. Without one a single shuffle at
/// `string_to_seed(final_value + tag)` is repeated three times. Either way the result holds
/// `3 * pool.len() + 1` labels and ends on `final_value`.
pub fn build_reel_sequence(
    pool: &[String],
    final_value: &str,
    tag: &str,
    seed: Option<Seed>,
) -> ReelSequence {
    let mut items = Vec::with_capacity(pool.len() * 3 + 1);
    match seed {
        Some(seed) => {
            let s = seed.wrapping_add(string_to_seed(tag));
            for variant in 0..3 {
                items.extend(shuffle(pool, s.wrapping_add(variant)));
            }
        }
        None => {
            let once = shuffle(pool, string_to_seed(&format!("{final_value}{tag}")));
            for _ in 0..3 {
                items.extend_from_slice(&once);
            }
        }
    }
    items.push(final_value.to_owned());
    ReelSequence { items }
}

/// Where a reel is in its lifecycle at a given frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReelPhase {
    /// Before the spin starts.
    Idle,
    /// Scrolling.
    Spinning,
    /// Resting on the final value.
    Settled,
}

/// Visual state of one reel at one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ReelFrame {
    /// Lifecycle phase.
    pub phase: ReelPhase,
    /// Eased spin progress in `[0, 1]`.
    pub progress: f64,
    /// Vertical translation of the label column in pixels.
    pub offset_y: f64,
    /// Index of the highlighted label, only set once settled.
    pub highlighted: Option<usize>,
}

/// A reel with its sequence derived once.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Reel {
    spin: FrameRange,
    sequence: ReelSequence,
}

impl Reel {
    /// Derive the reel sequence from `spec`.
    pub fn derive(spec: &ReelSpec) -> Self {
        let start = spec.start_frame;
        Self {
            spin: FrameRange {
                start: FrameIndex(start),
                end: FrameIndex(start.saturating_add(spec.duration_frames)),
            },
            sequence: build_reel_sequence(&spec.pool, &spec.final_value, &spec.tag, spec.seed),
        }
    }

    /// Frames during which the reel spins.
    pub fn spin_range(&self) -> FrameRange {
        self.spin
    }

    /// The derived scroll sequence.
    pub fn sequence(&self) -> &ReelSequence {
        &self.sequence
    }

    /// Phase at `frame`. Flips to `Settled` exactly once, at the end of the spin.
    pub fn phase(&self, frame: FrameIndex) -> ReelPhase {
        if frame >= self.spin.end {
            ReelPhase::Settled
        } else if frame >= self.spin.start {
            ReelPhase::Spinning
        } else {
            ReelPhase::Idle
        }
    }

    /// Visual state at `frame`.
    pub fn frame(&self, frame: FrameIndex) -> ReelFrame {
        let phase = self.phase(frame);
        let progress = if self.spin.is_empty() {
            if phase == ReelPhase::Settled { 1.0 } else { 0.0 }
        } else {
            interpolate(
                frame.as_f64(),
                [self.spin.start.as_f64(), self.spin.end.as_f64()],
                [0.0, 1.0],
                InterpolateOpts::clamped().with_ease(Ease::out_quint()),
            )
        };
        let distance = self.sequence.final_index() as f64 * ITEM_HEIGHT;
        ReelFrame {
            phase,
            progress,
            offset_y: -progress * distance + ITEM_HEIGHT / 2.0,
            highlighted: (phase == ReelPhase::Settled).then(|| self.sequence.final_index()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/reel.rs"]
mod tests;
