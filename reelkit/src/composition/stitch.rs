use smallvec::SmallVec;

use crate::animation::interpolate::{InterpolateOpts, interpolate};
use crate::effects::transitions::{TransitionKind, TransitionStyle, transition_style};
use crate::foundation::core::FrameIndex;

/// Media type of a stitched clip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Video file, played from its first frame.
    Video,
    /// Still image.
    Image,
}

/// One clip in a stitched sequence.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    /// Media type.
    #[serde(rename = "type")]
    pub kind: MediaKind,
    /// Source path or URL.
    pub src: String,
    /// On-screen length in frames, including transition overlap.
    pub duration_in_frames: u64,
}

/// A [`MediaItem`] placed on the timeline at `[start_frame, end_frame)`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedMediaItem {
    /// The clip.
    #[serde(flatten)]
    pub item: MediaItem,
    /// First frame on the global timeline.
    pub start_frame: u64,
    /// One past the last frame on the global timeline.
    pub end_frame: u64,
}

/// Props of the `StitchMedia` composition.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StitchMediaProps {
    /// Clips in playback order.
    pub media: Vec<MediaItem>,
    /// Blend between consecutive clips.
    pub transition: TransitionKind,
    /// Overlap between consecutive clips in frames.
    pub transition_duration: u64,
}

impl Default for StitchMediaProps {
    fn default() -> Self {
        Self {
            media: Vec::new(),
            transition: TransitionKind::Crossfade,
            transition_duration: 15,
        }
    }
}

/// Place `items` back to back, each overlapping the next by `transition` frames.
pub fn schedule_media(items: &[MediaItem], transition: u64) -> Vec<TimedMediaItem> {
    let mut cursor = 0u64;
    let last = items.len().saturating_sub(1);
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let start = cursor;
            let end = start.saturating_add(item.duration_in_frames);
            let overlap = if i < last { transition } else { 0 };
            cursor = cursor.saturating_add(item.duration_in_frames.saturating_sub(overlap));
            TimedMediaItem {
                item: item.clone(),
                start_frame: start,
                end_frame: end,
            }
        })
        .collect()
}

/// Total frame count of a stitched sequence: durations minus overlaps, never negative.
pub fn calculate_total_duration(items: &[MediaItem], transition: u64) -> u64 {
    if items.is_empty() {
        return 0;
    }
    let total = items
        .iter()
        .fold(0u64, |acc, m| acc.saturating_add(m.duration_in_frames));
    let overlaps = (items.len() as u64 - 1).saturating_mul(transition);
    total.saturating_sub(overlaps)
}

/// A clip visible at the queried frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ActiveMedia {
    /// Position in the schedule.
    pub index: usize,
    /// Frame relative to the clip start.
    pub local_frame: u64,
    /// Transition progress in `[0, 1]`, zero outside transitions.
    pub progress: f64,
    /// True while this clip is the one leaving.
    pub is_outgoing: bool,
    /// Resulting opacity and transform.
    pub style: TransitionStyle,
}

/// Clips visible at `frame`, in schedule order. Normally at most two.
pub fn active_media(
    timed: &[TimedMediaItem],
    transition: u64,
    kind: &TransitionKind,
    frame: FrameIndex,
) -> SmallVec<[ActiveMedia; 2]> {
    let last = timed.len().saturating_sub(1);
    let t = transition as f64;
    timed
        .iter()
        .enumerate()
        .filter(|(_, m)| frame.0 >= m.start_frame && frame.0 < m.end_frame)
        .map(|(index, m)| {
            let local = frame.0 - m.start_frame;
            let dur = m.item.duration_in_frames;
            let out_start = dur.saturating_sub(transition);

            let (progress, is_outgoing) = if index > 0 && local < transition {
                let p = interpolate(
                    local as f64,
                    [0.0, t],
                    [0.0, 1.0],
                    InterpolateOpts::clamped(),
                );
                (p, false)
            } else if index < last && local >= out_start {
                let p = interpolate(
                    local as f64,
                    [out_start as f64, dur as f64],
                    [0.0, 1.0],
                    InterpolateOpts::clamped(),
                );
                (p, true)
            } else {
                (0.0, false)
            };

            ActiveMedia {
                index,
                local_frame: local,
                progress,
                is_outgoing,
                style: transition_style(progress, kind, is_outgoing),
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/composition/stitch.rs"]
mod tests;
