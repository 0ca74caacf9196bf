//! Single-image reveal clips.
//!
//! Every reveal is parameterized by its own length `d` in frames; breakpoints are fractions of
//! `d` so a longer clip plays the same choreography slower.

use crate::animation::ease::Ease;
use crate::animation::interpolate::{InterpolateOpts, interpolate};
use crate::foundation::core::FrameIndex;

/// Largest accepted particle grid side.
pub const MAX_GRID_SIZE: u32 = 64;

/// Props shared by the reveal compositions.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageRevealProps {
    /// Image path or URL.
    pub src: String,
    /// Clip length in frames.
    pub duration_in_frames: u64,
    /// Cells per side, used by particle assembly only. At most [`MAX_GRID_SIZE`].
    pub grid_size: u32,
}

impl Default for ImageRevealProps {
    fn default() -> Self {
        Self {
            src: String::new(),
            duration_in_frames: 150,
            grid_size: 12,
        }
    }
}

/// Filter and zoom state of the sketch-to-color reveal.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SketchFrame {
    /// Grayscale percent.
    pub grayscale: f64,
    /// Contrast percent.
    pub contrast: f64,
    /// Brightness percent.
    pub brightness: f64,
    /// Sepia percent.
    pub sepia: f64,
    /// Image scale.
    pub scale: f64,
    /// Image opacity.
    pub opacity: f64,
    /// The four filter percentages as a CSS `filter` value.
    pub filter: String,
}

/// Sketch-to-color state at `frame` for a clip of `duration` frames.
pub fn sketch_to_color(duration: u64, frame: FrameIndex) -> SketchFrame {
    let d = duration as f64;
    let f = frame.as_f64();
    let hold = InterpolateOpts::clamp_right();
    let grayscale = interpolate(
        f,
        [0.0, d * 0.7],
        [100.0, 0.0],
        hold.with_ease(Ease::OutQuad),
    );
    let contrast = interpolate(f, [0.0, d * 0.5], [150.0, 100.0], hold);
    let brightness = interpolate(f, [0.0, d * 0.6], [90.0, 100.0], hold);
    let sepia = interpolate(f, [0.0, d * 0.5], [30.0, 0.0], hold);
    SketchFrame {
        grayscale,
        contrast,
        brightness,
        sepia,
        filter: format!(
            "grayscale({grayscale}%) contrast({contrast}%) brightness({brightness}%) sepia({sepia}%)"
        ),
        scale: interpolate(
            f,
            [0.0, d * 0.5, d],
            [1.05, 1.08, 1.0],
            InterpolateOpts::default().with_ease(Ease::InOutEase),
        ),
        opacity: interpolate(f, [0.0, 15.0], [0.0, 1.0], hold),
    }
}

/// One grid cell of the particle assembly.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ParticleCell {
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
    /// Appearance order in `[0, 1)`, lower appears first.
    pub appear_order: f64,
}

/// Visual state of one cell.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CellState {
    /// Cell opacity.
    pub opacity: f64,
    /// Cell scale.
    pub scale: f64,
}

/// Particle assembly state at one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ParticleFrame {
    /// Global assembly progress.
    pub progress: f64,
    /// Per-cell state in row-major order.
    pub cells: Vec<CellState>,
    /// Opacity of the untiled image drawn on top at the end.
    pub final_image_opacity: f64,
}

/// The cell grid, derived once per render.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ParticleField {
    grid_size: u32,
    cells: Vec<ParticleCell>,
}

impl ParticleField {
    /// Build a `grid_size` x `grid_size` grid, with the side capped at [`MAX_GRID_SIZE`].
    pub fn derive(grid_size: u32) -> Self {
        let grid_size = grid_size.min(MAX_GRID_SIZE);
        let cells = (0..grid_size)
            .flat_map(|y| (0..grid_size).map(move |x| (x, y)))
            .map(|(x, y)| {
                let index = f64::from(y) * f64::from(grid_size) + f64::from(x);
                ParticleCell {
                    x,
                    y,
                    appear_order: seeded_fraction(index * 137.0 + 42.0),
                }
            })
            .collect();
        Self { grid_size, cells }
    }

    /// Cells per side.
    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> &[ParticleCell] {
        &self.cells
    }

    /// State at `frame` for a clip of `duration` frames.
    pub fn frame(&self, duration: u64, frame: FrameIndex) -> ParticleFrame {
        let d = duration as f64;
        let f = frame.as_f64();
        let progress = interpolate(
            f,
            [0.0, d * 0.8],
            [0.0, 1.0],
            InterpolateOpts::clamp_right().with_ease(Ease::OutQuad),
        );
        let cells = self
            .cells
            .iter()
            .map(|c| {
                let lo = c.appear_order * 0.5;
                let p = interpolate(
                    progress,
                    [lo, lo + 0.5],
                    [0.0, 1.0],
                    InterpolateOpts::clamped(),
                );
                CellState {
                    opacity: p,
                    scale: interpolate(p, [0.0, 1.0], [0.8, 1.0], InterpolateOpts::default()),
                }
            })
            .collect();
        ParticleFrame {
            progress,
            cells,
            final_image_opacity: interpolate(
                f,
                [d * 0.75, d * 0.95],
                [0.0, 1.0],
                InterpolateOpts::clamped(),
            ),
        }
    }
}

/// Fractional part of `sin(seed) * 10000`.
fn seeded_fraction(seed: f64) -> f64 {
    let x = seed.sin() * 10000.0;
    x - x.floor()
}

/// Brush reveal state at one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct BrushFrame {
    /// Mask ellipse size in percent of the canvas.
    pub circle_size: f64,
    /// Opacity of the blurred background copy.
    pub background_opacity: f64,
    /// Mask removed, image fully visible.
    pub show_full_image: bool,
    /// Glowing ring drawn at the mask edge.
    pub edge_glow: bool,
}

/// Brush reveal state at `frame` for a clip of `duration` frames.
pub fn brush_reveal(duration: u64, frame: FrameIndex) -> BrushFrame {
    let d = duration as f64;
    let f = frame.as_f64();
    let circle_size = interpolate(
        f,
        [0.0, d * 0.85],
        [0.0, 150.0],
        InterpolateOpts::clamp_right().with_ease(Ease::OutQuad),
    );
    BrushFrame {
        circle_size,
        background_opacity: interpolate(
            f,
            [0.0, d * 0.3],
            [0.0, 0.3],
            InterpolateOpts::clamp_right(),
        ),
        show_full_image: f > d * 0.9,
        edge_glow: circle_size > 10.0 && circle_size < 140.0,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/reveal.rs"]
mod tests;
