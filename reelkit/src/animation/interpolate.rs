use crate::animation::ease::Ease;

/// Behaviour of [`interpolate`] outside the outer breakpoints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Extrapolate {
    /// Continue the outer segment linearly.
    #[default]
    Extend,
    /// Hold the outer output value.
    Clamp,
}

/// Options for [`interpolate`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InterpolateOpts {
    /// Policy below the first breakpoint.
    pub extrapolate_left: Extrapolate,
    /// Policy above the last breakpoint.
    pub extrapolate_right: Extrapolate,
    /// Curve applied to normalized progress inside a segment.
    pub ease: Ease,
}

impl InterpolateOpts {
    /// Clamp on both sides, linear easing.
    pub const fn clamped() -> Self {
        Self {
            extrapolate_left: Extrapolate::Clamp,
            extrapolate_right: Extrapolate::Clamp,
            ease: Ease::Linear,
        }
    }

    /// Extend on the left, clamp on the right, linear easing.
    pub const fn clamp_right() -> Self {
        Self {
            extrapolate_left: Extrapolate::Extend,
            extrapolate_right: Extrapolate::Clamp,
            ease: Ease::Linear,
        }
    }

    /// Replace the easing curve.
    pub const fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }
}

/// Map `input` through a piecewise curve defined by `input_range -> output_range`.
///
/// `input_range` is expected to be strictly increasing. The containing segment is located first,
/// then normalized progress inside it is eased and mapped onto the segment's outputs. An input
/// exactly on a breakpoint returns that breakpoint's output unchanged.
///
/// This function is total: degenerate ranges fall back to a well-defined value instead of
/// failing (see the unit tests for the exact fallbacks).
pub fn interpolate<const N: usize>(
    input: f64,
    input_range: [f64; N],
    output_range: [f64; N],
    opts: InterpolateOpts,
) -> f64 {
    interpolate_slices(input, &input_range, &output_range, opts)
}

pub(crate) fn interpolate_slices(
    input: f64,
    inputs: &[f64],
    outputs: &[f64],
    opts: InterpolateOpts,
) -> f64 {
    let n = inputs.len().min(outputs.len());
    match n {
        0 => return 0.0,
        1 => return outputs[0],
        _ => {}
    }
    if input.is_nan() {
        return outputs[0];
    }
    if input == f64::NEG_INFINITY {
        return outputs[0];
    }
    if input == f64::INFINITY {
        return outputs[n - 1];
    }

    if let Some(i) = inputs[..n].iter().position(|&x| x == input) {
        return outputs[i];
    }

    let seg = (1..n - 1)
        .find(|&i| inputs[i] >= input)
        .map_or(n - 2, |i| i - 1);
    let (x0, x1) = (inputs[seg], inputs[seg + 1]);
    let (y0, y1) = (outputs[seg], outputs[seg + 1]);

    let width = x1 - x0;
    if width.is_nan() || width <= 0.0 {
        return y0;
    }

    if input < x0 {
        return match opts.extrapolate_left {
            Extrapolate::Clamp => y0,
            Extrapolate::Extend => lerp(y0, y1, (input - x0) / width),
        };
    }
    if input > x1 {
        return match opts.extrapolate_right {
            Extrapolate::Clamp => y1,
            Extrapolate::Extend => lerp(y0, y1, (input - x0) / width),
        };
    }

    let t = (input - x0) / width;
    lerp(y0, y1, opts.ease.apply(t))
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    if t == 1.0 { b } else { a + (b - a) * t }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interpolate.rs"]
mod tests;
