//! Scalar helpers shared by the renderers.

/// Smallest depth ever used as a perspective divisor.
pub const DEPTH_EPSILON: f32 = 1.0e-3;

/// Point `factor` of the way from `low` to `high`.
#[inline]
pub fn lerp(low: f32, high: f32, factor: f32) -> f32 {
    (1.0 - factor) * low + factor * high
}

/// How far `value` lies from `first` towards `second`.
#[inline]
pub fn inverse_lerp(first: f32, second: f32, value: f32) -> f32 {
    (value - first) / (second - first)
}

/// Remaps `from` out of `[from_low, from_high]` into `[to_low, to_high]`.
///
/// Not clamped. A degenerate source range yields `to_low`.
#[inline]
pub fn map(from: f32, from_low: f32, from_high: f32, to_low: f32, to_high: f32) -> f32 {
    if from_high == from_low {
        return to_low;
    }
    lerp(to_low, to_high, inverse_lerp(from_low, from_high, from))
}

/// Raises a positive depth to at least `epsilon`. NaN maps to `epsilon`.
#[inline]
pub fn clamp_depth(depth: f32, epsilon: f32) -> f32 {
    if depth >= epsilon { depth } else { epsilon }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_remaps_linearly() {
        assert_eq!(map(5.0, 0.0, 10.0, 0.0, 100.0), 50.0);
        assert_eq!(map(1.0, 0.0, 4.0, 8.0, 0.0), 6.0);
    }

    #[test]
    fn map_degenerate_range() {
        assert_eq!(map(3.0, 2.0, 2.0, 7.0, 9.0), 7.0);
    }

    #[test]
    fn lerp_and_inverse_agree() {
        let t = inverse_lerp(2.0, 6.0, 3.0);
        assert_eq!(t, 0.25);
        assert_eq!(lerp(2.0, 6.0, t), 3.0);
    }

    #[test]
    fn clamp_depth_handles_nan_and_small() {
        assert_eq!(clamp_depth(0.0, 0.01), 0.01);
        assert_eq!(clamp_depth(f32::NAN, 0.01), 0.01);
        assert_eq!(clamp_depth(-2.0, 0.01), 0.01);
        assert_eq!(clamp_depth(4.0, 0.01), 4.0);
    }
}
