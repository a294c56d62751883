/// Easing curves the host applies to camera transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// `2t²` on the first half, mirrored on the second. Used for fly-ins.
    EaseInOut,
    /// `1 - (1 - t)³`. Used for smoothed follow pans.
    EaseOutCubic,
}

impl Easing {
    /// Maps a normalized time `t` to a normalized progress; `t` is clamped to `[0, 1]`.
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_curves_pin_their_endpoints() {
        for easing in [Easing::Linear, Easing::EaseInOut, Easing::EaseOutCubic] {
            assert_abs_diff_eq!(easing.apply(0.0), 0.0);
            assert_abs_diff_eq!(easing.apply(1.0), 1.0);
            assert_abs_diff_eq!(easing.apply(7.0), 1.0);
        }
    }

    #[test]
    fn test_ease_in_out_is_symmetric_around_the_middle() {
        assert_abs_diff_eq!(Easing::EaseInOut.apply(0.5), 0.5);
        assert_abs_diff_eq!(Easing::EaseInOut.apply(0.25), 0.125);
        assert_abs_diff_eq!(Easing::EaseInOut.apply(0.75), 0.875);
    }
}
