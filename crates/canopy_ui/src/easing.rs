//! Easing curves for temporal actions.
//!
//! Maps linear progress in `[0, 1]` to eased progress.

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Linear interpolation.
    #[default]
    Linear,
    /// Smoothstep: slow start and end.
    Smooth,
    /// Exponential ease-out (snaps towards the target).
    ExponentialOut,
    /// Exponential ease-in (accelerating).
    ExponentialIn,
    /// Exponential ease-in-out.
    ExponentialInOut,
    /// Jumps straight to the end value.
    Instant,
}

impl Easing {
    /// Applies the easing function to a t value (0-1).
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::Smooth => t * t * (3.0 - 2.0 * t),
            Self::ExponentialOut => {
                // 1 - 2^(-10t)
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f32.powf(-10.0 * t)
                }
            }
            Self::ExponentialIn => {
                // 2^(10(t-1))
                if t <= 0.0 {
                    0.0
                } else {
                    2.0_f32.powf(10.0 * (t - 1.0))
                }
            }
            Self::ExponentialInOut => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else if t < 0.5 {
                    2.0_f32.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2.0_f32.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
            Self::Instant => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 6] = [
        Easing::Linear,
        Easing::Smooth,
        Easing::ExponentialOut,
        Easing::ExponentialIn,
        Easing::ExponentialInOut,
        Easing::Instant,
    ];

    #[test]
    fn test_exponential_out_is_sharp() {
        let value = Easing::ExponentialOut.apply(0.3);
        assert!(value > 0.8, "Exponential out should snap quickly: {value}");
    }

    #[test]
    fn test_endpoints() {
        for easing in ALL {
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{easing:?} ends at 1");
            if easing != Easing::Instant {
                assert!(easing.apply(0.0).abs() < 1e-3, "{easing:?} starts at 0");
            }
        }
    }

    #[test]
    fn test_input_is_clamped() {
        assert_eq!(Easing::Linear.apply(2.0), 1.0);
        assert_eq!(Easing::Smooth.apply(-1.0), 0.0);
        assert!((Easing::Smooth.apply(0.5) - 0.5).abs() < 1e-6);
    }
}
