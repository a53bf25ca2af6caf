//! Parameter sanitizing and output policies shared by both filters

/// Post-filter clamping applied to each valid output pixel
///
/// The fixed-window filter clamps by default, the parametric filter does
/// not. Both choices are configurable so callers can align the variants.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ClampPolicy {
    /// Output the weighted mean as is
    #[default]
    Unclamped,
    /// Clamp to `[0, k * center]`
    CenterMultiple(f32),
}

impl ClampPolicy {
    /// Apply the policy to a filtered value whose source sample was `center`.
    #[inline]
    pub fn apply(self, value: f32, center: f32) -> f32 {
        match self {
            ClampPolicy::Unclamped => value,
            ClampPolicy::CenterMultiple(k) => value.min(center * k).max(0.0),
        }
    }
}

/// Non-positive or NaN bandwidths fall back to 1.
#[inline]
pub(crate) fn effective_sigma(sigma: f32) -> f32 {
    if sigma > 0.0 { sigma } else { 1.0 }
}

/// Weighted mean, or 0 when nothing contributed.
#[inline]
pub(crate) fn weighted_mean(sum: f32, wsum: f32) -> f32 {
    if wsum > 0.0 { sum / wsum } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_policy() {
        assert_eq!(ClampPolicy::Unclamped.apply(10.0, 1.0), 10.0);
        assert_eq!(ClampPolicy::CenterMultiple(3.0).apply(10.0, 1.0), 3.0);
        assert_eq!(ClampPolicy::CenterMultiple(3.0).apply(-0.5, 1.0), 0.0);
        assert_eq!(ClampPolicy::CenterMultiple(3.0).apply(1.2, 1.0), 1.2);
    }

    #[test]
    fn test_effective_sigma() {
        assert_eq!(effective_sigma(2.5), 2.5);
        assert_eq!(effective_sigma(0.0), 1.0);
        assert_eq!(effective_sigma(-3.0), 1.0);
        assert_eq!(effective_sigma(f32::NAN), 1.0);
    }

    #[test]
    fn test_weighted_mean_degenerate() {
        assert_eq!(weighted_mean(0.0, 0.0), 0.0);
        assert_eq!(weighted_mean(6.0, 3.0), 2.0);
    }
}
