use serde::{Deserialize, Serialize};

/// Curve mapping linear progress to eased progress, both in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// No easing.
    Linear,
    /// Slow start and slow finish (cubic smoothstep).
    #[default]
    EaseInOut,
    /// Fast start decelerating into the target.
    EaseOutCubic,
}

impl Easing {
    /// Eased progress for `t`; input outside `0.0..=1.0` is clamped.
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => t * t * (3.0 - 2.0 * t),
            Easing::EaseOutCubic => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
        }
    }
}
