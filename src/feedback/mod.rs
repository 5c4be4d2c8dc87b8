//! Lift/settle scale animation for dragged items.
//!
//! The animator owns one [`AnimationState`] per item key and never reads a
//! clock itself; the host advances it with frame deltas.

mod animator;
mod easing;

pub use animator::{
    AnimationState, DEFAULT_LIFTED_SCALE, DEFAULT_TRANSITION, FeedbackAnimator, FeedbackEvent,
    FeedbackSettings, Phase, REST_SCALE,
};
pub use easing::Easing;
