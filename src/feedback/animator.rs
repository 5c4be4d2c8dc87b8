use std::collections::BTreeMap;
use std::fmt::Debug;
use std::time::Duration;

use tracing::debug;

use super::easing::Easing;
use crate::observers::{Observers, SubscriptionId};

/// Scale of an item that is not lifted.
pub const REST_SCALE: f32 = 1.0;

/// Default scale of a lifted item.
pub const DEFAULT_LIFTED_SCALE: f32 = 1.2;

/// Default length of a full lift or settle transition.
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(200);

/// Where an item is in its lift/settle cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Not moving; the scale sits at an endpoint.
    Resting,
    /// Growing toward the lifted scale.
    Lifting,
    /// Shrinking back toward the rest scale.
    Settling,
}

/// Tunables shared by every item the animator tracks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeedbackSettings {
    /// Time a full `REST_SCALE -> lifted_scale` transition takes.
    pub duration: Duration,
    /// Scale reached at the end of a lift.
    pub lifted_scale: f32,
    /// Curve applied to transition progress.
    pub easing: Easing,
}

impl Default for FeedbackSettings {
    fn default() -> Self {
        Self {
            duration: DEFAULT_TRANSITION,
            lifted_scale: DEFAULT_LIFTED_SCALE,
            easing: Easing::EaseInOut,
        }
    }
}

/// Notification published as item scales change.
#[derive(Clone, Debug, PartialEq)]
pub enum FeedbackEvent<K> {
    /// `key` entered `phase`.
    PhaseChanged { key: K, phase: Phase },
    /// `key` was advanced to `scale`.
    ScaleChanged { key: K, scale: f32 },
}

/// Per-item animation record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationState {
    phase: Phase,
    current_scale: f32,
    start_scale: f32,
    target_scale: f32,
    elapsed: Duration,
    span: Duration,
}

impl AnimationState {
    fn at_rest() -> Self {
        Self {
            phase: Phase::Resting,
            current_scale: REST_SCALE,
            start_scale: REST_SCALE,
            target_scale: REST_SCALE,
            elapsed: Duration::ZERO,
            span: Duration::ZERO,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Scale to draw this frame.
    pub fn current_scale(&self) -> f32 {
        self.current_scale
    }

    /// Scale the running phase ends at.
    pub fn target_scale(&self) -> f32 {
        self.target_scale
    }

    /// Time spent in the running phase.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    fn is_idle_at_rest(&self) -> bool {
        self.phase == Phase::Resting && self.current_scale == REST_SCALE
    }

    /// Advance by `delta`. Returns true when the phase finished on this step.
    fn advance(&mut self, delta: Duration, easing: Easing) -> bool {
        if self.phase == Phase::Resting {
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(delta);
        if self.elapsed >= self.span {
            self.current_scale = self.target_scale;
            self.phase = Phase::Resting;
            return true;
        }
        let t = self.elapsed.as_secs_f32() / self.span.as_secs_f32();
        self.current_scale =
            self.start_scale + (self.target_scale - self.start_scale) * easing.apply(t);
        false
    }
}

fn scaled(duration: Duration, fraction: f32) -> Duration {
    if fraction >= 1.0 {
        return duration;
    }
    let nanos = duration.as_nanos() as f64 * f64::from(fraction);
    Duration::from_nanos(nanos.round() as u64)
}

/// Tracks the lift/settle scale of every item that has been dragged.
///
/// Items without a record are resting at [`REST_SCALE`]. The host drives time
/// through [`FeedbackAnimator::tick`] / [`FeedbackAnimator::tick_all`].
#[derive(Debug)]
pub struct FeedbackAnimator<K> {
    settings: FeedbackSettings,
    states: BTreeMap<K, AnimationState>,
    observers: Observers<FeedbackEvent<K>>,
}

impl<K: Clone + Ord + Debug> FeedbackAnimator<K> {
    /// Create an animator with the given tunables.
    pub fn new(settings: FeedbackSettings) -> Self {
        let settings = FeedbackSettings {
            lifted_scale: settings.lifted_scale.max(REST_SCALE),
            ..settings
        };
        Self {
            settings,
            states: BTreeMap::new(),
            observers: Observers::new(),
        }
    }

    /// Active tunables.
    pub fn settings(&self) -> FeedbackSettings {
        self.settings
    }

    /// Start growing `key` toward the lifted scale from wherever it is now.
    pub fn lift(&mut self, key: K) {
        let target = self.settings.lifted_scale;
        self.start_phase(key, Phase::Lifting, target);
    }

    /// Start shrinking `key` back to rest from wherever it is now.
    pub fn settle(&mut self, key: K) {
        if !self.states.contains_key(&key) {
            return;
        }
        self.start_phase(key, Phase::Settling, REST_SCALE);
    }

    fn start_phase(&mut self, key: K, phase: Phase, target: f32) {
        let full_span = self.settings.lifted_scale - REST_SCALE;
        let duration = self.settings.duration;
        let state = self
            .states
            .entry(key.clone())
            .or_insert_with(AnimationState::at_rest);
        if state.phase == phase || (state.phase == Phase::Resting && state.current_scale == target)
        {
            return;
        }
        let distance = (target - state.current_scale).abs();
        let fraction = if full_span > 0.0 {
            (distance / full_span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        state.phase = phase;
        state.start_scale = state.current_scale;
        state.target_scale = target;
        state.elapsed = Duration::ZERO;
        state.span = scaled(duration, fraction);
        debug!(
            "feedback {:?}: {:?} from {:.3} to {:.3} over {:?}",
            key, phase, state.start_scale, target, state.span
        );
        self.observers
            .publish(&FeedbackEvent::PhaseChanged { key, phase });
    }

    /// Advance one item by `delta` and return its scale.
    pub fn tick(&mut self, key: &K, delta: Duration) -> f32 {
        let easing = self.settings.easing;
        let Some(state) = self.states.get_mut(key) else {
            return REST_SCALE;
        };
        if state.phase == Phase::Resting {
            return state.current_scale;
        }
        let finished = state.advance(delta, easing);
        let scale = state.current_scale;
        self.observers.publish(&FeedbackEvent::ScaleChanged {
            key: key.clone(),
            scale,
        });
        if finished {
            self.observers.publish(&FeedbackEvent::PhaseChanged {
                key: key.clone(),
                phase: Phase::Resting,
            });
        }
        scale
    }

    /// Advance every running transition by `delta`, then evict records that
    /// have settled back to rest.
    pub fn tick_all(&mut self, delta: Duration) {
        let running: Vec<K> = self
            .states
            .iter()
            .filter(|(_, state)| state.phase != Phase::Resting)
            .map(|(key, _)| key.clone())
            .collect();
        for key in &running {
            self.tick(key, delta);
        }
        self.evict_idle();
    }

    /// Scale to draw for `key` this frame.
    pub fn scale(&self, key: &K) -> f32 {
        self.states
            .get(key)
            .map(AnimationState::current_scale)
            .unwrap_or(REST_SCALE)
    }

    /// Phase of `key`; untracked keys are resting.
    pub fn phase(&self, key: &K) -> Phase {
        self.states
            .get(key)
            .map(AnimationState::phase)
            .unwrap_or(Phase::Resting)
    }

    /// Full record for `key`, if one exists.
    pub fn state(&self, key: &K) -> Option<&AnimationState> {
        self.states.get(key)
    }

    /// True while any item is mid-transition.
    pub fn is_animating(&self) -> bool {
        self.states
            .values()
            .any(|state| state.phase != Phase::Resting)
    }

    /// Number of tracked records.
    pub fn tracked(&self) -> usize {
        self.states.len()
    }

    /// Drop records for keys that fail `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&K) -> bool) {
        self.states.retain(|key, _| keep(key));
    }

    /// Drop records that are resting at [`REST_SCALE`].
    pub fn evict_idle(&mut self) {
        self.states.retain(|_, state| !state.is_idle_at_rest());
    }

    /// Subscribe to scale and phase notifications.
    pub fn subscribe(
        &mut self,
        callback: impl FnMut(&FeedbackEvent<K>) + 'static,
    ) -> SubscriptionId {
        self.observers.subscribe(callback)
    }

    /// Drop a subscription created by [`FeedbackAnimator::subscribe`].
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }
}

impl<K: Clone + Ord + Debug> Default for FeedbackAnimator<K> {
    fn default() -> Self {
        Self::new(FeedbackSettings::default())
    }
}
