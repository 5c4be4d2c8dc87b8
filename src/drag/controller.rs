use std::fmt::Debug;
use std::time::Duration;

use tracing::{debug, info};

use super::events::{DragEvent, DropOutcome, PointerEvent};
use super::state::{DragSession, DragState, GestureSettings, PendingPress, Point, accepts};
use crate::feedback::FeedbackAnimator;
use crate::observers::Observers;
use crate::sequence::{SequenceError, SequenceStore};

/// Borrowed view that drives the drag state machine against the store and
/// the feedback animator it belongs to.
///
/// Transitions that make no sense in the current state (a drop while idle, a
/// second drag start mid-drag) are absorbed: input races at the gesture
/// boundary are expected. Bad indices are reported.
pub struct DragController<'a, T, K> {
    state: &'a mut DragState<K>,
    gesture: GestureSettings,
    store: &'a mut SequenceStore<T>,
    feedback: &'a mut FeedbackAnimator<K>,
    events: &'a mut Observers<DragEvent>,
    key_of: &'a dyn Fn(&T) -> K,
}

impl<'a, T, K: Clone + Ord + Debug> DragController<'a, T, K> {
    pub fn new(
        state: &'a mut DragState<K>,
        gesture: GestureSettings,
        store: &'a mut SequenceStore<T>,
        feedback: &'a mut FeedbackAnimator<K>,
        events: &'a mut Observers<DragEvent>,
        key_of: &'a dyn Fn(&T) -> K,
    ) -> Self {
        Self {
            state,
            gesture,
            store,
            feedback,
            events,
            key_of,
        }
    }

    /// Route one input event.
    pub fn handle(&mut self, event: PointerEvent) -> Result<Option<DropOutcome>, SequenceError> {
        match event {
            PointerEvent::PressStart(index) => self.press_start(index).map(|_| None),
            PointerEvent::DragMove(pointer) => {
                self.drag_move(pointer);
                Ok(None)
            }
            PointerEvent::DragOver(candidate) => {
                self.drag_over(candidate);
                Ok(None)
            }
            PointerEvent::Drop(Some(target)) => self.drop_at(target),
            PointerEvent::Drop(None) | PointerEvent::Cancel => {
                self.cancel();
                Ok(None)
            }
        }
    }

    /// Pointer went down on `index`. Lifts at once when no hold is configured.
    pub fn press_start(&mut self, index: usize) -> Result<(), SequenceError> {
        if matches!(self.state, DragState::Dragging(_)) {
            debug!("press_start({index}) ignored: drag already active");
            return Ok(());
        }
        self.check_index(index)?;
        if self.gesture.hold_delay.is_zero() {
            return self.begin_drag(index);
        }
        *self.state = DragState::Pressed(PendingPress::new(index));
        Ok(())
    }

    /// `Idle | Pressed -> Dragging(index)`.
    pub fn begin_drag(&mut self, index: usize) -> Result<(), SequenceError> {
        if let DragState::Dragging(session) = &*self.state {
            debug!(
                "begin_drag({index}) ignored: already dragging {}",
                session.source_index()
            );
            return Ok(());
        }
        self.check_index(index)?;
        let Some(item) = self.store.get(index) else {
            return Ok(());
        };
        let key = (self.key_of)(item);
        let pointer = match &*self.state {
            DragState::Pressed(press) => press.origin,
            _ => None,
        };
        info!("Drag started: index={index} key={key:?}");
        self.feedback.lift(key.clone());
        *self.state = DragState::Dragging(DragSession::new(index, key, pointer));
        self.events.publish(&DragEvent::Started { index });
        Ok(())
    }

    /// Track the pointer. A pending press that wanders past the slop is abandoned.
    pub fn drag_move(&mut self, pointer: Point) {
        match &mut *self.state {
            DragState::Dragging(session) => session.set_pointer(pointer),
            DragState::Pressed(press) => {
                let Some(origin) = press.origin else {
                    press.origin = Some(pointer);
                    return;
                };
                if origin.distance(pointer) > self.gesture.slop {
                    let index = press.index;
                    debug!("press on {index} abandoned: moved past slop");
                    *self.state = DragState::Idle;
                    self.events.publish(&DragEvent::PressAbandoned { index });
                }
            }
            DragState::Idle => {}
        }
    }

    /// Record the hover candidate and publish whether it would be accepted.
    pub fn drag_over(&mut self, candidate: Option<usize>) {
        let items = self.store.current();
        let len = items.len();
        let DragState::Dragging(session) = &mut *self.state else {
            debug!("drag_over({candidate:?}) ignored: no active drag");
            return;
        };
        let candidate = candidate.filter(|target| *target < len);
        if session.hover() == candidate {
            return;
        }
        session.set_hover(candidate);
        if let Some(target) = candidate {
            let source = session.current_source(items, self.key_of);
            self.events.publish(&DragEvent::Hovered {
                source,
                target,
                accepted: accepts(source, target),
            });
        }
    }

    /// `Dragging(source) -> Idle`, reordering when `target` is accepted.
    ///
    /// The item settles whether or not the drop moved it. A target outside the
    /// sequence ends the drag without a mutation and reports the error.
    pub fn drop_at(&mut self, target: usize) -> Result<Option<DropOutcome>, SequenceError> {
        let session = match std::mem::take(&mut *self.state) {
            DragState::Dragging(session) => session,
            DragState::Pressed(press) => {
                debug!("release on {} before drag qualified", press.index);
                self.events
                    .publish(&DragEvent::PressAbandoned { index: press.index });
                return Ok(None);
            }
            DragState::Idle => {
                debug!("drop({target}) ignored: no active drag");
                return Ok(None);
            }
        };
        let source = self.resolve_source(&session);
        let key = session.into_key();
        self.feedback.settle(key.clone());

        let moved = accepts(source, target);
        if moved && let Err(err) = self.store.move_item(source, target) {
            debug!("drop of {key:?} onto {target} rejected: {err}");
            self.events.publish(&DragEvent::Cancelled { source });
            return Err(err);
        }
        if moved {
            info!("Reordered {key:?}: {source} -> {target}");
        } else {
            debug!("drop of {key:?} onto its own slot");
        }
        let outcome = DropOutcome {
            source,
            target,
            moved,
        };
        self.events.publish(&DragEvent::Dropped {
            source,
            target,
            moved,
        });
        Ok(Some(outcome))
    }

    /// `Dragging(source) -> Idle` without touching the order.
    pub fn cancel(&mut self) {
        match std::mem::take(&mut *self.state) {
            DragState::Dragging(session) => {
                let source = self.resolve_source(&session);
                let key = session.into_key();
                info!("Drag cancelled: {key:?}");
                self.feedback.settle(key);
                self.events.publish(&DragEvent::Cancelled { source });
            }
            DragState::Pressed(press) => {
                self.events
                    .publish(&DragEvent::PressAbandoned { index: press.index });
            }
            DragState::Idle => debug!("cancel ignored: no active drag"),
        }
    }

    /// Advance a pending press; it lifts once held for the configured delay.
    pub fn tick(&mut self, delta: Duration) -> Result<(), SequenceError> {
        let DragState::Pressed(press) = &mut *self.state else {
            return Ok(());
        };
        press.held = press.held.saturating_add(delta);
        if press.held >= self.gesture.hold_delay {
            let index = press.index;
            return self.begin_drag(index);
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), SequenceError> {
        let len = self.store.len();
        if index < len {
            Ok(())
        } else {
            Err(SequenceError::IndexOutOfRange { index, len })
        }
    }

    fn resolve_source(&self, session: &DragSession<K>) -> usize {
        session.current_source(self.store.current(), self.key_of)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::{FeedbackSettings, Phase};
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Harness {
        state: DragState<char>,
        gesture: GestureSettings,
        store: SequenceStore<char>,
        feedback: FeedbackAnimator<char>,
        events: Observers<DragEvent>,
        seen: Rc<RefCell<Vec<DragEvent>>>,
    }

    fn identity(item: &char) -> char {
        *item
    }

    impl Harness {
        fn new(gesture: GestureSettings) -> Self {
            let seen = Rc::new(RefCell::new(Vec::new()));
            let sink = Rc::clone(&seen);
            let mut events = Observers::new();
            events.subscribe(move |event: &DragEvent| sink.borrow_mut().push(*event));
            Self {
                state: DragState::Idle,
                gesture,
                store: SequenceStore::new(vec!['A', 'B', 'C', 'D', 'E']),
                feedback: FeedbackAnimator::new(FeedbackSettings::default()),
                events,
                seen,
            }
        }

        fn controller(&mut self) -> DragController<'_, char, char> {
            DragController::new(
                &mut self.state,
                self.gesture,
                &mut self.store,
                &mut self.feedback,
                &mut self.events,
                &identity,
            )
        }

        fn order(&self) -> String {
            self.store.current().iter().collect()
        }
    }

    fn held(ms: u64) -> GestureSettings {
        GestureSettings {
            hold_delay: Duration::from_millis(ms),
            ..GestureSettings::default()
        }
    }

    #[test]
    fn begin_then_drop_reorders_and_settles() {
        let mut h = Harness::new(GestureSettings::default());
        h.controller().begin_drag(0).unwrap();
        assert_eq!(h.feedback.phase(&'A'), Phase::Lifting);

        let outcome = h.controller().drop_at(2).unwrap();

        assert_eq!(
            outcome,
            Some(DropOutcome {
                source: 0,
                target: 2,
                moved: true
            })
        );
        assert_eq!(h.order(), "BCADE");
        assert!(h.state.is_idle());
        assert_eq!(h.feedback.phase(&'A'), Phase::Settling);
    }

    #[test]
    fn drop_on_source_slot_does_not_mutate() {
        let mut h = Harness::new(GestureSettings::default());
        h.controller().begin_drag(2).unwrap();
        let outcome = h.controller().drop_at(2).unwrap();

        assert_eq!(outcome.map(|o| o.moved), Some(false));
        assert_eq!(h.order(), "ABCDE");
        assert_eq!(h.feedback.phase(&'C'), Phase::Settling);
    }

    #[test]
    fn second_begin_keeps_original_source() {
        let mut h = Harness::new(GestureSettings::default());
        h.controller().begin_drag(1).unwrap();
        h.controller().begin_drag(3).unwrap();
        h.controller().press_start(4).unwrap();

        assert_eq!(h.state.session().map(|s| s.source_index()), Some(1));
        assert_eq!(h.feedback.phase(&'D'), Phase::Resting);
        assert_eq!(*h.seen.borrow(), vec![DragEvent::Started { index: 1 }]);
    }

    #[test]
    fn drop_and_cancel_while_idle_are_noops() {
        let mut h = Harness::new(GestureSettings::default());
        assert_eq!(h.controller().drop_at(1), Ok(None));
        h.controller().cancel();
        h.controller().drag_over(Some(2));

        assert_eq!(h.order(), "ABCDE");
        assert!(h.seen.borrow().is_empty());
    }

    #[test]
    fn cancel_settles_without_mutation() {
        let mut h = Harness::new(GestureSettings::default());
        h.controller().handle(PointerEvent::PressStart(3)).unwrap();
        h.controller().handle(PointerEvent::Drop(None)).unwrap();

        assert_eq!(h.order(), "ABCDE");
        assert_eq!(h.feedback.phase(&'D'), Phase::Settling);
        assert_eq!(
            h.seen.borrow().last(),
            Some(&DragEvent::Cancelled { source: 3 })
        );
    }

    #[test]
    fn hover_reports_acceptance_once_per_candidate() {
        let mut h = Harness::new(GestureSettings::default());
        h.controller().begin_drag(1).unwrap();
        h.controller().drag_over(Some(1));
        h.controller().drag_over(Some(1));
        h.controller().drag_over(Some(3));
        h.controller().drag_over(Some(42));

        assert_eq!(
            h.seen.borrow()[1..],
            [
                DragEvent::Hovered {
                    source: 1,
                    target: 1,
                    accepted: false
                },
                DragEvent::Hovered {
                    source: 1,
                    target: 3,
                    accepted: true
                },
            ]
        );
        assert_eq!(h.state.session().and_then(|s| s.hover()), None);
        assert_eq!(h.order(), "ABCDE");
    }

    #[test]
    fn out_of_range_drop_ends_drag_and_reports() {
        let mut h = Harness::new(GestureSettings::default());
        h.controller().begin_drag(0).unwrap();

        let err = h.controller().drop_at(9).unwrap_err();

        assert_eq!(err, SequenceError::IndexOutOfRange { index: 9, len: 5 });
        assert_eq!(h.order(), "ABCDE");
        assert!(h.state.is_idle());
        assert_eq!(h.feedback.phase(&'A'), Phase::Settling);
    }

    #[test]
    fn out_of_range_press_is_rejected() {
        let mut h = Harness::new(GestureSettings::default());
        assert!(h.controller().press_start(5).is_err());
        assert!(h.state.is_idle());
    }

    #[test]
    fn drag_move_tracks_pointer() {
        let mut h = Harness::new(GestureSettings::default());
        h.controller().begin_drag(0).unwrap();
        h.controller().drag_move(Point::new(10.0, 20.0));
        assert_eq!(
            h.state.session().and_then(|s| s.pointer()),
            Some(Point::new(10.0, 20.0))
        );
    }

    #[test]
    fn sustained_press_lifts_after_hold_delay() {
        let mut h = Harness::new(held(300));
        h.controller().press_start(2).unwrap();
        assert!(matches!(h.state, DragState::Pressed(_)));

        h.controller().tick(Duration::from_millis(200)).unwrap();
        assert!(h.state.session().is_none());
        h.controller().tick(Duration::from_millis(100)).unwrap();

        assert_eq!(h.state.session().map(|s| s.source_index()), Some(2));
        assert_eq!(h.feedback.phase(&'C'), Phase::Lifting);
    }

    #[test]
    fn press_that_moves_past_slop_is_abandoned() {
        let mut h = Harness::new(held(300));
        h.controller().press_start(2).unwrap();
        h.controller().drag_move(Point::new(0.0, 0.0));
        h.controller().drag_move(Point::new(4.0, 0.0));
        assert!(matches!(h.state, DragState::Pressed(_)));
        h.controller().drag_move(Point::new(20.0, 0.0));

        assert!(h.state.is_idle());
        assert_eq!(
            *h.seen.borrow(),
            vec![DragEvent::PressAbandoned { index: 2 }]
        );
    }

    #[test]
    fn release_before_hold_is_a_tap() {
        let mut h = Harness::new(held(300));
        h.controller().press_start(1).unwrap();
        assert_eq!(h.controller().drop_at(3), Ok(None));
        assert!(h.state.is_idle());
        assert_eq!(h.order(), "ABCDE");
        assert_eq!(h.feedback.tracked(), 0);
    }

    #[test]
    fn drop_follows_item_moved_programmatically_mid_drag() {
        let mut h = Harness::new(GestureSettings::default());
        h.controller().begin_drag(0).unwrap();
        h.store.move_item(0, 4).unwrap();

        let outcome = h.controller().drop_at(1).unwrap();

        assert_eq!(outcome.map(|o| o.source), Some(4));
        assert_eq!(h.order(), "BACDE");
    }

    #[test]
    fn hover_verdict_follows_item_moved_mid_drag() {
        let mut h = Harness::new(GestureSettings::default());
        h.controller().begin_drag(1).unwrap();
        h.store.move_item(0, 4).unwrap();
        h.seen.borrow_mut().clear();

        h.controller().drag_over(Some(1));
        h.controller().drag_over(Some(0));

        assert_eq!(
            *h.seen.borrow(),
            vec![
                DragEvent::Hovered {
                    source: 0,
                    target: 1,
                    accepted: true,
                },
                DragEvent::Hovered {
                    source: 0,
                    target: 0,
                    accepted: false,
                },
            ]
        );
    }
}
