//! # Drag-Input Normalizer
//!
//! Turns raw mouse or touch events into one stream of horizontal deltas.
//!
//! A [`DragInput`] knows three things about its device family: where the
//! horizontal coordinate lives in an event, which document listeners a drag
//! needs, and how to drop them again. [`DragSession`] drives one drag with it:
//!
//! ```text
//! Idle --start--> Dragging --end/cancel--> Finished
//!                  |    ^
//!                  +move+  (every subscriber gets currentX - baselineX)
//! ```
//!
//! Sessions are single-use. The baseline is captured once at start and never
//! moves, so each delta is relative to where the drag began.
//!
//! ## Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use split_core::host::MemoryListeners;
//! use split_core::input::{InputModality, RawInput};
//! use split_core::normalizer::DragSession;
//!
//! let listeners = MemoryListeners::new();
//! let seen = Rc::new(RefCell::new(Vec::new()));
//!
//! let mut session = DragSession::for_modality(InputModality::Pointer);
//! let sink = Rc::clone(&seen);
//! session.subscribe(move |dx| sink.borrow_mut().push(dx));
//!
//! session.start(&RawInput::mouse("mousedown", 100.0), &listeners).unwrap();
//! session.handle(&RawInput::mouse("mousemove", 130.0)).unwrap();
//! session.handle(&RawInput::mouse("mouseup", 130.0)).unwrap();
//!
//! assert_eq!(*seen.borrow(), vec![30.0]);
//! assert!(listeners.attached().is_empty());
//! ```

use std::fmt;

use tracing::{debug, trace};

use crate::errors::{SplitError, SplitResult};
use crate::host::{ListenerGuard, ListenerHost};
use crate::input::{
    InputModality, RawInput, MOUSE_MOVE, MOUSE_UP, TOUCH_CANCEL, TOUCH_END, TOUCH_MOVE,
};

/// Device-specific half of drag tracking.
pub trait DragInput {
    fn modality(&self) -> InputModality;

    /// Horizontal client coordinate carried by `event`.
    fn horizontal(&self, event: &RawInput) -> SplitResult<f64>;

    /// Attach this device's move and release listeners on the document.
    fn attach(&self, host: &dyn ListenerHost) -> SplitResult<Vec<ListenerGuard>>;

    /// Detach listeners previously returned by [`DragInput::attach`].
    fn detach(&self, guards: Vec<ListenerGuard>) {
        for guard in guards {
            guard.release();
        }
    }
}

/// Attach every listed event type, or none of them.
fn listen_all(
    host: &dyn ListenerHost,
    event_types: &[&'static str],
) -> SplitResult<Vec<ListenerGuard>> {
    // guards acquired before a failure drop here and detach themselves
    event_types
        .iter()
        .map(|&event_type| host.listen(event_type))
        .collect()
}

/// Mouse drags: `clientX`, `mousemove` and `mouseup` on the document.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerInput;

impl DragInput for PointerInput {
    fn modality(&self) -> InputModality {
        InputModality::Pointer
    }

    fn horizontal(&self, event: &RawInput) -> SplitResult<f64> {
        event
            .client_x
            .ok_or_else(|| SplitError::missing_coordinate(&event.event_type))
    }

    fn attach(&self, host: &dyn ListenerHost) -> SplitResult<Vec<ListenerGuard>> {
        listen_all(host, &[MOUSE_MOVE, MOUSE_UP])
    }
}

/// Touch drags: first touch point's `clientX`, `touchmove`, `touchend` and
/// `touchcancel` on the document.
#[derive(Debug, Clone, Copy, Default)]
pub struct TouchInput;

impl DragInput for TouchInput {
    fn modality(&self) -> InputModality {
        InputModality::Touch
    }

    fn horizontal(&self, event: &RawInput) -> SplitResult<f64> {
        event
            .touches
            .first()
            .copied()
            .ok_or_else(|| SplitError::no_touch_point(&event.event_type))
    }

    fn attach(&self, host: &dyn ListenerHost) -> SplitResult<Vec<ListenerGuard>> {
        listen_all(host, &[TOUCH_MOVE, TOUCH_END, TOUCH_CANCEL])
    }
}

/// Build the normalizer for a modality.
pub fn drag_input_for(modality: InputModality) -> Box<dyn DragInput> {
    match modality {
        InputModality::Pointer => Box::new(PointerInput),
        InputModality::Touch => Box::new(TouchInput),
    }
}

/// What one event did to a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionUpdate {
    /// Not a move or release for this session, or the session is not live
    Ignored,
    /// Subscribers were notified with this delta
    Moved(f64),
    /// Release or cancel; listeners are detached
    Ended,
}

enum SessionState {
    Idle,
    Dragging {
        baseline_x: f64,
        guards: Vec<ListenerGuard>,
    },
    Finished,
}

impl SessionState {
    fn label(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Dragging { .. } => "dragging",
            SessionState::Finished => "finished",
        }
    }
}

type DeltaListener = Box<dyn FnMut(f64)>;

/// One drag interaction, from press to release.
pub struct DragSession {
    input: Box<dyn DragInput>,
    listeners: Vec<DeltaListener>,
    state: SessionState,
}

impl DragSession {
    pub fn new(input: Box<dyn DragInput>) -> Self {
        DragSession {
            input,
            listeners: Vec::new(),
            state: SessionState::Idle,
        }
    }

    pub fn for_modality(modality: InputModality) -> Self {
        DragSession::new(drag_input_for(modality))
    }

    pub fn modality(&self) -> InputModality {
        self.input.modality()
    }

    /// Register a callback for future deltas. There is no unsubscribe; the
    /// registry goes away with the session.
    pub fn subscribe(&mut self, listener: impl FnMut(f64) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Record the baseline coordinate and attach the document listeners.
    ///
    /// A session can only be started once. If the coordinate is missing or a
    /// listener cannot be attached, the session stays idle with nothing
    /// attached.
    pub fn start(&mut self, event: &RawInput, host: &dyn ListenerHost) -> SplitResult<()> {
        if !matches!(self.state, SessionState::Idle) {
            return Err(SplitError::SessionReused {
                state: self.state.label().to_string(),
            });
        }

        let baseline_x = self.input.horizontal(event)?;
        let guards = self.input.attach(host)?;
        debug!(
            modality = self.modality().display_name(),
            baseline_x,
            listeners = guards.len(),
            "drag session started"
        );
        self.state = SessionState::Dragging { baseline_x, guards };
        Ok(())
    }

    /// Feed one document event into the session.
    pub fn handle(&mut self, event: &RawInput) -> SplitResult<SessionUpdate> {
        let baseline_x = match &self.state {
            SessionState::Dragging { baseline_x, .. } => *baseline_x,
            _ => return Ok(SessionUpdate::Ignored),
        };
        let modality = self.modality();

        if modality.is_end_event(&event.event_type) {
            self.finish();
            return Ok(SessionUpdate::Ended);
        }
        if !modality.is_move_event(&event.event_type) {
            return Ok(SessionUpdate::Ignored);
        }

        let delta = self.input.horizontal(event)? - baseline_x;
        trace!(delta, "drag moved");
        for listener in &mut self.listeners {
            listener(delta);
        }
        Ok(SessionUpdate::Moved(delta))
    }

    /// Detach listeners and retire the session. Safe to call in any state.
    pub fn finish(&mut self) {
        let previous = std::mem::replace(&mut self.state, SessionState::Finished);
        if let SessionState::Dragging { guards, .. } = previous {
            self.input.detach(guards);
            debug!(modality = self.modality().display_name(), "drag session ended");
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, SessionState::Dragging { .. })
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, SessionState::Finished)
    }
}

impl fmt::Debug for DragSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragSession")
            .field("modality", &self.modality())
            .field("state", &self.state.label())
            .field("subscribers", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryListeners;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording_session(modality: InputModality) -> (DragSession, Rc<RefCell<Vec<f64>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut session = DragSession::for_modality(modality);
        let sink = Rc::clone(&seen);
        session.subscribe(move |dx| sink.borrow_mut().push(dx));
        (session, seen)
    }

    #[test]
    fn test_deltas_are_relative_to_session_start() {
        let listeners = MemoryListeners::new();
        let (mut session, seen) = recording_session(InputModality::Pointer);

        session.start(&RawInput::mouse("mousedown", 100.0), &listeners).unwrap();
        for x in [150.0, 120.0, 90.0] {
            session.handle(&RawInput::mouse("mousemove", x)).unwrap();
        }

        assert_eq!(*seen.borrow(), vec![50.0, 20.0, -10.0]);
    }

    #[test]
    fn test_pointer_attaches_mouse_listeners_only() {
        let listeners = MemoryListeners::new();
        let (mut session, _) = recording_session(InputModality::Pointer);
        session.start(&RawInput::mouse("mousedown", 0.0), &listeners).unwrap();
        assert_eq!(listeners.attached(), vec!["mousemove", "mouseup"]);
    }

    #[test]
    fn test_touch_attaches_move_end_and_cancel() {
        let listeners = MemoryListeners::new();
        let (mut session, _) = recording_session(InputModality::Touch);
        session
            .start(&RawInput::touch("touchstart", [10.0]), &listeners)
            .unwrap();
        assert_eq!(
            listeners.attached(),
            vec!["touchmove", "touchend", "touchcancel"]
        );
    }

    #[test]
    fn test_end_stops_notifications_and_detaches() {
        let listeners = MemoryListeners::new();
        let (mut session, seen) = recording_session(InputModality::Pointer);
        session.start(&RawInput::mouse("mousedown", 10.0), &listeners).unwrap();
        session.handle(&RawInput::mouse("mousemove", 20.0)).unwrap();

        let update = session.handle(&RawInput::mouse("mouseup", 20.0)).unwrap();
        assert_eq!(update, SessionUpdate::Ended);
        assert!(session.is_finished());
        assert!(listeners.attached().is_empty());

        let update = session.handle(&RawInput::mouse("mousemove", 500.0)).unwrap();
        assert_eq!(update, SessionUpdate::Ignored);
        assert_eq!(*seen.borrow(), vec![10.0]);
    }

    #[test]
    fn test_touch_cancel_ends_like_touch_end() {
        let listeners = MemoryListeners::new();
        let (mut session, seen) = recording_session(InputModality::Touch);
        session
            .start(&RawInput::touch("touchstart", [300.0, 10.0]), &listeners)
            .unwrap();
        session.handle(&RawInput::touch("touchmove", [320.0, 900.0])).unwrap();

        // touchcancel carries no touch points; it must still end the session
        let update = session.handle(&RawInput::touch("touchcancel", [0.0; 0])).unwrap();
        assert_eq!(update, SessionUpdate::Ended);
        assert!(listeners.attached().is_empty());
        assert_eq!(*seen.borrow(), vec![20.0]);
    }

    #[test]
    fn test_touch_without_points_is_an_error() {
        let listeners = MemoryListeners::new();
        let (mut session, seen) = recording_session(InputModality::Touch);

        let err = session
            .start(&RawInput::touch("touchstart", [0.0; 0]), &listeners)
            .unwrap_err();
        assert_eq!(err, SplitError::no_touch_point("touchstart"));
        assert!(!session.is_dragging());
        assert!(listeners.attached().is_empty());

        session
            .start(&RawInput::touch("touchstart", [5.0]), &listeners)
            .unwrap();
        let err = session.handle(&RawInput::touch("touchmove", [0.0; 0])).unwrap_err();
        assert_eq!(err.error_code(), "NO_TOUCH_POINT");
        assert!(session.is_dragging());
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_pointer_without_coordinate_is_an_error() {
        let listeners = MemoryListeners::new();
        let (mut session, _) = recording_session(InputModality::Pointer);
        let event = RawInput {
            event_type: "mousedown".to_string(),
            ..RawInput::default()
        };
        let err = session.start(&event, &listeners).unwrap_err();
        assert_eq!(err.error_code(), "MISSING_COORDINATE");
    }

    #[test]
    fn test_session_is_single_use() {
        let listeners = MemoryListeners::new();
        let (mut session, _) = recording_session(InputModality::Pointer);
        let press = RawInput::mouse("mousedown", 0.0);

        session.start(&press, &listeners).unwrap();
        let err = session.start(&press, &listeners).unwrap_err();
        assert_eq!(err, SplitError::SessionReused { state: "dragging".to_string() });
        assert_eq!(listeners.attached().len(), 2);

        session.finish();
        let err = session.start(&press, &listeners).unwrap_err();
        assert_eq!(err, SplitError::SessionReused { state: "finished".to_string() });
        assert!(listeners.attached().is_empty());
    }

    #[test]
    fn test_failed_attach_leaves_nothing_attached() {
        let listeners = MemoryListeners::new();
        listeners.reject("touchcancel");
        let (mut session, _) = recording_session(InputModality::Touch);

        let err = session
            .start(&RawInput::touch("touchstart", [1.0]), &listeners)
            .unwrap_err();
        assert_eq!(err.error_code(), "HOST_ERROR");
        assert!(listeners.attached().is_empty());
        assert!(!session.is_dragging());
    }

    #[test]
    fn test_dropping_a_live_session_detaches() {
        let listeners = MemoryListeners::new();
        let (mut session, _) = recording_session(InputModality::Pointer);
        session.start(&RawInput::mouse("mousedown", 0.0), &listeners).unwrap();
        drop(session);
        assert!(listeners.attached().is_empty());
    }

    #[test]
    fn test_subscribe_after_start_and_multiple_subscribers() {
        let listeners = MemoryListeners::new();
        let (mut session, first) = recording_session(InputModality::Pointer);
        session.start(&RawInput::mouse("mousedown", 50.0), &listeners).unwrap();

        let second = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&second);
        session.subscribe(move |dx| sink.borrow_mut().push(dx));

        session.handle(&RawInput::mouse("mousemove", 45.0)).unwrap();
        assert_eq!(*first.borrow(), vec![-5.0]);
        assert_eq!(*second.borrow(), vec![-5.0]);
    }

    #[test]
    fn test_foreign_events_are_ignored() {
        let listeners = MemoryListeners::new();
        let (mut session, seen) = recording_session(InputModality::Pointer);
        session.start(&RawInput::mouse("mousedown", 0.0), &listeners).unwrap();

        let update = session.handle(&RawInput::touch("touchend", [0.0; 0])).unwrap();
        assert_eq!(update, SessionUpdate::Ignored);
        assert!(session.is_dragging());
        assert!(seen.borrow().is_empty());
    }
}
