//! # Raw Input
//!
//! Platform-neutral snapshot of the press/move/release events the splitter
//! consumes, and the closed set of input modalities they come from.

pub const MOUSE_DOWN: &str = "mousedown";
pub const MOUSE_MOVE: &str = "mousemove";
pub const MOUSE_UP: &str = "mouseup";
pub const TOUCH_START: &str = "touchstart";
pub const TOUCH_MOVE: &str = "touchmove";
pub const TOUCH_END: &str = "touchend";
pub const TOUCH_CANCEL: &str = "touchcancel";

/// Events that open a drag session when fired on the handle
pub const START_EVENT_TYPES: [&str; 2] = [MOUSE_DOWN, TOUCH_START];

/// Input device family that produced a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputModality {
    /// Mouse or other primary pointer
    Pointer,
    /// Touch screen, first touch point only
    Touch,
}

impl InputModality {
    /// Pick the modality for a start event.
    ///
    /// `touchstart` selects touch; `mousedown` and every unrecognized type
    /// select pointer. The fallback is deliberate policy: an unknown start
    /// event is treated as a mouse press.
    pub fn for_start_event(event_type: &str) -> Self {
        match event_type {
            TOUCH_START => InputModality::Touch,
            _ => InputModality::Pointer,
        }
    }

    pub fn move_event_types(self) -> &'static [&'static str] {
        match self {
            InputModality::Pointer => &[MOUSE_MOVE],
            InputModality::Touch => &[TOUCH_MOVE],
        }
    }

    /// Release events; `touchcancel` counts as a release.
    pub fn end_event_types(self) -> &'static [&'static str] {
        match self {
            InputModality::Pointer => &[MOUSE_UP],
            InputModality::Touch => &[TOUCH_END, TOUCH_CANCEL],
        }
    }

    pub fn is_move_event(self, event_type: &str) -> bool {
        self.move_event_types().contains(&event_type)
    }

    pub fn is_end_event(self, event_type: &str) -> bool {
        self.end_event_types().contains(&event_type)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            InputModality::Pointer => "pointer",
            InputModality::Touch => "touch",
        }
    }
}

/// One raw input event, reduced to what drag tracking needs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawInput {
    /// DOM event type, e.g. `mousemove`
    pub event_type: String,
    /// Horizontal client coordinate of the primary pointer, if the event has one
    pub client_x: Option<f64>,
    /// Horizontal client coordinates of the active touch points, in order
    pub touches: Vec<f64>,
}

impl RawInput {
    pub fn mouse(event_type: impl Into<String>, client_x: f64) -> Self {
        RawInput {
            event_type: event_type.into(),
            client_x: Some(client_x),
            touches: Vec::new(),
        }
    }

    pub fn touch(event_type: impl Into<String>, touches: impl IntoIterator<Item = f64>) -> Self {
        RawInput {
            event_type: event_type.into(),
            client_x: None,
            touches: touches.into_iter().collect(),
        }
    }
}
