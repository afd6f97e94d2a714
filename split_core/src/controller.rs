//! # Split Controller
//!
//! Connects drag sessions to the split point. A start event on the handle
//! opens a [`DragSession`] for the event's modality, captures the current
//! split point as baseline, and subscribes a handler that writes
//! `clamp(baseline + delta, 0, viewport)` for every delta. Document events go
//! through [`SplitController::dispatch`]; the session is dropped as soon as it
//! reports a release.
//!
//! At most one session exists at a time. What happens to a start event that
//! arrives while a session is live is decided by [`OverlapPolicy`].

use tracing::{debug, warn};

use crate::config::{OverlapPolicy, SplitterConfig};
use crate::errors::SplitResult;
use crate::geometry::{clamp, SplitProperty};
use crate::host::{ListenerHost, StyleHost};
use crate::input::{InputModality, RawInput};
use crate::normalizer::{drag_input_for, DragSession, SessionUpdate};
use crate::units::Pixels;

/// Split point for a drag `delta` away from `baseline`, kept inside
/// `[0, viewport]`.
pub fn split_position_for(baseline: Pixels, delta: f64, viewport: Pixels) -> Pixels {
    let target = baseline.as_f64() + delta;
    Pixels::from_f64_rounded(clamp(target, 0.0, viewport.as_f64().max(0.0)))
}

fn apply_delta(
    style: &impl StyleHost,
    property: &SplitProperty,
    baseline: Pixels,
    delta: f64,
) -> SplitResult<Pixels> {
    let viewport = style.viewport_width()?;
    let position = split_position_for(baseline, delta, viewport);
    property.set(style, position)?;
    Ok(position)
}

/// Drives the split point from drag input and resize notifications.
#[derive(Debug)]
pub struct SplitController<S, L>
where
    S: StyleHost + Clone + 'static,
    L: ListenerHost,
{
    style: S,
    listeners: L,
    property: SplitProperty,
    overlap_policy: OverlapPolicy,
    session: Option<DragSession>,
}

impl<S, L> SplitController<S, L>
where
    S: StyleHost + Clone + 'static,
    L: ListenerHost,
{
    pub fn new(style: S, listeners: L, config: &SplitterConfig) -> Self {
        SplitController {
            style,
            listeners,
            property: config.split_property(),
            overlap_policy: config.overlap_policy,
            session: None,
        }
    }

    pub fn property(&self) -> &SplitProperty {
        &self.property
    }

    pub fn is_dragging(&self) -> bool {
        self.session.as_ref().is_some_and(DragSession::is_dragging)
    }

    /// Modality of the live session, if any
    pub fn active_modality(&self) -> Option<InputModality> {
        self.session.as_ref().map(DragSession::modality)
    }

    pub fn position(&self) -> SplitResult<Pixels> {
        self.property.get(&self.style)
    }

    /// Put the split point at half the viewport, overriding any dragged
    /// position. A live drag keeps its original baseline.
    pub fn recenter(&self) -> SplitResult<Pixels> {
        let center = self.property.center(&self.style)?;
        debug!(position = center.0, "split point centered");
        Ok(center)
    }

    /// Handle a start event from the drag handle.
    ///
    /// Returns `Ok(false)` when the event was dropped by
    /// [`OverlapPolicy::Ignore`]. An event without a usable coordinate is
    /// rejected before anything changes: a live drag keeps running and the
    /// split point is not touched.
    pub fn begin(&mut self, event: &RawInput) -> SplitResult<bool> {
        if self.is_dragging() && self.overlap_policy == OverlapPolicy::Ignore {
            debug!(event_type = %event.event_type, "drag already active, start ignored");
            return Ok(false);
        }

        let modality = InputModality::for_start_event(&event.event_type);
        let input = drag_input_for(modality);
        input.horizontal(event)?;

        if self.is_dragging() {
            debug!(event_type = %event.event_type, "superseding active drag");
            // old listeners must be gone before the new ones attach; the DOM
            // host shares one callback per event type
            self.cancel();
        }

        let baseline = self.baseline()?;
        let mut session = DragSession::new(input);

        let style = self.style.clone();
        let property = self.property.clone();
        session.subscribe(move |delta| {
            if let Err(e) = apply_delta(&style, &property, baseline, delta) {
                warn!(error = %e, code = e.error_code(), "failed to apply drag delta");
            }
        });

        session.start(event, &self.listeners)?;
        self.session = Some(session);
        Ok(true)
    }

    /// Route a document event into the live session.
    pub fn dispatch(&mut self, event: &RawInput) -> SplitResult<SessionUpdate> {
        let Some(session) = self.session.as_mut() else {
            return Ok(SessionUpdate::Ignored);
        };

        let update = session.handle(event)?;
        if update == SessionUpdate::Ended {
            self.session = None;
        }
        Ok(update)
    }

    /// Abort the live drag, detaching its listeners. The split point stays
    /// wherever the last move left it.
    pub fn cancel(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.finish();
        }
    }

    /// Current split point, or the centered default when none can be read.
    fn baseline(&self) -> SplitResult<Pixels> {
        match self.property.get(&self.style) {
            Ok(position) => Ok(position),
            Err(e) if e.is_position_fallback() => {
                warn!(error = %e, "no usable split position, recentering");
                self.recenter()
            }
            Err(e) => Err(e),
        }
    }
}
