//! # split_web - Browser Bootstrap for the Split Divider
//!
//! Wires `split_core` to the DOM with `wasm-bindgen` and `web-sys`:
//!
//! - the split point lives in a custom property on `document.documentElement`
//!   (see [`dom::DocumentStyle`]),
//! - `mousedown` / `touchstart` on the handle element start a drag,
//! - the drag session attaches its move and release listeners on `document`
//!   and removes them when it ends,
//! - `resize` on the window re-centers the split point.
//!
//! On load, [`start`] mounts a splitter with the default configuration when
//! the page has an element with id `splitter`. Pages with other ids create
//! one from JS instead:
//!
//! ```js
//! const splitter = new Splitter(JSON.stringify({ handle_id: "gutter" }));
//! // ...
//! splitter.free(); // detaches every listener
//! ```
//!
//! A handle carries at most one splitter. Mounting on the handle the
//! auto-mounted splitter uses replaces it, so `new Splitter()` on a page
//! with `#splitter` takes over instead of stacking a second set of
//! listeners. `unmountDefault()` drops the auto-mounted splitter outright.

pub mod dom;
pub mod logging;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use split_core::config::SplitterConfig;
use split_core::controller::SplitController;
use split_core::errors::SplitResult;
use split_core::host::{ListenerGuard, ListenerHost};
use split_core::input::START_EVENT_TYPES;
use tracing::{debug, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::Event;

use crate::dom::{to_js_error, DocumentStyle, DomListeners};

type WebController = SplitController<DocumentStyle, DomListeners>;

thread_local! {
    static AUTO_MOUNTED: RefCell<Option<Splitter>> = const { RefCell::new(None) };
}

/// A mounted splitter. Dropping it (or calling `free()` from JS) removes
/// every listener it installed.
#[wasm_bindgen]
pub struct Splitter {
    controller: Rc<RefCell<WebController>>,
    handle_id: String,
    // handle and window listeners, detached on drop
    _mounted: Vec<ListenerGuard>,
}

impl Splitter {
    /// Look up the configured elements, center the split point, and attach
    /// the start and resize listeners.
    pub fn mount(config: &SplitterConfig) -> SplitResult<Self> {
        config.validate()?;

        let window = dom::window()?;
        let document = dom::document(&window)?;
        let handle = dom::element_by_id(&document, &config.handle_id)?;
        dom::element_by_id(&document, &config.left_pane_id)?;
        dom::element_by_id(&document, &config.right_pane_id)?;
        let style = DocumentStyle::new(&window)?;

        // event closures hold weak references; the Splitter is the only owner
        let controller = Rc::new_cyclic(|weak: &Weak<RefCell<WebController>>| {
            let weak = weak.clone();
            let on_session_event = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                if let Some(controller) = weak.upgrade() {
                    dispatch_session_event(&controller, &event);
                }
            });
            let listeners = DomListeners::new(document.clone().into(), on_session_event);
            RefCell::new(SplitController::new(style, listeners, config))
        });
        let center = controller.borrow().recenter()?;

        let mut mounted = Vec::new();

        let weak = Rc::downgrade(&controller);
        let on_start = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if let Some(controller) = weak.upgrade() {
                begin_drag(&controller, &event);
            }
        });
        let handle_listeners = DomListeners::new(handle.into(), on_start);
        for event_type in START_EVENT_TYPES {
            mounted.push(handle_listeners.listen(event_type)?);
        }

        if config.recenter_on_resize {
            let weak = Rc::downgrade(&controller);
            let on_resize = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
                if let Some(controller) = weak.upgrade() {
                    recenter(&controller);
                }
            });
            mounted.push(DomListeners::new(window.into(), on_resize).listen("resize")?);
        }

        info!(
            handle = %config.handle_id,
            property = %config.property_name,
            position = center.0,
            "splitter mounted"
        );
        release_auto_mounted(&config.handle_id);
        Ok(Splitter {
            controller,
            handle_id: config.handle_id.clone(),
            _mounted: mounted,
        })
    }
}

/// Drop the auto-mounted splitter if it sits on `handle_id`.
fn release_auto_mounted(handle_id: &str) {
    let previous = AUTO_MOUNTED.with(|slot| {
        let mut slot = slot.borrow_mut();
        let same_handle = slot
            .as_ref()
            .is_some_and(|splitter| splitter.handle_id == handle_id);
        if same_handle {
            slot.take()
        } else {
            None
        }
    });
    // dropped outside the slot borrow; its guards detach the old listeners
    if let Some(splitter) = previous {
        debug!(handle = %handle_id, "replacing auto-mounted splitter");
        drop(splitter);
    }
}

#[wasm_bindgen]
impl Splitter {
    /// Mount with an optional JSON configuration; omitted fields use the
    /// defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<Splitter, JsValue> {
        logging::init();
        let config = match config_json {
            Some(json) => SplitterConfig::from_json(&json),
            None => Ok(SplitterConfig::default()),
        }
        .map_err(to_js_error)?;
        Splitter::mount(&config).map_err(to_js_error)
    }

    /// Current split point in pixels
    pub fn position(&self) -> Result<i32, JsValue> {
        let position = self.controller.borrow().position().map_err(to_js_error)?;
        Ok(position.0)
    }

    /// Center the split point; returns the new position
    pub fn recenter(&self) -> Result<i32, JsValue> {
        let position = self.controller.borrow().recenter().map_err(to_js_error)?;
        Ok(position.0)
    }

    #[wasm_bindgen(js_name = isDragging)]
    pub fn is_dragging(&self) -> bool {
        self.controller.borrow().is_dragging()
    }

    /// Abort a drag in progress
    pub fn cancel(&self) {
        self.controller.borrow_mut().cancel();
    }
}

fn begin_drag(controller: &RefCell<WebController>, event: &Event) {
    let input = dom::raw_input(event);
    let Ok(mut controller) = controller.try_borrow_mut() else {
        warn!(event_type = %input.event_type, "controller busy, start event dropped");
        return;
    };
    if let Err(e) = controller.begin(&input) {
        warn!(error = %e, code = e.error_code(), "drag start rejected");
    }
}

fn dispatch_session_event(controller: &RefCell<WebController>, event: &Event) {
    let input = dom::raw_input(event);
    let Ok(mut controller) = controller.try_borrow_mut() else {
        warn!(event_type = %input.event_type, "controller busy, drag event dropped");
        return;
    };
    if let Err(e) = controller.dispatch(&input) {
        warn!(error = %e, code = e.error_code(), "drag event rejected");
    }
}

fn recenter(controller: &RefCell<WebController>) {
    let Ok(controller) = controller.try_borrow() else {
        return;
    };
    if let Err(e) = controller.recenter() {
        warn!(error = %e, code = e.error_code(), "recenter on resize failed");
    }
}

/// Detach the splitter [`start`] mounted, if any. Returns whether one was
/// mounted.
#[wasm_bindgen(js_name = unmountDefault)]
pub fn unmount_default() -> bool {
    let previous = AUTO_MOUNTED.with(|slot| slot.borrow_mut().take());
    previous.is_some()
}

/// Module entry point: logging, then auto-mount when the default handle
/// element exists.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    logging::init();

    let config = SplitterConfig::default();
    let window = dom::window().map_err(to_js_error)?;
    let document = dom::document(&window).map_err(to_js_error)?;
    if document.get_element_by_id(&config.handle_id).is_none() {
        debug!(handle = %config.handle_id, "no default handle, skipping auto-mount");
        return Ok(());
    }

    let splitter = Splitter::mount(&config).map_err(to_js_error)?;
    AUTO_MOUNTED.with(|slot| *slot.borrow_mut() = Some(splitter));
    Ok(())
}
