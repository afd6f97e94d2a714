//! DOM implementations of the `split_core` host traits.

use std::rc::Rc;

use split_core::errors::{SplitError, SplitResult};
use split_core::host::{ListenerGuard, ListenerHost, StyleHost};
use split_core::input::RawInput;
use split_core::units::Pixels;
use tracing::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, MouseEvent, TouchEvent, Window};

/// Shared event callback registered on the DOM
pub type EventCallback = Closure<dyn FnMut(Event)>;

fn js_error(operation: &'static str) -> impl Fn(JsValue) -> SplitError {
    move |value| SplitError::host_error(operation, format!("{:?}", value))
}

fn as_function(callback: &EventCallback) -> &js_sys::Function {
    callback.as_ref().unchecked_ref()
}

pub fn window() -> SplitResult<Window> {
    web_sys::window().ok_or_else(|| SplitError::host_error("window", "no global window"))
}

pub fn document(window: &Window) -> SplitResult<Document> {
    window
        .document()
        .ok_or_else(|| SplitError::host_error("window.document", "no document"))
}

/// Look up an element by id
pub fn element_by_id(document: &Document, id: &str) -> SplitResult<Element> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| SplitError::missing_element(id))
}

/// Split point storage on `document.documentElement`.
///
/// Reads go through `getComputedStyle` so a value declared in a stylesheet
/// counts; writes land in the root element's inline style.
#[derive(Debug, Clone)]
pub struct DocumentStyle {
    window: Window,
    root: HtmlElement,
}

impl DocumentStyle {
    pub fn new(window: &Window) -> SplitResult<Self> {
        let root = document(window)?
            .document_element()
            .ok_or_else(|| SplitError::host_error("documentElement", "document has no root"))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| SplitError::host_error("documentElement", "root is not an HTML element"))?;
        Ok(DocumentStyle {
            window: window.clone(),
            root,
        })
    }
}

impl StyleHost for DocumentStyle {
    fn read_property(&self, name: &str) -> SplitResult<Option<String>> {
        let computed = self
            .window
            .get_computed_style(&self.root)
            .map_err(js_error("getComputedStyle"))?
            .ok_or_else(|| SplitError::host_error("getComputedStyle", "no computed style"))?;
        let value = computed
            .get_property_value(name)
            .map_err(js_error("getPropertyValue"))?;
        let value = value.trim();
        Ok((!value.is_empty()).then(|| value.to_string()))
    }

    fn write_property(&self, name: &str, value: &str) -> SplitResult<()> {
        self.root
            .style()
            .set_property(name, value)
            .map_err(js_error("style.setProperty"))
    }

    fn viewport_width(&self) -> SplitResult<Pixels> {
        let width = self
            .window
            .inner_width()
            .map_err(js_error("innerWidth"))?
            .as_f64()
            .ok_or_else(|| SplitError::host_error("innerWidth", "not a number"))?;
        Ok(Pixels::from_f64_rounded(width.floor()))
    }
}

/// Registers one shared callback on an event target, per event type.
#[derive(Clone)]
pub struct DomListeners {
    target: EventTarget,
    callback: Rc<EventCallback>,
}

impl DomListeners {
    pub fn new(target: EventTarget, callback: EventCallback) -> Self {
        DomListeners {
            target,
            callback: Rc::new(callback),
        }
    }
}

impl ListenerHost for DomListeners {
    fn listen(&self, event_type: &'static str) -> SplitResult<ListenerGuard> {
        self.target
            .add_event_listener_with_callback(event_type, as_function(&self.callback))
            .map_err(js_error("addEventListener"))?;

        let target = self.target.clone();
        let callback = Rc::clone(&self.callback);
        Ok(ListenerGuard::new(event_type, move || {
            if let Err(e) =
                target.remove_event_listener_with_callback(event_type, as_function(&callback))
            {
                warn!(event_type, error = ?e, "removeEventListener failed");
            }
        }))
    }
}

impl std::fmt::Debug for DomListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomListeners").finish_non_exhaustive()
    }
}

/// Reduce a DOM mouse or touch event to a [`RawInput`].
///
/// Touch events report `touches`, the points still on the surface; for
/// `touchend` that list may be empty.
pub fn raw_input(event: &Event) -> RawInput {
    let event_type = event.type_();

    if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
        return RawInput::mouse(event_type, f64::from(mouse.client_x()));
    }

    if let Some(touch) = event.dyn_ref::<TouchEvent>() {
        let list = touch.touches();
        let touches = (0..list.length())
            .filter_map(|index| list.item(index))
            .map(|point| f64::from(point.client_x()));
        return RawInput::touch(event_type, touches);
    }

    RawInput {
        event_type,
        ..RawInput::default()
    }
}

/// Convert an error for the JS boundary
pub fn to_js_error(error: SplitError) -> JsValue {
    js_sys::Error::new(&format!("[{}] {}", error.error_code(), error)).into()
}
