use std::borrow::Cow;
use std::fmt::{self, Debug};

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, DocumentReadyState, Event as DomEvent, EventTarget};

use crate::JsResult;

type Str = Cow<'static, str>;

/// Represents a listener attached to the DOM.
/// When it is dropped it will detach the corresponding listener.
pub struct Listener {
    target: EventTarget,
    type_: Str,
    closure: Closure<dyn FnMut(DomEvent)>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(&self.type_, self.closure.as_ref().unchecked_ref())
        {
            warn!("failed to remove {} listener: {:?}", self.type_, e);
        }
    }
}

impl Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Listener({})", self.type_)
    }
}

impl Listener {
    /// Keep the listener attached for the rest of the page's life
    pub fn forget(self) {
        Box::leak(Box::new(self));
    }
}

pub fn event_handler<S, F>(target: &EventTarget, event_name: S, handler: F) -> JsResult<Listener>
where
    S: Into<Str>,
    F: FnMut(DomEvent) + 'static,
{
    let event_name = event_name.into();
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(DomEvent)>);
    target.add_event_listener_with_callback(&event_name, closure.as_ref().unchecked_ref())?;
    Ok(Listener {
        target: target.clone(),
        type_: event_name,
        closure,
    })
}

/// `DOMContentLoaded` has already fired unless the document is still loading
fn parsed(state: DocumentReadyState) -> bool {
    state != DocumentReadyState::Loading
}

/// Run `f` once the document has been parsed. If that has already happened
/// `f` runs straight away.
pub fn on_dom_ready<F>(document: &Document, f: F) -> JsResult<()>
where
    F: FnOnce() + 'static,
{
    if parsed(document.ready_state()) {
        trace!("Document already parsed");
        f();
        return Ok(());
    }
    trace!("Waiting for DOMContentLoaded");
    let mut f = Some(f);
    let listener = event_handler(document, "DOMContentLoaded", move |_| {
        if let Some(f) = f.take() {
            f()
        }
    })?;
    listener.forget();
    Ok(())
}
