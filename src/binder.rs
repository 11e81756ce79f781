use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element as DomElement, Window};

use crate::config::Config;
use crate::dom::{AlertNotifier, DomButton};
use crate::event::{self, Listener};
use crate::fetch::FetchTransport;
use crate::like;
use crate::JsResult;

/// Click listeners for every like button found at bind time
#[derive(Debug)]
pub struct Binding {
    listeners: Vec<Listener>,
}

impl Binding {
    /// Keep every listener attached for the rest of the page's life
    pub fn forget(self) {
        for listener in self.listeners {
            listener.forget()
        }
    }
}

/// Find all like buttons currently in the document and attach a click
/// handler to each. Buttons added later are not picked up.
pub fn bind(window: &Window, document: &Document, config: Rc<Config>) -> JsResult<Binding> {
    let nodes = document.query_selector_all(&config.selector)?;
    let mut listeners = Vec::with_capacity(nodes.length() as usize);
    for ix in 0..nodes.length() {
        let element: DomElement = match nodes.get(ix).and_then(|n| n.dyn_into().ok()) {
            Some(el) => el,
            None => continue,
        };
        listeners.push(bind_button(window, element, config.clone())?);
    }
    info!("Bound {} like buttons", listeners.len());
    Ok(Binding { listeners })
}

fn bind_button(window: &Window, element: DomElement, config: Rc<Config>) -> JsResult<Listener> {
    let button = DomButton::new(element.clone(), config.id_attribute.clone());
    let transport = FetchTransport::new(window.clone());
    let notifier = AlertNotifier::new(window.clone());
    let handler = move |ev: web_sys::Event| {
        ev.prevent_default();
        let (button, transport, notifier, config) = (
            button.clone(),
            transport.clone(),
            notifier.clone(),
            config.clone(),
        );
        wasm_bindgen_futures::spawn_local(async move {
            // failures are already reported to the user and the console
            let _ = like::like(&button, &transport, &notifier, &config).await;
        });
    };
    event::event_handler(&element, "click", handler)
}
