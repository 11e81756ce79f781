use wasm_bindgen::JsValue;
use web_sys::{Document, Element as DomElement, Window};

use crate::JsResult;

pub fn window() -> JsResult<Window> {
    web_sys::window().ok_or_else(|| JsValue::from_str("No window"))
}

pub fn document() -> JsResult<Document> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("No document"))
}

/// Set a boolean property (not attribute) of a dom element, e.g. `disabled`
pub fn set_bool_prop(elem: &DomElement, key: &str, val: bool) -> JsResult<()> {
    let key = JsValue::from_str(key);
    js_sys::Reflect::set(elem, &key, &JsValue::from_bool(val)).and_then(|ok| {
        if ok {
            Ok(())
        } else {
            Err(JsValue::from_str("property is read-only"))
        }
    })
}

/// Best-effort human readable form of a thrown JS value
pub fn describe_js_error(val: &JsValue) -> String {
    if let Some(s) = val.as_string() {
        return s;
    }
    js_sys::Reflect::get(val, &JsValue::from_str("message"))
        .ok()
        .and_then(|msg| msg.as_string())
        .unwrap_or_else(|| format!("{:?}", val))
}
