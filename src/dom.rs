use web_sys::{Element as DomElement, Window};

use crate::like::{LikeButton, Notifier};
use crate::util;

/// A like button living in the page
#[derive(Clone, Debug)]
pub struct DomButton {
    element: DomElement,
    id_attribute: String,
}

impl DomButton {
    pub fn new(element: DomElement, id_attribute: impl Into<String>) -> DomButton {
        DomButton {
            element,
            id_attribute: id_attribute.into(),
        }
    }
}

impl LikeButton for DomButton {
    fn resource_id(&self) -> Option<String> {
        self.element.get_attribute(&self.id_attribute)
    }

    fn set_disabled(&self, disabled: bool) {
        if let Err(e) = util::set_bool_prop(&self.element, "disabled", disabled) {
            warn!("Failed to set disabled={}: {}", disabled, util::describe_js_error(&e));
        }
    }

    fn set_label(&self, label: &str) {
        self.element.set_text_content(Some(label));
    }
}

/// Reports failures with a blocking `window.alert`
#[derive(Clone, Debug)]
pub struct AlertNotifier {
    window: Window,
}

impl AlertNotifier {
    pub fn new(window: Window) -> AlertNotifier {
        AlertNotifier { window }
    }
}

impl Notifier for AlertNotifier {
    fn notify(&self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            error!("Failed to show alert: {}", util::describe_js_error(&e));
        }
    }
}
