use derive_more::Display;
use wasm_bindgen::JsValue;

use crate::util;

/// Everything that can go wrong between a click and an updated count.
///
/// The user is shown the same notification for every variant; the variant
/// only ends up in the console log.
#[derive(Clone, Debug, PartialEq, Eq, Display)]
pub enum LikeError {
    /// The request could not be sent or the response could not be read
    #[display(fmt = "transport failure: {}", _0)]
    Transport(String),
    /// The server answered with a non-2xx status
    #[display(fmt = "unexpected status {}", _0)]
    Status(u16),
    /// The body was not JSON or had no integer `likes`
    #[display(fmt = "bad response body: {}", _0)]
    Body(String),
}

impl std::error::Error for LikeError {}

impl From<JsValue> for LikeError {
    fn from(val: JsValue) -> Self {
        LikeError::Transport(util::describe_js_error(&val))
    }
}

impl From<serde_json::Error> for LikeError {
    fn from(e: serde_json::Error) -> Self {
        LikeError::Body(e.to_string())
    }
}
