//! Wires up "like" buttons in a server-rendered page.
//!
//! Each element matching `.like-button` gets a click handler which disables
//! the button, sends `POST /like/{data-id}` and shows the returned count as
//! `🌟 {likes}`. If anything goes wrong the button is re-enabled and the user
//! is asked to try again.
//!
//! The host page calls `init()` (or `init_with_config`) once after loading
//! the wasm module:
//!
//! ```js
//! import init_wasm, { init } from "./pkg/likes.js";
//! await init_wasm();
//! init();
//! ```

#[macro_use]
extern crate log;

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

pub mod binder;
pub mod config;
pub mod dom;
pub mod error;
pub mod event;
pub mod fetch;
pub mod like;
pub mod util;

pub use config::Config;
pub use error::LikeError;
pub use like::{like, LikeButton, Notifier, Reply, Transport};

pub use wasm_bindgen::JsValue;

pub type JsResult<T> = Result<T, JsValue>;

thread_local! {
    static INITIALIZED: Cell<bool> = Cell::new(false);
}

/// Returns true the first time it is called on this thread, false after
fn claim_init() -> bool {
    INITIALIZED.with(|done| !done.replace(true))
}

/// Bind all like buttons using the default configuration
#[wasm_bindgen]
pub fn init() -> JsResult<()> {
    start(Config::default())
}

/// Bind all like buttons. `config` is a JSON object overriding any of the
/// fields of `Config`.
#[wasm_bindgen(js_name = initWithConfig)]
pub fn init_with_config(config: &str) -> JsResult<()> {
    let config = Config::from_json(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
    start(config)
}

fn start(config: Config) -> JsResult<()> {
    if !claim_init() {
        warn!("like buttons already initialized, ignoring");
        return Ok(());
    }
    console_error_panic_hook::set_once();
    // Another logger may have been installed by the host; keep it
    if console_log::init_with_level(config.level()).is_err() {
        debug!("Logger already set");
    }

    let window = util::window()?;
    let document = util::document()?;
    let config = Rc::new(config);
    event::on_dom_ready(&document.clone(), move || {
        match binder::bind(&window, &document, config) {
            Ok(binding) => binding.forget(),
            Err(e) => error!("Failed to bind like buttons: {}", util::describe_js_error(&e)),
        }
    })
}
