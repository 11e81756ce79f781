//! A thin builder over the browser `fetch` API.
//!
//! ```ignore
//! let reply = fetch::Request::new("/like/7")
//!     .method(fetch::Method::Post)
//!     .header("Content-Type", "application/json")
//!     .send_with(&window)
//!     .await?;
//! ```

use derive_more::Display;
use futures::future::{FutureExt, LocalBoxFuture};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, RequestInit, Response, Window};

use crate::error::LikeError;
use crate::like::{Reply, Transport};
use crate::JsResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum Method {
    #[display(fmt = "GET")]
    Get,
    #[display(fmt = "POST")]
    Post,
}

#[derive(Clone, Debug)]
pub struct Request {
    url: String,
    method: Method,
    headers: Vec<(String, String)>,
}

impl Request {
    pub fn new(url: impl Into<String>) -> Request {
        Request {
            url: url.into(),
            method: Method::Get,
            headers: Vec::new(),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    fn to_web_request(&self) -> JsResult<web_sys::Request> {
        let init = RequestInit::new();
        init.set_method(&self.method.to_string());
        let headers = Headers::new()?;
        for (k, v) in &self.headers {
            headers.set(k, v)?;
        }
        init.set_headers(&headers);
        web_sys::Request::new_with_str_and_init(&self.url, &init)
    }

    /// Send the request on `window`. Any status is returned as a `Reply`;
    /// only failing to send or read is an error.
    pub async fn send_with(self, window: &Window) -> Result<Reply, LikeError> {
        let request = self.to_web_request()?;
        let resp = JsFuture::from(window.fetch_with_request(&request)).await?;
        let resp: Response = resp.dyn_into()?;
        let status = resp.status();
        let text = JsFuture::from(resp.text()?).await?;
        let body = text
            .as_string()
            .ok_or_else(|| LikeError::Transport("response body is not text".into()))?;
        trace!("{} {} -> {}", self.method, self.url, status);
        Ok(Reply { status, body })
    }
}

/// The request `FetchTransport` sends for a like
fn like_request(path: &str) -> Request {
    Request::new(path)
        .method(Method::Post)
        .header("Content-Type", "application/json")
}

/// `Transport` backed by `window.fetch`
#[derive(Clone, Debug)]
pub struct FetchTransport {
    window: Window,
}

impl FetchTransport {
    pub fn new(window: Window) -> FetchTransport {
        FetchTransport { window }
    }
}

impl Transport for FetchTransport {
    fn post_json(&self, path: &str) -> LocalBoxFuture<'static, Result<Reply, LikeError>> {
        let window = self.window.clone();
        let request = like_request(path);
        async move { request.send_with(&window).await }.boxed_local()
    }
}
