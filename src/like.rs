//! The life of a single click.
//!
//! `like` is written against three small traits so the same flow drives the
//! real DOM in the browser and plain mocks in tests:
//!
//! * `LikeButton` - the element being liked
//! * `Transport` - sends `POST {prefix}{id}` and hands back the raw reply
//! * `Notifier` - tells the user something went wrong
//!
//! A button moves `Idle -> Disabled -> Idle`. Whichever way the request ends,
//! the button is enabled again; only success touches the label.

use futures::future::LocalBoxFuture;
use serde::Deserialize;

use crate::config::Config;
use crate::error::LikeError;

/// Identifier used when the button has no id attribute. Mirrors what the
/// browser yields when interpolating a missing attribute into a string.
pub const MISSING_ID: &str = "null";

pub trait LikeButton {
    fn resource_id(&self) -> Option<String>;
    fn set_disabled(&self, disabled: bool);
    fn set_label(&self, label: &str);
}

pub trait Transport {
    /// POST to `path` declaring a JSON content type. No body is sent.
    fn post_json(&self, path: &str) -> LocalBoxFuture<'static, Result<Reply, LikeError>>;
}

pub trait Notifier {
    fn notify(&self, message: &str);
}

/// What came back over the wire, before any interpretation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn new(status: u16, body: impl Into<String>) -> Reply {
        Reply {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct LikeResponse {
    pub likes: u64,
}

/// Turn a reply into a like count, or say why we can't
pub fn parse_reply(reply: &Reply) -> Result<u64, LikeError> {
    if !reply.is_success() {
        return Err(LikeError::Status(reply.status));
    }
    let parsed: LikeResponse = serde_json::from_str(&reply.body)?;
    Ok(parsed.likes)
}

/// Like the resource behind `button`.
///
/// The button is disabled before the request goes out and enabled again once
/// it settles. On success the label shows the new count; on failure the label
/// is untouched and the user is notified. The outcome is returned as well so
/// callers may log or inspect it.
pub async fn like<B, T, N>(
    button: &B,
    transport: &T,
    notifier: &N,
    config: &Config,
) -> Result<u64, LikeError>
where
    B: LikeButton + ?Sized,
    T: Transport + ?Sized,
    N: Notifier + ?Sized,
{
    let id = button
        .resource_id()
        .unwrap_or_else(|| MISSING_ID.to_string());
    button.set_disabled(true);

    let path = config.like_path(&id);
    debug!("POST {}", path);
    let request = transport.post_json(&path);
    let outcome = request.await.and_then(|reply| parse_reply(&reply));

    match &outcome {
        Ok(likes) => {
            trace!("{} now has {} likes", id, likes);
            button.set_label(&config.label(*likes));
            button.set_disabled(false);
        }
        Err(e) => {
            error!("Error: {} (POST {})", e, path);
            button.set_disabled(false);
            notifier.notify(&config.failure_message);
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;
    use futures::executor::{block_on, LocalPool};
    use futures::future::{self, FutureExt};
    use futures::task::LocalSpawnExt;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    #[derive(Default)]
    struct FakeButton {
        id: Option<String>,
        disabled: RefCell<bool>,
        label: RefCell<String>,
    }

    impl FakeButton {
        fn with_id(id: &str) -> FakeButton {
            FakeButton {
                id: Some(id.into()),
                label: RefCell::new("🌟 0".into()),
                ..FakeButton::default()
            }
        }
    }

    impl LikeButton for FakeButton {
        fn resource_id(&self) -> Option<String> {
            self.id.clone()
        }
        fn set_disabled(&self, disabled: bool) {
            *self.disabled.borrow_mut() = disabled;
        }
        fn set_label(&self, label: &str) {
            *self.label.borrow_mut() = label.into();
        }
    }

    /// Answers every request with the same canned result
    struct Canned {
        result: Result<Reply, LikeError>,
        paths: RefCell<Vec<String>>,
    }

    impl Canned {
        fn new(result: Result<Reply, LikeError>) -> Canned {
            Canned {
                result,
                paths: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for Canned {
        fn post_json(&self, path: &str) -> LocalBoxFuture<'static, Result<Reply, LikeError>> {
            self.paths.borrow_mut().push(path.into());
            future::ready(self.result.clone()).boxed_local()
        }
    }

    /// Holds each request open until the test answers it
    #[derive(Default)]
    struct Pending {
        waiting: RefCell<VecDeque<(String, oneshot::Sender<Result<Reply, LikeError>>)>>,
    }

    impl Pending {
        fn answer(&self, path: &str, result: Result<Reply, LikeError>) {
            let mut waiting = self.waiting.borrow_mut();
            let ix = waiting
                .iter()
                .position(|(p, _)| p == path)
                .expect("no such request");
            let (_, tx) = waiting.remove(ix).unwrap();
            tx.send(result).unwrap();
        }
    }

    impl Transport for Pending {
        fn post_json(&self, path: &str) -> LocalBoxFuture<'static, Result<Reply, LikeError>> {
            let (tx, rx) = oneshot::channel();
            self.waiting.borrow_mut().push_back((path.into(), tx));
            rx.map(|res| res.unwrap_or_else(|_| Err(LikeError::Transport("dropped".into()))))
                .boxed_local()
        }
    }

    #[derive(Default)]
    struct Alerts(RefCell<Vec<String>>);

    impl Notifier for Alerts {
        fn notify(&self, message: &str) {
            self.0.borrow_mut().push(message.into())
        }
    }

    #[test]
    fn success_updates_label_and_enables() {
        let button = FakeButton::with_id("7");
        let transport = Canned::new(Ok(Reply::new(200, r#"{"likes": 3}"#)));
        let alerts = Alerts::default();

        let res = block_on(like(&button, &transport, &alerts, &Config::default()));

        assert_eq!(res, Ok(3));
        assert_eq!(*transport.paths.borrow(), vec!["/like/7".to_string()]);
        assert_eq!(*button.label.borrow(), "🌟 3");
        assert!(!*button.disabled.borrow());
        assert!(alerts.0.borrow().is_empty());
    }

    #[test]
    fn transport_failure_notifies_and_keeps_label() {
        let button = FakeButton::with_id("7");
        let transport = Canned::new(Err(LikeError::Transport("network down".into())));
        let alerts = Alerts::default();

        let res = block_on(like(&button, &transport, &alerts, &Config::default()));

        assert!(matches!(res, Err(LikeError::Transport(_))));
        assert_eq!(*button.label.borrow(), "🌟 0");
        assert!(!*button.disabled.borrow());
        assert_eq!(
            *alerts.0.borrow(),
            vec!["Failed to like. Please try again.".to_string()]
        );
    }

    #[test]
    fn non_success_status_is_a_failure() {
        let button = FakeButton::with_id("7");
        let transport = Canned::new(Ok(Reply::new(500, r#"{"likes": 99}"#)));
        let alerts = Alerts::default();

        let res = block_on(like(&button, &transport, &alerts, &Config::default()));

        assert_eq!(res, Err(LikeError::Status(500)));
        assert_eq!(*button.label.borrow(), "🌟 0");
        assert_eq!(alerts.0.borrow().len(), 1);
    }

    #[test]
    fn invalid_json_is_a_failure() {
        let button = FakeButton::with_id("7");
        let transport = Canned::new(Ok(Reply::new(200, "<h1>oops</h1>")));
        let alerts = Alerts::default();

        let res = block_on(like(&button, &transport, &alerts, &Config::default()));

        assert!(matches!(res, Err(LikeError::Body(_))));
        assert_eq!(*button.label.borrow(), "🌟 0");
        assert!(!*button.disabled.borrow());
        assert_eq!(alerts.0.borrow().len(), 1);
    }

    #[test]
    fn missing_likes_field_is_a_failure() {
        let transport = Canned::new(Ok(Reply::new(201, r#"{"count": 4}"#)));
        let button = FakeButton::with_id("1");
        let alerts = Alerts::default();
        let res = block_on(like(&button, &transport, &alerts, &Config::default()));
        assert!(matches!(res, Err(LikeError::Body(_))));
    }

    #[test]
    fn fractional_count_is_a_failure() {
        let reply = Reply::new(200, r#"{"likes": 3.0}"#);
        assert!(matches!(parse_reply(&reply), Err(LikeError::Body(_))));
        assert_eq!(parse_reply(&Reply::new(200, r#"{"likes": 3}"#)), Ok(3));
    }

    #[test]
    fn missing_id_is_passed_through() {
        let button = FakeButton::default();
        let transport = Canned::new(Ok(Reply::new(200, r#"{"likes": 1}"#)));
        let alerts = Alerts::default();
        block_on(like(&button, &transport, &alerts, &Config::default())).unwrap();
        assert_eq!(*transport.paths.borrow(), vec!["/like/null".to_string()]);
    }

    #[test]
    fn odd_ids_are_not_escaped() {
        let button = FakeButton::with_id("a b/../c");
        let transport = Canned::new(Ok(Reply::new(200, r#"{"likes": 1}"#)));
        let alerts = Alerts::default();
        block_on(like(&button, &transport, &alerts, &Config::default())).unwrap();
        assert_eq!(*transport.paths.borrow(), vec!["/like/a b/../c".to_string()]);
    }

    #[test]
    fn disabled_while_in_flight() {
        let mut pool = LocalPool::new();
        let button = Rc::new(FakeButton::with_id("7"));
        let transport = Rc::new(Pending::default());
        let alerts = Rc::new(Alerts::default());

        {
            let (button, transport, alerts) = (button.clone(), transport.clone(), alerts.clone());
            pool.spawner()
                .spawn_local(async move {
                    let _ = like(&*button, &*transport, &*alerts, &Config::default()).await;
                })
                .unwrap();
        }
        pool.run_until_stalled();
        assert!(*button.disabled.borrow());
        assert_eq!(*button.label.borrow(), "🌟 0");

        transport.answer("/like/7", Ok(Reply::new(200, r#"{"likes": 42}"#)));
        pool.run_until_stalled();
        assert!(!*button.disabled.borrow());
        assert_eq!(*button.label.borrow(), "🌟 42");
    }

    #[test]
    fn buttons_settle_independently() {
        let mut pool = LocalPool::new();
        let first = Rc::new(FakeButton::with_id("1"));
        let second = Rc::new(FakeButton::with_id("2"));
        let transport = Rc::new(Pending::default());
        let alerts = Rc::new(Alerts::default());

        for button in &[first.clone(), second.clone()] {
            let (button, transport, alerts) = (button.clone(), transport.clone(), alerts.clone());
            pool.spawner()
                .spawn_local(async move {
                    let _ = like(&*button, &*transport, &*alerts, &Config::default()).await;
                })
                .unwrap();
        }
        pool.run_until_stalled();
        assert!(*first.disabled.borrow() && *second.disabled.borrow());

        // second resolves first and fails; first is unaffected
        transport.answer("/like/2", Ok(Reply::new(404, "")));
        pool.run_until_stalled();
        assert!(*first.disabled.borrow());
        assert!(!*second.disabled.borrow());
        assert_eq!(alerts.0.borrow().len(), 1);

        transport.answer("/like/1", Ok(Reply::new(200, r#"{"likes": 10}"#)));
        pool.run_until_stalled();
        assert!(!*first.disabled.borrow());
        assert_eq!(*first.label.borrow(), "🌟 10");
        assert_eq!(*second.label.borrow(), "🌟 0");
    }

    #[test]
    fn reply_success_range() {
        assert!(Reply::new(200, "").is_success());
        assert!(Reply::new(299, "").is_success());
        assert!(!Reply::new(199, "").is_success());
        assert!(!Reply::new(300, "").is_success());
    }
}
