use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use tokio::sync::oneshot;

use crate::dom::Fragment;
use crate::http::{FetchFailed, Transport};

type Reply = Result<Fragment, FetchFailed>;

#[derive(Default)]
struct Script {
    replies: RefCell<VecDeque<oneshot::Receiver<Reply>>>,
    requests: RefCell<Vec<(String, u32)>>,
}

/// Transport answering from a queue of replies, recording every request.
///
/// A reply queued with [`respond_later`](Self::respond_later) keeps the
/// fetch pending until the test sends it.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Rc<Script>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_ok(&self, html: &str) {
        self.respond(Ok(Fragment::new(html)));
    }

    pub fn respond_status(&self, status: u16, payload: Option<&str>) {
        self.respond(Err(FetchFailed::Status {
            status,
            payload: payload.map(Fragment::new),
        }));
    }

    pub fn respond_network_error(&self) {
        self.respond(Err(FetchFailed::Network("connection refused".to_string())));
    }

    pub fn respond_later(&self) -> oneshot::Sender<Reply> {
        let (sender, receiver) = oneshot::channel();
        self.script.replies.borrow_mut().push_back(receiver);
        sender
    }

    pub fn requests(&self) -> Vec<(String, u32)> {
        self.script.requests.borrow().clone()
    }

    fn respond(&self, reply: Reply) {
        let sender = self.respond_later();
        let _ = sender.send(reply);
    }
}

impl Transport for ScriptedTransport {
    async fn fetch(&self, url: &str, page: u32) -> Result<Fragment, FetchFailed> {
        self.script
            .requests
            .borrow_mut()
            .push((url.to_string(), page));

        let pending = self.script.replies.borrow_mut().pop_front();
        match pending {
            Some(receiver) => receiver
                .await
                .unwrap_or_else(|_| Err(FetchFailed::Network("reply dropped".to_string()))),
            None => Err(FetchFailed::Network("no scripted reply".to_string())),
        }
    }
}

/// Let spawned local tasks run until they block.
pub async fn drain() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
