//! Scripted in-memory `BackendApi` for unit tests.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::client::transport::{ApiReply, BackendApi, TransportError};
use crate::model::BackendKey;

type Reply = Result<ApiReply, TransportError>;

struct Script {
    list_replies: VecDeque<(Duration, Reply)>,
    list_fallback: Reply,
    mutation_reply: Reply,
    list_calls: usize,
    added: Vec<BackendKey>,
    removed: Vec<BackendKey>,
}

#[derive(Clone)]
pub(crate) struct ScriptedApi {
    script: Arc<Mutex<Script>>,
}

impl ScriptedApi {
    /// Every list call answers with `body` unless a reply is queued.
    pub(crate) fn serving(body: &str) -> Self {
        Self {
            script: Arc::new(Mutex::new(Script {
                list_replies: VecDeque::new(),
                list_fallback: Ok(ApiReply::ok(body)),
                mutation_reply: Ok(ApiReply::ok("")),
                list_calls: 0,
                added: Vec::new(),
                removed: Vec::new(),
            })),
        }
    }

    pub(crate) fn queue_list(&self, reply: Reply) {
        self.queue_list_after(Duration::ZERO, reply);
    }

    pub(crate) fn queue_list_after(&self, delay: Duration, reply: Reply) {
        self.script.lock().unwrap().list_replies.push_back((delay, reply));
    }

    pub(crate) fn set_list_fallback(&self, reply: Reply) {
        self.script.lock().unwrap().list_fallback = reply;
    }

    pub(crate) fn set_mutation_reply(&self, reply: Reply) {
        self.script.lock().unwrap().mutation_reply = reply;
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.script.lock().unwrap().list_calls
    }

    pub(crate) fn added(&self) -> Vec<BackendKey> {
        self.script.lock().unwrap().added.clone()
    }

    pub(crate) fn removed(&self) -> Vec<BackendKey> {
        self.script.lock().unwrap().removed.clone()
    }
}

impl BackendApi for ScriptedApi {
    fn list_backends(&self) -> impl Future<Output = Reply> + Send {
        let (delay, reply) = {
            let mut script = self.script.lock().unwrap();
            script.list_calls += 1;
            match script.list_replies.pop_front() {
                Some(queued) => queued,
                None => (Duration::ZERO, script.list_fallback.clone()),
            }
        };

        async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            reply
        }
    }

    fn add_backend(&self, key: &BackendKey) -> impl Future<Output = Reply> + Send {
        let reply = {
            let mut script = self.script.lock().unwrap();
            script.added.push(key.clone());
            script.mutation_reply.clone()
        };
        async move { reply }
    }

    fn remove_backend(&self, key: &BackendKey) -> impl Future<Output = Reply> + Send {
        let reply = {
            let mut script = self.script.lock().unwrap();
            script.removed.push(key.clone());
            script.mutation_reply.clone()
        };
        async move { reply }
    }
}
