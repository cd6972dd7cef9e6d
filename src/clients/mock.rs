//! Scripted transport for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::clients::{HttpError, HttpMethod, HttpRequest, HttpResponse, Transport};

type Reply = Result<HttpResponse, String>;

/// Replays queued replies in order and records every request it sees.
///
/// Clones share the same queue and log, so a test can keep one handle
/// after moving another into a client.
#[derive(Clone, Debug, Default)]
pub(crate) struct MockTransport {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(self, code: u16, body: &str) -> Self {
        self.push(Ok(HttpResponse::json(code, body)));
        self
    }

    pub(crate) fn fail(self, message: &str) -> Self {
        self.push(Err(message.to_string()));
        self
    }

    fn push(&self, reply: Reply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn calls(&self) -> Vec<(HttpMethod, String)> {
        self.requests()
            .into_iter()
            .map(|request| (request.method, request.path))
            .collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let path = request.path.clone();
        self.requests.lock().unwrap().push(request);
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request to {path}"));
        reply.map_err(HttpError::adapter)
    }
}
