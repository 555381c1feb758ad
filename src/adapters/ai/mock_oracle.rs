//! Mock Oracle - scripted replies for tests.
//!
//! Queue replies in order; each `complete` call pops the next one and
//! records the request it was given for later assertions. When the queue
//! runs dry the mock keeps returning its final configured reply.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::ports::{Oracle, OracleError, OracleReply, OracleRequest};

/// Scripted Oracle implementation for tests.
pub struct MockOracle {
    replies: Mutex<VecDeque<Script>>,
    requests: Mutex<Vec<OracleRequest>>,
}

enum Script {
    Reply(String),
    Unavailable(String),
}

impl MockOracle {
    /// Creates a mock with no scripted replies; calls echo an empty reply.
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Creates a mock that always returns the given content.
    pub fn replying(content: impl Into<String>) -> Self {
        let mock = Self::new();
        mock.push_reply(content);
        mock
    }

    /// Creates a mock whose next call fails as unavailable.
    pub fn unavailable(message: impl Into<String>) -> Self {
        let mock = Self::new();
        mock.replies
            .lock()
            .unwrap()
            .push_back(Script::Unavailable(message.into()));
        mock
    }

    /// Queues a reply with the given content.
    pub fn push_reply(&self, content: impl Into<String>) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Script::Reply(content.into()));
    }

    /// Requests received so far, in call order.
    pub fn requests(&self) -> Vec<OracleRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockOracle {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Oracle for MockOracle {
    async fn complete(&self, request: OracleRequest) -> Result<OracleReply, OracleError> {
        self.requests.lock().unwrap().push(request);

        let mut replies = self.replies.lock().unwrap();
        let script = if replies.len() > 1 {
            replies.pop_front()
        } else {
            // Keep the last script in place so repeated calls stay scripted.
            replies.front().map(|s| match s {
                Script::Reply(c) => Script::Reply(c.clone()),
                Script::Unavailable(m) => Script::Unavailable(m.clone()),
            })
        };

        match script {
            Some(Script::Reply(content)) => Ok(OracleReply {
                content,
                model: "mock".to_string(),
            }),
            Some(Script::Unavailable(message)) => Err(OracleError::unavailable(message)),
            None => Ok(OracleReply {
                content: String::new(),
                model: "mock".to_string(),
            }),
        }
    }
}
