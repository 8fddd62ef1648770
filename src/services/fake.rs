//! In-memory upstream for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::services::Upstream;

enum Reply {
    Json(Value),
    Status(u16),
    Transport(String),
}

/// Upstream that answers from a fixed table and records every call.
pub struct FakeUpstream {
    replies: HashMap<String, Reply>,
    calls: Mutex<Vec<String>>,
}

impl FakeUpstream {
    pub fn new() -> Self {
        Self {
            replies: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn json(mut self, path: &str, body: Value) -> Self {
        self.replies.insert(path.to_string(), Reply::Json(body));
        self
    }

    pub fn status(mut self, path: &str, status: u16) -> Self {
        self.replies.insert(path.to_string(), Reply::Status(status));
        self
    }

    pub fn transport(mut self, path: &str, cause: &str) -> Self {
        self.replies
            .insert(path.to_string(), Reply::Transport(cause.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Upstream for FakeUpstream {
    async fn fetch(&self, path: &str) -> Result<Value> {
        self.calls.lock().unwrap().push(path.to_string());
        match self.replies.get(path) {
            Some(Reply::Json(body)) => Ok(body.clone()),
            Some(Reply::Status(status)) => Err(AppError::upstream(*status, path)),
            Some(Reply::Transport(cause)) => Err(AppError::transport(path, cause)),
            None => Err(AppError::upstream(404, path)),
        }
    }
}
