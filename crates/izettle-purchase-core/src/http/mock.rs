use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::error::{CoreError, HttpError};

use super::types::{HttpResponse, QueryValue};
use super::IzettleHttp;

/// Canned outcome for one mocked GET.
#[derive(Debug, Clone)]
pub enum MockReply {
    Json(String),
    NotFound(String),
    Status(StatusCode, String),
}

/// A GET observed by [`MockHttp`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub url: String,
    pub params: Vec<(String, QueryValue)>,
}

/// A mock HTTP backend for testing. Replies are queued per URL via the
/// builder; the last reply for a URL repeats once the queue is drained.
/// Unknown URLs answer with `NotFound`.
pub struct MockHttp {
    replies: Mutex<HashMap<String, VecDeque<MockReply>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockHttp {
    pub fn builder() -> MockHttpBuilder {
        MockHttpBuilder {
            replies: HashMap::new(),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("mock lock poisoned").clone()
    }

    fn next_reply(&self, url: &str) -> Option<MockReply> {
        let mut replies = self.replies.lock().expect("mock lock poisoned");
        let queue = replies.get_mut(url)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

pub struct MockHttpBuilder {
    replies: HashMap<String, VecDeque<MockReply>>,
}

impl MockHttpBuilder {
    pub fn with_reply(mut self, url: &str, reply: MockReply) -> Self {
        self.replies
            .entry(url.to_owned())
            .or_default()
            .push_back(reply);
        self
    }

    pub fn with_json(self, url: &str, body: serde_json::Value) -> Self {
        self.with_reply(url, MockReply::Json(body.to_string()))
    }

    pub fn build(self) -> MockHttp {
        MockHttp {
            replies: Mutex::new(self.replies),
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl IzettleHttp for MockHttp {
    async fn get(
        &self,
        url: &str,
        params: &[(String, QueryValue)],
    ) -> Result<HttpResponse, CoreError> {
        self.requests
            .lock()
            .expect("mock lock poisoned")
            .push(RecordedRequest {
                url: url.to_owned(),
                params: params.to_vec(),
            });

        match self.next_reply(url) {
            Some(MockReply::Json(body)) => Ok(HttpResponse::ok(body)),
            Some(MockReply::NotFound(message)) => Err(CoreError::NotFound(message)),
            Some(MockReply::Status(status, body)) => Err(HttpError::Status { status, body }.into()),
            None => Err(CoreError::NotFound(format!("no mock reply for {url}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn queued_replies_are_served_in_order_then_repeat() {
        let http = MockHttp::builder()
            .with_json("u", serde_json::json!({"page": 1}))
            .with_json("u", serde_json::json!({"page": 2}))
            .build();

        let first = http.get("u", &[]).await.unwrap();
        let second = http.get("u", &[]).await.unwrap();
        let third = http.get("u", &[]).await.unwrap();
        assert!(first.body.contains("1"));
        assert!(second.body.contains("2"));
        assert!(third.body.contains("2"));
        assert_eq!(http.requests().len(), 3);
    }

    #[tokio::test]
    async fn unknown_url_is_not_found() {
        let http = MockHttp::builder().build();
        let err = http.get("missing", &[]).await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }
}
