//! In-memory transport shared by catalog and subscription tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::collections::VecDeque;
use std::fs;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use wbem_client::{CimRequest, CimResponse, Transport, WbemClient};
use wbem_core::error::{Result, WbemError};

pub fn load(name: &str) -> String {
    fs::read_to_string(format!("tests/vectors/{name}")).unwrap()
}

/// Records every request and answers with queued responses in order.
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<CimResponse>>,
    requests: Mutex<Vec<CimRequest>>,
}

impl MockTransport {
    pub fn replying(vectors: &[&str]) -> Arc<Self> {
        let mock = Self::default();
        for v in vectors {
            mock.push(CimResponse::ok(load(v)));
        }
        Arc::new(mock)
    }

    pub fn push(&self, resp: CimResponse) {
        self.replies.lock().unwrap().push_back(resp);
    }

    pub fn requests(&self) -> Vec<CimRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn body(&self, i: usize) -> String {
        String::from_utf8(self.requests()[i].body.to_vec()).unwrap()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post(&self, req: CimRequest) -> Result<CimResponse> {
        self.requests.lock().unwrap().push(req);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| WbemError::Transport("no canned reply left".into()))
    }
}

pub fn client(mock: &Arc<MockTransport>) -> WbemClient {
    WbemClient::new(mock.clone(), "root/cimv2", false)
}
