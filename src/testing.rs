//! Test Doubles
//!
//! Scripted transport and fixtures shared by the controller tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::api::{ApiClient, HttpRequest, HttpResponse, Transport};
use crate::models::UserSnapshot;
use crate::session::{MemoryStorage, SessionStore};

/// Replays queued responses in order and records every request
#[derive(Default)]
pub struct MockTransport {
    responses: RefCell<VecDeque<Result<HttpResponse, String>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn respond(&self, status: u16, body: Value) {
        self.respond_raw(status, &body.to_string());
    }

    pub fn respond_raw(&self, status: u16, body: &str) {
        self.responses.borrow_mut().push_back(Ok(HttpResponse {
            status,
            body: body.to_string(),
        }));
    }

    pub fn fail(&self, message: &str) {
        self.responses.borrow_mut().push_back(Err(message.to_string()));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }

    /// JSON body of the nth request
    pub fn body(&self, index: usize) -> Option<Value> {
        self.requests
            .borrow()
            .get(index)
            .and_then(|r| r.body.as_deref())
            .and_then(|b| serde_json::from_str(b).ok())
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err("no scripted response".to_string()))
    }
}

/// API client over a fresh in-memory session and scripted transport
pub fn harness() -> (ApiClient, SessionStore, Rc<MockTransport>) {
    let session = SessionStore::new(Box::new(MemoryStorage::default()));
    let transport = Rc::new(MockTransport::default());
    let api = ApiClient::new("http://api.test", transport.clone(), session.clone());
    (api, session, transport)
}

pub fn user(id: u64, first_name: &str) -> UserSnapshot {
    UserSnapshot {
        id,
        first_name: first_name.to_string(),
        email: format!("{}@example.com", first_name.to_lowercase()),
        ..Default::default()
    }
}

/// Store a token and user 1 as if a login had happened
pub fn sign_in(session: &SessionStore, token: &str) {
    session.set_session(token, Some(&user(1, "Ada")));
}

pub fn todo_json(id: u64, title: &str, due: Option<&str>, completed: bool) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": "",
        "dueDate": due,
        "isCompleted": completed,
        "createdAt": "2024-01-01T08:00:00.000Z"
    })
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
