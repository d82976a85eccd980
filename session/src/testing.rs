//! Shared fixtures for unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::authorizer::{Navigator, RequestAuthorizer};
use crate::service::SessionService;
use crate::store::{KeyValueStore, MemoryStore};
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, TransportError};

pub(crate) const API_BASE: &str = "https://portal.test/api";
pub(crate) const NOW: u64 = 1_700_000_000;

pub(crate) fn fixed_clock() -> u64 {
    NOW
}

/// Transport answering from a scripted queue and recording every request.
/// An empty queue answers `200 {}`.
#[derive(Default)]
pub(crate) struct MockTransport {
    replies: Mutex<VecDeque<Result<ApiResponse, TransportError>>>,
    pub(crate) requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(&self, status: u16, body: &str) {
        self.replies.lock().unwrap().push_back(Ok(ApiResponse::new(status, body)));
    }

    pub(crate) fn fail(&self, message: &str) {
        self.replies.lock().unwrap().push_back(Err(TransportError(message.to_owned())));
    }

    pub(crate) fn sent(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn last(&self) -> ApiRequest {
        self.sent().pop().expect("no request sent")
    }
}

#[async_trait::async_trait(?Send)]
impl HttpTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ApiResponse::new(200, "{}")))
    }
}

/// Navigator that remembers where it was sent.
pub(crate) struct RecordingNavigator {
    route: RefCell<String>,
    pub(crate) visits: RefCell<Vec<String>>,
}

impl RecordingNavigator {
    pub(crate) fn at(route: &str) -> Self {
        Self { route: RefCell::new(route.to_owned()), visits: RefCell::new(Vec::new()) }
    }

    pub(crate) fn visited(&self) -> Vec<String> {
        self.visits.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn current_route(&self) -> String {
        self.route.borrow().clone()
    }

    fn navigate(&self, path: &str) {
        *self.route.borrow_mut() = path.to_owned();
        self.visits.borrow_mut().push(path.to_owned());
    }
}

pub(crate) struct Harness {
    pub(crate) durable: Arc<MemoryStore>,
    pub(crate) transient: Arc<MemoryStore>,
    pub(crate) session: Arc<SessionService>,
    pub(crate) client: RequestAuthorizer<MockTransport, RecordingNavigator>,
}

impl Harness {
    pub(crate) fn new() -> Self {
        Self::with_service(|s| s)
    }

    pub(crate) fn with_service(configure: impl FnOnce(SessionService) -> SessionService) -> Self {
        let durable = Arc::new(MemoryStore::new());
        let transient = Arc::new(MemoryStore::new());
        let store: Arc<dyn KeyValueStore> = durable.clone();
        let session = Arc::new(configure(SessionService::new(store, API_BASE).with_clock(fixed_clock)));
        let transient_store: Arc<dyn KeyValueStore> = transient.clone();
        let client = RequestAuthorizer::new(
            MockTransport::new(),
            session.clone(),
            RecordingNavigator::at("/dashboard"),
            transient_store,
        );
        Self { durable, transient, session, client }
    }

    pub(crate) fn transport(&self) -> &MockTransport {
        self.client.transport()
    }
}

pub(crate) fn jwt(payload: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{header}.{body}.signature")
}

pub(crate) fn login_body(token: &str, role: &str) -> String {
    serde_json::json!({
        "status": true,
        "statusCode": 200,
        "access_token": token,
        "message": "Login successful",
        "note": "",
        "data": {
            "userId": 101,
            "username": "admin",
            "firstName": "Rural",
            "lastName": "Admin",
            "roleId": 1,
            "roleTypeId": 1,
            "roleTypeName": role,
            "districtId": 4,
            "ulbId": 0,
            "panchayatId": 12
        }
    })
    .to_string()
}
