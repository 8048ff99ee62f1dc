use async_trait::async_trait;
use serde_json::Value;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use crate::{auth::AuthContext, utils};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request to {path} failed: {source}")]
    Request {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{path} answered with status {status}")]
    Status { path: String, status: u16 },

    #[error("no stub registered for {0}")]
    NotStubbed(String),
}

// 1. ApiClient Contract
/// ApiClient
///
/// The backend the pages load their data from. Handlers only see this trait, so the
/// real HTTP client and the stub used by page-mock tests are interchangeable.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Fetches the JSON body at `path` (relative to the API base) on behalf of `auth`.
    async fn get_json(&self, path: &str, auth: &AuthContext) -> Result<Value, ApiError>;
}

// 2. The Real Implementation
/// HttpApiClient
///
/// Talks to the configured API over HTTP, forwarding the session token as a bearer
/// credential when there is one.
#[derive(Clone)]
pub struct HttpApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn get_json(&self, path: &str, auth: &AuthContext) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.get(&url);
        if let Some(token) = auth.token() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|source| ApiError::Request {
            path: path.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        response.json().await.map_err(|source| ApiError::Request {
            path: path.to_string(),
            source,
        })
    }
}

// 3. The Stub Implementation (For Page-Mock Tests)
/// StubApiClient
///
/// Answers from a fixed map of request path to JSON body and never touches the network.
/// Query strings are ignored when matching. Every call is recorded for assertions.
#[derive(Default)]
pub struct StubApiClient {
    stubs: HashMap<String, Value>,
    /// Simulated response delay in milliseconds.
    latency_ms: u64,
    calls: Mutex<Vec<String>>,
}

impl StubApiClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stub(mut self, path: &str, body: Value) -> Self {
        self.stubs.insert(path.to_string(), body);
        self
    }

    pub fn with_latency(mut self, ms: u64) -> Self {
        self.latency_ms = ms;
        self
    }

    /// Paths requested so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ApiClient for StubApiClient {
    async fn get_json(&self, path: &str, _auth: &AuthContext) -> Result<Value, ApiError> {
        let path = path.split('?').next().unwrap_or_default();
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_string());

        if self.latency_ms > 0 {
            utils::sleep(self.latency_ms).await;
        }

        self.stubs
            .get(path)
            .cloned()
            .ok_or_else(|| ApiError::NotStubbed(path.to_string()))
    }
}

/// ApiState
///
/// The shared handle to the API client held in the application state.
pub type ApiState = Arc<dyn ApiClient>;
