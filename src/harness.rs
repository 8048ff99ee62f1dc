//! Page-mock scenarios.
//!
//! Each scenario names a page URL and the API responses it should see. The harness serves
//! the whole console in-process with a [`StubApiClient`] built from those responses, so a
//! page load never reaches the network, then follows redirects until a page answers.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::util::ServiceExt;

use crate::{AppConfig, AppState, StubApiClient, create_router};

/// Redirects a single page load may follow before the harness gives up.
pub const MAX_PAGE_REDIRECTS: usize = 10;

#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("redirect from {0} has no usable Location header")]
    BadRedirect(String),

    #[error("{url} did not settle after {limit} redirects")]
    RedirectLoop { url: String, limit: usize },

    #[error("invalid request: {0}")]
    Request(#[from] axum::http::Error),

    #[error("failed to read response body: {0}")]
    Body(#[from] axum::Error),
}

/// PageMock
///
/// A named page scenario: the URL to open and the stubbed API bodies keyed by request path.
#[derive(Debug, Clone)]
pub struct PageMock {
    pub name: &'static str,
    pub url: &'static str,
    pub api_mocks: Vec<(&'static str, Value)>,
}

impl PageMock {
    pub fn new(name: &'static str, url: &'static str) -> Self {
        Self {
            name,
            url,
            api_mocks: Vec::new(),
        }
    }

    pub fn with_mock(mut self, path: &'static str, body: Value) -> Self {
        self.api_mocks.push((path, body));
        self
    }

    /// The stub API answering this scenario's mocked paths.
    pub fn stub_api(&self) -> StubApiClient {
        self.api_mocks
            .iter()
            .fold(StubApiClient::new(), |api, (path, body)| {
                api.with_stub(path, body.clone())
            })
    }

    /// The full console wired to this scenario's stub API.
    pub fn app(&self, config: AppConfig) -> Router {
        let state = AppState::new(Arc::new(self.stub_api()), config);
        create_router(state)
    }
}

/// PageLoad
///
/// What a browser would end up showing after opening a URL.
#[derive(Debug)]
pub struct PageLoad {
    pub status: StatusCode,
    pub final_path: String,
    /// Every Location followed, in order.
    pub hops: Vec<String>,
    pub body: String,
}

impl PageLoad {
    pub fn is_ok(&self) -> bool {
        self.status.is_success()
    }
}

pub fn projects_stub() -> Value {
    json!({
        "data": [
            { "id": 1, "project_name": "Hash rate report", "project_owner": 1, "team": [1, 2], "status": "in progress" },
            { "id": 2, "project_name": "Pool payouts", "project_owner": 2, "team": [2], "status": "important" },
            { "id": 3, "project_name": "Fee audit", "project_owner": 1, "team": [1], "status": "completed" }
        ],
        "pagination": { "page": 1, "perPage": 10, "total": 3 }
    })
}

pub fn users_stub() -> Value {
    json!({
        "data": [
            { "id": 1, "fullname": "Ana Torres", "email": "ana@example.com", "username": "ana", "role": "admin", "active": true },
            { "id": 2, "fullname": "Luis Pérez", "email": "luis@example.com", "username": "luis", "role": "user", "active": true }
        ],
        "pagination": { "page": 1, "perPage": 10, "total": 2 }
    })
}

/// page_mocks
///
/// The standard page scenarios, one per navigable page plus a few redirecting URLs.
pub fn page_mocks() -> Vec<PageMock> {
    vec![
        PageMock::new("Dashboard", "/dashboard"),
        PageMock::new("Settings", "/settings"),
        PageMock::new("Preferences", "/preferences"),
        PageMock::new("control-de-pagos", "/control-de-pagos")
            .with_mock("/projects", projects_stub())
            .with_mock("/control-de-pagos", users_stub()),
        PageMock::new("Users", "/users").with_mock("/users", users_stub()),
        PageMock::new("Projects", "/projects")
            .with_mock("/projects", projects_stub())
            .with_mock("/users", users_stub()),
        PageMock::new("Payments", "/payments"),
        PageMock::new("Payment Methods", "/payments/payment-methods"),
        PageMock::new("Billing", "/payments/billing"),
        PageMock::new("Pricing Plans", "/payments/pricing-plans"),
        PageMock::new("FAQ", "/faq"),
        PageMock::new("Auth", "/auth"),
        PageMock::new("Login", "/auth/login"),
        PageMock::new("Sign Up", "/auth/signup"),
        PageMock::new("Recover Password", "/auth/recover-password"),
        PageMock::new("Recover Password Email", "/auth/recover-password-email"),
        PageMock::new("404", "/404"),
    ]
}

/// load_page
///
/// Opens `url` against `app` with an optional session token, following redirects.
pub async fn load_page(
    app: Router,
    url: &str,
    token: Option<&str>,
) -> Result<PageLoad, HarnessError> {
    let mut current = url.to_string();
    let mut hops = Vec::new();

    for _ in 0..=MAX_PAGE_REDIRECTS {
        let mut request = Request::builder().method("GET").uri(current.as_str());
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = app
            .clone()
            .oneshot(request.body(Body::empty())?)
            .await
            .unwrap_or_else(|never| match never {});

        if response.status().is_redirection() {
            let location = response
                .headers()
                .get(header::LOCATION)
                .and_then(|value| value.to_str().ok())
                .ok_or_else(|| HarnessError::BadRedirect(current.clone()))?
                .to_string();
            tracing::debug!(from = %current, to = %location, "page redirected");
            hops.push(location.clone());
            current = location;
            continue;
        }

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;

        return Ok(PageLoad {
            status,
            final_path: current,
            hops,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        });
    }

    Err(HarnessError::RedirectLoop {
        url: url.to_string(),
        limit: MAX_PAGE_REDIRECTS,
    })
}
