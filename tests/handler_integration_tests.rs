use admin_console::{
    AppConfig, AppState, RouteName, StubApiClient, create_router,
    harness::{projects_stub, users_stub},
    models::{NavigationResponse, RouteSummary},
};
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use std::sync::Arc;
use tower::util::ServiceExt;

// --- Setup ---

fn app(api: StubApiClient) -> axum::Router {
    app_with_config(api, AppConfig::default())
}

fn app_with_config(api: StubApiClient, config: AppConfig) -> axum::Router {
    create_router(AppState::new(Arc::new(api), config))
}

async fn get(app: axum::Router, uri: &str, token: Option<&str>) -> Response {
    let mut request = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    app.oneshot(request.body(Body::empty()).unwrap()).await.unwrap()
}

async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("redirect carries a Location header")
}

// --- JSON API ---

#[tokio::test]
async fn test_health_check() {
    let response = get(app(StubApiClient::new()), "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "OK");
}

#[tokio::test]
async fn test_list_routes() {
    let response = get(app(StubApiClient::new()), "/api/routes", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let routes: Vec<RouteSummary> = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(routes.len(), RouteName::ALL.len());
    assert!(routes.contains(&RouteSummary {
        name: RouteName::Billing,
        path: "/payments/billing".to_string(),
        requires_auth: true,
    }));
    assert!(routes.contains(&RouteSummary {
        name: RouteName::Login,
        path: "/auth/login".to_string(),
        requires_auth: false,
    }));
    // "/" answers with the root redirect, so no listed route claims it.
    assert!(routes.iter().all(|route| route.path != "/"));
}

#[tokio::test]
async fn test_navigate_without_token() {
    let response = get(app(StubApiClient::new()), "/api/navigate?path=/dashboard", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let navigation: NavigationResponse =
        serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(navigation.route, Some(RouteName::Login));
    assert_eq!(navigation.path, "/auth/login");
    assert!(navigation.redirected);
    assert!(!navigation.requires_auth);
}

#[tokio::test]
async fn test_navigate_with_bearer_token() {
    let response = get(
        app(StubApiClient::new()),
        "/api/navigate?path=/auth/login",
        Some("abc"),
    )
    .await;

    let navigation: NavigationResponse =
        serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(navigation.route, Some(RouteName::Dashboard));
}

#[tokio::test]
async fn test_navigate_keeps_hash() {
    let response = get(
        app(StubApiClient::new()),
        "/api/navigate?path=/faq%23payments",
        Some("abc"),
    )
    .await;

    let navigation: NavigationResponse =
        serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(navigation.route, Some(RouteName::Faq));
    assert_eq!(navigation.hash.as_deref(), Some("#payments"));
    assert!(!navigation.redirected);
}

#[tokio::test]
async fn test_navigate_reads_token_cookie() {
    let request = Request::builder()
        .uri("/api/navigate?path=/payments/billing")
        .header(header::COOKIE, "report_token=abc")
        .body(Body::empty())
        .unwrap();
    let response = app(StubApiClient::new()).oneshot(request).await.unwrap();

    let navigation: NavigationResponse =
        serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(navigation.route, Some(RouteName::Billing));
    assert!(navigation.redirects.is_empty());
}

#[tokio::test]
async fn test_navigate_uses_configured_token_key() {
    let config = AppConfig {
        token_key: "session".to_string(),
        ..AppConfig::default()
    };
    let request = Request::builder()
        .uri("/api/navigate?path=/payments/billing")
        .header(header::COOKIE, "report_token=abc")
        .body(Body::empty())
        .unwrap();
    let response = app_with_config(StubApiClient::new(), config)
        .oneshot(request)
        .await
        .unwrap();

    let navigation: NavigationResponse =
        serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(navigation.route, Some(RouteName::Login));
}

#[tokio::test]
async fn test_navigate_requires_path() {
    let response = get(app(StubApiClient::new()), "/api/navigate", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// --- Pages ---

#[tokio::test]
async fn test_protected_page_redirects_to_login() {
    let response = get(app(StubApiClient::new()), "/dashboard", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/auth/login");
}

#[tokio::test]
async fn test_unknown_page_redirects_to_login() {
    let response = get(app(StubApiClient::new()), "/xyz", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/auth/login");
}

#[tokio::test]
async fn test_login_page_with_token_redirects_to_dashboard() {
    let response = get(app(StubApiClient::new()), "/auth/signup", Some("abc")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
}

#[tokio::test]
async fn test_login_page_renders_in_auth_layout() {
    let response = get(app(StubApiClient::new()), "/auth/login", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains(r#"<div class="auth-layout">"#));
    assert!(body.contains("page-login"));
    assert!(body.contains("<title>Login | Admin</title>"));
    assert!(!body.contains("sidebar"));
}

#[tokio::test]
async fn test_projects_page_loads_its_data() {
    let api = StubApiClient::new()
        .with_stub("/projects", projects_stub())
        .with_stub("/users", users_stub());
    let response = get(app(api), "/projects", Some("abc")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains(r#"<nav class="sidebar">"#));
    assert!(body.contains(r#"<p data-source="/projects">3 records</p>"#));
    assert!(body.contains(r#"<p data-source="/users">2 records</p>"#));
}

#[tokio::test]
async fn test_page_fails_when_its_data_is_unavailable() {
    let response = get(app(StubApiClient::new()), "/users", Some("abc")).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_payments_group_renders_empty_outlet() {
    let response = get(app(StubApiClient::new()), "/payments", Some("abc")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("<main></main>"));
    assert!(body.contains("<title>Admin</title>"));
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let response = get(app(StubApiClient::new()), "/health", None).await;
    assert!(response.headers().contains_key("x-request-id"));
}
