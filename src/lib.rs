use axum::{
    Router,
    extract::FromRef,
    http::HeaderName,
    routing::get,
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Navigation core: route records, the declared table, the guard and the navigator.
pub mod route;
pub mod routes;
pub mod guard;
pub mod navigation;

// Session state and where it is read from.
pub mod auth;
pub mod storage;

// Pages, their data source and the HTTP shell.
pub mod views;
pub mod api;
pub mod handlers;
pub mod models;

pub mod config;
pub mod harness;
pub mod utils;

// --- Public Re-exports ---

pub use api::{ApiState, HttpApiClient, StubApiClient};
pub use auth::AuthContext;
pub use config::AppConfig;
pub use guard::{AuthGuard, Guard, GuardDecision};
pub use navigation::{Navigation, NavigationError, Navigator};
pub use route::{RouteMatch, RouteName, RouteTable};

/// ApiDoc
///
/// OpenAPI document of the JSON endpoints, served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(handlers::list_routes, handlers::navigate),
    components(
        schemas(
            models::RouteSummary, models::NavigationResponse, navigation::Redirect,
            navigation::RedirectReason, route::RouteName,
        )
    ),
    tags(
        (name = "admin-console", description = "Admin console navigation API")
    )
)]
struct ApiDoc;

/// The shared navigator. The route table inside it is built once at start-up.
pub type NavigatorState = Arc<Navigator>;

/// AppState
///
/// The single immutable container shared by every request.
#[derive(Clone)]
pub struct AppState {
    /// Backend the pages load their data from.
    pub api: ApiState,
    /// Route table plus the auth guard.
    pub navigator: NavigatorState,
    pub config: AppConfig,
}

impl AppState {
    /// Builds the state around the application route table.
    pub fn new(api: ApiState, config: AppConfig) -> Self {
        let navigator = Navigator::new(Arc::new(routes::route_table()))
            .max_redirects(config.max_redirects);

        Self {
            api,
            navigator: Arc::new(navigator),
            config,
        }
    }
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for ApiState {
    fn from_ref(app_state: &AppState) -> ApiState {
        app_state.api.clone()
    }
}

impl FromRef<AppState> for NavigatorState {
    fn from_ref(app_state: &AppState) -> NavigatorState {
        app_state.navigator.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Assembles the shell: health check, JSON navigation API, Swagger UI, and the page
/// fallback that renders (or redirects) every other path.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    let api_routes = Router::new()
        .route("/routes", get(handlers::list_routes))
        .route("/navigate", get(handlers::navigate));

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(handlers::health))
        .nest("/api", api_routes)
        // Everything else is a page of the console.
        .fallback(handlers::render_page)
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Span for one HTTP request, correlated by its `x-request-id`.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
