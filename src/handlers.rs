use crate::{
    AppState, NavigatorState,
    auth::Session,
    models::{NavigationResponse, RouteSummary},
    navigation::NavigationError,
    route::Target,
    views::{self, PageData},
};
use axum::{
    Json,
    extract::{Query, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

// --- Query Structs ---

/// NavigateQuery
///
/// Query parameters of GET /api/navigate.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct NavigateQuery {
    /// Location to navigate to, e.g. `/payments/billing` or `/faq#billing`.
    pub path: String,
}

/// status_for
///
/// Maps navigation failures to HTTP statuses. Unmatched paths and missing tokens never
/// get here; those are ordinary redirects.
fn status_for(error: &NavigationError) -> StatusCode {
    match error {
        NavigationError::NoMatch(_) => StatusCode::NOT_FOUND,
        NavigationError::Cancelled(_) => StatusCode::CONFLICT,
        NavigationError::UnknownRoute(_) | NavigationError::TooManyRedirects { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

// --- Handlers ---

pub async fn health() -> &'static str {
    "OK"
}

/// list_routes
///
/// Lists every named route with its path and whether it needs a session.
#[utoipa::path(
    get,
    path = "/api/routes",
    responses((status = 200, description = "Named routes", body = [RouteSummary]))
)]
pub async fn list_routes(State(navigator): State<NavigatorState>) -> Json<Vec<RouteSummary>> {
    let routes = navigator
        .table()
        .named_routes()
        .filter_map(|route| RouteSummary::from_match(&route))
        .collect();
    Json(routes)
}

/// navigate
///
/// Runs a navigation for the caller's session without rendering anything.
#[utoipa::path(
    get,
    path = "/api/navigate",
    params(NavigateQuery),
    responses(
        (status = 200, description = "Navigation outcome", body = NavigationResponse),
        (status = 404, description = "No route matches"),
        (status = 409, description = "Cancelled by a guard"),
        (status = 500, description = "Broken redirect chain")
    )
)]
pub async fn navigate(
    Session(auth): Session,
    State(navigator): State<NavigatorState>,
    Query(query): Query<NavigateQuery>,
) -> Result<Json<NavigationResponse>, StatusCode> {
    let navigation = navigator
        .navigate(&query.path, None, &auth)
        .map_err(|e| {
            tracing::warn!(path = %query.path, error = %e, "navigation failed");
            status_for(&e)
        })?;

    Ok(Json(NavigationResponse::from(&navigation)))
}

/// render_page
///
/// Serves every path the other routes do not claim. The path is navigated for the caller's
/// session; a redirected navigation answers 303 to the final path, otherwise the page's data
/// is loaded from the API and the page is rendered inside its layouts.
pub async fn render_page(
    Session(auth): Session,
    State(state): State<AppState>,
    uri: Uri,
) -> Response {
    let navigation = match state.navigator.navigate(uri.path(), None, &auth) {
        Ok(navigation) => navigation,
        Err(e) => {
            tracing::warn!(path = %uri.path(), error = %e, "navigation failed");
            return status_for(&e).into_response();
        }
    };

    if navigation.was_redirected() {
        tracing::debug!(from = %uri.path(), to = %navigation.route.path, "redirecting page request");
        return Redirect::to(&navigation.route.path).into_response();
    }

    let mut data = PageData::new();
    if let Target::View(view) = navigation.route.target {
        for path in view.data_requests() {
            match state.api.get_json(path, &auth).await {
                Ok(body) => {
                    data.insert(path.to_string(), body);
                }
                Err(e) => {
                    tracing::error!(page = %navigation.route.path, error = %e, "page data unavailable");
                    return StatusCode::BAD_GATEWAY.into_response();
                }
            }
        }
    }

    match views::render_document(&navigation.route, &data) {
        Some(document) => Html(document).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
