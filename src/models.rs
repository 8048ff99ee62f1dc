use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

use crate::{
    navigation::{Navigation, Redirect},
    route::{RouteMatch, RouteName},
};

// --- Response Schemas ---

/// RouteSummary
///
/// One entry of the public route surface (GET /api/routes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct RouteSummary {
    pub name: RouteName,
    pub path: String,
    pub requires_auth: bool,
}

impl RouteSummary {
    /// Summarizes a named match; unnamed records are not part of the surface.
    pub fn from_match(route: &RouteMatch) -> Option<Self> {
        Some(Self {
            name: route.name?,
            path: route.path.clone(),
            requires_auth: route.requires_auth(),
        })
    }
}

/// NavigationResponse
///
/// The outcome of a navigation as reported by GET /api/navigate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct NavigationResponse {
    /// Normalized path that was asked for.
    pub requested: String,
    /// Name of the route the navigation settled on. Unnamed only for unnamed views.
    pub route: Option<RouteName>,
    /// Path of the route the navigation settled on.
    pub path: String,
    pub requires_auth: bool,
    pub redirected: bool,
    pub redirects: Vec<Redirect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

impl From<&Navigation> for NavigationResponse {
    fn from(navigation: &Navigation) -> Self {
        Self {
            requested: navigation.requested.clone(),
            route: navigation.name(),
            path: navigation.route.path.clone(),
            requires_auth: navigation.route.requires_auth(),
            redirected: navigation.was_redirected(),
            redirects: navigation.redirects.clone(),
            hash: navigation.hash.clone(),
        }
    }
}
