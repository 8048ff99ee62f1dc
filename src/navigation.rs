use serde::{Deserialize, Serialize};
use std::sync::Arc;
use ts_rs::TS;
use utoipa::ToSchema;

use crate::{
    auth::AuthContext,
    guard::{AuthGuard, Guard, GuardDecision},
    route::{RouteMatch, RouteName, RouteTable, Target, normalize_path},
};

pub const DEFAULT_MAX_REDIRECTS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    /// Nothing matched and the table has no catch-all for the path.
    #[error("no route matches {0}")]
    NoMatch(String),

    #[error("redirect to undeclared route {0}")]
    UnknownRoute(RouteName),

    #[error("navigation to {requested} exceeded {limit} redirects")]
    TooManyRedirects { requested: String, limit: usize },

    #[error("navigation to {0} was cancelled by a guard")]
    Cancelled(String),
}

/// Why a hop happened: a redirect record, or a guard decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum RedirectReason {
    Declared,
    Guard,
}

/// One hop of a redirect chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Redirect {
    pub from: String,
    pub to: RouteName,
    pub reason: RedirectReason,
}

/// Navigation
///
/// A committed navigation: where it was asked to go, where it ended, and how it got there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub requested: String,
    pub route: RouteMatch,
    pub redirects: Vec<Redirect>,
    /// The `#fragment` of the request, kept only when no redirect happened.
    pub hash: Option<String>,
}

impl Navigation {
    pub fn name(&self) -> Option<RouteName> {
        self.route.name
    }

    pub fn was_redirected(&self) -> bool {
        !self.redirects.is_empty()
    }
}

/// Navigator
///
/// Runs every navigation through route resolution and the guard.
///
/// Redirect records are followed without consulting the guard; the guard then runs on
/// the first record that renders something, and again on every target it redirects to.
/// The chain is capped so two disagreeing guards cannot ping-pong forever.
pub struct Navigator<G = AuthGuard> {
    table: Arc<RouteTable>,
    guard: G,
    max_redirects: usize,
}

impl Navigator<AuthGuard> {
    pub fn new(table: Arc<RouteTable>) -> Self {
        Self::with_guard(table, AuthGuard::default())
    }
}

impl<G: Guard> Navigator<G> {
    pub fn with_guard(table: Arc<RouteTable>, guard: G) -> Self {
        Self {
            table,
            guard,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }

    pub fn max_redirects(mut self, limit: usize) -> Self {
        self.max_redirects = limit;
        self
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// navigate
    ///
    /// Resolves `location` (path, optional query and `#hash`) for the given
    /// authentication state. `from` is the route currently shown, if any.
    pub fn navigate(
        &self,
        location: &str,
        from: Option<&RouteMatch>,
        auth: &AuthContext,
    ) -> Result<Navigation, NavigationError> {
        let requested = normalize_path(location);
        let mut current = self
            .table
            .resolve(location)
            .ok_or_else(|| NavigationError::NoMatch(requested.clone()))?;
        let mut redirects: Vec<Redirect> = Vec::new();

        loop {
            let target = current.target;
            let (to, reason) = match target {
                Target::Redirect(to) => (to, RedirectReason::Declared),
                Target::View(_) => match self.guard.check(&current, from, auth) {
                    GuardDecision::Allow => {
                        let hash = redirects
                            .is_empty()
                            .then(|| location.split_once('#').map(|(_, hash)| hash))
                            .flatten()
                            .filter(|hash| !hash.is_empty())
                            .map(|hash| format!("#{hash}"));

                        return Ok(Navigation {
                            requested,
                            route: current,
                            redirects,
                            hash,
                        });
                    }
                    GuardDecision::Redirect(to) => (to, RedirectReason::Guard),
                    GuardDecision::Cancel => {
                        tracing::debug!(path = %current.path, "navigation cancelled by guard");
                        return Err(NavigationError::Cancelled(current.path));
                    }
                },
            };

            if redirects.len() >= self.max_redirects {
                tracing::warn!(%requested, limit = self.max_redirects, "redirect chain too long");
                return Err(NavigationError::TooManyRedirects {
                    requested,
                    limit: self.max_redirects,
                });
            }

            tracing::debug!(from = %current.path, %to, ?reason, "navigation redirected");
            redirects.push(Redirect {
                from: current.path.clone(),
                to,
                reason,
            });
            current = self
                .table
                .by_name(to)
                .ok_or(NavigationError::UnknownRoute(to))?;
        }
    }
}

// --- Scroll Restoration ---

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollPosition {
    pub left: f64,
    pub top: f64,
}

/// Where the viewport goes once a navigation commits.
#[derive(Debug, Clone, PartialEq)]
pub enum ScrollTarget {
    /// Back/forward navigation: return to where the user was.
    Restore(ScrollPosition),
    /// Smooth-scroll to the element matching the selector.
    Anchor(String),
    Top,
}

pub fn scroll_behavior(to: &Navigation, saved: Option<ScrollPosition>) -> ScrollTarget {
    if let Some(position) = saved {
        return ScrollTarget::Restore(position);
    }

    match &to.hash {
        Some(hash) => ScrollTarget::Anchor(hash.clone()),
        None => ScrollTarget::Top,
    }
}
