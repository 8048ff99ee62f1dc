use serde::{Deserialize, Serialize};
use std::{cmp::Reverse, fmt, str::FromStr};
use ts_rs::TS;
use utoipa::ToSchema;

use crate::views::View;

// --- Route Identity ---

/// RouteName
///
/// The closed set of named destinations in the console. The serialized form is the
/// name external navigation triggers use (`payment-methods`, `404`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum RouteName {
    Dashboard,
    Settings,
    Preferences,
    Users,
    Projects,
    Payments,
    PaymentMethods,
    Billing,
    PricingPlans,
    Faq,
    Login,
    Signup,
    RecoverPassword,
    RecoverPasswordEmail,
    #[serde(rename = "404")]
    NotFound,
}

impl RouteName {
    pub const ALL: [RouteName; 15] = [
        RouteName::Dashboard,
        RouteName::Settings,
        RouteName::Preferences,
        RouteName::Users,
        RouteName::Projects,
        RouteName::Payments,
        RouteName::PaymentMethods,
        RouteName::Billing,
        RouteName::PricingPlans,
        RouteName::Faq,
        RouteName::Login,
        RouteName::Signup,
        RouteName::RecoverPassword,
        RouteName::RecoverPasswordEmail,
        RouteName::NotFound,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RouteName::Dashboard => "dashboard",
            RouteName::Settings => "settings",
            RouteName::Preferences => "preferences",
            RouteName::Users => "users",
            RouteName::Projects => "projects",
            RouteName::Payments => "payments",
            RouteName::PaymentMethods => "payment-methods",
            RouteName::Billing => "billing",
            RouteName::PricingPlans => "pricing-plans",
            RouteName::Faq => "faq",
            RouteName::Login => "login",
            RouteName::Signup => "signup",
            RouteName::RecoverPassword => "recover-password",
            RouteName::RecoverPasswordEmail => "recover-password-email",
            RouteName::NotFound => "404",
        }
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown route name: {0}")]
pub struct UnknownRouteName(pub String);

impl FromStr for RouteName {
    type Err = UnknownRouteName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RouteName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownRouteName(s.to_string()))
    }
}

/// RouteMeta
///
/// Per-record metadata. On a match the metadata of every record in the matched
/// chain is merged, so children inherit `requires_auth` from their parent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
}

impl RouteMeta {
    fn merge(self, child: RouteMeta) -> RouteMeta {
        RouteMeta {
            requires_auth: self.requires_auth || child.requires_auth,
        }
    }
}

/// Target
///
/// What a record does once matched: render a view, or redirect to a named route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    View(View),
    Redirect(RouteName),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoutePath {
    Segment(&'static str),
    CatchAll,
}

// --- Declaration ---

/// RouteRecord
///
/// One node of the declared route tree. Records are built once with the
/// builder methods below and handed to `RouteTable::new`.
#[derive(Debug, Clone)]
pub struct RouteRecord {
    name: Option<RouteName>,
    path: RoutePath,
    target: Target,
    meta: RouteMeta,
    children: Vec<RouteRecord>,
}

impl RouteRecord {
    /// A record rendering `view` at `path`. Nested paths are relative to the parent.
    pub fn view(path: &'static str, view: View) -> Self {
        Self {
            name: None,
            path: RoutePath::Segment(path),
            target: Target::View(view),
            meta: RouteMeta::default(),
            children: Vec::new(),
        }
    }

    /// A record that sends any navigation reaching `path` to the route named `to`.
    pub fn redirect(path: &'static str, to: RouteName) -> Self {
        Self {
            target: Target::Redirect(to),
            ..Self::view(path, View::NotFound)
        }
    }

    /// Matches every path below its parent that no static record claims.
    pub fn catch_all(to: RouteName) -> Self {
        Self {
            path: RoutePath::CatchAll,
            ..Self::redirect("", to)
        }
    }

    pub fn named(mut self, name: RouteName) -> Self {
        self.name = Some(name);
        self
    }

    pub fn requires_auth(mut self) -> Self {
        self.meta.requires_auth = true;
        self
    }

    pub fn children(mut self, children: Vec<RouteRecord>) -> Self {
        self.children = children;
        self
    }
}

// --- Resolution ---

/// RouteMatch
///
/// The outcome of resolving a location: the matched record with its merged
/// metadata and the layouts of its ancestors, outermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub name: Option<RouteName>,
    /// Concrete path of the match. For a catch-all this is the normalized request.
    pub path: String,
    pub target: Target,
    pub meta: RouteMeta,
    pub layouts: Vec<View>,
}

impl RouteMatch {
    pub fn requires_auth(&self) -> bool {
        self.meta.requires_auth
    }

    pub fn is(&self, name: RouteName) -> bool {
        self.name == Some(name)
    }
}

#[derive(Debug, Clone)]
struct FlatRoute {
    name: Option<RouteName>,
    segments: Vec<&'static str>,
    catch_all: bool,
    target: Target,
    meta: RouteMeta,
    layouts: Vec<View>,
    depth: usize,
}

impl FlatRoute {
    fn full_path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    fn to_match(&self, path: String) -> RouteMatch {
        RouteMatch {
            name: self.name,
            path,
            target: self.target,
            meta: self.meta,
            layouts: self.layouts.clone(),
        }
    }

    fn matches(&self, segments: &[&str]) -> bool {
        if self.catch_all {
            segments.len() >= self.segments.len() && segments_eq(&self.segments, &segments[..self.segments.len()])
        } else {
            segments_eq(&self.segments, segments)
        }
    }
}

fn segments_eq(declared: &[&str], requested: &[&str]) -> bool {
    declared.len() == requested.len()
        && declared
            .iter()
            .zip(requested)
            .all(|(a, b)| a.eq_ignore_ascii_case(b))
}

/// Splits a location into its path segments, dropping the query string, the
/// hash and empty segments.
pub fn path_segments(location: &str) -> Vec<&str> {
    location
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Canonical form of a location's path: leading `/`, no trailing `/`.
pub fn normalize_path(location: &str) -> String {
    format!("/{}", path_segments(location).join("/"))
}

/// RouteTable
///
/// The declared route tree, flattened in declaration order at construction.
/// Immutable afterwards and safe to share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<FlatRoute>,
}

impl RouteTable {
    pub fn new(records: Vec<RouteRecord>) -> Self {
        let mut routes = Vec::new();
        for record in &records {
            flatten(record, &[], RouteMeta::default(), &[], 0, &mut routes);
        }

        debug_assert!(
            routes.iter().enumerate().all(|(i, route)| {
                route.name.is_none() || routes[..i].iter().all(|earlier| earlier.name != route.name)
            }),
            "route names must be unique"
        );

        Self { routes }
    }

    /// resolve
    ///
    /// Resolves a location to exactly one record. Static records win over
    /// catch-alls; among static records with the same full path the deepest wins,
    /// then the first declared. Returns `None` only when nothing matches and no
    /// catch-all covers the path.
    pub fn resolve(&self, location: &str) -> Option<RouteMatch> {
        let segments = path_segments(location);

        let exact = self
            .routes
            .iter()
            .enumerate()
            .filter(|(_, route)| !route.catch_all && route.matches(&segments))
            .min_by_key(|(order, route)| (Reverse(route.depth), *order));

        if let Some((_, route)) = exact {
            return Some(route.to_match(route.full_path()));
        }

        self.routes
            .iter()
            .enumerate()
            .filter(|(_, route)| route.catch_all && route.matches(&segments))
            .min_by_key(|(order, route)| (Reverse(route.segments.len()), *order))
            .map(|(_, route)| route.to_match(format!("/{}", segments.join("/"))))
    }

    /// Looks a route up by name, as redirects and guards do.
    pub fn by_name(&self, name: RouteName) -> Option<RouteMatch> {
        self.routes
            .iter()
            .find(|route| route.name == Some(name))
            .map(|route| route.to_match(route.full_path()))
    }

    /// Every named route in declaration order.
    pub fn named_routes(&self) -> impl Iterator<Item = RouteMatch> + '_ {
        self.routes
            .iter()
            .filter(|route| route.name.is_some())
            .map(|route| route.to_match(route.full_path()))
    }
}

fn flatten(
    record: &RouteRecord,
    parent_segments: &[&'static str],
    parent_meta: RouteMeta,
    parent_layouts: &[View],
    depth: usize,
    out: &mut Vec<FlatRoute>,
) {
    let mut segments = parent_segments.to_vec();
    let catch_all = match record.path {
        RoutePath::Segment(path) => {
            segments.extend(path.split('/').filter(|segment| !segment.is_empty()));
            false
        }
        RoutePath::CatchAll => true,
    };
    let meta = parent_meta.merge(record.meta);

    out.push(FlatRoute {
        name: record.name,
        segments: segments.clone(),
        catch_all,
        target: record.target,
        meta,
        layouts: parent_layouts.to_vec(),
        depth,
    });

    let mut layouts = parent_layouts.to_vec();
    if let Target::View(view) = record.target {
        layouts.push(view);
    }
    for child in &record.children {
        flatten(child, &segments, meta, &layouts, depth + 1, out);
    }
}
