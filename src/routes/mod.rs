use crate::{
    route::{RouteName, RouteRecord, RouteTable},
    views::View,
};

/// Route Table Module
///
/// Declares the console's navigable surface, segregated the same way the access rules are:
/// - `admin`: the authenticated area, mounted at `/` and flagged `requires_auth`.
/// - `public`: the sign-in area under `/auth`, open to everyone.
///
/// The top level adds the root redirect, the not-found page and the catch-all.
pub mod admin;
pub mod public;

/// route_table
///
/// Builds the application's route table. Called once at start-up; the result is shared
/// read-only by every navigation.
pub fn route_table() -> RouteTable {
    RouteTable::new(vec![
        // "/" always lands on the login page. Signed-in users are bounced onward by the guard.
        RouteRecord::redirect("/", RouteName::Login),
        // Unknown paths are not an error, they go to login as well.
        RouteRecord::catch_all(RouteName::Login),
        admin::admin_routes(),
        public::auth_routes(),
        RouteRecord::view("/404", View::NotFound).named(RouteName::NotFound),
    ])
}
