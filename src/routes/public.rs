use crate::{
    route::{RouteName, RouteRecord},
    views::View,
};

/// Public Route Module
///
/// The sign-in area under `/auth`. Nothing here requires a session; the guard instead
/// keeps signed-in users away from `login` and `signup`.
pub fn auth_routes() -> RouteRecord {
    RouteRecord::view("/auth", View::AuthLayout).children(vec![
        RouteRecord::view("login", View::Login).named(RouteName::Login),
        RouteRecord::view("signup", View::Signup).named(RouteName::Signup),
        RouteRecord::view("recover-password", View::RecoverPassword)
            .named(RouteName::RecoverPassword),
        RouteRecord::view("recover-password-email", View::CheckTheEmail)
            .named(RouteName::RecoverPasswordEmail),
        // Bare "/auth" goes straight to the login form.
        RouteRecord::redirect("", RouteName::Login),
    ])
}
