use crate::{
    auth::AuthContext,
    route::{RouteMatch, RouteName},
};

/// GuardDecision
///
/// What a guard wants done with a pending navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(RouteName),
    Cancel,
}

/// Guard
///
/// Evaluated before a navigation commits. `from` is the route being left, if any.
pub trait Guard: Send + Sync {
    fn check(&self, to: &RouteMatch, from: Option<&RouteMatch>, auth: &AuthContext) -> GuardDecision;
}

impl<F> Guard for F
where
    F: Fn(&RouteMatch, Option<&RouteMatch>, &AuthContext) -> GuardDecision + Send + Sync,
{
    fn check(&self, to: &RouteMatch, from: Option<&RouteMatch>, auth: &AuthContext) -> GuardDecision {
        self(to, from, auth)
    }
}

/// AuthGuard
///
/// The console's global guard. Rules, first match wins:
/// 1. a target that requires auth, without a token, goes to `login`;
/// 2. `login` or `signup` with a token goes to `home`;
/// 3. anything else proceeds.
#[derive(Debug, Clone)]
pub struct AuthGuard {
    pub login: RouteName,
    pub home: RouteName,
}

impl Default for AuthGuard {
    fn default() -> Self {
        Self {
            login: RouteName::Login,
            home: RouteName::Dashboard,
        }
    }
}

impl Guard for AuthGuard {
    fn check(&self, to: &RouteMatch, _from: Option<&RouteMatch>, auth: &AuthContext) -> GuardDecision {
        if to.requires_auth() && !auth.is_authenticated() {
            return GuardDecision::Redirect(self.login);
        }

        if (to.is(RouteName::Login) || to.is(RouteName::Signup)) && auth.is_authenticated() {
            return GuardDecision::Redirect(self.home);
        }

        GuardDecision::Allow
    }
}
