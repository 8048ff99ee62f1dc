use admin_console::{
    AuthContext, GuardDecision, NavigationError, Navigator, RouteMatch, RouteName,
    navigation::{Redirect, RedirectReason, ScrollPosition, ScrollTarget, scroll_behavior},
    route::{RouteRecord, RouteTable},
    routes::route_table,
    views::View,
};
use std::sync::Arc;

fn navigator() -> Navigator {
    Navigator::new(Arc::new(route_table()))
}

fn final_route(path: &str, auth: &AuthContext) -> Option<RouteName> {
    navigator().navigate(path, None, auth).unwrap().name()
}

// --- Scenarios ---

#[test]
fn test_dashboard_without_token_lands_on_login() {
    let navigation = navigator()
        .navigate("/dashboard", None, &AuthContext::anonymous())
        .unwrap();

    assert_eq!(navigation.name(), Some(RouteName::Login));
    assert_eq!(navigation.route.path, "/auth/login");
    assert_eq!(
        navigation.redirects,
        vec![Redirect {
            from: "/dashboard".to_string(),
            to: RouteName::Login,
            reason: RedirectReason::Guard,
        }]
    );
}

#[test]
fn test_login_with_token_lands_on_dashboard() {
    let navigation = navigator()
        .navigate("/auth/login", None, &AuthContext::with_token("abc"))
        .unwrap();

    assert_eq!(navigation.name(), Some(RouteName::Dashboard));
    assert_eq!(navigation.route.path, "/dashboard");
    assert!(navigation.was_redirected());
}

#[test]
fn test_billing_with_token_is_not_redirected() {
    let navigation = navigator()
        .navigate("/payments/billing", None, &AuthContext::with_token("abc"))
        .unwrap();

    assert_eq!(navigation.name(), Some(RouteName::Billing));
    assert!(!navigation.was_redirected());
    assert_eq!(navigation.requested, "/payments/billing");
}

#[test]
fn test_unknown_path_lands_on_login() {
    let navigation = navigator()
        .navigate("/xyz", None, &AuthContext::anonymous())
        .unwrap();

    assert_eq!(navigation.name(), Some(RouteName::Login));
    assert_eq!(navigation.redirects[0].reason, RedirectReason::Declared);
}

// --- Properties ---

#[test]
fn test_protected_routes_need_a_token() {
    let anonymous = AuthContext::anonymous();
    let signed_in = AuthContext::with_token("abc");

    let protected = navigator()
        .table()
        .named_routes()
        .filter(|route| route.requires_auth())
        .collect::<Vec<_>>();
    assert_eq!(protected.len(), 10);

    for route in protected {
        assert_eq!(final_route(&route.path, &anonymous), Some(RouteName::Login), "{}", route.path);
        assert_eq!(final_route(&route.path, &signed_in), route.name, "{}", route.path);
    }
}

#[test]
fn test_root_redirects_through_login_regardless_of_token() {
    let anonymous = navigator()
        .navigate("/", None, &AuthContext::anonymous())
        .unwrap();
    assert_eq!(anonymous.name(), Some(RouteName::Login));

    let signed_in = navigator()
        .navigate("/", None, &AuthContext::with_token("abc"))
        .unwrap();
    assert_eq!(
        signed_in.redirects.iter().map(|hop| (hop.to, hop.reason)).collect::<Vec<_>>(),
        vec![
            (RouteName::Login, RedirectReason::Declared),
            (RouteName::Dashboard, RedirectReason::Guard),
        ]
    );
}

#[test]
fn test_unknown_paths_with_token_end_on_dashboard() {
    for path in ["/xyz", "/control-de-pagos", "/auth"] {
        assert_eq!(
            final_route(path, &AuthContext::with_token("abc")),
            Some(RouteName::Dashboard),
            "{path}"
        );
    }
}

#[test]
fn test_public_pages_stay_put() {
    for auth in [AuthContext::anonymous(), AuthContext::with_token("abc")] {
        assert_eq!(final_route("/auth/recover-password", &auth), Some(RouteName::RecoverPassword));
        assert_eq!(final_route("/404", &auth), Some(RouteName::NotFound));
    }
    assert_eq!(
        final_route("/auth/signup", &AuthContext::anonymous()),
        Some(RouteName::Signup)
    );
}

// --- Failure Modes ---

fn ping_pong(to: &RouteMatch, _from: Option<&RouteMatch>, _auth: &AuthContext) -> GuardDecision {
    if to.is(RouteName::Dashboard) {
        GuardDecision::Redirect(RouteName::Faq)
    } else {
        GuardDecision::Redirect(RouteName::Dashboard)
    }
}

fn no_billing(to: &RouteMatch, _from: Option<&RouteMatch>, _auth: &AuthContext) -> GuardDecision {
    if to.is(RouteName::Billing) {
        GuardDecision::Cancel
    } else {
        GuardDecision::Allow
    }
}

#[test]
fn test_redirect_loops_are_cut_off() {
    let navigator = Navigator::with_guard(Arc::new(route_table()), ping_pong).max_redirects(3);
    let result = navigator.navigate("/dashboard", None, &AuthContext::with_token("abc"));

    assert_eq!(
        result.unwrap_err(),
        NavigationError::TooManyRedirects {
            requested: "/dashboard".to_string(),
            limit: 3,
        }
    );
}

#[test]
fn test_guard_can_cancel() {
    let navigator = Navigator::with_guard(Arc::new(route_table()), no_billing);

    assert_eq!(
        navigator
            .navigate("/payments/billing", None, &AuthContext::anonymous())
            .unwrap_err(),
        NavigationError::Cancelled("/payments/billing".to_string())
    );
    assert!(navigator.navigate("/faq", None, &AuthContext::anonymous()).is_ok());
}

#[test]
fn test_redirect_to_undeclared_route() {
    let table = RouteTable::new(vec![RouteRecord::redirect("/", RouteName::Login)]);
    let navigator = Navigator::new(Arc::new(table));

    assert_eq!(
        navigator.navigate("/", None, &AuthContext::anonymous()).unwrap_err(),
        NavigationError::UnknownRoute(RouteName::Login)
    );
}

#[test]
fn test_no_match_without_catch_all() {
    let table = RouteTable::new(vec![
        RouteRecord::view("/faq", View::Faq).named(RouteName::Faq),
    ]);
    let navigator = Navigator::new(Arc::new(table));

    assert_eq!(
        navigator.navigate("/nothing/", None, &AuthContext::anonymous()).unwrap_err(),
        NavigationError::NoMatch("/nothing".to_string())
    );
}

// --- Hash & Scroll ---

#[test]
fn test_hash_is_kept_and_scrolled_to() {
    let navigation = navigator()
        .navigate("/faq#billing", None, &AuthContext::with_token("abc"))
        .unwrap();

    assert_eq!(navigation.hash.as_deref(), Some("#billing"));
    assert_eq!(
        scroll_behavior(&navigation, None),
        ScrollTarget::Anchor("#billing".to_string())
    );
}

#[test]
fn test_saved_position_wins_over_hash() {
    let navigation = navigator()
        .navigate("/faq#billing", None, &AuthContext::with_token("abc"))
        .unwrap();
    let saved = ScrollPosition { left: 0.0, top: 420.0 };

    assert_eq!(scroll_behavior(&navigation, Some(saved)), ScrollTarget::Restore(saved));
}

#[test]
fn test_redirect_drops_the_hash() {
    let navigation = navigator()
        .navigate("/faq#billing", None, &AuthContext::anonymous())
        .unwrap();

    assert_eq!(navigation.hash, None);
    assert_eq!(scroll_behavior(&navigation, None), ScrollTarget::Top);
}
