use serde_json::Value;
use std::collections::BTreeMap;

use crate::route::{RouteMatch, Target};

/// Data fetched for a page, keyed by the API path it came from.
pub type PageData = BTreeMap<String, Value>;

/// View
///
/// Every component the route table can point at: the three layouts and the pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    AppLayout,
    AuthLayout,
    /// Renders only its child outlet.
    RouterBypass,
    Dashboard,
    Settings,
    Preferences,
    Users,
    Projects,
    PaymentMethods,
    Billing,
    PricingPlans,
    Faq,
    Login,
    Signup,
    RecoverPassword,
    CheckTheEmail,
    NotFound,
}

// Sidebar entries of the admin layout.
const MENU: [(&str, &str); 8] = [
    ("/dashboard", "Dashboard"),
    ("/projects", "Projects"),
    ("/users", "Users"),
    ("/payments/payment-methods", "Payment methods"),
    ("/payments/billing", "Billing"),
    ("/payments/pricing-plans", "Pricing plans"),
    ("/settings", "Settings"),
    ("/faq", "FAQ"),
];

impl View {
    pub fn title(self) -> &'static str {
        match self {
            View::AppLayout | View::AuthLayout | View::RouterBypass => "",
            View::Dashboard => "Dashboard",
            View::Settings => "Settings",
            View::Preferences => "Preferences",
            View::Users => "Users",
            View::Projects => "Projects",
            View::PaymentMethods => "Payment methods",
            View::Billing => "Billing",
            View::PricingPlans => "Pricing plans",
            View::Faq => "FAQ",
            View::Login => "Login",
            View::Signup => "Sign up",
            View::RecoverPassword => "Recover password",
            View::CheckTheEmail => "Check the email",
            View::NotFound => "Page not found",
        }
    }

    /// API paths the page loads before it can render.
    pub fn data_requests(self) -> &'static [&'static str] {
        match self {
            View::Users => &["/users"],
            View::Projects => &["/projects", "/users"],
            _ => &[],
        }
    }

    fn slug(self) -> &'static str {
        match self {
            View::AppLayout => "app-layout",
            View::AuthLayout => "auth-layout",
            View::RouterBypass => "router-bypass",
            View::Dashboard => "dashboard",
            View::Settings => "settings",
            View::Preferences => "preferences",
            View::Users => "users",
            View::Projects => "projects",
            View::PaymentMethods => "payment-methods",
            View::Billing => "billing",
            View::PricingPlans => "pricing-plans",
            View::Faq => "faq",
            View::Login => "login",
            View::Signup => "signup",
            View::RecoverPassword => "recover-password",
            View::CheckTheEmail => "check-the-email",
            View::NotFound => "not-found",
        }
    }

    /// Wraps `outlet` in this view. Pages ignore the outlet, layouts place it.
    fn render(self, outlet: &str, data: &PageData) -> String {
        match self {
            View::RouterBypass => outlet.to_string(),
            View::AppLayout => {
                let links: String = MENU
                    .iter()
                    .map(|(href, label)| format!(r#"<a href="{href}">{label}</a>"#))
                    .collect();
                format!(
                    r#"<div class="app-layout"><nav class="sidebar">{links}</nav><main>{outlet}</main></div>"#
                )
            }
            View::AuthLayout => format!(r#"<div class="auth-layout">{outlet}</div>"#),
            page => {
                let sources: String = page
                    .data_requests()
                    .iter()
                    .filter_map(|path| data.get(*path).map(|body| (path, body)))
                    .map(|(path, body)| {
                        format!(
                            r#"<p data-source="{path}">{} records</p>"#,
                            record_count(body)
                        )
                    })
                    .collect();
                format!(
                    r#"<section class="page page-{}"><h1>{}</h1>{sources}</section>"#,
                    page.slug(),
                    page.title()
                )
            }
        }
    }
}

fn record_count(body: &Value) -> usize {
    match body {
        Value::Array(items) => items.len(),
        Value::Object(fields) => fields
            .get("data")
            .and_then(Value::as_array)
            .map_or(fields.len(), Vec::len),
        Value::Null => 0,
        _ => 1,
    }
}

/// render_document
///
/// Renders a matched route inside its layouts as a full HTML document.
/// Returns `None` for redirect records, which have nothing to show.
pub fn render_document(route: &RouteMatch, data: &PageData) -> Option<String> {
    let Target::View(view) = route.target else {
        return None;
    };

    let body = route
        .layouts
        .iter()
        .rev()
        .fold(view.render("", data), |inner, layout| layout.render(&inner, data));

    let title = match view.title() {
        "" => "Admin".to_string(),
        title => format!("{title} | Admin"),
    };

    Some(format!(
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>{title}</title></head><body>{body}</body></html>"
    ))
}
