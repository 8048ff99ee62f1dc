use crate::{
    route::{RouteName, RouteRecord},
    views::View,
};

/// Admin Route Module
///
/// The authenticated area of the console. The `requires_auth` flag is declared once on
/// the layout record; every child inherits it through metadata merging, so a page added
/// here is protected without further wiring. The layout itself stays unnamed: it shares
/// `/` with the root redirect and is only ever shown around one of its children.
pub fn admin_routes() -> RouteRecord {
    RouteRecord::view("/", View::AppLayout)
        .requires_auth()
        .children(vec![
            RouteRecord::view("dashboard", View::Dashboard).named(RouteName::Dashboard),
            RouteRecord::view("settings", View::Settings).named(RouteName::Settings),
            RouteRecord::view("preferences", View::Preferences).named(RouteName::Preferences),
            RouteRecord::view("users", View::Users).named(RouteName::Users),
            RouteRecord::view("projects", View::Projects).named(RouteName::Projects),
            payment_routes(),
            RouteRecord::view("faq", View::Faq).named(RouteName::Faq),
        ])
}

/// The payments group renders no page of its own, only an outlet for its children.
fn payment_routes() -> RouteRecord {
    RouteRecord::view("payments", View::RouterBypass)
        .named(RouteName::Payments)
        .children(vec![
            RouteRecord::view("payment-methods", View::PaymentMethods)
                .named(RouteName::PaymentMethods),
            RouteRecord::view("billing", View::Billing).named(RouteName::Billing),
            RouteRecord::view("pricing-plans", View::PricingPlans).named(RouteName::PricingPlans),
        ])
}
