//! # Protected-Area Gate
//!
//! Decides which route a requested path actually renders.

use domains::Route;

use crate::state::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Render(Route),
    Redirect(Route),
}

impl RouteDecision {
    /// The route that ends up on screen.
    pub fn route(self) -> Route {
        match self {
            RouteDecision::Render(route) | RouteDecision::Redirect(route) => route,
        }
    }
}

/// Unknown paths fall through to the feed root, which in turn sends
/// signed-out sessions to sign-in. Signed-in sessions are kept away from
/// the sign-in and sign-up pages.
pub fn guard(path: &str, session: Session) -> RouteDecision {
    let requested = Route::from_path(path);
    let target = requested.unwrap_or(Route::Feed);

    let decided = if target.requires_session() && !session.authenticated {
        Route::SignIn
    } else if target.is_auth_page() && session.authenticated {
        Route::Feed
    } else {
        target
    };

    if requested == Some(decided) {
        RouteDecision::Render(decided)
    } else {
        RouteDecision::Redirect(decided)
    }
}
