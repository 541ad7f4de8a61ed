//! Route table of the client.
//!
//! Three logical paths plus a catch-all that resolves to the feed root.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    /// `/`, the photo feed. Requires an authenticated session.
    Feed,
    /// `/sign-in`
    #[default]
    SignIn,
    /// `/sign-up`
    SignUp,
}

impl Route {
    pub const ALL: [Route; 3] = [Route::Feed, Route::SignIn, Route::SignUp];

    pub fn path(self) -> &'static str {
        match self {
            Route::Feed => "/",
            Route::SignIn => "/sign-in",
            Route::SignUp => "/sign-up",
        }
    }

    /// Exact match only; trailing slashes other than the root are not routes.
    pub fn from_path(path: &str) -> Option<Route> {
        Route::ALL.into_iter().find(|route| route.path() == path)
    }

    pub fn requires_session(self) -> bool {
        matches!(self, Route::Feed)
    }

    /// Pages that only make sense while signed out.
    pub fn is_auth_page(self) -> bool {
        matches!(self, Route::SignIn | Route::SignUp)
    }
}
