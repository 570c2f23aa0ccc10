//! Page Guard
//!
//! Decides which page is actually shown for a requested one.

use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Login,
    Signup,
    Todos,
    Profile,
}

impl Route {
    /// Needs a token
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Todos | Route::Profile)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Sign In",
            Route::Signup => "Create Account",
            Route::Todos => "Todos",
            Route::Profile => "Profile",
        }
    }
}

/// Protected pages fall back to Login without a token; the auth pages
/// forward an already signed-in user to the todo list.
pub fn resolve_route(requested: Route, session: &Session) -> Route {
    match (requested.is_protected(), session.is_authenticated()) {
        (true, false) => Route::Login,
        (false, true) => Route::Todos,
        _ => requested,
    }
}
