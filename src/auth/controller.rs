//! Auth Controller
//!
//! Anonymous -> Authenticating -> Authenticated, backed by the session store.

use std::cell::Cell;
use std::rc::Rc;

use crate::api::{self, ApiClient, SignupArgs};
use crate::error::{AppError, AppResult};
use crate::session::{Session, SessionStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticating,
    Authenticated,
}

#[derive(Clone)]
pub struct AuthController {
    api: ApiClient,
    session: SessionStore,
    state: Rc<Cell<AuthState>>,
}

impl AuthController {
    pub fn new(api: ApiClient, session: SessionStore) -> Self {
        let initial = if session.is_authenticated() {
            AuthState::Authenticated
        } else {
            AuthState::Anonymous
        };
        Self {
            api,
            session,
            state: Rc::new(Cell::new(initial)),
        }
    }

    pub fn state(&self) -> AuthState {
        self.state.get()
    }

    /// Presence of both fields is left to the form's `required` inputs
    pub async fn login(&self, email: &str, password: &str) -> AppResult<Session> {
        if self.state.get() == AuthState::Authenticating {
            return Err(AppError::validation("Sign in is already in progress"));
        }
        self.state.set(AuthState::Authenticating);

        match api::login_user(&self.api, email, password).await {
            Ok(response) => {
                self.session
                    .set_session(&response.access_token, response.user.as_ref());
                self.state.set(AuthState::Authenticated);
                Ok(self.session.session())
            }
            Err(e) => {
                log::info!("Login failed: {}", e);
                self.state.set(AuthState::Anonymous);
                Err(e)
            }
        }
    }

    /// Creates the account only; the caller sends the user to the login page
    pub async fn signup(&self, args: &SignupArgs) -> AppResult<()> {
        api::signup_user(&self.api, args).await?;
        log::info!("Account created for {}", args.email);
        Ok(())
    }

    pub fn logout(&self) {
        self.session.clear();
        self.state.set(AuthState::Anonymous);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{resolve_route, Route};
    use crate::models::UserSnapshot;
    use crate::testing::harness;
    use serde_json::json;

    #[tokio::test]
    async fn test_login_stores_session() {
        let (api, session, transport) = harness();
        let auth = AuthController::new(api, session.clone());
        assert_eq!(auth.state(), AuthState::Anonymous);

        transport.respond(200, json!({"accessToken": "T", "user": {"id": 1, "firstName": "A"}}));
        let result = auth.login("a@b.com", "x").await.unwrap();

        let expected_user = UserSnapshot {
            id: 1,
            first_name: "A".into(),
            ..Default::default()
        };
        assert_eq!(result.token.as_deref(), Some("T"));
        assert_eq!(result.user, Some(expected_user.clone()));
        assert_eq!(session.token().as_deref(), Some("T"));
        assert_eq!(session.user(), Some(expected_user));
        assert_eq!(auth.state(), AuthState::Authenticated);
        assert_eq!(transport.body(0), Some(json!({"email": "a@b.com", "password": "x"})));
    }

    #[tokio::test]
    async fn test_failed_login_stays_anonymous() {
        let (api, session, transport) = harness();
        let auth = AuthController::new(api, session.clone());

        transport.respond(401, json!({"message": "Invalid email or password"}));
        let err = auth.login("a@b.com", "wrong").await.unwrap_err();

        assert_eq!(err.user_message(), "Invalid email or password");
        assert_eq!(auth.state(), AuthState::Anonymous);
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_signup_does_not_log_in() {
        let (api, session, transport) = harness();
        let auth = AuthController::new(api, session.clone());

        transport.respond(201, json!({"id": 9, "email": "new@b.com"}));
        let args = SignupArgs {
            first_name: "New".into(),
            last_name: "User".into(),
            email: "new@b.com".into(),
            password: "pw".into(),
        };
        auth.signup(&args).await.unwrap();

        assert!(!session.is_authenticated());
        assert_eq!(auth.state(), AuthState::Anonymous);
        assert_eq!(
            transport.body(0),
            Some(json!({"firstName": "New", "lastName": "User", "email": "new@b.com", "password": "pw"}))
        );
    }

    #[tokio::test]
    async fn test_logout_clears_session_and_guard_redirects() {
        let (api, session, transport) = harness();
        let auth = AuthController::new(api, session.clone());
        transport.respond(200, json!({"accessToken": "T", "user": {"id": 1, "firstName": "A"}}));
        auth.login("a@b.com", "x").await.unwrap();

        auth.logout();

        assert_eq!(session.token(), None);
        assert_eq!(session.user(), None);
        assert_eq!(auth.state(), AuthState::Anonymous);
        assert_eq!(resolve_route(Route::Todos, &session.session()), Route::Login);
    }

    #[tokio::test]
    async fn test_existing_token_starts_authenticated() {
        let (api, session, _transport) = harness();
        session.set_session("T", None);
        let auth = AuthController::new(api, session);
        assert_eq!(auth.state(), AuthState::Authenticated);
    }
}
