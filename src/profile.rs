//! Profile Controller
//!
//! Profile fetch/edit and the signed-in password change.

use crate::api::{self, ApiClient};
use crate::error::{AppError, AppResult};
use crate::models::{ProfileUpdate, UserId, UserSnapshot};
use crate::session::SessionStore;

pub const PASSWORD_MISMATCH: &str = "New passwords don't match";

/// The change-password form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

#[derive(Clone)]
pub struct ProfileController {
    api: ApiClient,
    session: SessionStore,
}

impl ProfileController {
    pub fn new(api: ApiClient, session: SessionStore) -> Self {
        Self { api, session }
    }

    pub async fn fetch(&self, user_id: UserId) -> AppResult<UserSnapshot> {
        api::get_profile(&self.api, user_id).await
    }

    /// The server's snapshot replaces the cached one, nothing is merged locally
    pub async fn update(&self, user_id: UserId, fields: &ProfileUpdate) -> AppResult<UserSnapshot> {
        let updated = api::update_profile(&self.api, user_id, fields).await?;
        self.session.set_user(&updated);
        log::info!("Profile {} updated", updated.id);
        Ok(updated)
    }

    pub async fn change_password(&self, email: &str, change: &PasswordChange) -> AppResult<()> {
        if change.new_password != change.confirm_password {
            return Err(AppError::validation(PASSWORD_MISMATCH));
        }
        api::change_password(&self.api, email, &change.current_password, &change.new_password)
            .await?;
        log::info!("Password changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{harness, sign_in, MockTransport};
    use serde_json::json;
    use std::rc::Rc;

    fn controller() -> (ProfileController, SessionStore, Rc<MockTransport>) {
        let (api, session, transport) = harness();
        sign_in(&session, "T");
        (ProfileController::new(api, session.clone()), session, transport)
    }

    #[tokio::test]
    async fn test_fetch_profile() {
        let (profile, _session, transport) = controller();
        transport.respond(
            200,
            json!({
                "id": 1,
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@example.com",
                "bio": "Analyst",
                "createdAt": "2024-01-01T00:00:00.000Z",
                "modifiedAt": "2024-01-05T00:00:00.000Z"
            }),
        );

        let user = profile.fetch(1).await.unwrap();

        assert_eq!(user.display_name(), "Ada Lovelace");
        assert_eq!(user.bio.as_deref(), Some("Analyst"));
        assert!(user.modified_at.is_some());
        assert_eq!(transport.last_request().unwrap().url, "http://api.test/api/users/1");
    }

    #[tokio::test]
    async fn test_update_replaces_cached_user() {
        let (profile, session, transport) = controller();
        transport.respond(
            200,
            json!({
                "id": 1,
                "firstName": "Augusta",
                "lastName": "King",
                "email": "ada@example.com",
                "modifiedAt": "2024-02-01T10:00:00.000Z"
            }),
        );

        let fields = ProfileUpdate {
            first_name: "Augusta".into(),
            last_name: "King".into(),
            email: "ada@example.com".into(),
            bio: String::new(),
        };
        let updated = profile.update(1, &fields).await.unwrap();

        assert_eq!(session.user(), Some(updated.clone()));
        assert_eq!(updated.bio, None);
        assert!(updated.modified_at.is_some());
        assert_eq!(
            transport.body(0),
            Some(json!({"firstName": "Augusta", "lastName": "King", "email": "ada@example.com", "bio": ""}))
        );
    }

    #[tokio::test]
    async fn test_failed_update_keeps_cached_user() {
        let (profile, session, transport) = controller();
        let before = session.user();
        transport.respond(409, json!({"message": "Email already in use"}));

        let err = profile.update(1, &ProfileUpdate::default()).await.unwrap_err();

        assert_eq!(err.user_message(), "Email already in use");
        assert_eq!(session.user(), before);
    }

    #[tokio::test]
    async fn test_password_mismatch_stays_local() {
        let (profile, _session, transport) = controller();
        let change = PasswordChange {
            current_password: "old".into(),
            new_password: "new-one".into(),
            confirm_password: "new-two".into(),
        };

        let err = profile.change_password("ada@example.com", &change).await.unwrap_err();

        assert_eq!(err, AppError::Validation(PASSWORD_MISMATCH.into()));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_password_change_request() {
        let (profile, _session, transport) = controller();
        transport.respond(200, json!({"success": true}));
        let change = PasswordChange {
            current_password: "old".into(),
            new_password: "new".into(),
            confirm_password: "new".into(),
        };

        profile.change_password("ada@example.com", &change).await.unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.url, "http://api.test/api/users/changepassword");
        assert_eq!(request.header("Authorization"), Some("T"));
        assert_eq!(
            transport.body(0),
            Some(json!({"email": "ada@example.com", "currentPassword": "old", "newPassword": "new"}))
        );
    }
}
