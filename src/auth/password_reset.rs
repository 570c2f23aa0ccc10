//! Forgot-Password Flow
//!
//! AwaitingEmail -> AwaitingOtp -> AwaitingNewPassword -> Completed.
//! Lives as long as the modal; nothing is persisted.

use std::cell::RefCell;

use crate::api::{self, ApiClient};
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResetStep {
    #[default]
    AwaitingEmail,
    AwaitingOtp,
    AwaitingNewPassword,
    Completed,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PasswordResetSession {
    pub email: String,
    pub step: ResetStep,
    pub status: String,
}

type ChangeListener = Box<dyn Fn(&PasswordResetSession)>;

pub struct PasswordResetFlow {
    api: ApiClient,
    state: RefCell<PasswordResetSession>,
    listener: RefCell<Option<ChangeListener>>,
}

impl PasswordResetFlow {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: RefCell::new(PasswordResetSession::default()),
            listener: RefCell::new(None),
        }
    }

    /// Called with a fresh snapshot after every status or step change
    pub fn on_change(&self, listener: impl Fn(&PasswordResetSession) + 'static) {
        *self.listener.borrow_mut() = Some(Box::new(listener));
    }

    pub fn snapshot(&self) -> PasswordResetSession {
        self.state.borrow().clone()
    }

    pub fn step(&self) -> ResetStep {
        self.state.borrow().step
    }

    pub async fn request_otp(&self, email: &str) -> AppResult<()> {
        self.expect_step(ResetStep::AwaitingEmail)?;
        let email = email.trim();
        if email.is_empty() {
            return self.reject("Please enter your email.");
        }
        self.set_status("Sending...");

        let result = api::send_reset_mail(&self.api, email)
            .await
            .and_then(|res| ok_or(res.success, "Failed to send OTP"));
        self.finish(result, |state| {
            state.email = email.to_string();
            state.step = ResetStep::AwaitingOtp;
            state.status = "OTP sent successfully! Check your email.".to_string();
        })
    }

    pub async fn verify_otp(&self, otp: &str) -> AppResult<()> {
        self.expect_step(ResetStep::AwaitingOtp)?;
        let otp = otp.trim();
        if otp.is_empty() {
            return self.reject("Please enter OTP.");
        }
        let email = self.state.borrow().email.clone();
        self.set_status("Verifying...");

        let result = api::verify_otp(&self.api, &email, otp)
            .await
            .and_then(|res| ok_or(res.is_verified, "Invalid OTP"));
        self.finish(result, |state| {
            state.step = ResetStep::AwaitingNewPassword;
            state.status = "OTP verified! Please set a new password.".to_string();
        })
    }

    pub async fn set_new_password(&self, new_password: &str) -> AppResult<()> {
        self.expect_step(ResetStep::AwaitingNewPassword)?;
        if new_password.trim().is_empty() {
            return self.reject("Please enter a new password.");
        }
        let email = self.state.borrow().email.clone();
        self.set_status("Updating...");

        let result = api::reset_password(&self.api, &email, new_password)
            .await
            .and_then(|res| ok_or(res.success, "Failed to update password"));
        self.finish(result, |state| {
            state.step = ResetStep::Completed;
            state.status = "Password updated successfully! You can now log in.".to_string();
        })
    }

    fn expect_step(&self, step: ResetStep) -> AppResult<()> {
        if self.step() == step {
            Ok(())
        } else {
            Err(AppError::validation("This step is not available right now"))
        }
    }

    fn set_status(&self, status: &str) {
        self.state.borrow_mut().status = status.to_string();
        self.notify();
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        if let Some(listener) = self.listener.borrow().as_ref() {
            listener(&snapshot);
        }
    }

    fn reject(&self, message: &str) -> AppResult<()> {
        self.set_status(message);
        Err(AppError::validation(message))
    }

    /// Apply `advance` on success; on failure keep the step and show the error
    fn finish(
        &self,
        result: AppResult<()>,
        advance: impl FnOnce(&mut PasswordResetSession),
    ) -> AppResult<()> {
        let outcome = {
            let mut state = self.state.borrow_mut();
            match result {
                Ok(()) => {
                    advance(&mut *state);
                    log::info!("Password reset advanced to {:?}", state.step);
                    Ok(())
                }
                Err(e) => {
                    state.status = e.user_message();
                    Err(e)
                }
            }
        };
        self.notify();
        outcome
    }
}

fn ok_or(flag: bool, message: &str) -> AppResult<()> {
    if flag {
        Ok(())
    } else {
        Err(AppError::Api(message.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::harness;
    use serde_json::json;

    #[tokio::test]
    async fn test_blank_email_stays_local() {
        let (api, _session, transport) = harness();
        let flow = PasswordResetFlow::new(api);

        let err = flow.request_otp("   ").await.unwrap_err();

        assert_eq!(err, AppError::Validation("Please enter your email.".into()));
        assert_eq!(flow.step(), ResetStep::AwaitingEmail);
        assert_eq!(flow.snapshot().status, "Please enter your email.");
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_otp_keeps_step() {
        let (api, _session, transport) = harness();
        let flow = PasswordResetFlow::new(api);

        transport.respond(200, json!({"success": true}));
        flow.request_otp("a@b.com").await.unwrap();
        assert_eq!(flow.step(), ResetStep::AwaitingOtp);
        assert_eq!(flow.snapshot().email, "a@b.com");

        transport.respond(200, json!({"isVerified": false}));
        let err = flow.verify_otp("000000").await.unwrap_err();

        assert_eq!(err.user_message(), "Invalid OTP");
        assert_eq!(flow.step(), ResetStep::AwaitingOtp);
        assert_eq!(flow.snapshot().status, "Invalid OTP");
        assert_eq!(transport.body(1), Some(json!({"email": "a@b.com", "otp": "000000"})));
    }

    #[tokio::test]
    async fn test_padded_email_is_trimmed() {
        let (api, _session, transport) = harness();
        let flow = PasswordResetFlow::new(api);

        transport.respond(200, json!({"success": true}));
        flow.request_otp("  a@b.com ").await.unwrap();

        assert_eq!(transport.body(0), Some(json!({"email": "a@b.com"})));
        assert_eq!(flow.snapshot().email, "a@b.com");
    }

    #[tokio::test]
    async fn test_full_reset() {
        let (api, _session, transport) = harness();
        let flow = PasswordResetFlow::new(api);

        transport.respond(200, json!({"success": true}));
        transport.respond(200, json!({"isVerified": true}));
        transport.respond(200, json!({"success": true}));

        flow.request_otp("a@b.com").await.unwrap();
        flow.verify_otp("123456").await.unwrap();
        assert_eq!(flow.step(), ResetStep::AwaitingNewPassword);
        flow.set_new_password("s3cret").await.unwrap();

        assert_eq!(flow.step(), ResetStep::Completed);
        assert_eq!(
            transport.body(2),
            Some(json!({"email": "a@b.com", "newPassword": "s3cret"}))
        );
        assert_eq!(transport.requests()[2].url, "http://api.test/api/users/forgotpassword");
    }

    #[tokio::test]
    async fn test_server_refusals() {
        let (api, _session, transport) = harness();
        let flow = PasswordResetFlow::new(api);

        transport.respond(404, json!({"message": "No account with that email"}));
        let err = flow.request_otp("ghost@b.com").await.unwrap_err();
        assert_eq!(err.user_message(), "No account with that email");
        assert_eq!(flow.step(), ResetStep::AwaitingEmail);

        transport.respond(200, json!({"success": false}));
        let err = flow.request_otp("a@b.com").await.unwrap_err();
        assert_eq!(err.user_message(), "Failed to send OTP");

        transport.respond(200, json!({"success": true}));
        transport.respond(200, json!({"isVerified": true}));
        transport.respond(200, json!({"success": false}));
        flow.request_otp("a@b.com").await.unwrap();
        flow.verify_otp("123456").await.unwrap();
        let err = flow.set_new_password("s3cret").await.unwrap_err();
        assert_eq!(err.user_message(), "Failed to update password");
        assert_eq!(flow.step(), ResetStep::AwaitingNewPassword);
    }

    #[tokio::test]
    async fn test_listener_sees_progress_text() {
        use std::rc::Rc;

        let (api, _session, transport) = harness();
        let flow = PasswordResetFlow::new(api);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        flow.on_change(move |s| sink.borrow_mut().push(s.status.clone()));

        transport.respond(200, json!({"success": true}));
        flow.request_otp("a@b.com").await.unwrap();

        assert_eq!(
            *seen.borrow(),
            vec!["Sending...", "OTP sent successfully! Check your email."]
        );
    }

    #[tokio::test]
    async fn test_out_of_order_step_is_rejected() {
        let (api, _session, transport) = harness();
        let flow = PasswordResetFlow::new(api);

        assert!(flow.verify_otp("123456").await.is_err());
        assert!(flow.set_new_password("pw").await.is_err());
        assert_eq!(transport.request_count(), 0);
    }
}
