//! Transient Status Messages
//!
//! A banner value carries its own expiry; views hide it once `now` passes
//! `expires_at` instead of relying on a timer to clear state.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    /// The action went through but something after it did not
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
    pub expires_at: DateTime<Utc>,
}

impl StatusMessage {
    pub fn new(kind: StatusKind, text: impl Into<String>, now: DateTime<Utc>, ttl: Duration) -> Self {
        let ttl = chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::seconds(3));
        Self {
            kind,
            text: text.into(),
            expires_at: now + ttl,
        }
    }

    pub fn success(text: impl Into<String>, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self::new(StatusKind::Success, text, now, ttl)
    }

    pub fn error(err: &AppError, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self::new(StatusKind::Error, err.user_message(), now, ttl)
    }

    /// A saved change whose follow-up list reload failed
    pub fn stale_list(
        success: Option<&str>,
        reload_error: &AppError,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        let text = format!(
            "{}The list could not be refreshed: {}",
            success.map(|s| format!("{} ", s)).unwrap_or_default(),
            reload_error.user_message()
        );
        Self::new(StatusKind::Warning, text, now, ttl)
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    /// Time left before the banner should disappear
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.expires_at - now).to_std().unwrap_or(Duration::ZERO)
    }

    pub fn css_class(&self) -> &'static str {
        match self.kind {
            StatusKind::Success => "alert alert-success",
            StatusKind::Warning => "alert alert-warning",
            StatusKind::Error => "alert alert-error",
        }
    }
}

/// The message, if it has not expired yet
pub fn visible(message: Option<&StatusMessage>, now: DateTime<Utc>) -> Option<&StatusMessage> {
    message.filter(|m| m.is_active(now))
}
