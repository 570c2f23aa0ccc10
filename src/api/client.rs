//! API Client
//!
//! The single place requests are built: base URL, JSON headers, token
//! injection and error normalization.

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::error::{AppError, AppResult, GENERIC_API_MESSAGE, GENERIC_NETWORK_MESSAGE};
use crate::session::SessionStore;

#[derive(Clone)]
pub struct ApiClient {
    base_url: Rc<str>,
    transport: Rc<dyn Transport>,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(base_url: &str, transport: Rc<dyn Transport>, session: SessionStore) -> Self {
        Self {
            base_url: Rc::from(base_url.trim_end_matches('/')),
            transport,
            session,
        }
    }

    /// Issue one request and return the decoded JSON body.
    ///
    /// With `requires_auth` the stored token goes into `Authorization`
    /// verbatim; without a stored token the call fails locally with
    /// `Unauthenticated`.
    pub async fn call(
        &self,
        endpoint: &str,
        method: HttpMethod,
        body: Option<&Value>,
        requires_auth: bool,
    ) -> AppResult<Value> {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if requires_auth {
            let token = self.session.token().ok_or(AppError::Unauthenticated)?;
            headers.push(("Authorization".to_string(), token));
        }

        let request = HttpRequest {
            method,
            url: format!("{}{}", self.base_url, endpoint),
            headers,
            body: body.map(Value::to_string),
        };

        log::debug!("{} {}", method.as_str(), endpoint);
        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(msg) => {
                log::warn!("{} {} failed without response: {}", method.as_str(), endpoint, msg);
                let msg = if msg.trim().is_empty() { GENERIC_NETWORK_MESSAGE.to_string() } else { msg };
                return Err(AppError::Network(msg));
            }
        };

        if !response.is_success() {
            let message = server_message(&response);
            log::warn!("{} {} -> {}: {}", method.as_str(), endpoint, response.status, message);
            return Err(AppError::Api(message));
        }

        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&response.body)?)
    }

    /// `call` with typed request and response bodies
    pub async fn call_as<B, T>(
        &self,
        endpoint: &str,
        method: HttpMethod,
        body: Option<&B>,
        requires_auth: bool,
    ) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = body.map(serde_json::to_value).transpose()?;
        let value = self.call(endpoint, method, body.as_ref(), requires_auth).await?;
        Ok(serde_json::from_value(value)?)
    }
}

/// The server's `message` field, or the generic fallback
fn server_message(response: &HttpResponse) -> String {
    serde_json::from_str::<Value>(&response.body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| GENERIC_API_MESSAGE.to_string())
}
