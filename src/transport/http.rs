//! HTTP auth transport.
//!
//! [`HttpTransport`] speaks to the REST backend described by
//! [`crate::constants::endpoints`]. Backends differ in whether they
//! wrap payloads in a `data` envelope; this transport accepts both
//! `{token, user}` and `{data: {token, user}}` shapes.

use crate::config::TransportConfig;
use crate::constants::endpoints;
use crate::error::{Result, SessionError};
use crate::providers::{AuthPayload, AuthTransport, LoginRequest, RegisterRequest};
use crate::state::{Credential, UserRecord};
use reqwest::{Client, Method, StatusCode};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::time::Duration;

/// reqwest-backed [`AuthTransport`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpTransport {
    /// Create a transport for the configured backend.
    #[must_use]
    pub fn new(config: TransportConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
        }
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        credential: Option<&Credential>,
        body: Option<Value>,
    ) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .client
            .request(method, &url)
            .timeout(self.timeout)
            .header(reqwest::header::ACCEPT, "application/json");

        if let Some(credential) = credential {
            request = request.header(reqwest::header::AUTHORIZATION, credential.bearer_header());
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|err| {
            tracing::debug!(url, error = %err, "no response from backend");
            SessionError::NetworkUnavailable
        })?;

        let status = response.status();
        let payload: Value = response.json().await.unwrap_or(Value::Null);

        if status.is_success() {
            Ok(payload)
        } else {
            Err(map_error(status, &payload))
        }
    }
}

/// Map a non-success response to the error taxonomy.
fn map_error(status: StatusCode, payload: &Value) -> SessionError {
    match status {
        StatusCode::UNAUTHORIZED => SessionError::Unauthorized,
        StatusCode::UNPROCESSABLE_ENTITY => {
            let fields: BTreeMap<String, Vec<String>> = payload
                .get("errors")
                .and_then(|errors| serde_json::from_value(errors.clone()).ok())
                .unwrap_or_default();
            if fields.is_empty() {
                // Surface the server's own message when it sent one.
                match payload.get("message").and_then(Value::as_str) {
                    Some(message) => SessionError::InvalidCredentials {
                        message: message.to_string(),
                    },
                    None => SessionError::invalid_credentials(),
                }
            } else {
                SessionError::ValidationError { fields }
            }
        }
        _ => SessionError::ServerError {
            status: status.as_u16(),
        },
    }
}

/// Unwrap an optional `data` envelope.
fn unwrap_envelope(payload: &Value) -> &Value {
    match payload.get("data") {
        Some(inner) if inner.is_object() => inner,
        _ => payload,
    }
}

fn extract_auth(payload: &Value) -> Result<AuthPayload> {
    let node = unwrap_envelope(payload);
    let token = node
        .get("token")
        .and_then(Value::as_str)
        .ok_or(SessionError::MalformedResponse)?;
    let user: UserRecord = node
        .get("user")
        .cloned()
        .and_then(|user| serde_json::from_value(user).ok())
        .ok_or(SessionError::MalformedResponse)?;
    Ok(AuthPayload {
        credential: Credential::new(token),
        user,
    })
}

fn extract_token(payload: &Value) -> Result<Credential> {
    let node = unwrap_envelope(payload);
    node.get("token")
        .and_then(Value::as_str)
        .map(Credential::new)
        .ok_or(SessionError::MalformedResponse)
}

fn extract_user(payload: &Value) -> Result<UserRecord> {
    let node = unwrap_envelope(payload);
    let user = node.get("user").unwrap_or(node);
    serde_json::from_value(user.clone()).map_err(|_| SessionError::MalformedResponse)
}

impl AuthTransport for HttpTransport {
    async fn login(&self, request: &LoginRequest) -> Result<AuthPayload> {
        let body = json!({
            (request.identity.field_name()): request.identity.value(),
            "password": request.password,
        });
        let payload = self
            .execute(Method::POST, endpoints::LOGIN, None, Some(body))
            .await?;
        extract_auth(&payload)
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthPayload> {
        let body = serde_json::to_value(request).map_err(|_| SessionError::MalformedResponse)?;
        let payload = self
            .execute(Method::POST, endpoints::REGISTER, None, Some(body))
            .await?;
        extract_auth(&payload)
    }

    async fn logout(&self, credential: &Credential) -> Result<()> {
        self.execute(Method::POST, endpoints::LOGOUT, Some(credential), None)
            .await?;
        Ok(())
    }

    async fn refresh(&self, credential: &Credential) -> Result<Credential> {
        let payload = self
            .execute(Method::POST, endpoints::REFRESH, Some(credential), None)
            .await?;
        extract_token(&payload)
    }

    async fn profile(&self, credential: &Credential) -> Result<UserRecord> {
        let payload = self
            .execute(Method::GET, endpoints::PROFILE, Some(credential), None)
            .await?;
        extract_user(&payload)
    }
}
