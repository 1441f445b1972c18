//! Remote client: authenticated JSON requests against the backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Sits between query loaders and the [`Transport`] seam. Reads the bearer
//! token from the [`SessionStore`] on every request and owns the single
//! place where a 401 turns into a logout plus a redirect to `/login`.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses become [`ApiError`] values carrying the server's
//! `message` field. 2xx bodies must parse as the `{data, success, message?}`
//! envelope; anything else is a decode error. This layer never retries.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::rc::Rc;
use std::time::Duration;

use futures::future::{Either, select};
use serde::de::DeserializeOwned;

use crate::config::DashboardConfig;
use crate::error::ApiError;
use crate::net::endpoint::Endpoint;
use crate::net::types::{ErrorBody, RawEnvelope};
use crate::platform::{HttpMethod, HttpRequest, HttpResponse, Navigator, Runtime, Transport};
use crate::routes::Paths;
use crate::state::session::SessionStore;
use crate::state::toast::Toasts;

pub const SESSION_EXPIRED_TITLE: &str = "Logged Out";
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please sign in again.";

struct ClientInner {
    base_url: String,
    timeout: Duration,
    transport: Rc<dyn Transport>,
    session: SessionStore,
    navigator: Rc<dyn Navigator>,
    toasts: Toasts,
    runtime: Rc<dyn Runtime>,
}

/// Cheap-to-clone handle; loaders capture a clone.
#[derive(Clone)]
pub struct RemoteClient {
    inner: Rc<ClientInner>,
}

impl std::fmt::Debug for RemoteClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteClient")
            .field("base_url", &self.inner.base_url)
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

/// Platform services the client depends on.
pub struct ClientDeps {
    pub transport: Rc<dyn Transport>,
    pub navigator: Rc<dyn Navigator>,
    pub runtime: Rc<dyn Runtime>,
}

impl RemoteClient {
    pub fn new(config: &DashboardConfig, deps: ClientDeps, session: SessionStore, toasts: Toasts) -> Self {
        Self {
            inner: Rc::new(ClientInner {
                base_url: config.api_base_url.trim_end_matches('/').to_owned(),
                timeout: config.request_timeout,
                transport: deps.transport,
                session,
                navigator: deps.navigator,
                toasts,
                runtime: deps.runtime,
            }),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Call a typed endpoint and decode its `data` payload.
    ///
    /// # Errors
    ///
    /// See [`RemoteClient::request`]; additionally returns
    /// [`ApiError::Decode`] when `data` does not match `T`.
    pub async fn call<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<T, ApiError> {
        let body = endpoint.body()?;
        let data = self.request(endpoint.method(), &endpoint.path(), body.as_ref()).await?;
        serde_json::from_value(data).map_err(|e| ApiError::Decode(format!("{}: {e}", endpoint.path())))
    }

    /// Send one request and return the envelope's undecoded `data`.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Unauthorized`] on 401 with credentials attached, after
    ///   the session is cleared and the view sent to `/login`
    /// - [`ApiError::Rejected`] / [`ApiError::Server`] for other non-2xx
    /// - [`ApiError::Network`] when no response arrives before the timeout
    /// - [`ApiError::Decode`] for a malformed envelope
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<serde_json::Value, ApiError> {
        let body = body
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| ApiError::Encode(e.to_string()))?;

        let mut headers = vec![("Accept".to_owned(), "application/json".to_owned())];
        if body.is_some() {
            headers.push(("Content-Type".to_owned(), "application/json".to_owned()));
        }
        let token = self.inner.session.token();
        if let Some(token) = &token {
            headers.push(("Authorization".to_owned(), format!("Bearer {token}")));
        }

        let request = HttpRequest { method, url: format!("{}{path}", self.inner.base_url), headers, body };
        log::debug!("{} {}", method.as_str(), request.url);

        let response = self.send_with_timeout(request).await?;
        self.interpret(method, path, token.is_some(), response)
    }

    async fn send_with_timeout(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let send = self.inner.transport.send(request);
        let timeout = self.inner.runtime.sleep(self.inner.timeout);
        match select(send, timeout).await {
            Either::Left((result, _)) => result.map_err(|e| ApiError::Network(e.0)),
            Either::Right(((), _)) => Err(ApiError::Network(format!(
                "request timed out after {}s",
                self.inner.timeout.as_secs()
            ))),
        }
    }

    fn interpret(
        &self,
        method: HttpMethod,
        path: &str,
        had_credentials: bool,
        response: HttpResponse,
    ) -> Result<serde_json::Value, ApiError> {
        let status = response.status;

        if !response.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&response.body)
                .ok()
                .and_then(|b| b.message);
            log::warn!("{} {path} failed with status {status}", method.as_str());
            if status == 401 {
                self.handle_unauthorized();
                if !had_credentials {
                    // No session to expire: surface the server's reason instead.
                    return Err(ApiError::Rejected { status, message });
                }
            }
            return Err(ApiError::from_status(status, message));
        }

        let envelope: RawEnvelope =
            serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(format!("{path}: {e}")))?;
        if !envelope.success {
            return Err(ApiError::Rejected { status, message: envelope.message });
        }
        Ok(envelope.data)
    }

    fn handle_unauthorized(&self) {
        if self.inner.session.logout() {
            self.inner.toasts.warning(SESSION_EXPIRED_TITLE, SESSION_EXPIRED_MESSAGE);
        }
        self.inner.navigator.navigate(Paths::LOGIN);
    }
}
