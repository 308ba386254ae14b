//! HTTP plumbing for the account API: one shared client with a cookie jar,
//! bearer-token attachment from the session cache on every request, and
//! uniform envelope/error handling. Feature clients go through these helpers
//! so request setup and failure mapping stay in one place. No explicit
//! request timeout is configured; the transport's defaults apply.

pub mod errors;
pub mod types;

pub use errors::ClientError;

use crate::session::SessionStore;
use reqwest::multipart::Form;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use types::ApiEnvelope;
use url::Url;

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

/// Maximum number of error body characters surfaced to the caller.
const MAX_ERROR_CHARS: usize = 200;

/// Shared transport for the feature clients. Cloning is cheap; every clone
/// reuses the same connection pool and cookie jar.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    /// Builds the client against a remote base URL.
    ///
    /// # Errors
    /// Returns `ClientError::Config` if the URL does not parse as http(s) or
    /// the underlying client cannot be constructed.
    pub fn new(base_url: &str, session: SessionStore) -> Result<Self, ClientError> {
        let parsed = Url::parse(base_url)
            .map_err(|err| ClientError::Config(format!("invalid API base URL: {err}")))?;
        match parsed.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(ClientError::Config(format!(
                    "invalid API base URL: unsupported scheme {scheme}"
                )));
            }
        }

        let http = Client::builder()
            .user_agent(APP_USER_AGENT)
            .cookie_store(true)
            .build()
            .map_err(|err| ClientError::Config(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            session,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// Attaches `Authorization: Bearer <token>` when a token is cached.
    /// Every operation goes through here, mirroring a request interceptor.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// GET `path` and decode the response envelope.
    ///
    /// # Errors
    /// Returns an error on transport failure, a non-success status, or an
    /// undecodable body.
    pub async fn get_json(&self, path: &str) -> Result<ApiEnvelope, ClientError> {
        let url = self.url(path);
        debug!("GET {url}");

        let response = self
            .authorize(self.http.get(&url))
            .send()
            .await
            .map_err(map_transport_error)?;

        handle_response(response).await
    }

    /// POST a JSON body to `path` and decode the response envelope.
    ///
    /// # Errors
    /// Returns an error on transport failure, a non-success status, or an
    /// undecodable body.
    pub async fn post_json<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiEnvelope, ClientError> {
        let url = self.url(path);
        debug!("POST {url}");

        let response = self
            .authorize(self.http.post(&url).json(body))
            .send()
            .await
            .map_err(map_transport_error)?;

        handle_response(response).await
    }

    /// POST an empty body to `path` and decode the response envelope.
    ///
    /// # Errors
    /// Returns an error on transport failure, a non-success status, or an
    /// undecodable body.
    pub async fn post_empty(&self, path: &str) -> Result<ApiEnvelope, ClientError> {
        let url = self.url(path);
        debug!("POST {url}");

        let response = self
            .authorize(self.http.post(&url))
            .send()
            .await
            .map_err(map_transport_error)?;

        handle_response(response).await
    }

    /// POST a multipart form to `path` and decode the response envelope.
    ///
    /// # Errors
    /// Returns an error on transport failure, a non-success status, or an
    /// undecodable body.
    pub async fn post_multipart(&self, path: &str, form: Form) -> Result<ApiEnvelope, ClientError> {
        let url = self.url(path);
        debug!("POST {url} (multipart)");

        let response = self
            .authorize(self.http.post(&url).multipart(form))
            .send()
            .await
            .map_err(map_transport_error)?;

        handle_response(response).await
    }
}

/// Joins the configured base URL and a path without doubled slashes.
fn join_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Maps transport failures into caller-facing variants.
fn map_transport_error(err: reqwest::Error) -> ClientError {
    if err.is_decode() {
        ClientError::Parse(format!("failed to decode response: {err}"))
    } else if err.is_builder() {
        ClientError::Serialization(format!("failed to build request: {err}"))
    } else {
        ClientError::Network(format!("unable to reach the server: {err}"))
    }
}

/// Decodes success responses; non-success statuses surface the
/// server-provided message when the body carries one.
async fn handle_response(response: Response) -> Result<ApiEnvelope, ClientError> {
    let status = response.status();
    if status.is_success() {
        return response
            .json::<ApiEnvelope>()
            .await
            .map_err(|err| ClientError::Parse(format!("failed to decode response: {err}")));
    }

    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Http {
        status: status.as_u16(),
        message: extract_message(&body),
    })
}

/// Pulls the `message` field out of a JSON error body, falling back to the
/// sanitized raw body.
fn extract_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(message) = value.get("message").and_then(Value::as_str) {
            return message.to_string();
        }
    }
    sanitize_body(body)
}

/// Trims and truncates raw error bodies for display.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
