//! Backend REST client.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::session::AuthToken;

const FALLBACK_ERROR_MESSAGE: &str = "Unexpected error";

/// Errors that can occur when talking to the storefront backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An HTTP transport or deserialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error(
        "{} (status {status})",
        .message.as_deref().unwrap_or(FALLBACK_ERROR_MESSAGE)
    )]
    Rejected {
        /// Response status.
        status: StatusCode,

        /// Message reported by the backend, if the body carried one.
        message: Option<String>,
    },
}

impl ApiError {
    /// The backend-provided message for rejections, if any.
    pub fn rejection_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { message, .. } => message.as_deref(),
            ApiError::Http(_) => None,
        }
    }
}

/// HTTP client for the storefront backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    /// Create a client for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self::with_http(base_url, http))
    }

    /// Create a client reusing an existing `reqwest` client.
    pub fn with_http(base_url: impl Into<String>, http: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self { base_url, http }
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path such as `/api/products`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `GET` a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure, a non-2xx response or an unexpected body.
    pub async fn get_json<T>(&self, path: &str, token: Option<&AuthToken>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let request = self.http.get(self.url(path));

        self.send(request, path, token).await
    }

    /// `POST` a JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure, a non-2xx response or an unexpected body.
    pub async fn post_json<B, T>(
        &self,
        path: &str,
        body: &B,
        token: Option<&AuthToken>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let request = self.http.post(self.url(path)).json(body);

        self.send(request, path, token).await
    }

    async fn send<T>(
        &self,
        request: RequestBuilder,
        path: &str,
        token: Option<&AuthToken>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let request = match token {
            Some(token) => request.bearer_auth(token.expose()),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();

        debug!(%status, path, "backend responded");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body);

            warn!(%status, path, reason = ?message, "backend rejected request");

            return Err(ApiError::Rejected { status, message });
        }

        Ok(response.json().await?)
    }
}

/// Pull a human readable message out of an error body.
///
/// Prefers a non-empty `message`, then a non-empty `error`.
pub fn error_message(body: &str) -> Option<String> {
    let parsed: Value = serde_json::from_str(body).ok()?;

    ["message", "error"].iter().find_map(|field| {
        parsed
            .get(*field)
            .and_then(Value::as_str)
            .filter(|message| !message.is_empty())
            .map(str::to_string)
    })
}

/// Backend list endpoints answer either with a bare array or with `{ "items": [...] }`.
#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
pub(crate) enum Listing<T> {
    /// `[...]`
    Bare(Vec<T>),

    /// `{ "items": [...] }`
    Wrapped {
        /// Listed documents.
        items: Vec<T>,
    },
}

impl<T> Listing<T> {
    pub(crate) fn into_items(self) -> Vec<T> {
        match self {
            Listing::Bare(items) | Listing::Wrapped { items } => items,
        }
    }
}
