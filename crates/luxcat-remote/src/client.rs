use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::error::RemoteError;

/// HTTP client for the hosted data service: PostgREST-style table endpoints
/// under `/rest/v1/`, object storage under `/storage/v1/`, and an auth RPC.
///
/// Constructed explicitly and injected into each store — there is no
/// module-level singleton. Non-2xx responses become typed
/// [`RemoteError::Rejected`] values carrying the backend-supplied message.
/// No automatic retries: a failed request is reported once to the caller.
pub struct RemoteClient {
    http: Client,
    base: Url,
    api_key: String,
}

impl RemoteClient {
    /// Creates a `RemoteClient` with configured timeouts and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::InvalidBaseUrl`] if `base_url` is not an
    /// absolute HTTP(S) URL, or [`RemoteError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(
        base_url: &str,
        api_key: &str,
        request_timeout_secs: u64,
        connect_timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, RemoteError> {
        let base = Url::parse(base_url.trim_end_matches('/')).map_err(|e| {
            RemoteError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: e.to_string(),
            }
        })?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(RemoteError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "expected an absolute http(s) URL".to_string(),
            });
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(request_timeout_secs))
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            http,
            base,
            api_key: api_key.to_string(),
        })
    }

    /// Builds the client from the application configuration.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::new`].
    pub fn from_config(config: &luxcat_core::AppConfig) -> Result<Self, RemoteError> {
        Self::new(
            &config.remote_url,
            &config.api_key,
            config.request_timeout_secs,
            config.connect_timeout_secs,
            &config.user_agent,
        )
    }

    /// Joins `segments` onto the base URL, percent-encoding each path
    /// segment (object paths may contain spaces, e.g. `SPL-MHL-420 IP`).
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // Validated as a base-able URL in `new`, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Starts a request with the service API key attached.
    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Sends a request and deserializes the 2xx response body.
    ///
    /// # Errors
    ///
    /// - [`RemoteError::Http`] — network or TLS failure.
    /// - [`RemoteError::Rejected`] — any non-2xx status, with the backend
    ///   message extracted from the body.
    /// - [`RemoteError::Deserialize`] — 2xx body does not match `T`.
    pub(crate) async fn execute_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        context: &str,
    ) -> Result<T, RemoteError> {
        let body = self.execute_text(builder).await?;
        serde_json::from_str::<T>(&body).map_err(|e| RemoteError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }

    /// Sends a request and discards the response body, keeping only the
    /// success/rejection outcome.
    ///
    /// # Errors
    ///
    /// Same as [`Self::execute_json`], minus deserialization.
    pub(crate) async fn execute_ok(&self, builder: RequestBuilder) -> Result<(), RemoteError> {
        self.execute_text(builder).await.map(|_| ())
    }

    async fn execute_text(&self, builder: RequestBuilder) -> Result<String, RemoteError> {
        let response = builder.send().await?;
        let status = response.status();
        let url = response.url().to_string();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), url = %url, "remote request rejected");
            return Err(RemoteError::Rejected {
                status: status.as_u16(),
                url,
                message: extract_backend_message(&body),
            });
        }

        Ok(body)
    }
}

/// Pulls the `message` field out of a backend error body, falling back to
/// the raw body (or a placeholder when empty) so the user always sees
/// something actionable.
fn extract_backend_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }
    if body.trim().is_empty() {
        "request rejected".to_string()
    } else {
        body.trim().to_string()
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
