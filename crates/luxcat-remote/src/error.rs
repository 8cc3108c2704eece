use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("remote store rejected {url} ({status}): {message}")]
    Rejected {
        status: u16,
        url: String,
        /// Backend-supplied error message where available; callers surface
        /// this to the user verbatim.
        message: String,
    },

    #[error("remote store returned no rows for {context}")]
    MissingRow { context: String },

    #[error("invalid remote base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
