use luxcat_remote::RemoteError;
use thiserror::Error;

/// Failure taxonomy for store operations.
///
/// `Validation` is detected locally before any network call; `Persistence`
/// and `Transfer` wrap remote outcomes; `Unauthorized` gates the
/// back-office; `Cancelled` reports an operation torn down by its owner's
/// cancellation token. Every failure is scoped to the operation that raised
/// it — nothing here is fatal to the session.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("validation failed: {reason}")]
    Validation { reason: String },

    #[error("persistence failed: {message}")]
    Persistence {
        /// Backend-supplied message where available.
        message: String,
    },

    #[error("file transfer failed for {file_name}: {message}")]
    Transfer { file_name: String, message: String },

    #[error("access denied: {reason}")]
    Unauthorized { reason: String },

    #[error("operation cancelled")]
    Cancelled,
}

impl StoreError {
    pub(crate) fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }
}

impl From<RemoteError> for StoreError {
    fn from(err: RemoteError) -> Self {
        // Surface the backend's own message for rejections; other variants
        // already render a useful description.
        let message = match err {
            RemoteError::Rejected { message, .. } => message,
            other => other.to_string(),
        };
        Self::Persistence { message }
    }
}
