mod categories;
mod error;
mod media;
mod products;
mod session;

pub use categories::CategoryStore;
pub use error::StoreError;
pub use media::{MediaFile, MediaUploader, UploadWarning};
pub use products::{MediaAttachments, ProductDraft, ProductKey, ProductStore};
pub use session::AdminSession;

use std::future::Future;

use tokio_util::sync::CancellationToken;

/// Races a store operation against its owner's cancellation token. The
/// in-flight request future is dropped on cancellation, so no response can
/// patch a mirror after the owning scope tore down.
pub(crate) async fn race_cancellation<T, E, F>(
    cancel: &CancellationToken,
    fut: F,
) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, E>>,
    E: Into<StoreError>,
{
    tokio::select! {
        () = cancel.cancelled() => Err(StoreError::Cancelled),
        result = fut => result.map_err(Into::into),
    }
}
