//! Object-storage operations: upload, public-URL resolution, and removal
//! across the three fixed product buckets.

use reqwest::{Method, Url};

use crate::client::RemoteClient;
use crate::error::RemoteError;

/// The three fixed buckets the catalog stores assets in.
pub mod buckets {
    pub const IMAGES: &str = "product-images";
    pub const CONTENT: &str = "product-content";
    pub const VIDEOS: &str = "product-videos";
}

/// Uploads `bytes` to `bucket` at `path` with the given content type.
///
/// Uploads never overwrite: the deterministic paths the media helper builds
/// are timestamped, and the service rejects duplicates (`x-upsert: false`).
///
/// # Errors
///
/// Returns [`RemoteError::Rejected`] when the service refuses the upload,
/// or [`RemoteError::Http`] on transport failure.
pub async fn upload_object(
    client: &RemoteClient,
    bucket: &str,
    path: &str,
    bytes: Vec<u8>,
    content_type: &str,
) -> Result<(), RemoteError> {
    let url = object_url(client, bucket, path, false);
    let builder = client
        .request(Method::POST, url)
        .header("content-type", content_type)
        .header("cache-control", "max-age=3600")
        .header("x-upsert", "false")
        .body(bytes);
    client.execute_ok(builder).await
}

/// Resolves the public URL for an object. Purely local: the service serves
/// every bucket object under `/storage/v1/object/public/`.
#[must_use]
pub fn public_url(client: &RemoteClient, bucket: &str, path: &str) -> String {
    object_url(client, bucket, path, true).to_string()
}

/// Removes the given object paths from `bucket`.
///
/// # Errors
///
/// Returns [`RemoteError`] if the removal is rejected.
pub async fn remove_objects(
    client: &RemoteClient,
    bucket: &str,
    paths: &[String],
) -> Result<(), RemoteError> {
    let url = client.endpoint(&["storage", "v1", "object", bucket]);
    let builder = client
        .request(Method::DELETE, url)
        .json(&serde_json::json!({ "prefixes": paths }));
    client.execute_ok(builder).await
}

fn object_url(client: &RemoteClient, bucket: &str, path: &str, public: bool) -> Url {
    let mut segments = vec!["storage", "v1", "object"];
    if public {
        segments.push("public");
    }
    segments.push(bucket);
    segments.extend(path.split('/').filter(|s| !s.is_empty()));
    client.endpoint(&segments)
}
