//! Media Upload Helper: pushes one file into one of the three fixed buckets
//! under a deterministic path and resolves its public URL.
//!
//! Paths follow `products/{model}/[{subfolder}/]{timestamp}_{file_name}`.
//! The model is used verbatim as a path segment; percent-encoding happens at
//! the transport layer, not here.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use luxcat_remote::{storage, RemoteClient};

use crate::error::StoreError;

/// An attachment ready for upload: original file name, MIME type, and raw
/// bytes.
#[derive(Debug, Clone)]
pub struct MediaFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl MediaFile {
    #[must_use]
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Reads an attachment from disk, inferring its MIME type from the file
    /// name (`application/octet-stream` when unknown).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Transfer`] if the file cannot be read or has no
    /// usable file name.
    pub async fn from_path(path: &Path) -> Result<Self, StoreError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(ToOwned::to_owned)
            .ok_or_else(|| StoreError::Transfer {
                file_name: path.display().to_string(),
                message: "path has no usable file name".to_string(),
            })?;

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| StoreError::Transfer {
                file_name: file_name.clone(),
                message: e.to_string(),
            })?;

        let content_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }
}

/// A non-fatal upload failure, reported alongside an otherwise successful
/// save (the partial-failure policy: the product persists with whichever
/// asset URLs succeeded).
#[derive(Debug, Clone)]
pub struct UploadWarning {
    pub file_name: String,
    pub message: String,
}

/// Uploads product assets and resolves their public URLs.
pub struct MediaUploader {
    remote: Arc<RemoteClient>,
}

impl MediaUploader {
    #[must_use]
    pub fn new(remote: Arc<RemoteClient>) -> Self {
        Self { remote }
    }

    /// Uploads a gallery image for `model` and returns its public URL.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] for an empty model or missing MIME
    /// type, [`StoreError::Transfer`] when the upload fails.
    pub async fn upload_product_image(
        &self,
        file: &MediaFile,
        model: &str,
    ) -> Result<String, StoreError> {
        let path = object_path(model, None, Utc::now().timestamp_millis(), &file.file_name);
        self.upload(file, storage::buckets::IMAGES, &path, model).await
    }

    /// Uploads a specification asset for `model`. The subfolder branches on
    /// the MIME type: images land in `content/images`, everything else
    /// (PDFs) in `content/documents`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::upload_product_image`].
    pub async fn upload_product_content(
        &self,
        file: &MediaFile,
        model: &str,
    ) -> Result<String, StoreError> {
        let subfolder = if file.content_type.starts_with("image/") {
            "content/images"
        } else {
            "content/documents"
        };
        let path = object_path(
            model,
            Some(subfolder),
            Utc::now().timestamp_millis(),
            &file.file_name,
        );
        self.upload(file, storage::buckets::CONTENT, &path, model).await
    }

    /// Uploads a video for `model` and returns its public URL.
    ///
    /// # Errors
    ///
    /// Same as [`Self::upload_product_image`].
    pub async fn upload_product_video(
        &self,
        file: &MediaFile,
        model: &str,
    ) -> Result<String, StoreError> {
        let path = object_path(
            model,
            Some("videos"),
            Utc::now().timestamp_millis(),
            &file.file_name,
        );
        self.upload(file, storage::buckets::VIDEOS, &path, model).await
    }

    /// Removes a single object from a bucket.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Transfer`] if the removal is rejected.
    pub async fn delete_file(&self, bucket: &str, path: &str) -> Result<(), StoreError> {
        storage::remove_objects(&self.remote, bucket, &[path.to_string()])
            .await
            .map_err(|e| StoreError::Transfer {
                file_name: path.to_string(),
                message: e.to_string(),
            })
    }

    async fn upload(
        &self,
        file: &MediaFile,
        bucket: &str,
        path: &str,
        model: &str,
    ) -> Result<String, StoreError> {
        if model.trim().is_empty() {
            return Err(StoreError::validation(
                "a product model is required to build the upload path",
            ));
        }
        if file.content_type.is_empty() {
            return Err(StoreError::validation(format!(
                "file {} has no MIME type",
                file.file_name
            )));
        }

        storage::upload_object(
            &self.remote,
            bucket,
            path,
            file.bytes.clone(),
            &file.content_type,
        )
        .await
        .map_err(|e| {
            tracing::warn!(bucket, path, error = %e, "asset upload failed");
            StoreError::Transfer {
                file_name: file.file_name.clone(),
                message: e.to_string(),
            }
        })?;

        let url = storage::public_url(&self.remote, bucket, path);
        tracing::debug!(bucket, path, "asset uploaded");
        Ok(url)
    }
}

/// Builds the deterministic object path
/// `products/{model}/[{subfolder}/]{timestamp}_{file_name}`.
fn object_path(model: &str, subfolder: Option<&str>, timestamp_millis: i64, file_name: &str) -> String {
    match subfolder {
        Some(sub) => format!("products/{model}/{sub}/{timestamp_millis}_{file_name}"),
        None => format!("products/{model}/{timestamp_millis}_{file_name}"),
    }
}
