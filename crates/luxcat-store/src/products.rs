//! Product Store: the authoritative in-memory view of the catalog for one
//! session, mediating every read/write against the remote store.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use luxcat_core::{catalog, Product};
use luxcat_remote::{ProductChanges, ProductInsert, RemoteClient};
use tokio_util::sync::CancellationToken;

use crate::error::StoreError;
use crate::media::{MediaFile, MediaUploader, UploadWarning};
use crate::race_cancellation;

/// Deletion key: admin flows delete by primary key, the public product-list
/// read path deletes by `model`. Both are supported.
#[derive(Debug, Clone)]
pub enum ProductKey {
    Id(i64),
    Model(String),
}

/// A not-yet-persisted product. Carries no `id` or timestamps by
/// construction — the remote store assigns those on insert.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub model: String,
    pub description: String,
    pub technical_description: Option<String>,
    pub category_id: i64,
    pub images: Vec<String>,
    pub contents: Vec<String>,
    pub videos: Vec<String>,
    pub is_new: bool,
}

/// Files attached to a create/edit form, grouped by destination bucket.
#[derive(Debug, Clone, Default)]
pub struct MediaAttachments {
    pub images: Vec<MediaFile>,
    pub contents: Vec<MediaFile>,
    pub videos: Vec<MediaFile>,
}

impl MediaAttachments {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty() && self.contents.is_empty() && self.videos.is_empty()
    }
}

/// Owns the in-memory product list for the lifetime of the scope that
/// created it. The mirror is rebuilt wholesale by [`ProductStore::load`] and
/// patched incrementally after each successful mutation; it is never
/// authoritative before the first load completes.
pub struct ProductStore {
    remote: Arc<RemoteClient>,
    uploader: MediaUploader,
    products: Vec<Product>,
    loaded: bool,
    saving: bool,
    last_saved: Option<DateTime<Utc>>,
    cancel: CancellationToken,
}

impl ProductStore {
    /// Creates a store around an injected client. `cancel` is owned by the
    /// consuming scope; cancelling it aborts any in-flight operation with
    /// [`StoreError::Cancelled`] instead of leaving flags stuck.
    #[must_use]
    pub fn new(remote: Arc<RemoteClient>, cancel: CancellationToken) -> Self {
        Self {
            uploader: MediaUploader::new(Arc::clone(&remote)),
            remote,
            products: Vec::new(),
            loaded: false,
            saving: false,
            last_saved: None,
            cancel,
        }
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// True once the initial load has completed (successfully or not).
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// True while a mutation is in flight; surfaced by the admin UI.
    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    #[must_use]
    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.last_saved
    }

    #[must_use]
    pub fn find_by_model(&self, model: &str) -> Option<&Product> {
        catalog::find_by_model(&self.products, model)
    }

    /// Pure derived view: case-insensitive substring match against `model`
    /// or `description`, intersected with an optional exact category match.
    /// Does not mutate stored state.
    #[must_use]
    pub fn search(&self, term: &str, category_id: Option<i64>) -> Vec<Product> {
        catalog::search_products(&self.products, term, category_id)
    }

    /// Replaces the mirror with all products (joined with category name),
    /// newest first. On failure the mirror is left empty; there is no
    /// automatic retry or polling — callers re-trigger explicitly.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] when the read fails, or
    /// [`StoreError::Cancelled`].
    pub async fn load(&mut self) -> Result<(), StoreError> {
        let result =
            race_cancellation(&self.cancel, luxcat_remote::list_products(&self.remote)).await;

        match result {
            Ok(products) => {
                tracing::debug!(count = products.len(), "product list loaded");
                self.products = products;
                self.loaded = true;
                Ok(())
            }
            Err(StoreError::Cancelled) => Err(StoreError::Cancelled),
            Err(e) => {
                tracing::error!(error = %e, "loading products failed");
                self.products.clear();
                self.loaded = true;
                Err(e)
            }
        }
    }

    /// Uploads any attachments, appends the resulting URLs to the draft's
    /// asset lists, inserts the record, and prepends the stored
    /// representation to the mirror.
    ///
    /// A failed upload does not abort the save: the product persists with
    /// whichever URLs succeeded and the failures come back as
    /// [`UploadWarning`]s for the caller to surface.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] for an empty `model` or
    /// `description` (no network call is made), [`StoreError::Persistence`]
    /// when the insert is rejected, or [`StoreError::Cancelled`].
    pub async fn create(
        &mut self,
        draft: ProductDraft,
        attachments: MediaAttachments,
    ) -> Result<(Product, Vec<UploadWarning>), StoreError> {
        if draft.model.trim().is_empty() {
            return Err(StoreError::validation("product model is required"));
        }
        if draft.description.trim().is_empty() {
            return Err(StoreError::validation("product description is required"));
        }

        self.saving = true;
        let result = self.create_inner(draft, attachments).await;
        self.saving = false;
        if result.is_ok() {
            self.last_saved = Some(Utc::now());
        }
        result
    }

    async fn create_inner(
        &mut self,
        mut draft: ProductDraft,
        attachments: MediaAttachments,
    ) -> Result<(Product, Vec<UploadWarning>), StoreError> {
        let mut warnings = Vec::new();

        for file in &attachments.images {
            match race_cancellation(
                &self.cancel,
                self.uploader.upload_product_image(file, &draft.model),
            )
            .await
            {
                Ok(url) => draft.images.push(url),
                Err(StoreError::Cancelled) => return Err(StoreError::Cancelled),
                Err(e) => warnings.push(warn_upload(file, &e)),
            }
        }
        for file in &attachments.contents {
            match race_cancellation(
                &self.cancel,
                self.uploader.upload_product_content(file, &draft.model),
            )
            .await
            {
                Ok(url) => draft.contents.push(url),
                Err(StoreError::Cancelled) => return Err(StoreError::Cancelled),
                Err(e) => warnings.push(warn_upload(file, &e)),
            }
        }
        for file in &attachments.videos {
            match race_cancellation(
                &self.cancel,
                self.uploader.upload_product_video(file, &draft.model),
            )
            .await
            {
                Ok(url) => draft.videos.push(url),
                Err(StoreError::Cancelled) => return Err(StoreError::Cancelled),
                Err(e) => warnings.push(warn_upload(file, &e)),
            }
        }

        let insert = ProductInsert {
            model: draft.model,
            description: draft.description,
            technical_description: draft.technical_description,
            category_id: draft.category_id,
            images: draft.images,
            contents: draft.contents,
            videos: draft.videos,
            is_new: draft.is_new,
        };

        let product = race_cancellation(
            &self.cancel,
            luxcat_remote::insert_product(&self.remote, &insert),
        )
        .await?;

        tracing::info!(model = %product.model, id = ?product.id, "product created");
        self.products.insert(0, product.clone());
        Ok((product, warnings))
    }

    /// Writes only the supplied fields, then replaces the matching mirror
    /// record by id. No other record is touched.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] for an empty patch,
    /// [`StoreError::Persistence`] when no record with `id` exists remotely
    /// or the write is rejected, or [`StoreError::Cancelled`].
    pub async fn update(
        &mut self,
        id: i64,
        changes: ProductChanges,
    ) -> Result<Product, StoreError> {
        if changes.is_empty() {
            return Err(StoreError::validation("update contains no fields"));
        }

        self.saving = true;
        let result = race_cancellation(
            &self.cancel,
            luxcat_remote::update_product(&self.remote, id, &changes),
        )
        .await;
        self.saving = false;

        let product = result?;
        self.last_saved = Some(Utc::now());

        if let Some(slot) = self.products.iter_mut().find(|p| p.id == Some(id)) {
            *slot = product.clone();
        }
        tracing::info!(id, "product updated");
        Ok(product)
    }

    /// Deletes by primary key or by model, then removes the matching mirror
    /// entry.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] when the delete is rejected, or
    /// [`StoreError::Cancelled`].
    pub async fn delete(&mut self, key: ProductKey) -> Result<(), StoreError> {
        self.saving = true;
        let result = match &key {
            ProductKey::Id(id) => {
                race_cancellation(
                    &self.cancel,
                    luxcat_remote::delete_product_by_id(&self.remote, *id),
                )
                .await
            }
            ProductKey::Model(model) => {
                race_cancellation(
                    &self.cancel,
                    luxcat_remote::delete_product_by_model(&self.remote, model),
                )
                .await
            }
        };
        self.saving = false;
        result?;
        self.last_saved = Some(Utc::now());

        self.products.retain(|p| match &key {
            ProductKey::Id(id) => p.id != Some(*id),
            ProductKey::Model(model) => p.model != *model,
        });
        tracing::info!(?key, "product deleted");
        Ok(())
    }
}

fn warn_upload(file: &MediaFile, error: &StoreError) -> UploadWarning {
    tracing::warn!(file = %file.file_name, error = %error, "asset upload failed; continuing save");
    UploadWarning {
        file_name: file.file_name.clone(),
        message: error.to_string(),
    }
}
