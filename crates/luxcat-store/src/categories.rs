//! Category Store: mirror of the category table with the same
//! load/create/update/delete contract as the Product Store, scoped to
//! `{id, name}`.

use std::sync::Arc;

use luxcat_core::Category;
use luxcat_remote::RemoteClient;
use tokio_util::sync::CancellationToken;

use crate::error::StoreError;
use crate::race_cancellation;

pub struct CategoryStore {
    remote: Arc<RemoteClient>,
    categories: Vec<Category>,
    loaded: bool,
    cancel: CancellationToken,
}

impl CategoryStore {
    #[must_use]
    pub fn new(remote: Arc<RemoteClient>, cancel: CancellationToken) -> Self {
        Self {
            remote,
            categories: Vec::new(),
            loaded: false,
            cancel,
        }
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    #[must_use]
    pub fn get_by_id(&self, id: i64) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Replaces the mirror with all categories, name ascending. On failure
    /// the mirror is left empty.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] when the read fails, or
    /// [`StoreError::Cancelled`].
    pub async fn load(&mut self) -> Result<(), StoreError> {
        let result =
            race_cancellation(&self.cancel, luxcat_remote::list_categories(&self.remote)).await;

        match result {
            Ok(categories) => {
                tracing::debug!(count = categories.len(), "category list loaded");
                self.categories = categories;
                self.loaded = true;
                Ok(())
            }
            Err(StoreError::Cancelled) => Err(StoreError::Cancelled),
            Err(e) => {
                tracing::error!(error = %e, "loading categories failed");
                self.categories.clear();
                self.loaded = true;
                Err(e)
            }
        }
    }

    /// Inserts a category, then resorts the mirror by name ascending.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] when `name` trims to empty (no
    /// network call), [`StoreError::Persistence`] when the insert is
    /// rejected (the remote store enforces name uniqueness), or
    /// [`StoreError::Cancelled`].
    pub async fn add_category(&mut self, name: &str) -> Result<Category, StoreError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(StoreError::validation("category name is required"));
        }

        let category = race_cancellation(
            &self.cancel,
            luxcat_remote::insert_category(&self.remote, trimmed),
        )
        .await?;

        tracing::info!(id = category.id, name = %category.name, "category created");
        self.categories.push(category.clone());
        self.sort_by_name();
        Ok(category)
    }

    /// Renames a category. A no-op (no remote call) when the trimmed new
    /// name equals the current one, to avoid spurious writes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] when `name` trims to empty,
    /// [`StoreError::Persistence`] when no record with `id` exists remotely
    /// or the write is rejected, or [`StoreError::Cancelled`].
    pub async fn update_category(&mut self, id: i64, name: &str) -> Result<Category, StoreError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(StoreError::validation("category name is required"));
        }
        if let Some(current) = self.get_by_id(id) {
            if current.name == trimmed {
                return Ok(current.clone());
            }
        }

        let category = race_cancellation(
            &self.cancel,
            luxcat_remote::update_category(&self.remote, id, trimmed),
        )
        .await?;

        tracing::info!(id, name = %category.name, "category renamed");
        if let Some(slot) = self.categories.iter_mut().find(|c| c.id == id) {
            *slot = category.clone();
        }
        self.sort_by_name();
        Ok(category)
    }

    /// Deletes a category by id. Blocked while any product still references
    /// it: the reference check runs first and a populated category fails
    /// with a validation error instead of stranding products on a dangling
    /// `category_id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] when products still reference the
    /// category, [`StoreError::Persistence`] when the check or delete is
    /// rejected, or [`StoreError::Cancelled`].
    pub async fn delete_category(&mut self, id: i64) -> Result<(), StoreError> {
        let in_use = race_cancellation(
            &self.cancel,
            luxcat_remote::category_has_products(&self.remote, id),
        )
        .await?;
        if in_use {
            return Err(StoreError::validation(
                "category is still referenced by products",
            ));
        }

        race_cancellation(
            &self.cancel,
            luxcat_remote::delete_category(&self.remote, id),
        )
        .await?;

        tracing::info!(id, "category deleted");
        self.categories.retain(|c| c.id != id);
        Ok(())
    }

    fn sort_by_name(&mut self) {
        self.categories
            .sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    }
}
