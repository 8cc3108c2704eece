//! Wire types for the hosted data service, one DTO per query shape.
//!
//! ## Observed join spellings on product reads
//!
//! The catalog read embeds the category
//! (`select=*,category:categories(id,name)`), but historical clients of the
//! same backend have produced three spellings of the embedded relation:
//!
//! - aliased: `"category": {"id": 1, "name": "Moving Head"}`
//! - unaliased table name: `"categories": {"id": 1, "name": "Moving Head"}`
//! - flattened: `"category_name": "Moving Head"`
//!
//! [`JoinedProductRow`] accepts all three; `normalize` resolves them (in
//! that precedence order) into the canonical `Product.category_name`. Rows
//! inserted before the join existed carry none of them — the field stays
//! absent rather than defaulting.
//!
//! ## Array columns
//!
//! `images` / `contents` / `videos` are `text[]` columns that may be `null`
//! on legacy rows; `#[serde(default)]` maps both `null` and absence to an
//! empty list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Embedded category relation on a joined product read.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRef {
    pub id: i64,
    pub name: String,
}

/// A product row from the joined catalog read
/// (`GET /rest/v1/products?select=*,category:categories(id,name)`).
#[derive(Debug, Clone, Deserialize)]
pub struct JoinedProductRow {
    #[serde(default)]
    pub id: Option<i64>,
    pub model: String,
    pub description: String,
    #[serde(default)]
    pub technical_description: Option<String>,
    pub category_id: i64,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub contents: Option<Vec<String>>,
    #[serde(default)]
    pub videos: Option<Vec<String>>,
    #[serde(rename = "new")]
    pub is_new: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Aliased embed (`category:categories(...)`).
    #[serde(default)]
    pub category: Option<CategoryRef>,
    /// Unaliased embed (`categories(...)`).
    #[serde(default)]
    pub categories: Option<CategoryRef>,
    /// Flattened join produced by view-backed reads.
    #[serde(default)]
    pub category_name: Option<String>,
}

/// A category row (`GET /rest/v1/categories?select=*`).
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRow {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Insert payload for `POST /rest/v1/products`. Carries no `id` or
/// timestamps: the remote store assigns those.
#[derive(Debug, Clone, Serialize)]
pub struct ProductInsert {
    pub model: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technical_description: Option<String>,
    pub category_id: i64,
    pub images: Vec<String>,
    pub contents: Vec<String>,
    pub videos: Vec<String>,
    #[serde(rename = "new")]
    pub is_new: bool,
}

/// Partial-update payload for `PATCH /rest/v1/products?id=eq.{id}`.
/// Only supplied fields are serialized, so unset fields are left untouched
/// remotely.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technical_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub videos: Option<Vec<String>>,
    #[serde(rename = "new", skip_serializing_if = "Option::is_none")]
    pub is_new: Option<bool>,
}

impl ProductChanges {
    /// `true` when no field is set; callers skip the remote round-trip for
    /// an empty patch.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.model.is_none()
            && self.description.is_none()
            && self.technical_description.is_none()
            && self.category_id.is_none()
            && self.images.is_none()
            && self.contents.is_none()
            && self.videos.is_none()
            && self.is_new.is_none()
    }
}

/// Row returned by the `authenticate_user` RPC.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminUserRow {
    pub username: String,
    pub role: String,
}
