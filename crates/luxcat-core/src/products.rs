use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog product as rendered by the storefront and edited through the
/// back-office.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Primary key assigned by the remote store on creation; `None` for
    /// drafts that have not been persisted yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Unique human-readable identifier (e.g. `"SPL-LED-700"`). Doubles as
    /// the UI list key and the detail-page slug, so two products must never
    /// share a `model` value.
    pub model: String,
    pub description: String,
    #[serde(default)]
    pub technical_description: Option<String>,
    /// Foreign reference to a [`Category`](crate::Category).
    pub category_id: i64,
    /// Image URLs in display order.
    #[serde(default)]
    pub images: Vec<String>,
    /// Specification assets in display order. Entries point either to PDF
    /// documents or to images; see [`crate::catalog::is_pdf_file`].
    #[serde(default)]
    pub contents: Vec<String>,
    /// Embedded video URLs in display order.
    #[serde(default)]
    pub videos: Vec<String>,
    /// Controls the "new" badge on the storefront.
    #[serde(rename = "new")]
    pub is_new: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Category name from the read-time join. Denormalized convenience for
    /// display; `category_id` remains the source of truth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
}

impl Product {
    /// Returns `true` once the remote store has assigned a primary key.
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// First image URL, used as the grid thumbnail.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    #[must_use]
    pub fn has_videos(&self) -> bool {
        !self.videos.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_product(model: &str) -> Product {
        Product {
            id: Some(7),
            model: model.to_string(),
            description: "700W moving head".to_string(),
            technical_description: None,
            category_id: 1,
            images: vec!["https://cdn.example.com/a.jpg".to_string()],
            contents: vec![],
            videos: vec![],
            is_new: true,
            created_at: None,
            updated_at: None,
            category_name: Some("Moving Head".to_string()),
        }
    }

    #[test]
    fn primary_image_is_first_entry() {
        let product = make_product("SPL-LED-700");
        assert_eq!(
            product.primary_image(),
            Some("https://cdn.example.com/a.jpg")
        );
    }

    #[test]
    fn primary_image_none_when_no_images() {
        let mut product = make_product("SPL-LED-700");
        product.images.clear();
        assert!(product.primary_image().is_none());
    }

    #[test]
    fn is_persisted_tracks_id() {
        let mut product = make_product("SPL-LED-700");
        assert!(product.is_persisted());
        product.id = None;
        assert!(!product.is_persisted());
    }

    #[test]
    fn new_flag_serializes_under_wire_name() {
        let product = make_product("SPL-LED-700");
        let json = serde_json::to_value(&product).expect("serialize");
        assert_eq!(json["new"], serde_json::json!(true));
        assert!(json.get("is_new").is_none());
    }

    #[test]
    fn deserializes_with_absent_optional_arrays() {
        let json = r#"{
            "model": "SPL-LED-681",
            "description": "beam effect",
            "category_id": 2,
            "new": false
        }"#;
        let product: Product = serde_json::from_str(json).expect("deserialize");
        assert!(product.id.is_none());
        assert!(product.images.is_empty());
        assert!(product.contents.is_empty());
        assert!(product.videos.is_empty());
        assert!(!product.is_new);
    }
}
