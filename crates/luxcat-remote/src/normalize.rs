//! Normalization from wire rows to the canonical [`luxcat_core`] entities.
//!
//! Whatever spelling the joined read uses for the embedded category (see
//! `types.rs`), exactly one function converts it into [`Product`]; nothing
//! downstream ever touches a raw row.

use luxcat_core::{Category, Product};

use crate::types::{CategoryRow, JoinedProductRow};

/// Converts a joined product row into the canonical [`Product`].
///
/// The embedded category is resolved with precedence aliased `category` →
/// unaliased `categories` → flattened `category_name`; `null` array columns
/// become empty lists.
#[must_use]
pub fn canonical_product(row: JoinedProductRow) -> Product {
    let category_name = row
        .category
        .map(|c| c.name)
        .or_else(|| row.categories.map(|c| c.name))
        .or(row.category_name);

    Product {
        id: row.id,
        model: row.model,
        description: row.description,
        technical_description: row.technical_description,
        category_id: row.category_id,
        images: row.images.unwrap_or_default(),
        contents: row.contents.unwrap_or_default(),
        videos: row.videos.unwrap_or_default(),
        is_new: row.is_new,
        created_at: row.created_at,
        updated_at: row.updated_at,
        category_name,
    }
}

/// Converts a category row into the canonical [`Category`].
#[must_use]
pub fn canonical_category(row: CategoryRow) -> Category {
    Category {
        id: row.id,
        name: row.name,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CategoryRef;

    fn base_row() -> JoinedProductRow {
        serde_json::from_str(
            r#"{
                "id": 1,
                "model": "SPL-LED-700",
                "description": "wash",
                "category_id": 1,
                "new": false
            }"#,
        )
        .expect("row")
    }

    #[test]
    fn resolves_aliased_embed() {
        let mut row = base_row();
        row.category = Some(CategoryRef {
            id: 1,
            name: "Moving Head".to_string(),
        });
        let product = canonical_product(row);
        assert_eq!(product.category_name.as_deref(), Some("Moving Head"));
    }

    #[test]
    fn resolves_unaliased_embed() {
        let mut row = base_row();
        row.categories = Some(CategoryRef {
            id: 1,
            name: "Laser".to_string(),
        });
        let product = canonical_product(row);
        assert_eq!(product.category_name.as_deref(), Some("Laser"));
    }

    #[test]
    fn resolves_flattened_join() {
        let mut row = base_row();
        row.category_name = Some("Strobe".to_string());
        let product = canonical_product(row);
        assert_eq!(product.category_name.as_deref(), Some("Strobe"));
    }

    #[test]
    fn aliased_embed_wins_over_flattened() {
        let mut row = base_row();
        row.category = Some(CategoryRef {
            id: 1,
            name: "Moving Head".to_string(),
        });
        row.category_name = Some("stale".to_string());
        let product = canonical_product(row);
        assert_eq!(product.category_name.as_deref(), Some("Moving Head"));
    }

    #[test]
    fn absent_join_stays_absent() {
        let product = canonical_product(base_row());
        assert!(product.category_name.is_none());
    }

    #[test]
    fn null_arrays_become_empty_lists() {
        let product = canonical_product(base_row());
        assert!(product.images.is_empty());
        assert!(product.contents.is_empty());
        assert!(product.videos.is_empty());
    }
}
