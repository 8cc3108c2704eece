use serde::Serialize;

use crate::{Category, Product};

/// Per-category slice of the dashboard: product count and share of the total.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryShare {
    pub category_id: i64,
    pub name: String,
    pub count: usize,
    pub percentage: f64,
}

/// Aggregates the back-office dashboard reads from the in-memory catalog.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogStats {
    pub total_products: usize,
    pub new_products: usize,
    pub with_videos: usize,
    /// Products carrying more than one specification asset.
    pub with_extra_contents: usize,
    pub with_description: usize,
    pub with_images: usize,
    pub with_contents: usize,
    pub per_category: Vec<CategoryShare>,
}

impl CatalogStats {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn compute(products: &[Product], categories: &[Category]) -> Self {
        let total_products = products.len();

        let per_category = categories
            .iter()
            .map(|category| {
                let count = products
                    .iter()
                    .filter(|p| p.category_id == category.id)
                    .count();
                let percentage = if total_products > 0 {
                    count as f64 / total_products as f64 * 100.0
                } else {
                    0.0
                };
                CategoryShare {
                    category_id: category.id,
                    name: category.name.clone(),
                    count,
                    percentage,
                }
            })
            .collect();

        Self {
            total_products,
            new_products: products.iter().filter(|p| p.is_new).count(),
            with_videos: products.iter().filter(|p| !p.videos.is_empty()).count(),
            with_extra_contents: products.iter().filter(|p| p.contents.len() > 1).count(),
            with_description: products
                .iter()
                .filter(|p| !p.description.is_empty())
                .count(),
            with_images: products.iter().filter(|p| !p.images.is_empty()).count(),
            with_contents: products.iter().filter(|p| !p.contents.is_empty()).count(),
            per_category,
        }
    }
}
