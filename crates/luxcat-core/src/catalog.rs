//! Pure views over an in-memory product list: substring search, category and
//! new-flag filtering, fixed-size pagination windows, related-product
//! sampling, and the featured allow-list.
//!
//! Every function here is a single-pass, synchronous, side-effect-free
//! transform over its inputs; no I/O and no stored state.

use percent_encoding::percent_decode_str;
use rand::seq::SliceRandom;

use crate::{Category, Product};

/// Sentinel category name that matches every product, as used by the
/// storefront's category selector.
pub const ALL_CATEGORIES: &str = "Todos";

/// Models promoted to the top of the homepage grid, in display order.
pub const FEATURED_MODELS: [&str; 6] = [
    "SPL-LED-700",
    "SPL-LED-681",
    "SPL-LED-M600BSWF",
    "SPL-MHL-420 IP",
    "SPL-LED-M400B",
    "SPL-MHL-M251G YH",
];

/// Looks a product up by `model`, percent-decoding the needle first so
/// URL-encoded slugs (`SPL-MHL-420%20IP`) resolve.
///
/// An invalid percent-encoding falls back to matching the raw input.
#[must_use]
pub fn find_by_model<'a>(products: &'a [Product], model: &str) -> Option<&'a Product> {
    let decoded = percent_decode_str(model)
        .decode_utf8()
        .map_or_else(|_| model.to_string(), |cow| cow.into_owned());
    products.iter().find(|p| p.model == decoded)
}

/// Filters the product list with three independent predicates ANDed
/// together:
///
/// - case-insensitive substring match of `query` against `model` or
///   `description`,
/// - category-name match resolved through `categories` (empty string or
///   [`ALL_CATEGORIES`] matches everything),
/// - `only_new` requires the "new" badge when set.
#[must_use]
pub fn filter_products(
    products: &[Product],
    query: &str,
    category_name: &str,
    only_new: bool,
    categories: &[Category],
) -> Vec<Product> {
    let needle = query.to_lowercase();

    products
        .iter()
        .filter(|p| {
            let matches_query = p.model.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle);

            let matches_category = category_name.is_empty()
                || category_name == ALL_CATEGORIES
                || categories
                    .iter()
                    .find(|c| c.id == p.category_id)
                    .is_some_and(|c| c.name == category_name);

            let matches_new = !only_new || p.is_new;

            matches_query && matches_category && matches_new
        })
        .cloned()
        .collect()
}

/// Case-insensitive substring search against `model` or `description`,
/// intersected with an optional exact `category_id` match.
#[must_use]
pub fn search_products(products: &[Product], term: &str, category_id: Option<i64>) -> Vec<Product> {
    let needle = term.to_lowercase();

    products
        .iter()
        .filter(|p| {
            let matches_term = p.model.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle);
            let matches_category = category_id.is_none_or(|id| p.category_id == id);
            matches_term && matches_category
        })
        .cloned()
        .collect()
}

/// Returns the 1-indexed page window `[(page - 1) * page_size, page * page_size)`.
///
/// Out-of-range pages (including `page == 0`) yield an empty slice; clamping
/// is the caller's job — the UI resets to page 1 whenever filters change.
#[must_use]
pub fn paginate<T>(items: &[T], page_size: usize, page: usize) -> &[T] {
    if page_size == 0 || page == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Total page count for a list of `len` items at `page_size` per page.
#[must_use]
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Samples up to `count` products sharing the named category, excluding one
/// model (the product currently on screen).
///
/// The category is resolved by name through `categories`; an empty name, the
/// [`ALL_CATEGORIES`] sentinel, or an unresolvable name yields an empty list.
#[must_use]
pub fn related_in_category(
    products: &[Product],
    categories: &[Category],
    category_name: &str,
    count: usize,
    exclude_model: Option<&str>,
) -> Vec<Product> {
    if category_name.is_empty() || category_name == ALL_CATEGORIES {
        return Vec::new();
    }
    let Some(category) = categories.iter().find(|c| c.name == category_name) else {
        return Vec::new();
    };
    related_by_category_id(products, category.id, count, exclude_model)
}

/// Samples up to `count` products from `category_id`, excluding one model.
///
/// The pool is shuffled uniformly before truncation; reproducibility is not
/// guaranteed or required.
#[must_use]
pub fn related_by_category_id(
    products: &[Product],
    category_id: i64,
    count: usize,
    exclude_model: Option<&str>,
) -> Vec<Product> {
    let mut pool: Vec<Product> = products
        .iter()
        .filter(|p| p.category_id == category_id && exclude_model != Some(p.model.as_str()))
        .cloned()
        .collect();

    pool.shuffle(&mut rand::rng());
    pool.truncate(count);
    pool
}

/// Homepage selection: allow-listed models first, in [`FEATURED_MODELS`]
/// order, padded with the remaining products in their existing order until
/// `count` is reached or the pool is exhausted.
#[must_use]
pub fn featured_products(products: &[Product], count: usize) -> Vec<Product> {
    let mut picked: Vec<Product> = FEATURED_MODELS
        .iter()
        .filter_map(|model| products.iter().find(|p| p.model == *model))
        .cloned()
        .collect();

    if picked.len() < count {
        picked.extend(
            products
                .iter()
                .filter(|p| !FEATURED_MODELS.contains(&p.model.as_str()))
                .cloned(),
        );
    }

    picked.truncate(count);
    picked
}

/// Whether a specification URL points at a PDF document rather than an
/// image: case-insensitive `.pdf` suffix check with the query string
/// stripped first.
#[must_use]
pub fn is_pdf_file(url: &str) -> bool {
    let lowered = url.to_lowercase();
    let trimmed = lowered.trim();
    let path = trimmed.split('?').next().unwrap_or(trimmed);
    path.ends_with(".pdf")
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
