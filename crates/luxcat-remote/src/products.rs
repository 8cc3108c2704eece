//! Table operations for `products`.

use luxcat_core::Product;
use reqwest::Method;

use crate::client::RemoteClient;
use crate::error::RemoteError;
use crate::normalize::canonical_product;
use crate::types::{JoinedProductRow, ProductChanges, ProductInsert};

/// `select` expression embedding the category on every product read/write
/// representation, so mirrors always carry the joined name.
const JOINED_SELECT: &str = "*,category:categories(id,name)";

/// Reads all products joined with their category, newest first.
///
/// # Errors
///
/// Returns [`RemoteError`] if the read fails or the body does not parse.
pub async fn list_products(client: &RemoteClient) -> Result<Vec<Product>, RemoteError> {
    let mut url = client.endpoint(&["rest", "v1", "products"]);
    url.query_pairs_mut()
        .append_pair("select", JOINED_SELECT)
        .append_pair("order", "created_at.desc");

    let rows: Vec<JoinedProductRow> = client
        .execute_json(client.request(Method::GET, url), "product list")
        .await?;
    Ok(rows.into_iter().map(canonical_product).collect())
}

/// Inserts one product and returns the stored record (with joined category
/// name and remote-assigned `id`/timestamps).
///
/// # Errors
///
/// Returns [`RemoteError::Rejected`] with the backend message when the
/// insert is refused (missing required field, duplicate `model`, unknown
/// `category_id`).
pub async fn insert_product(
    client: &RemoteClient,
    insert: &ProductInsert,
) -> Result<Product, RemoteError> {
    let mut url = client.endpoint(&["rest", "v1", "products"]);
    url.query_pairs_mut().append_pair("select", JOINED_SELECT);

    let builder = client
        .request(Method::POST, url)
        .header("Prefer", "return=representation")
        .json(&[insert]);

    let rows: Vec<JoinedProductRow> = client.execute_json(builder, "product insert").await?;
    rows.into_iter()
        .next()
        .map(canonical_product)
        .ok_or_else(|| RemoteError::MissingRow {
            context: format!("insert of product {}", insert.model),
        })
}

/// Applies a partial update to the product with `id` and returns the
/// updated record.
///
/// # Errors
///
/// Returns [`RemoteError::MissingRow`] when no row matches `id`, or
/// [`RemoteError::Rejected`] when the write is refused.
pub async fn update_product(
    client: &RemoteClient,
    id: i64,
    changes: &ProductChanges,
) -> Result<Product, RemoteError> {
    let mut url = client.endpoint(&["rest", "v1", "products"]);
    url.query_pairs_mut()
        .append_pair("id", &format!("eq.{id}"))
        .append_pair("select", JOINED_SELECT);

    let builder = client
        .request(Method::PATCH, url)
        .header("Prefer", "return=representation")
        .json(changes);

    let rows: Vec<JoinedProductRow> = client.execute_json(builder, "product update").await?;
    rows.into_iter()
        .next()
        .map(canonical_product)
        .ok_or_else(|| RemoteError::MissingRow {
            context: format!("update of product id {id}"),
        })
}

/// Deletes the product with the given primary key.
///
/// # Errors
///
/// Returns [`RemoteError`] if the delete is rejected.
pub async fn delete_product_by_id(client: &RemoteClient, id: i64) -> Result<(), RemoteError> {
    let mut url = client.endpoint(&["rest", "v1", "products"]);
    url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));
    client.execute_ok(client.request(Method::DELETE, url)).await
}

/// Deletes the product with the given `model` (the public read path keys
/// deletions by model rather than id).
///
/// # Errors
///
/// Returns [`RemoteError`] if the delete is rejected.
pub async fn delete_product_by_model(
    client: &RemoteClient,
    model: &str,
) -> Result<(), RemoteError> {
    let mut url = client.endpoint(&["rest", "v1", "products"]);
    url.query_pairs_mut()
        .append_pair("model", &format!("eq.{model}"));
    client.execute_ok(client.request(Method::DELETE, url)).await
}

/// Whether any product still references `category_id`. Used to guard
/// category deletion.
///
/// # Errors
///
/// Returns [`RemoteError`] if the read fails.
pub async fn category_has_products(
    client: &RemoteClient,
    category_id: i64,
) -> Result<bool, RemoteError> {
    let mut url = client.endpoint(&["rest", "v1", "products"]);
    url.query_pairs_mut()
        .append_pair("select", "id")
        .append_pair("category_id", &format!("eq.{category_id}"))
        .append_pair("limit", "1");

    let rows: Vec<serde_json::Value> = client
        .execute_json(client.request(Method::GET, url), "category reference check")
        .await?;
    Ok(!rows.is_empty())
}
