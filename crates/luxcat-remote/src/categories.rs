//! Table operations for `categories`.

use luxcat_core::Category;
use reqwest::Method;

use crate::client::RemoteClient;
use crate::error::RemoteError;
use crate::normalize::canonical_category;
use crate::types::CategoryRow;

/// Reads all categories ordered by name ascending.
///
/// # Errors
///
/// Returns [`RemoteError`] if the read fails or the body does not parse.
pub async fn list_categories(client: &RemoteClient) -> Result<Vec<Category>, RemoteError> {
    let mut url = client.endpoint(&["rest", "v1", "categories"]);
    url.query_pairs_mut()
        .append_pair("select", "*")
        .append_pair("order", "name.asc");

    let rows: Vec<CategoryRow> = client
        .execute_json(client.request(Method::GET, url), "category list")
        .await?;
    Ok(rows.into_iter().map(canonical_category).collect())
}

/// Inserts one category and returns the stored record.
///
/// # Errors
///
/// Returns [`RemoteError::Rejected`] with the backend message when the
/// insert is refused (the remote store enforces name uniqueness).
pub async fn insert_category(client: &RemoteClient, name: &str) -> Result<Category, RemoteError> {
    let url = client.endpoint(&["rest", "v1", "categories"]);
    let builder = client
        .request(Method::POST, url)
        .header("Prefer", "return=representation")
        .json(&serde_json::json!([{ "name": name }]));

    let rows: Vec<CategoryRow> = client.execute_json(builder, "category insert").await?;
    rows.into_iter()
        .next()
        .map(canonical_category)
        .ok_or_else(|| RemoteError::MissingRow {
            context: format!("insert of category {name}"),
        })
}

/// Renames the category with `id` and returns the updated record.
///
/// # Errors
///
/// Returns [`RemoteError::MissingRow`] when no row matches `id`, or
/// [`RemoteError::Rejected`] when the write is refused.
pub async fn update_category(
    client: &RemoteClient,
    id: i64,
    name: &str,
) -> Result<Category, RemoteError> {
    let mut url = client.endpoint(&["rest", "v1", "categories"]);
    url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));

    let builder = client
        .request(Method::PATCH, url)
        .header("Prefer", "return=representation")
        .json(&serde_json::json!({ "name": name }));

    let rows: Vec<CategoryRow> = client.execute_json(builder, "category update").await?;
    rows.into_iter()
        .next()
        .map(canonical_category)
        .ok_or_else(|| RemoteError::MissingRow {
            context: format!("update of category id {id}"),
        })
}

/// Deletes the category with the given primary key.
///
/// # Errors
///
/// Returns [`RemoteError`] if the delete is rejected.
pub async fn delete_category(client: &RemoteClient, id: i64) -> Result<(), RemoteError> {
    let mut url = client.endpoint(&["rest", "v1", "categories"]);
    url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));
    client.execute_ok(client.request(Method::DELETE, url)).await
}
