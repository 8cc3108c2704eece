//! The `authenticate_user` RPC.

use luxcat_core::AdminUser;
use reqwest::Method;

use crate::client::RemoteClient;
use crate::error::RemoteError;
use crate::types::AdminUserRow;

/// Authenticates a back-office user against the remote store.
///
/// Returns `Ok(None)` when the credentials match no user. The RPC has been
/// observed returning either a single object, a single-element array
/// (`returns setof`), or JSON `null` — all three are handled here.
///
/// Role gating (`role == "admin"`) is the caller's concern; this function
/// reports whatever role the store holds.
///
/// # Errors
///
/// Returns [`RemoteError`] if the call fails or a returned row does not
/// parse.
pub async fn authenticate(
    client: &RemoteClient,
    username: &str,
    password: &str,
) -> Result<Option<AdminUser>, RemoteError> {
    let url = client.endpoint(&["rest", "v1", "rpc", "authenticate_user"]);
    let builder = client.request(Method::POST, url).json(&serde_json::json!({
        "username": username,
        "password": password,
    }));

    let value: serde_json::Value = client.execute_json(builder, "authenticate_user rpc").await?;

    let row = match value {
        serde_json::Value::Null => None,
        serde_json::Value::Array(items) => items.into_iter().next(),
        other => Some(other),
    };

    row.map(|v| {
        serde_json::from_value::<AdminUserRow>(v).map_err(|e| RemoteError::Deserialize {
            context: "authenticate_user row".to_string(),
            source: e,
        })
    })
    .transpose()
    .map(|opt| {
        opt.map(|row| AdminUser {
            username: row.username,
            role: row.role,
        })
    })
}
