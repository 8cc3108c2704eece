//! The back-office login gate.

use luxcat_core::AdminUser;
use luxcat_remote::RemoteClient;
use tokio_util::sync::CancellationToken;

use crate::error::StoreError;
use crate::race_cancellation;

/// Proof that an administrator authenticated successfully. Back-office CLI
/// commands construct one before touching the stores.
#[derive(Debug)]
pub struct AdminSession {
    user: AdminUser,
}

impl AdminSession {
    /// Authenticates against the remote store and gates on the admin role.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Validation`] when the trimmed username or password is
    ///   empty (no network call is made).
    /// - [`StoreError::Unauthorized`] for unknown credentials or any
    ///   `role != "admin"`.
    /// - [`StoreError::Persistence`] / [`StoreError::Cancelled`] from the
    ///   remote call itself.
    pub async fn login(
        remote: &RemoteClient,
        cancel: &CancellationToken,
        username: &str,
        password: &str,
    ) -> Result<Self, StoreError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(StoreError::validation("username is required"));
        }
        if password.trim().is_empty() {
            return Err(StoreError::validation("password is required"));
        }

        let user = race_cancellation(
            cancel,
            luxcat_remote::authenticate(remote, username, password),
        )
        .await?;

        match user {
            Some(user) if user.is_admin() => {
                tracing::info!(username = %user.username, "admin login");
                Ok(Self { user })
            }
            Some(user) => {
                tracing::warn!(username = %user.username, role = %user.role, "non-admin login refused");
                Err(StoreError::Unauthorized {
                    reason: "only administrators may access the back-office".to_string(),
                })
            }
            None => Err(StoreError::Unauthorized {
                reason: "unknown username or password".to_string(),
            }),
        }
    }

    #[must_use]
    pub fn user(&self) -> &AdminUser {
        &self.user
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.user.username
    }
}
