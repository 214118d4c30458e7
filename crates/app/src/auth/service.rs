//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::{
    auth::{
        errors::AuthServiceError,
        models::{ApiTokenMetadata, IssuedApiToken, NewApiToken},
        repository::PgAuthRepository,
        token::{generate_token, hash_token},
    },
    principal::{Capability, Principal},
};

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token to the principal it was issued for.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::NotFound`] for unknown or revoked
    /// tokens; the caller cannot distinguish the two.
    async fn authenticate_bearer(&self, bearer_token: &str)
    -> Result<Principal, AuthServiceError>;
}

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
        }
    }

    /// Issue a new API token with the given capabilities.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insertion fails.
    pub async fn issue_token(
        &self,
        name: &str,
        capabilities: &[Capability],
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let raw_token = generate_token();

        let metadata = self
            .repository
            .insert_token(&NewApiToken {
                uuid: Uuid::now_v7(),
                name: name.to_string(),
                capabilities: capabilities
                    .iter()
                    .map(|capability| capability.as_str().to_string())
                    .collect(),
                token_hash: hash_token(&raw_token),
            })
            .await?;

        Ok(IssuedApiToken {
            token: raw_token,
            metadata,
        })
    }

    /// List every token, including revoked ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_tokens(&self) -> Result<Vec<ApiTokenMetadata>, AuthServiceError> {
        self.repository
            .list_tokens()
            .await
            .map_err(AuthServiceError::from)
    }

    /// Revoke a token by UUID. Returns `true` if the token was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_token(&self, uuid: Uuid) -> Result<bool, AuthServiceError> {
        self.repository
            .revoke_token(uuid)
            .await
            .map_err(AuthServiceError::from)
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<Principal, AuthServiceError> {
        let token = self
            .repository
            .find_token_by_hash(&hash_token(bearer_token))
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        // Best effort; an authentication must not fail because the
        // bookkeeping column could not be updated.
        if let Err(error) = self.repository.touch_last_used(token.uuid).await {
            warn!("failed to record token use for {}: {error}", token.uuid);
        }

        Ok(principal_from_capabilities(&token.name, &token.capabilities))
    }
}

/// Map stored capability strings onto a [`Principal`], dropping any the
/// current build does not recognize.
fn principal_from_capabilities(token_name: &str, capabilities: &[String]) -> Principal {
    let mut recognized = Vec::new();

    for capability in capabilities {
        match capability.parse::<Capability>() {
            Ok(capability) => recognized.push(capability),
            Err(error) => {
                warn!("token {token_name}: {error}; ignoring");
            }
        }
    }

    Principal::new(recognized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_capability_strings_are_dropped() {
        let principal = principal_from_capabilities(
            "ops",
            &[
                "delete_users".to_string(),
                "launch_missiles".to_string(),
                "view_configuration".to_string(),
            ],
        );

        assert!(principal.can(Capability::DeleteUsers));
        assert!(principal.can(Capability::ViewConfiguration));
        assert!(!principal.can(Capability::ManageSettings));
        assert_eq!(principal.capabilities().count(), 2);
    }

    #[test]
    fn no_recognized_capabilities_yields_an_empty_principal() {
        let principal = principal_from_capabilities("ops", &["bogus".to_string()]);

        assert!(Capability::ALL.iter().all(|c| !principal.can(*c)));
    }
}
