//! Authentication service for business bearer tokens.

use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::repositories::{BusinessRepository, TokenRepository};
use crate::domain::session::SessionContext;
use crate::error::AppError;
use crate::utils::token::generate_token;

type HmacSha256 = Hmac<Sha256>;

/// Resolves bearer tokens to the business they act for.
///
/// Tokens are hashed with HMAC-SHA256 keyed by `signing_secret` before they
/// are stored or compared, so a leaked table alone cannot be replayed.
pub struct AuthService {
    tokens: Arc<dyn TokenRepository>,
    businesses: Arc<dyn BusinessRepository>,
    signing_secret: String,
}

impl AuthService {
    pub fn new(
        tokens: Arc<dyn TokenRepository>,
        businesses: Arc<dyn BusinessRepository>,
        signing_secret: String,
    ) -> Self {
        Self {
            tokens,
            businesses,
            signing_secret,
        }
    }

    /// Hashes a raw token with HMAC-SHA256 under `secret`.
    ///
    /// Returns a 64-character lowercase hex string. Shared with the admin
    /// CLI, which must hash with the same secret as the server.
    pub fn hash_token(secret: &str, token: &str) -> String {
        let mut mac =
            HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Creates a new token for a business and returns the raw value.
    ///
    /// The raw token is shown once; only its hash is stored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if randomness or the store fails.
    pub async fn issue_token(&self, business_id: i64, name: &str) -> Result<String, AppError> {
        let token = generate_token().map_err(|e| {
            tracing::error!(error = %e, "Failed to generate token");
            AppError::internal("Failed to generate token", json!({}))
        })?;
        let token_hash = Self::hash_token(&self.signing_secret, &token);

        self.tokens
            .create_token(business_id, name, &token_hash)
            .await?;

        Ok(token)
    }

    /// Authenticates a raw token and builds the session it grants.
    ///
    /// Updates `last_used_at` on success; a failure to do so is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown or revoked,
    /// or its business no longer exists.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn authenticate(&self, token: &str) -> Result<SessionContext, AppError> {
        let token_hash = Self::hash_token(&self.signing_secret, token);

        let Some(business_id) = self.tokens.find_business(&token_hash).await? else {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Invalid or revoked token"}),
            ));
        };

        let business = self
            .businesses
            .find_by_id(business_id)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized(
                    "Unauthorized",
                    json!({"reason": "Token owner no longer exists"}),
                )
            })?;

        let _ = self.tokens.update_last_used(&token_hash).await;

        Ok(SessionContext {
            business_id: business.id,
            slug: business.slug,
            accent_color: business.theme_color,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Business, DEFAULT_THEME_COLOR};
    use crate::domain::repositories::{ApiToken, MockBusinessRepository, MockTokenRepository};
    use chrono::Utc;

    const SECRET: &str = "test-signing-secret";

    fn business(id: i64) -> Business {
        Business {
            id,
            owner: "owner".to_string(),
            slug: "corner-cafe".to_string(),
            name: "Corner Cafe".to_string(),
            description: None,
            phone: None,
            address: None,
            hours: None,
            theme_color: DEFAULT_THEME_COLOR.to_string(),
            rank_version: 0,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_authenticate_builds_session() {
        let expected_hash = AuthService::hash_token(SECRET, "valid-token");

        let mut tokens = MockTokenRepository::new();
        tokens
            .expect_find_business()
            .withf(move |hash| hash == expected_hash)
            .times(1)
            .returning(|_| Ok(Some(5)));
        tokens
            .expect_update_last_used()
            .times(1)
            .returning(|_| Ok(()));

        let mut businesses = MockBusinessRepository::new();
        businesses
            .expect_find_by_id()
            .returning(|id| Ok(Some(business(id))));

        let service = AuthService::new(Arc::new(tokens), Arc::new(businesses), SECRET.to_string());
        let session = service.authenticate("valid-token").await.unwrap();

        assert_eq!(session.business_id, 5);
        assert_eq!(session.slug, "corner-cafe");
        assert_eq!(session.accent_color, DEFAULT_THEME_COLOR);
    }

    #[tokio::test]
    async fn test_authenticate_invalid_token() {
        let mut tokens = MockTokenRepository::new();
        tokens.expect_find_business().returning(|_| Ok(None));

        let service = AuthService::new(
            Arc::new(tokens),
            Arc::new(MockBusinessRepository::new()),
            SECRET.to_string(),
        );

        let result = service.authenticate("invalid-token").await;
        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_authenticate_orphaned_token() {
        let mut tokens = MockTokenRepository::new();
        tokens.expect_find_business().returning(|_| Ok(Some(9)));

        let mut businesses = MockBusinessRepository::new();
        businesses.expect_find_by_id().returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(tokens), Arc::new(businesses), SECRET.to_string());

        let result = service.authenticate("token").await;
        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_issue_token_stores_hash_only() {
        let mut tokens = MockTokenRepository::new();
        tokens
            .expect_create_token()
            .withf(|business_id, name, hash| *business_id == 3 && name == "signup" && hash.len() == 64)
            .times(1)
            .returning(|business_id, name, hash| {
                Ok(ApiToken {
                    id: 1,
                    business_id,
                    name: name.to_string(),
                    token_hash: hash.to_string(),
                    created_at: Utc::now(),
                    last_used_at: None,
                    revoked_at: None,
                })
            });

        let service = AuthService::new(
            Arc::new(tokens),
            Arc::new(MockBusinessRepository::new()),
            SECRET.to_string(),
        );

        let raw = service.issue_token(3, "signup").await.unwrap();
        assert_eq!(raw.len(), 32);
    }

    #[test]
    fn test_hash_token_is_deterministic() {
        let first = AuthService::hash_token(SECRET, "test-token");
        assert_eq!(first, AuthService::hash_token(SECRET, "test-token"));
        assert_eq!(first.len(), 64);
        assert_ne!(first, AuthService::hash_token(SECRET, "other-token"));
    }

    #[test]
    fn test_hash_token_secret_matters() {
        assert_ne!(
            AuthService::hash_token("secret-a", "token"),
            AuthService::hash_token("secret-b", "token")
        );
    }
}
