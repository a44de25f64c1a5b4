//! In-process implementation of every repository trait.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::sync::{Mutex, MutexGuard};

use crate::domain::entities::{Business, Link, NewBusiness, NewLink, RankBatch, RankWrite};
use crate::domain::repositories::{ApiToken, BusinessRepository, LinkRepository, TokenRepository};
use crate::domain::settings::ProfileSettings;
use crate::error::AppError;

#[derive(Default)]
struct Inner {
    businesses: Vec<Business>,
    links: Vec<Link>,
    tokens: Vec<ApiToken>,
    next_id: i64,
}

impl Inner {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Store that keeps businesses, links and tokens in memory.
///
/// Follows the same contract as the PostgreSQL repositories, including
/// version-gated rank batches and case-insensitive slugs. Data is lost on
/// restart.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, AppError> {
        self.inner
            .lock()
            .map_err(|_| AppError::internal("Store lock poisoned", json!({})))
    }
}

#[async_trait]
impl LinkRepository for MemoryStore {
    async fn list_by_business(&self, business_id: i64) -> Result<Vec<Link>, AppError> {
        let inner = self.lock()?;
        let mut links: Vec<Link> = inner
            .links
            .iter()
            .filter(|l| l.business_id == business_id)
            .cloned()
            .collect();
        links.sort_by_key(|l| (l.rank, l.id));
        Ok(links)
    }

    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut inner = self.lock()?;
        let id = inner.next_id();
        let link = Link::new(
            id,
            new_link.business_id,
            new_link.title,
            new_link.url,
            new_link.rank,
            0,
            Utc::now(),
        );
        inner.links.push(link.clone());
        Ok(link)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        let inner = self.lock()?;
        Ok(inner.links.iter().find(|l| l.id == id).cloned())
    }

    async fn delete(&self, id: i64, business_id: i64) -> Result<bool, AppError> {
        let mut inner = self.lock()?;
        let before = inner.links.len();
        inner
            .links
            .retain(|l| !(l.id == id && l.business_id == business_id));
        Ok(inner.links.len() < before)
    }

    async fn apply_ranks(&self, batch: &RankBatch) -> Result<RankWrite, AppError> {
        let mut inner = self.lock()?;

        let Some(business) = inner
            .businesses
            .iter_mut()
            .find(|b| b.id == batch.business_id)
        else {
            return Err(AppError::not_found(
                "Business not found",
                json!({ "business_id": batch.business_id }),
            ));
        };

        if batch.version <= business.rank_version {
            return Ok(RankWrite::Stale);
        }
        business.rank_version = batch.version;

        for assignment in &batch.ranks {
            if let Some(link) = inner
                .links
                .iter_mut()
                .find(|l| l.id == assignment.id && l.business_id == batch.business_id)
            {
                link.rank = assignment.rank;
            }
        }

        Ok(RankWrite::Applied)
    }

    async fn rank_version(&self, business_id: i64) -> Result<i64, AppError> {
        let inner = self.lock()?;
        Ok(inner
            .businesses
            .iter()
            .find(|b| b.id == business_id)
            .map(|b| b.rank_version)
            .unwrap_or(0))
    }

    async fn record_click(&self, id: i64) -> Result<bool, AppError> {
        let mut inner = self.lock()?;
        match inner.links.iter_mut().find(|l| l.id == id) {
            Some(link) => {
                link.clicks += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl BusinessRepository for MemoryStore {
    async fn create(&self, new_business: NewBusiness) -> Result<Business, AppError> {
        let mut inner = self.lock()?;

        if inner
            .businesses
            .iter()
            .any(|b| b.slug.eq_ignore_ascii_case(&new_business.slug))
        {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "businesses_slug_key" }),
            ));
        }

        let id = inner.next_id();
        let business = Business {
            id,
            owner: new_business.owner,
            slug: new_business.slug.to_ascii_lowercase(),
            name: new_business.name,
            description: None,
            phone: None,
            address: None,
            hours: None,
            theme_color: new_business.theme_color,
            rank_version: 0,
            created_at: Utc::now(),
        };
        inner.businesses.push(business.clone());
        Ok(business)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Business>, AppError> {
        let inner = self.lock()?;
        Ok(inner.businesses.iter().find(|b| b.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Business>, AppError> {
        let inner = self.lock()?;
        Ok(inner
            .businesses
            .iter()
            .find(|b| b.slug.eq_ignore_ascii_case(slug))
            .cloned())
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, AppError> {
        let inner = self.lock()?;
        Ok(inner
            .businesses
            .iter()
            .any(|b| b.slug.eq_ignore_ascii_case(slug)))
    }

    async fn update_settings(
        &self,
        id: i64,
        settings: ProfileSettings,
    ) -> Result<Business, AppError> {
        let mut inner = self.lock()?;
        let business = inner
            .businesses
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::not_found("Business not found", json!({ "id": id })))?;

        business.name = settings.name;
        business.description = settings.description;
        business.phone = settings.phone;
        business.address = settings.address;
        business.hours = settings.hours;
        business.theme_color = settings.theme_color;

        Ok(business.clone())
    }

    async fn list(&self) -> Result<Vec<Business>, AppError> {
        let inner = self.lock()?;
        Ok(inner.businesses.iter().rev().cloned().collect())
    }
}

#[async_trait]
impl TokenRepository for MemoryStore {
    async fn find_business(&self, token_hash: &str) -> Result<Option<i64>, AppError> {
        let inner = self.lock()?;
        Ok(inner
            .tokens
            .iter()
            .find(|t| t.token_hash == token_hash && t.revoked_at.is_none())
            .map(|t| t.business_id))
    }

    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError> {
        let mut inner = self.lock()?;
        if let Some(token) = inner
            .tokens
            .iter_mut()
            .find(|t| t.token_hash == token_hash && t.revoked_at.is_none())
        {
            token.last_used_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn create_token(
        &self,
        business_id: i64,
        name: &str,
        token_hash: &str,
    ) -> Result<ApiToken, AppError> {
        let mut inner = self.lock()?;

        if inner.tokens.iter().any(|t| t.token_hash == token_hash) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "api_tokens_token_hash_key" }),
            ));
        }

        let id = inner.next_id();
        let token = ApiToken {
            id,
            business_id,
            name: name.to_string(),
            token_hash: token_hash.to_string(),
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: None,
        };
        inner.tokens.push(token.clone());
        Ok(token)
    }

    async fn list_tokens(&self) -> Result<Vec<ApiToken>, AppError> {
        let inner = self.lock()?;
        Ok(inner.tokens.clone())
    }

    async fn revoke_token(&self, id: i64) -> Result<(), AppError> {
        let mut inner = self.lock()?;
        match inner
            .tokens
            .iter_mut()
            .find(|t| t.id == id && t.revoked_at.is_none())
        {
            Some(token) => {
                token.revoked_at = Some(Utc::now());
                Ok(())
            }
            None => Err(AppError::not_found(
                "Token not found or already revoked",
                json!({ "id": id }),
            )),
        }
    }
}
