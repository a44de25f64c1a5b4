//! Business profiles: signup, public page data, settings.

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::entities::{Business, DEFAULT_THEME_COLOR, Link, NewBusiness};
use crate::domain::repositories::{BusinessRepository, LinkRepository};
use crate::domain::settings::{ProfileSettings, SettingsPatch, validate_name};
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::share;
use crate::utils::slug::parse_slug;

const SLUG_TAKEN: &str = "Slug is already taken. Try another one.";

/// A link as shown on the public page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicLink {
    pub id: i64,
    pub title: String,
    pub url: String,
}

/// Everything the public page of a business renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicProfile {
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub hours: Option<String>,
    pub theme_color: String,
    pub links: Vec<PublicLink>,
    pub public_url: String,
    pub whatsapp_url: Option<String>,
    pub maps_url: Option<String>,
    pub tel_href: Option<String>,
}

/// Signup input after extraction from the request.
#[derive(Debug, Clone)]
pub struct SignupInput {
    pub name: String,
    pub slug: String,
    pub owner: String,
}

pub struct ProfileService {
    businesses: Arc<dyn BusinessRepository>,
    links: Arc<dyn LinkRepository>,
    cache: Arc<dyn CacheService>,
    public_base_url: String,
}

impl ProfileService {
    pub fn new(
        businesses: Arc<dyn BusinessRepository>,
        links: Arc<dyn LinkRepository>,
        cache: Arc<dyn CacheService>,
        public_base_url: String,
    ) -> Self {
        Self {
            businesses,
            links,
            cache,
            public_base_url,
        }
    }

    /// Public share URL of a slug.
    pub fn public_url(&self, slug: &str) -> String {
        share::public_url(&self.public_base_url, slug)
    }

    /// Creates a business profile.
    ///
    /// The slug is normalized and checked for availability before the
    /// profile is created; the unique index catches a concurrent signup.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] on a blank name or owner, or a malformed slug
    /// - [`AppError::Conflict`] if the slug is taken
    pub async fn signup(&self, input: SignupInput) -> Result<Business, AppError> {
        let slug = parse_slug(&input.slug)?;
        let name = input.name.trim().to_string();
        validate_name(&name).map_err(|reason| {
            AppError::bad_request(reason, json!({ "field": "name" }))
        })?;
        let owner = input.owner.trim().to_string();
        if owner.is_empty() {
            return Err(AppError::bad_request(
                "Owner is required",
                json!({ "field": "owner" }),
            ));
        }

        if self.businesses.slug_exists(&slug).await? {
            return Err(AppError::conflict(SLUG_TAKEN, json!({ "slug": slug })));
        }

        let business = self
            .businesses
            .create(NewBusiness {
                owner,
                slug: slug.clone(),
                name,
                theme_color: DEFAULT_THEME_COLOR.to_string(),
            })
            .await
            .map_err(|e| match e {
                AppError::Conflict { .. } => {
                    AppError::conflict(SLUG_TAKEN, json!({ "slug": slug }))
                }
                other => other,
            })?;

        info!(business_id = business.id, slug = %business.slug, "Business signed up");
        Ok(business)
    }

    /// Reports whether a slug can still be claimed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed or reserved slug.
    pub async fn slug_available(&self, slug: &str) -> Result<(String, bool), AppError> {
        let slug = parse_slug(slug)?;
        let taken = self.businesses.slug_exists(&slug).await?;
        Ok((slug, !taken))
    }

    /// Builds the public profile of a slug, served from cache when possible.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no business owns the slug.
    pub async fn public_profile(&self, slug: &str) -> Result<PublicProfile, AppError> {
        let slug = slug.trim().to_ascii_lowercase();

        if let Ok(Some(cached)) = self.cache.get_profile(&slug).await {
            match serde_json::from_str::<PublicProfile>(&cached) {
                Ok(profile) => return Ok(profile),
                Err(e) => warn!(slug = %slug, error = %e, "Discarding unreadable cached profile"),
            }
        }

        let business = self
            .businesses
            .find_by_slug(&slug)
            .await?
            .ok_or_else(|| AppError::not_found("Profile not found", json!({ "slug": slug })))?;
        let links = self.links.list_by_business(business.id).await?;

        let profile = self.build_profile(business, links);

        match serde_json::to_string(&profile) {
            Ok(serialized) => {
                let _ = self.cache.set_profile(&slug, &serialized, None).await;
            }
            Err(e) => warn!(slug = %slug, error = %e, "Failed to serialize profile for cache"),
        }

        Ok(profile)
    }

    fn build_profile(&self, business: Business, links: Vec<Link>) -> PublicProfile {
        let public_url = self.public_url(&business.slug);

        PublicProfile {
            whatsapp_url: share::whatsapp_share_url(&business.name, &public_url),
            maps_url: business.address.as_deref().and_then(share::maps_url),
            tel_href: business.phone.as_deref().map(share::tel_href),
            links: links
                .into_iter()
                .map(|l| PublicLink {
                    id: l.id,
                    title: l.title,
                    url: l.url,
                })
                .collect(),
            public_url,
            slug: business.slug,
            name: business.name,
            description: business.description,
            phone: business.phone,
            address: business.address,
            hours: business.hours,
            theme_color: business.theme_color,
        }
    }

    /// Resolves the target URL of a link on a slug's public page.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the slug is unknown or the link
    /// belongs to another business.
    pub async fn link_target(&self, slug: &str, link_id: i64) -> Result<String, AppError> {
        let business = self
            .businesses
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found("Profile not found", json!({ "slug": slug })))?;

        match self.links.find_by_id(link_id).await? {
            Some(link) if link.business_id == business.id => Ok(link.url),
            _ => Err(AppError::not_found("Link not found", json!({ "id": link_id }))),
        }
    }

    /// Round-trips a cheap query to the store.
    ///
    /// # Errors
    ///
    /// Returns the store error unchanged.
    pub async fn store_reachable(&self) -> Result<(), AppError> {
        self.businesses.slug_exists("health").await.map(|_| ())
    }

    /// Drops the cached public profile of a slug.
    pub async fn invalidate(&self, slug: &str) {
        if self.cache.invalidate(slug).await.is_err() {
            debug!(slug, "Profile cache invalidation failed");
        }
    }

    /// Loads a business for its owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the business does not exist.
    pub async fn business(&self, business_id: i64) -> Result<Business, AppError> {
        self.businesses
            .find_by_id(business_id)
            .await?
            .ok_or_else(|| AppError::not_found("Business not found", json!({ "id": business_id })))
    }

    /// Applies a settings patch, validating every field first.
    ///
    /// Nothing is written when any field is invalid.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for the first invalid field
    /// - [`AppError::NotFound`] if the business does not exist
    pub async fn update_settings(
        &self,
        business_id: i64,
        patch: SettingsPatch,
    ) -> Result<Business, AppError> {
        let current = self.business(business_id).await?;
        let settings: ProfileSettings = patch.apply(current.settings()).normalized();
        settings.validate()?;

        let updated = self
            .businesses
            .update_settings(business_id, settings)
            .await?;
        self.invalidate(&updated.slug).await;

        info!(business_id, "Profile settings saved");
        Ok(updated)
    }
}
