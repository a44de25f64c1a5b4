//! Business profile entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Accent colour assigned to new profiles.
pub const DEFAULT_THEME_COLOR: &str = "#6366f1";

/// A business profile that owns an ordered list of links.
///
/// `rank_version` is the version of the last rank batch the store applied
/// for this business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Business {
    pub id: i64,
    pub owner: String,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub hours: Option<String>,
    pub theme_color: String,
    pub rank_version: i64,
    pub created_at: DateTime<Utc>,
}

impl Business {
    /// Returns the editable settings of this profile.
    pub fn settings(&self) -> crate::domain::settings::ProfileSettings {
        crate::domain::settings::ProfileSettings {
            name: self.name.clone(),
            description: self.description.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            hours: self.hours.clone(),
            theme_color: self.theme_color.clone(),
        }
    }
}

/// Input data for creating a business at signup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBusiness {
    pub owner: String,
    pub slug: String,
    pub name: String,
    pub theme_color: String,
}
