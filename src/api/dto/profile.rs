//! DTOs for profile settings.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Business;
use crate::domain::settings::{FieldKind, ProfileField, SettingsField, SettingsPatch};

/// A business profile as returned to its owner.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub hours: Option<String>,
    pub theme_color: String,
}

impl From<Business> for ProfileResponse {
    fn from(b: Business) -> Self {
        Self {
            id: b.id,
            slug: b.slug,
            name: b.name,
            description: b.description,
            phone: b.phone,
            address: b.address,
            hours: b.hours,
            theme_color: b.theme_color,
        }
    }
}

/// Request body for `PATCH /api/profile`.
///
/// For optional fields: absent = unchanged, `null` = clear, value = set.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub description: Option<Option<String>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub phone: Option<Option<String>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub address: Option<Option<String>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub hours: Option<Option<String>>,

    pub theme_color: Option<String>,
}

impl From<UpdateProfileRequest> for SettingsPatch {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            phone: req.phone,
            address: req.address,
            hours: req.hours,
            theme_color: req.theme_color,
        }
    }
}

/// One entry of `GET /api/settings/fields`.
#[derive(Debug, Serialize)]
pub struct SettingsFieldResponse {
    pub field: ProfileField,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl From<&SettingsField> for SettingsFieldResponse {
    fn from(f: &SettingsField) -> Self {
        Self {
            field: f.field,
            label: f.label,
            kind: f.kind,
        }
    }
}
