//! Profile settings and the enumerated settings form configuration.
//!
//! Each editable field is described once in [`SETTINGS_FIELDS`] with its input
//! kind and validator. Rendering and validation both iterate that table, so no
//! field is ever looked up by a runtime name.

use regex::Regex;
use serde::Serialize;
use serde_json::json;
use std::sync::LazyLock;

use crate::error::AppError;

static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9][0-9 ().\-]{2,31}$").unwrap());

static COLOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").unwrap());

const MAX_NAME_LEN: usize = 100;
const MAX_TEXT_LEN: usize = 500;

/// Editable profile field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Name,
    Description,
    Phone,
    Address,
    Hours,
    ThemeColor,
}

/// Input widget used to edit a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Multiline,
    Phone,
    Color,
}

/// Static description of one settings form field.
#[derive(Debug, Clone, Copy)]
pub struct SettingsField {
    pub field: ProfileField,
    pub label: &'static str,
    pub kind: FieldKind,
    pub validator: fn(&str) -> Result<(), &'static str>,
}

/// The settings form, in display order.
pub const SETTINGS_FIELDS: &[SettingsField] = &[
    SettingsField {
        field: ProfileField::Name,
        label: "Name",
        kind: FieldKind::Text,
        validator: validate_name,
    },
    SettingsField {
        field: ProfileField::Description,
        label: "Description",
        kind: FieldKind::Multiline,
        validator: validate_text,
    },
    SettingsField {
        field: ProfileField::Phone,
        label: "Phone",
        kind: FieldKind::Phone,
        validator: validate_phone,
    },
    SettingsField {
        field: ProfileField::Address,
        label: "Address",
        kind: FieldKind::Text,
        validator: validate_text,
    },
    SettingsField {
        field: ProfileField::Hours,
        label: "Hours",
        kind: FieldKind::Text,
        validator: validate_text,
    },
    SettingsField {
        field: ProfileField::ThemeColor,
        label: "Theme Color",
        kind: FieldKind::Color,
        validator: validate_color,
    },
];

pub fn validate_name(value: &str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        return Err("Name is required");
    }
    if value.chars().count() > MAX_NAME_LEN {
        return Err("Name must be at most 100 characters");
    }
    Ok(())
}

fn validate_text(value: &str) -> Result<(), &'static str> {
    if value.chars().count() > MAX_TEXT_LEN {
        return Err("Value must be at most 500 characters");
    }
    Ok(())
}

fn validate_phone(value: &str) -> Result<(), &'static str> {
    if !PHONE_REGEX.is_match(value) {
        return Err("Phone may only contain digits, spaces, and + ( ) - .");
    }
    Ok(())
}

fn validate_color(value: &str) -> Result<(), &'static str> {
    if !COLOR_REGEX.is_match(value) {
        return Err("Theme color must be a hex color like #6366f1");
    }
    Ok(())
}

/// Display and contact fields of a business profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSettings {
    pub name: String,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub hours: Option<String>,
    pub theme_color: String,
}

impl ProfileSettings {
    /// Returns the current value of a field, `None` when unset.
    pub fn value(&self, field: ProfileField) -> Option<&str> {
        match field {
            ProfileField::Name => Some(&self.name),
            ProfileField::Description => self.description.as_deref(),
            ProfileField::Phone => self.phone.as_deref(),
            ProfileField::Address => self.address.as_deref(),
            ProfileField::Hours => self.hours.as_deref(),
            ProfileField::ThemeColor => Some(&self.theme_color),
        }
    }

    /// Trims every field and turns blank optional fields into `None`.
    pub fn normalized(self) -> Self {
        fn optional(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            name: self.name.trim().to_string(),
            description: optional(self.description),
            phone: optional(self.phone),
            address: optional(self.address),
            hours: optional(self.hours),
            theme_color: self.theme_color.trim().to_ascii_lowercase(),
        }
    }

    /// Runs every field validator in form order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for the first invalid field.
    pub fn validate(&self) -> Result<(), AppError> {
        for spec in SETTINGS_FIELDS {
            let value = self.value(spec.field).unwrap_or_default();
            let optional_and_empty = value.is_empty()
                && !matches!(spec.field, ProfileField::Name | ProfileField::ThemeColor);
            if optional_and_empty {
                continue;
            }
            (spec.validator)(value).map_err(|reason| {
                AppError::bad_request(reason, json!({ "field": spec.field }))
            })?;
        }
        Ok(())
    }
}

/// Partial settings update.
///
/// `None` leaves a field unchanged. For optional fields `Some(None)` clears
/// the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub address: Option<Option<String>>,
    pub hours: Option<Option<String>>,
    pub theme_color: Option<String>,
}

impl SettingsPatch {
    /// Applies the patch on top of `current`.
    pub fn apply(self, current: ProfileSettings) -> ProfileSettings {
        ProfileSettings {
            name: self.name.unwrap_or(current.name),
            description: self.description.unwrap_or(current.description),
            phone: self.phone.unwrap_or(current.phone),
            address: self.address.unwrap_or(current.address),
            hours: self.hours.unwrap_or(current.hours),
            theme_color: self.theme_color.unwrap_or(current.theme_color),
        }
    }
}
