// src/modules/portfolio/domain/entities.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::patch_field::PatchField;
use crate::shared::serde_helpers::{blank_as_none, blank_as_null, null_as_default};

//
// ──────────────────────────────────────────────────────────
// Tables
// ──────────────────────────────────────────────────────────
//

/// Backend tables this service reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Projects,
    Testimonials,
    SocialLinks,
    PersonalInfo,
    ContactMessages,
    SiteSettings,
}

impl Table {
    pub fn name(self) -> &'static str {
        match self {
            Table::Projects => "projects",
            Table::Testimonials => "testimonials",
            Table::SocialLinks => "social_links",
            Table::PersonalInfo => "personal_info",
            Table::ContactMessages => "contact_messages",
            Table::SiteSettings => "site_settings",
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Project
// ──────────────────────────────────────────────────────────
//

pub const DEFAULT_PROJECT_STATUS: &str = "Planning";
pub const DEFAULT_PROJECT_PRIORITY: &str = "Medium";

fn default_status() -> String {
    DEFAULT_PROJECT_STATUS.to_string()
}

fn default_priority() -> String {
    DEFAULT_PROJECT_PRIORITY.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Project {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Planning / In Progress / Completed
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    /// Low / Medium / High
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub technologies: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default)]
    pub preview_image: Option<String>,
    #[serde(default)]
    pub project_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for a new project row.
///
/// Blank `name`/`description` are written as `null` so the NOT NULL
/// constraint reports them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewProject {
    #[serde(default, serialize_with = "blank_as_null")]
    pub name: String,
    #[serde(default, serialize_with = "blank_as_null")]
    pub description: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default = "default_priority")]
    pub priority: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_image: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub project_url: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub github_url: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub end_date: Option<NaiveDate>,
}

impl NewProject {
    pub fn named(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            status: default_status(),
            priority: default_priority(),
            technologies: Vec::new(),
            role: String::new(),
            preview_image: None,
            project_url: None,
            github_url: None,
            start_date: None,
            end_date: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectChanges {
    #[serde(default, skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
    #[serde(default, skip_serializing_if = "PatchField::is_unset")]
    pub description: PatchField<String>,
    #[serde(default, skip_serializing_if = "PatchField::is_unset")]
    pub status: PatchField<String>,
    #[serde(default, skip_serializing_if = "PatchField::is_unset")]
    pub priority: PatchField<String>,
    #[serde(default, skip_serializing_if = "PatchField::is_unset")]
    pub technologies: PatchField<Vec<String>>,
    #[serde(default, skip_serializing_if = "PatchField::is_unset")]
    pub role: PatchField<String>,
    #[serde(default, skip_serializing_if = "PatchField::is_unset")]
    pub preview_image: PatchField<String>,
    #[serde(default, skip_serializing_if = "PatchField::is_unset")]
    pub project_url: PatchField<String>,
    #[serde(default, skip_serializing_if = "PatchField::is_unset")]
    pub github_url: PatchField<String>,
    #[serde(default, skip_serializing_if = "PatchField::is_unset")]
    pub start_date: PatchField<NaiveDate>,
    #[serde(default, skip_serializing_if = "PatchField::is_unset")]
    pub end_date: PatchField<NaiveDate>,
}

//
// ──────────────────────────────────────────────────────────
// Testimonial
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Testimonial {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    /// Conventionally 1-5; not range-checked.
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: i32,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewTestimonial {
    pub author: String,
    #[serde(default)]
    pub role: String,
    pub message: String,
    #[serde(default)]
    pub rating: i32,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestimonialChanges {
    #[serde(default, skip_serializing_if = "PatchField::is_unset")]
    pub author: PatchField<String>,
    #[serde(default, skip_serializing_if = "PatchField::is_unset")]
    pub role: PatchField<String>,
    #[serde(default, skip_serializing_if = "PatchField::is_unset")]
    pub message: PatchField<String>,
    #[serde(default, skip_serializing_if = "PatchField::is_unset")]
    pub rating: PatchField<i32>,
    #[serde(default, skip_serializing_if = "PatchField::is_unset")]
    pub avatar_url: PatchField<String>,
}

//
// ──────────────────────────────────────────────────────────
// Social links
// ──────────────────────────────────────────────────────────
//

fn visible() -> bool {
    true
}

/// One row per `platform`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SocialLink {
    pub platform: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default = "visible")]
    pub is_visible: bool,
}

impl SocialLink {
    pub fn new(platform: &str, url: &str) -> Self {
        Self {
            platform: platform.to_string(),
            url: url.to_string(),
            is_visible: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SocialLinkChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
}

//
// ──────────────────────────────────────────────────────────
// Personal info
// ──────────────────────────────────────────────────────────
//

/// Singleton row; the first row of the table is the profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PersonalInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bio: String,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

//
// ──────────────────────────────────────────────────────────
// Contact messages
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ContactMessage {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subject: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

//
// ──────────────────────────────────────────────────────────
// Site settings
// ──────────────────────────────────────────────────────────
//

pub const SITE_SETTINGS_ID: i64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SiteSettings {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub site_title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub site_description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub maintenance_mode: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub allow_comments: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email_notifications: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SiteSettingsInput {
    pub site_title: String,
    #[serde(default)]
    pub site_description: String,
    #[serde(default)]
    pub maintenance_mode: bool,
    #[serde(default)]
    pub allow_comments: bool,
    #[serde(default)]
    pub email_notifications: bool,
}
