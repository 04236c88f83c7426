// src/modules/admin/application/image_upload.rs

use std::sync::Arc;

use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};
use reqwest::Url;
use tracing::{info, warn};

use crate::modules::admin::application::errors::MutationError;
use crate::modules::backend::application::ports::outgoing::{AccessToken, ObjectStorage};

//
// ──────────────────────────────────────────────────────────
// Upload + policy
// ──────────────────────────────────────────────────────────
//

/// An image file submitted from the admin panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct ImagePolicy {
    pub max_file_size_bytes: usize,
    pub mime_prefix: &'static str,
    pub path_prefix: &'static str,
    pub bucket_name: String,
}

impl ImagePolicy {
    pub const DEFAULT_BUCKET_NAME: &'static str = "product_preview_images";

    pub fn new(bucket_name: impl Into<String>) -> Self {
        Self {
            max_file_size_bytes: 5 * 1024 * 1024, // 5MB
            mime_prefix: "image/",
            path_prefix: "project-previews",
            bucket_name: bucket_name.into(),
        }
    }

    pub fn validate(&self, upload: &ImageUpload) -> Result<(), MutationError> {
        if upload.bytes.is_empty() {
            return Err(MutationError::Validation("No file provided".to_string()));
        }
        if upload.bytes.len() > self.max_file_size_bytes {
            return Err(MutationError::Validation(
                "File size must be less than 5MB".to_string(),
            ));
        }
        if !upload.content_type.starts_with(self.mime_prefix) {
            return Err(MutationError::Validation("File must be an image".to_string()));
        }
        Ok(())
    }

    /// `project-previews/<millis>-<random>.<ext>`
    pub fn object_path(&self, upload: &ImageUpload) -> String {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(11)
            .map(|c| char::from(c).to_ascii_lowercase())
            .collect();
        format!(
            "{}/{}-{}.{}",
            self.path_prefix,
            Utc::now().timestamp_millis(),
            token,
            extension(upload)
        )
    }
}

impl Default for ImagePolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BUCKET_NAME)
    }
}

fn extension(upload: &ImageUpload) -> String {
    match upload.file_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext.to_ascii_lowercase(),
        _ => upload
            .content_type
            .split_once('/')
            .map(|(_, sub)| sub.to_string())
            .unwrap_or_else(|| "bin".to_string()),
    }
}

/// Object path of a public URL: its last two path segments.
pub fn object_path_from_url(url: &str) -> Option<String> {
    let url = Url::parse(url).ok()?;
    let segments: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        [.., dir, file] => Some(format!("{dir}/{file}")),
        _ => None,
    }
}

//
// ──────────────────────────────────────────────────────────
// Store
// ──────────────────────────────────────────────────────────
//

pub struct ProjectImageStore {
    storage: Arc<dyn ObjectStorage>,
    policy: ImagePolicy,
}

impl ProjectImageStore {
    pub fn new(storage: Arc<dyn ObjectStorage>, policy: ImagePolicy) -> Self {
        Self { storage, policy }
    }

    pub fn policy(&self) -> &ImagePolicy {
        &self.policy
    }

    /// Uploads and returns the public URL. Call `policy().validate` first.
    pub async fn upload(
        &self,
        token: Option<&AccessToken>,
        upload: ImageUpload,
    ) -> Result<String, MutationError> {
        let path = self.policy.object_path(&upload);
        info!(
            path = %path,
            size = upload.bytes.len(),
            content_type = %upload.content_type,
            "Uploading project image"
        );

        self.storage
            .upload(
                &self.policy.bucket_name,
                &path,
                upload.bytes,
                &upload.content_type,
                token,
            )
            .await
            .map_err(|e| MutationError::ImageUpload(e.to_string()))?;

        Ok(self.storage.public_url(&self.policy.bucket_name, &path))
    }

    /// Best-effort removal; never fails the caller.
    pub async fn remove_by_url(&self, token: Option<&AccessToken>, url: &str) {
        let Some(path) = object_path_from_url(url) else {
            warn!("Cannot derive storage path from image url '{}'", url);
            return;
        };
        if let Err(e) = self
            .storage
            .remove(&self.policy.bucket_name, vec![path], token)
            .await
        {
            warn!("Failed to delete project image: {}", e);
        }
    }
}
