use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::modules::admin::application::admin_auth::AdminAuth;
use crate::modules::admin::application::errors::MutationError;
use crate::modules::admin::application::image_upload::{ImageUpload, ProjectImageStore};
use crate::modules::admin::application::service::{first_row, stamp, to_row};
use crate::modules::backend::application::ports::outgoing::{
    AccessToken, Filter, SelectQuery, TableGateway,
};
use crate::modules::portfolio::application::change_feed::{ChangeFeed, ChangeKind};
use crate::modules::portfolio::domain::entities::{NewProject, Project, ProjectChanges, Table};
use crate::shared::patch_field::PatchField;

pub struct ProjectAdmin {
    tables: Arc<dyn TableGateway>,
    auth: Arc<AdminAuth>,
    images: Arc<ProjectImageStore>,
    changes: ChangeFeed,
}

impl ProjectAdmin {
    pub fn new(
        tables: Arc<dyn TableGateway>,
        auth: Arc<AdminAuth>,
        images: Arc<ProjectImageStore>,
        changes: ChangeFeed,
    ) -> Self {
        Self {
            tables,
            auth,
            images,
            changes,
        }
    }

    /// Uploads `image` (if any) first; an upload failure aborts the save.
    pub async fn create_project(
        &self,
        token: Option<&AccessToken>,
        mut project: NewProject,
        image: Option<ImageUpload>,
    ) -> Result<Project, MutationError> {
        if let Some(image) = &image {
            self.images.policy().validate(image)?;
        }
        self.auth.require_user(token, "create projects").await?;

        if let Some(image) = image {
            project.preview_image = Some(self.images.upload(token, image).await?);
        }

        let mut row = to_row(&project)?;
        stamp(&mut row, &["created_at", "updated_at"]);

        let rows = self
            .tables
            .insert(Table::Projects.name(), vec![row], token)
            .await
            .map_err(|e| {
                warn!("Error creating project: {}", e.describe());
                MutationError::from(e)
            })?;
        let created: Project = first_row(rows, "Project")?;

        info!("Project created: {:?}", created.id);
        self.changes.publish(Table::Projects, ChangeKind::Insert);
        Ok(created)
    }

    pub async fn update_project(
        &self,
        token: Option<&AccessToken>,
        id: i64,
        mut changes: ProjectChanges,
        image: Option<ImageUpload>,
    ) -> Result<Project, MutationError> {
        if let Some(image) = &image {
            self.images.policy().validate(image)?;
        }
        self.auth.require_user(token, "update projects").await?;

        if let Some(image) = image {
            changes.preview_image = PatchField::Value(self.images.upload(token, image).await?);
        }

        let mut patch = to_row(&changes)?;
        stamp(&mut patch, &["updated_at"]);

        let rows = self
            .tables
            .update(
                Table::Projects.name(),
                vec![Filter::eq("id", id)],
                patch,
                token,
            )
            .await
            .map_err(|e| {
                warn!("Error updating project {}: {}", id, e.describe());
                MutationError::from(e)
            })?;
        let updated: Project = first_row(rows, "Project")?;

        self.changes.publish(Table::Projects, ChangeKind::Update);
        Ok(updated)
    }

    /// Removes the stored preview image (best effort), then the row.
    pub async fn delete_project(
        &self,
        token: Option<&AccessToken>,
        id: i64,
    ) -> Result<(), MutationError> {
        self.auth.require_user(token, "delete projects").await?;

        let existing = self
            .tables
            .select(
                Table::Projects.name(),
                SelectQuery::all()
                    .columns("id,preview_image")
                    .filter(Filter::eq("id", id))
                    .limit(1),
                token,
            )
            .await?;

        if let Some(url) = existing
            .first()
            .and_then(|row| row.get("preview_image"))
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
        {
            self.images.remove_by_url(token, url).await;
        }

        let deleted = self
            .tables
            .delete(Table::Projects.name(), vec![Filter::eq("id", id)], token)
            .await?;
        if deleted.is_empty() {
            return Err(MutationError::NotFound("Project".to_string()));
        }

        info!("Project {} deleted", id);
        self.changes.publish(Table::Projects, ChangeKind::Delete);
        Ok(())
    }

    /// Validates and uploads a preview image; returns its public URL.
    pub async fn upload_project_image(
        &self,
        token: Option<&AccessToken>,
        image: ImageUpload,
    ) -> Result<String, MutationError> {
        self.images.policy().validate(&image)?;
        self.auth.require_user(token, "upload images").await?;
        self.images.upload(token, image).await
    }
}
