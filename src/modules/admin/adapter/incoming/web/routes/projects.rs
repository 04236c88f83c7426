use actix_web::{delete, patch, post, web, HttpResponse, Responder};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::admin::adapter::incoming::web::extractors::BearerToken;
use crate::modules::admin::adapter::incoming::web::routes::mutation_error_response;
use crate::modules::admin::application::image_upload::ImageUpload;
use crate::modules::portfolio::domain::entities::{NewProject, Project, ProjectChanges};
use crate::shared::api::ApiResponse;
use crate::AppState;

//
// ──────────────────────────────────────────────────────────
// Request DTOs
// ──────────────────────────────────────────────────────────
//

/// Image file carried inside a JSON body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ImagePayload {
    pub file_name: String,
    pub content_type: String,
    /// File contents, standard base64.
    pub data_base64: String,
}

impl ImagePayload {
    pub fn decode(self) -> Result<ImageUpload, HttpResponse> {
        let bytes = STANDARD.decode(self.data_base64.trim()).map_err(|_| {
            ApiResponse::bad_request("VALIDATION_ERROR", "Image data is not valid base64")
        })?;
        Ok(ImageUpload {
            file_name: self.file_name,
            content_type: self.content_type,
            bytes,
        })
    }
}

fn decode_optional(image: Option<ImagePayload>) -> Result<Option<ImageUpload>, HttpResponse> {
    image.map(ImagePayload::decode).transpose()
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProjectRequest {
    pub project: NewProject,
    #[serde(default)]
    pub image: Option<ImagePayload>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProjectRequest {
    #[serde(default)]
    pub changes: ProjectChanges,
    #[serde(default)]
    pub image: Option<ImagePayload>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadedImage {
    pub url: String,
}

//
// ──────────────────────────────────────────────────────────
// Handlers
// ──────────────────────────────────────────────────────────
//

/// Create a project
///
/// Uploads the optional preview image first; a failed upload aborts the save.
#[utoipa::path(
    post,
    path = "/api/admin/projects",
    tag = "admin",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created", body = inline(SuccessResponse<Project>)),
        (status = 400, description = "Invalid project or image", body = ErrorResponse),
        (status = 401, description = "Not signed in", body = ErrorResponse),
        (status = 502, description = "Backend or storage failure", body = ErrorResponse)
    ),
    security(("BearerAuth" = []))
)]
#[post("/api/admin/projects")]
pub async fn create_project_handler(
    token: BearerToken,
    req: web::Json<CreateProjectRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let req = req.into_inner();
    let image = match decode_optional(req.image) {
        Ok(image) => image,
        Err(resp) => return resp,
    };

    match data
        .admin
        .projects
        .create_project(Some(token.token()), req.project, image)
        .await
    {
        Ok(project) => ApiResponse::created(project),
        Err(e) => mutation_error_response(&e),
    }
}

#[patch("/api/admin/projects/{id}")]
pub async fn update_project_handler(
    token: BearerToken,
    path: web::Path<i64>,
    req: web::Json<UpdateProjectRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = path.into_inner();
    let req = req.into_inner();
    let image = match decode_optional(req.image) {
        Ok(image) => image,
        Err(resp) => return resp,
    };

    match data
        .admin
        .projects
        .update_project(Some(token.token()), id, req.changes, image)
        .await
    {
        Ok(project) => ApiResponse::success(project),
        Err(e) => mutation_error_response(&e),
    }
}

#[delete("/api/admin/projects/{id}")]
pub async fn delete_project_handler(
    token: BearerToken,
    path: web::Path<i64>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .admin
        .projects
        .delete_project(Some(token.token()), path.into_inner())
        .await
    {
        Ok(()) => ApiResponse::no_content(),
        Err(e) => mutation_error_response(&e),
    }
}

#[utoipa::path(
    post,
    path = "/api/admin/projects/images",
    tag = "admin",
    request_body = ImagePayload,
    responses(
        (status = 201, description = "Image stored", body = inline(SuccessResponse<UploadedImage>)),
        (status = 400, description = "Not an image, empty, or larger than 5MB", body = ErrorResponse),
        (status = 401, description = "Not signed in", body = ErrorResponse)
    ),
    security(("BearerAuth" = []))
)]
#[post("/api/admin/projects/images")]
pub async fn upload_project_image_handler(
    token: BearerToken,
    req: web::Json<ImagePayload>,
    data: web::Data<AppState>,
) -> impl Responder {
    let image = match req.into_inner().decode() {
        Ok(image) => image,
        Err(resp) => return resp,
    };

    match data
        .admin
        .projects
        .upload_project_image(Some(token.token()), image)
        .await
    {
        Ok(url) => ApiResponse::created(UploadedImage { url }),
        Err(e) => mutation_error_response(&e),
    }
}
