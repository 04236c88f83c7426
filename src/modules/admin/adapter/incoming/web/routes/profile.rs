use actix_web::{delete, patch, post, put, web, Responder};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::admin::adapter::incoming::web::extractors::BearerToken;
use crate::modules::admin::adapter::incoming::web::routes::mutation_error_response;
use crate::modules::portfolio::domain::entities::{PersonalInfo, SocialLink, SocialLinkChanges};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ProfileRequest {
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
}

#[put("/api/admin/personal-info")]
pub async fn update_personal_info_handler(
    token: BearerToken,
    req: web::Json<PersonalInfo>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .admin
        .profile
        .update_personal_info(Some(token.token()), req.into_inner())
        .await
    {
        Ok(info) => ApiResponse::success(info),
        Err(e) => mutation_error_response(&e),
    }
}

/// Replace the social links
///
/// Upserts every listed platform, then removes platforms absent from the
/// list. Links with a blank URL are skipped.
#[utoipa::path(
    put,
    path = "/api/admin/social-links",
    tag = "admin",
    request_body = Vec<SocialLink>,
    responses(
        (status = 200, description = "Links saved", body = inline(SuccessResponse<Vec<SocialLink>>)),
        (status = 401, description = "Not signed in", body = ErrorResponse)
    ),
    security(("BearerAuth" = []))
)]
#[put("/api/admin/social-links")]
pub async fn update_social_links_handler(
    token: BearerToken,
    req: web::Json<Vec<SocialLink>>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .admin
        .profile
        .update_social_links(Some(token.token()), req.into_inner())
        .await
    {
        Ok(links) => ApiResponse::success(links),
        Err(e) => mutation_error_response(&e),
    }
}

#[post("/api/admin/social-links")]
pub async fn create_social_link_handler(
    token: BearerToken,
    req: web::Json<SocialLink>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .admin
        .profile
        .create_social_link(Some(token.token()), req.into_inner())
        .await
    {
        Ok(link) => ApiResponse::created(link),
        Err(e) => mutation_error_response(&e),
    }
}

#[patch("/api/admin/social-links/{platform}")]
pub async fn update_social_link_handler(
    token: BearerToken,
    path: web::Path<String>,
    req: web::Json<SocialLinkChanges>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .admin
        .profile
        .update_social_link(Some(token.token()), &path, req.into_inner())
        .await
    {
        Ok(link) => ApiResponse::success(link),
        Err(e) => mutation_error_response(&e),
    }
}

#[delete("/api/admin/social-links/{platform}")]
pub async fn delete_social_link_handler(
    token: BearerToken,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .admin
        .profile
        .delete_social_link(Some(token.token()), &path)
        .await
    {
        Ok(()) => ApiResponse::no_content(),
        Err(e) => mutation_error_response(&e),
    }
}

#[utoipa::path(
    put,
    path = "/api/admin/profile",
    tag = "admin",
    request_body = ProfileRequest,
    responses(
        (status = 200, description = "Personal info and links saved", body = inline(SuccessResponse<ProfileRequest>)),
        (status = 401, description = "Not signed in", body = ErrorResponse)
    ),
    security(("BearerAuth" = []))
)]
#[put("/api/admin/profile")]
pub async fn save_profile_handler(
    token: BearerToken,
    req: web::Json<ProfileRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let ProfileRequest {
        personal_info,
        social_links,
    } = req.into_inner();

    match data
        .admin
        .profile
        .save_profile(Some(token.token()), personal_info, social_links)
        .await
    {
        Ok((personal_info, social_links)) => ApiResponse::success(ProfileRequest {
            personal_info,
            social_links,
        }),
        Err(e) => mutation_error_response(&e),
    }
}
