//! Direct reads of each portfolio resource.
//!
//! These go through the fetchers, so a backend outage answers with the
//! cached copy instead of an error.

use actix_web::{get, web, Responder};

use crate::api::schemas::SuccessResponse;
use crate::modules::portfolio::domain::entities::{
    PersonalInfo, Project, SiteSettings, SocialLink, Testimonial,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/projects",
    tag = "portfolio",
    responses((status = 200, description = "Projects, newest first", body = inline(SuccessResponse<Vec<Project>>)))
)]
#[get("/api/projects")]
pub async fn get_projects_handler(data: web::Data<AppState>) -> impl Responder {
    ApiResponse::success(data.portfolio.reader().fetch_projects().await)
}

#[utoipa::path(
    get,
    path = "/api/testimonials",
    tag = "portfolio",
    responses((status = 200, description = "Testimonials, newest first", body = inline(SuccessResponse<Vec<Testimonial>>)))
)]
#[get("/api/testimonials")]
pub async fn get_testimonials_handler(data: web::Data<AppState>) -> impl Responder {
    ApiResponse::success(data.portfolio.reader().fetch_testimonials().await)
}

#[utoipa::path(
    get,
    path = "/api/social-links",
    tag = "portfolio",
    responses((status = 200, description = "Visible social links", body = inline(SuccessResponse<Vec<SocialLink>>)))
)]
#[get("/api/social-links")]
pub async fn get_social_links_handler(data: web::Data<AppState>) -> impl Responder {
    ApiResponse::success(data.portfolio.reader().fetch_social_links().await)
}

#[utoipa::path(
    get,
    path = "/api/personal-info",
    tag = "portfolio",
    responses((status = 200, description = "Profile, or null when none is stored", body = inline(SuccessResponse<Option<PersonalInfo>>)))
)]
#[get("/api/personal-info")]
pub async fn get_personal_info_handler(data: web::Data<AppState>) -> impl Responder {
    ApiResponse::success(data.portfolio.reader().fetch_personal_info().await)
}

#[utoipa::path(
    get,
    path = "/api/settings",
    tag = "portfolio",
    responses((status = 200, description = "Site settings, or null when unavailable", body = inline(SuccessResponse<Option<SiteSettings>>)))
)]
#[get("/api/settings")]
pub async fn get_settings_handler(data: web::Data<AppState>) -> impl Responder {
    ApiResponse::success(data.admin.settings.get_settings().await)
}
