use actix_web::{delete, patch, post, web, Responder};

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::admin::adapter::incoming::web::extractors::BearerToken;
use crate::modules::admin::adapter::incoming::web::routes::mutation_error_response;
use crate::modules::portfolio::domain::entities::{NewTestimonial, Testimonial, TestimonialChanges};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[utoipa::path(
    post,
    path = "/api/admin/testimonials",
    tag = "admin",
    request_body = NewTestimonial,
    responses(
        (status = 201, description = "Testimonial created", body = inline(SuccessResponse<Testimonial>)),
        (status = 400, description = "Missing author or message", body = ErrorResponse),
        (status = 401, description = "Not signed in", body = ErrorResponse)
    ),
    security(("BearerAuth" = []))
)]
#[post("/api/admin/testimonials")]
pub async fn create_testimonial_handler(
    token: BearerToken,
    req: web::Json<NewTestimonial>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .admin
        .testimonials
        .create_testimonial(Some(token.token()), req.into_inner())
        .await
    {
        Ok(testimonial) => ApiResponse::created(testimonial),
        Err(e) => mutation_error_response(&e),
    }
}

#[patch("/api/admin/testimonials/{id}")]
pub async fn update_testimonial_handler(
    token: BearerToken,
    path: web::Path<i64>,
    req: web::Json<TestimonialChanges>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .admin
        .testimonials
        .update_testimonial(Some(token.token()), path.into_inner(), req.into_inner())
        .await
    {
        Ok(testimonial) => ApiResponse::success(testimonial),
        Err(e) => mutation_error_response(&e),
    }
}

#[delete("/api/admin/testimonials/{id}")]
pub async fn delete_testimonial_handler(
    token: BearerToken,
    path: web::Path<i64>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .admin
        .testimonials
        .delete_testimonial(Some(token.token()), path.into_inner())
        .await
    {
        Ok(()) => ApiResponse::no_content(),
        Err(e) => mutation_error_response(&e),
    }
}
