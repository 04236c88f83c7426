use actix_web::{post, web, Responder};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::contact::application::contact_service::{ContactError, ContactSubmission};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct ContactReceived {
    pub received: bool,
}

/// Submit the contact form
///
/// Open to anonymous visitors. Every field is required and the email must be
/// syntactically valid.
#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "contact",
    request_body = ContactSubmission,
    responses(
        (status = 201, description = "Message stored", body = inline(SuccessResponse<ContactReceived>)),
        (
            status = 400,
            description = "Missing or invalid field",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "VALIDATION_ERROR",
                    "message": "email is invalid"
                }
            })
        ),
        (status = 502, description = "Backend rejected the message", body = ErrorResponse)
    )
)]
#[post("/api/contact")]
pub async fn submit_contact_handler(
    req: web::Json<ContactSubmission>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.contact.submit(req.into_inner()).await {
        Ok(()) => ApiResponse::created(ContactReceived { received: true }),
        Err(ContactError::Validation(message)) => {
            ApiResponse::bad_request("VALIDATION_ERROR", &message)
        }
        Err(ContactError::Backend(message)) => ApiResponse::bad_gateway("BACKEND_ERROR", &message),
    }
}
