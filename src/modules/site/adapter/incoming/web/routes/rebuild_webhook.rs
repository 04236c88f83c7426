use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::shared::api::ApiResponse;
use crate::AppState;

pub const WEBHOOK_PATH: &str = "/api/webhook/rebuild";
const SECRET_HEADER: &str = "x-webhook-secret";

#[derive(Debug, Serialize, ToSchema)]
pub struct WebhookAck {
    #[schema(example = "Webhook received")]
    pub message: String,
    pub timestamp: DateTime<Utc>,
    /// Whether a refresh of the live portfolio was queued.
    pub refresh_queued: bool,
}

/// Registers the webhook; any method other than POST answers 405.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(WEBHOOK_PATH)
            .route(web::post().to(rebuild_webhook_handler))
            .default_service(web::to(method_not_allowed)),
    );
}

/// Data-change webhook
///
/// Called by the backend after table changes. When `WEBHOOK_SECRET` is
/// configured the `x-webhook-secret` header must match it.
#[utoipa::path(
    post,
    path = "/api/webhook/rebuild",
    tag = "webhook",
    params(("x-webhook-secret" = Option<String>, Header, description = "Shared secret")),
    responses(
        (status = 200, description = "Webhook received", body = inline(SuccessResponse<WebhookAck>)),
        (status = 401, description = "Secret missing or wrong", body = ErrorResponse),
        (status = 405, description = "Not a POST", body = ErrorResponse)
    )
)]
pub async fn rebuild_webhook_handler(req: HttpRequest, data: web::Data<AppState>) -> impl Responder {
    if let Some(expected) = data.webhook_secret.as_deref() {
        let provided = req
            .headers()
            .get(SECRET_HEADER)
            .and_then(|v| v.to_str().ok());
        if provided != Some(expected) {
            warn!("Rejected rebuild webhook: bad secret");
            return ApiResponse::unauthorized("INVALID_WEBHOOK_SECRET", "Invalid webhook secret");
        }
    }

    info!("Data changed, triggering rebuild...");
    let refresh_queued = data.portfolio.view().refresh();

    ApiResponse::success(WebhookAck {
        message: "Webhook received".to_string(),
        timestamp: Utc::now(),
        refresh_queued,
    })
}

async fn method_not_allowed() -> HttpResponse {
    ApiResponse::error(
        StatusCode::METHOD_NOT_ALLOWED,
        "METHOD_NOT_ALLOWED",
        "Method not allowed",
    )
}
