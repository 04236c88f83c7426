use actix_web::{put, web, Responder};

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::admin::adapter::incoming::web::extractors::BearerToken;
use crate::modules::admin::adapter::incoming::web::routes::mutation_error_response;
use crate::modules::portfolio::domain::entities::{SiteSettings, SiteSettingsInput};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[utoipa::path(
    put,
    path = "/api/admin/settings",
    tag = "admin",
    request_body = SiteSettingsInput,
    responses(
        (status = 200, description = "Settings saved", body = inline(SuccessResponse<SiteSettings>)),
        (status = 401, description = "Not signed in", body = ErrorResponse)
    ),
    security(("BearerAuth" = []))
)]
#[put("/api/admin/settings")]
pub async fn update_settings_handler(
    token: BearerToken,
    req: web::Json<SiteSettingsInput>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .admin
        .settings
        .update_settings(Some(token.token()), req.into_inner())
        .await
    {
        Ok(settings) => ApiResponse::success(settings),
        Err(e) => mutation_error_response(&e),
    }
}
