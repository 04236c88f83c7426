use actix_web::{get, post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::admin::adapter::incoming::web::extractors::BearerToken;
use crate::modules::admin::application::admin_auth::{AdminAuth, SignInError};
use crate::shared::api::ApiResponse;
use crate::AppState;

//
// ──────────────────────────────────────────────────────────
// DTOs
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub expires_in: Option<i64>,
    pub user_id: String,
    pub email: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    /// A bearer token was sent at all.
    pub has_token: bool,
    /// The backend accepted the token.
    pub verified: bool,
    pub user_id: Option<String>,
    pub email: Option<String>,
}

//
// ──────────────────────────────────────────────────────────
// Handlers
// ──────────────────────────────────────────────────────────
//

/// Admin sign-in
///
/// Signs in as the configured admin account with the submitted password.
#[utoipa::path(
    post,
    path = "/api/admin/login",
    tag = "admin",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = inline(SuccessResponse<LoginResponse>)),
        (status = 400, description = "Password missing", body = ErrorResponse),
        (
            status = 401,
            description = "Credentials rejected",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "INVALID_CREDENTIALS",
                    "message": "Invalid login credentials"
                }
            })
        )
    )
)]
#[post("/api/admin/login")]
pub async fn login_handler(
    req: web::Json<LoginRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.admin.auth.sign_in(&req.password).await {
        Ok(session) => ApiResponse::success(LoginResponse {
            access_token: session.access_token.as_str().to_string(),
            expires_in: session.expires_in,
            user_id: session.user.id,
            email: session.user.email,
        }),
        Err(SignInError::MissingPassword) => {
            ApiResponse::bad_request("VALIDATION_ERROR", "Password is required")
        }
        Err(SignInError::Rejected(message)) => {
            ApiResponse::unauthorized("INVALID_CREDENTIALS", &message)
        }
    }
}

#[post("/api/admin/logout")]
pub async fn logout_handler(token: BearerToken, data: web::Data<AppState>) -> impl Responder {
    data.admin.auth.sign_out(token.token()).await;
    ApiResponse::no_content()
}

#[utoipa::path(
    get,
    path = "/api/admin/session",
    tag = "admin",
    responses((status = 200, description = "Session state", body = inline(SuccessResponse<SessionResponse>))),
    security(("BearerAuth" = []))
)]
#[get("/api/admin/session")]
pub async fn session_handler(
    token: Option<BearerToken>,
    data: web::Data<AppState>,
) -> impl Responder {
    let token = token.map(|t| t.0);
    let has_token = AdminAuth::has_session_token(token.as_ref());

    let user = match token.as_ref() {
        Some(token) if has_token => match data.admin.auth.verify(token).await {
            Ok(user) => Some(user),
            Err(e) => {
                warn!("Session token rejected: {}", e);
                None
            }
        },
        _ => None,
    };

    ApiResponse::success(SessionResponse {
        has_token,
        verified: user.is_some(),
        user_id: user.as_ref().map(|u| u.id.clone()),
        email: user.and_then(|u| u.email),
    })
}
