use actix_web::{get, post, web, Responder};

use crate::api::schemas::SuccessResponse;
use crate::modules::portfolio::application::connection_monitor::ConnectionStatus;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/connection",
    tag = "portfolio",
    responses((status = 200, description = "Last known backend status", body = inline(SuccessResponse<ConnectionStatus>)))
)]
#[get("/api/connection")]
pub async fn connection_status_handler(data: web::Data<AppState>) -> impl Responder {
    ApiResponse::success(data.portfolio.reader().monitor().status())
}

/// Retry the connection
///
/// Probes the backend now and returns the resulting status.
#[utoipa::path(
    post,
    path = "/api/connection/retry",
    tag = "portfolio",
    responses((status = 200, description = "Status after the probe", body = inline(SuccessResponse<ConnectionStatus>)))
)]
#[post("/api/connection/retry")]
pub async fn retry_connection_handler(data: web::Data<AppState>) -> impl Responder {
    let monitor = data.portfolio.reader().monitor();
    monitor.probe().await;
    ApiResponse::success(monitor.status())
}
