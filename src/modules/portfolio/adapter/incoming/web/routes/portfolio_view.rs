use actix_web::{get, post, web, Responder};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::schemas::SuccessResponse;
use crate::modules::portfolio::application::auto_refresh::{
    RefreshPhase, RefreshState, RefreshTrigger,
};
use crate::modules::portfolio::application::portfolio_reader::PortfolioSnapshot;
use crate::shared::api::ApiResponse;
use crate::AppState;

//
// ──────────────────────────────────────────────────────────
// DTOs
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize, ToSchema)]
pub struct PortfolioView {
    #[serde(flatten)]
    pub snapshot: PortfolioSnapshot,
    pub phase: RefreshPhase,
    pub last_refreshed_at: Option<DateTime<Utc>>,
    pub refresh_count: u64,
}

impl From<RefreshState<PortfolioSnapshot>> for PortfolioView {
    fn from(state: RefreshState<PortfolioSnapshot>) -> Self {
        Self {
            snapshot: state.data,
            phase: state.phase,
            last_refreshed_at: state.last_refreshed_at,
            refresh_count: state.refresh_count,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RefreshRequest {
    #[serde(default = "manual")]
    pub trigger: RefreshTrigger,
}

fn manual() -> RefreshTrigger {
    RefreshTrigger::Manual
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RefreshAccepted {
    /// `false` when this trigger kind is disabled. An accepted request may
    /// still be dropped by the cooldown.
    pub accepted: bool,
}

//
// ──────────────────────────────────────────────────────────
// Handlers
// ──────────────────────────────────────────────────────────
//

/// Live portfolio
///
/// The last loaded snapshot. Never fails; when the backend is unreachable
/// the snapshot holds cached data and `is_online` is false.
#[utoipa::path(
    get,
    path = "/api/portfolio",
    tag = "portfolio",
    responses((status = 200, description = "Current view", body = inline(SuccessResponse<PortfolioView>)))
)]
#[get("/api/portfolio")]
pub async fn get_portfolio_handler(data: web::Data<AppState>) -> impl Responder {
    ApiResponse::success(PortfolioView::from(data.portfolio.view().state()))
}

/// Request a refresh
///
/// Site clients forward visibility and focus changes here.
#[utoipa::path(
    post,
    path = "/api/portfolio/refresh",
    tag = "portfolio",
    request_body = RefreshRequest,
    responses((status = 202, description = "Request queued", body = inline(SuccessResponse<RefreshAccepted>)))
)]
#[post("/api/portfolio/refresh")]
pub async fn refresh_portfolio_handler(
    req: Option<web::Json<RefreshRequest>>,
    data: web::Data<AppState>,
) -> impl Responder {
    let trigger = req.map(|r| r.trigger).unwrap_or(RefreshTrigger::Manual);
    let accepted = data.portfolio.view().trigger(trigger);
    ApiResponse::accepted(RefreshAccepted { accepted })
}
