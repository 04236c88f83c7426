//! Legacy endpoints kept so old site builds do not break, plus the JSON
//! fallback for unknown paths.

use actix_web::{http::StatusCode, web, HttpResponse};

use crate::api::schemas::NotFoundBody;

/// Mounts the placeholder GETs under the configured API prefix.
pub fn configure(cfg: &mut web::ServiceConfig, api_prefix: &str) {
    for path in ["base", "fetch/all_mobile_projects"] {
        cfg.service(web::resource(format!("{api_prefix}{path}")).route(web::get().to(empty_ok)));
    }
}

async fn empty_ok() -> HttpResponse {
    HttpResponse::Ok().finish()
}

/// Default service for paths no route claims.
pub async fn not_found() -> HttpResponse {
    HttpResponse::build(StatusCode::NOT_FOUND).json(NotFoundBody {
        error: "Endpoint not found".to_string(),
        message: "The Endpoint you requested doesn't exist. Contact the dev if you're not the owner"
            .to_string(),
    })
}
