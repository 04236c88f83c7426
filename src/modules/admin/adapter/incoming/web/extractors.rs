use actix_web::{dev::Payload, Error as ActixError, FromRequest, HttpRequest, HttpResponse};
use std::future::{ready, Ready};

use crate::modules::backend::application::ports::outgoing::AccessToken;
use crate::shared::api::ApiResponse;

/// Bearer token taken from the `Authorization` header.
///
/// Only presence is checked here; the admin services resolve the token
/// against the backend before every write.
#[derive(Debug, Clone)]
pub struct BearerToken(pub AccessToken);

impl BearerToken {
    pub fn token(&self) -> &AccessToken {
        &self.0
    }
}

fn create_api_error(response: HttpResponse) -> ActixError {
    actix_web::error::InternalError::from_response("", response).into()
}

impl FromRequest for BearerToken {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match extract_token_from_header(req) {
            Some(token) => ready(Ok(BearerToken(AccessToken::new(token)))),
            None => ready(Err(create_api_error(ApiResponse::unauthorized(
                "MISSING_AUTH_HEADER",
                "Missing or invalid authorization header",
            )))),
        }
    }
}

fn extract_token_from_header(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|s| s.to_string())
}
