use crate::shared::api::ApiResponse;
use actix_web::web::JsonConfig;

/// Leaves room for a base64-encoded 5MB image inside an admin payload.
pub const JSON_LIMIT_BYTES: usize = 8 * 1024 * 1024;

/// Malformed JSON bodies answer with the `VALIDATION_ERROR` envelope.
pub fn custom_json_config() -> JsonConfig {
    JsonConfig::default()
        .limit(JSON_LIMIT_BYTES)
        .error_handler(|err, _req| {
            let message = err.to_string();
            actix_web::error::InternalError::from_response(
                err,
                ApiResponse::bad_request("VALIDATION_ERROR", &message),
            )
            .into()
        })
}
