//! OpenAPI shapes of the `ApiResponse` envelope. Only used for documentation;
//! handlers build the JSON through `ApiResponse`.

use serde::Serialize;
use utoipa::ToSchema;

use crate::shared::api::ApiError;

#[derive(Serialize, ToSchema)]
#[serde(bound = "T: Serialize")]
pub struct SuccessResponse<T> {
    #[schema(example = true)]
    pub success: bool,
    pub data: T,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = false)]
    pub success: bool,
    /// `context` is only set for failed admin writes.
    pub error: ApiError,
}

/// Body of the JSON 404 answered for unknown routes. Not wrapped in the
/// envelope; old site builds parse it as is.
#[derive(Serialize, ToSchema)]
pub struct NotFoundBody {
    #[schema(example = "Endpoint not found")]
    pub error: String,
    pub message: String,
}
