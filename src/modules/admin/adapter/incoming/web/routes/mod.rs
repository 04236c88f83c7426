pub mod messages;
pub mod profile;
pub mod projects;
pub mod session;
pub mod settings;
pub mod testimonials;

pub use messages::{delete_message_handler, list_messages_handler, mark_message_read_handler};
pub use profile::{
    create_social_link_handler, delete_social_link_handler, save_profile_handler,
    update_personal_info_handler, update_social_link_handler, update_social_links_handler,
};
pub use projects::{
    create_project_handler, delete_project_handler, update_project_handler,
    upload_project_image_handler,
};
pub use session::{login_handler, logout_handler, session_handler};
pub use settings::update_settings_handler;
pub use testimonials::{
    create_testimonial_handler, delete_testimonial_handler, update_testimonial_handler,
};

use actix_web::{http::StatusCode, HttpResponse};
use tracing::{error, warn};

use crate::modules::admin::application::errors::{ErrorContext, MutationError};
use crate::shared::api::ApiResponse;

/// Maps a failed admin write onto the error envelope, with the context
/// headline the admin panel shows above the message.
pub fn mutation_error_response(err: &MutationError) -> HttpResponse {
    let context = err.context();
    let status = match err {
        MutationError::Authentication(_) => StatusCode::UNAUTHORIZED,
        MutationError::Validation(_) => StatusCode::BAD_REQUEST,
        MutationError::NotFound(_) => StatusCode::NOT_FOUND,
        MutationError::ImageUpload(_) => StatusCode::BAD_GATEWAY,
        MutationError::Backend { .. } => match context {
            ErrorContext::RowLevelSecurity => StatusCode::FORBIDDEN,
            ErrorContext::DuplicateEntry => StatusCode::CONFLICT,
            ErrorContext::MissingRequiredField => StatusCode::BAD_REQUEST,
            _ => StatusCode::BAD_GATEWAY,
        },
    };

    if status.is_server_error() {
        error!("{}: {}", context, err);
    } else {
        warn!("{}: {}", context, err);
    }

    ApiResponse::error_with_context(status, err.code(), &err.to_string(), Some(context.to_string()))
}
