use std::sync::Arc;

use crate::modules::admin::application::image_upload::ImageUpload;
use crate::modules::backend::application::ports::outgoing::{AccessToken, AuthGateway};
use crate::tests::support::in_memory_backend::{InMemoryBackend, TEST_PASSWORD};

pub const TEST_ADMIN_EMAIL: &str = "admin@example.com";

/// Opens a session on `backend` and returns its token.
pub async fn signed_in(backend: &Arc<InMemoryBackend>) -> AccessToken {
    backend
        .sign_in_with_password(TEST_ADMIN_EMAIL, TEST_PASSWORD)
        .await
        .expect("test sign-in")
        .access_token
}

pub fn png_upload(size: usize) -> ImageUpload {
    ImageUpload {
        file_name: "preview.png".to_string(),
        content_type: "image/png".to_string(),
        bytes: vec![0x89; size],
    }
}
