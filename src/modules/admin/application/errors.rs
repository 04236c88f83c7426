use std::fmt;

use crate::modules::backend::application::ports::outgoing::BackendError;

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

/// Failure of an admin write.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MutationError {
    /// No session, or the token no longer resolves to a user.
    #[error("Authentication required to {0}")]
    Authentication(String),

    #[error("{0}")]
    Validation(String),

    /// Backend rejected the write; `message` is already in
    /// `Database error: ... (Details: ...) (Hint: ...)` form.
    #[error("{message}")]
    Backend {
        message: String,
        code: Option<String>,
    },

    #[error("Image upload failed: {0}")]
    ImageUpload(String),

    #[error("{0} not found")]
    NotFound(String),
}

impl From<BackendError> for MutationError {
    fn from(e: BackendError) -> Self {
        MutationError::Backend {
            code: e.code().map(str::to_string),
            message: e.describe(),
        }
    }
}

/// Headline shown above the detailed message in the admin panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorContext {
    Authentication,
    RowLevelSecurity,
    ImageUpload,
    DuplicateEntry,
    MissingRequiredField,
    Generic,
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorContext::Authentication => {
                "Authentication Error: Please make sure you're logged in as admin"
            }
            ErrorContext::RowLevelSecurity => {
                "Database Security Error: RLS policies may not be properly configured"
            }
            ErrorContext::ImageUpload => "Image Upload Error",
            ErrorContext::DuplicateEntry => {
                "Duplicate Entry Error: A record with this value may already exist"
            }
            ErrorContext::MissingRequiredField => {
                "Missing Required Field Error: Please check all required fields are filled"
            }
            ErrorContext::Generic => "Failed to save",
        };
        f.write_str(label)
    }
}

const NOT_NULL_VIOLATION: &str = "23502";
const UNIQUE_VIOLATION: &str = "23505";
const RLS_VIOLATION: &str = "42501";

impl MutationError {
    pub fn context(&self) -> ErrorContext {
        match self {
            MutationError::Authentication(_) => ErrorContext::Authentication,
            MutationError::ImageUpload(_) => ErrorContext::ImageUpload,
            MutationError::Backend { message, code } => {
                let code = code.as_deref();
                if message.contains("violates row-level security") || code == Some(RLS_VIOLATION) {
                    ErrorContext::RowLevelSecurity
                } else if message.contains("duplicate key") || code == Some(UNIQUE_VIOLATION) {
                    ErrorContext::DuplicateEntry
                } else if message.contains("null value") || code == Some(NOT_NULL_VIOLATION) {
                    ErrorContext::MissingRequiredField
                } else {
                    ErrorContext::Generic
                }
            }
            MutationError::Validation(_) | MutationError::NotFound(_) => ErrorContext::Generic,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            MutationError::Authentication(_) => "AUTHENTICATION_REQUIRED",
            MutationError::Validation(_) => "VALIDATION_ERROR",
            MutationError::Backend { .. } => "BACKEND_ERROR",
            MutationError::ImageUpload(_) => "IMAGE_UPLOAD_FAILED",
            MutationError::NotFound(_) => "NOT_FOUND",
        }
    }
}
