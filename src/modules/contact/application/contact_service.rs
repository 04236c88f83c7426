use std::sync::Arc;

use email_address::EmailAddress;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use utoipa::ToSchema;

use crate::modules::backend::application::ports::outgoing::{BackendError, TableGateway};
use crate::modules::portfolio::application::change_feed::{ChangeFeed, ChangeKind};
use crate::modules::portfolio::domain::entities::Table;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Backend(String),
}

impl From<BackendError> for ContactError {
    fn from(e: BackendError) -> Self {
        ContactError::Backend(e.describe())
    }
}

/// Public contact form. No session needed.
pub struct ContactService {
    tables: Arc<dyn TableGateway>,
    changes: ChangeFeed,
}

impl ContactService {
    pub fn new(tables: Arc<dyn TableGateway>, changes: ChangeFeed) -> Self {
        Self { tables, changes }
    }

    pub async fn submit(&self, submission: ContactSubmission) -> Result<(), ContactError> {
        let submission = validate(submission)?;
        let row = serde_json::to_value(&submission)
            .map_err(|e| ContactError::Validation(e.to_string()))?;

        self.tables
            .insert_minimal(Table::ContactMessages.name(), vec![row], None)
            .await
            .map_err(|e| {
                error!("Error saving contact message: {}", e);
                ContactError::from(e)
            })?;

        info!("Contact message received");
        self.changes.publish(Table::ContactMessages, ChangeKind::Insert);
        Ok(())
    }
}

fn validate(submission: ContactSubmission) -> Result<ContactSubmission, ContactError> {
    let trimmed = ContactSubmission {
        name: submission.name.trim().to_string(),
        email: submission.email.trim().to_string(),
        subject: submission.subject.trim().to_string(),
        message: submission.message.trim().to_string(),
    };

    for (field, value) in [
        ("name", &trimmed.name),
        ("email", &trimmed.email),
        ("subject", &trimmed.subject),
        ("message", &trimmed.message),
    ] {
        if value.is_empty() {
            return Err(ContactError::Validation(format!("{field} is required")));
        }
    }

    if !EmailAddress::is_valid(&trimmed.email) {
        return Err(ContactError::Validation("email is invalid".to_string()));
    }

    Ok(trimmed)
}
