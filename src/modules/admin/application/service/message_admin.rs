use std::sync::Arc;

use serde_json::json;

use crate::modules::admin::application::admin_auth::AdminAuth;
use crate::modules::admin::application::errors::MutationError;
use crate::modules::admin::application::service::{decode_all, first_row};
use crate::modules::backend::application::ports::outgoing::{
    AccessToken, Filter, SelectQuery, TableGateway,
};
use crate::modules::portfolio::application::change_feed::{ChangeFeed, ChangeKind};
use crate::modules::portfolio::domain::entities::{ContactMessage, Table};

/// Inbox of messages left through the public contact form.
pub struct MessageAdmin {
    tables: Arc<dyn TableGateway>,
    auth: Arc<AdminAuth>,
    changes: ChangeFeed,
}

impl MessageAdmin {
    pub fn new(tables: Arc<dyn TableGateway>, auth: Arc<AdminAuth>, changes: ChangeFeed) -> Self {
        Self {
            tables,
            auth,
            changes,
        }
    }

    /// Newest first. Not cached: errors surface to the caller.
    pub async fn list_messages(
        &self,
        token: Option<&AccessToken>,
    ) -> Result<Vec<ContactMessage>, MutationError> {
        self.auth.require_user(token, "read messages").await?;

        let rows = self
            .tables
            .select(
                Table::ContactMessages.name(),
                SelectQuery::all().order_desc("created_at"),
                token,
            )
            .await?;
        decode_all(rows)
    }

    pub async fn mark_message_read(
        &self,
        token: Option<&AccessToken>,
        id: i64,
    ) -> Result<ContactMessage, MutationError> {
        self.auth.require_user(token, "update messages").await?;

        let rows = self
            .tables
            .update(
                Table::ContactMessages.name(),
                vec![Filter::eq("id", id)],
                json!({ "is_read": true }),
                token,
            )
            .await?;
        let message = first_row(rows, "Message")?;

        self.changes.publish(Table::ContactMessages, ChangeKind::Update);
        Ok(message)
    }

    pub async fn delete_message(
        &self,
        token: Option<&AccessToken>,
        id: i64,
    ) -> Result<(), MutationError> {
        self.auth.require_user(token, "delete messages").await?;

        let deleted = self
            .tables
            .delete(Table::ContactMessages.name(), vec![Filter::eq("id", id)], token)
            .await?;
        if deleted.is_empty() {
            return Err(MutationError::NotFound("Message".to_string()));
        }

        self.changes.publish(Table::ContactMessages, ChangeKind::Delete);
        Ok(())
    }
}
