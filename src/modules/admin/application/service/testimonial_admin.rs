use std::sync::Arc;

use tracing::info;

use crate::modules::admin::application::admin_auth::AdminAuth;
use crate::modules::admin::application::errors::MutationError;
use crate::modules::admin::application::service::{first_row, stamp, to_row};
use crate::modules::backend::application::ports::outgoing::{AccessToken, Filter, TableGateway};
use crate::modules::portfolio::application::change_feed::{ChangeFeed, ChangeKind};
use crate::modules::portfolio::domain::entities::{
    NewTestimonial, Table, Testimonial, TestimonialChanges,
};

pub struct TestimonialAdmin {
    tables: Arc<dyn TableGateway>,
    auth: Arc<AdminAuth>,
    changes: ChangeFeed,
}

impl TestimonialAdmin {
    pub fn new(tables: Arc<dyn TableGateway>, auth: Arc<AdminAuth>, changes: ChangeFeed) -> Self {
        Self {
            tables,
            auth,
            changes,
        }
    }

    pub async fn create_testimonial(
        &self,
        token: Option<&AccessToken>,
        testimonial: NewTestimonial,
    ) -> Result<Testimonial, MutationError> {
        self.auth.require_user(token, "create testimonials").await?;

        let mut row = to_row(&testimonial)?;
        stamp(&mut row, &["created_at"]);

        let rows = self
            .tables
            .insert(Table::Testimonials.name(), vec![row], token)
            .await?;
        let created: Testimonial = first_row(rows, "Testimonial")?;

        info!("Testimonial created: {:?}", created.id);
        self.changes.publish(Table::Testimonials, ChangeKind::Insert);
        Ok(created)
    }

    pub async fn update_testimonial(
        &self,
        token: Option<&AccessToken>,
        id: i64,
        changes: TestimonialChanges,
    ) -> Result<Testimonial, MutationError> {
        self.auth.require_user(token, "update testimonials").await?;

        let rows = self
            .tables
            .update(
                Table::Testimonials.name(),
                vec![Filter::eq("id", id)],
                to_row(&changes)?,
                token,
            )
            .await?;
        let updated = first_row(rows, "Testimonial")?;

        self.changes.publish(Table::Testimonials, ChangeKind::Update);
        Ok(updated)
    }

    pub async fn delete_testimonial(
        &self,
        token: Option<&AccessToken>,
        id: i64,
    ) -> Result<(), MutationError> {
        self.auth.require_user(token, "delete testimonials").await?;

        let deleted = self
            .tables
            .delete(Table::Testimonials.name(), vec![Filter::eq("id", id)], token)
            .await?;
        if deleted.is_empty() {
            return Err(MutationError::NotFound("Testimonial".to_string()));
        }

        self.changes.publish(Table::Testimonials, ChangeKind::Delete);
        Ok(())
    }
}
