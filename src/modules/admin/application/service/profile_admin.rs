//! Personal info and social links: the "profile" screen of the admin panel.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::modules::admin::application::admin_auth::AdminAuth;
use crate::modules::admin::application::errors::MutationError;
use crate::modules::admin::application::service::{decode_all, first_row, to_row};
use crate::modules::backend::application::ports::outgoing::{
    AccessToken, Filter, SelectQuery, TableGateway,
};
use crate::modules::portfolio::application::change_feed::{ChangeFeed, ChangeKind};
use crate::modules::portfolio::domain::entities::{
    PersonalInfo, SocialLink, SocialLinkChanges, Table,
};

const PLATFORM: &str = "platform";

pub struct ProfileAdmin {
    tables: Arc<dyn TableGateway>,
    auth: Arc<AdminAuth>,
    changes: ChangeFeed,
}

impl ProfileAdmin {
    pub fn new(tables: Arc<dyn TableGateway>, auth: Arc<AdminAuth>, changes: ChangeFeed) -> Self {
        Self {
            tables,
            auth,
            changes,
        }
    }

    /// Updates the first personal-info row, or inserts one if the table is empty.
    pub async fn update_personal_info(
        &self,
        token: Option<&AccessToken>,
        mut info: PersonalInfo,
    ) -> Result<PersonalInfo, MutationError> {
        self.auth.require_user(token, "update personal info").await?;

        info.id = None;
        let row = to_row(&info)?;
        let table = Table::PersonalInfo.name();

        let existing = self
            .tables
            .select(table, SelectQuery::all().columns("id").limit(1), token)
            .await?;
        let existing_id = existing.first().and_then(|r| r.get("id")).cloned();

        let (rows, kind) = match existing_id {
            Some(id) => (
                self.tables
                    .update(table, vec![Filter::Eq("id".to_string(), id)], row, token)
                    .await?,
                ChangeKind::Update,
            ),
            None => (
                self.tables.insert(table, vec![row], token).await?,
                ChangeKind::Insert,
            ),
        };
        let saved = first_row(rows, "Personal info")?;

        self.changes.publish(Table::PersonalInfo, kind);
        Ok(saved)
    }

    /// Makes the table hold exactly `links` (minus blank URLs): upsert by
    /// platform first, then prune platforms that are no longer listed.
    pub async fn update_social_links(
        &self,
        token: Option<&AccessToken>,
        links: Vec<SocialLink>,
    ) -> Result<Vec<SocialLink>, MutationError> {
        self.auth.require_user(token, "update social links").await?;

        let table = Table::SocialLinks.name();
        let mut seen = HashSet::new();
        let valid: Vec<SocialLink> = links
            .into_iter()
            .filter(|l| !l.url.trim().is_empty() && !l.platform.trim().is_empty())
            .rev()
            .filter(|l| seen.insert(l.platform.clone()))
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();

        let saved = if valid.is_empty() {
            Vec::new()
        } else {
            let rows = valid.iter().map(to_row).collect::<Result<Vec<_>, _>>()?;
            decode_all(self.tables.upsert(table, rows, PLATFORM, token).await?)?
        };

        let keep: Vec<Value> = valid
            .iter()
            .map(|l| Value::String(l.platform.clone()))
            .collect();
        let prune = if keep.is_empty() {
            Filter::neq(PLATFORM, "")
        } else {
            Filter::not_in(PLATFORM, keep)
        };
        let removed = self.tables.delete(table, vec![prune], token).await?;

        info!(
            saved = saved.len(),
            removed = removed.len(),
            "Social links replaced"
        );
        self.changes.publish(Table::SocialLinks, ChangeKind::Update);
        Ok(saved)
    }

    pub async fn create_social_link(
        &self,
        token: Option<&AccessToken>,
        link: SocialLink,
    ) -> Result<SocialLink, MutationError> {
        self.auth.require_user(token, "create social links").await?;

        let rows = self
            .tables
            .insert(Table::SocialLinks.name(), vec![to_row(&link)?], token)
            .await?;
        let created = first_row(rows, "Social link")?;

        self.changes.publish(Table::SocialLinks, ChangeKind::Insert);
        Ok(created)
    }

    pub async fn update_social_link(
        &self,
        token: Option<&AccessToken>,
        platform: &str,
        changes: SocialLinkChanges,
    ) -> Result<SocialLink, MutationError> {
        self.auth.require_user(token, "update social links").await?;

        let rows = self
            .tables
            .update(
                Table::SocialLinks.name(),
                vec![Filter::eq(PLATFORM, platform)],
                to_row(&changes)?,
                token,
            )
            .await?;
        let updated = first_row(rows, "Social link")?;

        self.changes.publish(Table::SocialLinks, ChangeKind::Update);
        Ok(updated)
    }

    pub async fn delete_social_link(
        &self,
        token: Option<&AccessToken>,
        platform: &str,
    ) -> Result<(), MutationError> {
        self.auth.require_user(token, "delete social links").await?;

        let deleted = self
            .tables
            .delete(
                Table::SocialLinks.name(),
                vec![Filter::eq(PLATFORM, platform)],
                token,
            )
            .await?;
        if deleted.is_empty() {
            return Err(MutationError::NotFound("Social link".to_string()));
        }

        self.changes.publish(Table::SocialLinks, ChangeKind::Delete);
        Ok(())
    }

    /// Saves personal info and social links concurrently; the first error wins.
    pub async fn save_profile(
        &self,
        token: Option<&AccessToken>,
        info: PersonalInfo,
        links: Vec<SocialLink>,
    ) -> Result<(PersonalInfo, Vec<SocialLink>), MutationError> {
        futures::try_join!(
            self.update_personal_info(token, info),
            self.update_social_links(token, links),
        )
        .inspect_err(|e| warn!("Failed to save profile: {}", e))
    }
}
