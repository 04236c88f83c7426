use std::sync::Arc;

use tracing::error;

use crate::modules::admin::application::admin_auth::AdminAuth;
use crate::modules::admin::application::errors::MutationError;
use crate::modules::admin::application::service::{decode, first_row, stamp, to_row};
use crate::modules::backend::application::ports::outgoing::{
    AccessToken, SelectQuery, TableGateway,
};
use crate::modules::portfolio::application::change_feed::{ChangeFeed, ChangeKind};
use crate::modules::portfolio::domain::entities::{
    SiteSettings, SiteSettingsInput, Table, SITE_SETTINGS_ID,
};

pub struct SettingsAdmin {
    tables: Arc<dyn TableGateway>,
    auth: Arc<AdminAuth>,
    changes: ChangeFeed,
}

impl SettingsAdmin {
    pub fn new(tables: Arc<dyn TableGateway>, auth: Arc<AdminAuth>, changes: ChangeFeed) -> Self {
        Self {
            tables,
            auth,
            changes,
        }
    }

    /// `None` when the row is missing or the read fails; failures are logged.
    pub async fn get_settings(&self) -> Option<SiteSettings> {
        let rows = match self
            .tables
            .select(Table::SiteSettings.name(), SelectQuery::all().limit(1), None)
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                error!("Error fetching settings: {}", e);
                return None;
            }
        };
        let row = rows.into_iter().next()?;
        decode(row)
            .inspect_err(|e| error!("Error decoding settings: {}", e))
            .ok()
    }

    /// Upserts the singleton row (id 1).
    pub async fn update_settings(
        &self,
        token: Option<&AccessToken>,
        input: SiteSettingsInput,
    ) -> Result<SiteSettings, MutationError> {
        self.auth.require_user(token, "update settings").await?;

        let mut row = to_row(&input)?;
        if let Some(map) = row.as_object_mut() {
            map.insert("id".to_string(), SITE_SETTINGS_ID.into());
        }
        stamp(&mut row, &["updated_at"]);

        let rows = self
            .tables
            .upsert(Table::SiteSettings.name(), vec![row], "id", token)
            .await?;
        let saved = first_row(rows, "Settings")?;

        self.changes.publish(Table::SiteSettings, ChangeKind::Update);
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::tests::support::fixtures::signed_in;
    use crate::tests::support::in_memory_backend::InMemoryBackend;

    fn service(backend: &Arc<InMemoryBackend>) -> SettingsAdmin {
        let auth = Arc::new(AdminAuth::new(backend.clone(), "admin@example.com"));
        SettingsAdmin::new(backend.clone(), auth, ChangeFeed::default())
    }

    fn input(title: &str) -> SiteSettingsInput {
        SiteSettingsInput {
            site_title: title.to_string(),
            maintenance_mode: true,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn missing_settings_is_none() {
        let backend = Arc::new(InMemoryBackend::new());
        assert_eq!(service(&backend).get_settings().await, None);
    }

    #[tokio::test]
    async fn read_failure_is_none() {
        let backend = Arc::new(InMemoryBackend::new());
        backend.set_offline(true);
        assert_eq!(service(&backend).get_settings().await, None);
    }

    #[tokio::test]
    async fn update_upserts_singleton() {
        let backend = Arc::new(InMemoryBackend::new());
        let token = signed_in(&backend).await;
        let admin = service(&backend);

        admin.update_settings(Some(&token), input("One")).await.unwrap();
        let saved = admin.update_settings(Some(&token), input("Two")).await.unwrap();

        assert_eq!(saved.id, SITE_SETTINGS_ID);
        assert_eq!(saved.site_title, "Two");
        assert!(saved.maintenance_mode);
        assert_eq!(backend.rows("site_settings").len(), 1);
        assert_eq!(admin.get_settings().await.map(|s| s.site_title), Some("Two".to_string()));
    }

    #[tokio::test]
    async fn update_requires_session() {
        let backend = Arc::new(InMemoryBackend::new());

        let result = service(&backend).update_settings(None, input("x")).await;

        assert!(matches!(result, Err(MutationError::Authentication(_))));
    }
}
