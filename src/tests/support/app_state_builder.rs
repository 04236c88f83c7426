use std::sync::Arc;

use serde_json::Value;

use crate::config::AppConfig;
use crate::modules::portfolio::application::auto_refresh::RefreshOptions;
use crate::tests::support::fixtures::TEST_ADMIN_EMAIL;
use crate::tests::support::in_memory_backend::InMemoryBackend;
use crate::{AppState, Backend};

/// Builds an [`AppState`] over an [`InMemoryBackend`]. The timer is off by
/// default so tests only see the initial load.
pub struct TestAppStateBuilder {
    backend: Arc<InMemoryBackend>,
    refresh: RefreshOptions,
    webhook_secret: Option<String>,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            backend: Arc::new(InMemoryBackend::new()),
            refresh: RefreshOptions {
                interval: None,
                ..RefreshOptions::default()
            },
            webhook_secret: None,
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_seed(self, table: &str, rows: Vec<Value>) -> Self {
        self.backend.seed(table, rows);
        self
    }

    pub fn with_refresh_options(mut self, refresh: RefreshOptions) -> Self {
        self.refresh = refresh;
        self
    }

    pub fn with_webhook_secret(mut self, secret: &str) -> Self {
        self.webhook_secret = Some(secret.to_string());
        self
    }

    /// Must be called inside a runtime; mounting spawns the refresh tasks.
    pub fn build(self) -> (AppState, Arc<InMemoryBackend>) {
        let config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            api_prefix: "/api/".to_string(),
            backend_url: "https://test.supabase.co".to_string(),
            backend_anon_key: "anon".to_string(),
            admin_email: TEST_ADMIN_EMAIL.to_string(),
            storage_bucket: AppConfig::DEFAULT_STORAGE_BUCKET.to_string(),
            webhook_secret: self.webhook_secret,
            refresh_interval: self.refresh.interval,
            refresh_cooldown: self.refresh.cooldown,
        };
        let backend = Backend {
            tables: self.backend.clone(),
            auth: self.backend.clone(),
            storage: self.backend.clone(),
        };

        (
            AppState::build(backend, &config, self.refresh),
            self.backend,
        )
    }
}
