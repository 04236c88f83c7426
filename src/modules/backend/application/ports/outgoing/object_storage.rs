use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::modules::backend::application::ports::outgoing::auth_gateway::AccessToken;
use crate::modules::backend::application::ports::outgoing::table_gateway::BackendError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredObject {
    pub name: String,
}

/// Port for the backend's object storage buckets.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
        auth: Option<&AccessToken>,
    ) -> Result<(), BackendError>;

    /// Public URL of an object; pure, no network round trip.
    fn public_url(&self, bucket: &str, path: &str) -> String;

    async fn remove(
        &self,
        bucket: &str,
        paths: Vec<String>,
        auth: Option<&AccessToken>,
    ) -> Result<(), BackendError>;

    async fn list(
        &self,
        bucket: &str,
        prefix: &str,
        limit: usize,
    ) -> Result<Vec<StoredObject>, BackendError>;
}
