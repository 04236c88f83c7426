use async_trait::async_trait;
use serde_json::json;

use crate::modules::backend::adapter::outgoing::supabase_client::SupabaseClient;
use crate::modules::backend::application::ports::outgoing::{
    AccessToken, BackendError, ObjectStorage, StoredObject,
};

/// Browser cache lifetime applied to uploaded objects.
const CACHE_CONTROL: &str = "max-age=3600";

/// Storage adapter (`/storage/v1`).
#[derive(Clone)]
pub struct SupabaseStorage {
    client: SupabaseClient,
}

impl SupabaseStorage {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStorage for SupabaseStorage {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
        auth: Option<&AccessToken>,
    ) -> Result<(), BackendError> {
        let url = self
            .client
            .url(&format!("storage/v1/object/{bucket}/{path}"))?;

        let request = self
            .client
            .authorize(self.client.http().post(url), auth)
            .header("Content-Type", content_type)
            .header("Cache-Control", CACHE_CONTROL)
            .header("x-upsert", "false")
            .body(bytes);

        SupabaseClient::send(request).await.map(|_| ())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.client.base_url(),
            bucket,
            path
        )
    }

    async fn remove(
        &self,
        bucket: &str,
        paths: Vec<String>,
        auth: Option<&AccessToken>,
    ) -> Result<(), BackendError> {
        let url = self.client.url(&format!("storage/v1/object/{bucket}"))?;
        let request = self
            .client
            .authorize(self.client.http().delete(url), auth)
            .json(&json!({ "prefixes": paths }));

        SupabaseClient::send(request).await.map(|_| ())
    }

    async fn list(
        &self,
        bucket: &str,
        prefix: &str,
        limit: usize,
    ) -> Result<Vec<StoredObject>, BackendError> {
        let url = self
            .client
            .url(&format!("storage/v1/object/list/{bucket}"))?;
        let request = self
            .client
            .authorize(self.client.http().post(url), None)
            .json(&json!({ "prefix": prefix, "limit": limit }));

        SupabaseClient::send_json(request).await
    }
}
