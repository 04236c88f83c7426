use async_trait::async_trait;
use serde_json::json;

use crate::modules::backend::adapter::outgoing::supabase_client::SupabaseClient;
use crate::modules::backend::application::ports::outgoing::{
    AccessToken, AuthGateway, AuthSession, AuthUser, BackendError,
};

/// GoTrue adapter (`/auth/v1`).
#[derive(Clone)]
pub struct SupabaseAuth {
    client: SupabaseClient,
}

impl SupabaseAuth {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthGateway for SupabaseAuth {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, BackendError> {
        let mut url = self.client.url("auth/v1/token")?;
        url.query_pairs_mut().append_pair("grant_type", "password");

        let request = self
            .client
            .authorize(self.client.http().post(url), None)
            .json(&json!({ "email": email, "password": password }));

        SupabaseClient::send_json(request).await
    }

    async fn get_user(&self, token: &AccessToken) -> Result<AuthUser, BackendError> {
        if token.is_blank() {
            return Err(BackendError::api(401, "missing access token"));
        }
        let url = self.client.url("auth/v1/user")?;
        let request = self
            .client
            .authorize(self.client.http().get(url), Some(token));

        SupabaseClient::send_json(request).await
    }

    async fn sign_out(&self, token: &AccessToken) -> Result<(), BackendError> {
        let url = self.client.url("auth/v1/logout")?;
        let request = self
            .client
            .authorize(self.client.http().post(url), Some(token));

        SupabaseClient::send(request).await.map(|_| ())
    }
}
