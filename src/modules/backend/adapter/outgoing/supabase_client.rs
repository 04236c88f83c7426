//! Shared HTTP plumbing for the Supabase adapters.
//!
//! Every request carries the project's anon key in the `apikey` header and a
//! bearer token: the caller's access token when one is given, otherwise the
//! anon key itself.

use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::modules::backend::application::ports::outgoing::{AccessToken, BackendError};

#[derive(Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseClient {
    pub fn new(base_url: &str, anon_key: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, anon_key)
    }

    /// Reuses an existing [`reqwest::Client`] so all adapters share one pool.
    pub fn with_client(http: reqwest::Client, base_url: &str, anon_key: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> Result<Url, BackendError> {
        let raw = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        Url::parse(&raw).map_err(|e| BackendError::Network(format!("invalid url {raw}: {e}")))
    }

    /// Applies `apikey` and `Authorization` headers.
    pub fn authorize(&self, builder: RequestBuilder, auth: Option<&AccessToken>) -> RequestBuilder {
        let bearer = auth.map(AccessToken::as_str).unwrap_or(&self.anon_key);
        builder
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer)
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub async fn send(builder: RequestBuilder) -> Result<Response, BackendError> {
        let response = builder
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;
        Self::ensure_success(response).await
    }

    pub async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, BackendError> {
        let response = Self::send(builder).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))
    }

    async fn ensure_success(response: Response) -> Result<Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        Err(parse_error_body(status.as_u16(), &body))
    }
}

fn string_field(body: &Value, key: &str) -> Option<String> {
    match body.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Maps the error bodies of PostgREST, GoTrue and Storage onto one shape.
pub fn parse_error_body(status: u16, body: &str) -> BackendError {
    let Ok(json) = serde_json::from_str::<Value>(body) else {
        let message = if body.trim().is_empty() {
            format!("HTTP {status}")
        } else {
            body.trim().to_string()
        };
        return BackendError::api(status, message);
    };

    let message = ["message", "msg", "error_description", "error"]
        .iter()
        .find_map(|k| string_field(&json, k))
        .unwrap_or_else(|| format!("HTTP {status}"));

    let code = ["code", "error_code", "statusCode"]
        .iter()
        .find_map(|k| string_field(&json, k));

    BackendError::Api {
        status,
        message,
        details: string_field(&json, "details"),
        hint: string_field(&json, "hint"),
        code,
    }
}
