use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::modules::portfolio::application::auto_refresh::RefreshOptions;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid {key} value '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Mount point of the placeholder routes; always starts and ends with `/`.
    pub api_prefix: String,
    pub backend_url: String,
    pub backend_anon_key: String,
    pub admin_email: String,
    pub storage_bucket: String,
    pub webhook_secret: Option<String>,
    /// `None` when `PORTFOLIO_REFRESH_SECS` is 0.
    pub refresh_interval: Option<Duration>,
    pub refresh_cooldown: Duration,
}

impl AppConfig {
    pub const DEFAULT_PORT: u16 = 8000;
    pub const DEFAULT_STORAGE_BUCKET: &'static str = "product_preview_images";

    /// Reads process environment; call after the `.env` files are loaded.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let backend_url = required("BACKEND_URL")?;
        if !backend_url.starts_with("http://") && !backend_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                key: "BACKEND_URL",
                value: backend_url,
            });
        }

        let refresh_secs: u64 = parse(&get, "PORTFOLIO_REFRESH_SECS", 30)?;
        let cooldown_secs: u64 = parse(&get, "REFRESH_COOLDOWN_SECS", 5)?;

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse(&get, "PORT", Self::DEFAULT_PORT)?,
            api_prefix: normalize_prefix(&get("API_PREFIX").unwrap_or_else(|| "/api/".to_string())),
            backend_url,
            backend_anon_key: required("BACKEND_ANON_KEY")?,
            admin_email: required("ADMIN_EMAIL")?,
            storage_bucket: get("STORAGE_BUCKET")
                .unwrap_or_else(|| Self::DEFAULT_STORAGE_BUCKET.to_string()),
            webhook_secret: get("WEBHOOK_SECRET"),
            refresh_interval: (refresh_secs > 0).then(|| Duration::from_secs(refresh_secs)),
            refresh_cooldown: Duration::from_secs(cooldown_secs),
        })
    }

    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Timer and cooldown from the environment; client triggers stay enabled.
    pub fn refresh_options(&self) -> RefreshOptions {
        RefreshOptions {
            interval: self.refresh_interval,
            cooldown: self.refresh_cooldown,
            ..RefreshOptions::default()
        }
    }
}

fn parse<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}

fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    const REQUIRED: &[(&str, &str)] = &[
        ("BACKEND_URL", "https://demo.supabase.co"),
        ("BACKEND_ANON_KEY", "anon"),
        ("ADMIN_EMAIL", "admin@example.com"),
    ];

    #[test]
    fn defaults_apply() {
        let config = AppConfig::from_lookup(lookup(REQUIRED)).unwrap();

        assert_eq!(config.server_url(), "0.0.0.0:8000");
        assert_eq!(config.api_prefix, "/api/");
        assert_eq!(config.storage_bucket, "product_preview_images");
        assert_eq!(config.webhook_secret, None);
        assert_eq!(config.refresh_interval, Some(Duration::from_secs(30)));
        assert_eq!(config.refresh_cooldown, Duration::from_secs(5));
    }

    #[test]
    fn backend_credentials_have_no_defaults() {
        let err = AppConfig::from_lookup(lookup(&[("ADMIN_EMAIL", "a@b.c")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("BACKEND_URL"));

        let err = AppConfig::from_lookup(lookup(&[
            ("BACKEND_URL", "https://demo.supabase.co"),
            ("BACKEND_ANON_KEY", "  "),
            ("ADMIN_EMAIL", "a@b.c"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing("BACKEND_ANON_KEY"));
    }

    #[test]
    fn invalid_port_is_rejected() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("PORT", "eighty"));

        let err = AppConfig::from_lookup(lookup(&pairs)).unwrap_err();

        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "PORT",
                value: "eighty".to_string()
            }
        );
    }

    #[test]
    fn zero_interval_disables_timer_and_prefix_is_normalized() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("PORTFOLIO_REFRESH_SECS", "0"));
        pairs.push(("API_PREFIX", "v1"));

        let config = AppConfig::from_lookup(lookup(&pairs)).unwrap();

        assert_eq!(config.refresh_interval, None);
        assert_eq!(config.refresh_options().interval, None);
        assert!(config.refresh_options().refresh_on_focus);
        assert_eq!(config.api_prefix, "/v1/");
    }

    #[test]
    fn backend_url_must_be_http() {
        let err = AppConfig::from_lookup(lookup(&[
            ("BACKEND_URL", "demo.supabase.co"),
            ("BACKEND_ANON_KEY", "anon"),
            ("ADMIN_EMAIL", "a@b.c"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "BACKEND_URL", .. }));
    }
}
