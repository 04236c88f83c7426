//! Admin session handling on top of the backend's auth service.

use std::sync::Arc;

use tracing::{info, warn};

use crate::modules::admin::application::errors::MutationError;
use crate::modules::backend::application::ports::outgoing::{
    AccessToken, AuthGateway, AuthSession, AuthUser, BackendError,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignInError {
    #[error("password is required")]
    MissingPassword,

    #[error("{0}")]
    Rejected(String),
}

pub struct AdminAuth {
    auth: Arc<dyn AuthGateway>,
    admin_email: String,
}

impl AdminAuth {
    pub fn new(auth: Arc<dyn AuthGateway>, admin_email: impl Into<String>) -> Self {
        Self {
            auth,
            admin_email: admin_email.into(),
        }
    }

    /// Signs in as the configured admin account; the backend checks the password.
    pub async fn sign_in(&self, password: &str) -> Result<AuthSession, SignInError> {
        if password.is_empty() {
            return Err(SignInError::MissingPassword);
        }
        match self
            .auth
            .sign_in_with_password(&self.admin_email, password)
            .await
        {
            Ok(session) => {
                info!("Admin signed in");
                Ok(session)
            }
            Err(e) => {
                warn!("Admin sign-in rejected: {}", e);
                Err(SignInError::Rejected(e.to_string()))
            }
        }
    }

    /// Resolves the token to a user, or fails with `Authentication` naming
    /// the attempted `action`.
    pub async fn require_user(
        &self,
        token: Option<&AccessToken>,
        action: &str,
    ) -> Result<AuthUser, MutationError> {
        let Some(token) = token.filter(|t| !t.is_blank()) else {
            return Err(MutationError::Authentication(action.to_string()));
        };
        self.auth.get_user(token).await.map_err(|e| {
            warn!("Session check failed before '{}': {}", action, e);
            MutationError::Authentication(action.to_string())
        })
    }

    /// Best-effort; failures are logged.
    pub async fn sign_out(&self, token: &AccessToken) {
        if let Err(e) = self.auth.sign_out(token).await {
            warn!("Sign-out failed: {}", e);
        }
    }

    /// Cheap local check: is there a token at all.
    pub fn has_session_token(token: Option<&AccessToken>) -> bool {
        token.is_some_and(|t| !t.is_blank())
    }

    pub async fn verify(&self, token: &AccessToken) -> Result<AuthUser, BackendError> {
        self.auth.get_user(token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::in_memory_backend::{InMemoryBackend, TEST_PASSWORD};

    fn auth(backend: &Arc<InMemoryBackend>) -> AdminAuth {
        AdminAuth::new(backend.clone(), "admin@example.com")
    }

    #[tokio::test]
    async fn sign_in_uses_configured_email() {
        let backend = Arc::new(InMemoryBackend::new());

        let session = auth(&backend).sign_in(TEST_PASSWORD).await.unwrap();

        assert_eq!(session.user.email.as_deref(), Some("admin@example.com"));
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let backend = Arc::new(InMemoryBackend::new());

        let err = auth(&backend).sign_in("nope").await.unwrap_err();

        assert!(matches!(err, SignInError::Rejected(_)));
    }

    #[tokio::test]
    async fn empty_password_never_reaches_backend() {
        let backend = Arc::new(InMemoryBackend::new());

        let err = auth(&backend).sign_in("").await.unwrap_err();

        assert_eq!(err, SignInError::MissingPassword);
        assert_eq!(backend.auth_calls(), 0);
    }

    #[tokio::test]
    async fn require_user_rejects_missing_and_unknown_tokens() {
        let backend = Arc::new(InMemoryBackend::new());
        let auth = auth(&backend);

        let missing = auth.require_user(None, "create projects").await.unwrap_err();
        assert_eq!(missing, MutationError::Authentication("create projects".to_string()));

        let unknown = AccessToken::new("forged");
        assert!(auth.require_user(Some(&unknown), "x").await.is_err());
    }

    #[tokio::test]
    async fn require_user_accepts_live_session_until_sign_out() {
        let backend = Arc::new(InMemoryBackend::new());
        let auth = auth(&backend);
        let session = auth.sign_in(TEST_PASSWORD).await.unwrap();

        assert!(auth.require_user(Some(&session.access_token), "x").await.is_ok());

        auth.sign_out(&session.access_token).await;
        assert!(auth.require_user(Some(&session.access_token), "x").await.is_err());
    }

    mod with_mock_gateway {
        use super::*;
        use async_trait::async_trait;
        use mockall::{mock, predicate::*};

        mock! {
            pub Gateway {}
            #[async_trait]
            impl AuthGateway for Gateway {
                async fn sign_in_with_password(
                    &self,
                    email: &str,
                    password: &str,
                ) -> Result<AuthSession, BackendError>;
                async fn get_user(&self, token: &AccessToken) -> Result<AuthUser, BackendError>;
                async fn sign_out(&self, token: &AccessToken) -> Result<(), BackendError>;
            }
        }

        #[tokio::test]
        async fn sign_out_failure_is_swallowed() {
            let mut gateway = MockGateway::new();
            gateway
                .expect_sign_out()
                .times(1)
                .returning(|_| Err(BackendError::Network("down".to_string())));

            AdminAuth::new(Arc::new(gateway), "admin@example.com")
                .sign_out(&AccessToken::new("t"))
                .await;
        }

        #[tokio::test]
        async fn blank_token_skips_gateway() {
            let mut gateway = MockGateway::new();
            gateway.expect_get_user().never();

            let auth = AdminAuth::new(Arc::new(gateway), "admin@example.com");
            let blank = AccessToken::new("  ");

            assert!(auth.require_user(Some(&blank), "x").await.is_err());
        }

        #[tokio::test]
        async fn sign_in_passes_configured_email() {
            let mut gateway = MockGateway::new();
            gateway
                .expect_sign_in_with_password()
                .with(eq("owner@example.com"), eq("pw"))
                .times(1)
                .returning(|_, _| Err(BackendError::api(400, "Invalid login credentials")));

            let err = AdminAuth::new(Arc::new(gateway), "owner@example.com")
                .sign_in("pw")
                .await
                .unwrap_err();

            assert_eq!(err, SignInError::Rejected("Invalid login credentials".to_string()));
        }
    }

    #[test]
    fn session_token_presence() {
        assert!(!AdminAuth::has_session_token(None));
        assert!(!AdminAuth::has_session_token(Some(&AccessToken::new(" "))));
        assert!(AdminAuth::has_session_token(Some(&AccessToken::new("t"))));
    }
}
