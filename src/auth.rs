use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use std::convert::Infallible;

use crate::{
    config::AppConfig,
    storage::{RequestTokenStore, TokenStore},
};

/// AuthContext
///
/// The authentication state a navigation is evaluated against. It is passed to the
/// guard explicitly instead of being read from ambient storage, so every decision is
/// a pure function of its inputs.
///
/// Only presence matters: the token is opaque and has no expiry. An empty string
/// counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    token: Option<String>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            token: (!token.is_empty()).then_some(token),
        }
    }

    /// Reads the token stored under `key`.
    pub fn from_store(store: &dyn TokenStore, key: &str) -> Self {
        store
            .get_item(key)
            .map(Self::with_token)
            .unwrap_or_default()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Session Extractor
///
/// Builds the caller's `AuthContext` from the request, using the configured storage key
/// for the cookie lookup. A missing token is a normal state, so extraction never rejects.
#[derive(Debug, Clone)]
pub struct Session(pub AuthContext);

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
    AppConfig: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = AppConfig::from_ref(state);
        let store = RequestTokenStore::new(&parts.headers);
        Ok(Session(AuthContext::from_store(&store, &config.token_key)))
    }
}
