use axum::http::{HeaderMap, header};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

// 1. TokenStore Contract
/// TokenStore
///
/// The key/value storage the session token lives in. Reads are all the navigation
/// layer ever does; writing belongs to the login and logout flows, which own the
/// concrete store.
pub trait TokenStore: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
}

// 2. In-Memory Store
/// MemoryTokenStore
///
/// Process-local storage, shareable between the flows that write the token and
/// the code that reads it.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a single entry.
    pub fn with_item(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.set_item(key, value);
        store
    }

    pub fn set_item(&self, key: &str, value: &str) {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }

    pub fn remove_item(&self, key: &str) {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

impl TokenStore for MemoryTokenStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

// 3. Request-Backed Store
/// RequestTokenStore
///
/// The browser's storage as seen by the served shell: a cookie named after the
/// storage key, or a `Bearer` credential, which wins when both are present.
pub struct RequestTokenStore<'a> {
    headers: &'a HeaderMap,
}

impl<'a> RequestTokenStore<'a> {
    pub fn new(headers: &'a HeaderMap) -> Self {
        Self { headers }
    }

    fn bearer(&self) -> Option<String> {
        self.headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
    }

    fn cookie(&self, key: &str) -> Option<String> {
        let jar = CookieJar::from_headers(self.headers);
        jar.get(key).map(Cookie::value).map(str::to_string)
    }
}

impl TokenStore for RequestTokenStore<'_> {
    fn get_item(&self, key: &str) -> Option<String> {
        self.bearer().or_else(|| self.cookie(key))
    }
}
