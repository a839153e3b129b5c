use std::sync::Arc;

use linkstash_core::{AliasStore, ShortCode};

#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn AliasStore>,
    base_url: Option<String>,
}

impl AppState {
    pub fn new(store: Arc<dyn AliasStore>) -> Self {
        Self {
            store,
            base_url: None,
        }
    }

    /// Makes `POST /shorten` answer with full redirect URLs under `base_url`
    /// instead of bare codes.
    pub fn with_public_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn store(&self) -> &dyn AliasStore {
        self.store.as_ref()
    }

    /// The value returned to clients for a freshly saved code.
    pub fn short_url(&self, code: &ShortCode) -> String {
        match &self.base_url {
            Some(base_url) => code.to_url(base_url),
            None => code.to_string(),
        }
    }
}
