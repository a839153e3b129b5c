use crate::error::Result;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use std::sync::Arc;

/// The result of a [`AliasStore::save`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    /// The code now mapped to the saved URL.
    pub code: ShortCode,
    /// `true` when this call created the mapping, `false` when it already existed.
    pub created: bool,
}

impl SaveOutcome {
    /// Outcome for a mapping created by the current call.
    pub fn created(code: ShortCode) -> Self {
        Self {
            code,
            created: true,
        }
    }

    /// Outcome for a URL that was already mapped.
    pub fn existing(code: ShortCode) -> Self {
        Self {
            code,
            created: false,
        }
    }
}

/// A bidirectional, append-only store of short code to URL mappings.
///
/// Implementations guarantee that every URL maps to at most one code and
/// every code to at most one URL, no matter how many callers race.
#[async_trait]
pub trait AliasStore: Send + Sync + 'static {
    /// Returns the code for `original_url`, creating a mapping if none exists.
    ///
    /// The URL is taken as-is; validation happens before it reaches the store.
    async fn save(&self, original_url: &str) -> Result<SaveOutcome>;

    /// Retrieves the URL for a given short code.
    /// Returns `None` if the code does not exist.
    async fn get(&self, code: &ShortCode) -> Result<Option<String>>;
}

#[async_trait]
impl<S: AliasStore + ?Sized> AliasStore for Arc<S> {
    async fn save(&self, original_url: &str) -> Result<SaveOutcome> {
        (**self).save(original_url).await
    }

    async fn get(&self, code: &ShortCode) -> Result<Option<String>> {
        (**self).get(code).await
    }
}
