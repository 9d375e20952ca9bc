mod catalog;
mod remote;

pub use catalog::*;
pub use remote::*;

use crate::schema::MovieRecord;
use async_trait::async_trait;
use serde::Serialize;

/// Identifiers a caller supplied for one lookup, forwarded as received.
///
/// Choosing between them (explicit IDs before a fuzzy title match, `year`
/// as a tie breaker) is up to the [`MovieLookup`] implementation.
#[derive(Serialize, Debug, Default, Clone, PartialEq)]
pub struct LookupCriteria {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmdb_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_cached: Option<bool>,
}

impl LookupCriteria {
    pub fn only_cached(&self) -> bool {
        self.only_cached.unwrap_or(false)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// No movie matches the criteria. The message is shown to the caller as is.
    #[error("{0}")]
    NotFound(String),
    /// The provider could not answer (transport error, bad payload, ...).
    #[error("movie provider failed: {0}")]
    Upstream(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl LookupError {
    pub fn upstream(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        LookupError::Upstream(err.into())
    }
}

/// Resolves lookup criteria into exactly one movie.
#[async_trait]
pub trait MovieLookup: Send + Sync {
    async fn lookup(&self, criteria: &LookupCriteria) -> Result<MovieRecord, LookupError>;
}
