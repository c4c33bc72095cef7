//! Port traits for the external collaborators.
//!
//! The units in the `nodes` crate depend only on these traits; the `news` and
//! `llm` crates supply the HTTP implementations. Both calls are the suspension
//! points of their unit's `decide` phase.

use async_trait::async_trait;

use crate::{CompletionRequest, LlmError, NewsError, NewsQuery, RawArticle};

/// Searches a news index.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Returns the provider's records for `query`, in provider order.
    ///
    /// Implementations must not retry; transport failures and non-success
    /// responses are reported as [`NewsError`].
    async fn search(&self, query: &NewsQuery) -> Result<Vec<RawArticle>, NewsError>;
}

/// Generates text from a single-prompt completion request.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Returns the text of the first content block of the model's reply.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError>;
}
