//! News search infrastructure adapter.
//!
//! Implements the [`pipeline::NewsSource`] trait against the News API
//! `/v2/everything` search endpoint.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP transport, query encoding, credential handling and
//! response decoding live here. The [`pipeline`] crate sees only
//! [`pipeline::NewsSource`] and [`pipeline::RawArticle`].
//!
//! No retries and no rate-limit handling: a failed request is reported once as
//! a [`pipeline::NewsError`] and the retrieval unit ends the run.

mod client;

pub use client::{NewsApiClient, DEFAULT_BASE_URL};
