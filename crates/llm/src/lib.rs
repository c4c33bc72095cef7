//! Language model infrastructure adapter.
//!
//! Implements the [`pipeline::LlmProvider`] trait for Anthropic's Messages API.
//! Other providers are added as new `impl` blocks in this crate without any
//! changes to the `pipeline` crate.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP transport, request formatting and response parsing
//! live here. The [`pipeline`] crate sees only [`pipeline::LlmProvider`] and
//! [`pipeline::CompletionRequest`].
//!
//! Failures are returned once as [`pipeline::LlmError`]. The summarizer decides
//! what a failure means for the article being summarized.

mod anthropic;

pub use anthropic::{AnthropicProvider, ANTHROPIC_VERSION, DEFAULT_BASE_URL};
