//! Research pipeline units and the sequential pipeline executor.
//!
//! This crate provides the three processing units (topic validation, article
//! retrieval, article summarization), the closed [`Stage`] enum that lets one
//! pipeline hold all three, and the [`Pipeline`] executor that drives them.
//!
//! ## Architectural Layer
//!
//! **Orchestration layer.** Units sequence calls between business rules in the
//! [`pipeline`] crate and the port traits ([`pipeline::NewsSource`],
//! [`pipeline::LlmProvider`]). The concrete HTTP clients are injected by the
//! composition root.
//!
//! ## Failure policy
//!
//! Validation and retrieval failures end the run. Summarization failures are
//! contained per article and never end the run.

mod executor;
mod research;
mod retriever;
mod stage;
mod summarizer;
mod validator;

#[cfg(test)]
mod test_support;

pub use executor::{Pipeline, PipelineSnapshot, PipelineStatus};
pub use research::{
    research_pipeline, ResearchOptions, RESEARCH_PIPELINE, RETRIEVER_UNIT, SUMMARIZER_UNIT,
    VALIDATOR_UNIT,
};
pub use retriever::{ArticleRetriever, RetrieverConfig, RetrieverState};
pub use stage::{Stage, StageState};
pub use summarizer::{
    summary_prompt, ArticleSummarizer, SummarizerConfig, SummarizerState, SUMMARY_ERROR_PREFIX,
    SUMMARY_TEMPERATURE,
};
pub use validator::{TopicValidator, ValidatorConfig, ValidatorState};
