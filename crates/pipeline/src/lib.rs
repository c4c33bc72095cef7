//! Core domain for the news research pipeline.
//!
//! This crate contains every domain concept, newtype identifier, shared value
//! type, and error type used throughout the workspace, together with the
//! processing-unit contract and the port traits for the two external services.
//! Infrastructure crates implement the ports; they never add domain rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; infrastructure crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`UnitName`, `PipelineName`, `PipelineRunId`) |
//! | [`types`] | Articles, the inter-unit `Payload`, port request types |
//! | [`errors`] | Unit, port, pipeline, and configuration errors |
//! | [`unit`] | The `ProcessingUnit` perceive/decide/act contract |
//! | [`observer`] | Lifecycle events and the `PipelineObserver` hook |
//! | [`ports`] | `NewsSource` and `LlmProvider` traits |

pub mod errors;
pub mod identifiers;
pub mod observer;
pub mod ports;
pub mod types;
pub mod unit;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use errors::{ConfigError, LlmError, NewsError, PipelineError, UnitError, ValidationError};
pub use identifiers::{PipelineName, PipelineRunId, UnitName};
pub use observer::{ObserverSet, PipelineEvent, PipelineObserver, TracingObserver};
pub use ports::{LlmProvider, NewsSource};
pub use types::{
    Article, CompletionRequest, NewsQuery, Payload, PayloadKind, RawArticle, RawSource,
    SortOrder, SummarizedArticle, SEARCH_WINDOW_DAYS, UNKNOWN_SOURCE,
};
pub use unit::{Phase, ProcessingUnit, UnitState};
