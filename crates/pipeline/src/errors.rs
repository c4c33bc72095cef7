//! Error types for the research pipeline domain.
//!
//! [`UnitError`] is what a processing unit's `run` returns; the pipeline
//! propagates it unchanged. [`NewsError`] and [`LlmError`] are produced by
//! port implementations. [`PipelineError`] adds the failures that belong to the
//! blocking execution path, and [`ConfigError`] covers start-up checks that run
//! before any unit exists.
//!
//! Per-article summarization failures are not represented here: the summarizer
//! folds an [`LlmError`] into the article's summary text instead of failing.

use thiserror::Error;

use crate::{PayloadKind, UnitName};

// ---------------------------------------------------------------------------
// Unit errors
// ---------------------------------------------------------------------------

/// Errors that end a unit's `run` and, with it, the pipeline run.
///
/// None of these are retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    /// The unit received a payload of the wrong shape.
    #[error("{unit} expected {expected} input but received {received}")]
    InvalidInputKind {
        /// Unit that rejected the payload.
        unit: UnitName,
        /// Payload shape the unit accepts.
        expected: PayloadKind,
        /// Payload shape it was given.
        received: PayloadKind,
    },

    /// `decide` or `act` ran before `perceive` stored any input.
    #[error("{unit} has no perceived input")]
    NothingPerceived {
        /// Unit with the empty state.
        unit: UnitName,
    },

    /// The topic failed its length bounds.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The news provider could not be reached or refused the request.
    #[error("article retrieval failed: {0}")]
    Retrieval(#[from] NewsError),
}

/// Topic length violations. Lengths are counted in characters after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Fewer characters than the configured minimum.
    #[error("Topic too short. Minimum length is {min}")]
    TooShort {
        /// Configured lower bound.
        min: usize,
        /// Length of the rejected topic.
        length: usize,
    },

    /// More characters than the configured maximum.
    #[error("Topic too long. Maximum length is {max}")]
    TooLong {
        /// Configured upper bound.
        max: usize,
        /// Length of the rejected topic.
        length: usize,
    },
}

// ---------------------------------------------------------------------------
// Port errors
// ---------------------------------------------------------------------------

/// Failures reported by a [`crate::NewsSource`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NewsError {
    /// The request never produced an HTTP response.
    #[error("transport error: {message}")]
    Transport { message: String },

    /// The provider answered with a non-success status.
    #[error("news provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the expected JSON.
    #[error("could not decode news response: {message}")]
    Decode { message: String },
}

/// Failures reported by an [`crate::LlmProvider`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LlmError {
    /// The request never produced an HTTP response.
    #[error("transport error: {message}")]
    Transport { message: String },

    /// The provider answered with a non-success status.
    #[error("model provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the expected JSON.
    #[error("could not decode model response: {message}")]
    Decode { message: String },

    /// The response carried no leading text block.
    #[error("model response contained no text")]
    EmptyResponse,
}

// ---------------------------------------------------------------------------
// Pipeline and configuration errors
// ---------------------------------------------------------------------------

/// Errors returned by the blocking `Pipeline::run` path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// A unit failed; the inner error is exactly what the unit returned.
    #[error(transparent)]
    Unit(#[from] UnitError),

    /// The private runtime that drives the blocking path could not start.
    #[error("could not start pipeline runtime: {message}")]
    Runtime { message: String },
}

/// Start-up configuration problems. The pipeline is never built when one occurs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// One or more required credentials are absent from the environment.
    #[error("missing required credentials: {}", .names.join(", "))]
    MissingCredentials { names: Vec<String> },

    /// An option value is out of range or inconsistent with another option.
    #[error("invalid option `{name}`: {message}")]
    InvalidOption { name: String, message: String },
}
