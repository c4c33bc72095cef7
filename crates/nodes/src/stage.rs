//! The closed set of units a pipeline can hold.
//!
//! The three units have different `Input`/`Decision`/`Output` types, so the
//! pipeline stores them behind this enum and dispatches with a `match`. Their
//! state snapshots get the same treatment in [`StageState`].

use pipeline::{Payload, PipelineObserver, ProcessingUnit, UnitError, UnitName};
use serde::Serialize;

use crate::{
    ArticleRetriever, ArticleSummarizer, RetrieverState, SummarizerState, TopicValidator,
    ValidatorState,
};

/// One unit in a pipeline.
#[derive(Debug)]
pub enum Stage {
    Validate(TopicValidator),
    Retrieve(ArticleRetriever),
    Summarize(ArticleSummarizer),
}

/// A copy of one unit's state, as recorded in pipeline state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "unit", content = "state", rename_all = "snake_case")]
pub enum StageState {
    Validate(ValidatorState),
    Retrieve(RetrieverState),
    Summarize(SummarizerState),
}

impl Stage {
    /// Name of the wrapped unit.
    pub fn name(&self) -> &UnitName {
        match self {
            Stage::Validate(unit) => unit.name(),
            Stage::Retrieve(unit) => unit.name(),
            Stage::Summarize(unit) => unit.name(),
        }
    }

    /// Runs the unit's full cycle and wraps its output as a [`Payload`].
    pub async fn run(
        &mut self,
        input: Payload,
        observer: &dyn PipelineObserver,
    ) -> Result<Payload, UnitError> {
        match self {
            Stage::Validate(unit) => unit.run_observed(input, observer).await.map(Payload::from),
            Stage::Retrieve(unit) => unit.run_observed(input, observer).await.map(Payload::from),
            Stage::Summarize(unit) => unit.run_observed(input, observer).await.map(Payload::from),
        }
    }

    /// Clears the unit's input, last decision and last result.
    pub fn reset(&mut self) {
        match self {
            Stage::Validate(unit) => unit.reset(),
            Stage::Retrieve(unit) => unit.reset(),
            Stage::Summarize(unit) => unit.reset(),
        }
    }

    /// Copy of the unit's current state, tagged by unit kind.
    pub fn snapshot(&self) -> StageState {
        match self {
            Stage::Validate(unit) => StageState::Validate(unit.get_state()),
            Stage::Retrieve(unit) => StageState::Retrieve(unit.get_state()),
            Stage::Summarize(unit) => StageState::Summarize(unit.get_state()),
        }
    }
}

impl StageState {
    /// Returns `true` if the snapshot holds no input and no recorded cycle.
    pub fn is_empty(&self) -> bool {
        match self {
            StageState::Validate(state) => state.is_empty(),
            StageState::Retrieve(state) => state.is_empty(),
            StageState::Summarize(state) => state.is_empty(),
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Validate(unit) => std::fmt::Display::fmt(unit, f),
            Stage::Retrieve(unit) => std::fmt::Display::fmt(unit, f),
            Stage::Summarize(unit) => std::fmt::Display::fmt(unit, f),
        }
    }
}

impl From<TopicValidator> for Stage {
    fn from(unit: TopicValidator) -> Self {
        Stage::Validate(unit)
    }
}

impl From<ArticleRetriever> for Stage {
    fn from(unit: ArticleRetriever) -> Self {
        Stage::Retrieve(unit)
    }
}

impl From<ArticleSummarizer> for Stage {
    fn from(unit: ArticleSummarizer) -> Self {
        Stage::Summarize(unit)
    }
}
