//! The processing-unit contract.
//!
//! Every pipeline stage is a [`ProcessingUnit`]: it perceives a [`Payload`],
//! decides (possibly by calling out over the network), and acts to produce its
//! output. Implementors supply the three phases and access to their typed
//! [`UnitState`]; `run`, `reset` and `get_state` are provided so every unit is
//! driven and inspected the same way.
//!
//! ## State commit rule
//!
//! `last_decision` and `last_result` are written together, and only after all
//! three phases succeed. A failed `run` leaves them as they were before the
//! call. Whatever `perceive` stored before a later phase failed stays in place.

use async_trait::async_trait;
use serde::Serialize;

use crate::{
    Article, Payload, PayloadKind, PipelineEvent, PipelineObserver, TracingObserver, UnitError,
    UnitName,
};

// ---------------------------------------------------------------------------
// Phases and state
// ---------------------------------------------------------------------------

/// One of the three lifecycle phases of a unit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Reading and checking the input payload.
    Perceive,
    /// Choosing what to do with it.
    Decide,
    /// Producing the output payload.
    Act,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Phase::Perceive => "perceive",
            Phase::Decide => "decide",
            Phase::Act => "act",
        };
        f.write_str(label)
    }
}

/// The mutable state of one unit.
///
/// `input` is the unit's scratchpad, written by `perceive`. The other two
/// fields are the inspection record of the last successful cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitState<I, D, R> {
    /// The value stored by the most recent `perceive`.
    pub input: Option<I>,
    /// The decision of the last successful cycle.
    pub last_decision: Option<D>,
    /// The output of the last successful cycle.
    pub last_result: Option<R>,
}

impl<I, D, R> Default for UnitState<I, D, R> {
    fn default() -> Self {
        Self {
            input: None,
            last_decision: None,
            last_result: None,
        }
    }
}

impl<I, D, R> UnitState<I, D, R> {
    /// Returns `true` if nothing has been perceived or recorded.
    pub fn is_empty(&self) -> bool {
        self.input.is_none() && self.last_decision.is_none() && self.last_result.is_none()
    }
}

// ---------------------------------------------------------------------------
// Payload extraction
// ---------------------------------------------------------------------------

impl Payload {
    /// Unwraps a topic, or reports the payload as the wrong kind for `unit`.
    pub fn expect_topic(self, unit: &UnitName) -> Result<String, UnitError> {
        match self {
            Payload::Topic(topic) => Ok(topic),
            other => Err(wrong_kind(unit, PayloadKind::Topic, &other)),
        }
    }

    /// Unwraps a list of articles, or reports the payload as the wrong kind for `unit`.
    pub fn expect_articles(self, unit: &UnitName) -> Result<Vec<Article>, UnitError> {
        match self {
            Payload::Articles(articles) => Ok(articles),
            other => Err(wrong_kind(unit, PayloadKind::Articles, &other)),
        }
    }
}

fn wrong_kind(unit: &UnitName, expected: PayloadKind, received: &Payload) -> UnitError {
    UnitError::InvalidInputKind {
        unit: unit.clone(),
        expected,
        received: received.kind(),
    }
}

// ---------------------------------------------------------------------------
// The contract
// ---------------------------------------------------------------------------

/// A pipeline stage with a perceive → decide → act lifecycle.
#[async_trait]
pub trait ProcessingUnit: Send + Sync {
    /// What `perceive` stores.
    type Input: Clone + Send + Sync;
    /// What `decide` produces.
    type Decision: Clone + Send + Sync;
    /// What `act` produces; becomes the next unit's input.
    type Output: Clone + Send + Sync + Into<Payload>;

    /// Payload shape of [`Self::Output`].
    const OUTPUT_KIND: PayloadKind;

    /// The unit's name, used as its key in pipeline state.
    fn name(&self) -> &UnitName;

    /// Read access to the unit's state.
    fn state(&self) -> &UnitState<Self::Input, Self::Decision, Self::Output>;

    /// Write access to the unit's state.
    fn state_mut(&mut self) -> &mut UnitState<Self::Input, Self::Decision, Self::Output>;

    /// Checks the shape of `input` and stores it.
    ///
    /// Fails with [`UnitError::InvalidInputKind`] for a payload of the wrong kind.
    fn perceive(&mut self, input: Payload) -> Result<(), UnitError>;

    /// Derives a decision from the perceived input.
    ///
    /// Units that call external services do so here; this is the only phase
    /// that may suspend for I/O.
    async fn decide(&self) -> Result<Self::Decision, UnitError>;

    /// Turns `decision` into the unit's output.
    async fn act(&self, decision: &Self::Decision) -> Result<Self::Output, UnitError>;

    /// Runs one full cycle, reporting lifecycle events to `tracing`.
    async fn run(&mut self, input: Payload) -> Result<Self::Output, UnitError> {
        self.run_observed(input, &TracingObserver).await
    }

    /// Runs one full cycle, reporting lifecycle events to `observer`.
    ///
    /// Errors are reported as [`PipelineEvent::UnitFailed`] with the failing
    /// phase and then returned unchanged.
    async fn run_observed(
        &mut self,
        input: Payload,
        observer: &dyn PipelineObserver,
    ) -> Result<Self::Output, UnitError> {
        let unit = self.name().clone();
        observer.on_event(&PipelineEvent::UnitStarted {
            unit: &unit,
            input: input.kind(),
        });

        if let Err(error) = self.perceive(input) {
            return Err(report_failure(observer, &unit, Phase::Perceive, error));
        }
        let decision = match self.decide().await {
            Ok(decision) => decision,
            Err(error) => return Err(report_failure(observer, &unit, Phase::Decide, error)),
        };
        let output = match self.act(&decision).await {
            Ok(output) => output,
            Err(error) => return Err(report_failure(observer, &unit, Phase::Act, error)),
        };

        let state = self.state_mut();
        state.last_decision = Some(decision);
        state.last_result = Some(output.clone());

        observer.on_event(&PipelineEvent::UnitCompleted {
            unit: &unit,
            output: Self::OUTPUT_KIND,
        });
        Ok(output)
    }

    /// Clears the unit's state. Configuration is untouched.
    fn reset(&mut self) {
        *self.state_mut() = UnitState::default();
    }

    /// Returns a copy of the unit's state.
    fn get_state(&self) -> UnitState<Self::Input, Self::Decision, Self::Output> {
        self.state().clone()
    }
}

fn report_failure(
    observer: &dyn PipelineObserver,
    unit: &UnitName,
    phase: Phase,
    error: UnitError,
) -> UnitError {
    observer.on_event(&PipelineEvent::UnitFailed {
        unit,
        phase,
        error: &error,
    });
    error
}
