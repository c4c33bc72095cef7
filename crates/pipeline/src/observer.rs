//! Structured lifecycle events and the observer hook that receives them.
//!
//! Units and the pipeline report what happens to a [`PipelineObserver`] rather
//! than logging inline. Observers see every event but cannot change the outcome
//! of a run. [`TracingObserver`] is the default sink and forwards everything to
//! `tracing`.

use std::sync::Arc;

use crate::{Phase, PayloadKind, PipelineName, PipelineRunId, UnitError, UnitName};

/// A point in a pipeline or unit lifecycle.
#[derive(Debug, Clone, Copy)]
pub enum PipelineEvent<'a> {
    /// A pipeline run entered the `Running` state.
    RunStarted {
        pipeline: &'a PipelineName,
        run_id: PipelineRunId,
        units: usize,
    },
    /// A unit is about to perceive its input.
    UnitStarted { unit: &'a UnitName, input: PayloadKind },
    /// A unit finished its act phase and committed its state.
    UnitCompleted { unit: &'a UnitName, output: PayloadKind },
    /// A unit phase returned an error. The error is propagated unchanged.
    UnitFailed {
        unit: &'a UnitName,
        phase: Phase,
        error: &'a UnitError,
    },
    /// Every unit completed.
    RunCompleted {
        pipeline: &'a PipelineName,
        run_id: PipelineRunId,
    },
    /// A unit failed and the run stopped without running later units.
    RunFailed {
        pipeline: &'a PipelineName,
        run_id: PipelineRunId,
        unit: &'a UnitName,
        error: &'a UnitError,
    },
    /// Pipeline state and every unit's state were cleared.
    Reset { pipeline: &'a PipelineName },
}

/// Receives [`PipelineEvent`]s.
///
/// Called synchronously on the run's own task; implementations should return
/// quickly.
pub trait PipelineObserver: Send + Sync {
    fn on_event(&self, event: &PipelineEvent<'_>);
}

// ---------------------------------------------------------------------------
// Built-in observers
// ---------------------------------------------------------------------------

/// Forwards every event to `tracing`: lifecycle events at `info`, failures at `error`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn on_event(&self, event: &PipelineEvent<'_>) {
        match *event {
            PipelineEvent::RunStarted {
                pipeline,
                run_id,
                units,
            } => {
                tracing::info!(pipeline = %pipeline, run_id = %run_id, units, "Starting pipeline run");
            }
            PipelineEvent::UnitStarted { unit, input } => {
                tracing::info!(unit = %unit, input = %input, "Starting unit cycle");
            }
            PipelineEvent::UnitCompleted { unit, output } => {
                tracing::info!(unit = %unit, output = %output, "Completed unit cycle");
            }
            PipelineEvent::UnitFailed { unit, phase, error } => {
                tracing::error!(unit = %unit, phase = %phase, error = %error, "Unit cycle failed");
            }
            PipelineEvent::RunCompleted { pipeline, run_id } => {
                tracing::info!(pipeline = %pipeline, run_id = %run_id, "Pipeline completed successfully");
            }
            PipelineEvent::RunFailed {
                pipeline,
                run_id,
                unit,
                error,
            } => {
                tracing::error!(
                    pipeline = %pipeline,
                    run_id = %run_id,
                    unit = %unit,
                    error = %error,
                    "Pipeline failed"
                );
            }
            PipelineEvent::Reset { pipeline } => {
                tracing::info!(pipeline = %pipeline, "Pipeline reset completed");
            }
        }
    }
}

/// Fans each event out to a list of observers, in registration order.
#[derive(Clone, Default)]
pub struct ObserverSet {
    observers: Vec<Arc<dyn PipelineObserver>>,
}

impl ObserverSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an observer.
    pub fn push(&mut self, observer: Arc<dyn PipelineObserver>) {
        self.observers.push(observer);
    }

    /// Number of registered observers.
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Returns `true` if no observer is registered.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl PipelineObserver for ObserverSet {
    fn on_event(&self, event: &PipelineEvent<'_>) {
        for observer in &self.observers {
            observer.on_event(event);
        }
    }
}

impl std::fmt::Debug for ObserverSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverSet")
            .field("observers", &self.observers.len())
            .finish()
    }
}
