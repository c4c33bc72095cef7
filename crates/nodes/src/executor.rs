//! The sequential pipeline executor.
//!
//! A [`Pipeline`] owns an ordered list of [`Stage`]s and feeds each stage's
//! output into the next. After every successful stage it records a copy of that
//! unit's state under the unit's name. The first failing stage ends the run:
//! its error is returned unchanged and no later stage executes.
//!
//! Two entry points share one implementation:
//!
//! - [`Pipeline::run_suspendable`] is `async` and awaits each stage's I/O in
//!   place. Stages never overlap; the next one starts only after the previous
//!   one's `run` has returned.
//! - [`Pipeline::run`] blocks the calling thread, driving `run_suspendable` on
//!   a private current-thread runtime. Called from inside an async runtime it
//!   returns [`PipelineError::Runtime`] without running any stage.
//!
//! Units are not reset between runs; call [`Pipeline::reset`] for a clean rerun.

use std::collections::BTreeMap;
use std::sync::Arc;

use pipeline::{
    ObserverSet, Payload, PipelineError, PipelineEvent, PipelineName, PipelineObserver,
    PipelineRunId, TracingObserver, UnitError, UnitName,
};
use serde::Serialize;
use tracing::Instrument;

use crate::{Stage, StageState};

/// Where a pipeline is in its lifecycle.
///
/// `Completed` and `Failed` describe the most recent run; a new run moves the
/// pipeline back to `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    Idle,
    Running,
    Completed,
    Failed,
}

/// A copy of a pipeline's state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineSnapshot {
    pub name: PipelineName,
    pub status: PipelineStatus,
    /// State of each unit as of its last successful cycle, keyed by unit name.
    pub units: BTreeMap<UnitName, StageState>,
}

/// Runs stages strictly in sequence and tracks their state.
pub struct Pipeline {
    name: PipelineName,
    stages: Vec<Stage>,
    state: BTreeMap<UnitName, StageState>,
    status: PipelineStatus,
    observers: ObserverSet,
}

impl Pipeline {
    /// Creates a pipeline that reports lifecycle events through [`TracingObserver`].
    pub fn new(name: PipelineName, stages: Vec<Stage>) -> Self {
        let mut observers = ObserverSet::new();
        observers.push(Arc::new(TracingObserver));
        Self {
            name,
            stages,
            state: BTreeMap::new(),
            status: PipelineStatus::Idle,
            observers,
        }
    }

    /// Adds an observer that receives every lifecycle event after the existing ones.
    pub fn with_observer(mut self, observer: Arc<dyn PipelineObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn name(&self) -> &PipelineName {
        &self.name
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn status(&self) -> PipelineStatus {
        self.status
    }

    /// Runs every stage in order, awaiting each one's I/O before moving on.
    ///
    /// Returns the last stage's output, or the first stage error unchanged.
    pub async fn run_suspendable(&mut self, input: impl Into<Payload>) -> Result<Payload, UnitError> {
        let run_id = PipelineRunId::new_random();
        let span = tracing::info_span!("pipeline.run", pipeline = %self.name, run_id = %run_id);
        self.drive(input.into(), run_id).instrument(span).await
    }

    /// Blocking form of [`Pipeline::run_suspendable`].
    ///
    /// Fails with [`PipelineError::Runtime`] when the calling thread already
    /// drives a tokio runtime; use `run_suspendable` there.
    pub fn run(&mut self, input: impl Into<Payload>) -> Result<Payload, PipelineError> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(PipelineError::Runtime {
                message: "blocking run called inside an async runtime".to_string(),
            });
        }
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| PipelineError::Runtime {
                message: e.to_string(),
            })?;
        Ok(runtime.block_on(self.run_suspendable(input))?)
    }

    /// Clears recorded state, then resets every unit in sequence order.
    pub fn reset(&mut self) {
        self.state.clear();
        for stage in &mut self.stages {
            stage.reset();
        }
        self.status = PipelineStatus::Idle;
        self.observers.on_event(&PipelineEvent::Reset {
            pipeline: &self.name,
        });
    }

    /// Returns a copy of the pipeline's name, status, and per-unit state.
    pub fn get_state(&self) -> PipelineSnapshot {
        PipelineSnapshot {
            name: self.name.clone(),
            status: self.status,
            units: self.state.clone(),
        }
    }

    async fn drive(&mut self, input: Payload, run_id: PipelineRunId) -> Result<Payload, UnitError> {
        self.status = PipelineStatus::Running;
        self.observers.on_event(&PipelineEvent::RunStarted {
            pipeline: &self.name,
            run_id,
            units: self.stages.len(),
        });

        let mut current = input;
        for stage in &mut self.stages {
            match stage.run(current, &self.observers).await {
                Ok(output) => {
                    self.state.insert(stage.name().clone(), stage.snapshot());
                    current = output;
                }
                Err(error) => {
                    self.status = PipelineStatus::Failed;
                    self.observers.on_event(&PipelineEvent::RunFailed {
                        pipeline: &self.name,
                        run_id,
                        unit: stage.name(),
                        error: &error,
                    });
                    return Err(error);
                }
            }
        }

        self.status = PipelineStatus::Completed;
        self.observers.on_event(&PipelineEvent::RunCompleted {
            pipeline: &self.name,
            run_id,
        });
        Ok(current)
    }
}

impl std::fmt::Display for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pipeline(name={}, units={})", self.name, self.stages.len())
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("name", &self.name)
            .field("stages", &self.stages)
            .field("status", &self.status)
            .field("observers", &self.observers)
            .finish()
    }
}
