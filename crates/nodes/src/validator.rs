//! Topic validation unit.

use async_trait::async_trait;
use pipeline::{Payload, PayloadKind, ProcessingUnit, UnitError, UnitName, UnitState, ValidationError};

/// Length bounds for a research topic, in characters after trimming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorConfig {
    pub min_length: usize,
    pub max_length: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            min_length: 3,
            max_length: 100,
        }
    }
}

/// State of a [`TopicValidator`]: the trimmed topic, the validity flag, and the topic returned.
pub type ValidatorState = UnitState<String, bool, String>;

/// Checks that the topic string is within the configured length bounds.
///
/// Pure: no I/O, never suspends.
#[derive(Debug)]
pub struct TopicValidator {
    name: UnitName,
    config: ValidatorConfig,
    state: ValidatorState,
}

impl TopicValidator {
    /// Validator with no recorded decision or result.
    pub fn new(name: UnitName, config: ValidatorConfig) -> Self {
        Self {
            name,
            config,
            state: ValidatorState::default(),
        }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Returns the perceived topic if it satisfies both bounds.
    fn validated_topic(&self) -> Result<&str, UnitError> {
        let topic = self
            .state
            .input
            .as_deref()
            .ok_or_else(|| UnitError::NothingPerceived {
                unit: self.name.clone(),
            })?;

        let length = topic.chars().count();
        if length < self.config.min_length {
            return Err(ValidationError::TooShort {
                min: self.config.min_length,
                length,
            }
            .into());
        }
        if length > self.config.max_length {
            return Err(ValidationError::TooLong {
                max: self.config.max_length,
                length,
            }
            .into());
        }
        Ok(topic)
    }
}

#[async_trait]
impl ProcessingUnit for TopicValidator {
    type Input = String;
    type Decision = bool;
    type Output = String;

    const OUTPUT_KIND: PayloadKind = PayloadKind::Topic;

    fn name(&self) -> &UnitName {
        &self.name
    }

    fn state(&self) -> &ValidatorState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ValidatorState {
        &mut self.state
    }

    fn perceive(&mut self, input: Payload) -> Result<(), UnitError> {
        let topic = input.expect_topic(&self.name)?;
        tracing::info!(unit = %self.name, topic = %topic, "Received input topic");
        self.state.input = Some(topic.trim().to_string());
        Ok(())
    }

    async fn decide(&self) -> Result<bool, UnitError> {
        let topic = self.validated_topic()?;
        tracing::info!(unit = %self.name, topic, "Topic validated successfully");
        Ok(true)
    }

    async fn act(&self, _decision: &bool) -> Result<String, UnitError> {
        // Validation is idempotent, so it is simply repeated before returning.
        Ok(self.validated_topic()?.to_string())
    }
}

impl std::fmt::Display for TopicValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TopicValidator(name={})", self.name)
    }
}
