//! Error types for plan execution (v0.1)
//!
//! Expected step failures travel through `PlanError::StepFailed` with the
//! collaborator's error attached as the source. Panics that escape an action
//! are normalized once, at the orchestrator, into `PlanError::Unexpected`.

use thiserror::Error;

/// Open error channel for collaborator-provided step actions.
///
/// Actions belong to external layers (tool calls, retrieval queries,
/// persistence writes) with their own error types, so the contract takes
/// any boxed error rather than forcing a conversion.
pub type ActionError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced by running a plan
#[derive(Debug, Error)]
pub enum PlanError {
    /// A step action reported failure through its Result.
    /// The step is identified by display name; the action's own error
    /// is preserved as the source.
    #[error("Step failed: {step}")]
    StepFailed {
        step: String,
        #[source]
        cause: ActionError,
    },

    /// A step action (or gate) panicked instead of returning a Result.
    /// Caught only at the orchestrator boundary.
    #[error("Unexpected failure: {message}")]
    Unexpected { message: String },
}

impl PlanError {
    /// Build an expected-failure error for the named step
    pub fn step_failed(step: impl Into<String>, cause: ActionError) -> Self {
        PlanError::StepFailed {
            step: step.into(),
            cause,
        }
    }

    /// Display name of the failed step, if this is a step failure
    pub fn failed_step(&self) -> Option<&str> {
        match self {
            PlanError::StepFailed { step, .. } => Some(step),
            PlanError::Unexpected { .. } => None,
        }
    }
}

/// Uniform outcome type for every fallible engine operation
pub type PlanResult<T> = Result<T, PlanError>;
