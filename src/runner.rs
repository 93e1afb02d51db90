//! Sequential plan runner (v0.1)
//!
//! Executes a plan's steps in order against a fresh `StepContext`,
//! short-circuiting at the first failure. Each run is independent: it
//! allocates its own context and produces one summary.
//!
//! The runner never catches panics; a panicking action or gate escapes to
//! the caller by design. The operational safety net lives in the
//! orchestrator, keeping plan logic separate from exception containment.

use serde::Serialize;
use tracing::{debug, instrument};

use crate::context::StepContext;
use crate::error::{PlanError, PlanResult};
use crate::plan::Plan;
use crate::types::StepId;

/// Per-step entry of a run summary.
///
/// A gated-off step is recorded with `ok: true`: for callers the summary
/// answers "did the run, as executed, fail", and a skipped step did not.
#[derive(Debug, Clone, Serialize)]
pub struct StepStatus {
    pub id: StepId,
    pub ok: bool,
}

/// Summary of one plan run, one entry per step that was reached
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub steps: Vec<StepStatus>,
}

impl RunSummary {
    /// Number of steps reached (executed or skipped)
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Run a plan's steps in order, stopping at the first failure.
///
/// Steps never overlap: step N+1 is not started until step N's future has
/// settled. A failing step aborts the remainder of the run and surfaces as
/// [`PlanError::StepFailed`] naming the step and wrapping the action's
/// error as the cause.
#[instrument(skip(plan), fields(plan_id = %plan.id()))]
pub async fn run_plan(plan: &Plan) -> PlanResult<RunSummary> {
    let mut ctx = StepContext::new();
    let mut summary = RunSummary::default();

    for step in plan.steps() {
        if !step.executes_in(&ctx) {
            debug!(step = %step.id(), "step gated off, skipping");
            summary.steps.push(StepStatus {
                id: step.id().clone(),
                ok: true,
            });
            continue;
        }

        debug!(step = %step.id(), "executing step");
        let result = step.action().run(&mut ctx).await;

        summary.steps.push(StepStatus {
            id: step.id().clone(),
            ok: result.is_ok(),
        });

        if let Err(cause) = result {
            debug!(step = %step.id(), %cause, "step failed, aborting run");
            return Err(PlanError::step_failed(step.name(), cause));
        }
    }

    Ok(summary)
}
