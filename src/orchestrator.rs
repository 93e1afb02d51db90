//! Supervisory wrapper around plan execution (v0.1)
//!
//! Adds start/success/failure telemetry around the runner and converts any
//! escaped panic into a normal `PlanError`. This is the single boundary
//! where unexpected conditions become Results; the runner itself only ever
//! reports expected step failures.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use serde_json::json;
use tracing::instrument;

use crate::error::{PlanError, PlanResult};
use crate::plan::Plan;
use crate::runner::{run_plan, RunSummary};
use crate::telemetry::{NoopTelemetry, Telemetry};

/// Emitted before any step executes
pub const RUN_START: &str = "orchestrator.run.start";
/// Emitted after a run completes without failure
pub const RUN_OK: &str = "orchestrator.run.ok";
/// Emitted when a step reports failure through its Result
pub const RUN_ERROR: &str = "orchestrator.run.error";
/// Emitted when a panic escaped the runner
pub const RUN_EXCEPTION: &str = "orchestrator.run.exception";

/// Supervises one run of one plan at a time
pub struct Orchestrator {
    telemetry: Arc<dyn Telemetry>,
}

impl Orchestrator {
    /// Orchestrator without observability; telemetry calls are elided
    pub fn new() -> Self {
        Self {
            telemetry: Arc::new(NoopTelemetry),
        }
    }

    /// Orchestrator reporting through the given telemetry collaborator
    pub fn with_telemetry(telemetry: Arc<dyn Telemetry>) -> Self {
        Self { telemetry }
    }

    /// Run the plan to completion or first failure.
    ///
    /// Emits `orchestrator.run.start`, then delegates to the runner, then
    /// exactly one of `orchestrator.run.ok` / `orchestrator.run.error` /
    /// `orchestrator.run.exception` before returning. Runner failures are
    /// returned unchanged; panics are normalized into
    /// [`PlanError::Unexpected`].
    #[instrument(skip(self, plan), fields(plan_id = %plan.id()))]
    pub async fn run(&self, plan: &Plan) -> PlanResult<RunSummary> {
        self.telemetry.info(
            RUN_START,
            json!({
                "plan_id": plan.id().as_str(),
                "plan_name": plan.name(),
            }),
        );

        match AssertUnwindSafe(run_plan(plan)).catch_unwind().await {
            Ok(Ok(summary)) => {
                self.telemetry.info(RUN_OK, json!({ "steps": summary.len() }));
                Ok(summary)
            }
            Ok(Err(err)) => {
                use std::error::Error;
                self.telemetry.error(
                    RUN_ERROR,
                    json!({
                        "error": err.to_string(),
                        "cause": err.source().map(|c| c.to_string()),
                    }),
                );
                Err(err)
            }
            Err(payload) => {
                let message = panic_message(payload);
                self.telemetry
                    .error(RUN_EXCEPTION, json!({ "message": message }));
                Err(PlanError::Unexpected { message })
            }
        }
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}

/// String-normalize a panic payload: `&str` and `String` payloads keep
/// their message, anything else gets a fixed marker.
fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
