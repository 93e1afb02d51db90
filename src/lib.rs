//! eva-plan - sequential execution-plan engine for agent actions
//!
//! An in-process, single-run execution primitive: an ordered list of named
//! steps, each an async unit of work over a shared mutable context, run to
//! completion or to first failure. The [`Orchestrator`] wraps the runner
//! with telemetry and panic containment; persistence, schema validation and
//! telemetry sinks are external collaborators reached only through the
//! [`StepAction`] and [`Telemetry`] contracts.

pub mod context;
pub mod error;
pub mod orchestrator;
pub mod plan;
pub mod runner;
pub mod telemetry;
pub mod types;

pub use context::StepContext;
pub use error::{ActionError, PlanError, PlanResult};
pub use orchestrator::Orchestrator;
pub use plan::{action, ActionFuture, FnAction, Gate, Plan, Step, StepAction, StepSpec};
pub use runner::{run_plan, RunSummary, StepStatus};
pub use telemetry::{
    NoopTelemetry, RecordingTelemetry, Telemetry, TelemetryLevel, TelemetryRecord,
    TracingTelemetry,
};
pub use types::{PlanId, StepId};
