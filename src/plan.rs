//! Plan model and construction (v0.1)
//!
//! A `Plan` is an immutable, ordered sequence of steps sharing one
//! `StepContext` per run. Steps are supplied as `StepSpec`s; `Plan::new`
//! assigns `"{plan_name}-s{index+1}"` to any spec without an explicit id.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use serde_json::Value;

use crate::context::StepContext;
use crate::error::ActionError;
use crate::types::{PlanId, StepId};

/// Unit of work executed by a step.
///
/// Implementors receive only the shared run context and must report failure
/// through the returned Result; a panic is treated as an unexpected
/// condition and is caught at the orchestrator, not here.
#[async_trait]
pub trait StepAction: Send + Sync {
    async fn run(&self, ctx: &mut StepContext) -> Result<Option<Value>, ActionError>;
}

/// Boxed future returned by closure-based actions
pub type ActionFuture<'a> = BoxFuture<'a, Result<Option<Value>, ActionError>>;

/// Adapter so a closure can serve as a [`StepAction`]
///
/// The closure must return a boxed future borrowing the context:
///
/// ```rust,ignore
/// use futures::FutureExt;
///
/// let act = eva_plan::action(|ctx: &mut StepContext| {
///     async move {
///         ctx.set("greeting", serde_json::json!("hello"));
///         Ok(None)
///     }
///     .boxed()
/// });
/// ```
pub struct FnAction<F>(F);

impl<F> FnAction<F>
where
    F: for<'a> Fn(&'a mut StepContext) -> ActionFuture<'a> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        FnAction(f)
    }
}

#[async_trait]
impl<F> StepAction for FnAction<F>
where
    F: for<'a> Fn(&'a mut StepContext) -> ActionFuture<'a> + Send + Sync,
{
    async fn run(&self, ctx: &mut StepContext) -> Result<Option<Value>, ActionError> {
        (self.0)(ctx).await
    }
}

/// Wrap a closure into a shareable step action
pub fn action<F>(f: F) -> Arc<dyn StepAction>
where
    F: for<'a> Fn(&'a mut StepContext) -> ActionFuture<'a> + Send + Sync + 'static,
{
    Arc::new(FnAction::new(f))
}

/// Gating predicate deciding whether a step executes in a given run.
/// Must be pure: it reads the context and must not alter it.
pub type Gate = Arc<dyn Fn(&StepContext) -> bool + Send + Sync>;

/// Construction-time description of a step, before id assignment
pub struct StepSpec {
    id: Option<StepId>,
    name: String,
    action: Arc<dyn StepAction>,
    when: Option<Gate>,
}

impl StepSpec {
    /// New spec with no explicit id and no gate
    pub fn new(name: impl Into<String>, action: Arc<dyn StepAction>) -> Self {
        Self {
            id: None,
            name: name.into(),
            action,
            when: None,
        }
    }

    /// Carry an explicit id instead of the auto-assigned one
    pub fn with_id(mut self, id: impl Into<StepId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Gate the step on a predicate over the run context
    pub fn when<G>(mut self, gate: G) -> Self
    where
        G: Fn(&StepContext) -> bool + Send + Sync + 'static,
    {
        self.when = Some(Arc::new(gate));
        self
    }
}

impl fmt::Debug for StepSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepSpec")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("gated", &self.when.is_some())
            .finish()
    }
}

/// A named unit of work within a plan.
///
/// Identity is fixed at plan construction; actions receive only the run
/// context and cannot touch id or name.
pub struct Step {
    id: StepId,
    name: String,
    action: Arc<dyn StepAction>,
    when: Option<Gate>,
}

impl Step {
    /// Unique-within-plan identifier (uniqueness is the caller's concern)
    pub fn id(&self) -> &StepId {
        &self.id
    }

    /// Human-readable label used in error messages and telemetry
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn action(&self) -> &dyn StepAction {
        self.action.as_ref()
    }

    /// Evaluate the gate; an ungated step always executes
    pub(crate) fn executes_in(&self, ctx: &StepContext) -> bool {
        match &self.when {
            Some(gate) => gate(ctx),
            None => true,
        }
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("gated", &self.when.is_some())
            .finish()
    }
}

/// Immutable ordered sequence of steps sharing one execution context
pub struct Plan {
    id: PlanId,
    name: String,
    steps: Vec<Step>,
}

impl Plan {
    /// Build a plan from step specs.
    ///
    /// Any spec without an explicit id gets `"{name}-s{index+1}"` (1-based).
    /// Input order is preserved exactly. The plan id equals `name` verbatim,
    /// so names must be suitable as identifiers. Duplicate step ids are not
    /// rejected; they produce ambiguous run summaries.
    pub fn new(name: impl Into<String>, specs: Vec<StepSpec>) -> Self {
        let name = name.into();
        let steps = specs
            .into_iter()
            .enumerate()
            .map(|(index, spec)| Step {
                id: spec.id.unwrap_or_else(|| StepId::derived(&name, index)),
                name: spec.name,
                action: spec.action,
                when: spec.when,
            })
            .collect();

        Self {
            id: PlanId::new(&name),
            name,
            steps,
        }
    }

    pub fn id(&self) -> &PlanId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Steps in execution order
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

impl fmt::Debug for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plan")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("steps", &self.steps)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Noop;

    #[async_trait]
    impl StepAction for Noop {
        async fn run(&self, _ctx: &mut StepContext) -> Result<Option<Value>, ActionError> {
            Ok(None)
        }
    }

    fn noop() -> Arc<dyn StepAction> {
        Arc::new(Noop)
    }

    #[test]
    fn assigns_derived_ids_one_based() {
        let plan = Plan::new(
            "demo",
            vec![StepSpec::new("hello", noop()), StepSpec::new("world", noop())],
        );

        assert_eq!(plan.steps()[0].id().as_str(), "demo-s1");
        assert_eq!(plan.steps()[1].id().as_str(), "demo-s2");
    }

    #[test]
    fn explicit_id_is_kept_verbatim() {
        let plan = Plan::new(
            "demo",
            vec![
                StepSpec::new("first", noop()),
                StepSpec::new("second", noop()).with_id("custom"),
                StepSpec::new("third", noop()),
            ],
        );

        assert_eq!(plan.steps()[0].id().as_str(), "demo-s1");
        assert_eq!(plan.steps()[1].id().as_str(), "custom");
        // Auto-assignment uses positional index, not a counter of missing ids
        assert_eq!(plan.steps()[2].id().as_str(), "demo-s3");
    }

    #[test]
    fn plan_id_equals_name() {
        let plan = Plan::new("answer-flow", vec![]);
        assert_eq!(plan.id().as_str(), "answer-flow");
        assert_eq!(plan.name(), "answer-flow");
    }

    #[test]
    fn duplicate_step_ids_are_permitted() {
        let plan = Plan::new(
            "p",
            vec![
                StepSpec::new("a", noop()).with_id("dup"),
                StepSpec::new("b", noop()).with_id("dup"),
            ],
        );
        assert_eq!(plan.steps()[0].id(), plan.steps()[1].id());
    }

    #[test]
    fn order_is_preserved() {
        let names = ["fetch", "analyze", "format", "persist"];
        let plan = Plan::new(
            "p",
            names.iter().map(|n| StepSpec::new(*n, noop())).collect(),
        );

        let got: Vec<&str> = plan.steps().iter().map(|s| s.name()).collect();
        assert_eq!(got, names);
    }

    #[test]
    fn ungated_step_always_executes() {
        let plan = Plan::new("p", vec![StepSpec::new("a", noop())]);
        assert!(plan.steps()[0].executes_in(&StepContext::new()));
    }

    #[test]
    fn gate_reads_context() {
        let plan = Plan::new(
            "p",
            vec![StepSpec::new("a", noop()).when(|ctx| ctx.contains("ready"))],
        );

        let mut ctx = StepContext::new();
        assert!(!plan.steps()[0].executes_in(&ctx));

        ctx.set("ready", json!(true));
        assert!(plan.steps()[0].executes_in(&ctx));
    }
}
