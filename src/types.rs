//! NewType identifiers for plans and steps (v0.1)
//!
//! Thin wrappers over `Arc<str>` so a plan id and a step id are distinct
//! types at compile time, with zero-cost cloning. No validation is applied:
//! callers own the shape of their identifiers.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

/// Strongly-typed plan identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PlanId(Arc<str>);

impl PlanId {
    pub fn new(id: impl AsRef<str>) -> Self {
        PlanId(Arc::from(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlanId {
    fn from(s: &str) -> Self {
        PlanId::new(s)
    }
}

/// Strongly-typed step identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StepId(Arc<str>);

impl StepId {
    pub fn new(id: impl AsRef<str>) -> Self {
        StepId(Arc::from(id.as_ref()))
    }

    /// Auto-assigned id for the step at `index` (0-based) of the named plan:
    /// `"{plan_name}-s{index+1}"`
    pub fn derived(plan_name: &str, index: usize) -> Self {
        StepId(Arc::from(format!("{}-s{}", plan_name, index + 1).as_str()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for StepId {
    fn from(s: &str) -> Self {
        StepId::new(s)
    }
}
