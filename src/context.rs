//! Shared per-run execution state (v0.1)
//!
//! One `StepContext` is created at the start of each plan run and dropped at
//! the end. Steps read and write it strictly in sequence, so no locking is
//! needed; nothing outside the run ever observes it.

use std::collections::HashMap;

use serde_json::Value;

/// Mutable variable store shared by all steps of one plan run
#[derive(Debug, Clone, Default)]
pub struct StepContext {
    /// Variable name → arbitrary value
    vars: HashMap<String, Value>,
}

impl StepContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.vars.insert(name.into(), value);
    }

    /// Get a variable
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    /// Check whether a variable is set
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Check if the context has any variables
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Number of variables
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Serialize the variables to a JSON object, for telemetry attrs
    pub fn to_value(&self) -> Value {
        serde_json::to_value(&self.vars).unwrap_or(Value::Null)
    }
}
