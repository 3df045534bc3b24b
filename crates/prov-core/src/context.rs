//! Per-invocation task context

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Immutable inputs for one run of the copy action on one host.
///
/// Holds the template variables visible to the task and the optional
/// `first_available_file` candidate list. Built once by the caller and
/// passed by reference into every resolution step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskContext {
    /// Variables available for path templating
    #[serde(default)]
    pub vars: BTreeMap<String, Value>,

    /// Ordered source candidates; the first one that exists wins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_available_file: Option<Vec<String>>,
}

impl TaskContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn with_first_available_file<I, S>(mut self, candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.first_available_file = Some(candidates.into_iter().map(Into::into).collect());
        self
    }

    /// Look up a variable by name.
    pub fn var(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }
}
