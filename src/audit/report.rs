//! Accessibility report model
//!
//! Mirrors the axe-core results object. Only the fields the crate reads are
//! typed; everything else an engine emits is kept in `extra` so a saved
//! report loses nothing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Severity of a rule result
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Minor,
    Moderate,
    Serious,
    Critical,
}

/// Full report for one audited page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_engine: Option<TestEngine>,

    #[serde(default)]
    pub violations: Vec<RuleResult>,

    #[serde(default)]
    pub passes: Vec<RuleResult>,

    #[serde(default)]
    pub incomplete: Vec<RuleResult>,

    #[serde(default)]
    pub inapplicable: Vec<RuleResult>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AuditReport {
    /// Version of the engine that produced the report, if it says so
    pub fn engine_version(&self) -> Option<&str> {
        self.test_engine.as_ref()?.version.as_deref()
    }
}

/// Engine identification block (`testEngine`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestEngine {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub version: Option<String>,
}

/// Outcome of one rule on a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleResult {
    pub id: String,

    /// `null` for passed and inapplicable rules
    #[serde(default)]
    pub impact: Option<Impact>,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub help: String,

    #[serde(default)]
    pub help_url: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub nodes: Vec<NodeResult>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One element a rule was evaluated on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeResult {
    #[serde(default)]
    pub html: String,

    /// CSS selectors; nested arrays address frames and shadow roots
    #[serde(default)]
    pub target: Vec<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_summary: Option<String>,

    #[serde(default)]
    pub impact: Option<Impact>,

    #[serde(default)]
    pub any: Vec<Value>,

    #[serde(default)]
    pub all: Vec<Value>,

    #[serde(default)]
    pub none: Vec<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
