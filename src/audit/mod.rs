//! Audit dispatch module
//!
//! The accessibility engine itself is an external program. This module
//! holds the report model it produces, the [`AuditEngine`] seam with a
//! command-line implementation, and the dispatcher that audits a URL set
//! and persists one report per page.

mod dispatcher;
mod engine;
mod report;

pub use dispatcher::{AuditDispatcher, AuditRun};
pub use engine::{AuditEngine, CommandAuditEngine};
pub use report::{AuditReport, Impact, NodeResult, RuleResult, TestEngine};

use thiserror::Error;

/// Errors raised while auditing one URL
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Failed to start audit engine '{command}': {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("Audit of {url} timed out after {secs}s")]
    Timeout { url: String, secs: u64 },

    #[error("Audit engine failed for {url} (exit code {code:?}): {stderr}")]
    EngineFailed {
        url: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Failed to decode audit report for {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },
}

/// Result type alias for audit operations
pub type AuditResult<T> = std::result::Result<T, AuditError>;
