use super::{AuditError, AuditReport, AuditResult};
use crate::config::AuditConfig;
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// An accessibility engine that audits one URL at a time
#[async_trait]
pub trait AuditEngine: Send + Sync {
    /// Name used in log lines
    fn name(&self) -> &str;

    /// Audits `url` and returns the engine's report
    async fn audit(&self, url: &str) -> AuditResult<AuditReport>;
}

/// Runs an external executable per URL
///
/// The command is invoked as `command args... URL` and must print an
/// axe-style JSON results object on stdout and exit with status 0.
#[derive(Debug, Clone)]
pub struct CommandAuditEngine {
    command: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandAuditEngine {
    pub fn new(config: &AuditConfig) -> Self {
        Self {
            command: config.command.clone(),
            args: config.args.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

#[async_trait]
impl AuditEngine for CommandAuditEngine {
    fn name(&self) -> &str {
        &self.command
    }

    async fn audit(&self, url: &str) -> AuditResult<AuditReport> {
        tracing::debug!("Running {} {:?} {}", self.command, self.args, url);

        let mut cmd = Command::new(&self.command);
        cmd.args(&self.args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| AuditError::Timeout {
                url: url.to_string(),
                secs: self.timeout.as_secs(),
            })?
            .map_err(|source| AuditError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(AuditError::EngineFailed {
                url: url.to_string(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        serde_json::from_slice(&output.stdout).map_err(|source| AuditError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
