//! Audit dispatcher
//!
//! Audits every URL of a discovery run in turn. A failing page is logged
//! and recorded in [`AuditRun::failed`]; it never stops the run.

use super::{AuditEngine, AuditReport, CommandAuditEngine};
use crate::config::Config;
use crate::discovery::UrlSet;
use crate::results::{create_results_directory, save_report_json, ResultsResult};
use crate::ConfigResult;
use chrono::{Local, NaiveDateTime};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Outcome of auditing a URL set
#[derive(Debug, Default)]
pub struct AuditRun {
    /// `{root}/{domain}/{timestamp}` of this run; `None` for an empty URL set
    pub directory: Option<PathBuf>,

    /// Reports of the pages that were audited, by URL
    pub reports: BTreeMap<String, AuditReport>,

    /// URLs the engine could not audit
    pub failed: Vec<String>,

    /// Engine version taken from the first report that carries one
    pub engine_version: Option<String>,
}

/// Runs the audit engine over discovered URLs and persists the reports
pub struct AuditDispatcher {
    engine: Box<dyn AuditEngine>,
    results_root: PathBuf,
}

impl AuditDispatcher {
    pub fn new(engine: Box<dyn AuditEngine>, results_root: impl Into<PathBuf>) -> Self {
        Self {
            engine,
            results_root: results_root.into(),
        }
    }

    /// Creates a dispatcher running the configured engine command
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingSection` if there is no `[audit]` section.
    pub fn from_config(config: &Config) -> ConfigResult<Self> {
        let audit = config.require_audit()?;
        let output = config.output_or_default();
        Ok(Self::new(
            Box::new(CommandAuditEngine::new(audit)),
            output.results_directory,
        ))
    }

    /// Audits `urls`, timestamping the run with the current local time
    pub async fn run(&self, urls: &UrlSet) -> ResultsResult<AuditRun> {
        self.run_at(urls, Local::now().naive_local()).await
    }

    /// Audits `urls` into the results directory for `timestamp`
    ///
    /// The directory is named after the first URL's site and is only
    /// created when there is something to audit.
    ///
    /// # Errors
    ///
    /// Only failing to create the results directory is an error; engine
    /// failures and unwritable report files are logged per page.
    pub async fn run_at(&self, urls: &UrlSet, timestamp: NaiveDateTime) -> ResultsResult<AuditRun> {
        let Some(first) = urls.iter().next() else {
            tracing::warn!("No URLs provided for testing.");
            return Ok(AuditRun::default());
        };

        let directory = create_results_directory(&self.results_root, first, timestamp)?;
        tracing::info!(
            "Auditing {} URL(s) with {} into {}",
            urls.len(),
            self.engine.name(),
            directory.display()
        );

        let mut run = AuditRun {
            directory: Some(directory.clone()),
            ..AuditRun::default()
        };

        for (index, url) in urls.iter().enumerate() {
            tracing::info!("[{}/{}] Testing {}", index + 1, urls.len(), url);

            let report = match self.engine.audit(url).await {
                Ok(report) => report,
                Err(e) => {
                    tracing::error!("Accessibility test failed for {}: {}", url, e);
                    run.failed.push(url.clone());
                    continue;
                }
            };

            if run.engine_version.is_none() {
                run.engine_version = report.engine_version().map(str::to_string);
            }

            if let Err(e) = save_report_json(&directory, url, &report) {
                tracing::error!("Error while saving JSON results for {}: {}", url, e);
            }

            run.reports.insert(url.clone(), report);
        }

        if run.reports.is_empty() {
            tracing::warn!("No accessibility test results were returned.");
        } else {
            tracing::info!(
                "Accessibility tests completed for {} URL(s), {} failed.",
                run.reports.len(),
                run.failed.len()
            );
        }

        Ok(run)
    }
}
