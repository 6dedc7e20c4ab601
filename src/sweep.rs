//! End-to-end sweep: discovery followed by auditing
//!
//! The binary's main path. Discovery never fails once the request is valid,
//! so the errors here are the ones that make a run impossible: a bad seed,
//! no `[audit]` section, or a results directory that cannot be created.

use crate::audit::{AuditDispatcher, AuditRun};
use crate::config::Config;
use crate::discovery::{DiscoveryRequest, Orchestrator, UrlSet};
use crate::Result;

/// URLs found by discovery and the audit run over them
#[derive(Debug, Default)]
pub struct SweepOutcome {
    pub urls: UrlSet,
    pub run: AuditRun,
}

/// Discovers the pages for `request` and audits each of them
///
/// The audit engine is resolved before any network traffic, so a config
/// without an `[audit]` section fails fast.
///
/// # Errors
///
/// * `SweepError::Config` - The config has no `[audit]` section
/// * `SweepError::Results` - The results directory could not be created
pub async fn sweep(config: &Config, request: &DiscoveryRequest) -> Result<SweepOutcome> {
    let dispatcher = AuditDispatcher::from_config(config)?;

    let urls = Orchestrator::new(config).run(request).await;
    tracing::info!("Discovered {} URL(s) for {}", urls.len(), request.seed());

    if urls.is_empty() {
        return Ok(SweepOutcome::default());
    }

    let run = dispatcher.run(&urls).await?;
    Ok(SweepOutcome { urls, run })
}

/// Sweeps a seed URL with the discovery settings from `config`
///
/// # Errors
///
/// Everything [`sweep`] returns, plus `SweepError::Url` for an invalid seed.
pub async fn sweep_url(config: &Config, seed: &str) -> Result<SweepOutcome> {
    let request = DiscoveryRequest::from_config(seed, &config.discovery)?;
    sweep(config, &request).await
}
