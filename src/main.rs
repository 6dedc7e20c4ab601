//! a11y-sweep main entry point
//!
//! Command-line interface: discover the pages of a site, audit each one with
//! the configured engine and report where the results were written.

use a11y_sweep::audit::AuditRun;
use a11y_sweep::config::{load_config, Config};
use a11y_sweep::discovery::{DiscoveryMode, DiscoveryRequest, Orchestrator, UrlSet};
use a11y_sweep::results::{latest_results_directory, violation_summary, ViolationSummary};
use a11y_sweep::sweep::sweep;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// a11y-sweep: site-wide accessibility audits
///
/// Discovers the pages of a website from its sitemaps (crawling the site
/// when there is no usable sitemap) and runs an accessibility engine on
/// every page, storing one JSON report per page.
#[derive(Parser, Debug)]
#[command(name = "a11y-sweep")]
#[command(version)]
#[command(about = "Site-wide accessibility audits", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Website to audit
    #[arg(value_name = "URL", required_unless_present = "latest")]
    url: Option<String>,

    /// Maximum crawl depth (overrides discovery.crawl-depth)
    #[arg(short, long)]
    depth: Option<u32>,

    /// Discovery mode: auto, sitemap, crawl or single (overrides discovery.mode)
    #[arg(short, long)]
    mode: Option<DiscoveryMode>,

    /// Print the discovered URLs without auditing them
    #[arg(long, conflicts_with = "latest")]
    discover_only: bool,

    /// Print the most recent results directory and exit
    #[arg(long)]
    latest: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    if cli.latest {
        return handle_latest(&config);
    }

    let Some(seed) = cli.url.as_deref() else {
        anyhow::bail!("a URL is required unless --latest is given");
    };

    let mut request = DiscoveryRequest::from_config(seed, &config.discovery)
        .with_context(|| format!("Invalid URL: {}", seed))?;
    if let Some(depth) = cli.depth {
        request = request.with_crawl_depth(depth);
    }
    if let Some(mode) = cli.mode {
        request = request.with_mode(mode);
    }

    let cancel = CancellationToken::new();
    request = request.with_cancel(cancel.clone());
    spawn_ctrl_c_handler(cancel);

    if cli.discover_only {
        let urls = Orchestrator::new(&config).run(&request).await;
        print_urls(&urls);
        return Ok(());
    }

    let outcome = sweep(&config, &request).await.context("Sweep failed")?;
    print_urls(&outcome.urls);
    if outcome.urls.is_empty() {
        println!("\nNothing to audit.");
        return Ok(());
    }

    print_run(&outcome.run);
    Ok(())
}

fn print_urls(urls: &UrlSet) {
    println!("Discovered {} URL(s):", urls.len());
    for url in urls {
        println!("  {}", url);
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("a11y_sweep=info,warn"),
            1 => EnvFilter::new("a11y_sweep=debug,info"),
            2 => EnvFilter::new("a11y_sweep=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Cancels discovery at the next checkpoint on Ctrl-C
fn spawn_ctrl_c_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, finishing with the URLs found so far");
            cancel.cancel();
        }
    });
}

/// Handles --latest: prints the newest results directory
fn handle_latest(config: &Config) -> Result<()> {
    let output = config.output_or_default();
    let root = Path::new(&output.results_directory);

    match latest_results_directory(root)
        .with_context(|| format!("Failed to read {}", root.display()))?
    {
        Some(directory) => println!("{}", directory.display()),
        None => println!("No results found in {}", root.display()),
    }

    Ok(())
}

fn print_run(run: &AuditRun) {
    println!();
    if let Some(version) = &run.engine_version {
        println!("Engine version: {}", version);
    }

    let mut total = ViolationSummary::default();
    for (url, report) in &run.reports {
        let summary = violation_summary(report);
        println!("  {}: {}", url, summary);
        total.merge(&summary);
    }

    println!("\nAudited {} page(s): {}", run.reports.len(), total);
    if !run.failed.is_empty() {
        println!("Failed to audit {} page(s):", run.failed.len());
        for url in &run.failed {
            println!("  {}", url);
        }
    }
    if let Some(directory) = &run.directory {
        println!("Results saved to: {}", directory.display());
    }
}
