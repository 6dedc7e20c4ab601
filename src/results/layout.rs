use super::{ResultsError, ResultsResult};
use crate::audit::AuditReport;
use crate::url::site_domain;
use chrono::NaiveDateTime;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Name format of the per-run timestamp directory
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Suffix of every per-page report file
const REPORT_SUFFIX: &str = "_accessibility_test.json";

/// Computes the results directory for a run on the site of `url`
///
/// The domain loses a leading `www.`; a non-default port is kept as
/// `_port` so it stays a valid directory name.
///
/// # Example
///
/// ```
/// use a11y_sweep::results::results_directory;
/// use chrono::NaiveDate;
/// use std::path::Path;
///
/// let at = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap().and_hms_opt(14, 5, 0).unwrap();
/// let dir = results_directory(Path::new("data"), "https://www.example.com/about", at).unwrap();
/// assert_eq!(dir, Path::new("data/example.com/2024-03-09_14-05-00"));
/// ```
pub fn results_directory(root: &Path, url: &str, timestamp: NaiveDateTime) -> ResultsResult<PathBuf> {
    let parsed = Url::parse(url).map_err(|e| ResultsError::InvalidUrl(format!("{}: {}", url, e)))?;
    let domain = site_domain(&parsed).ok_or_else(|| ResultsError::InvalidUrl(url.to_string()))?;

    Ok(root
        .join(domain)
        .join(timestamp.format(TIMESTAMP_FORMAT).to_string()))
}

/// Computes and creates the results directory for a run
pub fn create_results_directory(
    root: &Path,
    url: &str,
    timestamp: NaiveDateTime,
) -> ResultsResult<PathBuf> {
    let directory = results_directory(root, url, timestamp)?;
    fs::create_dir_all(&directory)?;
    tracing::debug!("Created results directory {}", directory.display());
    Ok(directory)
}

/// Derives the per-page identifier used in report file names
///
/// The path is trimmed of slashes and the remaining slashes become
/// underscores; the site root is `homepage`.
pub fn page_identifier(url: &Url) -> String {
    let path = url.path().trim_matches('/');
    if path.is_empty() {
        "homepage".to_string()
    } else {
        path.replace('/', "_")
    }
}

/// File name of the JSON report for a page
pub fn report_file_name(url: &Url) -> String {
    format!("{}{}", page_identifier(url), REPORT_SUFFIX)
}

/// Writes one page's report as pretty-printed JSON
///
/// # Returns
///
/// The path of the written file
pub fn save_report_json(directory: &Path, url: &str, report: &AuditReport) -> ResultsResult<PathBuf> {
    let parsed = Url::parse(url).map_err(|e| ResultsError::InvalidUrl(format!("{}: {}", url, e)))?;
    let path = directory.join(report_file_name(&parsed));

    let json = serde_json::to_string_pretty(report)?;
    fs::write(&path, json)?;

    tracing::debug!("Saved report for {} to {}", url, path.display());
    Ok(path)
}

/// Finds the newest `{domain}/{timestamp}` directory under `root`
///
/// Entries whose names do not parse as timestamps are ignored. A missing
/// root means there are no results yet.
pub fn latest_results_directory(root: &Path) -> ResultsResult<Option<PathBuf>> {
    tracing::info!("Checking for latest results directory in: {}", root.display());

    if !root.is_dir() {
        return Ok(None);
    }

    let mut latest: Option<(NaiveDateTime, PathBuf)> = None;

    for domain_entry in fs::read_dir(root)? {
        let domain_path = domain_entry?.path();
        if !domain_path.is_dir() {
            continue;
        }

        for run_entry in fs::read_dir(&domain_path)? {
            let run_path = run_entry?.path();
            if !run_path.is_dir() {
                continue;
            }

            let Some(name) = run_path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Ok(at) = NaiveDateTime::parse_from_str(name, TIMESTAMP_FORMAT) else {
                continue;
            };

            if latest.as_ref().map_or(true, |(best, _)| at > *best) {
                latest = Some((at, run_path));
            }
        }
    }

    Ok(latest.map(|(_, path)| path))
}
