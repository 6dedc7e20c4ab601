use crate::audit::{AuditReport, Impact};
use std::fmt;

/// Violated rules of a report, counted by impact
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViolationSummary {
    pub critical: usize,
    pub serious: usize,
    pub moderate: usize,
    pub minor: usize,
    /// Rules reported without an impact level
    pub unrated: usize,
}

impl ViolationSummary {
    pub fn total(&self) -> usize {
        self.critical + self.serious + self.moderate + self.minor + self.unrated
    }

    /// Adds the counts of another summary, e.g. to total a whole run
    pub fn merge(&mut self, other: &ViolationSummary) {
        self.critical += other.critical;
        self.serious += other.serious;
        self.moderate += other.moderate;
        self.minor += other.minor;
        self.unrated += other.unrated;
    }
}

impl fmt::Display for ViolationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} violations ({} critical, {} serious, {} moderate, {} minor)",
            self.total(),
            self.critical,
            self.serious,
            self.moderate,
            self.minor
        )
    }
}

/// Counts the violated rules of a report by impact
pub fn violation_summary(report: &AuditReport) -> ViolationSummary {
    let mut summary = ViolationSummary::default();

    for rule in &report.violations {
        match rule.impact {
            Some(Impact::Critical) => summary.critical += 1,
            Some(Impact::Serious) => summary.serious += 1,
            Some(Impact::Moderate) => summary.moderate += 1,
            Some(Impact::Minor) => summary.minor += 1,
            None => summary.unrated += 1,
        }
    }

    summary
}
